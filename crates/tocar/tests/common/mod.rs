//! Shared fixture trees, built the way an application under test would be.
#![allow(dead_code)]

use std::collections::HashMap;
use std::rc::Rc;
use tocar::{App, FailurePolicy, Node, NodeRef, RootSource, Scheduler};
use tracing_subscriber::EnvFilter;

/// Install an env-filtered subscriber so `RUST_LOG=tocar=trace` surfaces
/// query and dispatch traces from a test run. Safe to call from every
/// fixture; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Form screen with one of each control plus hidden and disabled variants.
/// Every enabled control is bound to a label that mirrors its state; hooks
/// on disabled controls panic, so any interaction leaking through fails the
/// test loudly.
pub fn form_root() -> NodeRef {
    init_tracing();
    let status = Node::label("Label text");
    let tap_target = Rc::clone(&status);

    let switch_state = Node::label("Disabled");
    let switch_target = Rc::clone(&switch_state);

    let stepper_value = Node::label("2.0");
    let stepper_target = Rc::clone(&stepper_value);

    let slider_value = Node::label("2.0");
    let slider_target = Rc::clone(&slider_value);

    let typed_mirror = Node::label("");
    let typed_target = Rc::clone(&typed_mirror);

    Node::group()
        .with_child(status)
        .with_child(Node::label("Hidden label text").with_hidden(true))
        .with_child(
            Node::button("Button title")
                .with_action(move |_| tap_target.set_text("Changed label text")),
        )
        .with_child(
            Node::button("Disabled button title")
                .with_enabled(false)
                .with_action(|_| panic!("disabled button fired")),
        )
        .with_child(Node::button("Hidden button title").with_hidden(true))
        .with_child(switch_state)
        .with_child(Node::toggle("A switch", false).with_action(move |control| {
            let state = if matches!(control.is_on(), Some(true)) {
                "Enabled"
            } else {
                "Disabled"
            };
            switch_target.set_text(state);
        }))
        .with_child(
            Node::toggle("A disabled switch", false)
                .with_enabled(false)
                .with_action(|_| panic!("disabled switch fired")),
        )
        .with_child(Node::toggle("A hidden switch", false).with_hidden(true))
        .with_child(stepper_value)
        .with_child(
            Node::stepper("A stepper", 2.0, 1.0).with_action(move |control| {
                if let Some(value) = control.value() {
                    stepper_target.set_text(&format!("{value:.1}"));
                }
            }),
        )
        .with_child(
            Node::stepper("A disabled stepper", 2.0, 1.0)
                .with_enabled(false)
                .with_action(|_| panic!("disabled stepper fired")),
        )
        .with_child(Node::stepper("A hidden stepper", 2.0, 1.0).with_hidden(true))
        .with_child(slider_value)
        .with_child(
            Node::slider("A slider", 2.0, 0.0, 4.0).with_action(move |control| {
                if let Some(value) = control.value() {
                    slider_target.set_text(&format!("{value:.1}"));
                }
            }),
        )
        .with_child(
            Node::slider("A disabled slider", 2.0, 0.0, 4.0)
                .with_enabled(false)
                .with_action(|_| panic!("disabled slider fired")),
        )
        .with_child(Node::slider("A hidden slider", 2.0, 0.0, 4.0).with_hidden(true))
        .with_child(typed_mirror)
        .with_child(
            Node::text_input("Text field placeholder").with_action(move |control| {
                if let Some(text) = control.text() {
                    typed_target.set_text(&text);
                }
            }),
        )
        .with_child(
            Node::text_input("Disabled text field placeholder")
                .with_enabled(false)
                .with_action(|_| panic!("disabled text field fired")),
        )
        .with_child(Node::text_input("Hidden text field placeholder").with_hidden(true))
}

/// Form screen wrapped in a driver.
pub fn form_app(policy: FailurePolicy) -> App {
    App::with_policy(form_root(), policy)
}

/// Table screen: a header that records the last selection, a list of rows
/// and one standalone label that no cell query may reach.
pub fn table_root() -> NodeRef {
    init_tracing();
    let header = Node::label("No selection");

    let mut list = Node::list();
    for row in ["Row One", "Row Two", "Row Three"] {
        let bound = Rc::clone(&header);
        list = list.with_child(
            Node::list_cell()
                .with_child(Node::label(row))
                .with_action(move |cell| {
                    bound.set_text(&format!("Selected {}", cell.visible_text()));
                }),
        );
    }
    list = list.with_child(
        Node::list_cell()
            .with_hidden(true)
            .with_child(Node::label("Row Hidden")),
    );

    Node::group()
        .with_child(header)
        .with_child(Node::label("Standalone Three"))
        .with_child(list)
}

/// Two-tab screen; switch tabs through the returned root.
pub fn tabbed_root() -> NodeRef {
    init_tracing();
    Node::tabs()
        .with_child(Node::group().with_child(Node::label("First tab content")))
        .with_child(Node::group().with_child(Node::label("Second tab content")))
}

/// Home/detail pair on a navigation stack. "Show detail" pushes, "Back"
/// pops; both settle synchronously.
pub fn navigation_root() -> NodeRef {
    init_tracing();
    let nav = Node::nav_stack();

    let detail = {
        let stack = Rc::downgrade(&nav);
        Node::group()
            .with_child(Node::label("Detail screen"))
            .with_child(Node::button("Back").with_action(move |_| {
                if let Some(stack) = stack.upgrade() {
                    stack.pop();
                }
            }))
    };

    let home = {
        let stack = Rc::downgrade(&nav);
        Node::group()
            .with_child(Node::label("Home screen"))
            .with_child(Node::button("Show detail").with_action(move |_| {
                if let Some(stack) = stack.upgrade() {
                    stack.push(Rc::clone(&detail));
                }
            }))
    };

    nav.with_child(home)
}

fn present_button(title: &str, host: &NodeRef, layer: NodeRef) -> NodeRef {
    let target = Rc::downgrade(host);
    Node::button(title).with_action(move |_| {
        if let Some(host) = target.upgrade() {
            host.present(Rc::clone(&layer));
        }
    })
}

fn dismiss_button(host: &NodeRef, scheduler: &Scheduler) -> NodeRef {
    let target = Rc::downgrade(host);
    let scheduler = scheduler.clone();
    Node::button("Dismiss").with_action(move |_| {
        if let Some(host) = target.upgrade() {
            host.dismiss_top(&scheduler);
        }
    })
}

/// Overlay host with a two-deep modal flow: the base presents the first
/// modal, the first presents the second, and each layer carries its own
/// dismiss button.
pub fn modal_app(policy: FailurePolicy) -> App {
    init_tracing();
    let scheduler = Scheduler::new();
    let host = Node::overlay();

    let second = Node::group()
        .with_child(Node::label("Second modal"))
        .with_child(dismiss_button(&host, &scheduler));

    let first = Node::group()
        .with_child(Node::label("First modal"))
        .with_child(dismiss_button(&host, &scheduler))
        .with_child(present_button("Present another modal", &host, second));

    let base_present = present_button("Present modal", &host, first);
    let root = host
        .with_child(Node::label("Base screen"))
        .with_child(base_present);

    App::with_policy(root, policy).with_scheduler(scheduler)
}

/// Overlay host whose "Show alert" button presents an alert. The alert's
/// dismiss button rewrites the base label, observable once the dismissal
/// settles.
pub fn alert_app(policy: FailurePolicy) -> App {
    init_tracing();
    let scheduler = Scheduler::new();
    let host = Node::overlay();
    let status = Node::label("Base screen");

    let alert = {
        let bound = Rc::clone(&status);
        Node::alert("Alert title")
            .with_child(Node::label("Alert message."))
            .with_child(
                Node::button("Dismiss")
                    .with_action(move |_| bound.set_text("Changed label text")),
            )
    };

    let show = {
        let target = Rc::downgrade(&host);
        Node::button("Show alert").with_action(move |_| {
            if let Some(host) = target.upgrade() {
                host.present(Rc::clone(&alert));
            }
        })
    };

    let root = host.with_child(status).with_child(show);
    App::with_policy(root, policy).with_scheduler(scheduler)
}

/// In-memory stand-in for declarative layout resources.
pub struct StubStoryboards {
    roots: HashMap<(String, String), fn() -> NodeRef>,
}

impl StubStoryboards {
    /// Registry with the fixture screens under their usual names.
    pub fn fixture_set() -> Self {
        let mut roots: HashMap<(String, String), fn() -> NodeRef> = HashMap::new();
        roots.insert(("Main".to_string(), "form".to_string()), form_root);
        roots.insert(("Main".to_string(), "table".to_string()), table_root);
        Self { roots }
    }
}

impl RootSource for StubStoryboards {
    fn resolve(&self, resource: &str, identifier: &str) -> Option<NodeRef> {
        self.roots
            .get(&(resource.to_string(), identifier.to_string()))
            .map(|build| build())
    }
}
