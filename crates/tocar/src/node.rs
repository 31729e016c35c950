//! The widget tree that queries and interactions run against.
//!
//! Nodes are built by fixtures and mutated by action hooks; the engine only
//! reads them and fires the hooks. Everything lives on one logical thread,
//! so shared ownership is `Rc` and interior mutability is `Cell`/`RefCell`.

use crate::scheduler::Scheduler;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Shared handle to a tree node.
pub type NodeRef = Rc<Node>;

/// Slot for a control's action callback. The callback receives the node it
/// fired on, so fixtures can read the control's state without capturing it.
pub(crate) type Hook = RefCell<Option<Rc<dyn Fn(&Node)>>>;

/// Invoke the hook in `slot`, if one is attached.
///
/// The slot's borrow is released before the callback runs, so a callback may
/// re-wire hooks on the node it fired on.
pub(crate) fn fire(slot: &Hook, node: &Node) {
    let hook = slot.borrow().clone();
    if let Some(hook) = hook {
        hook(node);
    }
}

fn empty_hook() -> Hook {
    RefCell::new(None)
}

/// Kinds of element a query can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Static text
    Label,
    /// Tappable button
    Button,
    /// Two-state switch
    Toggle,
    /// Discrete increment/decrement control
    Stepper,
    /// Continuous value control
    Slider,
    /// Editable text field
    TextInput,
    /// One row of a list
    Cell,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Label => "label",
            Self::Button => "button",
            Self::Toggle => "toggle",
            Self::Stepper => "stepper",
            Self::Slider => "slider",
            Self::TextInput => "text input",
            Self::Cell => "cell",
        };
        write!(f, "{name}")
    }
}

/// Per-kind state of a node. Control kinds carry their current value and an
/// optional action hook; container kinds carry their selection state.
pub(crate) enum NodeKind {
    /// Plain grouping view with no queryable attribute
    Group,
    /// Static text
    Label {
        /// Displayed text
        text: RefCell<String>,
    },
    /// Tappable button
    Button {
        /// Displayed title
        title: RefCell<String>,
        /// Fired on tap
        on_tap: Hook,
    },
    /// Two-state switch
    Toggle {
        /// Accessibility label
        label: String,
        /// Current on/off state
        on: Cell<bool>,
        /// Fired after the state flips
        on_change: Hook,
    },
    /// Discrete increment/decrement control
    Stepper {
        /// Accessibility label
        label: String,
        /// Current value
        value: Cell<f64>,
        /// Amount one increment or decrement moves the value
        step: f64,
        /// Fired after the value changes
        on_change: Hook,
    },
    /// Continuous value control
    Slider {
        /// Accessibility label
        label: String,
        /// Current value
        value: Cell<f64>,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
        /// Fired after the value changes
        on_change: Hook,
    },
    /// Editable text field
    TextInput {
        /// Placeholder shown while empty
        placeholder: String,
        /// Current contents
        text: RefCell<String>,
        /// Fired after typing lands
        on_change: Hook,
    },
    /// One row of a list container
    ListCell {
        /// Fired when the row is selected
        on_select: Hook,
    },
    /// List container; its rows are its children
    List,
    /// Tab container; children are the tabs, one of which is selected
    Tabs {
        /// Index of the selected tab
        selected: Cell<usize>,
    },
    /// Navigation container; children are the stack, last entry on top
    NavStack,
    /// Overlay host; children are the base content, `presented` the layers
    /// stacked over it
    Overlay {
        /// Presented layers, last entry frontmost
        presented: RefCell<Vec<NodeRef>>,
    },
    /// Modal alert layer; its buttons are its children
    Alert {
        /// Alert title
        title: String,
    },
}

/// One node of the widget tree.
pub struct Node {
    kind: NodeKind,
    hidden: Cell<bool>,
    enabled: Cell<bool>,
    children: RefCell<Vec<NodeRef>>,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind_name())
            .field("hidden", &self.hidden.get())
            .field("enabled", &self.enabled.get())
            .field("children", &self.children.borrow().len())
            .finish()
    }
}

impl Node {
    fn of(kind: NodeKind) -> NodeRef {
        Rc::new(Self {
            kind,
            hidden: Cell::new(false),
            enabled: Cell::new(true),
            children: RefCell::new(Vec::new()),
        })
    }

    /// Plain grouping node.
    #[must_use]
    pub fn group() -> NodeRef {
        Self::of(NodeKind::Group)
    }

    /// Static text label.
    #[must_use]
    pub fn label(text: &str) -> NodeRef {
        Self::of(NodeKind::Label {
            text: RefCell::new(text.to_string()),
        })
    }

    /// Button with the given title.
    #[must_use]
    pub fn button(title: &str) -> NodeRef {
        Self::of(NodeKind::Button {
            title: RefCell::new(title.to_string()),
            on_tap: empty_hook(),
        })
    }

    /// Two-state switch identified by an accessibility label.
    #[must_use]
    pub fn toggle(label: &str, on: bool) -> NodeRef {
        Self::of(NodeKind::Toggle {
            label: label.to_string(),
            on: Cell::new(on),
            on_change: empty_hook(),
        })
    }

    /// Stepper identified by an accessibility label.
    #[must_use]
    pub fn stepper(label: &str, value: f64, step: f64) -> NodeRef {
        Self::of(NodeKind::Stepper {
            label: label.to_string(),
            value: Cell::new(value),
            step,
            on_change: empty_hook(),
        })
    }

    /// Slider identified by an accessibility label. `min` must not exceed
    /// `max`; out-of-range writes through a handle clamp to these bounds.
    #[must_use]
    pub fn slider(label: &str, value: f64, min: f64, max: f64) -> NodeRef {
        Self::of(NodeKind::Slider {
            label: label.to_string(),
            value: Cell::new(value),
            min,
            max,
            on_change: empty_hook(),
        })
    }

    /// Empty text field with the given placeholder.
    #[must_use]
    pub fn text_input(placeholder: &str) -> NodeRef {
        Self::of(NodeKind::TextInput {
            placeholder: placeholder.to_string(),
            text: RefCell::new(String::new()),
            on_change: empty_hook(),
        })
    }

    /// List row; its content is its children.
    #[must_use]
    pub fn list_cell() -> NodeRef {
        Self::of(NodeKind::ListCell {
            on_select: empty_hook(),
        })
    }

    /// List container whose children are rows.
    #[must_use]
    pub fn list() -> NodeRef {
        Self::of(NodeKind::List)
    }

    /// Tab container starting on the first tab.
    #[must_use]
    pub fn tabs() -> NodeRef {
        Self::of(NodeKind::Tabs {
            selected: Cell::new(0),
        })
    }

    /// Navigation container; children form the stack, last entry on top.
    #[must_use]
    pub fn nav_stack() -> NodeRef {
        Self::of(NodeKind::NavStack)
    }

    /// Overlay host. Children are the base content; presented layers stack
    /// over it via [`Node::present`].
    #[must_use]
    pub fn overlay() -> NodeRef {
        Self::of(NodeKind::Overlay {
            presented: RefCell::new(Vec::new()),
        })
    }

    /// Modal alert layer; its buttons are added as children.
    #[must_use]
    pub fn alert(title: &str) -> NodeRef {
        Self::of(NodeKind::Alert {
            title: title.to_string(),
        })
    }

    // ===== Builders =====

    /// Append a child.
    #[must_use]
    pub fn with_child(self: Rc<Self>, child: NodeRef) -> NodeRef {
        self.children.borrow_mut().push(child);
        self
    }

    /// Append children in order.
    #[must_use]
    pub fn with_children(self: Rc<Self>, children: impl IntoIterator<Item = NodeRef>) -> NodeRef {
        self.children.borrow_mut().extend(children);
        self
    }

    /// Set the hidden flag.
    #[must_use]
    pub fn with_hidden(self: Rc<Self>, hidden: bool) -> NodeRef {
        self.hidden.set(hidden);
        self
    }

    /// Set the enabled flag.
    #[must_use]
    pub fn with_enabled(self: Rc<Self>, enabled: bool) -> NodeRef {
        self.enabled.set(enabled);
        self
    }

    /// Attach the node's action callback: tap for buttons, change for
    /// toggles, steppers, sliders and text inputs, selection for rows.
    /// Kinds without an action slot ignore the callback.
    #[must_use]
    pub fn with_action(self: Rc<Self>, hook: impl Fn(&Node) + 'static) -> NodeRef {
        let hook: Rc<dyn Fn(&Node)> = Rc::new(hook);
        let slot = match &self.kind {
            NodeKind::Button { on_tap, .. } => Some(on_tap),
            NodeKind::Toggle { on_change, .. }
            | NodeKind::Stepper { on_change, .. }
            | NodeKind::Slider { on_change, .. }
            | NodeKind::TextInput { on_change, .. } => Some(on_change),
            NodeKind::ListCell { on_select } => Some(on_select),
            _ => None,
        };
        if let Some(slot) = slot {
            *slot.borrow_mut() = Some(hook);
        }
        self
    }

    // ===== Flags and attributes =====

    /// Whether the node is hidden. A hidden node hides its whole subtree.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    /// Whether the node accepts interaction.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Change the hidden flag.
    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }

    /// Change the enabled flag.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Snapshot of the child list.
    #[must_use]
    pub fn children(&self) -> Vec<NodeRef> {
        self.children.borrow().clone()
    }

    pub(crate) fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Stable name of the node's kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Group => "group",
            NodeKind::Label { .. } => "label",
            NodeKind::Button { .. } => "button",
            NodeKind::Toggle { .. } => "toggle",
            NodeKind::Stepper { .. } => "stepper",
            NodeKind::Slider { .. } => "slider",
            NodeKind::TextInput { .. } => "text-input",
            NodeKind::ListCell { .. } => "list-cell",
            NodeKind::List => "list",
            NodeKind::Tabs { .. } => "tabs",
            NodeKind::NavStack => "nav-stack",
            NodeKind::Overlay { .. } => "overlay",
            NodeKind::Alert { .. } => "alert",
        }
    }

    /// Element kind this node answers queries as, if any.
    #[must_use]
    pub fn element_kind(&self) -> Option<ElementKind> {
        match &self.kind {
            NodeKind::Label { .. } => Some(ElementKind::Label),
            NodeKind::Button { .. } => Some(ElementKind::Button),
            NodeKind::Toggle { .. } => Some(ElementKind::Toggle),
            NodeKind::Stepper { .. } => Some(ElementKind::Stepper),
            NodeKind::Slider { .. } => Some(ElementKind::Slider),
            NodeKind::TextInput { .. } => Some(ElementKind::TextInput),
            NodeKind::ListCell { .. } => Some(ElementKind::Cell),
            _ => None,
        }
    }

    /// Current text of a label or text input.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match &self.kind {
            NodeKind::Label { text } | NodeKind::TextInput { text, .. } => {
                Some(text.borrow().clone())
            }
            _ => None,
        }
    }

    /// Replace the text of a label or text input. Other kinds ignore this.
    pub fn set_text(&self, text: &str) {
        match &self.kind {
            NodeKind::Label { text: current } | NodeKind::TextInput { text: current, .. } => {
                *current.borrow_mut() = text.to_string();
            }
            _ => {}
        }
    }

    /// Title of a button or alert.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        match &self.kind {
            NodeKind::Button { title, .. } => Some(title.borrow().clone()),
            NodeKind::Alert { title } => Some(title.clone()),
            _ => None,
        }
    }

    /// Accessibility label of a toggle, stepper or slider.
    #[must_use]
    pub fn accessible_label(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Toggle { label, .. }
            | NodeKind::Stepper { label, .. }
            | NodeKind::Slider { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Placeholder of a text input.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::TextInput { placeholder, .. } => Some(placeholder),
            _ => None,
        }
    }

    /// On/off state of a toggle.
    #[must_use]
    pub fn is_on(&self) -> Option<bool> {
        match &self.kind {
            NodeKind::Toggle { on, .. } => Some(on.get()),
            _ => None,
        }
    }

    /// Current value of a stepper or slider.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match &self.kind {
            NodeKind::Stepper { value, .. } | NodeKind::Slider { value, .. } => Some(value.get()),
            _ => None,
        }
    }

    /// Concatenated text of the node's visible content: label text, button
    /// titles and text-input contents, in traversal order. Hidden subtrees
    /// contribute nothing.
    #[must_use]
    pub fn visible_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_visible_text(&mut parts);
        parts.join(" ")
    }

    fn collect_visible_text(&self, parts: &mut Vec<String>) {
        if self.hidden.get() {
            return;
        }
        match &self.kind {
            NodeKind::Label { text } | NodeKind::TextInput { text, .. } => {
                let text = text.borrow();
                if !text.is_empty() {
                    parts.push(text.clone());
                }
            }
            NodeKind::Button { title, .. } => {
                let title = title.borrow();
                if !title.is_empty() {
                    parts.push(title.clone());
                }
            }
            _ => {}
        }
        for child in self.children.borrow().iter() {
            child.collect_visible_text(parts);
        }
    }

    // ===== Container state, mutated by the tree owner =====

    /// Select a tab by index. Ignored on other kinds.
    pub fn select_tab(&self, index: usize) {
        if let NodeKind::Tabs { selected } = &self.kind {
            selected.set(index);
        }
    }

    /// Index of the selected tab, for tab containers.
    #[must_use]
    pub fn selected_tab(&self) -> Option<usize> {
        match &self.kind {
            NodeKind::Tabs { selected } => Some(selected.get()),
            _ => None,
        }
    }

    /// Push an entry onto a navigation stack. The new entry is immediately
    /// the active one. Ignored on other kinds.
    pub fn push(&self, entry: NodeRef) {
        if let NodeKind::NavStack = &self.kind {
            self.children.borrow_mut().push(entry);
        }
    }

    /// Pop the top entry of a navigation stack, returning it. The previous
    /// entry is immediately the active one.
    pub fn pop(&self) -> Option<NodeRef> {
        match &self.kind {
            NodeKind::NavStack => self.children.borrow_mut().pop(),
            _ => None,
        }
    }

    /// Present `layer` over this overlay host. The layer is immediately the
    /// front; content beneath it becomes unreachable. Ignored on other kinds.
    pub fn present(&self, layer: NodeRef) {
        if let NodeKind::Overlay { presented } = &self.kind {
            presented.borrow_mut().push(layer);
        }
    }

    /// Begin dismissing the top presented layer. The pop itself runs on the
    /// scheduler's next turn; until then the layer remains the front. One
    /// call removes exactly one layer. Does nothing when no layer is
    /// presented or on non-overlay kinds.
    pub fn dismiss_top(self: &Rc<Self>, scheduler: &Scheduler) {
        if let NodeKind::Overlay { presented } = &self.kind {
            if presented.borrow().is_empty() {
                return;
            }
            let host = Rc::clone(self);
            scheduler.schedule(move || {
                if let NodeKind::Overlay { presented } = &host.kind {
                    presented.borrow_mut().pop();
                }
            });
        }
    }
}
