//! The app driver a test holds.

use crate::element::{Alert, Button, CellHandle, Label, Slider, Stepper, TextInput, Toggle};
use crate::front::{self, current_front};
use crate::matcher::{self, Criteria};
use crate::node::{NodeKind, NodeRef};
use crate::policy::FailurePolicy;
use crate::result::{TocarError, TocarResult};
use crate::scheduler::{Outcome, Scheduler};
use crate::snapshot::NodeSnapshot;
use std::rc::Rc;
use tracing::debug;

/// Supplies tree roots loaded from declarative resources.
///
/// Stands in for layout loading: given a resource name and the identifier
/// of a root registered in it, produce the root node, or `None` if the
/// pair is unknown.
pub trait RootSource {
    /// Resolve the root registered under `identifier` in `resource`.
    fn resolve(&self, resource: &str, identifier: &str) -> Option<NodeRef>;
}

/// Facade over one widget tree: owns the root, the failure policy fixed at
/// construction, and the scheduler deferred transitions run on.
///
/// Every query resolves the current front anew, so tab switches,
/// navigation and presentations made since the last query are always
/// reflected.
#[derive(Debug)]
pub struct App {
    root: NodeRef,
    policy: FailurePolicy,
    scheduler: Scheduler,
}

impl App {
    /// Wrap an in-memory root with the default failure policy.
    #[must_use]
    pub fn new(root: NodeRef) -> Self {
        Self::with_policy(root, FailurePolicy::default())
    }

    /// Wrap an in-memory root with an explicit failure policy.
    #[must_use]
    pub fn with_policy(root: NodeRef, policy: FailurePolicy) -> Self {
        Self {
            root,
            policy,
            scheduler: Scheduler::new(),
        }
    }

    /// Share a scheduler with the tree's fixtures.
    ///
    /// Hooks that defer work must schedule it on the same queue the driver
    /// observes; build the scheduler first, wire it into the tree, then
    /// hand it to the driver here.
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Resolve a root through `source` and wrap it.
    ///
    /// An unresolvable pair is a construction error, distinct from any
    /// query failure.
    pub fn from_source<S: RootSource>(
        source: &S,
        resource: &str,
        identifier: &str,
        policy: FailurePolicy,
    ) -> TocarResult<Self> {
        source
            .resolve(resource, identifier)
            .map(|root| Self::with_policy(root, policy))
            .ok_or_else(|| TocarError::RootNotFound {
                resource: resource.to_string(),
                identifier: identifier.to_string(),
            })
    }

    /// The scheduler this app observes.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The failure policy fixed at construction.
    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    fn query(&self, criteria: &Criteria) -> TocarResult<Option<NodeRef>> {
        let front = current_front(&self.root);
        let hit = matcher::find(&front, criteria);
        debug!(query = %criteria, found = hit.is_some(), "query");
        self.policy.resolve(hit, criteria)
    }

    // ===== Queries =====

    /// Find a label by its exact text.
    pub fn label(&self, text: &str) -> TocarResult<Option<Label>> {
        Ok(self.query(&Criteria::label(text))?.map(Label::new))
    }

    /// Find a button by its exact title.
    pub fn button(&self, title: &str) -> TocarResult<Option<Button>> {
        Ok(self
            .query(&Criteria::button(title))?
            .map(|node| Button::new(node, self.scheduler.clone())))
    }

    /// Find a toggle by its accessibility label.
    pub fn toggle_control(&self, label: &str) -> TocarResult<Option<Toggle>> {
        Ok(self
            .query(&Criteria::toggle(label))?
            .map(|node| Toggle::new(node, self.scheduler.clone())))
    }

    /// Find a stepper by its accessibility label.
    pub fn stepper(&self, label: &str) -> TocarResult<Option<Stepper>> {
        Ok(self
            .query(&Criteria::stepper(label))?
            .map(|node| Stepper::new(node, self.scheduler.clone())))
    }

    /// Find a slider by its accessibility label.
    pub fn slider(&self, label: &str) -> TocarResult<Option<Slider>> {
        Ok(self
            .query(&Criteria::slider(label))?
            .map(|node| Slider::new(node, self.scheduler.clone())))
    }

    /// Find a text input by its placeholder.
    pub fn text_input(&self, placeholder: &str) -> TocarResult<Option<TextInput>> {
        Ok(self
            .query(&Criteria::text_input(placeholder))?
            .map(|node| TextInput::new(node, self.scheduler.clone())))
    }

    /// Find a list row whose visible text contains `containing`.
    pub fn cell(&self, containing: &str) -> TocarResult<Option<CellHandle>> {
        Ok(self
            .query(&Criteria::cell_containing(containing))?
            .map(|node| CellHandle::new(node, self.scheduler.clone())))
    }

    // ===== Convenience mutators =====

    /// Find the stepper with `label` and increment it. Under the absent
    /// policy a missing stepper does nothing.
    pub fn increment_stepper(&self, label: &str) -> TocarResult<Outcome> {
        match self.stepper(label)? {
            Some(stepper) => Ok(stepper.increment()),
            None => Ok(Outcome::Settled),
        }
    }

    /// Find the stepper with `label` and decrement it.
    pub fn decrement_stepper(&self, label: &str) -> TocarResult<Outcome> {
        match self.stepper(label)? {
            Some(stepper) => Ok(stepper.decrement()),
            None => Ok(Outcome::Settled),
        }
    }

    /// Find the slider with `label` and drag it to `value`.
    pub fn set_slider(&self, label: &str, value: f64) -> TocarResult<Outcome> {
        match self.slider(label)? {
            Some(slider) => Ok(slider.set_value(value)),
            None => Ok(Outcome::Settled),
        }
    }

    /// Find the text input with `placeholder` and type `text` into it.
    pub fn type_into(&self, placeholder: &str, text: &str) -> TocarResult<Outcome> {
        match self.text_input(placeholder)? {
            Some(input) => Ok(input.type_text(text)),
            None => Ok(Outcome::Settled),
        }
    }

    // ===== Collections and overlays =====

    /// All visible rows of the current front's list containers, in
    /// declaration order.
    #[must_use]
    pub fn cells(&self) -> Vec<CellHandle> {
        let front = current_front(&self.root);
        let mut rows = Vec::new();
        if !front.is_hidden() {
            collect_rows(&front, false, &mut rows);
        }
        rows.into_iter()
            .map(|node| CellHandle::new(node, self.scheduler.clone()))
            .collect()
    }

    /// The frontmost presented alert, if one is up.
    ///
    /// Absence is ordinary here, not a query failure: tests assert both
    /// presence and absence, so no policy applies.
    #[must_use]
    pub fn alert(&self) -> Option<Alert> {
        front::frontmost_alert(&self.root).map(|(host, node)| {
            Alert::new(node, host, self.scheduler.clone(), self.policy)
        })
    }

    /// Serializable capture of the current front.
    #[must_use]
    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot::capture(&current_front(&self.root))
    }
}

fn collect_rows(node: &NodeRef, in_list: bool, rows: &mut Vec<NodeRef>) {
    if in_list && matches!(node.kind(), NodeKind::ListCell { .. }) {
        rows.push(Rc::clone(node));
    }
    let in_list = in_list || matches!(node.kind(), NodeKind::List);
    for child in front::effective_children(node) {
        collect_rows(&child, in_list, rows);
    }
}
