//! Typed handles over matched nodes.
//!
//! Handles are transient: each query builds fresh ones and nothing outlives
//! the node it wraps. Action methods honor enablement the way a live UI
//! does, by swallowing input to disabled controls without erroring.

use crate::matcher::{self, Criteria};
use crate::node::{fire, NodeKind, NodeRef};
use crate::policy::FailurePolicy;
use crate::result::TocarResult;
use crate::scheduler::{Completion, Outcome, Scheduler};
use tracing::debug;

/// Run `invoke` and report whether it deferred work to the scheduler.
///
/// An interaction is deferred exactly when its hook scheduled a callback;
/// the returned completion settles that callback.
fn outcome_of(scheduler: &Scheduler, invoke: impl FnOnce()) -> Outcome {
    let before = scheduler.pending();
    invoke();
    if scheduler.pending() > before {
        Outcome::Deferred(Completion::new(scheduler.clone()))
    } else {
        Outcome::Settled
    }
}

/// Read handle over a matched label.
#[derive(Debug, Clone)]
pub struct Label {
    node: NodeRef,
}

impl Label {
    pub(crate) fn new(node: NodeRef) -> Self {
        Self { node }
    }

    /// The label's current text.
    #[must_use]
    pub fn text(&self) -> String {
        self.node.text().unwrap_or_default()
    }
}

/// Handle over a matched button.
#[derive(Debug, Clone)]
pub struct Button {
    node: NodeRef,
    scheduler: Scheduler,
}

impl Button {
    pub(crate) fn new(node: NodeRef, scheduler: Scheduler) -> Self {
        Self { node, scheduler }
    }

    /// The button's current title.
    #[must_use]
    pub fn title(&self) -> String {
        self.node.title().unwrap_or_default()
    }

    /// Whether the button accepts taps.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.node.is_enabled()
    }

    /// Simulate a tap. Disabled buttons swallow the tap.
    pub fn tap(&self) -> Outcome {
        if !self.node.is_enabled() {
            debug!(title = %self.title(), "tap ignored, button disabled");
            return Outcome::Settled;
        }
        debug!(title = %self.title(), "tap");
        outcome_of(&self.scheduler, || {
            if let NodeKind::Button { on_tap, .. } = self.node.kind() {
                fire(on_tap, &self.node);
            }
        })
    }
}

/// Handle over a matched toggle.
#[derive(Debug, Clone)]
pub struct Toggle {
    node: NodeRef,
    scheduler: Scheduler,
}

impl Toggle {
    pub(crate) fn new(node: NodeRef, scheduler: Scheduler) -> Self {
        Self { node, scheduler }
    }

    /// Current on/off state.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.node.is_on().unwrap_or(false)
    }

    /// Whether the toggle accepts interaction.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.node.is_enabled()
    }

    /// Flip the toggle and fire its change hook. Disabled toggles stay put.
    pub fn toggle(&self) -> Outcome {
        if !self.node.is_enabled() {
            debug!("toggle ignored, control disabled");
            return Outcome::Settled;
        }
        outcome_of(&self.scheduler, || {
            if let NodeKind::Toggle { on, on_change, .. } = self.node.kind() {
                on.set(!on.get());
                fire(on_change, &self.node);
            }
        })
    }
}

/// Handle over a matched stepper.
#[derive(Debug, Clone)]
pub struct Stepper {
    node: NodeRef,
    scheduler: Scheduler,
}

impl Stepper {
    pub(crate) fn new(node: NodeRef, scheduler: Scheduler) -> Self {
        Self { node, scheduler }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.node.value().unwrap_or(0.0)
    }

    /// Whether the stepper accepts interaction.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.node.is_enabled()
    }

    /// Move the value up by one step. Disabled steppers stay put.
    pub fn increment(&self) -> Outcome {
        self.adjust(1.0)
    }

    /// Move the value down by one step. Disabled steppers stay put.
    pub fn decrement(&self) -> Outcome {
        self.adjust(-1.0)
    }

    fn adjust(&self, sign: f64) -> Outcome {
        if !self.node.is_enabled() {
            debug!("step ignored, control disabled");
            return Outcome::Settled;
        }
        outcome_of(&self.scheduler, || {
            if let NodeKind::Stepper {
                value,
                step,
                on_change,
                ..
            } = self.node.kind()
            {
                value.set(value.get() + sign * *step);
                fire(on_change, &self.node);
            }
        })
    }
}

/// Handle over a matched slider.
#[derive(Debug, Clone)]
pub struct Slider {
    node: NodeRef,
    scheduler: Scheduler,
}

impl Slider {
    pub(crate) fn new(node: NodeRef, scheduler: Scheduler) -> Self {
        Self { node, scheduler }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.node.value().unwrap_or(0.0)
    }

    /// Whether the slider accepts interaction.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.node.is_enabled()
    }

    /// Drag the thumb to `target`, clamped to the slider's declared range.
    /// Disabled sliders stay put.
    pub fn set_value(&self, target: f64) -> Outcome {
        if !self.node.is_enabled() {
            debug!(target, "slide ignored, control disabled");
            return Outcome::Settled;
        }
        outcome_of(&self.scheduler, || {
            if let NodeKind::Slider {
                value,
                min,
                max,
                on_change,
                ..
            } = self.node.kind()
            {
                value.set(target.clamp(*min, *max));
                fire(on_change, &self.node);
            }
        })
    }
}

/// Handle over a matched text input.
#[derive(Debug, Clone)]
pub struct TextInput {
    node: NodeRef,
    scheduler: Scheduler,
}

impl TextInput {
    pub(crate) fn new(node: NodeRef, scheduler: Scheduler) -> Self {
        Self { node, scheduler }
    }

    /// Current contents.
    #[must_use]
    pub fn text(&self) -> String {
        self.node.text().unwrap_or_default()
    }

    /// Placeholder shown while the input is empty.
    #[must_use]
    pub fn placeholder(&self) -> String {
        self.node.placeholder().unwrap_or_default().to_string()
    }

    /// Whether the input accepts typing.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.node.is_enabled()
    }

    /// Type `input` at the end of the field and fire the change hook once.
    /// Disabled inputs keep their contents, empty or not.
    pub fn type_text(&self, input: &str) -> Outcome {
        if !self.node.is_enabled() {
            debug!("typing ignored, input disabled");
            return Outcome::Settled;
        }
        outcome_of(&self.scheduler, || {
            if let NodeKind::TextInput { text, on_change, .. } = self.node.kind() {
                text.borrow_mut().push_str(input);
                fire(on_change, &self.node);
            }
        })
    }
}

/// Handle over a matched list row.
#[derive(Debug, Clone)]
pub struct CellHandle {
    node: NodeRef,
    scheduler: Scheduler,
}

impl CellHandle {
    pub(crate) fn new(node: NodeRef, scheduler: Scheduler) -> Self {
        Self { node, scheduler }
    }

    /// Concatenated text of the row's visible content.
    #[must_use]
    pub fn visible_text(&self) -> String {
        self.node.visible_text()
    }

    /// Select the row. Disabled rows swallow the tap.
    pub fn tap(&self) -> Outcome {
        if !self.node.is_enabled() {
            debug!("row tap ignored, row disabled");
            return Outcome::Settled;
        }
        outcome_of(&self.scheduler, || {
            if let NodeKind::ListCell { on_select } = self.node.kind() {
                fire(on_select, &self.node);
            }
        })
    }
}

/// Handle over the frontmost presented alert.
#[derive(Debug, Clone)]
pub struct Alert {
    node: NodeRef,
    host: NodeRef,
    scheduler: Scheduler,
    policy: FailurePolicy,
}

impl Alert {
    pub(crate) fn new(
        node: NodeRef,
        host: NodeRef,
        scheduler: Scheduler,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            node,
            host,
            scheduler,
            policy,
        }
    }

    /// The alert's title.
    #[must_use]
    pub fn title(&self) -> String {
        self.node.title().unwrap_or_default()
    }

    /// Tap the alert button with the given title.
    ///
    /// The button's action runs synchronously; the alert leaves the
    /// presentation stack once the returned completion settles, the same as
    /// any other dismissal. A missing title is governed by the driver's
    /// failure policy, exactly like a bare button query.
    pub fn tap_button(&self, title: &str) -> TocarResult<Outcome> {
        let criteria = Criteria::button(title);
        let hit = matcher::find(&self.node, &criteria);
        let Some(button) = self.policy.resolve(hit, &criteria)? else {
            return Ok(Outcome::Settled);
        };
        if !button.is_enabled() {
            debug!(title, "alert tap ignored, button disabled");
            return Ok(Outcome::Settled);
        }
        debug!(alert = %self.title(), title, "alert button tapped");
        Ok(outcome_of(&self.scheduler, || {
            if let NodeKind::Button { on_tap, .. } = button.kind() {
                fire(on_tap, &button);
            }
            self.host.dismiss_top(&self.scheduler);
        }))
    }
}
