//! Query predicates and the first-match search over the current front.

use crate::front::effective_children;
use crate::node::{ElementKind, NodeKind, NodeRef};
use crate::result::TocarError;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// A semantic query over the widget tree.
///
/// Each variant pairs one element kind with the attribute that identifies
/// it on screen. All matches are exact except [`Criteria::CellContaining`],
/// which matches a substring of a row's visible text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criteria {
    /// Label whose full text equals the given string
    LabelText(String),
    /// Button whose title equals the given string
    ButtonTitle(String),
    /// Toggle with the given accessibility label
    ToggleLabeled(String),
    /// Stepper with the given accessibility label
    StepperLabeled(String),
    /// Slider with the given accessibility label
    SliderLabeled(String),
    /// Text input with the given placeholder
    InputPlaceholder(String),
    /// List row whose visible text contains the given substring
    CellContaining(String),
}

impl Criteria {
    /// Query for a label by its exact text.
    #[must_use]
    pub fn label(text: &str) -> Self {
        Self::LabelText(text.to_string())
    }

    /// Query for a button by its exact title.
    #[must_use]
    pub fn button(title: &str) -> Self {
        Self::ButtonTitle(title.to_string())
    }

    /// Query for a toggle by accessibility label.
    #[must_use]
    pub fn toggle(label: &str) -> Self {
        Self::ToggleLabeled(label.to_string())
    }

    /// Query for a stepper by accessibility label.
    #[must_use]
    pub fn stepper(label: &str) -> Self {
        Self::StepperLabeled(label.to_string())
    }

    /// Query for a slider by accessibility label.
    #[must_use]
    pub fn slider(label: &str) -> Self {
        Self::SliderLabeled(label.to_string())
    }

    /// Query for a text input by placeholder.
    #[must_use]
    pub fn text_input(placeholder: &str) -> Self {
        Self::InputPlaceholder(placeholder.to_string())
    }

    /// Query for a list row containing the given text.
    #[must_use]
    pub fn cell_containing(text: &str) -> Self {
        Self::CellContaining(text.to_string())
    }

    /// Element kind this query targets.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::LabelText(_) => ElementKind::Label,
            Self::ButtonTitle(_) => ElementKind::Button,
            Self::ToggleLabeled(_) => ElementKind::Toggle,
            Self::StepperLabeled(_) => ElementKind::Stepper,
            Self::SliderLabeled(_) => ElementKind::Slider,
            Self::InputPlaceholder(_) => ElementKind::TextInput,
            Self::CellContaining(_) => ElementKind::Cell,
        }
    }

    /// Name of the attribute the query matches against.
    #[must_use]
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::LabelText(_) => "text",
            Self::ButtonTitle(_) => "title",
            Self::ToggleLabeled(_) | Self::StepperLabeled(_) | Self::SliderLabeled(_) => {
                "accessibility label"
            }
            Self::InputPlaceholder(_) => "placeholder",
            Self::CellContaining(_) => "contained text",
        }
    }

    /// Value the query searches for.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::LabelText(value)
            | Self::ButtonTitle(value)
            | Self::ToggleLabeled(value)
            | Self::StepperLabeled(value)
            | Self::SliderLabeled(value)
            | Self::InputPlaceholder(value)
            | Self::CellContaining(value) => value,
        }
    }

    /// Error describing this query matching nothing.
    #[must_use]
    pub fn missing(&self) -> TocarError {
        TocarError::ElementNotFound {
            kind: self.kind(),
            attribute: self.attribute(),
            value: self.value().to_string(),
        }
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with {} \"{}\"", self.kind(), self.attribute(), self.value())
    }
}

/// First node under `front` matching `criteria`, or `None`.
///
/// Depth-first in child-declaration order. Hidden subtrees are never
/// entered, so a node below a hidden ancestor cannot match regardless of
/// its own flags. Disabled nodes are matched; disablement gates
/// interaction, not discovery. Never errors: absence handling is the
/// driver's concern.
pub(crate) fn find(front: &NodeRef, criteria: &Criteria) -> Option<NodeRef> {
    if front.is_hidden() {
        return None;
    }
    let hit = find_in(front, criteria, false);
    trace!(query = %criteria, found = hit.is_some(), "query evaluated");
    hit
}

fn find_in(node: &NodeRef, criteria: &Criteria, in_list: bool) -> Option<NodeRef> {
    if matches(node, criteria, in_list) {
        return Some(Rc::clone(node));
    }
    let in_list = in_list || matches!(node.kind(), NodeKind::List);
    for child in effective_children(node) {
        if let Some(found) = find_in(&child, criteria, in_list) {
            return Some(found);
        }
    }
    None
}

/// Whether `node` satisfies `criteria`. Row containment only applies to
/// rows under a list container: a matching label outside any row must not
/// answer a cell query.
fn matches(node: &NodeRef, criteria: &Criteria, in_list: bool) -> bool {
    match (criteria, node.kind()) {
        (Criteria::LabelText(text), NodeKind::Label { text: actual }) => *actual.borrow() == *text,
        (Criteria::ButtonTitle(title), NodeKind::Button { title: actual, .. }) => {
            *actual.borrow() == *title
        }
        (Criteria::ToggleLabeled(label), NodeKind::Toggle { label: actual, .. })
        | (Criteria::StepperLabeled(label), NodeKind::Stepper { label: actual, .. })
        | (Criteria::SliderLabeled(label), NodeKind::Slider { label: actual, .. }) => {
            actual == label
        }
        (Criteria::InputPlaceholder(placeholder), NodeKind::TextInput { placeholder: actual, .. }) => {
            actual == placeholder
        }
        (Criteria::CellContaining(text), NodeKind::ListCell { .. }) => {
            in_list && node.visible_text().contains(text.as_str())
        }
        _ => false,
    }
}
