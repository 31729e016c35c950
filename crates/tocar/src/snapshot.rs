//! Serializable captures of the visible tree, for diagnostics and golden
//! assertions.

use crate::front::effective_children;
use crate::node::{NodeKind, NodeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One node of a captured front, with its visible children.
///
/// Captures reflect what a query can reach: containers are collapsed to
/// their active child and hidden subtrees are absent, so two captures
/// compare equal exactly when queries would see the same screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Node kind tag
    pub kind: String,
    /// Identifying attribute, when the kind carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Current value, for stateful controls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Whether the node accepts interaction
    pub enabled: bool,
    /// Visible children, after container narrowing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    /// Capture `node` and its visible descendants.
    #[must_use]
    pub fn capture(node: &NodeRef) -> Self {
        Self {
            kind: node.kind_name().to_string(),
            attribute: attribute_of(node),
            value: value_of(node),
            enabled: node.is_enabled(),
            children: effective_children(node)
                .iter()
                .map(Self::capture)
                .collect(),
        }
    }

    /// Pretty JSON rendering of the capture.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(attribute) = &self.attribute {
            write!(f, " \"{attribute}\"")?;
        }
        if let Some(value) = &self.value {
            write!(f, " = {value}")?;
        }
        if !self.enabled {
            write!(f, " (disabled)")?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for NodeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

fn attribute_of(node: &NodeRef) -> Option<String> {
    match node.kind() {
        NodeKind::Label { text } => Some(text.borrow().clone()),
        NodeKind::Button { title, .. } => Some(title.borrow().clone()),
        NodeKind::Toggle { label, .. }
        | NodeKind::Stepper { label, .. }
        | NodeKind::Slider { label, .. } => Some(label.clone()),
        NodeKind::TextInput { placeholder, .. } => Some(placeholder.clone()),
        NodeKind::Alert { title } => Some(title.clone()),
        _ => None,
    }
}

fn value_of(node: &NodeRef) -> Option<String> {
    match node.kind() {
        NodeKind::Toggle { on, .. } => Some(if on.get() { "on" } else { "off" }.to_string()),
        NodeKind::Stepper { value, .. } | NodeKind::Slider { value, .. } => {
            Some(format!("{}", value.get()))
        }
        NodeKind::TextInput { text, .. } => Some(text.borrow().clone()),
        _ => None,
    }
}
