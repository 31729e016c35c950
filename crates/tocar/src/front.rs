//! Resolution of the current front: the subtree actually reachable by a
//! query once tab selection, navigation stacks and presented layers are
//! taken into account.

use crate::node::{NodeKind, NodeRef};
use std::rc::Rc;
use tracing::trace;

/// The subtree root eligible for querying right now.
///
/// Applied top-down from `root`: a tab container collapses to its selected
/// tab, a navigation container to its top entry, an overlay with presented
/// layers to the frontmost layer. Selection state is read fresh on every
/// call; it belongs to the tree and changes between queries.
///
/// Narrowing stops at a hidden node. A hidden container seals its whole
/// subtree, so descending past it would leak content the user cannot see.
pub(crate) fn current_front(root: &NodeRef) -> NodeRef {
    let mut front = Rc::clone(root);
    while !front.is_hidden() {
        match narrow(&front) {
            Some(inner) => front = inner,
            None => break,
        }
    }
    trace!(front = front.kind_name(), "front resolved");
    front
}

/// One narrowing step: the single active child if `node` is a container
/// that collapses to one, `None` otherwise.
fn narrow(node: &NodeRef) -> Option<NodeRef> {
    match node.kind() {
        NodeKind::Tabs { selected } => node.children().get(selected.get()).cloned(),
        NodeKind::NavStack => node.children().last().cloned(),
        NodeKind::Overlay { presented } => presented.borrow().last().cloned(),
        _ => None,
    }
}

/// Children eligible for traversal below `node`: the active child only for
/// selection-state containers, all children otherwise, hidden ones dropped.
pub(crate) fn effective_children(node: &NodeRef) -> Vec<NodeRef> {
    let active = match node.kind() {
        NodeKind::Tabs { .. } | NodeKind::NavStack => {
            narrow(node).into_iter().collect()
        }
        NodeKind::Overlay { presented } => {
            let top = presented.borrow().last().cloned();
            match top {
                Some(layer) => vec![layer],
                None => node.children(),
            }
        }
        _ => node.children(),
    };
    active
        .into_iter()
        .filter(|child: &NodeRef| !child.is_hidden())
        .collect()
}

/// The frontmost presented alert, with the overlay host it is presented on.
///
/// Searched from the tree root, not the narrowed front, because the front
/// may already be inside the alert. The deepest presented alert wins,
/// matching what a user sees on top.
pub(crate) fn frontmost_alert(node: &NodeRef) -> Option<(NodeRef, NodeRef)> {
    if node.is_hidden() {
        return None;
    }
    if let NodeKind::Overlay { presented } = node.kind() {
        let top = presented.borrow().last().cloned();
        if let Some(layer) = top {
            if layer.is_hidden() {
                return None;
            }
            if let Some(found) = frontmost_alert(&layer) {
                return Some(found);
            }
            if matches!(layer.kind(), NodeKind::Alert { .. }) {
                return Some((Rc::clone(node), layer));
            }
            return None;
        }
    }
    for child in effective_children(node) {
        if let Some(found) = frontmost_alert(&child) {
            return Some(found);
        }
    }
    None
}
