// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-kind node capabilities.
//!
//! The core never renders anything. Each node carries a boxed
//! [`NodeBehavior`] supplied by the host for its kind, which answers two
//! questions for the layout engine (natural content size along each axis) and
//! receives two kinds of callbacks from it (post-arrangement redraw and
//! lifecycle notifications).
//!
//! Callbacks receive `&mut NodeStore` and may mutate the tree, including
//! inserting or deleting nodes while an [`update`](NodeStore::update) is in
//! progress. While a node's own callback runs, its behavior is temporarily
//! lifted out of the store; content-size queries for that node answer `0`
//! until the callback returns.

use core::fmt;

use crate::geometry::Axis;
use crate::node::{INVALID, MetaValue, NodeId, NodeStore, Style};

/// A lifecycle notification delivered to [`NodeBehavior::notify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeEvent {
    /// The node was inserted under `parent`.
    Inserted {
        /// The new parent.
        parent: NodeId,
    },
    /// The node's subtree is fully constructed and attached.
    Attached,
    /// The node is being removed from the tree (fired for every node in a
    /// deleted subtree, root first).
    Detached,
    /// The node or one of its ancestors was enabled.
    Enabled,
    /// The node or one of its ancestors was disabled.
    Disabled,
}

/// Capabilities a concrete node kind supplies to the layout engine.
///
/// Every method has a default, so a plain grouping node needs no overrides
/// (see [`Container`]).
pub trait NodeBehavior {
    /// Natural width of the node's content, excluding padding.
    fn content_width(&self, node: NodeRef<'_>) -> f64 {
        _ = node;
        0.0
    }

    /// Natural height of the node's content, excluding padding.
    fn content_height(&self, node: NodeRef<'_>) -> f64 {
        _ = node;
        0.0
    }

    /// Called after the node has been arranged and validated during an
    /// update. Resolved geometry is readable through `store`.
    fn redraw(&mut self, store: &mut NodeStore, id: NodeId) {
        _ = (store, id);
    }

    /// Called on lifecycle transitions.
    fn notify(&mut self, store: &mut NodeStore, id: NodeId, event: NodeEvent) {
        _ = (store, id, event);
    }
}

/// A grouping node with no content of its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct Container;

impl NodeBehavior for Container {}

/// A leaf with a fixed natural size, such as an image or icon.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Intrinsic {
    /// Natural width.
    pub width: f64,
    /// Natural height.
    pub height: f64,
}

impl Intrinsic {
    /// Creates an intrinsic-size behavior.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl NodeBehavior for Intrinsic {
    fn content_width(&self, _node: NodeRef<'_>) -> f64 {
        self.width
    }

    fn content_height(&self, _node: NodeRef<'_>) -> f64 {
        self.height
    }
}

/// A read-only view of one node, passed to size and position closures and
/// to content-size queries.
///
/// Only already-resolved geometry is visible; reading through a `NodeRef`
/// never triggers measurement.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    pub(crate) store: &'a NodeStore,
    pub(crate) idx: u32,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(store: &'a NodeStore, idx: u32) -> Self {
        Self { store, idx }
    }

    /// Returns the handle of the viewed node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.store.handle(self.idx)
    }

    /// Returns the node's kind tag.
    #[must_use]
    pub fn kind(&self) -> &'a str {
        &self.store.kind[self.idx as usize]
    }

    /// Returns the node's name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.store.name[self.idx as usize].as_deref()
    }

    /// Returns the node's declared inputs.
    #[must_use]
    pub fn style(&self) -> &'a Style {
        &self.store.style[self.idx as usize]
    }

    /// Looks up a metadata entry.
    #[must_use]
    pub fn metadata(&self, key: &str) -> Option<&'a MetaValue> {
        self.store.metadata[self.idx as usize].get(key)
    }

    /// Returns a view of the parent, if any.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let p = self.store.parent[self.idx as usize];
        (p != INVALID).then(|| Self::new(self.store, p))
    }

    /// Returns the number of children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.store.child_indices(self.idx).count()
    }

    /// Returns the resolved width, if it has been computed.
    #[must_use]
    pub fn computed_width(&self) -> Option<f64> {
        self.store.cache[self.idx as usize].resolved(Axis::Horizontal)
    }

    /// Returns the resolved height, if it has been computed.
    #[must_use]
    pub fn computed_height(&self) -> Option<f64> {
        self.store.cache[self.idx as usize].resolved(Axis::Vertical)
    }

    /// Returns the resolved inner width (width minus padding), if known.
    #[must_use]
    pub fn inner_width(&self) -> Option<f64> {
        self.store.ready_inner_size(self.idx, Axis::Horizontal)
    }

    /// Returns the resolved inner height (height minus padding), if known.
    #[must_use]
    pub fn inner_height(&self) -> Option<f64> {
        self.store.ready_inner_size(self.idx, Axis::Vertical)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id())
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use kurbo::Insets;

    use super::*;
    use crate::node::{InsertAt, NodeOptions};

    /// Sizes itself from a `text` metadata entry, eight units per character.
    struct Label;

    impl NodeBehavior for Label {
        fn content_width(&self, node: NodeRef<'_>) -> f64 {
            match node.metadata("text") {
                Some(MetaValue::Text(text)) => 8.0 * text.chars().count() as f64,
                _ => 0.0,
            }
        }

        fn content_height(&self, node: NodeRef<'_>) -> f64 {
            if node.parent().is_some() { 12.0 } else { 0.0 }
        }
    }

    #[test]
    fn intrinsic_content_includes_padding() {
        let mut store = NodeStore::new();
        let icon = store.create_node(
            "icon",
            Box::new(Intrinsic::new(40.0, 10.0)),
            NodeOptions::default().with_style(Style {
                padding: Insets::uniform(2.0),
                ..Style::default()
            }),
        );

        assert_eq!(store.width(icon), 44.0);
        assert_eq!(store.height(icon), 14.0);
        assert_eq!(store.inner_width(icon), 40.0);
    }

    #[test]
    fn content_queries_see_metadata_and_parent() {
        let mut store = NodeStore::new();
        let root = store.create_container(NodeOptions::named("root"));
        let label = store.create_node("label", Box::new(Label), NodeOptions::named("title"));
        let _ = store.set_metadata(label, "text", "hello");

        assert_eq!(store.width(label), 40.0);
        assert_eq!(store.height(label), 0.0, "detached label has no line height");

        store.insert(root, label, InsertAt::End).unwrap();
        assert_eq!(store.height(label), 12.0);
    }

    #[test]
    fn container_has_no_content() {
        let mut store = NodeStore::new();
        let node = store.create_container(NodeOptions::default());
        assert_eq!(store.width(node), 0.0);
        assert_eq!(store.height(node), 0.0);
    }
}
