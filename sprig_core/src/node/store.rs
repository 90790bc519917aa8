// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and input management.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Insets, Rect, Vec2};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::id::{INVALID, NodeId};
use super::style::{Cache, MetaValue, NodeFlags, NodeOptions, Style, Validation};
use super::traverse::{ChildIndices, Children, subtree};
use crate::behavior::{Container, NodeBehavior, NodeEvent};
use crate::dirty;
use crate::error::LayoutError;
use crate::geometry::{Align, FlexMode, Position, Size};

/// Kind tag given to nodes created with [`NodeStore::create_container`].
pub const CONTAINER_KIND: &str = "container";

/// Struct-of-arrays storage for every node of one or more layout trees.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Deleted nodes are recycled via a free list, and
/// generation counters prevent stale handle access.
pub struct NodeStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Identity and host data --
    pub(crate) kind: Vec<String>,
    pub(crate) name: Vec<Option<String>>,
    pub(crate) index: Vec<Option<HashMap<String, u32>>>,
    pub(crate) behavior: Vec<Option<Box<dyn NodeBehavior>>>,
    pub(crate) metadata: Vec<HashMap<String, MetaValue>>,

    // -- Inputs (set by callers) --
    pub(crate) style: Vec<Style>,
    pub(crate) flags: Vec<NodeFlags>,

    // -- Computed (written by measurement, arrangement, update) --
    pub(crate) cache: Vec<Cache>,
    pub(crate) state: Vec<Validation>,
    pub(crate) effective_enabled: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Change reporting --
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) pending_inserted: Vec<u32>,
    pub(crate) pending_deleted: Vec<u32>,
    pub(crate) tick: u64,
    #[cfg(feature = "trace")]
    pub(crate) arrange_log: Vec<crate::trace::ArrangeEvent>,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeStore")
            .field("len", &self.len)
            .field("free", &self.free_list.len())
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl NodeStore {
    /// Creates an empty node store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            kind: Vec::new(),
            name: Vec::new(),
            index: Vec::new(),
            behavior: Vec::new(),
            metadata: Vec::new(),
            style: Vec::new(),
            flags: Vec::new(),
            cache: Vec::new(),
            state: Vec::new(),
            effective_enabled: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_inserted: Vec::new(),
            pending_deleted: Vec::new(),
            tick: 0,
            #[cfg(feature = "trace")]
            arrange_log: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a detached node of the given kind and returns its handle.
    ///
    /// The node starts dirty, so the first [`update`](Self::update) that
    /// reaches it computes its geometry.
    pub fn create_node(
        &mut self,
        kind: impl Into<String>,
        behavior: Box<dyn NodeBehavior>,
        options: NodeOptions,
    ) -> NodeId {
        let NodeOptions {
            name,
            index,
            enabled,
            style,
        } = options;
        let index = (index && name.is_some()).then(HashMap::new);

        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot. Topology and caches were reset on free.
            let i = idx as usize;
            self.generation[i] += 1;
            self.kind[i] = kind.into();
            self.name[i] = name;
            self.index[i] = index;
            self.behavior[i] = Some(behavior);
            self.style[i] = style;
            self.flags[i] = NodeFlags { enabled };
            self.cache[i] = Cache::default();
            self.state[i] = Validation::default();
            self.effective_enabled[i] = enabled;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.kind.push(kind.into());
            self.name.push(name);
            self.index.push(index);
            self.behavior.push(Some(behavior));
            self.metadata.push(HashMap::new());
            self.style.push(style);
            self.flags.push(NodeFlags { enabled });
            self.cache.push(Cache::default());
            self.state.push(Validation::default());
            self.effective_enabled.push(enabled);
            self.generation.push(0);
            idx
        };

        self.handle(idx)
    }

    /// Creates a detached [`Container`] node.
    pub fn create_container(&mut self, options: NodeOptions) -> NodeId {
        self.create_node(CONTAINER_KIND, Box::new(Container), options)
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns a handle for raw slot `idx` (as found in
    /// [`LayoutChanges`](super::LayoutChanges)), or `None` if the slot is free.
    #[must_use]
    pub fn node_at(&self, idx: u32) -> Option<NodeId> {
        (idx < self.len && !self.free_list.contains(&idx)).then(|| self.handle(idx))
    }

    // -- Topology queries --

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns the parent of a node.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NoParent`] for a root node.
    pub fn try_parent(&self, id: NodeId) -> Result<NodeId, LayoutError> {
        self.parent(id).ok_or(LayoutError::NoParent { node: id })
    }

    /// Returns an iterator over the direct children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the number of direct children of a node.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Returns the child at position `n`, if any.
    #[must_use]
    pub fn child_at(&self, id: NodeId, n: usize) -> Option<NodeId> {
        self.children(id).nth(n)
    }

    /// Returns the handles of all root nodes (those with no parent).
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        (0..self.len)
            .filter(|&idx| self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx))
            .map(|idx| self.handle(idx))
            .collect()
    }

    /// Returns whether `ancestor` is `id` or one of its ancestors.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.validate(ancestor);
        self.validate(id);
        self.ancestry(id.idx).any(|idx| idx == ancestor.idx)
    }

    // -- Identity and host data --

    /// Returns the kind tag of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &str {
        self.validate(id);
        &self.kind[id.idx as usize]
    }

    /// Returns the name of a node, if any.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.validate(id);
        self.name[id.idx as usize].as_deref()
    }

    /// Returns whether the node owns a name index.
    #[must_use]
    pub fn has_index(&self, id: NodeId) -> bool {
        self.validate(id);
        self.index[id.idx as usize].is_some()
    }

    /// Looks up a metadata entry.
    #[must_use]
    pub fn metadata(&self, id: NodeId, key: &str) -> Option<&MetaValue> {
        self.validate(id);
        self.metadata[id.idx as usize].get(key)
    }

    /// Returns an iterator over all metadata entries of a node.
    pub fn metadata_entries(&self, id: NodeId) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.validate(id);
        self.metadata[id.idx as usize]
            .iter()
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Sets a metadata entry, returning the previous value.
    ///
    /// Metadata is host data and does not affect layout.
    pub fn set_metadata(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<MetaValue>,
    ) -> Option<MetaValue> {
        self.validate(id);
        self.metadata[id.idx as usize].insert(key.into(), value.into())
    }

    /// Removes a metadata entry, returning it.
    pub fn remove_metadata(&mut self, id: NodeId, key: &str) -> Option<MetaValue> {
        self.validate(id);
        self.metadata[id.idx as usize].remove(key)
    }

    /// Removes every metadata entry of a node.
    pub fn clear_metadata(&mut self, id: NodeId) {
        self.validate(id);
        self.metadata[id.idx as usize].clear();
    }

    /// Gives mutable access to a node's behavior.
    ///
    /// Returns `None` while the node's own callback is running.
    pub fn behavior_mut(&mut self, id: NodeId) -> Option<&mut (dyn NodeBehavior + 'static)> {
        self.validate(id);
        self.behavior[id.idx as usize].as_deref_mut()
    }

    // -- Input getters (no dirty marking) --

    /// Returns the declared inputs of a node.
    #[must_use]
    pub fn style(&self, id: NodeId) -> &Style {
        self.validate(id);
        &self.style[id.idx as usize]
    }

    /// Returns the flags of a node.
    #[must_use]
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns whether the node's own enabled flag is set.
    #[must_use]
    pub fn is_enabled(&self, id: NodeId) -> bool {
        self.flags(id).enabled
    }

    /// Returns whether the node and all of its ancestors are enabled.
    ///
    /// Only valid after [`update`](Self::update) has been called.
    #[must_use]
    pub fn effective_enabled(&self, id: NodeId) -> bool {
        self.validate(id);
        self.effective_enabled[id.idx as usize]
    }

    /// Returns whether the node is waiting for revalidation.
    #[must_use]
    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.validate(id);
        self.state[id.idx as usize].dirty
    }

    // -- Input setters (auto-mark dirty) --

    /// Replaces all inputs of a node.
    pub fn set_style(&mut self, id: NodeId, style: Style) {
        self.edit_style(id, |s| *s = style);
    }

    /// Edits the inputs of a node in place and marks it dirty if anything
    /// changed.
    pub fn edit_style(&mut self, id: NodeId, edit: impl FnOnce(&mut Style)) {
        self.validate(id);
        let idx = id.idx as usize;
        let before = self.style[idx].clone();
        edit(&mut self.style[idx]);
        if self.style[idx] != before {
            self.invalidate_input(id.idx);
        }
    }

    /// Sets the declared width.
    pub fn set_width(&mut self, id: NodeId, width: impl Into<Size>) {
        let width = width.into();
        self.edit_style(id, |s| s.width = width);
    }

    /// Sets the declared height.
    pub fn set_height(&mut self, id: NodeId, height: impl Into<Size>) {
        let height = height.into();
        self.edit_style(id, |s| s.height = height);
    }

    /// Sets the declared horizontal offset.
    pub fn set_left(&mut self, id: NodeId, left: impl Into<Position>) {
        let left = left.into();
        self.edit_style(id, |s| s.left = left);
    }

    /// Sets the declared vertical offset.
    pub fn set_top(&mut self, id: NodeId, top: impl Into<Position>) {
        let top = top.into();
        self.edit_style(id, |s| s.top = top);
    }

    /// Sets the margin.
    pub fn set_margin(&mut self, id: NodeId, margin: Insets) {
        self.edit_style(id, |s| s.margin = margin);
    }

    /// Sets the padding.
    pub fn set_padding(&mut self, id: NodeId, padding: Insets) {
        self.edit_style(id, |s| s.padding = padding);
    }

    /// Sets the anchor (fraction of the parent's inner size).
    pub fn set_anchor(&mut self, id: NodeId, anchor: Vec2) {
        self.edit_style(id, |s| s.anchor = anchor);
    }

    /// Sets the origin (fraction of the node's own size).
    pub fn set_origin(&mut self, id: NodeId, origin: Vec2) {
        self.edit_style(id, |s| s.origin = origin);
    }

    /// Sets the fill (fraction of the parent's size added to the node's size).
    pub fn set_fill(&mut self, id: NodeId, fill: Vec2) {
        self.edit_style(id, |s| s.fill = fill);
    }

    /// Sets the node's own scale.
    pub fn set_scale(&mut self, id: NodeId, scale: Vec2) {
        self.edit_style(id, |s| s.scale = scale);
    }

    /// Sets how the node arranges its children.
    pub fn set_flex_mode(&mut self, id: NodeId, mode: FlexMode) {
        self.edit_style(id, |s| s.flex_mode = mode);
    }

    /// Sets the child alignment on both axes.
    pub fn set_align(&mut self, id: NodeId, align_x: Align, align_y: Align) {
        self.edit_style(id, |s| {
            s.align_x = align_x;
            s.align_y = align_y;
        });
    }

    /// Sets the grow weight.
    pub fn set_flex_grow(&mut self, id: NodeId, grow: f64) {
        self.edit_style(id, |s| s.flex_grow = grow);
    }

    /// Excludes or includes the node in its parent's flow.
    pub fn set_ignore_layout(&mut self, id: NodeId, ignore: bool) {
        self.edit_style(id, |s| s.ignore_layout = ignore);
    }

    /// Sets whether revalidating the node revalidates all of its children.
    pub fn set_volatile(&mut self, id: NodeId, volatile: bool) {
        self.edit_style(id, |s| s.volatile = volatile);
    }

    /// Enables or disables a node.
    ///
    /// A disabled node and its subtree are skipped by
    /// [`update`](Self::update) and count as zero-size in their parent's flow.
    /// Their cached geometry is left as it was until the node is enabled
    /// again, which invalidates it. The node and every descendant receive [`NodeEvent::Enabled`] or
    /// [`NodeEvent::Disabled`].
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) {
        self.validate(id);
        let idx = id.idx;
        if self.flags[idx as usize].enabled == enabled {
            return;
        }
        self.flags[idx as usize].enabled = enabled;
        if enabled {
            self.mark_dirty_index(idx, true);
        } else {
            // The subtree keeps its stale geometry; only the parent's flow
            // changes.
            self.mark_parent_dirty(idx);
        }
        self.dirty.mark_with(idx, dirty::ENABLED, &EagerPolicy);

        let event = if enabled {
            NodeEvent::Enabled
        } else {
            NodeEvent::Disabled
        };
        for node in subtree(self, idx) {
            self.dispatch_event(node, event);
        }
    }

    // -- Cached geometry (read-only, no measurement) --

    /// Returns the cached width, or `None` if it has not been computed since
    /// the node was last dirtied.
    #[must_use]
    pub fn computed_width(&self, id: NodeId) -> Option<f64> {
        self.validate(id);
        self.cache[id.idx as usize].resolved(crate::geometry::Axis::Horizontal)
    }

    /// Returns the cached height, if computed.
    #[must_use]
    pub fn computed_height(&self, id: NodeId) -> Option<f64> {
        self.validate(id);
        self.cache[id.idx as usize].resolved(crate::geometry::Axis::Vertical)
    }

    /// Returns the cached left offset, if computed.
    #[must_use]
    pub fn computed_left(&self, id: NodeId) -> Option<f64> {
        self.validate(id);
        self.cache[id.idx as usize].left
    }

    /// Returns the cached top offset, if computed.
    #[must_use]
    pub fn computed_top(&self, id: NodeId) -> Option<f64> {
        self.validate(id);
        self.cache[id.idx as usize].top
    }

    /// Returns the cached parent-relative rectangle at raw slot `idx`, if
    /// fully computed.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn local_rect_at(&self, idx: u32) -> Option<Rect> {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        let cache = &self.cache[idx as usize];
        let (x, y) = (cache.left?, cache.top?);
        let w = cache.resolved(crate::geometry::Axis::Horizontal)?;
        let h = cache.resolved(crate::geometry::Axis::Vertical)?;
        Some(Rect::new(x, y, x + w, y + h))
    }

    // -- Internal helpers --

    /// Builds a handle for a live slot.
    pub(crate) fn handle(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    pub(crate) fn child_indices(&self, idx: u32) -> ChildIndices<'_> {
        ChildIndices(Children::new(self, self.first_child[idx as usize]))
    }

    /// Iterates `idx` and then each of its ancestors.
    pub(crate) fn ancestry(&self, idx: u32) -> impl Iterator<Item = u32> + '_ {
        core::iter::successors(Some(idx), |&i| {
            let p = self.parent[i as usize];
            (p != INVALID).then_some(p)
        })
    }

    /// Marks a node dirty after one of its inputs changed.
    ///
    /// Forces the transition when a cached result exists, so a value computed
    /// earlier in the same pass is not kept.
    fn invalidate_input(&mut self, idx: u32) {
        let force = !self.cache[idx as usize].is_empty();
        self.mark_dirty_index(idx, force);
    }

    /// Links `child` under `parent`, before `sibling` (or last if
    /// `sibling == INVALID`). `child` must be detached.
    pub(crate) fn link(&mut self, parent: u32, child: u32, sibling: u32) {
        let c = child as usize;
        self.parent[c] = parent;
        self.next_sibling[c] = sibling;
        if sibling == INVALID {
            let mut last = self.first_child[parent as usize];
            if last == INVALID {
                self.first_child[parent as usize] = child;
                self.prev_sibling[c] = INVALID;
            } else {
                // Walk to last child.
                while self.next_sibling[last as usize] != INVALID {
                    last = self.next_sibling[last as usize];
                }
                self.next_sibling[last as usize] = child;
                self.prev_sibling[c] = last;
            }
        } else {
            let prev = self.prev_sibling[sibling as usize];
            self.prev_sibling[c] = prev;
            if prev != INVALID {
                self.next_sibling[prev as usize] = child;
            } else {
                // `sibling` was the first child.
                self.first_child[parent as usize] = child;
            }
            self.prev_sibling[sibling as usize] = child;
        }

        // Child depends on parent for effective enablement.
        let _ = self.dirty.add_dependency(child, parent, dirty::ENABLED);
        self.dirty.mark_with(child, dirty::ENABLED, &EagerPolicy);
        self.dirty.mark(parent, dirty::TOPOLOGY);
    }

    /// Removes `idx` from its parent's child list.
    pub(crate) fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;

        self.dirty.remove_dependency(idx, p, dirty::ENABLED);
        self.dirty.mark_with(idx, dirty::ENABLED, &EagerPolicy);
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Frees the slot of a node that has already been unlinked and whose
    /// children have already been freed.
    pub(crate) fn free_slot(&mut self, idx: u32) {
        let i = idx as usize;
        self.parent[i] = INVALID;
        self.first_child[i] = INVALID;
        self.next_sibling[i] = INVALID;
        self.prev_sibling[i] = INVALID;
        self.name[i] = None;
        self.index[i] = None;
        self.behavior[i] = None;
        self.metadata[i].clear();
        self.cache[i] = Cache::default();
        self.state[i] = Validation::default();

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[i] += 1;
        self.free_list.push(idx);
        self.pending_deleted.push(idx);
    }

    /// Delivers a lifecycle event to a node's behavior.
    pub(crate) fn dispatch_event(&mut self, idx: u32, event: NodeEvent) {
        let id = self.handle(idx);
        let Some(mut behavior) = self.behavior[idx as usize].take() else {
            return;
        };
        behavior.notify(self, id, event);
        self.restore_behavior(id, behavior);
    }

    /// Calls a node's redraw hook.
    pub(crate) fn dispatch_redraw(&mut self, idx: u32) {
        let id = self.handle(idx);
        let Some(mut behavior) = self.behavior[idx as usize].take() else {
            return;
        };
        behavior.redraw(self, id);
        self.restore_behavior(id, behavior);
    }

    /// Puts a behavior back after a callback, unless the callback deleted
    /// its own node.
    fn restore_behavior(&mut self, id: NodeId, behavior: Box<dyn NodeBehavior>) {
        if self.generation[id.idx as usize] == id.generation {
            self.behavior[id.idx as usize] = Some(behavior);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::node::InsertAt;

    #[test]
    fn create_and_delete() {
        let mut store = NodeStore::new();
        let id = store.create_container(NodeOptions::default());
        assert!(store.is_alive(id));
        store.delete(id);
        assert!(!store.is_alive(id));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = NodeStore::new();
        let id1 = store.create_container(NodeOptions::default());
        store.delete(id1);
        let id2 = store.create_container(NodeOptions::default());
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn insert_and_query_children() {
        let mut store = NodeStore::new();
        let parent = store.create_container(NodeOptions::default());
        let a = store.create_container(NodeOptions::default());
        let b = store.create_container(NodeOptions::default());
        let c = store.create_container(NodeOptions::default());

        store.insert(parent, a, InsertAt::End).unwrap();
        store.insert(parent, c, InsertAt::End).unwrap();
        store.insert(parent, b, InsertAt::Before(c)).unwrap();

        assert_eq!(store.parent(a), Some(parent));
        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, vec![a, b, c]);
        assert_eq!(store.child_at(parent, 2), Some(c));
        assert_eq!(store.child_count(parent), 3);
    }

    #[test]
    fn roots_returns_parentless_nodes() {
        let mut store = NodeStore::new();
        let a = store.create_container(NodeOptions::default());
        let b = store.create_container(NodeOptions::default());
        let c = store.create_container(NodeOptions::default());
        store.insert(a, c, InsertAt::End).unwrap();

        let roots = store.roots();
        assert!(roots.contains(&a));
        assert!(roots.contains(&b));
        assert!(!roots.contains(&c));
    }

    #[test]
    fn try_parent_of_root_is_structural_error() {
        let mut store = NodeStore::new();
        let root = store.create_container(NodeOptions::default());
        assert_eq!(
            store.try_parent(root),
            Err(LayoutError::NoParent { node: root })
        );
    }

    #[test]
    fn metadata_round_trip_and_clear() {
        let mut store = NodeStore::new();
        let id = store.create_container(NodeOptions::default());
        assert_eq!(store.set_metadata(id, "label", "Play"), None);
        assert_eq!(
            store.set_metadata(id, "label", "Quit"),
            Some(MetaValue::Text("Play".into()))
        );
        store.set_metadata(id, "order", 3_i64);
        assert_eq!(store.metadata(id, "order"), Some(&MetaValue::Int(3)));
        assert_eq!(store.metadata_entries(id).count(), 2);

        store.clear_metadata(id);
        assert!(store.metadata(id, "label").is_none());
    }

    #[test]
    fn setters_mark_dirty_only_on_change() {
        let mut store = NodeStore::new();
        let id = store.create_container(NodeOptions::default());
        let _ = store.update(id);
        assert!(!store.is_dirty(id));

        store.set_width(id, 0.0);
        assert!(store.is_dirty(id), "changing width marks dirty");
        let _ = store.update(id);

        store.set_width(id, 0.0);
        assert!(!store.is_dirty(id), "writing the same width is a no-op");
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn deleted_handle_panics_on_style() {
        let mut store = NodeStore::new();
        let id = store.create_container(NodeOptions::default());
        store.delete(id);
        let _ = store.style(id);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn deleted_handle_panics_on_set_width() {
        let mut store = NodeStore::new();
        let id = store.create_container(NodeOptions::default());
        store.delete(id);
        store.set_width(id, 10.0);
    }
}
