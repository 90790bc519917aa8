// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Invalidation and per-tick validation.
//!
//! [`NodeStore::update`] walks the enabled part of a tree once per tick:
//!
//! 1. A disabled node is skipped together with its subtree.
//! 2. A clean node is not revalidated, but its children are visited.
//! 3. A dirty node (after forcing its children dirty when it is volatile)
//!    drops whatever its dirty children measured since they were invalidated,
//!    validates its own geometry, arranges its children, visits a snapshot of
//!    its children, clears its dirty flag, and fires its redraw hook.
//!
//! Afterwards the dirty channels are drained into a [`LayoutChanges`] report.
//!
//! [`LayoutChanges`] uses raw slot indices (`u32`) rather than [`NodeId`]
//! handles so that hosts can read geometry through
//! [`local_rect_at`](NodeStore::local_rect_at) or upgrade an index with
//! [`node_at`](NodeStore::node_at).
//!
//! [`NodeId`]: super::NodeId

use alloc::vec::Vec;

use super::id::{INVALID, NodeId};
use super::store::NodeStore;
use super::style::Cache;
use crate::dirty;
use crate::geometry::{Axis, FlexMode};
use crate::trace::{Tracer, UpdateBeginEvent, UpdateEndEvent};

/// The set of changes produced by a single [`NodeStore::update`] call.
///
/// Each list contains raw slot indices.
#[derive(Clone, Debug, Default)]
pub struct LayoutChanges {
    /// Nodes that were revalidated and redrawn.
    pub redrawn: Vec<u32>,
    /// Nodes that became effectively enabled.
    pub enabled: Vec<u32>,
    /// Nodes that became effectively disabled.
    pub disabled: Vec<u32>,
    /// Nodes inserted under a parent since the last update.
    pub inserted: Vec<u32>,
    /// Slots freed by deletion since the last update.
    pub deleted: Vec<u32>,
    /// Whether any parent gained or lost children.
    pub topology_changed: bool,
}

impl LayoutChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.redrawn.clear();
        self.enabled.clear();
        self.disabled.clear();
        self.inserted.clear();
        self.deleted.clear();
        self.topology_changed = false;
    }

    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.redrawn.is_empty()
            && self.enabled.is_empty()
            && self.disabled.is_empty()
            && self.inserted.is_empty()
            && self.deleted.is_empty()
            && !self.topology_changed
    }
}

impl NodeStore {
    /// Marks a node as needing revalidation.
    ///
    /// Does nothing when the node is already dirty, unless `force` is set.
    /// Otherwise the node's cached geometry is cleared, its children are
    /// dirtied when it is a flex container or volatile, and its parent is
    /// dirtied when the parent is a flex container.
    ///
    /// Input setters call this automatically, forcing whenever the node holds
    /// a cached result.
    pub fn mark_dirty(&mut self, id: NodeId, force: bool) {
        self.validate(id);
        self.mark_dirty_index(id.idx, force);
    }

    pub(crate) fn mark_dirty_index(&mut self, idx: u32, force: bool) {
        if self.state[idx as usize].dirty && !force {
            return;
        }
        self.invalidate_down(idx);
        self.mark_parent_dirty(idx);
    }

    /// Dirties the parent of `idx` when the parent is a flex container.
    pub(crate) fn mark_parent_dirty(&mut self, idx: u32) {
        let parent = self.parent[idx as usize];
        if parent != INVALID && self.style[parent as usize].flex_mode != FlexMode::None {
            let force = !self.cache[parent as usize].is_empty();
            self.mark_dirty_index(parent, force);
        }
    }

    /// Clears `idx` and, through flex containers and volatile nodes, its
    /// enabled children. Disabled children keep their stale geometry.
    fn invalidate_down(&mut self, idx: u32) {
        let i = idx as usize;
        self.state[i].dirty = true;
        self.state[i].layout_ready = false;
        self.cache[i] = Cache::default();

        let style = &self.style[i];
        if style.flex_mode != FlexMode::None || style.volatile {
            let children: Vec<u32> = self.child_indices(idx).collect();
            for child in children {
                let c = child as usize;
                if !self.flags[c].enabled {
                    continue;
                }
                if !self.state[c].dirty || !self.cache[c].is_empty() {
                    self.invalidate_down(child);
                }
            }
        }
    }

    /// Revalidates the tree rooted at `root` and reports what changed.
    ///
    /// Call once per tick on each root. A second call with no intervening
    /// mutation redraws nothing.
    pub fn update(&mut self, root: NodeId) -> LayoutChanges {
        self.update_with(root, &mut Tracer::none())
    }

    /// Like [`update`](Self::update), but emits trace events.
    pub fn update_with(&mut self, root: NodeId, tracer: &mut Tracer<'_>) -> LayoutChanges {
        self.validate(root);
        self.tick += 1;
        tracer.update_begin(&UpdateBeginEvent {
            tick: self.tick,
            root: root.idx,
        });

        #[cfg(feature = "trace")]
        self.arrange_log.clear();
        if self.state[root.idx as usize].dirty {
            self.discard_provisional(root.idx);
        }
        self.update_node(root.idx);

        let mut changes = LayoutChanges::default();
        self.collect_changes(&mut changes);

        #[cfg(feature = "trace")]
        for event in self.arrange_log.drain(..) {
            tracer.arrange(&event);
        }
        #[cfg(feature = "trace-rich")]
        for &idx in &changes.redrawn {
            if self.node_at(idx).is_some() {
                tracer.node_redrawn(&crate::trace::NodeRedrawnEvent {
                    tick: self.tick,
                    node: idx,
                    rect: self.local_rect_at(idx),
                });
            }
        }

        tracer.update_end(&UpdateEndEvent {
            tick: self.tick,
            redrawn: changes.redrawn.len(),
            enabled: changes.enabled.len(),
            disabled: changes.disabled.len(),
            inserted: changes.inserted.len(),
            deleted: changes.deleted.len(),
            topology_changed: changes.topology_changed,
        });
        changes
    }

    /// Returns the number of completed [`update`](Self::update) calls.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    fn update_node(&mut self, idx: u32) {
        let i = idx as usize;
        if !self.flags[i].enabled {
            return;
        }

        let was_dirty = self.state[i].dirty;
        if was_dirty {
            if self.style[i].volatile {
                let children: Vec<u32> = self.child_indices(idx).collect();
                for child in children {
                    self.invalidate_down(child);
                }
            }
            let children: Vec<u32> = self.child_indices(idx).collect();
            for child in children {
                let c = child as usize;
                if self.state[c].dirty && self.flags[c].enabled {
                    self.discard_provisional(child);
                }
            }
            self.validate_geometry(idx);
            self.arrange(idx);
        }

        let generation = self.generation[i];
        let children: Vec<u32> = self.child_indices(idx).collect();
        for child in children {
            // Callbacks may have moved or deleted children.
            if self.parent[child as usize] == idx {
                self.update_node(child);
            }
        }
        if self.generation[i] != generation {
            return;
        }

        if was_dirty {
            // Callbacks fired below this node may have invalidated it again.
            self.validate_geometry(idx);
            self.state[i].dirty = false;
            self.dirty.mark(idx, dirty::GEOMETRY);
            self.dispatch_redraw(idx);
        }
    }

    fn validate_geometry(&mut self, idx: u32) {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            self.measure_position(idx, axis);
            self.measure(idx, axis);
        }
    }

    /// Drains the change channels into `changes`.
    fn collect_changes(&mut self, changes: &mut LayoutChanges) {
        changes.redrawn = self
            .dirty
            .drain(dirty::GEOMETRY)
            .deterministic()
            .run()
            .collect();

        // Drain ENABLED channel: recompute effective enablement parent-first.
        let affected: Vec<u32> = self
            .dirty
            .drain(dirty::ENABLED)
            .affected()
            .deterministic()
            .run()
            .collect();
        for idx in affected {
            if self.free_list.contains(&idx) {
                continue;
            }
            let parent = self.parent[idx as usize];
            let parent_enabled = parent == INVALID || self.effective_enabled[parent as usize];
            let now = parent_enabled && self.flags[idx as usize].enabled;
            if now != self.effective_enabled[idx as usize] {
                if now {
                    changes.enabled.push(idx);
                } else {
                    changes.disabled.push(idx);
                }
                self.effective_enabled[idx as usize] = now;
            }
        }

        let topology: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_inserted, &mut changes.inserted);
        core::mem::swap(&mut self.pending_deleted, &mut changes.deleted);
        changes.topology_changed =
            !topology.is_empty() || !changes.inserted.is_empty() || !changes.deleted.is_empty();
    }
}
