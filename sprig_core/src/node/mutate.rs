// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree mutation: insertion, replacement, and deletion.
//!
//! Every mutation keeps the name indexes consistent and marks the affected
//! nodes dirty. Inserting a node that already has a parent moves it: it is
//! detached first, which unregisters its names and dirties the old parent.

use alloc::string::String;
use alloc::vec::Vec;

use super::id::{INVALID, NodeId};
use super::store::NodeStore;
use super::traverse::subtree;
use crate::behavior::NodeEvent;
use crate::error::LayoutError;

/// Where [`NodeStore::insert`] places a child.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertAt {
    /// After all existing children.
    End,
    /// Before the given sibling.
    Before(NodeId),
    /// Before the sibling with this name, as resolved from the parent.
    Name(String),
    /// At this position among the other children. Negative positions count
    /// from the end, so `-1` places the child before the current last one.
    Index(isize),
}

impl NodeStore {
    /// Inserts `child` under `parent` at the given position.
    ///
    /// A child that already has a parent is moved. The child is registered in
    /// the nearest name index, both nodes are marked dirty, and the child
    /// receives [`NodeEvent::Inserted`].
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InsertionPointNotFound`] if `at` does not name a
    /// position among `parent`'s other children, and
    /// [`LayoutError::WouldCycle`] if `parent` lies inside `child`'s subtree.
    /// The tree is unchanged in either case.
    pub fn insert(&mut self, parent: NodeId, child: NodeId, at: InsertAt) -> Result<(), LayoutError> {
        self.validate(parent);
        self.validate(child);
        if self.is_ancestor_or_self(child, parent) {
            return Err(LayoutError::WouldCycle {
                node: child,
                parent,
            });
        }
        let sibling = self.insertion_point(parent, child.idx, &at)?;
        self.insert_before(parent.idx, child.idx, sibling);
        Ok(())
    }

    /// Inserts several children in order, starting at `at`.
    ///
    /// Stops at the first failure; children inserted before it stay inserted.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`insert`](Self::insert).
    pub fn insert_all(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = NodeId>,
        at: InsertAt,
    ) -> Result<(), LayoutError> {
        let mut previous: Option<NodeId> = None;
        for child in children {
            let at = match previous {
                None => at.clone(),
                Some(previous) => match self.next_sibling[previous.idx as usize] {
                    INVALID => InsertAt::End,
                    next if next == child.idx => match self.next_sibling[next as usize] {
                        INVALID => InsertAt::End,
                        after => InsertAt::Before(self.handle(after)),
                    },
                    next => InsertAt::Before(self.handle(next)),
                },
            };
            self.insert(parent, child, at)?;
            previous = Some(child);
        }
        Ok(())
    }

    /// Replaces the direct child `target` of `parent` with `new`.
    ///
    /// `target` is deleted and `new` takes its position.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NotAChild`] if `target` is not a direct child of
    /// `parent`, and [`LayoutError::WouldCycle`] if `parent` lies inside
    /// `new`'s subtree.
    pub fn replace(&mut self, parent: NodeId, new: NodeId, target: NodeId) -> Result<(), LayoutError> {
        self.validate(parent);
        self.validate(new);
        self.validate(target);
        if self.parent[target.idx as usize] != parent.idx {
            return Err(LayoutError::NotAChild {
                node: target,
                parent,
            });
        }
        if new == target {
            return Ok(());
        }
        if self.is_ancestor_or_self(new, parent) {
            return Err(LayoutError::WouldCycle { node: new, parent });
        }

        self.detach_index(new.idx);
        let position = self
            .child_indices(parent.idx)
            .position(|c| c == target.idx)
            .unwrap_or_default();
        self.delete(target);
        let position = isize::try_from(position).unwrap_or(isize::MAX);
        self.insert(parent, new, InsertAt::Index(position))
    }

    /// Removes a node from its parent without deleting it; it becomes a root.
    ///
    /// No lifecycle event is fired. Does nothing for a root.
    pub fn detach(&mut self, id: NodeId) {
        self.validate(id);
        self.detach_index(id.idx);
    }

    /// Deletes a node and its whole subtree.
    ///
    /// Names are unregistered, the parent is marked dirty, and every node of
    /// the subtree receives [`NodeEvent::Detached`], root first, before the
    /// slots are freed. Handles to deleted nodes become stale.
    pub fn delete(&mut self, id: NodeId) {
        self.validate(id);
        self.detach_index(id.idx);

        let doomed: Vec<NodeId> = subtree(self, id.idx)
            .into_iter()
            .map(|idx| self.handle(idx))
            .collect();
        for node in doomed {
            // Handlers may delete parts of the subtree themselves.
            if self.is_alive(node) {
                self.dispatch_event(node.idx, NodeEvent::Detached);
            }
        }

        if !self.is_alive(id) {
            return;
        }
        // Handlers may also have detached nodes, so collect again.
        let doomed = subtree(self, id.idx);
        for &idx in doomed.iter().rev() {
            self.free_slot(idx);
        }
    }

    /// Deletes the children of `parent` from position `offset` onward.
    pub fn delete_children(&mut self, parent: NodeId, offset: usize) {
        let doomed: Vec<NodeId> = self.children(parent).skip(offset).collect();
        for child in doomed {
            if self.is_alive(child) {
                self.delete(child);
            }
        }
    }

    /// Fires [`NodeEvent::Attached`] on a node whose subtree is complete.
    pub fn attach(&mut self, id: NodeId) {
        self.validate(id);
        self.dispatch_event(id.idx, NodeEvent::Attached);
    }

    /// Finds the sibling `child` is inserted before (`INVALID` for the end),
    /// ignoring `child`'s current position.
    fn insertion_point(&self, parent: NodeId, child: u32, at: &InsertAt) -> Result<u32, LayoutError> {
        let not_found = LayoutError::InsertionPointNotFound { parent };
        match at {
            InsertAt::End => Ok(INVALID),
            InsertAt::Before(sibling) => {
                if self.is_alive(*sibling)
                    && sibling.idx != child
                    && self.parent[sibling.idx as usize] == parent.idx
                {
                    Ok(sibling.idx)
                } else {
                    Err(not_found)
                }
            }
            InsertAt::Name(name) => match self.try_resolve(parent, name) {
                Some(sibling)
                    if sibling.idx != child && self.parent[sibling.idx as usize] == parent.idx =>
                {
                    Ok(sibling.idx)
                }
                _ => Err(not_found),
            },
            InsertAt::Index(index) => {
                let siblings: Vec<u32> = self
                    .child_indices(parent.idx)
                    .filter(|&c| c != child)
                    .collect();
                let len = siblings.len();
                let position = if *index < 0 {
                    len.checked_sub(index.unsigned_abs())
                } else {
                    Some(index.unsigned_abs())
                };
                match position {
                    Some(p) if p == len => Ok(INVALID),
                    Some(p) if p < len => Ok(siblings[p]),
                    _ => Err(not_found),
                }
            }
        }
    }

    /// Links `child` before `sibling` and performs the bookkeeping.
    fn insert_before(&mut self, parent: u32, child: u32, sibling: u32) {
        self.detach_index(child);
        self.link(parent, child, sibling);
        self.register_names(child);
        self.mark_dirty_index(child, true);
        let force = !self.cache[parent as usize].is_empty();
        self.mark_dirty_index(parent, force);
        self.pending_inserted.push(child);
        let parent = self.handle(parent);
        self.dispatch_event(child, NodeEvent::Inserted { parent });
    }

    /// Unlinks `idx` from its parent, if it has one.
    fn detach_index(&mut self, idx: u32) {
        let parent = self.parent[idx as usize];
        if parent == INVALID {
            return;
        }
        self.unregister_names(idx);
        self.unlink_from_parent(idx);
        let force = !self.cache[parent as usize].is_empty();
        self.mark_dirty_index(parent, force);
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;
    use crate::behavior::NodeBehavior;
    use crate::error::ErrorKind;
    use crate::node::NodeOptions;

    fn kids(store: &NodeStore, parent: NodeId) -> Vec<NodeId> {
        store.children(parent).collect()
    }

    fn setup(n: usize) -> (NodeStore, NodeId, Vec<NodeId>) {
        let mut store = NodeStore::new();
        let root = store.create_container(NodeOptions::named("root"));
        let mut children = Vec::new();
        for i in 0..n {
            let id = store.create_container(NodeOptions::named(alloc::format!("c{i}")));
            store.insert(root, id, InsertAt::End).unwrap();
            children.push(id);
        }
        (store, root, children)
    }

    #[test]
    fn insert_positions() {
        let (mut store, root, c) = setup(3);
        let x = store.create_container(NodeOptions::default());
        store.insert(root, x, InsertAt::Index(-1)).unwrap();
        assert_eq!(kids(&store, root), vec![c[0], c[1], x, c[2]]);

        store.insert(root, x, InsertAt::Index(0)).unwrap();
        assert_eq!(kids(&store, root), vec![x, c[0], c[1], c[2]]);

        store.insert(root, x, InsertAt::Name("c2".into())).unwrap();
        assert_eq!(kids(&store, root), vec![c[0], c[1], x, c[2]]);

        store.insert(root, x, InsertAt::Index(3)).unwrap();
        assert_eq!(kids(&store, root), vec![c[0], c[1], c[2], x]);
    }

    #[test]
    fn bad_insertion_point_leaves_tree_unchanged() {
        let (mut store, root, c) = setup(2);
        let x = store.create_container(NodeOptions::default());
        let stranger = store.create_container(NodeOptions::default());
        for at in [
            InsertAt::Index(5),
            InsertAt::Index(-3),
            InsertAt::Name("missing".into()),
            InsertAt::Before(stranger),
        ] {
            let err = store.insert(root, x, at).unwrap_err();
            assert_eq!(err, LayoutError::InsertionPointNotFound { parent: root });
            assert_eq!(err.kind(), ErrorKind::Structural);
        }
        assert_eq!(kids(&store, root), c);
        assert_eq!(store.parent(x), None);
    }

    #[test]
    fn insert_rejects_cycles() {
        let (mut store, root, c) = setup(1);
        assert_eq!(
            store.insert(c[0], root, InsertAt::End),
            Err(LayoutError::WouldCycle {
                node: root,
                parent: c[0],
            })
        );
    }

    #[test]
    fn insert_moves_between_parents() {
        let (mut store, root, c) = setup(2);
        store.insert(c[0], c[1], InsertAt::End).unwrap();
        assert_eq!(kids(&store, root), vec![c[0]]);
        assert_eq!(store.parent(c[1]), Some(c[0]));
        assert!(store.is_dirty(root));
    }

    #[test]
    fn insert_all_keeps_order_and_partial_effects() {
        let (mut store, root, c) = setup(1);
        let a = store.create_container(NodeOptions::default());
        let b = store.create_container(NodeOptions::default());
        store.insert_all(root, [a, b], InsertAt::Before(c[0])).unwrap();
        assert_eq!(kids(&store, root), vec![a, b, c[0]]);

        let d = store.create_container(NodeOptions::default());
        // `root` cannot go under itself; `d` is already committed.
        let err = store.insert_all(c[0], [d, root], InsertAt::End).unwrap_err();
        assert!(matches!(err, LayoutError::WouldCycle { .. }));
        assert_eq!(store.parent(d), Some(c[0]));
    }

    #[test]
    fn replace_takes_target_position() {
        let (mut store, root, c) = setup(3);
        let x = store.create_container(NodeOptions::named("x"));
        store.replace(root, x, c[1]).unwrap();
        assert_eq!(kids(&store, root), vec![c[0], x, c[2]]);
        assert!(!store.is_alive(c[1]));
        assert_eq!(store.lookup(root, "x"), Some(x));
        assert_eq!(store.lookup(root, "c1"), None);
    }

    #[test]
    fn replace_with_earlier_sibling() {
        let (mut store, root, c) = setup(3);
        store.replace(root, c[0], c[2]).unwrap();
        assert_eq!(kids(&store, root), vec![c[1], c[0]]);
    }

    #[test]
    fn replace_requires_direct_child() {
        let (mut store, root, c) = setup(1);
        let grandchild = store.create_container(NodeOptions::default());
        store.insert(c[0], grandchild, InsertAt::End).unwrap();
        let x = store.create_container(NodeOptions::default());
        assert_eq!(
            store.replace(root, x, grandchild),
            Err(LayoutError::NotAChild {
                node: grandchild,
                parent: root,
            })
        );
        assert!(store.is_alive(grandchild));
    }

    #[test]
    fn delete_children_from_offset() {
        let (mut store, root, c) = setup(4);
        store.delete_children(root, 1);
        assert_eq!(kids(&store, root), vec![c[0]]);
        assert!(c[1..].iter().all(|&id| !store.is_alive(id)));
    }

    #[test]
    fn detach_makes_a_root() {
        let (mut store, root, c) = setup(2);
        store.detach(c[0]);
        assert_eq!(store.parent(c[0]), None);
        assert_eq!(store.lookup(root, "c0"), None);
        assert!(store.is_alive(c[0]));
    }

    /// Records every event it receives.
    struct Recorder(Rc<RefCell<Vec<(&'static str, NodeEvent)>>>, &'static str);

    impl NodeBehavior for Recorder {
        fn notify(&mut self, _store: &mut NodeStore, _id: NodeId, event: NodeEvent) {
            self.0.borrow_mut().push((self.1, event));
        }
    }

    #[test]
    fn lifecycle_events() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = NodeStore::new();
        let root = store.create_container(NodeOptions::default());
        let mut recorder = |tag| {
            let behavior = Box::new(Recorder(log.clone(), tag));
            store.create_node("rec", behavior, NodeOptions::default())
        };
        let a = recorder("a");
        let b = recorder("b");
        store.insert(a, b, InsertAt::End).unwrap();
        store.insert(root, a, InsertAt::End).unwrap();
        store.attach(a);
        store.set_enabled(a, false);
        store.delete(a);

        assert_eq!(
            *log.borrow(),
            [
                ("b", NodeEvent::Inserted { parent: a }),
                ("a", NodeEvent::Inserted { parent: root }),
                ("a", NodeEvent::Attached),
                ("a", NodeEvent::Disabled),
                ("b", NodeEvent::Disabled),
                ("a", NodeEvent::Detached),
                ("b", NodeEvent::Detached),
            ]
        );
    }

    /// Deletes its own node when detached.
    struct SelfDestruct;

    impl NodeBehavior for SelfDestruct {
        fn notify(&mut self, store: &mut NodeStore, id: NodeId, event: NodeEvent) {
            if event == NodeEvent::Detached && store.is_alive(id) {
                store.delete(id);
            }
        }
    }

    #[test]
    fn reentrant_delete_from_handler() {
        let mut store = NodeStore::new();
        let root = store.create_container(NodeOptions::default());
        let mid = store.create_container(NodeOptions::default());
        let bomb = store.create_node("bomb", Box::new(SelfDestruct), NodeOptions::default());
        store.insert(root, mid, InsertAt::End).unwrap();
        store.insert(mid, bomb, InsertAt::End).unwrap();

        store.delete(mid);
        assert!(!store.is_alive(mid));
        assert!(!store.is_alive(bomb));
        assert_eq!(store.child_count(root), 0);
        let changes = store.update(root);
        assert_eq!(changes.deleted.len(), 2);
    }
}
