// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use alloc::vec::Vec;

use super::id::{INVALID, NodeId};
use super::store::NodeStore;

/// An iterator over the direct children of a node, in order.
///
/// Created by [`NodeStore::children`].
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a NodeStore,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a NodeStore, first: u32) -> Self {
        Self {
            store,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.next_index().map(|idx| self.store.handle(idx))
    }
}

impl Children<'_> {
    /// Advances and returns the raw slot index instead of a handle.
    pub(crate) fn next_index(&mut self) -> Option<u32> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.store.next_sibling[idx as usize];
        Some(idx)
    }
}

/// Raw slot indices of a node's children.
#[derive(Debug)]
pub(crate) struct ChildIndices<'a>(pub(crate) Children<'a>);

impl Iterator for ChildIndices<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        self.0.next_index()
    }
}

/// Depth-first pre-order collection of the subtree rooted at `idx`.
pub(crate) fn subtree(store: &NodeStore, idx: u32) -> Vec<u32> {
    let mut out = Vec::new();
    collect(store, idx, &mut out);
    out
}

fn collect(store: &NodeStore, idx: u32, out: &mut Vec<u32>) {
    out.push(idx);
    let mut child = store.first_child[idx as usize];
    while child != INVALID {
        collect(store, child, out);
        child = store.next_sibling[child as usize];
    }
}
