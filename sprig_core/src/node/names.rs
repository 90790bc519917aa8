// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Name indexes and path resolution.
//!
//! A named node created with [`NodeOptions::index`](super::NodeOptions::index)
//! set owns a name index. Every other named node is registered in the index
//! of its nearest proper ancestor that owns one. Names starting with `@` are
//! never registered, though such nodes may still own an index.
//!
//! Registration follows insertion: inserting a node registers it and, when it
//! has no index of its own, its named descendants as well. Removal mirrors
//! insertion. If two nodes in one index share a name, the later registration
//! wins.

use alloc::string::ToString;
use alloc::vec::Vec;

use super::id::{INVALID, NodeId};
use super::store::NodeStore;
use crate::error::LayoutError;

/// Path segment that moves to the structural parent.
const PARENT_SEGMENT: &str = "parent";

impl NodeStore {
    /// Resolves a dot-separated path relative to `from`.
    ///
    /// Each segment is tried, in order, as a name in the nearest index (from
    /// the current node upward, inclusive), as the literal `parent`, and as a
    /// child position. An empty path resolves to `from`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Unresolved`] naming the first segment that
    /// matches nothing, and [`LayoutError::NoParent`] when `parent` is applied
    /// to a root.
    pub fn resolve(&self, from: NodeId, path: &str) -> Result<NodeId, LayoutError> {
        self.validate(from);
        if path.is_empty() {
            return Ok(from);
        }

        let mut current = from.idx;
        for segment in path.split('.') {
            current = self.resolve_segment(current, segment).ok_or_else(|| {
                if segment == PARENT_SEGMENT {
                    LayoutError::NoParent {
                        node: self.handle(current),
                    }
                } else {
                    LayoutError::Unresolved {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    }
                }
            })?;
        }
        Ok(self.handle(current))
    }

    /// Like [`resolve`](Self::resolve), but reports failure as `None`.
    #[must_use]
    pub fn try_resolve(&self, from: NodeId, path: &str) -> Option<NodeId> {
        self.resolve(from, path).ok()
    }

    /// Looks up a single name in the index nearest to `from`.
    #[must_use]
    pub fn lookup(&self, from: NodeId, name: &str) -> Option<NodeId> {
        self.validate(from);
        self.lookup_index(from.idx, name).map(|idx| self.handle(idx))
    }

    fn resolve_segment(&self, idx: u32, segment: &str) -> Option<u32> {
        if let Some(found) = self.lookup_index(idx, segment) {
            return Some(found);
        }
        if segment == PARENT_SEGMENT {
            let parent = self.parent[idx as usize];
            return (parent != INVALID).then_some(parent);
        }
        let position: usize = segment.parse().ok()?;
        self.child_indices(idx).nth(position)
    }

    fn lookup_index(&self, idx: u32, name: &str) -> Option<u32> {
        self.ancestry(idx)
            .find_map(|a| self.index[a as usize].as_ref())
            .and_then(|index| index.get(name).copied())
    }

    /// Nearest proper ancestor of `idx` that owns an index.
    fn index_owner(&self, idx: u32) -> Option<u32> {
        self.ancestry(idx)
            .skip(1)
            .find(|&a| self.index[a as usize].is_some())
    }

    /// Registers `idx`, and its named descendants if it owns no index, in the
    /// index above it.
    pub(crate) fn register_names(&mut self, idx: u32) {
        if let Some(owner) = self.index_owner(idx) {
            self.register_into(owner, idx);
        }
    }

    fn register_into(&mut self, owner: u32, idx: u32) {
        if let Some(name) = &self.name[idx as usize]
            && !name.starts_with('@')
        {
            let name = name.clone();
            if let Some(index) = self.index[owner as usize].as_mut() {
                index.insert(name, idx);
            }
        }
        if self.index[idx as usize].is_none() {
            let children: Vec<u32> = self.child_indices(idx).collect();
            for child in children {
                self.register_into(owner, child);
            }
        }
    }

    /// Mirror of [`register_names`](Self::register_names). Must run before
    /// `idx` is unlinked.
    pub(crate) fn unregister_names(&mut self, idx: u32) {
        if let Some(owner) = self.index_owner(idx) {
            self.unregister_from(owner, idx);
        }
    }

    fn unregister_from(&mut self, owner: u32, idx: u32) {
        if let Some(name) = &self.name[idx as usize]
            && let Some(index) = self.index[owner as usize].as_mut()
            && index.get(name) == Some(&idx)
        {
            index.remove(name);
        }
        if self.index[idx as usize].is_none() {
            let children: Vec<u32> = self.child_indices(idx).collect();
            for child in children {
                self.unregister_from(owner, child);
            }
        }
    }
}
