// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node tree data model and layout engine.
//!
//! A *node* is one element of a layout tree. Each node has:
//!
//! - An identity ([`NodeId`]), a generational handle that becomes stale when
//!   the node is deleted, preventing use-after-free bugs at the API level.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//!   Child order is the main-axis placement order.
//! - **Inputs** set by the caller through [`Style`] (sizes, offsets, margin,
//!   padding, anchor, origin, fill, scale, flex configuration).
//! - **Cached geometry** produced lazily by measurement and arrangement and
//!   revalidated by [`update`](NodeStore::update).
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles.
//!
//! # Validation
//!
//! A node is either clean (its cached geometry is current) or dirty. Changing
//! any input marks the node dirty, which clears its cache and, depending on
//! flex configuration, dirties its children and its parent (see
//! [`mark_dirty`](NodeStore::mark_dirty)). Once per tick the host calls
//! [`update`](NodeStore::update) on each root, which walks the enabled part of
//! the tree, re-arranges dirty flex containers, and fires redraw hooks.
//!
//! Geometry accessors such as [`width`](NodeStore::width) measure on demand,
//! so they are correct at any time; the `computed_*` accessors only read the
//! cache.

mod arrange;
mod bounds;
mod id;
mod measure;
mod mutate;
mod names;
mod store;
mod style;
mod traverse;
mod update;

pub use id::{INVALID, NodeId};
pub use mutate::InsertAt;
pub use store::{CONTAINER_KIND, NodeStore};
pub use style::{MetaValue, NodeFlags, NodeOptions, Style};
pub use traverse::Children;
pub use update::LayoutChanges;
