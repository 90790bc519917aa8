// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchical flex layout engine driven by a per-tick update.
//!
//! `sprig_core` keeps a tree of rectangular nodes and computes their sizes and
//! positions from declared inputs, content measurements, and flex container
//! rules. It is `no_std` compatible (with `alloc`) and uses array-based
//! struct-of-arrays storage with generational handles.
//!
//! # Architecture
//!
//! ```text
//!   host mutations (setters, insert, delete)
//!       │
//!       ▼
//!   mark_dirty ──► invalidation through flex parents and children
//!       │
//!       ▼
//!   NodeStore::update(root) once per tick
//!       │  measure ──► arrange ──► visit children ──► redraw hook
//!       ▼
//!   LayoutChanges ──► host
//! ```
//!
//! **[`node`]**: Struct-of-arrays node tree with generational handles,
//! lazy measurement, flex arrangement, name indexes, and tree mutation.
//!
//! **[`behavior`]**: The [`NodeBehavior`](behavior::NodeBehavior) trait that
//! hosts implement per node kind to report content size and receive redraw
//! and lifecycle callbacks.
//!
//! **[`geometry`]**: Declared sizes, positions, axes, flex modes, and
//! alignment.
//!
//! **[`dirty`]**: Change-report channels via `understory_dirty`.
//!
//! **[`error`]**: [`LayoutError`](error::LayoutError) and its categories.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! update instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site) and per-arrangement events.
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-node redraw
//!   events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod behavior;
pub mod dirty;
pub mod error;
pub mod geometry;
pub mod node;
pub mod trace;
