// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and tree dumps for sprig diagnostics.
//!
//! This crate provides development helpers around `sprig_core`:
//!
//! - [`pretty::PrettyPrintSink`]: a [`TraceSink`](sprig_core::trace::TraceSink)
//!   writing human-readable one-line-per-event output.
//! - [`dump::write_tree`] and [`dump::to_json`]: the geometry of a subtree as
//!   indented text or JSON.

pub mod dump;
pub mod pretty;
