// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for layout updates.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! [`NodeStore::update_with`](crate::node::NodeStore::update_with) calls while
//! validating a tree. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies and per-arrangement events.
//! - `trace-rich` (implies `trace`): gates [`NodeRedrawnEvent`] and the
//!   corresponding `TraceSink` method.

use crate::geometry::Axis;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when an update begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateBeginEvent {
    /// Update counter, starting at 1.
    pub tick: u64,
    /// Slot index of the root being validated.
    pub root: u32,
}

/// Emitted when an update ends, with the sizes of the change report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateEndEvent {
    /// Update counter.
    pub tick: u64,
    /// Number of redrawn nodes.
    pub redrawn: usize,
    /// Number of nodes that became effectively enabled.
    pub enabled: usize,
    /// Number of nodes that became effectively disabled.
    pub disabled: usize,
    /// Number of inserted nodes.
    pub inserted: usize,
    /// Number of freed slots.
    pub deleted: usize,
    /// Whether any parent gained or lost children.
    pub topology_changed: bool,
}

/// Emitted once per arrangement of a flex container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrangeEvent {
    /// Slot index of the container.
    pub node: u32,
    /// Main axis of the container.
    pub axis: Axis,
    /// Number of children taking part in the flow.
    pub children: usize,
    /// Sum of the grow weights.
    pub grow_count: f64,
    /// Space left over (or missing, when negative) before growth.
    pub pool: f64,
    /// Space handed out per unit of grow weight.
    pub factor: f64,
}

/// Emitted for each node redrawn during an update.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeRedrawnEvent {
    /// Update counter.
    pub tick: u64,
    /// Slot index of the node.
    pub node: u32,
    /// Parent-relative rectangle after validation.
    pub rect: Option<kurbo::Rect>,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from layout updates.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an update begins.
    fn on_update_begin(&mut self, e: &UpdateBeginEvent) {
        _ = e;
    }

    /// Called when an update ends.
    fn on_update_end(&mut self, e: &UpdateEndEvent) {
        _ = e;
    }

    /// Called for each flex arrangement performed during the update.
    fn on_arrange(&mut self, e: &ArrangeEvent) {
        _ = e;
    }

    /// Called for each redrawn node (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_node_redrawn(&mut self, e: &NodeRedrawnEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`UpdateBeginEvent`].
    #[inline]
    pub fn update_begin(&mut self, e: &UpdateBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_update_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`UpdateEndEvent`].
    #[inline]
    pub fn update_end(&mut self, e: &UpdateEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_update_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ArrangeEvent`].
    #[inline]
    pub fn arrange(&mut self, e: &ArrangeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_arrange(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`NodeRedrawnEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn node_redrawn(&mut self, e: &NodeRedrawnEvent) {
        if let Some(s) = &mut self.sink {
            s.on_node_redrawn(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
