// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use sprig_core::geometry::Axis;
use sprig_core::trace::{
    ArrangeEvent, NodeRedrawnEvent, TraceSink, UpdateBeginEvent, UpdateEndEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::Horizontal => "x",
        Axis::Vertical => "y",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_update_begin(&mut self, e: &UpdateBeginEvent) {
        let _ = writeln!(self.writer, "[update:begin] tick={} root={}", e.tick, e.root);
    }

    fn on_update_end(&mut self, e: &UpdateEndEvent) {
        let topology = if e.topology_changed { "changed" } else { "same" };
        let _ = writeln!(
            self.writer,
            "[update:end] tick={} redrawn={} enabled={} disabled={} \
             inserted={} deleted={} topology={topology}",
            e.tick, e.redrawn, e.enabled, e.disabled, e.inserted, e.deleted,
        );
    }

    fn on_arrange(&mut self, e: &ArrangeEvent) {
        let _ = writeln!(
            self.writer,
            "[arrange] node={} axis={} children={} grow={} pool={:.1} factor={:.2}",
            e.node,
            axis_name(e.axis),
            e.children,
            e.grow_count,
            e.pool,
            e.factor,
        );
    }

    fn on_node_redrawn(&mut self, e: &NodeRedrawnEvent) {
        match e.rect {
            Some(r) => {
                let _ = writeln!(
                    self.writer,
                    "[redraw] tick={} node={} at ({:.1}, {:.1}) size {:.1}x{:.1}",
                    e.tick,
                    e.node,
                    r.x0,
                    r.y0,
                    r.width(),
                    r.height(),
                );
            }
            None => {
                let _ = writeln!(self.writer, "[redraw] tick={} node={} unresolved", e.tick, e.node);
            }
        }
    }
}
