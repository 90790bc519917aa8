// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node inputs, options, and cached outputs.

use alloc::string::String;

use kurbo::{Insets, Vec2};

use crate::geometry::{Align, Axis, FlexMode, Position, Size};

/// The geometry and flex inputs of a node.
///
/// Any change made through the store's setters marks the node dirty.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Horizontal offset.
    pub left: Position,
    /// Vertical offset.
    pub top: Position,
    /// Declared width, excluding padding.
    pub width: Size,
    /// Declared height, excluding padding.
    pub height: Size,
    /// Outer spacing (`x0` left, `y0` top, `x1` right, `y1` bottom).
    pub margin: Insets,
    /// Inner spacing (`x0` left, `y0` top, `x1` right, `y1` bottom).
    pub padding: Insets,
    /// Offset as a fraction of the parent's inner size.
    pub anchor: Vec2,
    /// Offset as a negative fraction of the node's own size.
    pub origin: Vec2,
    /// Extra size as a fraction of the parent's size.
    pub fill: Vec2,
    /// Own scale factor, composed with ancestor scales in global geometry.
    pub scale: Vec2,
    /// How children are arranged.
    pub flex_mode: FlexMode,
    /// Alignment of children along the x axis.
    pub align_x: Align,
    /// Alignment of children along the y axis.
    pub align_y: Align,
    /// Share of the parent's leftover main-axis space.
    pub flex_grow: f64,
    /// Excludes the node from its parent's flow sizing and arrangement.
    pub ignore_layout: bool,
    /// Revalidates every child whenever this node is revalidated.
    pub volatile: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            left: Position::default(),
            top: Position::default(),
            width: Size::Auto,
            height: Size::Auto,
            margin: Insets::ZERO,
            padding: Insets::ZERO,
            anchor: Vec2::ZERO,
            origin: Vec2::ZERO,
            fill: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            flex_mode: FlexMode::None,
            align_x: Align::Start,
            align_y: Align::Start,
            flex_grow: 0.0,
            ignore_layout: false,
            volatile: false,
        }
    }
}

impl Style {
    pub(crate) fn size(&self, axis: Axis) -> &Size {
        match axis {
            Axis::Horizontal => &self.width,
            Axis::Vertical => &self.height,
        }
    }

    pub(crate) fn position(&self, axis: Axis) -> &Position {
        match axis {
            Axis::Horizontal => &self.left,
            Axis::Vertical => &self.top,
        }
    }

    pub(crate) fn align(&self, axis: Axis) -> Align {
        match axis {
            Axis::Horizontal => self.align_x,
            Axis::Vertical => self.align_y,
        }
    }

    pub(crate) fn padding_start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.padding.x0,
            Axis::Vertical => self.padding.y0,
        }
    }

    pub(crate) fn padding_sum(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.padding.x0 + self.padding.x1,
            Axis::Vertical => self.padding.y0 + self.padding.y1,
        }
    }

    pub(crate) fn margin_start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.margin.x0,
            Axis::Vertical => self.margin.y0,
        }
    }

    pub(crate) fn margin_sum(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.margin.x0 + self.margin.x1,
            Axis::Vertical => self.margin.y0 + self.margin.y1,
        }
    }
}

/// Picks the component of a vector along `axis`.
pub(crate) fn component(v: Vec2, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => v.x,
        Axis::Vertical => v.y,
    }
}

/// A metadata value attached to a node by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum MetaValue {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Text(String),
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Creation-time options for a node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeOptions {
    /// Addressing name. A leading `@` keeps the node out of every name index
    /// while still letting it own an index for its descendants.
    pub name: Option<String>,
    /// Whether a named node owns a name index for its descendants.
    pub index: bool,
    /// Whether the node starts enabled.
    pub enabled: bool,
    /// Initial inputs.
    pub style: Style,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            name: None,
            index: true,
            enabled: true,
            style: Style::default(),
        }
    }
}

impl NodeOptions {
    /// Options for a named node.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Replaces the initial style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Opts a named node out of owning a name index.
    #[must_use]
    pub fn without_index(mut self) -> Self {
        self.index = false;
        self
    }

    /// Sets the initial enabled state.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Per-node boolean flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeFlags {
    /// Whether the node (and its subtree) takes part in layout.
    pub enabled: bool,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Validation state of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Validation {
    /// Cached geometry is stale.
    pub(crate) dirty: bool,
    /// Arrangement already ran for the current validation.
    pub(crate) layout_ready: bool,
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            dirty: true,
            layout_ready: false,
        }
    }
}

/// Cached geometry.
///
/// `None` means "not computed yet". Grow overrides are written by the
/// parent's arrangement and take precedence over the measured size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Cache {
    pub(crate) left: Option<f64>,
    pub(crate) top: Option<f64>,
    pub(crate) width: Option<f64>,
    pub(crate) height: Option<f64>,
    pub(crate) grow_width: Option<f64>,
    pub(crate) grow_height: Option<f64>,
}

impl Cache {
    pub(crate) fn position(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    pub(crate) fn set_position(&mut self, axis: Axis, value: Option<f64>) {
        match axis {
            Axis::Horizontal => self.left = value,
            Axis::Vertical => self.top = value,
        }
    }

    pub(crate) fn measured(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub(crate) fn set_measured(&mut self, axis: Axis, value: Option<f64>) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    pub(crate) fn grown(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.grow_width,
            Axis::Vertical => self.grow_height,
        }
    }

    pub(crate) fn set_grown(&mut self, axis: Axis, value: Option<f64>) {
        match axis {
            Axis::Horizontal => self.grow_width = value,
            Axis::Vertical => self.grow_height = value,
        }
    }

    /// Final size along `axis`, if resolved.
    pub(crate) fn resolved(&self, axis: Axis) -> Option<f64> {
        self.grown(axis).or(self.measured(axis))
    }

    pub(crate) fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
