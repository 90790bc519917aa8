// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry inputs and axis helpers.
//!
//! Sizes and positions are declared per node as [`Size`] and [`Position`]
//! values. Both support a *computed* form: a closure evaluated against a
//! read-only [`NodeRef`] view of the node at measurement time.
//!
//! Percentage sizes are kept as [`Size::Percent`] and resolve against the
//! parent's inner size only once the parent's own size is known. Until then
//! they behave as [`Size::Auto`], which breaks the cycle between a parent that
//! sizes itself from its children and a child that sizes itself from its
//! parent.

use alloc::rc::Rc;
use alloc::string::ToString;
use core::fmt;

use crate::behavior::NodeRef;
use crate::error::LayoutError;

/// A closure producing a size for a node.
///
/// Returning `None` means "unset": the node falls back to deriving its size
/// from content.
pub type SizeFn = Rc<dyn Fn(NodeRef<'_>) -> Option<f64>>;

/// A closure producing a position offset for a node.
pub type PositionFn = Rc<dyn Fn(NodeRef<'_>) -> f64>;

/// One of the two layout axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis (`left` / `width`).
    Horizontal,
    /// The y axis (`top` / `height`).
    Vertical,
}

impl Axis {
    /// Returns the perpendicular axis.
    #[inline]
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// How a node arranges its children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlexMode {
    /// Children are positioned individually from their own inputs.
    #[default]
    None,
    /// Children flow left to right.
    Horizontal,
    /// Children flow top to bottom.
    Vertical,
}

impl FlexMode {
    /// Returns the main axis, or `None` when the node does not flex.
    #[inline]
    #[must_use]
    pub const fn main_axis(self) -> Option<Axis> {
        match self {
            Self::None => None,
            Self::Horizontal => Some(Axis::Horizontal),
            Self::Vertical => Some(Axis::Vertical),
        }
    }
}

/// Alignment of children along one axis of a flex container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Pack at the leading edge.
    #[default]
    Start,
    /// Center in the available space.
    Center,
    /// Pack at the trailing edge.
    End,
}

impl Align {
    /// Returns the share of `slack` this alignment shifts by.
    #[inline]
    #[must_use]
    pub fn offset(self, slack: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => slack / 2.0,
            Self::End => slack,
        }
    }
}

/// A declared width or height.
#[derive(Clone, Default)]
pub enum Size {
    /// Derive the size from content or children.
    #[default]
    Auto,
    /// An explicit size.
    Fixed(f64),
    /// A percentage (`0.0..=100.0`) of the parent's inner size.
    Percent(f64),
    /// A size computed per node.
    Computed(SizeFn),
}

impl Size {
    /// Creates a computed size from a closure.
    #[must_use]
    pub fn computed(f: impl Fn(NodeRef<'_>) -> Option<f64> + 'static) -> Self {
        Self::Computed(Rc::new(f))
    }

    /// Parses a size string.
    ///
    /// Accepts `"auto"` (or an empty string), a plain number (`"120"`), or a
    /// percentage (`"50%"`).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::MalformedSize`] if the string is none of those.
    pub fn parse(input: &str) -> Result<Self, LayoutError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        let malformed = || LayoutError::MalformedSize {
            input: input.to_string(),
        };
        if let Some(number) = trimmed.strip_suffix('%') {
            let percent: f64 = number.trim().parse().map_err(|_| malformed())?;
            if !percent.is_finite() {
                return Err(malformed());
            }
            return Ok(Self::Percent(percent));
        }
        let value: f64 = trimmed.parse().map_err(|_| malformed())?;
        if !value.is_finite() {
            return Err(malformed());
        }
        Ok(Self::Fixed(value))
    }

    /// Returns whether this size is [`Size::Auto`].
    #[inline]
    #[must_use]
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl From<f64> for Size {
    fn from(value: f64) -> Self {
        Self::Fixed(value)
    }
}

impl TryFrom<&str> for Size {
    type Error = LayoutError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl fmt::Debug for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("Auto"),
            Self::Fixed(v) => write!(f, "Fixed({v})"),
            Self::Percent(p) => write!(f, "Percent({p}%)"),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl PartialEq for Size {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Auto, Self::Auto) => true,
            (Self::Fixed(a), Self::Fixed(b)) | (Self::Percent(a), Self::Percent(b)) => a == b,
            (Self::Computed(a), Self::Computed(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A declared `left` or `top` offset.
#[derive(Clone)]
pub enum Position {
    /// An explicit offset.
    Fixed(f64),
    /// An offset computed per node.
    Computed(PositionFn),
}

impl Position {
    /// Creates a computed position from a closure.
    #[must_use]
    pub fn computed(f: impl Fn(NodeRef<'_>) -> f64 + 'static) -> Self {
        Self::Computed(Rc::new(f))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::Fixed(0.0)
    }
}

impl From<f64> for Position {
    fn from(value: f64) -> Self {
        Self::Fixed(value)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => write!(f, "Fixed({v})"),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::Computed(a), Self::Computed(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
