// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! All failures are synchronous and final: nothing here is transient, so
//! there is no retry classification. [`ErrorKind`] groups the variants into
//! configuration, resolution, and structural failures.
//!
//! Stale [`NodeId`] handles are not reported through [`LayoutError`]; they are
//! programming errors and panic.

use alloc::string::String;
use core::fmt;

use crate::node::NodeId;

/// Broad category of a [`LayoutError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input configuration (unknown node kind, malformed size string).
    Configuration,
    /// A name path did not resolve.
    Resolution,
    /// A tree operation referenced a node in the wrong structural position.
    Structural,
}

/// Errors produced by tree operations.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutError {
    /// No constructor is registered for the requested node kind.
    UnknownKind {
        /// The unrecognized kind tag.
        kind: String,
    },
    /// A size string could not be parsed.
    MalformedSize {
        /// The offending input.
        input: String,
    },
    /// A name path could not be resolved.
    Unresolved {
        /// The full path being resolved.
        path: String,
        /// The segment at which resolution failed.
        segment: String,
    },
    /// `node` is not a direct child of `parent`.
    NotAChild {
        /// The node that was expected to be a child.
        node: NodeId,
        /// The expected parent.
        parent: NodeId,
    },
    /// The requested insertion point does not exist under `parent`.
    InsertionPointNotFound {
        /// The node being inserted into.
        parent: NodeId,
    },
    /// The node has no parent.
    NoParent {
        /// The root node whose parent was requested.
        node: NodeId,
    },
    /// Inserting `node` under `parent` would make a node its own ancestor.
    WouldCycle {
        /// The node being inserted.
        node: NodeId,
        /// The requested parent, which lies inside `node`'s subtree.
        parent: NodeId,
    },
}

impl LayoutError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownKind { .. } | Self::MalformedSize { .. } => ErrorKind::Configuration,
            Self::Unresolved { .. } => ErrorKind::Resolution,
            Self::NotAChild { .. }
            | Self::InsertionPointNotFound { .. }
            | Self::NoParent { .. }
            | Self::WouldCycle { .. } => ErrorKind::Structural,
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind { kind } => write!(f, "unknown node kind `{kind}`"),
            Self::MalformedSize { input } => write!(f, "malformed size `{input}`"),
            Self::Unresolved { path, segment } => {
                write!(f, "path `{path}`: segment `{segment}` did not resolve")
            }
            Self::NotAChild { node, parent } => {
                write!(f, "{node:?} is not a direct child of {parent:?}")
            }
            Self::InsertionPointNotFound { parent } => {
                write!(f, "insertion point not found under {parent:?}")
            }
            Self::NoParent { node } => write!(f, "{node:?} has no parent"),
            Self::WouldCycle { node, parent } => {
                write!(f, "cannot insert {node:?} under its own descendant {parent:?}")
            }
        }
    }
}

impl core::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn kinds_group_variants() {
        let unknown = LayoutError::UnknownKind {
            kind: "sprite".into(),
        };
        assert_eq!(unknown.kind(), ErrorKind::Configuration);

        let unresolved = LayoutError::Unresolved {
            path: "a.b".into(),
            segment: "b".into(),
        };
        assert_eq!(unresolved.kind(), ErrorKind::Resolution);
    }

    #[test]
    fn display_names_the_segment() {
        let err = LayoutError::Unresolved {
            path: "menu.items.9".into(),
            segment: "9".into(),
        };
        assert_eq!(
            err.to_string(),
            "path `menu.items.9`: segment `9` did not resolve"
        );
    }
}
