// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use std::fmt;

use sprig_core::error::{ErrorKind, LayoutError};

/// Errors produced while reading or building a description.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildError {
    /// A tree operation failed.
    Layout(LayoutError),
    /// A JSON description has the wrong shape.
    MalformedDescription {
        /// Dotted location of the offending value, such as `children.1.width`.
        at: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl BuildError {
    /// Returns the category of this error.
    ///
    /// Malformed descriptions are configuration errors.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Layout(err) => err.kind(),
            Self::MalformedDescription { .. } => ErrorKind::Configuration,
        }
    }

    pub(crate) fn malformed(at: &str, reason: impl Into<String>) -> Self {
        Self::MalformedDescription {
            at: at.to_owned(),
            reason: reason.into(),
        }
    }
}

impl From<LayoutError> for BuildError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => fmt::Display::fmt(err, f),
            Self::MalformedDescription { at, reason } if at.is_empty() => {
                write!(f, "malformed description: {reason}")
            }
            Self::MalformedDescription { at, reason } => {
                write!(f, "malformed description at `{at}`: {reason}")
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::MalformedDescription { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_errors_keep_their_kind() {
        let err = BuildError::from(LayoutError::UnknownKind {
            kind: "sprite".into(),
        });
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "unknown node kind `sprite`");
    }

    #[test]
    fn malformed_display_names_location() {
        let err = BuildError::malformed("children.0.width", "expected a number or string");
        assert_eq!(
            err.to_string(),
            "malformed description at `children.0.width`: expected a number or string"
        );
        assert_eq!(
            BuildError::malformed("", "not an object").to_string(),
            "malformed description: not an object"
        );
    }
}
