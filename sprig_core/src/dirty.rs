// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change-report channel constants.
//!
//! Layout validity itself is tracked per node (see
//! [`NodeStore::mark_dirty`](crate::node::NodeStore::mark_dirty)), because its
//! propagation rules depend on flex configuration. What hosts *observe* after
//! an update is tracked separately through [`understory_dirty`] channels and
//! surfaced as [`LayoutChanges`](crate::node::LayoutChanges):
//!
//! - **Local**: [`GEOMETRY`] is marked for each node whose redraw hook fired
//!   during an update.
//! - **Propagating**: [`ENABLED`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) with dependency edges from
//!   child to parent, so toggling a node's enabled flag marks its whole
//!   subtree for effective-enabled recomputation.
//! - **Structural**: [`TOPOLOGY`] is marked on the parent of every insertion
//!   or deletion.
//!
//! Each [`NodeStore::update`](crate::node::NodeStore::update) call drains all
//! three channels.

use understory_dirty::Channel;

/// Node geometry was revalidated and pushed out through its redraw hook.
pub const GEOMETRY: Channel = Channel::new(0);

/// Enabled flag changed; effective enablement is recomputed for descendants.
pub const ENABLED: Channel = Channel::new(1);

/// Children were inserted or removed.
pub const TOPOLOGY: Channel = Channel::new(2);
