// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The view tree uses multi-channel dirty tracking (via [`understory_dirty`])
//! so that a tick only touches the views a transaction actually changed.
//!
//! - **Propagating** — [`LAYOUT`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and has dependency edges
//!   from child to parent. Absolute origins are inherited, so a frame change
//!   or a layout request on a view marks its whole subtree.
//! - **Local-only** — [`PROPS`] is marked with the default policy when a
//!   view's snapshot changes. Only that view is reported.
//! - **Structural** — [`TOPOLOGY`] is marked on create, delete, insert, and
//!   remove. It triggers a traversal-order rebuild but does not propagate.
//!
//! Callers never query dirty state directly: each
//! [`ViewTree::evaluate`](crate::tree::ViewTree::evaluate) drains all channels
//! into [`MountChanges`](crate::tree::MountChanges).

use understory_dirty::Channel;

/// Props, state, or component changed.
pub const PROPS: Channel = Channel::new(0);

/// Frame changed or layout requested; requires absolute origin
/// recomputation for descendants.
pub const LAYOUT: Channel = Channel::new(1);

/// Tree topology changed; triggers traversal order rebuild.
pub const TOPOLOGY: Channel = Channel::new(2);
