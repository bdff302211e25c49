// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference mounting layer for `stratum_core` mutation lists.
//!
//! `stratum_mount` replays [`ShadowViewMutation`]s into a [`ViewTree`]: a
//! materialized view hierarchy with strict consistency checks. It is the
//! executable statement of the mounting contract, and doubles as a test
//! oracle: applying `diff(old, new)` to the materialization of `old` must
//! yield the materialization of `new`.
//!
//! # Frame loop
//!
//! ```text
//!   MountingCoordinator::pull_transaction()
//!                │
//!                ▼
//!   ViewTree::apply()          ◄── request_layout(tag) at any time
//!                │
//!                ▼   (on tick)
//!   ViewTree::evaluate() ──► MountChanges ──► Presenter::apply()
//! ```
//!
//! **[`tree`]** — [`ViewTree`] storage with generational [`ViewId`] handles,
//! mutation replay, and tick evaluation.
//!
//! **[`dirty`]** — Dirty-tracking channels used by the tree.
//!
//! **[`error`]** — [`MountError`], the typed replay failures.
//!
//! **[`presenter`]** — The [`Presenter`] contract for platform trees.
//!
//! **[`snapshot`]** — Comparable descriptions of mounted and shadow trees.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//!
//! [`ShadowViewMutation`]: stratum_core::mutation::ShadowViewMutation
//! [`ViewTree`]: tree::ViewTree
//! [`ViewId`]: tree::ViewId
//! [`MountError`]: error::MountError
//! [`Presenter`]: presenter::Presenter

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
pub mod error;
pub mod presenter;
pub mod snapshot;
pub mod tree;
