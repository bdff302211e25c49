// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Materialized view tree.
//!
//! A *mounted view* is the platform-side counterpart of a [`ShadowView`]. Each
//! mounted view has:
//!
//! - An identity: its [`Tag`], and a [`ViewId`] — a generational handle that
//!   becomes stale when the view is deleted and its slot reused.
//! - Topology — parent, first-child, and sibling links forming an ordered tree.
//! - The last [`ShadowView`] snapshot it was created, inserted, or updated
//!   with.
//! - A **computed** absolute origin produced by
//!   [`evaluate`](ViewTree::evaluate): the sum of the frame origins along its
//!   ancestor chain.
//!
//! Views are stored in struct-of-arrays layout with index-based handles.
//!
//! # Dirty tracking
//!
//! Replayed mutations mark the corresponding channel (see
//! [`dirty`](crate::dirty)):
//!
//! - **LAYOUT** — frame changes, attachment changes, and explicit
//!   [`request_layout`](ViewTree::request_layout) calls; propagates to all
//!   descendants.
//! - **PROPS** — any other snapshot change; local-only.
//! - **TOPOLOGY** — create, delete, insert, and remove.
//!
//! [`ShadowView`]: stratum_core::view::ShadowView
//! [`Tag`]: stratum_core::node::Tag

mod apply;
mod evaluate;
mod id;
mod store;
mod traverse;

pub use evaluate::MountChanges;
pub use id::{INVALID, ViewId};
pub use store::ViewTree;
pub use traverse::Children;
