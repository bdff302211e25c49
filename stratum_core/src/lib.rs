// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shadow-tree reconciliation for retained UI scene graphs.
//!
//! `stratum_core` compares two immutable snapshots of a shadow tree and
//! produces the ordered list of view mutations that turns the previously
//! mounted view hierarchy into one consistent with the new snapshot. It is
//! `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   commit ──► MountingCoordinator::push(new_root)
//!                      │
//!                      ▼
//!   pull_transaction() ──► diff(base, new_root)
//!                             │
//!          ┌──────────────────┘
//!          ▼
//!   slice_child_pairs() per level ──► bucketed mutations ──► MutationList
//!                                                               │
//!                 ┌─────────────────────────────────────────────┘
//!                 ▼
//!   MountingLayer::apply()    PreallocationDelegate::preallocate()
//! ```
//!
//! **[`node`]** — The [`ShadowNode`](node::ShadowNode) contract consumed by the
//! differentiator, trait bits, and an owned [`Node`](node::Node)
//! implementation with copy-on-write revisions.
//!
//! **[`view`]** — [`ShadowView`](view::ShadowView) snapshots and
//! [`ShadowViewNodePair`](view::ShadowViewNodePair)s.
//!
//! **[`mutation`]** — The five mutation variants handed to mounting layers.
//!
//! **[`slice`]** — Flattening of layout-only nodes into the paint layer of the
//! nearest view-forming ancestor.
//!
//! **[`diff`]** — The recursive differentiator and its fixed bucket order.
//!
//! **[`tiny_map`]** — Linear-scan tag map used as per-level scratch space.
//!
//! **[`coordinator`]** — Turns committed roots into numbered transactions.
//!
//! **[`mounting`]** — Consumer contracts for mutation lists.
//!
//! **[`text`]** — Text capability query and attributed-string assembly.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! diff instrumentation, with zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-level and
//!   per-mutation events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod coordinator;
pub mod diff;
pub mod mounting;
pub mod mutation;
pub mod node;
pub mod slice;
pub mod text;
pub mod tiny_map;
pub mod trace;
pub mod view;
