// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the reconciliation pipeline.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! differentiator and the mounting coordinator call at each stage. All method
//! bodies default to no-ops, so implementing only the events you care about is
//! fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates [`LevelEvent`] and per-transaction
//!   mutation lists plus the corresponding `TraceSink` methods.

use crate::diff::DiffStats;
#[cfg(feature = "trace-rich")]
use crate::mutation::ShadowViewMutation;
use crate::node::Tag;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a top-level diff starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffBeginEvent {
    /// Tag of the diffed root.
    pub root_tag: Tag,
    /// Number of sliced children of the old root.
    pub old_children: u32,
    /// Number of sliced children of the new root.
    pub new_children: u32,
}

/// Emitted when a top-level diff finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffEndEvent {
    /// Tag of the diffed root.
    pub root_tag: Tag,
    /// Mutation counts of the result.
    pub stats: DiffStats,
    /// Deepest level visited (the root's children are level 1).
    pub max_depth: u32,
}

/// Emitted when the mounting coordinator hands out a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransactionEvent {
    /// Transaction number.
    pub number: u64,
    /// Tag of the surface root.
    pub root_tag: Tag,
    /// Number of mutations in the transaction.
    pub mutation_count: u32,
}

/// Emitted once per diffed level (requires `trace-rich`).
///
/// A level is reported before the levels nested under it, so events arrive
/// in pre-order. Empty levels are not reported.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelEvent {
    /// Tag of the level's parent view.
    pub parent_tag: Tag,
    /// Depth of the level.
    pub depth: u32,
    /// Length of the old child list.
    pub old_len: u32,
    /// Length of the new child list.
    pub new_len: u32,
    /// Length of the matched prefix.
    pub matched_prefix: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the reconciliation pipeline.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a top-level diff starts.
    fn on_diff_begin(&mut self, e: &DiffBeginEvent) {
        _ = e;
    }

    /// Called when a top-level diff finishes.
    fn on_diff_end(&mut self, e: &DiffEndEvent) {
        _ = e;
    }

    /// Called when a transaction is handed out.
    fn on_transaction(&mut self, e: &TransactionEvent) {
        _ = e;
    }

    /// Called for every diffed level (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_level(&mut self, e: &LevelEvent) {
        _ = e;
    }

    /// Called with the mutations of a transaction (requires `trace-rich`
    /// feature).
    #[cfg(feature = "trace-rich")]
    fn on_mutations(&mut self, number: u64, mutations: &[ShadowViewMutation]) {
        _ = (number, mutations);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`DiffBeginEvent`].
    #[inline]
    pub fn diff_begin(&mut self, e: &DiffBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_diff_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DiffEndEvent`].
    #[inline]
    pub fn diff_end(&mut self, e: &DiffEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_diff_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransactionEvent`].
    #[inline]
    pub fn transaction(&mut self, e: &TransactionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transaction(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LevelEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn level(&mut self, e: &LevelEvent) {
        if let Some(s) = &mut self.sink {
            s.on_level(e);
        }
    }

    /// Emits the mutations of a transaction (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn mutations(&mut self, number: u64, mutations: &[ShadowViewMutation]) {
        if let Some(s) = &mut self.sink {
            s.on_mutations(number, mutations);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
