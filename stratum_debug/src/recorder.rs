// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. Every record starts with a
//! one-byte discriminant and the nanoseconds elapsed since the recorder was
//! created. [`decode`] reads them back as an iterator of [`Recorded`] events.
//!
//! Mutation lists ([`on_mutations`](TraceSink::on_mutations)) store only the
//! count.

use std::time::Instant;

use stratum_core::diff::DiffStats;
use stratum_core::mutation::ShadowViewMutation;
use stratum_core::trace::{DiffBeginEvent, DiffEndEvent, LevelEvent, TraceSink, TransactionEvent};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_DIFF_BEGIN: u8 = 1;
const TAG_DIFF_END: u8 = 2;
const TAG_TRANSACTION: u8 = 3;
const TAG_LEVEL: u8 = 4;
const TAG_MUTATIONS_COUNT: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug)]
pub struct RecorderSink {
    buf: Vec<u8>,
    origin: Instant,
}

impl Default for RecorderSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecorderSink {
    /// Creates an empty recorder whose clock starts now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            origin: Instant::now(),
        }
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn begin_record(&mut self, tag: u8) {
        let elapsed = u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.write_u8(tag);
        self.write_u64(elapsed);
    }

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_stats(&mut self, s: &DiffStats) {
        self.write_u32(s.creates);
        self.write_u32(s.deletes);
        self.write_u32(s.inserts);
        self.write_u32(s.removes);
        self.write_u32(s.updates);
    }
}

impl TraceSink for RecorderSink {
    fn on_diff_begin(&mut self, e: &DiffBeginEvent) {
        self.begin_record(TAG_DIFF_BEGIN);
        self.write_u32(e.root_tag);
        self.write_u32(e.old_children);
        self.write_u32(e.new_children);
    }

    fn on_diff_end(&mut self, e: &DiffEndEvent) {
        self.begin_record(TAG_DIFF_END);
        self.write_u32(e.root_tag);
        self.write_stats(&e.stats);
        self.write_u32(e.max_depth);
    }

    fn on_transaction(&mut self, e: &TransactionEvent) {
        self.begin_record(TAG_TRANSACTION);
        self.write_u64(e.number);
        self.write_u32(e.root_tag);
        self.write_u32(e.mutation_count);
    }

    fn on_level(&mut self, e: &LevelEvent) {
        self.begin_record(TAG_LEVEL);
        self.write_u32(e.parent_tag);
        self.write_u32(e.depth);
        self.write_u32(e.old_len);
        self.write_u32(e.new_len);
        self.write_u32(e.matched_prefix);
    }

    fn on_mutations(&mut self, number: u64, mutations: &[ShadowViewMutation]) {
        self.begin_record(TAG_MUTATIONS_COUNT);
        self.write_u64(number);
        self.write_u32(u32::try_from(mutations.len()).unwrap_or(u32::MAX));
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`DiffBeginEvent`].
    DiffBegin(DiffBeginEvent),
    /// A [`DiffEndEvent`].
    DiffEnd(DiffEndEvent),
    /// A [`TransactionEvent`].
    Transaction(TransactionEvent),
    /// A [`LevelEvent`].
    Level(LevelEvent),
    /// Mutation count of a transaction.
    MutationsCount {
        /// Transaction number.
        number: u64,
        /// Number of mutations.
        count: u32,
    },
}

/// A decoded event together with its timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recorded {
    /// Nanoseconds since the recorder was created.
    pub elapsed_nanos: u64,
    /// The event.
    pub event: RecordedEvent,
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`Recorded`] events.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        let v = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_stats(&mut self) -> Option<DiffStats> {
        Some(DiffStats {
            creates: self.read_u32()?,
            deletes: self.read_u32()?,
            inserts: self.read_u32()?,
            removes: self.read_u32()?,
            updates: self.read_u32()?,
        })
    }

    fn decode_diff_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DiffBegin(DiffBeginEvent {
            root_tag: self.read_u32()?,
            old_children: self.read_u32()?,
            new_children: self.read_u32()?,
        }))
    }

    fn decode_diff_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DiffEnd(DiffEndEvent {
            root_tag: self.read_u32()?,
            stats: self.read_stats()?,
            max_depth: self.read_u32()?,
        }))
    }

    fn decode_transaction(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Transaction(TransactionEvent {
            number: self.read_u64()?,
            root_tag: self.read_u32()?,
            mutation_count: self.read_u32()?,
        }))
    }

    fn decode_level(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Level(LevelEvent {
            parent_tag: self.read_u32()?,
            depth: self.read_u32()?,
            old_len: self.read_u32()?,
            new_len: self.read_u32()?,
            matched_prefix: self.read_u32()?,
        }))
    }

    fn decode_mutations_count(&mut self) -> Option<RecordedEvent> {
        let number = self.read_u64()?;
        let count = self.read_u32()?;
        Some(RecordedEvent::MutationsCount { number, count })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = Recorded;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        let elapsed_nanos = self.read_u64()?;
        let event = match tag {
            TAG_DIFF_BEGIN => self.decode_diff_begin(),
            TAG_DIFF_END => self.decode_diff_end(),
            TAG_TRANSACTION => self.decode_transaction(),
            TAG_LEVEL => self.decode_level(),
            TAG_MUTATIONS_COUNT => self.decode_mutations_count(),
            _ => None, // unknown tag → stop iteration
        }?;
        Some(Recorded {
            elapsed_nanos,
            event,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
