// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//! Each diff becomes a duration slice; transactions, levels, and mutation
//! counts become instant events.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Timestamps are microseconds since the recorder was created.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        let ts = nanos_to_us(recorded.elapsed_nanos);
        match recorded.event {
            RecordedEvent::DiffBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": "diff",
                    "cat": "Diff",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "root_tag": e.root_tag,
                        "old_children": e.old_children,
                        "new_children": e.new_children,
                    }
                }));
            }
            RecordedEvent::DiffEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": "diff",
                    "cat": "Diff",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "root_tag": e.root_tag,
                        "max_depth": e.max_depth,
                        "creates": e.stats.creates,
                        "deletes": e.stats.deletes,
                        "inserts": e.stats.inserts,
                        "removes": e.stats.removes,
                        "updates": e.stats.updates,
                    }
                }));
            }
            RecordedEvent::Transaction(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Transaction",
                    "cat": "Mounting",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "number": e.number,
                        "root_tag": e.root_tag,
                        "mutation_count": e.mutation_count,
                    }
                }));
            }
            RecordedEvent::Level(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Level",
                    "cat": "Rich",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "parent_tag": e.parent_tag,
                        "depth": e.depth,
                        "old_len": e.old_len,
                        "new_len": e.new_len,
                        "matched_prefix": e.matched_prefix,
                    }
                }));
            }
            RecordedEvent::MutationsCount { number, count } => {
                events.push(json!({
                    "ph": "i",
                    "name": "Mutations",
                    "cat": "Rich",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "number": number,
                        "count": count,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

#[expect(
    clippy::cast_precision_loss,
    reason = "trace timestamps tolerate rounding past 2^53 ns"
)]
fn nanos_to_us(nanos: u64) -> f64 {
    nanos as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use stratum_core::diff::DiffStats;
    use stratum_core::trace::{DiffBeginEvent, DiffEndEvent, TraceSink, TransactionEvent};

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_diff_begin(&DiffBeginEvent {
            root_tag: 1,
            old_children: 0,
            new_children: 2,
        });
        rec.on_diff_end(&DiffEndEvent {
            root_tag: 1,
            stats: DiffStats {
                creates: 2,
                inserts: 2,
                ..DiffStats::default()
            },
            max_depth: 1,
        });
        rec.on_transaction(&TransactionEvent {
            number: 1,
            root_tag: 1,
            mutation_count: 4,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["ph"], "B");
        assert_eq!(parsed[0]["name"], "diff");

        assert_eq!(parsed[1]["ph"], "E");
        assert_eq!(parsed[1]["args"]["creates"], 2);

        assert_eq!(parsed[2]["ph"], "i");
        assert_eq!(parsed[2]["name"], "Transaction");
        assert_eq!(parsed[2]["args"]["mutation_count"], 4);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
