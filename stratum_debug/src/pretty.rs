// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Mutation
//! lists are written one mutation per line, indented under their transaction.

use std::io::Write;

use stratum_core::mutation::ShadowViewMutation;
use stratum_core::trace::{DiffBeginEvent, DiffEndEvent, LevelEvent, TraceSink, TransactionEvent};
use stratum_core::view::ShadowView;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    levels: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("levels", &self.levels)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    ///
    /// Per-level events are skipped; see [`with_levels`](Self::with_levels).
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            levels: false,
        }
    }

    /// Also prints one line per diffed level.
    #[must_use]
    pub fn with_levels(mut self) -> Self {
        self.levels = true;
        self
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn describe(view: &ShadowView) -> String {
    format!("{}#{}", view.component, view.tag)
}

/// Formats a single mutation as it appears in pretty-printed output.
#[must_use]
pub fn format_mutation(mutation: &ShadowViewMutation) -> String {
    match mutation {
        ShadowViewMutation::Create { view } => format!("create {}", describe(view)),
        ShadowViewMutation::Delete { view } => format!("delete {}", describe(view)),
        ShadowViewMutation::Insert {
            parent,
            view,
            index,
        } => format!("insert {} into {}[{index}]", describe(view), describe(parent)),
        ShadowViewMutation::Remove {
            parent,
            view,
            index,
        } => format!("remove {} from {}[{index}]", describe(view), describe(parent)),
        ShadowViewMutation::Update {
            parent,
            old,
            new,
            index,
        } => {
            let mut line = if parent.is_none() {
                format!("update {} (root)", describe(new))
            } else {
                format!("update {} in {}[{index}]", describe(new), describe(parent))
            };
            if old.props != new.props {
                line.push_str(&format!(" props {:?}->{:?}", old.props, new.props));
            }
            if old.state != new.state {
                line.push_str(&format!(" state {:?}->{:?}", old.state, new.state));
            }
            if old.layout != new.layout {
                line.push_str(" layout");
            }
            line
        }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_diff_begin(&mut self, e: &DiffBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[diff:begin] root={} children {}->{}",
            e.root_tag, e.old_children, e.new_children,
        );
    }

    fn on_diff_end(&mut self, e: &DiffEndEvent) {
        let s = &e.stats;
        let _ = writeln!(
            self.writer,
            "[diff:end] root={} depth={} create={} delete={} insert={} remove={} update={}",
            e.root_tag, e.max_depth, s.creates, s.deletes, s.inserts, s.removes, s.updates,
        );
    }

    fn on_transaction(&mut self, e: &TransactionEvent) {
        let _ = writeln!(
            self.writer,
            "[transaction] #{} root={} mutations={}",
            e.number, e.root_tag, e.mutation_count,
        );
    }

    fn on_level(&mut self, e: &LevelEvent) {
        if !self.levels {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[level] parent={} depth={} {}->{} prefix={}",
            e.parent_tag, e.depth, e.old_len, e.new_len, e.matched_prefix,
        );
    }

    fn on_mutations(&mut self, number: u64, mutations: &[ShadowViewMutation]) {
        for (n, mutation) in mutations.iter().enumerate() {
            let _ = writeln!(self.writer, "  #{number}.{n} {}", format_mutation(mutation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_core::diff::DiffStats;
    use stratum_core::mutation::NO_INDEX;
    use stratum_core::view::PropsRevision;

    fn view(tag: u32) -> ShadowView {
        ShadowView {
            tag,
            component: "View",
            ..ShadowView::NONE
        }
    }

    #[test]
    fn pretty_print_diff_end() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_diff_end(&DiffEndEvent {
            root_tag: 1,
            stats: DiffStats {
                creates: 2,
                inserts: 2,
                ..DiffStats::default()
            },
            max_depth: 3,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.starts_with("[diff:end]"), "got: {output}");
        assert!(output.contains("create=2"), "got: {output}");
        assert!(output.contains("depth=3"), "got: {output}");
    }

    #[test]
    fn levels_are_opt_in() {
        let level = LevelEvent {
            parent_tag: 1,
            depth: 1,
            old_len: 2,
            new_len: 3,
            matched_prefix: 2,
        };

        let mut quiet = PrettyPrintSink::with_writer(Vec::<u8>::new());
        quiet.on_level(&level);
        assert!(quiet.into_inner().is_empty());

        let mut loud = PrettyPrintSink::with_writer(Vec::<u8>::new()).with_levels();
        loud.on_level(&level);
        let output = String::from_utf8(loud.into_inner()).unwrap();
        assert!(output.contains("prefix=2"), "got: {output}");
    }

    #[test]
    fn mutations_are_listed_one_per_line() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_mutations(
            4,
            &[
                ShadowViewMutation::create(view(2)),
                ShadowViewMutation::insert(view(1), view(2), 0),
            ],
        );
        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, ["  #4.0 create View#2", "  #4.1 insert View#2 into View#1[0]"]);
    }

    #[test]
    fn root_update_lists_what_changed() {
        let old = view(1);
        let new = ShadowView {
            props: PropsRevision(2),
            ..old
        };
        let line = format_mutation(&ShadowViewMutation::update(
            ShadowView::NONE,
            old,
            new,
            NO_INDEX,
        ));
        assert!(line.starts_with("update View#1 (root)"), "got: {line}");
        assert!(line.contains("props"), "got: {line}");
        assert!(!line.contains("layout"), "got: {line}");
    }
}
