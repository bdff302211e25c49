// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated commit-and-mount loop that exercises the diagnostics pipeline.
//!
//! Commits a short sequence of revisions of a small inbox screen, mounts each
//! through a [`MountingCoordinator`] into a [`ViewTree`], evaluates the tree,
//! and hands the changes to a presenter that logs what a native view tree
//! would have to do. Events go to both a
//! [`PrettyPrintSink`](stratum_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](stratum_debug::recorder::RecorderSink); the recording is
//! exported as a Chrome trace JSON file at the end.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use kurbo::Rect;
use stratum_core::coordinator::MountingCoordinator;
use stratum_core::diff::DiffStats;
use stratum_core::mounting::{MountingLayer, PreallocationDelegate, dispatch_preallocations};
use stratum_core::mutation::ShadowViewMutation;
use stratum_core::node::{Node, ShadowNode};
use stratum_core::text::{TextAttributes, attributed_string};
use stratum_core::trace::{
    DiffBeginEvent, DiffEndEvent, LevelEvent, TraceSink, Tracer, TransactionEvent,
};
use stratum_core::view::{PropsRevision, ShadowView};
use stratum_mount::presenter::Presenter;
use stratum_mount::tree::{MountChanges, ViewTree};

use stratum_debug::pretty::PrettyPrintSink;
use stratum_debug::recorder::RecorderSink;

const ROOT: u32 = 1;
const TITLE: u32 = 2;
const LIST: u32 = 3;
const BADGE_WRAPPER: u32 = 4;
const BADGE: u32 = 5;
const FIRST_ROW: u32 = 100;
const ROW_HEIGHT: f64 = 48.0;

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout())).with_levels();
    let mut recorder = RecorderSink::new();

    // -- mounting ----------------------------------------------------------
    let surface = Node::builder(ROOT, "Root")
        .frame(Rect::new(0.0, 0.0, 360.0, 640.0))
        .build();
    let mut coordinator = MountingCoordinator::new(Arc::clone(&surface));
    let mut tree = ViewTree::new(surface.shadow_view());
    let mut pool = ViewPool::default();
    let mut presenter = LogPresenter;

    // -- simulated commits -------------------------------------------------
    let commits = [
        screen(&[0, 1, 2, 3], 3, 0),
        // Mark row 1 read: a props-only update.
        screen(&[0, 1, 2, 3], 2, 1),
        // A new message arrives on top; everything below moves down.
        screen(&[4, 0, 1, 2, 3], 3, 1),
        // Archive row 2 and swap rows 0 and 3.
        screen(&[4, 3, 1, 0], 3, 1),
        // Rebuilt but unchanged: the transaction is empty.
        screen(&[4, 3, 1, 0], 3, 1),
    ];

    for (frame_index, revision) in commits.into_iter().enumerate() {
        println!("-- frame {frame_index} --");
        coordinator.push(revision);

        let mut tee = Tee {
            a: &mut pretty,
            b: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut tee);
        if let Some(transaction) = coordinator.pull_transaction(&mut tracer) {
            let warmed = dispatch_preallocations(&transaction.mutations, &mut pool);
            println!("preallocated {warmed} views");
            tree.apply(&transaction);
            report(&transaction.stats);
        }

        let changes = tree.evaluate();
        presenter.apply(&tree, &changes);
    }

    // Recommitting the mounted revision itself produces no transaction.
    coordinator.push(Arc::clone(coordinator.revision()));
    assert!(
        coordinator.pull_transaction(&mut Tracer::none()).is_none(),
        "recommitting the mounted revision must not produce a transaction"
    );

    let title = attributed_string(&TextAttributes::default(), &*title_node(3));
    println!("title text: {:?}", title.string());
    println!("view classes: {:?}", pool.by_component);

    // -- export Chrome trace -----------------------------------------------
    let path = "diff_trace.json";
    let file = File::create(path).expect("failed to create diff_trace.json");
    let mut writer = BufWriter::new(file);
    stratum_debug::chrome::export(recorder.as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({} transactions)", coordinator.number());
}

/// Builds one revision of the inbox screen.
///
/// `rows` lists message ids in display order, `unread` sets the badge count,
/// and `read_mask` is a bitset of message ids that have been read.
fn screen(rows: &[u32], unread: u32, read_mask: u64) -> Arc<Node> {
    let list = Node::builder(LIST, "ScrollView")
        .frame(Rect::new(0.0, 64.0, 360.0, 640.0))
        .children(rows.iter().enumerate().map(|(position, &id)| {
            let y = f64::from(u32::try_from(position).unwrap_or(u32::MAX)) * ROW_HEIGHT;
            Node::builder(FIRST_ROW + id, "Row")
                .props((read_mask >> id) & 1)
                .frame(Rect::new(0.0, y, 360.0, y + ROW_HEIGHT))
                .build()
        }))
        .build();

    // The wrapper only positions the badge; the badge is mounted directly
    // under the root with the wrapper's offset folded into its frame.
    let badge = Node::builder(BADGE_WRAPPER, "View")
        .layout_only()
        .frame(Rect::new(300.0, 16.0, 344.0, 48.0))
        .child(
            Node::builder(BADGE, "Badge")
                .props(u64::from(unread))
                .order_index(1)
                .frame(Rect::new(0.0, 0.0, 32.0, 32.0))
                .build(),
        )
        .build();

    Node::builder(ROOT, "Root")
        .frame(Rect::new(0.0, 0.0, 360.0, 640.0))
        .child(title_node(unread))
        .child(list)
        .child(badge)
        .build()
}

fn title_node(unread: u32) -> Arc<Node> {
    let bold = TextAttributes {
        font_weight: Some(700),
        ..TextAttributes::default()
    };
    Node::builder(TITLE, "Paragraph")
        .props(u64::from(unread))
        .frame(Rect::new(16.0, 16.0, 280.0, 48.0))
        .child(Node::builder(20, "RawText").layout_only().raw_text("Inbox ").build())
        .child(
            Node::builder(21, "Span")
                .layout_only()
                .span(bold)
                .child(
                    Node::builder(22, "RawText")
                        .layout_only()
                        .raw_text(format!("({unread})"))
                        .build(),
                )
                .build(),
        )
        .build()
}

fn report(stats: &DiffStats) {
    println!(
        "applied {} mutations ({} created, {} deleted, {} moved or attached, {} updated)",
        stats.total(),
        stats.creates,
        stats.deletes,
        stats.inserts,
        stats.updates,
    );
}

/// Counts views a platform would instantiate ahead of time, per class.
#[derive(Debug, Default)]
struct ViewPool {
    by_component: BTreeMap<&'static str, u32>,
}

impl PreallocationDelegate for ViewPool {
    fn preallocate(&mut self, view: &ShadowView) {
        *self.by_component.entry(view.component).or_default() += 1;
    }
}

/// Logs the native operations a presenter would perform.
#[derive(Debug)]
struct LogPresenter;

impl Presenter for LogPresenter {
    fn apply(&mut self, tree: &ViewTree, changes: &MountChanges) {
        if changes.is_empty() {
            println!("present: nothing to do");
            return;
        }
        for tag in &changes.created {
            println!("present: instantiate native view {tag}");
        }
        for tag in &changes.deleted {
            println!("present: recycle native view {tag}");
        }
        for &idx in &changes.layout {
            let view = tree.view_at(idx);
            let origin = tree.absolute_origin_at(idx);
            println!(
                "present: place {}#{} at ({}, {})",
                view.component, view.tag, origin.x, origin.y
            );
        }
        for &idx in &changes.props {
            let view = tree.view_at(idx);
            if view.props != PropsRevision(0) {
                println!("present: restyle {}#{} ({:?})", view.component, view.tag, view.props);
            } else {
                println!("present: restyle {}#{}", view.component, view.tag);
            }
        }
        if changes.topology_changed {
            println!("present: reorder native children ({} views)", tree.len());
        }
    }
}

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_diff_begin(&mut self, e: &DiffBeginEvent) {
        self.a.on_diff_begin(e);
        self.b.on_diff_begin(e);
    }

    fn on_diff_end(&mut self, e: &DiffEndEvent) {
        self.a.on_diff_end(e);
        self.b.on_diff_end(e);
    }

    fn on_transaction(&mut self, e: &TransactionEvent) {
        self.a.on_transaction(e);
        self.b.on_transaction(e);
    }

    fn on_level(&mut self, e: &LevelEvent) {
        self.a.on_level(e);
        self.b.on_level(e);
    }

    fn on_mutations(&mut self, number: u64, mutations: &[ShadowViewMutation]) {
        self.a.on_mutations(number, mutations);
        self.b.on_mutations(number, mutations);
    }
}
