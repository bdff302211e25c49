// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree differentiator.
//!
//! [`diff`] compares two revisions of the same root and returns the mutations
//! that turn the mounted view hierarchy of the old revision into the one of
//! the new revision. Every level of the tree is diffed independently over the
//! *sliced* children of both sides (see [`slice`](crate::slice)).
//!
//! Per level, mutations are collected into seven buckets and concatenated in
//! an order that is always safe to apply:
//!
//! 1. destructive-downward (subtree teardown and children of views whose new
//!    revision has no children),
//! 2. updates,
//! 3. removes, in reverse index order,
//! 4. deletes,
//! 5. creates,
//! 6. downward (children of kept, moved, and created views),
//! 7. inserts, in index order.
//!
//! The algorithm optimizes for simplicity, not for a minimal result: a view
//! that keeps its tag but moves is removed and inserted again rather than
//! updated in place.

use alloc::vec::Vec;

use crate::mutation::{MutationList, NO_INDEX, ShadowViewMutation, list_index};
use crate::node::ShadowNode;
use crate::slice::{reorder_in_place_if_needed, slice_child_pairs};
use crate::tiny_map::TinyMap;
use crate::trace::{DiffBeginEvent, DiffEndEvent, Tracer};
use crate::view::{PairList, ShadowView};

/// Initial capacity of the top-level mutation list.
const INITIAL_MUTATION_CAPACITY: usize = 256;

/// Configuration for [`diff_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffOptions {
    /// Maximum number of nested levels below the root. The root's sliced
    /// children are level 1.
    pub max_depth: u32,
}

impl DiffOptions {
    /// Default depth limit.
    pub const DEFAULT_MAX_DEPTH: u32 = 512;

    /// Creates options with the given depth limit.
    #[must_use]
    pub const fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DEPTH)
    }
}

/// Mutation counts by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Number of `Create` mutations.
    pub creates: u32,
    /// Number of `Delete` mutations.
    pub deletes: u32,
    /// Number of `Insert` mutations.
    pub inserts: u32,
    /// Number of `Remove` mutations.
    pub removes: u32,
    /// Number of `Update` mutations.
    pub updates: u32,
}

impl DiffStats {
    /// Counts the mutations of `mutations` by kind.
    #[must_use]
    pub fn from_mutations(mutations: &[ShadowViewMutation]) -> Self {
        let mut stats = Self::default();
        for mutation in mutations {
            let counter = match mutation {
                ShadowViewMutation::Create { .. } => &mut stats.creates,
                ShadowViewMutation::Delete { .. } => &mut stats.deletes,
                ShadowViewMutation::Insert { .. } => &mut stats.inserts,
                ShadowViewMutation::Remove { .. } => &mut stats.removes,
                ShadowViewMutation::Update { .. } => &mut stats.updates,
            };
            *counter = counter.saturating_add(1);
        }
        stats
    }

    /// Total number of mutations.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.creates
            .saturating_add(self.deletes)
            .saturating_add(self.inserts)
            .saturating_add(self.removes)
            .saturating_add(self.updates)
    }
}

/// Computes the mutations between two revisions of the same root with default
/// options and no tracing.
///
/// # Panics
///
/// Panics if the roots do not belong to the same family, or if the trees are
/// nested deeper than [`DiffOptions::DEFAULT_MAX_DEPTH`].
#[must_use]
pub fn diff<N: ShadowNode>(old_root: &N, new_root: &N) -> MutationList {
    diff_with(old_root, new_root, &DiffOptions::default(), &mut Tracer::none())
}

/// Computes the mutations between two revisions of the same root.
///
/// # Panics
///
/// Panics if the roots do not belong to the same family, or if the trees are
/// nested deeper than `options.max_depth`.
#[must_use]
pub fn diff_with<N: ShadowNode>(
    old_root: &N,
    new_root: &N,
    options: &DiffOptions,
    tracer: &mut Tracer<'_>,
) -> MutationList {
    assert!(
        old_root.same_family(new_root),
        "root shadow nodes must belong to the same family"
    );

    let mut mutations = MutationList::with_capacity(INITIAL_MUTATION_CAPACITY);

    let old_view = old_root.shadow_view();
    let new_view = new_root.shadow_view();
    if old_view != new_view {
        mutations.push(ShadowViewMutation::update(
            ShadowView::NONE,
            old_view,
            new_view,
            NO_INDEX,
        ));
    }

    let old_pairs = slice_child_pairs(old_root);
    let new_pairs = slice_child_pairs(new_root);

    tracer.diff_begin(&DiffBeginEvent {
        root_tag: new_view.tag,
        old_children: count(old_pairs.len()),
        new_children: count(new_pairs.len()),
    });

    let mut differ = Differ {
        options,
        tracer: &mut *tracer,
        deepest: 0,
    };
    differ.diff_children(&mut mutations, &old_view, old_pairs, new_pairs, 1);
    let deepest = differ.deepest;

    tracer.diff_end(&DiffEndEvent {
        root_tag: new_view.tag,
        stats: DiffStats::from_mutations(&mutations),
        max_depth: deepest,
    });

    mutations
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Per-call state shared by every level of one diff.
struct Differ<'o, 't, 'a> {
    options: &'o DiffOptions,
    tracer: &'t mut Tracer<'a>,
    deepest: u32,
}

impl Differ<'_, '_, '_> {
    /// Diffs the grandchildren of a matched pair, routing the result into
    /// `downward` if the new side still has children and into
    /// `destructive` otherwise.
    fn diff_matched<N: ShadowNode>(
        &mut self,
        downward: &mut MutationList,
        destructive: &mut MutationList,
        parent: &ShadowView,
        old_node: &N,
        new_node: &N,
        depth: u32,
    ) {
        let old_grandchildren = slice_child_pairs(old_node);
        let new_grandchildren = slice_child_pairs(new_node);
        let out = if new_grandchildren.is_empty() {
            destructive
        } else {
            downward
        };
        self.diff_children(out, parent, old_grandchildren, new_grandchildren, depth);
    }

    fn diff_children<N: ShadowNode>(
        &mut self,
        mutations: &mut MutationList,
        parent: &ShadowView,
        mut old_pairs: PairList<'_, N>,
        mut new_pairs: PairList<'_, N>,
        depth: u32,
    ) {
        if old_pairs.is_empty() && new_pairs.is_empty() {
            return;
        }

        assert!(
            depth <= self.options.max_depth,
            "shadow tree is nested deeper than the limit of {} levels",
            self.options.max_depth
        );
        self.deepest = self.deepest.max(depth);

        reorder_in_place_if_needed(&mut old_pairs);
        reorder_in_place_if_needed(&mut new_pairs);

        if cfg!(debug_assertions) {
            debug_assert_unique_tags(&old_pairs);
            debug_assert_unique_tags(&new_pairs);
        }

        let mut creates = MutationList::new();
        let mut deletes = MutationList::new();
        let mut inserts = MutationList::new();
        let mut removes = MutationList::new();
        let mut updates = MutationList::new();
        let mut downward = MutationList::new();
        let mut destructive = MutationList::new();

        // Maps tags of inserted views to their position in `new_pairs`.
        let mut inserted: TinyMap<usize> = TinyMap::new();

        let next_depth = depth.saturating_add(1);

        // Matched prefix: same tag at the same position.
        let prefix = old_pairs
            .iter()
            .zip(new_pairs.iter())
            .take_while(|(old, new)| old.view.tag == new.view.tag)
            .count();

        // Levels are reported before any of their descendants.
        #[cfg(feature = "trace-rich")]
        self.tracer.level(&crate::trace::LevelEvent {
            parent_tag: parent.tag,
            depth,
            old_len: count(old_pairs.len()),
            new_len: count(new_pairs.len()),
            matched_prefix: count(prefix),
        });

        let matched = old_pairs.iter().zip(new_pairs.iter()).take(prefix);
        for (index, (old, new)) in matched.enumerate() {
            if old.view != new.view {
                updates.push(ShadowViewMutation::update(
                    *parent,
                    old.view,
                    new.view,
                    list_index(index),
                ));
            }

            self.diff_matched(
                &mut downward,
                &mut destructive,
                &old.view,
                old.node,
                new.node,
                next_depth,
            );
        }

        for (index, new) in new_pairs.iter().enumerate().skip(prefix) {
            inserts.push(ShadowViewMutation::insert(
                *parent,
                new.view,
                list_index(index),
            ));
            inserted.insert(new.view.tag, index);
        }

        for (index, old) in old_pairs.iter().enumerate().skip(prefix) {
            // A reinserted view is still detached from its old position.
            removes.push(ShadowViewMutation::remove(
                *parent,
                old.view,
                list_index(index),
            ));

            match inserted.find(old.view.tag) {
                None => {
                    deletes.push(ShadowViewMutation::delete(old.view));
                    self.diff_children(
                        &mut destructive,
                        &old.view,
                        slice_child_pairs(old.node),
                        PairList::new(),
                        next_depth,
                    );
                }
                Some(slot) => {
                    let new = &new_pairs[*inserted.value(slot)];
                    if new != old {
                        self.diff_matched(
                            &mut downward,
                            &mut destructive,
                            &new.view,
                            old.node,
                            new.node,
                            next_depth,
                        );
                    }
                    // The view existed before, so it must not be created.
                    inserted.erase(slot);
                }
            }
        }

        for new in new_pairs.iter().skip(prefix) {
            if !inserted.contains_key(new.view.tag) {
                continue;
            }

            creates.push(ShadowViewMutation::create(new.view));
            self.diff_children(
                &mut downward,
                &new.view,
                PairList::new(),
                slice_child_pairs(new.node),
                next_depth,
            );
        }

        mutations.reserve(
            destructive.len()
                + updates.len()
                + removes.len()
                + deletes.len()
                + creates.len()
                + downward.len()
                + inserts.len(),
        );
        mutations.append(&mut destructive);
        mutations.append(&mut updates);
        mutations.extend(removes.into_iter().rev());
        mutations.append(&mut deletes);
        mutations.append(&mut creates);
        mutations.append(&mut downward);
        mutations.append(&mut inserts);
    }
}

fn debug_assert_unique_tags<N: ShadowNode>(pairs: &PairList<'_, N>) {
    let mut seen = alloc::collections::BTreeSet::new();
    for pair in pairs {
        let first = seen.insert(pair.view.tag);
        debug_assert!(
            first,
            "tag {} appears twice in one paint layer",
            pair.view.tag
        );
    }
}

/// Returns `true` if `mutations` deletes every view it removes without
/// inserting it again, and never inserts a view twice.
///
/// This is a cheap structural sanity check for tests and debug tooling; it
/// does not replay the list.
#[must_use]
pub fn is_balanced(mutations: &[ShadowViewMutation]) -> bool {
    let mut detached = Vec::new();
    let mut inserted = Vec::new();
    for mutation in mutations {
        match mutation {
            ShadowViewMutation::Remove { view, .. } => detached.push(view.tag),
            ShadowViewMutation::Insert { view, .. } => {
                if inserted.contains(&view.tag) {
                    return false;
                }
                inserted.push(view.tag);
                detached.retain(|tag| *tag != view.tag);
            }
            ShadowViewMutation::Delete { view } => detached.retain(|tag| *tag != view.tag),
            ShadowViewMutation::Create { .. } | ShadowViewMutation::Update { .. } => {}
        }
    }
    detached.is_empty()
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::{Point, Rect};

    use super::*;
    use crate::mutation::MutationKind::{self, Create, Delete, Insert, Remove, Update};
    use crate::node::{Node, Tag};
    use crate::view::PropsRevision;

    fn view(tag: Tag) -> Arc<Node> {
        Node::builder(tag, "View").build()
    }

    fn root(children: Vec<Arc<Node>>) -> Arc<Node> {
        Node::builder(1, "Root").children(children).build()
    }

    fn summary(mutations: &[ShadowViewMutation]) -> Vec<(MutationKind, Tag, i32)> {
        mutations
            .iter()
            .map(|m| (m.kind(), m.tag(), m.index()))
            .collect()
    }

    #[test]
    fn identical_trees_produce_nothing() {
        let tree = root(vec![
            view(2),
            Node::builder(3, "View").child(view(4)).build(),
        ]);
        assert!(diff(&*tree, &*tree).is_empty());

        // Equal content in distinct allocations is also a no-op.
        let rebuilt = root(vec![
            view(2),
            Node::builder(3, "View").child(view(4)).build(),
        ]);
        assert!(diff(&*tree, &*rebuilt).is_empty());
    }

    #[test]
    fn appearing_child_is_created_then_inserted() {
        let old = root(vec![]);
        let new = root(vec![view(2)]);

        let mutations = diff(&*old, &*new);
        assert_eq!(summary(&mutations), [(Create, 2, -1), (Insert, 2, 0)]);
        match mutations[1] {
            ShadowViewMutation::Insert { parent, .. } => assert_eq!(parent.tag, 1),
            _ => panic!("expected an insert"),
        }
    }

    #[test]
    fn disappearing_child_is_removed_then_deleted() {
        let old = root(vec![view(2)]);
        let new = root(vec![]);

        assert_eq!(
            summary(&diff(&*old, &*new)),
            [(Remove, 2, 0), (Delete, 2, -1)]
        );
    }

    #[test]
    fn changed_props_update_in_place() {
        let child = view(2);
        let old = root(vec![Arc::clone(&child)]);
        let new = root(vec![child.with_props(PropsRevision(2))]);

        let mutations = diff(&*old, &*new);
        assert_eq!(summary(&mutations), [(Update, 2, 0)]);
        match mutations[0] {
            ShadowViewMutation::Update { old, new, parent, .. } => {
                assert_eq!(parent.tag, 1);
                assert_eq!(old.props, PropsRevision(0));
                assert_eq!(new.props, PropsRevision(2));
            }
            _ => panic!("expected an update"),
        }
    }

    #[test]
    fn root_change_uses_sentinel_parent() {
        let old = root(vec![]);
        let new = old.with_props(PropsRevision(9));

        let mutations = diff(&*old, &*new);
        assert_eq!(summary(&mutations), [(Update, 1, NO_INDEX)]);
        assert!(mutations[0].parent().is_some_and(ShadowView::is_none));
    }

    #[test]
    fn reorder_removes_and_reinserts() {
        let (a, b, c) = (view(2), view(3), view(4));
        let old = root(vec![Arc::clone(&a), Arc::clone(&b), Arc::clone(&c)]);
        let new = root(vec![c, a, b]);

        assert_eq!(
            summary(&diff(&*old, &*new)),
            [
                (Remove, 4, 2),
                (Remove, 3, 1),
                (Remove, 2, 0),
                (Insert, 4, 0),
                (Insert, 2, 1),
                (Insert, 3, 2),
            ]
        );
    }

    #[test]
    fn moved_view_carries_its_new_props() {
        let a = view(2);
        let b = view(3);
        let old = root(vec![Arc::clone(&a), Arc::clone(&b)]);
        let new = root(vec![b, a.with_props(PropsRevision(2))]);

        let mutations = diff(&*old, &*new);
        assert_eq!(
            summary(&mutations),
            [(Remove, 3, 1), (Remove, 2, 0), (Insert, 3, 0), (Insert, 2, 1)]
        );
        let props_of = |kind: MutationKind| {
            mutations.iter().find_map(|m| match m {
                ShadowViewMutation::Insert { view, .. } if kind == Insert && view.tag == 2 => {
                    Some(view.props)
                }
                ShadowViewMutation::Remove { view, .. } if kind == Remove && view.tag == 2 => {
                    Some(view.props)
                }
                _ => None,
            })
        };
        assert_eq!(props_of(Remove), Some(PropsRevision(0)));
        assert_eq!(props_of(Insert), Some(PropsRevision(2)));
    }

    #[test]
    fn buckets_follow_the_safe_order() {
        let a = view(2);
        let old = root(vec![Arc::clone(&a), view(3)]);
        let new = root(vec![a.with_props(PropsRevision(1)), view(4)]);

        assert_eq!(
            summary(&diff(&*old, &*new)),
            [
                (Update, 2, 0),
                (Remove, 3, 1),
                (Delete, 3, -1),
                (Create, 4, -1),
                (Insert, 4, 1),
            ]
        );
    }

    #[test]
    fn order_index_decides_diff_order() {
        let old = root(vec![]);
        let new = root(vec![
            Node::builder(2, "View").order_index(2).build(),
            Node::builder(3, "View").order_index(1).build(),
        ]);

        assert_eq!(
            summary(&diff(&*old, &*new)),
            [(Create, 3, -1), (Create, 2, -1), (Insert, 3, 0), (Insert, 2, 1)]
        );
        assert!(diff(&*new, &*new).is_empty());
    }

    #[test]
    fn subtree_deletion_deletes_descendants_first() {
        let chain = Node::builder(2, "View")
            .child(Node::builder(3, "View").child(view(4)).build())
            .build();
        let old = root(vec![chain]);
        let new = root(vec![]);

        let mutations = diff(&*old, &*new);
        assert_eq!(
            summary(&mutations),
            [
                (Remove, 4, 0),
                (Delete, 4, -1),
                (Remove, 3, 0),
                (Delete, 3, -1),
                (Remove, 2, 0),
                (Delete, 2, -1),
            ]
        );
        assert!(is_balanced(&mutations));
    }

    #[test]
    fn created_subtree_is_built_before_it_is_attached() {
        let old = root(vec![]);
        let new = root(vec![Node::builder(2, "View").child(view(3)).build()]);

        assert_eq!(
            summary(&diff(&*old, &*new)),
            [(Create, 2, -1), (Create, 3, -1), (Insert, 3, 0), (Insert, 2, 0)]
        );
    }

    #[test]
    fn moved_view_with_new_children_is_diffed_below() {
        let a = Node::builder(2, "View").child(view(10)).build();
        let b = view(3);
        let old = root(vec![Arc::clone(&a), Arc::clone(&b)]);
        let new = root(vec![b, a.with_children(vec![view(11)])]);

        let mutations = diff(&*old, &*new);
        assert_eq!(
            summary(&mutations),
            [
                (Remove, 3, 1),
                (Remove, 2, 0),
                (Remove, 10, 0),
                (Delete, 10, -1),
                (Create, 11, -1),
                (Insert, 11, 0),
                (Insert, 3, 0),
                (Insert, 2, 1),
            ]
        );
        assert!(is_balanced(&mutations));
    }

    #[test]
    fn children_of_emptied_view_are_torn_down_first() {
        let a = Node::builder(2, "View").child(view(10)).build();
        let old = root(vec![Arc::clone(&a), view(3)]);
        let new = root(vec![a.with_children(vec![]), view(4)]);

        assert_eq!(
            summary(&diff(&*old, &*new)),
            [
                (Remove, 10, 0),
                (Delete, 10, -1),
                (Remove, 3, 1),
                (Delete, 3, -1),
                (Create, 4, -1),
                (Insert, 4, 1),
            ]
        );
    }

    #[test]
    fn flattened_children_are_diffed_in_the_parent_layer() {
        let wrapper = Node::builder(5, "View")
            .layout_only()
            .frame(Rect::new(10.0, 20.0, 110.0, 120.0))
            .child(
                Node::builder(6, "View")
                    .frame(Rect::new(1.0, 2.0, 11.0, 12.0))
                    .build(),
            )
            .build();
        let old = root(vec![]);
        let new = root(vec![wrapper]);

        let mutations = diff(&*old, &*new);
        assert_eq!(summary(&mutations), [(Create, 6, -1), (Insert, 6, 0)]);
        match mutations[1] {
            ShadowViewMutation::Insert { parent, view, .. } => {
                assert_eq!(parent.tag, 1);
                assert_eq!(view.layout.frame.origin(), Point::new(11.0, 22.0));
            }
            _ => panic!("expected an insert"),
        }
    }

    #[test]
    fn moving_a_flattened_wrapper_updates_hoisted_frames() {
        let child = Node::builder(6, "View")
            .frame(Rect::new(0.0, 0.0, 10.0, 10.0))
            .build();
        let wrapper = Node::builder(5, "View")
            .layout_only()
            .child(child)
            .build();
        let old = root(vec![Arc::clone(&wrapper)]);
        let new = root(vec![wrapper.with_frame(Rect::new(5.0, 5.0, 50.0, 50.0))]);

        let mutations = diff(&*old, &*new);
        assert_eq!(summary(&mutations), [(Update, 6, 0)]);
    }

    #[test]
    fn stats_count_by_kind() {
        let old = root(vec![view(2), view(3)]);
        let new = root(vec![view(3), view(4)]);
        let stats = DiffStats::from_mutations(&diff(&*old, &*new));
        assert_eq!(stats.creates, 1);
        assert_eq!(stats.deletes, 1);
        assert_eq!(stats.removes, 2);
        assert_eq!(stats.inserts, 2);
        assert_eq!(stats.updates, 0);
        assert_eq!(stats.total(), 6);
    }

    #[test]
    fn depth_within_limit_is_accepted() {
        let chain = Node::builder(2, "View")
            .child(Node::builder(3, "View").child(view(4)).build())
            .build();
        let mutations = diff_with(
            &*root(vec![]),
            &*root(vec![chain]),
            &DiffOptions::new(3),
            &mut Tracer::none(),
        );
        assert_eq!(mutations.len(), 6);
    }

    #[test]
    #[should_panic(expected = "nested deeper than the limit of 2 levels")]
    fn depth_limit_is_enforced() {
        let chain = Node::builder(2, "View")
            .child(Node::builder(3, "View").child(view(4)).build())
            .build();
        let _ = diff_with(
            &*root(vec![]),
            &*root(vec![chain]),
            &DiffOptions::new(2),
            &mut Tracer::none(),
        );
    }

    #[test]
    #[should_panic(expected = "must belong to the same family")]
    fn roots_of_different_families_panic() {
        let _ = diff(&*view(1), &*view(2));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "appears twice")]
    fn duplicate_tags_are_caught_in_debug_builds() {
        let _ = diff(&*root(vec![]), &*root(vec![view(2), view(2)]));
    }

    #[test]
    fn unbalanced_lists_are_detected() {
        let v = view(2).shadow_view();
        let parent = view(1).shadow_view();
        assert!(!is_balanced(&[ShadowViewMutation::remove(parent, v, 0)]));
        assert!(is_balanced(&[
            ShadowViewMutation::remove(parent, v, 0),
            ShadowViewMutation::insert(parent, v, 1),
        ]));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn diff_reports_begin_and_end() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Sink {
            begin: Option<DiffBeginEvent>,
            end: Option<DiffEndEvent>,
        }
        impl TraceSink for Sink {
            fn on_diff_begin(&mut self, e: &DiffBeginEvent) {
                self.begin = Some(*e);
            }
            fn on_diff_end(&mut self, e: &DiffEndEvent) {
                self.end = Some(*e);
            }
        }

        let old = root(vec![view(2)]);
        let new = root(vec![Node::builder(3, "View").child(view(4)).build()]);
        let mut sink = Sink::default();
        let _ = diff_with(&*old, &*new, &DiffOptions::default(), &mut Tracer::new(&mut sink));

        let begin = sink.begin.unwrap();
        assert_eq!((begin.old_children, begin.new_children), (1, 1));
        let end = sink.end.unwrap();
        assert_eq!(end.root_tag, 1);
        assert_eq!(end.stats.creates, 2);
        assert_eq!(end.stats.deletes, 1);
        assert_eq!(end.max_depth, 2);
    }

    #[cfg(feature = "trace-rich")]
    #[test]
    fn levels_are_reported_parent_first() {
        use crate::trace::{LevelEvent, TraceSink};

        #[derive(Default)]
        struct Sink {
            levels: Vec<LevelEvent>,
        }
        impl TraceSink for Sink {
            fn on_level(&mut self, e: &LevelEvent) {
                self.levels.push(*e);
            }
        }

        let leaf = view(3);
        let a = Node::builder(2, "View").child(Arc::clone(&leaf)).build();
        let old = root(vec![Arc::clone(&a)]);
        let new = root(vec![a.with_children(vec![leaf, view(5)])]);
        let mut sink = Sink::default();
        let _ = diff_with(&*old, &*new, &DiffOptions::default(), &mut Tracer::new(&mut sink));

        let order: Vec<(Tag, u32, u32)> = sink
            .levels
            .iter()
            .map(|e| (e.parent_tag, e.depth, e.matched_prefix))
            .collect();
        assert_eq!(order, [(1, 1, 1), (2, 2, 1)]);
    }
}
