// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turns committed roots into numbered mounting transactions.
//!
//! A [`MountingCoordinator`] owns the revision that is currently mounted (the
//! *base*) and at most one pending committed revision. Committing again
//! before the mounting layer pulls replaces the pending revision, so the
//! mounting layer always catches up with a single diff.
//!
//! ```text
//!   push(r1) ─► pending = r1
//!   push(r2) ─► pending = r2            (r1 is never mounted)
//!   pull     ─► diff(base, r2), base = r2, number += 1
//!   pull     ─► None
//! ```

use alloc::sync::Arc;

use crate::diff::{DiffOptions, DiffStats, diff_with};
use crate::mutation::MutationList;
use crate::node::ShadowNode;
use crate::trace::{TransactionEvent, Tracer};

/// A numbered batch of mutations for the mounting layer.
#[derive(Clone, Debug, PartialEq)]
pub struct MountingTransaction {
    /// Transaction number. The first transaction of a coordinator is `1`.
    pub number: u64,
    /// Mutations, to be applied in order.
    pub mutations: MutationList,
    /// Mutation counts by kind.
    pub stats: DiffStats,
}

/// Mediates between commits and the mounting layer for one surface.
#[derive(Debug)]
pub struct MountingCoordinator<N> {
    base: Arc<N>,
    pending: Option<Arc<N>>,
    number: u64,
    options: DiffOptions,
}

impl<N: ShadowNode> MountingCoordinator<N> {
    /// Creates a coordinator whose mounted revision is `base`.
    ///
    /// `base` is usually the empty root the surface starts with.
    #[must_use]
    pub fn new(base: Arc<N>) -> Self {
        Self::with_options(base, DiffOptions::default())
    }

    /// Creates a coordinator with explicit diff options.
    #[must_use]
    pub fn with_options(base: Arc<N>, options: DiffOptions) -> Self {
        Self {
            base,
            pending: None,
            number: 0,
            options,
        }
    }

    /// Records a committed root, replacing any revision not yet pulled.
    ///
    /// # Panics
    ///
    /// Panics if `root` does not belong to the same family as the mounted
    /// revision.
    pub fn push(&mut self, root: Arc<N>) {
        assert!(
            self.base.same_family(&root),
            "committed root must belong to the same family as the mounted root"
        );
        self.pending = Some(root);
    }

    /// Returns `true` if a committed revision waits to be pulled.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Diffs the mounted revision against the pending one and advances the
    /// mounted revision.
    ///
    /// Returns `None` if nothing is pending, or if the pending revision is the
    /// mounted revision itself.
    pub fn pull_transaction(&mut self, tracer: &mut Tracer<'_>) -> Option<MountingTransaction> {
        let next = self.pending.take()?;
        if Arc::ptr_eq(&self.base, &next) {
            return None;
        }

        let mutations = diff_with(&*self.base, &*next, &self.options, tracer);
        let stats = DiffStats::from_mutations(&mutations);

        self.number += 1;
        self.base = next;

        tracer.transaction(&TransactionEvent {
            number: self.number,
            root_tag: self.base.tag(),
            mutation_count: stats.total(),
        });
        #[cfg(feature = "trace-rich")]
        tracer.mutations(self.number, &mutations);

        Some(MountingTransaction {
            number: self.number,
            mutations,
            stats,
        })
    }

    /// Returns the mounted revision.
    #[must_use]
    pub fn revision(&self) -> &Arc<N> {
        &self.base
    }

    /// Number of the last transaction handed out, or `0`.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.number
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::mutation::MutationKind;
    use crate::node::Node;

    fn empty_root() -> Arc<Node> {
        Node::builder(1, "Root").build()
    }

    #[test]
    fn nothing_pending_yields_none() {
        let mut coordinator = MountingCoordinator::new(empty_root());
        assert!(!coordinator.has_pending());
        assert!(coordinator.pull_transaction(&mut Tracer::none()).is_none());
        assert_eq!(coordinator.number(), 0);
    }

    #[test]
    fn transactions_are_numbered_from_one() {
        let base = empty_root();
        let mut coordinator = MountingCoordinator::new(Arc::clone(&base));

        let first = base.with_children(vec![Node::builder(2, "View").build()]);
        coordinator.push(Arc::clone(&first));
        let t1 = coordinator.pull_transaction(&mut Tracer::none()).unwrap();
        assert_eq!(t1.number, 1);
        assert_eq!(t1.stats.creates, 1);
        assert_eq!(t1.stats.inserts, 1);
        assert!(Arc::ptr_eq(coordinator.revision(), &first));

        coordinator.push(first.with_children(vec![]));
        let t2 = coordinator.pull_transaction(&mut Tracer::none()).unwrap();
        assert_eq!(t2.number, 2);
        assert_eq!(
            t2.mutations.iter().map(|m| m.kind()).collect::<Vec<_>>(),
            [MutationKind::Remove, MutationKind::Delete]
        );
    }

    #[test]
    fn later_commit_replaces_pending() {
        let base = empty_root();
        let mut coordinator = MountingCoordinator::new(Arc::clone(&base));

        coordinator.push(base.with_children(vec![Node::builder(2, "View").build()]));
        coordinator.push(base.with_children(vec![Node::builder(3, "View").build()]));

        let t = coordinator.pull_transaction(&mut Tracer::none()).unwrap();
        assert_eq!(t.number, 1);
        assert!(t.mutations.iter().all(|m| m.tag() == 3));
        assert!(coordinator.pull_transaction(&mut Tracer::none()).is_none());
    }

    #[test]
    fn pushing_the_mounted_revision_is_a_no_op() {
        let base = empty_root();
        let mut coordinator = MountingCoordinator::new(Arc::clone(&base));
        coordinator.push(base);
        assert!(coordinator.pull_transaction(&mut Tracer::none()).is_none());
        assert_eq!(coordinator.number(), 0);
    }

    #[test]
    #[should_panic(expected = "same family")]
    fn foreign_root_panics() {
        let mut coordinator = MountingCoordinator::new(empty_root());
        coordinator.push(Node::builder(7, "Root").build());
    }
}
