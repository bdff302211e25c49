// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Consumer contracts for mutation lists.
//!
//! A [`MountingLayer`] executes transactions against a platform view system.
//! A [`PreallocationDelegate`] receives the views that a transaction is about
//! to create, so a host can warm up expensive platform views ahead of time.
//! Preallocation is purely a hint: mounting must produce the same result
//! whether or not the delegate acted on it.

use crate::coordinator::MountingTransaction;
use crate::mutation::ShadowViewMutation;
use crate::view::ShadowView;

/// Applies mounting transactions.
///
/// Implementations must apply mutations strictly in list order. `Remove`
/// detaches a view without destroying it; the same tag may be inserted again
/// later in the list. `Create` does not make a view visible.
pub trait MountingLayer {
    /// Applies every mutation of `transaction`, in order.
    fn apply(&mut self, transaction: &MountingTransaction);
}

/// Receives views ahead of their creation.
pub trait PreallocationDelegate {
    /// Called once per view about to be created.
    fn preallocate(&mut self, view: &ShadowView);
}

/// Hands the view of every `Create` in `mutations` to `delegate`, in list
/// order. Returns the number of views handed out.
pub fn dispatch_preallocations(
    mutations: &[ShadowViewMutation],
    delegate: &mut dyn PreallocationDelegate,
) -> usize {
    let mut count = 0;
    for mutation in mutations {
        if let ShadowViewMutation::Create { view } = mutation {
            delegate.preallocate(view);
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::diff::diff;
    use crate::node::{Node, ShadowNode, Tag};

    struct Warmup(Vec<Tag>);

    impl PreallocationDelegate for Warmup {
        fn preallocate(&mut self, view: &ShadowView) {
            self.0.push(view.tag);
        }
    }

    #[test]
    fn creates_are_dispatched_in_order() {
        let old = Node::builder(1, "Root").build();
        let new = old.with_children(vec![
            Node::builder(2, "View").child(Node::builder(3, "Image").build()).build(),
            Node::builder(4, "Text").build(),
        ]);
        let mutations = diff(&*old, &*new);

        let mut warmup = Warmup(Vec::new());
        let count = dispatch_preallocations(&mutations, &mut warmup);
        assert_eq!(count, 3);
        assert_eq!(warmup.0, [2, 4, 3]);
    }

    #[test]
    fn lists_without_creates_dispatch_nothing() {
        let mut warmup = Warmup(Vec::new());
        let parent = Node::builder(1, "Root").build().shadow_view();
        let child = Node::builder(2, "View").build().shadow_view();
        let mutations = [
            ShadowViewMutation::remove(parent, child, 0),
            ShadowViewMutation::delete(child),
        ];
        assert_eq!(dispatch_preallocations(&mutations, &mut warmup), 0);
        assert!(warmup.0.is_empty());
    }
}
