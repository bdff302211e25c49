// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening of shadow subtrees into paint layers.
//!
//! Layout-only nodes never materialize a platform view. When a tree level is
//! diffed, its children are therefore not the node's structural children but
//! its *sliced* children:
//!
//! - A child forming a stacking context is emitted and not descended into; it
//!   becomes its own diff subproblem.
//! - A child forming a view (without a stacking context) is emitted, and its
//!   descendants continue to belong to the same paint layer.
//! - Any other child is skipped and its descendants are hoisted.
//!
//! Frames of hoisted descendants are translated by the accumulated origins of
//! the ancestors that were flattened away, so every emitted frame is relative
//! to the node the layer is sliced from.

use kurbo::Vec2;

use crate::node::ShadowNode;
use crate::view::{PairList, ShadowViewNodePair};

/// Returns the paint layer of children of `node`, in document order.
///
/// Returns an empty list if `node` forms a view but not a stacking context:
/// its descendants were already sliced into its ancestor's layer.
#[must_use]
pub fn slice_child_pairs<N: ShadowNode>(node: &N) -> PairList<'_, N> {
    let mut pairs = PairList::new();

    let traits = node.traits();
    if traits.forms_view() && !traits.forms_stacking_context() {
        return pairs;
    }

    slice_recursively(&mut pairs, Vec2::ZERO, node);
    pairs
}

fn slice_recursively<'a, N: ShadowNode>(pairs: &mut PairList<'a, N>, offset: Vec2, node: &'a N) {
    for child in node.children() {
        let child: &'a N = child;
        let mut view = child.shadow_view();
        view.layout.frame = view.layout.frame + offset;

        let traits = child.traits();
        if traits.forms_stacking_context() {
            pairs.push(ShadowViewNodePair::new(view, child));
        } else {
            if traits.forms_view() {
                pairs.push(ShadowViewNodePair::new(view, child));
            }
            slice_recursively(pairs, view.layout.frame.origin().to_vec2(), child);
        }
    }
}

/// Stable-sorts `pairs` by order index, skipping the sort when every sibling
/// uses document order.
pub fn reorder_in_place_if_needed<N: ShadowNode>(pairs: &mut PairList<'_, N>) {
    if pairs.len() < 2 {
        return;
    }

    if pairs.iter().all(|pair| pair.node.order_index() == 0) {
        return;
    }

    pairs.sort_by_key(|pair| pair.node.order_index());
}
