// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Comparable descriptions of view hierarchies.
//!
//! [`ViewTree::snapshot`] describes what is mounted; [`materialize`] describes
//! what a shadow tree *should* mount: every view-forming node, with the frame
//! and the parent it gets after flattening, and its children in paint order.
//! The two are equal exactly when the mounted tree is consistent with the
//! shadow tree.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use stratum_core::node::{ShadowNode, Tag};
use stratum_core::slice::{reorder_in_place_if_needed, slice_child_pairs};
use stratum_core::view::ShadowView;

use crate::tree::ViewTree;

/// One view of a [`Snapshot`].
#[derive(Clone, Debug, PartialEq)]
pub struct MountedView {
    /// The view's snapshot.
    pub view: ShadowView,
    /// Tag of the parent view, or `None` for the root and detached views.
    pub parent: Option<Tag>,
    /// Tags of the children, in index order.
    pub children: Vec<Tag>,
}

/// A view hierarchy keyed by tag.
pub type Snapshot = BTreeMap<Tag, MountedView>;

impl ViewTree {
    /// Describes every mounted view.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.tags
            .iter()
            .map(|(&tag, &idx)| {
                let id = self.id_at(idx);
                let mounted = MountedView {
                    view: *self.view(id),
                    parent: self.parent(id).map(|p| self.view(p).tag),
                    children: self.children(id).map(|c| self.view(c).tag).collect(),
                };
                (tag, mounted)
            })
            .collect()
    }
}

/// Describes the view hierarchy that `root` should mount.
#[must_use]
pub fn materialize<N: ShadowNode>(root: &N) -> Snapshot {
    let mut snapshot = Snapshot::new();
    materialize_into(&mut snapshot, root.shadow_view(), None, root);
    snapshot
}

fn materialize_into<N: ShadowNode>(
    snapshot: &mut Snapshot,
    view: ShadowView,
    parent: Option<Tag>,
    node: &N,
) {
    let mut pairs = slice_child_pairs(node);
    reorder_in_place_if_needed(&mut pairs);

    snapshot.insert(
        view.tag,
        MountedView {
            view,
            parent,
            children: pairs.iter().map(|pair| pair.view.tag).collect(),
        },
    );
    for pair in pairs {
        materialize_into(snapshot, pair.view, Some(view.tag), pair.node);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Rect};
    use stratum_core::diff::diff;
    use stratum_core::node::Node;
    use stratum_core::view::PropsRevision;

    use super::*;

    #[test]
    fn materialize_follows_flattening_and_order() {
        let root = Node::builder(1, "Root")
            .child(
                Node::builder(2, "View")
                    .layout_only()
                    .frame(Rect::new(5.0, 5.0, 50.0, 50.0))
                    .child(Node::builder(3, "View").order_index(1).build())
                    .build(),
            )
            .child(Node::builder(4, "View").build())
            .build();

        let snapshot = materialize(&*root);
        assert_eq!(snapshot.len(), 3, "layout-only nodes are not mounted");
        assert_eq!(snapshot[&1].children, [4, 3]);
        assert_eq!(snapshot[&3].parent, Some(1));
        assert_eq!(snapshot[&3].view.layout.frame.origin(), Point::new(5.0, 5.0));
        assert_eq!(snapshot[&1].parent, None);
    }

    #[test]
    fn replaying_a_diff_reproduces_the_new_revision() {
        let old = Node::builder(1, "Root")
            .child(Node::builder(2, "View").child(Node::builder(5, "Text").build()).build())
            .child(Node::builder(3, "View").build())
            .build();
        let new = old.with_children(vec![
            Node::builder(4, "Image").build(),
            old.children()[1].with_props(PropsRevision(8)),
        ]);

        let mut tree = ViewTree::new(old.shadow_view());
        tree.apply_all(&diff(&*old.with_children(vec![]), &*old)).unwrap();
        assert_eq!(tree.snapshot(), materialize(&*old));

        tree.apply_all(&diff(&*old, &*new)).unwrap();
        assert_eq!(tree.snapshot(), materialize(&*new));
    }
}
