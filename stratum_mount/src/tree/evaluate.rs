// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick evaluation and change tracking.
//!
//! Mutations and layout requests only mark dirty channels. The work happens
//! once per tick, in [`ViewTree::evaluate`]:
//!
//! 1. **TOPOLOGY** — rebuild the traversal order if anything was created,
//!    deleted, inserted, or removed, then drain the channel.
//! 2. **LAYOUT** — drain dirty indices (parents before children) and
//!    recompute each view's absolute origin as
//!    `parent_absolute + frame.origin`.
//! 3. **PROPS** — drain dirty indices; presenters read the snapshots directly.
//!
//! [`MountChanges`] reports views by raw slot index (`u32`) so presenters can
//! read the tree through the `*_at` accessors without generation checks.
//! Created and deleted views are reported by tag, since a deleted view's slot
//! may already belong to another view.

use alloc::vec::Vec;

use kurbo::Point;
use stratum_core::node::Tag;

use super::id::INVALID;
use super::store::ViewTree;
use crate::dirty;

/// The set of changes produced by a single [`ViewTree::evaluate`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MountChanges {
    /// Views whose absolute origin was recomputed.
    pub layout: Vec<u32>,
    /// Views whose props, state, or component changed.
    pub props: Vec<u32>,
    /// Tags created since the last evaluate, in creation order.
    pub created: Vec<Tag>,
    /// Tags deleted since the last evaluate, in deletion order.
    pub deleted: Vec<Tag>,
    /// Whether the tree topology changed (traversal order was rebuilt).
    pub topology_changed: bool,
}

impl MountChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.layout.clear();
        self.props.clear();
        self.created.clear();
        self.deleted.clear();
        self.topology_changed = false;
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
            && self.props.is_empty()
            && self.created.is_empty()
            && self.deleted.is_empty()
            && !self.topology_changed
    }
}

impl ViewTree {
    /// Flushes queued work and returns the set of changes since the previous
    /// call.
    pub fn evaluate(&mut self) -> MountChanges {
        let mut changes = MountChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer.
    pub fn evaluate_into(&mut self, changes: &mut MountChanges) {
        changes.clear();

        if self.traversal_dirty {
            self.rebuild_traversal_order();
            changes.topology_changed = true;
            self.traversal_dirty = false;
        }
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        let dirty_layout: Vec<u32> = self
            .dirty
            .drain(dirty::LAYOUT)
            .affected()
            .deterministic()
            .run()
            .filter(|&idx| self.alive[idx as usize])
            .collect();
        for &idx in &dirty_layout {
            let parent_idx = self.parent[idx as usize];
            let parent_origin = if parent_idx != INVALID {
                self.absolute_origin[parent_idx as usize]
            } else {
                Point::ZERO
            };
            let frame_origin = self.view[idx as usize].layout.frame.origin();
            self.absolute_origin[idx as usize] = parent_origin + frame_origin.to_vec2();
        }
        changes.layout = dirty_layout;

        changes.props = self
            .dirty
            .drain(dirty::PROPS)
            .deterministic()
            .run()
            .filter(|&idx| self.alive[idx as usize])
            .collect();

        core::mem::swap(&mut self.pending_created, &mut changes.created);
        core::mem::swap(&mut self.pending_deleted, &mut changes.deleted);
    }

    /// Returns the current traversal order (depth-first pre-order from the
    /// root, followed by any detached views).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.traversal_order
    }

    fn rebuild_traversal_order(&mut self) {
        self.traversal_order.clear();
        self.dfs_collect(self.root);
        for idx in 0..self.len {
            if idx != self.root && self.alive[idx as usize] && self.parent[idx as usize] == INVALID
            {
                self.dfs_collect(idx);
            }
        }
    }

    fn dfs_collect(&mut self, idx: u32) {
        self.traversal_order.push(idx);
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.dfs_collect(child);
            child = self.next_sibling[child as usize];
        }
    }
}
