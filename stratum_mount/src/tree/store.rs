// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays view storage with allocation, topology, and lookup by tag.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::Point;
use stratum_core::node::Tag;
use stratum_core::view::ShadowView;
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::id::{INVALID, ViewId};
use super::traverse::Children;
use crate::dirty;
use crate::error::MountError;

/// Struct-of-arrays storage for the mounted views of one surface.
///
/// Views are addressed by [`ViewId`] handles or by [`Tag`]. Internally, each
/// view occupies a slot in parallel arrays. Deleted views are recycled via a
/// free list, and generation counters prevent stale handle access.
///
/// The surface root is mounted on construction and can never be deleted.
#[derive(Debug)]
pub struct ViewTree {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Mounted snapshots --
    pub(crate) view: Vec<ShadowView>,

    // -- Computed (written by evaluate) --
    pub(crate) absolute_origin: Vec<Point>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) alive: Vec<bool>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,
    pub(crate) tags: BTreeMap<Tag, u32>,
    pub(crate) root: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<u32>,
    pub(crate) traversal_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_created: Vec<Tag>,
    pub(crate) pending_deleted: Vec<Tag>,
}

impl ViewTree {
    /// Creates a tree whose only view is the surface root.
    ///
    /// # Panics
    ///
    /// Panics if `root` has tag zero.
    #[must_use]
    pub fn new(root: ShadowView) -> Self {
        assert!(root.tag != 0, "zero is not a valid tag");
        let mut tree = Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            view: Vec::new(),
            absolute_origin: Vec::new(),
            generation: Vec::new(),
            alive: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            tags: BTreeMap::new(),
            root: INVALID,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_created: Vec::new(),
            pending_deleted: Vec::new(),
        };
        tree.root = tree.allocate(root);
        tree
    }

    /// Returns the handle of the surface root.
    #[must_use]
    pub fn root(&self) -> ViewId {
        self.id_at(self.root)
    }

    /// Returns the handle of the view mounted with `tag`.
    #[must_use]
    pub fn id(&self, tag: Tag) -> Option<ViewId> {
        self.tags.get(&tag).map(|&idx| self.id_at(idx))
    }

    /// Returns whether the given handle refers to a live view.
    #[must_use]
    pub fn is_alive(&self, id: ViewId) -> bool {
        id.idx < self.len
            && self.alive[id.idx as usize]
            && self.generation[id.idx as usize] == id.generation
    }

    /// Number of live views, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Always `false`: the root is always mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns the mounted snapshot of a view.
    #[must_use]
    pub fn view(&self, id: ViewId) -> &ShadowView {
        self.validate(id);
        &self.view[id.idx as usize]
    }

    /// Returns the parent of a view, if any.
    #[must_use]
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.id_at(p))
    }

    /// Returns an iterator over the direct children of a view.
    #[must_use]
    pub fn children(&self, id: ViewId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the computed absolute origin of a view.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn absolute_origin(&self, id: ViewId) -> Point {
        self.validate(id);
        self.absolute_origin[id.idx as usize]
    }

    /// Queues a layout pass for the view with `tag` and its descendants.
    ///
    /// The pass runs on the next [`evaluate`](Self::evaluate).
    pub fn request_layout(&mut self, tag: Tag) -> Result<(), MountError> {
        let idx = self.lookup(tag)?;
        self.dirty.mark_with(idx, dirty::LAYOUT, &EagerPolicy);
        Ok(())
    }

    // -- Raw-index accessors for presenters --
    //
    // These accept raw slot indices (as found in `MountChanges` or
    // `traversal_order()`) rather than `ViewId` handles, skipping generation
    // validation.

    /// Returns the mounted snapshot at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn view_at(&self, idx: u32) -> &ShadowView {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        &self.view[idx as usize]
    }

    /// Returns the computed absolute origin at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn absolute_origin_at(&self, idx: u32) -> Point {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.absolute_origin[idx as usize]
    }

    // -- Internal helpers --

    pub(crate) fn id_at(&self, idx: u32) -> ViewId {
        ViewId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Returns the slot of the view mounted with `tag`.
    pub(crate) fn lookup(&self, tag: Tag) -> Result<u32, MountError> {
        self.tags
            .get(&tag)
            .copied()
            .ok_or(MountError::UnknownView { tag })
    }

    /// Panics if the handle is stale.
    fn validate(&self, id: ViewId) {
        assert!(
            self.is_alive(id),
            "stale ViewId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Mounts a detached view in a fresh or recycled slot.
    pub(crate) fn allocate(&mut self, view: ShadowView) -> u32 {
        let idx = if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.view[i] = view;
            self.absolute_origin[i] = Point::ZERO;
            self.alive[i] = true;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.view.push(view);
            self.absolute_origin.push(Point::ZERO);
            self.generation.push(0);
            self.alive.push(true);
            idx
        };

        self.tags.insert(view.tag, idx);
        self.traversal_dirty = true;
        self.pending_created.push(view.tag);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        self.dirty.mark(idx, dirty::LAYOUT);
        idx
    }

    /// Unmounts a detached, childless view and recycles its slot.
    pub(crate) fn free(&mut self, idx: u32) {
        let i = idx as usize;
        debug_assert!(
            self.parent[i] == INVALID && self.first_child[i] == INVALID,
            "only detached, childless views can be freed"
        );

        let tag = self.view[i].tag;
        self.tags.remove(&tag);
        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[i] += 1;
        self.alive[i] = false;
        self.free_list.push(idx);

        self.traversal_dirty = true;
        self.pending_deleted.push(tag);
    }

    /// Number of children of the view at `idx`.
    pub(crate) fn child_count(&self, idx: u32) -> usize {
        let mut count = 0;
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            count += 1;
            child = self.next_sibling[child as usize];
        }
        count
    }

    /// Slot of the child of `idx` at `position`.
    pub(crate) fn child_at(&self, idx: u32, position: usize) -> Option<u32> {
        let mut child = self.first_child[idx as usize];
        for _ in 0..position {
            if child == INVALID {
                return None;
            }
            child = self.next_sibling[child as usize];
        }
        (child != INVALID).then_some(child)
    }

    /// Links the detached view `c` as the child of `p` at `position`.
    ///
    /// `position` must not exceed the child count of `p`.
    pub(crate) fn link_at(&mut self, p: u32, c: u32, position: usize) {
        self.parent[c as usize] = p;
        if position == 0 {
            let first = self.first_child[p as usize];
            self.prev_sibling[c as usize] = INVALID;
            self.next_sibling[c as usize] = first;
            if first != INVALID {
                self.prev_sibling[first as usize] = c;
            }
            self.first_child[p as usize] = c;
        } else {
            let Some(prev) = self.child_at(p, position - 1) else {
                unreachable!("position {position} exceeds the child count");
            };
            let next = self.next_sibling[prev as usize];
            self.prev_sibling[c as usize] = prev;
            self.next_sibling[c as usize] = next;
            self.next_sibling[prev as usize] = c;
            if next != INVALID {
                self.prev_sibling[next as usize] = c;
            }
        }

        // Absolute origins are inherited from the new parent.
        let _ = self.dirty.add_dependency(c, p, dirty::LAYOUT);
        self.dirty.mark_with(c, dirty::LAYOUT, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `c` from its parent's child list.
    pub(crate) fn unlink(&mut self, c: u32) {
        let p = self.parent[c as usize];
        let prev = self.prev_sibling[c as usize];
        let next = self.next_sibling[c as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            self.first_child[p as usize] = next;
        }
        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[c as usize] = INVALID;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        self.dirty.remove_dependency(c, p, dirty::LAYOUT);
        self.dirty.mark_with(c, dirty::LAYOUT, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Replaces the mounted snapshot at `idx`, marking what changed.
    pub(crate) fn set_view(&mut self, idx: u32, view: ShadowView) {
        let old = self.view[idx as usize];
        if old == view {
            return;
        }
        if old.layout != view.layout {
            self.dirty.mark_with(idx, dirty::LAYOUT, &EagerPolicy);
        }
        if old.props != view.props || old.state != view.state || old.component != view.component
        {
            self.dirty.mark(idx, dirty::PROPS);
        }
        self.view[idx as usize] = view;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn view(tag: Tag) -> ShadowView {
        ShadowView {
            tag,
            component: "View",
            ..ShadowView::NONE
        }
    }

    #[test]
    fn new_tree_holds_only_the_root() {
        let tree = ViewTree::new(view(1));
        let root = tree.root();
        assert!(tree.is_alive(root));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.view(root).tag, 1);
        assert_eq!(tree.id(1), Some(root));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn link_at_positions() {
        let mut tree = ViewTree::new(view(1));
        let a = tree.allocate(view(2));
        let b = tree.allocate(view(3));
        let c = tree.allocate(view(4));

        tree.link_at(tree.root, b, 0);
        tree.link_at(tree.root, a, 0);
        tree.link_at(tree.root, c, 2);

        let kids: Vec<Tag> = tree
            .children(tree.root())
            .map(|id| tree.view(id).tag)
            .collect();
        assert_eq!(kids, [2, 3, 4]);
        assert_eq!(tree.child_count(tree.root), 3);
        assert_eq!(tree.child_at(tree.root, 1), Some(b));
        assert_eq!(tree.child_at(tree.root, 3), None);
    }

    #[test]
    fn unlink_middle_child() {
        let mut tree = ViewTree::new(view(1));
        let a = tree.allocate(view(2));
        let b = tree.allocate(view(3));
        let c = tree.allocate(view(4));
        for (i, idx) in [a, b, c].into_iter().enumerate() {
            tree.link_at(tree.root, idx, i);
        }

        tree.unlink(b);
        let kids: Vec<ViewId> = tree.children(tree.root()).collect();
        assert_eq!(kids, [tree.id_at(a), tree.id_at(c)]);
        assert_eq!(tree.parent(tree.id_at(b)), None);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut tree = ViewTree::new(view(1));
        let idx = tree.allocate(view(2));
        let old = tree.id_at(idx);
        tree.free(idx);
        assert!(!tree.is_alive(old));
        assert_eq!(tree.id(2), None);

        let reused = tree.allocate(view(3));
        assert_eq!(reused, idx);
        let new = tree.id_at(reused);
        assert!(tree.is_alive(new));
        assert_ne!(old.generation(), new.generation());
    }

    #[test]
    #[should_panic(expected = "stale ViewId")]
    fn stale_handle_panics() {
        let mut tree = ViewTree::new(view(1));
        let idx = tree.allocate(view(2));
        let id = tree.id_at(idx);
        tree.free(idx);
        let _ = tree.view(id);
    }

    #[test]
    fn request_layout_requires_a_mounted_view() {
        let mut tree = ViewTree::new(view(1));
        assert_eq!(tree.request_layout(1), Ok(()));
        assert_eq!(
            tree.request_layout(9),
            Err(MountError::UnknownView { tag: 9 })
        );
    }
}
