// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutation replay.
//!
//! Every mutation is checked against the mounted state before it is applied,
//! and a failed check leaves the tree untouched:
//!
//! | Mutation | Requirement                                                   |
//! |----------|---------------------------------------------------------------|
//! | `Create` | tag not mounted                                               |
//! | `Delete` | tag mounted, detached, and childless                          |
//! | `Insert` | parent and child mounted, child detached, `index <= len`      |
//! | `Remove` | the parent's child at `index` has the tag                     |
//! | `Update` | tag mounted, old snapshot equal to the mounted one, and (for  |
//! |          | non-root updates) the parent's child at `index` has the tag   |
//!
//! `Insert` adopts the snapshot it carries: a view that moved may come back
//! with a new snapshot and no separate `Update`.

use stratum_core::coordinator::MountingTransaction;
use stratum_core::mounting::MountingLayer;
use stratum_core::mutation::ShadowViewMutation;
use stratum_core::node::Tag;

use super::id::INVALID;
use super::store::ViewTree;
use crate::error::MountError;

impl ViewTree {
    /// Applies a single mutation.
    ///
    /// # Errors
    ///
    /// Returns a [`MountError`] if the mutation is inconsistent with the
    /// mounted state. The tree is left unchanged in that case.
    pub fn try_apply(&mut self, mutation: &ShadowViewMutation) -> Result<(), MountError> {
        match *mutation {
            ShadowViewMutation::Create { view } => {
                if self.tags.contains_key(&view.tag) {
                    return Err(MountError::AlreadyExists { tag: view.tag });
                }
                self.allocate(view);
            }
            ShadowViewMutation::Delete { view } => {
                let idx = self.lookup(view.tag)?;
                if self.parent[idx as usize] != INVALID || idx == self.root {
                    return Err(MountError::StillAttached { tag: view.tag });
                }
                if self.first_child[idx as usize] != INVALID {
                    return Err(MountError::HasChildren { tag: view.tag });
                }
                self.free(idx);
            }
            ShadowViewMutation::Insert {
                parent,
                view,
                index,
            } => {
                let p = self.lookup(parent.tag)?;
                let c = self.lookup(view.tag)?;
                if self.parent[c as usize] != INVALID || c == self.root {
                    return Err(MountError::AlreadyAttached { tag: view.tag });
                }
                let len = self.child_count(p);
                let position = child_position(parent.tag, index, len, true)?;
                self.set_view(c, view);
                self.link_at(p, c, position);
            }
            ShadowViewMutation::Remove {
                parent,
                view,
                index,
            } => {
                let p = self.lookup(parent.tag)?;
                let c = self.child_with_tag(p, parent.tag, index, view.tag)?;
                self.unlink(c);
            }
            ShadowViewMutation::Update {
                parent,
                old,
                new,
                index,
            } => {
                let idx = self.lookup(new.tag)?;
                if old.tag != new.tag || self.view[idx as usize] != old {
                    return Err(MountError::StaleUpdate { tag: new.tag });
                }
                if !parent.is_none() {
                    let p = self.lookup(parent.tag)?;
                    self.child_with_tag(p, parent.tag, index, new.tag)?;
                }
                self.set_view(idx, new);
            }
        }
        Ok(())
    }

    /// Applies `mutations` in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`MountError`]. Mutations before it stay applied.
    pub fn apply_all(&mut self, mutations: &[ShadowViewMutation]) -> Result<(), MountError> {
        mutations.iter().try_for_each(|m| self.try_apply(m))
    }

    /// Returns the slot of the child of `p` at `index`, checking its tag.
    fn child_with_tag(
        &self,
        p: u32,
        parent_tag: Tag,
        index: i32,
        expected: Tag,
    ) -> Result<u32, MountError> {
        let len = self.child_count(p);
        let out_of_bounds = MountError::IndexOutOfBounds {
            parent: parent_tag,
            index,
            len,
        };
        let position = child_position(parent_tag, index, len, false)?;
        let c = self.child_at(p, position).ok_or(out_of_bounds)?;
        let found = self.view[c as usize].tag;
        if found != expected {
            return Err(MountError::ChildMismatch {
                parent: parent_tag,
                index,
                expected,
                found,
            });
        }
        Ok(c)
    }
}

/// Converts a mutation index into a child position of a parent with `len`
/// children. `Insert` may target `len` itself (append).
fn child_position(parent: Tag, index: i32, len: usize, append: bool) -> Result<usize, MountError> {
    let bound = if append { len + 1 } else { len };
    usize::try_from(index)
        .ok()
        .filter(|&position| position < bound)
        .ok_or(MountError::IndexOutOfBounds { parent, index, len })
}

impl MountingLayer for ViewTree {
    /// Applies every mutation of `transaction`.
    ///
    /// # Panics
    ///
    /// Panics on the first inconsistent mutation: a transaction that does not
    /// match the mounted tree cannot be recovered from.
    fn apply(&mut self, transaction: &MountingTransaction) {
        for (n, mutation) in transaction.mutations.iter().enumerate() {
            if let Err(err) = self.try_apply(mutation) {
                panic!(
                    "mutation {n} of transaction {} failed: {err}",
                    transaction.number
                );
            }
        }
    }
}
