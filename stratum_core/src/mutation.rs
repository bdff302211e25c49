// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View mutations: the output of the differentiator.
//!
//! A mutation list is applied by a mounting layer strictly in order. Each
//! variant carries copied [`ShadowView`] snapshots, never node references.
//!
//! - `Create` materializes a detached view. It does not make it visible.
//! - `Insert` attaches a view to a parent at an index of the *new* child list.
//! - `Remove` detaches a view from a parent at an index of the *old* child
//!   list. The same tag may be inserted again later in the list.
//! - `Delete` destroys a detached view.
//! - `Update` replaces a view's snapshot in place.

use alloc::vec::Vec;

use crate::node::Tag;
use crate::view::ShadowView;

/// Index used when a mutation has no position (the root update).
pub const NO_INDEX: i32 = -1;

/// A single instruction for the mounting layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShadowViewMutation {
    /// Materialize a new, detached view.
    Create {
        /// The view to create.
        view: ShadowView,
    },
    /// Destroy a detached view.
    Delete {
        /// The view to destroy.
        view: ShadowView,
    },
    /// Attach `view` to `parent` at `index`.
    Insert {
        /// The parent view.
        parent: ShadowView,
        /// The attached view.
        view: ShadowView,
        /// Position in the parent's new child list.
        index: i32,
    },
    /// Detach `view` from `parent` at `index`.
    Remove {
        /// The parent view.
        parent: ShadowView,
        /// The detached view.
        view: ShadowView,
        /// Position in the parent's old child list.
        index: i32,
    },
    /// Replace `old` with `new`.
    Update {
        /// The parent view, or [`ShadowView::NONE`] for the root.
        parent: ShadowView,
        /// Previous snapshot.
        old: ShadowView,
        /// Next snapshot.
        new: ShadowView,
        /// Position in the parent's new child list, or [`NO_INDEX`].
        index: i32,
    },
}

/// An ordered list of mutations.
pub type MutationList = Vec<ShadowViewMutation>;

/// Discriminant of a [`ShadowViewMutation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// [`ShadowViewMutation::Create`].
    Create,
    /// [`ShadowViewMutation::Delete`].
    Delete,
    /// [`ShadowViewMutation::Insert`].
    Insert,
    /// [`ShadowViewMutation::Remove`].
    Remove,
    /// [`ShadowViewMutation::Update`].
    Update,
}

impl ShadowViewMutation {
    /// Creates a `Create` mutation.
    #[inline]
    #[must_use]
    pub const fn create(view: ShadowView) -> Self {
        Self::Create { view }
    }

    /// Creates a `Delete` mutation.
    #[inline]
    #[must_use]
    pub const fn delete(view: ShadowView) -> Self {
        Self::Delete { view }
    }

    /// Creates an `Insert` mutation.
    #[inline]
    #[must_use]
    pub const fn insert(parent: ShadowView, view: ShadowView, index: i32) -> Self {
        Self::Insert {
            parent,
            view,
            index,
        }
    }

    /// Creates a `Remove` mutation.
    #[inline]
    #[must_use]
    pub const fn remove(parent: ShadowView, view: ShadowView, index: i32) -> Self {
        Self::Remove {
            parent,
            view,
            index,
        }
    }

    /// Creates an `Update` mutation.
    #[inline]
    #[must_use]
    pub const fn update(parent: ShadowView, old: ShadowView, new: ShadowView, index: i32) -> Self {
        Self::Update {
            parent,
            old,
            new,
            index,
        }
    }

    /// Returns the mutation's discriminant.
    #[must_use]
    pub const fn kind(&self) -> MutationKind {
        match self {
            Self::Create { .. } => MutationKind::Create,
            Self::Delete { .. } => MutationKind::Delete,
            Self::Insert { .. } => MutationKind::Insert,
            Self::Remove { .. } => MutationKind::Remove,
            Self::Update { .. } => MutationKind::Update,
        }
    }

    /// Tag of the view the mutation acts on (the new view for updates).
    #[must_use]
    pub const fn tag(&self) -> Tag {
        match self {
            Self::Create { view }
            | Self::Delete { view }
            | Self::Insert { view, .. }
            | Self::Remove { view, .. } => view.tag,
            Self::Update { new, .. } => new.tag,
        }
    }

    /// Parent view, for mutations that have one.
    #[must_use]
    pub const fn parent(&self) -> Option<&ShadowView> {
        match self {
            Self::Insert { parent, .. } | Self::Remove { parent, .. } | Self::Update { parent, .. } => {
                Some(parent)
            }
            Self::Create { .. } | Self::Delete { .. } => None,
        }
    }

    /// Index of the mutation, or [`NO_INDEX`].
    #[must_use]
    pub const fn index(&self) -> i32 {
        match self {
            Self::Insert { index, .. } | Self::Remove { index, .. } | Self::Update { index, .. } => {
                *index
            }
            Self::Create { .. } | Self::Delete { .. } => NO_INDEX,
        }
    }
}

/// Converts a child-list position into a mutation index.
#[inline]
pub(crate) fn list_index(index: usize) -> i32 {
    debug_assert!(
        i32::try_from(index).is_ok(),
        "child list position {index} does not fit a mutation index"
    );
    i32::try_from(index).unwrap_or(i32::MAX)
}
