// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay failures.

use stratum_core::node::Tag;
use thiserror::Error;

/// A mutation that is inconsistent with the mounted view tree.
///
/// Any of these means the mutation list was not produced from the revision
/// that is currently mounted, or that it was applied out of order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MountError {
    /// `Create` of a tag that is already mounted.
    #[error("view {tag} already exists")]
    AlreadyExists {
        /// The offending tag.
        tag: Tag,
    },
    /// A mutation references a tag that is not mounted.
    #[error("view {tag} does not exist")]
    UnknownView {
        /// The offending tag.
        tag: Tag,
    },
    /// `Delete` of a view that still has a parent.
    #[error("view {tag} is still attached to a parent")]
    StillAttached {
        /// The offending tag.
        tag: Tag,
    },
    /// `Delete` of a view that still has children.
    #[error("view {tag} still has children")]
    HasChildren {
        /// The offending tag.
        tag: Tag,
    },
    /// `Insert` of a view that already has a parent.
    #[error("view {tag} is already attached to a parent")]
    AlreadyAttached {
        /// The offending tag.
        tag: Tag,
    },
    /// `Insert` or `Remove` at a position the parent does not have.
    #[error("index {index} is out of bounds for view {parent} with {len} children")]
    IndexOutOfBounds {
        /// Tag of the parent.
        parent: Tag,
        /// Requested index.
        index: i32,
        /// Number of children of the parent.
        len: usize,
    },
    /// `Remove` or `Update` names a view that is not at the given position.
    #[error("view {parent} has {found} at index {index}, expected {expected}")]
    ChildMismatch {
        /// Tag of the parent.
        parent: Tag,
        /// Index of the mutation.
        index: i32,
        /// Tag named by the mutation.
        expected: Tag,
        /// Tag actually mounted at `index`.
        found: Tag,
    },
    /// `Update` whose old snapshot differs from the mounted one.
    #[error("update of view {tag} does not start from the mounted snapshot")]
    StaleUpdate {
        /// The offending tag.
        tag: Tag,
    },
}
