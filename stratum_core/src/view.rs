// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderable snapshots of shadow nodes.
//!
//! A [`ShadowView`] is a small `Copy` value capturing everything a mounting
//! layer needs to materialize or update a platform view. Mutations carry
//! views, never nodes, so a mutation list stays valid after the trees it was
//! computed from have been superseded.

use alloc::vec::Vec;
use core::fmt;
use core::ptr;

use kurbo::{Insets, Rect};

use crate::node::Tag;

/// Identity of one revision of a node's props.
///
/// Two views with the same `PropsRevision` are assumed to carry identical
/// props; the differentiator never inspects prop contents.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PropsRevision(pub u64);

impl fmt::Debug for PropsRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropsRevision({})", self.0)
    }
}

/// Identity of one revision of a node's component state.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StateRevision(pub u64);

impl fmt::Debug for StateRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateRevision({})", self.0)
    }
}

/// How a view participates in layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayType {
    /// Not displayed at all.
    None,
    /// Regular flex item.
    #[default]
    Flex,
    /// Laid out inline (e.g. inside text).
    Inline,
}

/// Already-resolved geometry of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    /// Frame relative to the parent view.
    pub frame: Rect,
    /// Insets between the frame and the content box.
    pub content_insets: Insets,
    /// Display type.
    pub display: DisplayType,
}

impl LayoutMetrics {
    /// Metrics with an empty frame, no insets, and flex display.
    pub const EMPTY: Self = Self {
        frame: Rect::ZERO,
        content_insets: Insets::ZERO,
        display: DisplayType::Flex,
    };

    /// Creates metrics with the given frame and defaults for everything else.
    #[inline]
    #[must_use]
    pub const fn from_frame(frame: Rect) -> Self {
        Self {
            frame,
            content_insets: Insets::ZERO,
            display: DisplayType::Flex,
        }
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// A copyable snapshot of a node's renderable state.
///
/// Two views are equal iff every observable field matches; any difference
/// between the old and new view of the same tag produces an `Update`.
///
/// The default value is the "no parent" sentinel (tag `0`), used as the
/// parent of the root update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowView {
    /// Stable identity of the logical node.
    pub tag: Tag,
    /// Component name used by the mounting layer to pick a view class.
    pub component: &'static str,
    /// Props revision.
    pub props: PropsRevision,
    /// State revision.
    pub state: StateRevision,
    /// Geometry, already offset into the coordinate space of the nearest
    /// view-forming ancestor.
    pub layout: LayoutMetrics,
}

impl ShadowView {
    /// The "no parent" sentinel view.
    pub const NONE: Self = Self {
        tag: 0,
        component: "",
        props: PropsRevision(0),
        state: StateRevision(0),
        layout: LayoutMetrics::EMPTY,
    };

    /// Returns `true` if this is the "no parent" sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.tag == 0
    }
}

impl Default for ShadowView {
    fn default() -> Self {
        Self::NONE
    }
}

/// A view snapshot together with the node it was taken from.
///
/// Pairs only live for the duration of a single diff call. Equality requires
/// equal views *and* the same node instance: a new node revision with an
/// unchanged view still compares unequal, because its descendants may differ.
pub struct ShadowViewNodePair<'a, N> {
    /// Snapshot of `node`, with flattening offsets applied.
    pub view: ShadowView,
    /// The originating node.
    pub node: &'a N,
}

/// One flattened paint layer of children.
pub type PairList<'a, N> = Vec<ShadowViewNodePair<'a, N>>;

impl<'a, N> ShadowViewNodePair<'a, N> {
    /// Creates a pair.
    #[inline]
    #[must_use]
    pub const fn new(view: ShadowView, node: &'a N) -> Self {
        Self { view, node }
    }
}

impl<N> Clone for ShadowViewNodePair<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for ShadowViewNodePair<'_, N> {}

impl<N> PartialEq for ShadowViewNodePair<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.view == other.view && ptr::eq(self.node, other.node)
    }
}

impl<N> fmt::Debug for ShadowViewNodePair<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadowViewNodePair")
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}
