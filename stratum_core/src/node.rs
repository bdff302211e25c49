// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shadow-node contract consumed by the differentiator.
//!
//! Shadow nodes are immutable once sealed. A new revision of a logical node is
//! a new value sharing the same [`Tag`]; unchanged subtrees are shared between
//! revisions through [`Arc`] (copy-on-write). Ownership is strictly downward:
//! nodes never reference their parents.
//!
//! [`Node`] is a ready-made owned implementation used by hosts that do not
//! bring their own node type.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::ops::BitOr;

use kurbo::Rect;

use crate::text::{TextAttributes, TextFacet};
use crate::view::{LayoutMetrics, PropsRevision, ShadowView, StateRevision};

/// Stable integer identity of a logical node across revisions.
///
/// Zero is never a valid tag.
pub type Tag = u32;

/// Trait bits describing how a node participates in view formation.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NodeTraits(u8);

impl NodeTraits {
    /// A layout-only node: folded away by flattening.
    pub const NONE: Self = Self(0);
    /// The node materializes a platform view.
    pub const FORMS_VIEW: Self = Self(1 << 0);
    /// The node starts a new paint layer; flattening never crosses it.
    pub const FORMS_STACKING_CONTEXT: Self = Self(1 << 1);
    /// A regular view: forms a view and a stacking context.
    pub const VIEW: Self = Self(Self::FORMS_VIEW.0 | Self::FORMS_STACKING_CONTEXT.0);

    /// Returns the union of both trait sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if every bit of `other` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Shorthand for `contains(FORMS_VIEW)`.
    #[inline]
    #[must_use]
    pub const fn forms_view(self) -> bool {
        self.contains(Self::FORMS_VIEW)
    }

    /// Shorthand for `contains(FORMS_STACKING_CONTEXT)`.
    #[inline]
    #[must_use]
    pub const fn forms_stacking_context(self) -> bool {
        self.contains(Self::FORMS_STACKING_CONTEXT)
    }
}

impl BitOr for NodeTraits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Debug for NodeTraits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        if self.forms_view() {
            set.entry(&"FormsView");
        }
        if self.forms_stacking_context() {
            set.entry(&"FormsStackingContext");
        }
        set.finish()
    }
}

/// An immutable node of a shadow tree.
///
/// Implementations must not change any observable value once a node has been
/// handed to the differentiator.
pub trait ShadowNode: Sized {
    /// Stable identity shared by every revision of this logical node.
    fn tag(&self) -> Tag;

    /// View-forming trait bits.
    fn traits(&self) -> NodeTraits;

    /// Explicit paint order override. `0` means document order.
    fn order_index(&self) -> i32 {
        0
    }

    /// Ordered children.
    fn children(&self) -> &[Arc<Self>];

    /// Renderable snapshot of this node, with its frame relative to its
    /// structural parent.
    fn shadow_view(&self) -> ShadowView;

    /// Whether `other` is a revision of the same logical node.
    fn same_family(&self, other: &Self) -> bool {
        self.tag() == other.tag()
    }

    /// Text capability of this node, if it contributes to attributed strings.
    fn as_text_like(&self) -> Option<TextFacet<'_>> {
        None
    }
}

/// Text carried by a [`Node`].
#[derive(Clone, Debug, PartialEq)]
pub enum TextContent {
    /// A raw string fragment.
    Raw(String),
    /// A styled span whose children carry the text.
    Span(TextAttributes),
}

/// Owned, immutable shadow node.
///
/// Build with [`Node::builder`]; derive new revisions with the `with_*`
/// methods, which share all children not explicitly replaced.
///
/// Text content is not part of the [`ShadowView`]; a text change reaches the
/// mounting layer through the props revision. [`with_text`](Self::with_text)
/// bumps it. Layout-only fragments are never mounted, so the paragraph that
/// flattens them must be revised as well.
#[derive(Clone, Debug)]
pub struct Node {
    tag: Tag,
    component: &'static str,
    traits: NodeTraits,
    order_index: i32,
    props: PropsRevision,
    state: StateRevision,
    layout: LayoutMetrics,
    text: Option<TextContent>,
    children: Vec<Arc<Self>>,
}

impl Node {
    /// Starts building a node with the given tag and component name.
    ///
    /// The node defaults to [`NodeTraits::VIEW`], props and state revision
    /// `0`, an empty frame, and no children.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is zero.
    #[must_use]
    pub fn builder(tag: Tag, component: &'static str) -> NodeBuilder {
        assert!(tag != 0, "zero is not a valid tag");
        NodeBuilder {
            node: Self {
                tag,
                component,
                traits: NodeTraits::VIEW,
                order_index: 0,
                props: PropsRevision(0),
                state: StateRevision(0),
                layout: LayoutMetrics::EMPTY,
                text: None,
                children: Vec::new(),
            },
        }
    }

    /// Returns the component name.
    #[must_use]
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Returns the props revision.
    #[must_use]
    pub fn props(&self) -> PropsRevision {
        self.props
    }

    /// Returns the layout metrics.
    #[must_use]
    pub fn layout(&self) -> LayoutMetrics {
        self.layout
    }

    /// Returns the text content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&TextContent> {
        self.text.as_ref()
    }

    /// Returns a new revision with the given children.
    #[must_use]
    pub fn with_children(&self, children: Vec<Arc<Self>>) -> Arc<Self> {
        Arc::new(Self {
            children,
            ..self.clone()
        })
    }

    /// Returns a new revision with the given props revision.
    #[must_use]
    pub fn with_props(&self, props: PropsRevision) -> Arc<Self> {
        Arc::new(Self {
            props,
            ..self.clone()
        })
    }

    /// Returns a new revision carrying `text`.
    ///
    /// The props revision advances when the text differs from the current
    /// one, so the change shows up as an update of the node's view.
    #[must_use]
    pub fn with_text(&self, text: TextContent) -> Arc<Self> {
        let props = if self.text.as_ref() == Some(&text) {
            self.props
        } else {
            PropsRevision(self.props.0.wrapping_add(1))
        };
        Arc::new(Self {
            props,
            text: Some(text),
            ..self.clone()
        })
    }

    /// Returns a new revision with the given frame.
    #[must_use]
    pub fn with_frame(&self, frame: Rect) -> Arc<Self> {
        let mut next = self.clone();
        next.layout.frame = frame;
        Arc::new(next)
    }

    /// Returns a new revision with the given paint order override.
    #[must_use]
    pub fn with_order_index(&self, order_index: i32) -> Arc<Self> {
        Arc::new(Self {
            order_index,
            ..self.clone()
        })
    }
}

impl ShadowNode for Node {
    fn tag(&self) -> Tag {
        self.tag
    }

    fn traits(&self) -> NodeTraits {
        self.traits
    }

    fn order_index(&self) -> i32 {
        self.order_index
    }

    fn children(&self) -> &[Arc<Self>] {
        &self.children
    }

    fn shadow_view(&self) -> ShadowView {
        ShadowView {
            tag: self.tag,
            component: self.component,
            props: self.props,
            state: self.state,
            layout: self.layout,
        }
    }

    fn as_text_like(&self) -> Option<TextFacet<'_>> {
        match self.text.as_ref()? {
            TextContent::Raw(text) => Some(TextFacet::RawText(text)),
            TextContent::Span(attributes) => Some(TextFacet::Span(attributes)),
        }
    }
}

/// Builder for [`Node`].
#[derive(Debug)]
pub struct NodeBuilder {
    node: Node,
}

impl NodeBuilder {
    /// Sets the trait bits.
    #[must_use]
    pub fn traits(mut self, traits: NodeTraits) -> Self {
        self.node.traits = traits;
        self
    }

    /// Marks the node as layout-only.
    #[must_use]
    pub fn layout_only(self) -> Self {
        self.traits(NodeTraits::NONE)
    }

    /// Sets the paint order override.
    #[must_use]
    pub fn order_index(mut self, order_index: i32) -> Self {
        self.node.order_index = order_index;
        self
    }

    /// Sets the props revision.
    #[must_use]
    pub fn props(mut self, props: u64) -> Self {
        self.node.props = PropsRevision(props);
        self
    }

    /// Sets the state revision.
    #[must_use]
    pub fn state(mut self, state: u64) -> Self {
        self.node.state = StateRevision(state);
        self
    }

    /// Sets the frame.
    #[must_use]
    pub fn frame(mut self, frame: Rect) -> Self {
        self.node.layout.frame = frame;
        self
    }

    /// Sets the full layout metrics.
    #[must_use]
    pub fn layout(mut self, layout: LayoutMetrics) -> Self {
        self.node.layout = layout;
        self
    }

    /// Makes the node a raw text fragment.
    #[must_use]
    pub fn raw_text(mut self, text: impl Into<String>) -> Self {
        self.node.text = Some(TextContent::Raw(text.into()));
        self
    }

    /// Makes the node a styled text span.
    #[must_use]
    pub fn span(mut self, attributes: TextAttributes) -> Self {
        self.node.text = Some(TextContent::Span(attributes));
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn child(mut self, child: Arc<Node>) -> Self {
        self.node.children.push(child);
        self
    }

    /// Appends several children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Arc<Node>>) -> Self {
        self.node.children.extend(children);
        self
    }

    /// Seals the node.
    #[must_use]
    pub fn build(self) -> Arc<Node> {
        Arc::new(self.node)
    }
}
