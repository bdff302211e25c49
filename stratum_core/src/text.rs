// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text capability and attributed-string assembly.
//!
//! Nodes opt into text semantics through
//! [`ShadowNode::as_text_like`](crate::node::ShadowNode::as_text_like) instead
//! of being identified by concrete type. [`attributed_string`] walks a
//! paragraph's children and concatenates their fragments.
//!
//! Fragments remember the [`ShadowView`] of the node that owns them rather
//! than the node itself, so an attributed string never keeps a shadow tree
//! alive.

use alloc::string::String;
use alloc::vec::Vec;

use crate::node::ShadowNode;
use crate::view::ShadowView;

/// Placeholder character for an inline attachment (a non-text child).
pub const ATTACHMENT_CHARACTER: &str = "\u{FFFC}";

/// Text capability exposed by a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextFacet<'a> {
    /// A raw string fragment.
    RawText(&'a str),
    /// A styled span; its children carry the text.
    Span(&'a TextAttributes),
}

/// Cascading text attributes. `None` means "inherit".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextAttributes {
    /// Font size in points.
    pub font_size: Option<f64>,
    /// Font weight (100–900).
    pub font_weight: Option<u16>,
    /// Italic style.
    pub italic: Option<bool>,
    /// Foreground color as `0xRRGGBBAA`.
    pub foreground_color: Option<u32>,
}

impl TextAttributes {
    /// Overrides every field that is set on `other`.
    pub fn apply(&mut self, other: &Self) {
        if other.font_size.is_some() {
            self.font_size = other.font_size;
        }
        if other.font_weight.is_some() {
            self.font_weight = other.font_weight;
        }
        if other.italic.is_some() {
            self.italic = other.italic;
        }
        if other.foreground_color.is_some() {
            self.foreground_color = other.foreground_color;
        }
    }
}

/// A run of text with uniform attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    /// The text (or [`ATTACHMENT_CHARACTER`]).
    pub string: String,
    /// Effective attributes of the run.
    pub attributes: TextAttributes,
    /// View of the node the run belongs to.
    pub parent_view: ShadowView,
}

impl Fragment {
    /// Returns `true` if this fragment stands for an inline attachment.
    #[must_use]
    pub fn is_attachment(&self) -> bool {
        self.string == ATTACHMENT_CHARACTER
    }
}

/// An ordered list of fragments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributedString {
    fragments: Vec<Fragment>,
}

impl AttributedString {
    /// Creates an empty string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment. Empty fragments are dropped.
    pub fn append_fragment(&mut self, fragment: Fragment) {
        if fragment.string.is_empty() {
            return;
        }
        self.fragments.push(fragment);
    }

    /// Appends all fragments of `other`.
    pub fn append_attributed_string(&mut self, other: Self) {
        self.fragments.extend(other.fragments);
    }

    /// Returns the fragments.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Returns `true` if there are no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Concatenates the text of every fragment.
    #[must_use]
    pub fn string(&self) -> String {
        self.fragments.iter().map(|f| f.string.as_str()).collect()
    }
}

/// Builds the attributed string for the children of `parent`.
///
/// Raw text children contribute their text with `attributes`. Span children
/// layer their own attributes on top and contribute their subtree. Every
/// other child becomes an attachment.
pub fn attributed_string<N: ShadowNode>(attributes: &TextAttributes, parent: &N) -> AttributedString {
    let mut result = AttributedString::new();

    for child in parent.children() {
        match child.as_text_like() {
            Some(TextFacet::RawText(text)) => {
                result.append_fragment(Fragment {
                    string: String::from(text),
                    attributes: *attributes,
                    parent_view: parent.shadow_view(),
                });
            }
            Some(TextFacet::Span(span)) => {
                let mut local = *attributes;
                local.apply(span);
                result.append_attributed_string(attributed_string(&local, &**child));
            }
            None => {
                result.append_fragment(Fragment {
                    string: String::from(ATTACHMENT_CHARACTER),
                    attributes: *attributes,
                    parent_view: child.shadow_view(),
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn bold() -> TextAttributes {
        TextAttributes {
            font_weight: Some(700),
            ..TextAttributes::default()
        }
    }

    #[test]
    fn apply_overrides_only_set_fields() {
        let mut base = TextAttributes {
            font_size: Some(14.0),
            font_weight: Some(400),
            ..TextAttributes::default()
        };
        base.apply(&bold());
        assert_eq!(base.font_size, Some(14.0));
        assert_eq!(base.font_weight, Some(700));
        assert_eq!(base.italic, None);
    }

    #[test]
    fn raw_span_and_attachment() {
        let paragraph = Node::builder(1, "Paragraph")
            .child(Node::builder(2, "RawText").layout_only().raw_text("Hello ").build())
            .child(
                Node::builder(3, "Text")
                    .layout_only()
                    .span(bold())
                    .child(Node::builder(4, "RawText").layout_only().raw_text("world").build())
                    .build(),
            )
            .child(Node::builder(5, "Image").build())
            .build();

        let base = TextAttributes {
            font_size: Some(12.0),
            ..TextAttributes::default()
        };
        let result = attributed_string(&base, &*paragraph);
        let fragments = result.fragments();

        assert_eq!(result.string(), "Hello world\u{FFFC}");
        assert_eq!(fragments.len(), 3);

        assert_eq!(fragments[0].parent_view.tag, 1);
        assert_eq!(fragments[0].attributes, base);

        assert_eq!(fragments[1].string, "world");
        assert_eq!(fragments[1].parent_view.tag, 3);
        assert_eq!(fragments[1].attributes.font_weight, Some(700));
        assert_eq!(fragments[1].attributes.font_size, Some(12.0));

        assert!(fragments[2].is_attachment());
        assert_eq!(fragments[2].parent_view.tag, 5);
    }

    #[test]
    fn empty_raw_text_is_dropped() {
        let paragraph = Node::builder(1, "Paragraph")
            .child(Node::builder(2, "RawText").layout_only().raw_text("").build())
            .build();
        assert!(attributed_string(&TextAttributes::default(), &*paragraph).is_empty());
    }
}
