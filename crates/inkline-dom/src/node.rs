#![forbid(unsafe_code)]

//! Node identifiers, element tags, and node payloads.

use std::fmt;

use crate::document::DocumentError;
use crate::style::ComputedStyle;

/// Stable identifier for document nodes.
///
/// `0` is reserved/invalid so IDs are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(u64);

impl NodeId {
    /// Lowest valid node ID.
    pub const MIN: Self = Self(1);

    /// Create a new node ID, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, DocumentError> {
        if raw == 0 {
            return Err(DocumentError::ZeroNodeId);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Return the next ID, or an error on overflow.
    pub fn checked_next(self) -> Result<Self, DocumentError> {
        let Some(next) = self.0.checked_add(1) else {
            return Err(DocumentError::NodeIdOverflow { current: self });
        };
        Self::new(next)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element tags the surface model recognizes.
///
/// `Strong`, `Em`, and `U` are the canonical inline-formatting wrappers;
/// `B` and `I` are their legacy equivalents and are recognized during
/// format-state detection but never produced. The rest are neutral
/// containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ElementTag {
    /// Canonical bold wrapper.
    Strong,
    /// Canonical italic wrapper.
    Em,
    /// Canonical underline wrapper.
    U,
    /// Legacy bold wrapper.
    B,
    /// Legacy italic wrapper.
    I,
    /// Neutral inline container.
    Span,
    /// Neutral block container (also the surface root).
    Div,
    /// Paragraph container.
    P,
}

impl ElementTag {
    /// Lowercase tag name, as it would appear in markup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Em => "em",
            Self::U => "u",
            Self::B => "b",
            Self::I => "i",
            Self::Span => "span",
            Self::Div => "div",
            Self::P => "p",
        }
    }
}

impl fmt::Display for ElementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a document node.
///
/// Structure (parent/children links) lives in the document arena, not
/// here; text nodes are guaranteed childless by the document's mutation
/// operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodePayload {
    /// An element with a tag and computed style.
    Element {
        /// The element's tag.
        tag: ElementTag,
        /// Style facts as a renderer would compute them.
        style: ComputedStyle,
    },
    /// A text run.
    Text(String),
}

impl NodePayload {
    /// True if this is a text node.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}
