#![forbid(unsafe_code)]

//! Format-state detection.
//!
//! The manual fallback for "what formatting is active here?" inspects
//! the selection's ancestor elements. The walk is written against the
//! small [`StyleProbe`] trait rather than a concrete tree so it can be
//! exercised without a rendering engine, and so a host with its own
//! surface representation can plug straight in.
//!
//! Detection rules, per ancestor:
//! - **bold**: `strong`/`b` tag, or computed font weight at or above
//!   700 — even on a neutral container; presentational and semantic
//!   bold are deliberately conflated.
//! - **italic**: `em`/`i` tag, or an italic/oblique computed slant.
//! - **underline**: `u` tag, or an underline decoration line.
//!
//! All three kinds are checked in the same pass; each latches on its
//! first hit and the walk stops early once all three are set.

use inkline_dom::{ComputedStyle, Document, ElementTag, NodeId};

use crate::command::FormatCommand;
use crate::state::FormatState;

/// Read access the ancestor walk needs from a node tree.
///
/// All methods are infallible by design: a probe that cannot answer
/// returns `None`/`false` and the walk treats the node as unstyled.
pub trait StyleProbe {
    /// True if the node is a text node.
    fn is_text(&self, node: NodeId) -> bool;

    /// The element tag, if the node is an element.
    fn tag(&self, node: NodeId) -> Option<ElementTag>;

    /// The computed style, if the node is an element.
    fn style(&self, node: NodeId) -> Option<ComputedStyle>;

    /// The node's parent, if attached to one.
    fn parent(&self, node: NodeId) -> Option<NodeId>;
}

impl StyleProbe for Document {
    fn is_text(&self, node: NodeId) -> bool {
        Document::is_text(self, node).unwrap_or(false)
    }

    fn tag(&self, node: NodeId) -> Option<ElementTag> {
        Document::tag(self, node).ok()
    }

    fn style(&self, node: NodeId) -> Option<ComputedStyle> {
        Document::style(self, node).ok()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Document::parent(self, node).ok().flatten()
    }
}

/// Walk from `start` up to (but excluding) `root`, collecting active
/// formats.
///
/// A text `start` is promoted to its parent element first. Returns
/// all-inactive when `start` is the root itself, detached, or unknown
/// to the probe.
pub fn ancestor_format_state(
    probe: &impl StyleProbe,
    start: NodeId,
    root: NodeId,
) -> FormatState {
    let mut state = FormatState::inactive();

    let mut current = if probe.is_text(start) {
        match probe.parent(start) {
            Some(parent) => parent,
            None => return state,
        }
    } else {
        start
    };

    while current != root {
        let tag = probe.tag(current);
        let style = probe.style(current);

        if !state.bold {
            let by_tag = matches!(tag, Some(ElementTag::Strong | ElementTag::B));
            let by_style = style.is_some_and(|s| s.is_bold_weight());
            if by_tag || by_style {
                state.set_active(FormatCommand::Bold, true);
            }
        }
        if !state.italic {
            let by_tag = matches!(tag, Some(ElementTag::Em | ElementTag::I));
            let by_style = style.is_some_and(|s| s.is_italic());
            if by_tag || by_style {
                state.set_active(FormatCommand::Italic, true);
            }
        }
        if !state.underline {
            let by_tag = matches!(tag, Some(ElementTag::U));
            let by_style = style.is_some_and(|s| s.has_underline());
            if by_tag || by_style {
                state.set_active(FormatCommand::Underline, true);
            }
        }

        if state.all_active() {
            break;
        }
        match probe.parent(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkline_dom::{FontStyle, TextDecoration};

    /// root > strong > em > text
    fn nested_doc() -> (Document, NodeId) {
        let mut doc = Document::new();
        let strong = doc.create_element(ElementTag::Strong).unwrap();
        let em = doc.create_element(ElementTag::Em).unwrap();
        let text = doc.create_text("styled").unwrap();
        doc.append_child(em, text).unwrap();
        doc.append_child(strong, em).unwrap();
        doc.append_child(doc.root(), strong).unwrap();
        (doc, text)
    }

    #[test]
    fn nested_wrappers_accumulate_in_one_pass() {
        let (doc, text) = nested_doc();
        let state = ancestor_format_state(&doc, text, doc.root());
        assert!(state.bold);
        assert!(state.italic);
        assert!(!state.underline);
    }

    #[test]
    fn legacy_tags_are_recognized() {
        let mut doc = Document::new();
        let b = doc.create_element(ElementTag::B).unwrap();
        let i = doc.create_element(ElementTag::I).unwrap();
        let text = doc.create_text("old school").unwrap();
        doc.append_child(i, text).unwrap();
        doc.append_child(b, i).unwrap();
        doc.append_child(doc.root(), b).unwrap();

        let state = ancestor_format_state(&doc, text, doc.root());
        assert!(state.bold);
        assert!(state.italic);
    }

    #[test]
    fn styled_span_reports_presentational_formats() {
        let mut doc = Document::new();
        let style = ComputedStyle::new()
            .with_weight(700)
            .with_font_style(FontStyle::Italic)
            .with_decoration(TextDecoration::UNDERLINE);
        let span = doc.create_element_styled(ElementTag::Span, style).unwrap();
        let text = doc.create_text("styled span").unwrap();
        doc.append_child(span, text).unwrap();
        doc.append_child(doc.root(), span).unwrap();

        let state = ancestor_format_state(&doc, text, doc.root());
        assert!(state.bold, "weight 700 counts even without a strong tag");
        assert!(state.italic);
        assert!(state.underline);
    }

    #[test]
    fn weight_below_threshold_is_not_bold() {
        let mut doc = Document::new();
        let span = doc
            .create_element_styled(ElementTag::Span, ComputedStyle::new().with_weight(600))
            .unwrap();
        let text = doc.create_text("medium").unwrap();
        doc.append_child(span, text).unwrap();
        doc.append_child(doc.root(), span).unwrap();

        let state = ancestor_format_state(&doc, text, doc.root());
        assert!(!state.bold);
    }

    #[test]
    fn root_is_excluded_from_the_walk() {
        let mut doc = Document::new();
        let text = doc.create_text("plain").unwrap();
        doc.append_child(doc.root(), text).unwrap();

        // Even a bold-styled root must not count.
        doc.set_style(doc.root(), ComputedStyle::new().with_weight(900))
            .unwrap();

        let state = ancestor_format_state(&doc, text, doc.root());
        assert_eq!(state, FormatState::inactive());
    }

    #[test]
    fn starting_at_root_reports_nothing() {
        let doc = Document::new();
        let state = ancestor_format_state(&doc, doc.root(), doc.root());
        assert_eq!(state, FormatState::inactive());
    }

    #[test]
    fn detached_start_reports_nothing() {
        let mut doc = Document::new();
        let text = doc.create_text("floating").unwrap();
        let state = ancestor_format_state(&doc, text, doc.root());
        assert_eq!(state, FormatState::inactive());
    }
}
