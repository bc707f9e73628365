#![forbid(unsafe_code)]

//! Selection controller.
//!
//! Mirrors the platform selection contract the formatting engine was
//! written against: zero or one active range, `rangeCount` semantics,
//! and focus ownership of the surface. The controller stores captured
//! [`Range`]s verbatim; staleness is enforced by the document when a
//! range is used, not here.

use crate::range::Range;

/// The surface's selection: at most one active range, plus focus state.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    range: Option<Range>,
    focused: bool,
}

impl SelectionController {
    /// Create an empty, unfocused selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active ranges (0 or 1).
    #[must_use]
    pub fn range_count(&self) -> usize {
        usize::from(self.range.is_some())
    }

    /// Drop the active range.
    pub fn remove_all_ranges(&mut self) {
        self.range = None;
    }

    /// Replace the active range.
    pub fn add_range(&mut self, range: Range) {
        self.range = Some(range);
    }

    /// The active range, if any.
    #[must_use]
    pub fn primary_range(&self) -> Option<Range> {
        self.range
    }

    /// Give the surface input focus.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Remove input focus.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// True if the surface holds input focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::range::DomPosition;

    #[test]
    fn range_count_tracks_the_single_slot() {
        let mut doc = Document::new();
        let text = doc.create_text("hi").unwrap();
        doc.append_child(doc.root(), text).unwrap();

        let mut selection = SelectionController::new();
        assert_eq!(selection.range_count(), 0);
        assert!(selection.primary_range().is_none());

        let range = doc.caret(DomPosition::new(text, 1)).unwrap();
        selection.add_range(range);
        assert_eq!(selection.range_count(), 1);
        assert_eq!(selection.primary_range(), Some(range));

        let replacement = doc.caret(DomPosition::new(text, 0)).unwrap();
        selection.add_range(replacement);
        assert_eq!(selection.range_count(), 1, "one active range at most");
        assert_eq!(selection.primary_range(), Some(replacement));

        selection.remove_all_ranges();
        assert_eq!(selection.range_count(), 0);
    }

    #[test]
    fn focus_toggles() {
        let mut selection = SelectionController::new();
        assert!(!selection.is_focused());
        selection.focus();
        assert!(selection.is_focused());
        selection.blur();
        assert!(!selection.is_focused());
    }
}
