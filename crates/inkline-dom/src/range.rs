#![forbid(unsafe_code)]

//! Boundary points and ranges.
//!
//! A [`Range`] mirrors the DOM contract: two boundary points, each a
//! node plus an offset (character offset inside text nodes, child index
//! inside elements). Ranges are captured from a [`Document`] at a
//! specific mutation generation and refuse to operate once the document
//! has moved on — a captured range is re-fetched, never reused, after
//! any mutation.
//!
//! Supported range shapes for content operations:
//! - collapsed (caret);
//! - both boundaries in one text node;
//! - both boundaries in one element (child-index offsets);
//! - boundaries in siblings under a single parent element.
//!
//! Deeper cross-subtree shapes fail with
//! [`DocumentError::UnsupportedRange`]; the formatting engine treats
//! that as a failed manual format, matching its best-effort contract.

use crate::document::{Document, DocumentError};
use crate::node::NodeId;

/// A boundary point: a node and an offset within it.
///
/// For text nodes the offset counts characters; for elements it counts
/// children (an offset of `n` sits before the `n`-th child).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DomPosition {
    /// The node the position lives in.
    pub node: NodeId,
    /// Character offset (text) or child index (element).
    pub offset: usize,
}

impl DomPosition {
    /// Create a boundary point.
    #[must_use]
    pub const fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A captured selection range.
///
/// Only a [`Document`] constructs ranges, stamping them with its current
/// generation; every operation re-validates that stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    start: DomPosition,
    end: DomPosition,
    generation: u64,
}

impl Range {
    pub(crate) const fn from_parts(start: DomPosition, end: DomPosition, generation: u64) -> Self {
        Self {
            start,
            end,
            generation,
        }
    }

    /// The start boundary.
    #[must_use]
    pub const fn start(&self) -> DomPosition {
        self.start
    }

    /// The end boundary.
    #[must_use]
    pub const fn end(&self) -> DomPosition {
        self.end
    }

    /// Generation of the document when this range was captured.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// True if start and end coincide (a caret).
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// A boundary resolved against the tree, normalized to a slot in a
/// parent's child list plus an optional partial text offset.
#[derive(Debug, Clone, Copy)]
enum Bound {
    /// Inside a text node: `index` is the text node's position under
    /// `parent`, `offset` is the character offset.
    Text {
        node: NodeId,
        parent: NodeId,
        index: usize,
        offset: usize,
        len: usize,
    },
    /// Between children of an element.
    Slot { node: NodeId, index: usize },
}

impl Document {
    /// Validate that a position refers to an attached node and an
    /// in-bounds offset.
    pub fn check_position(&self, pos: DomPosition) -> Result<(), DocumentError> {
        if !self.is_attached(pos.node) {
            // Also covers unknown ids, but prefer the precise error.
            if !self.contains(pos.node) {
                return Err(DocumentError::UnknownNode { node: pos.node });
            }
            return Err(DocumentError::PositionDetached { node: pos.node });
        }
        if self.is_text(pos.node)? {
            let len = self.text_char_len(pos.node)?;
            if pos.offset > len {
                return Err(DocumentError::InvalidTextOffset {
                    node: pos.node,
                    offset: pos.offset,
                    len,
                });
            }
        } else {
            let len = self.child_count(pos.node)?;
            if pos.offset > len {
                return Err(DocumentError::InvalidChildIndex {
                    node: pos.node,
                    index: pos.offset,
                    len,
                });
            }
        }
        Ok(())
    }

    /// Capture a range between two boundary points.
    pub fn range(&self, start: DomPosition, end: DomPosition) -> Result<Range, DocumentError> {
        self.check_position(start)?;
        self.check_position(end)?;
        if start.node == end.node && start.offset > end.offset {
            return Err(DocumentError::InvalidRangeOrder);
        }
        if start.node != end.node {
            // Order-check the sibling shape; other shapes are permitted
            // here and constrained by the individual operations.
            if let (Ok(a), Ok(b)) = (self.resolve_bound(start), self.resolve_bound(end)) {
                if let (Some(pa), Some(pb)) = (bound_parent(&a), bound_parent(&b)) {
                    if pa == pb && sort_key(&a) > sort_key(&b) {
                        return Err(DocumentError::InvalidRangeOrder);
                    }
                }
            }
        }
        Ok(Range::from_parts(start, end, self.generation()))
    }

    /// Capture a collapsed range (caret) at a position.
    pub fn caret(&self, pos: DomPosition) -> Result<Range, DocumentError> {
        self.range(pos, pos)
    }

    /// Capture a range spanning the full contents of a node.
    pub fn select_node_contents(&self, node: NodeId) -> Result<Range, DocumentError> {
        let len = if self.is_text(node)? {
            self.text_char_len(node)?
        } else {
            self.child_count(node)?
        };
        self.range(DomPosition::new(node, 0), DomPosition::new(node, len))
    }

    /// Verify a range is current and its boundaries still valid.
    pub fn check_range(&self, range: &Range) -> Result<(), DocumentError> {
        if range.generation() != self.generation() {
            return Err(DocumentError::StaleRange {
                captured: range.generation(),
                current: self.generation(),
            });
        }
        self.check_position(range.start())?;
        self.check_position(range.end())
    }

    /// The deepest node containing both boundaries.
    pub fn common_ancestor(&self, range: &Range) -> Result<NodeId, DocumentError> {
        self.check_range(range)?;
        let start = range.start().node;
        let end = range.end().node;
        if start == end {
            return Ok(start);
        }
        let mut chain = Vec::new();
        let mut current = Some(start);
        while let Some(node) = current {
            chain.push(node);
            current = self.parent(node)?;
        }
        let mut current = Some(end);
        while let Some(node) = current {
            if chain.contains(&node) {
                return Ok(node);
            }
            current = self.parent(node)?;
        }
        // Both boundaries are attached, so the walk always meets at the
        // root; reaching here means a broken parent link.
        Err(DocumentError::BrokenParentLink {
            parent: self.root(),
            child: end,
        })
    }

    /// Plain-text content covered by a range.
    pub fn range_text(&self, range: &Range) -> Result<String, DocumentError> {
        self.check_range(range)?;
        if range.is_collapsed() {
            return Ok(String::new());
        }
        let (start, end) = (range.start(), range.end());

        if start.node == end.node {
            if self.is_text(start.node)? {
                let text = self.text(start.node)?;
                return Ok(char_slice(text, start.offset, end.offset).to_owned());
            }
            let mut out = String::new();
            let children = self.children(start.node)?.to_vec();
            for child in &children[start.offset..end.offset] {
                out.push_str(&self.plain_text(*child)?);
            }
            return Ok(out);
        }

        let (parent, first, last, head_trim, tail_trim) = self.sibling_span(start, end)?;
        let mut out = String::new();
        if let Some((node, offset, len)) = head_trim {
            let text = self.text(node)?;
            out.push_str(char_slice(text, offset, len));
        }
        let children = self.children(parent)?.to_vec();
        for child in &children[first..last] {
            out.push_str(&self.plain_text(*child)?);
        }
        if let Some((node, offset)) = tail_trim {
            let text = self.text(node)?;
            out.push_str(char_slice(text, 0, offset));
        }
        Ok(out)
    }

    /// Delete the contents covered by a range.
    ///
    /// Returns the collapsed boundary position where the deleted content
    /// used to start. Collapsed ranges are a no-op. The range itself is
    /// stale after this call (the document mutated); callers continue
    /// from the returned position.
    pub fn delete_range_contents(&mut self, range: &Range) -> Result<DomPosition, DocumentError> {
        self.check_range(range)?;
        if range.is_collapsed() {
            return Ok(range.start());
        }
        let (start, end) = (range.start(), range.end());

        if start.node == end.node {
            if self.is_text(start.node)? {
                self.splice_text(start.node, start.offset, end.offset, "")?;
                return Ok(DomPosition::new(start.node, start.offset));
            }
            let doomed = self.children(start.node)?[start.offset..end.offset].to_vec();
            for child in doomed {
                self.detach(child)?;
            }
            return Ok(DomPosition::new(start.node, start.offset));
        }

        let (parent, first, last, head_trim, tail_trim) = self.sibling_span(start, end)?;
        let doomed = self.children(parent)?[first..last].to_vec();
        for child in doomed {
            self.detach(child)?;
        }
        if let Some((node, offset, len)) = head_trim {
            self.splice_text(node, offset, len, "")?;
        }
        if let Some((node, offset)) = tail_trim {
            self.splice_text(node, 0, offset, "")?;
        }
        let boundary = match head_trim {
            Some((node, offset, _)) => DomPosition::new(node, offset),
            None => DomPosition::new(parent, first),
        };
        Ok(boundary)
    }

    /// Insert a staged node at a boundary position.
    ///
    /// Element positions insert at the child index; text positions split
    /// the text node when the offset falls strictly inside it.
    pub fn insert_node_at(
        &mut self,
        pos: DomPosition,
        node: NodeId,
    ) -> Result<(), DocumentError> {
        self.check_position(pos)?;
        if !self.is_text(pos.node)? {
            return self.insert_child(pos.node, pos.offset, node);
        }

        let target = pos.node;
        let parent = self
            .parent(target)?
            .ok_or(DocumentError::NotAttachedToParent { node: target })?;
        let index = self.child_index(parent, target)?;
        let len = self.text_char_len(target)?;

        if pos.offset == 0 {
            self.insert_child(parent, index, node)
        } else if pos.offset == len {
            self.insert_child(parent, index + 1, node)
        } else {
            let tail_text = char_slice(self.text(target)?, pos.offset, len).to_owned();
            self.splice_text(target, pos.offset, len, "")?;
            let tail = self.create_text(tail_text)?;
            self.insert_child(parent, index + 1, tail)?;
            self.insert_child(parent, index + 1, node)
        }
    }

    fn resolve_bound(&self, pos: DomPosition) -> Result<Bound, DocumentError> {
        if self.is_text(pos.node)? {
            let parent = self
                .parent(pos.node)?
                .ok_or(DocumentError::NotAttachedToParent { node: pos.node })?;
            Ok(Bound::Text {
                node: pos.node,
                parent,
                index: self.child_index(parent, pos.node)?,
                offset: pos.offset,
                len: self.text_char_len(pos.node)?,
            })
        } else {
            Ok(Bound::Slot {
                node: pos.node,
                index: pos.offset,
            })
        }
    }

    /// Normalize a sibling-shaped range to
    /// `(parent, first_full_child, last_full_child_exclusive,
    ///   head_text_trim, tail_text_trim)`.
    #[allow(clippy::type_complexity)]
    fn sibling_span(
        &self,
        start: DomPosition,
        end: DomPosition,
    ) -> Result<
        (
            NodeId,
            usize,
            usize,
            Option<(NodeId, usize, usize)>,
            Option<(NodeId, usize)>,
        ),
        DocumentError,
    > {
        let start_bound = self.resolve_bound(start)?;
        let end_bound = self.resolve_bound(end)?;
        let (start_parent, end_parent) = match (bound_parent(&start_bound), bound_parent(&end_bound))
        {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(DocumentError::UnsupportedRange),
        };
        if start_parent != end_parent {
            return Err(DocumentError::UnsupportedRange);
        }

        let (first, head_trim) = match start_bound {
            Bound::Text {
                node,
                index,
                offset,
                len,
                ..
            } => (index + 1, Some((node, offset, len))),
            Bound::Slot { index, .. } => (index, None),
        };
        let (last, tail_trim) = match end_bound {
            Bound::Text {
                node, index, offset, ..
            } => (index, Some((node, offset))),
            Bound::Slot { index, .. } => (index, None),
        };
        if first > last {
            return Err(DocumentError::InvalidRangeOrder);
        }
        Ok((start_parent, first, last, head_trim, tail_trim))
    }
}

fn bound_parent(bound: &Bound) -> Option<NodeId> {
    match bound {
        Bound::Text { parent, .. } => Some(*parent),
        Bound::Slot { node, .. } => Some(*node),
    }
}

/// Position sort key for bounds that share a parent: text content at
/// child index `i` sorts inside slot positions `i` and `i + 1`.
fn sort_key(bound: &Bound) -> (usize, usize) {
    match bound {
        Bound::Text { index, offset, .. } => (index * 2 + 1, *offset),
        Bound::Slot { index, .. } => (index * 2, 0),
    }
}

fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let byte_start = char_to_byte(text, start);
    let byte_end = char_to_byte(text, end);
    &text[byte_start..byte_end]
}

fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(byte, _)| byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ElementTag;

    fn doc_with_text(text: &str) -> (Document, NodeId) {
        let mut doc = Document::new();
        let node = doc.create_text(text).unwrap();
        doc.append_child(doc.root(), node).unwrap();
        (doc, node)
    }

    #[test]
    fn collapsed_range_reports_empty_text() {
        let (doc, node) = doc_with_text("hello");
        let caret = doc.caret(DomPosition::new(node, 2)).unwrap();
        assert!(caret.is_collapsed());
        assert_eq!(doc.range_text(&caret).unwrap(), "");
    }

    #[test]
    fn text_range_within_one_node() {
        let (doc, node) = doc_with_text("hello world");
        let range = doc
            .range(DomPosition::new(node, 0), DomPosition::new(node, 5))
            .unwrap();
        assert_eq!(doc.range_text(&range).unwrap(), "hello");
    }

    #[test]
    fn delete_within_one_text_node() {
        let (mut doc, node) = doc_with_text("hello world");
        let range = doc
            .range(DomPosition::new(node, 0), DomPosition::new(node, 5))
            .unwrap();
        let boundary = doc.delete_range_contents(&range).unwrap();
        assert_eq!(doc.text(node).unwrap(), " world");
        assert_eq!(boundary, DomPosition::new(node, 0));
    }

    #[test]
    fn delete_element_child_span() {
        let mut doc = Document::new();
        let a = doc.create_text("a").unwrap();
        let b = doc.create_text("b").unwrap();
        let c = doc.create_text("c").unwrap();
        for node in [a, b, c] {
            doc.append_child(doc.root(), node).unwrap();
        }
        let range = doc
            .range(
                DomPosition::new(doc.root(), 0),
                DomPosition::new(doc.root(), 2),
            )
            .unwrap();
        let boundary = doc.delete_range_contents(&range).unwrap();
        assert_eq!(doc.plain_text(doc.root()).unwrap(), "c");
        assert_eq!(boundary, DomPosition::new(doc.root(), 0));
        assert!(!doc.is_attached(a));
        assert!(doc.contains(a), "detached, not destroyed");
    }

    #[test]
    fn sibling_text_range_across_two_nodes() {
        let mut doc = Document::new();
        let left = doc.create_text("hello ").unwrap();
        let right = doc.create_text("world").unwrap();
        doc.append_child(doc.root(), left).unwrap();
        doc.append_child(doc.root(), right).unwrap();

        let range = doc
            .range(DomPosition::new(left, 3), DomPosition::new(right, 2))
            .unwrap();
        assert_eq!(doc.range_text(&range).unwrap(), "lo wo");

        let boundary = doc.delete_range_contents(&range).unwrap();
        assert_eq!(doc.plain_text(doc.root()).unwrap(), "helrld");
        assert_eq!(boundary, DomPosition::new(left, 3));
    }

    #[test]
    fn stale_range_is_rejected() {
        let (mut doc, node) = doc_with_text("hello");
        let range = doc
            .range(DomPosition::new(node, 0), DomPosition::new(node, 5))
            .unwrap();
        doc.splice_text(node, 0, 1, "j").unwrap();
        assert!(matches!(
            doc.range_text(&range),
            Err(DocumentError::StaleRange { .. })
        ));
        assert!(matches!(
            doc.delete_range_contents(&range),
            Err(DocumentError::StaleRange { .. })
        ));
    }

    #[test]
    fn reversed_boundaries_are_rejected() {
        let (doc, node) = doc_with_text("hello");
        assert_eq!(
            doc.range(DomPosition::new(node, 4), DomPosition::new(node, 1)),
            Err(DocumentError::InvalidRangeOrder)
        );
    }

    #[test]
    fn insert_at_text_start_and_end() {
        let (mut doc, node) = doc_with_text("world");
        let el = doc.create_element(ElementTag::Strong).unwrap();
        doc.insert_node_at(DomPosition::new(node, 0), el).unwrap();
        assert_eq!(doc.children(doc.root()).unwrap(), &[el, node]);

        let el2 = doc.create_element(ElementTag::Em).unwrap();
        doc.insert_node_at(DomPosition::new(node, 5), el2).unwrap();
        assert_eq!(doc.children(doc.root()).unwrap(), &[el, node, el2]);
    }

    #[test]
    fn insert_mid_text_splits_the_node() {
        let (mut doc, node) = doc_with_text("ab");
        let el = doc.create_element(ElementTag::U).unwrap();
        doc.insert_node_at(DomPosition::new(node, 1), el).unwrap();

        let children = doc.children(doc.root()).unwrap().to_vec();
        assert_eq!(children.len(), 3);
        assert_eq!(doc.text(children[0]).unwrap(), "a");
        assert_eq!(children[1], el);
        assert_eq!(doc.text(children[2]).unwrap(), "b");
    }

    #[test]
    fn select_node_contents_spans_children() {
        let mut doc = Document::new();
        let el = doc.create_element(ElementTag::Strong).unwrap();
        let text = doc.create_text("hi").unwrap();
        doc.append_child(el, text).unwrap();
        doc.append_child(doc.root(), el).unwrap();

        let range = doc.select_node_contents(el).unwrap();
        assert_eq!(range.start(), DomPosition::new(el, 0));
        assert_eq!(range.end(), DomPosition::new(el, 1));
        assert_eq!(doc.range_text(&range).unwrap(), "hi");
    }

    #[test]
    fn common_ancestor_of_sibling_texts_is_parent() {
        let mut doc = Document::new();
        let strong = doc.create_element(ElementTag::Strong).unwrap();
        let inner = doc.create_text("hi").unwrap();
        doc.append_child(strong, inner).unwrap();
        doc.append_child(doc.root(), strong).unwrap();
        let tail = doc.create_text(" there").unwrap();
        doc.append_child(doc.root(), tail).unwrap();

        let range = doc
            .range(DomPosition::new(inner, 0), DomPosition::new(tail, 3))
            .unwrap();
        assert_eq!(doc.common_ancestor(&range).unwrap(), doc.root());

        let within = doc
            .range(DomPosition::new(inner, 0), DomPosition::new(inner, 2))
            .unwrap();
        assert_eq!(doc.common_ancestor(&within).unwrap(), inner);
    }

    #[test]
    fn cross_subtree_delete_is_unsupported() {
        let mut doc = Document::new();
        let p1 = doc.create_element(ElementTag::P).unwrap();
        let p2 = doc.create_element(ElementTag::P).unwrap();
        let t1 = doc.create_text("one").unwrap();
        let t2 = doc.create_text("two").unwrap();
        doc.append_child(p1, t1).unwrap();
        doc.append_child(p2, t2).unwrap();
        doc.append_child(doc.root(), p1).unwrap();
        doc.append_child(doc.root(), p2).unwrap();

        let range = doc
            .range(DomPosition::new(t1, 1), DomPosition::new(t2, 1))
            .unwrap();
        assert_eq!(
            doc.delete_range_contents(&range),
            Err(DocumentError::UnsupportedRange)
        );
    }
}
