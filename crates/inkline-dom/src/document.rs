#![forbid(unsafe_code)]

//! The editable surface tree.
//!
//! A [`Document`] is a node arena with explicit parent/child links, a
//! fixed root element, and a mutation generation counter. Mutations to
//! the attached tree bump the generation; staged subtrees (created but
//! not yet inserted) can be assembled without invalidating captured
//! ranges.
//!
//! Structural rules enforced here:
//! - text nodes never have children;
//! - a node has at most one parent, and the root has none;
//! - inserting a node under its own descendant is rejected;
//! - the root cannot be detached or re-attached.

use std::collections::BTreeMap;
use std::fmt;

use crate::node::{ElementTag, NodeId, NodePayload};
use crate::style::ComputedStyle;

#[derive(Debug, Clone)]
pub(crate) struct NodeEntry {
    pub(crate) payload: NodePayload,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// The editable surface: a tree of element and text nodes.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: BTreeMap<NodeId, NodeEntry>,
    root: NodeId,
    next_id: NodeId,
    generation: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document: a root `div` with no children.
    #[must_use]
    pub fn new() -> Self {
        let root = NodeId::MIN;
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            NodeEntry {
                payload: NodePayload::Element {
                    tag: ElementTag::Div,
                    style: ComputedStyle::default(),
                },
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            nodes,
            root,
            // Root consumed MIN.
            next_id: NodeId::new(2).expect("2 is a valid node id"),
            generation: 0,
        }
    }

    /// The root element of the surface.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Current mutation generation.
    ///
    /// Bumped on every mutation of the attached tree. Ranges captured at
    /// an older generation are stale.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of nodes in the arena (attached or staged).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True if the arena holds this node.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub(crate) fn entry(&self, node: NodeId) -> Result<&NodeEntry, DocumentError> {
        self.nodes
            .get(&node)
            .ok_or(DocumentError::UnknownNode { node })
    }

    fn entry_mut(&mut self, node: NodeId) -> Result<&mut NodeEntry, DocumentError> {
        self.nodes
            .get_mut(&node)
            .ok_or(DocumentError::UnknownNode { node })
    }

    fn alloc(&mut self, payload: NodePayload) -> Result<NodeId, DocumentError> {
        let id = self.next_id;
        self.next_id = id.checked_next()?;
        self.nodes.insert(
            id,
            NodeEntry {
                payload,
                parent: None,
                children: Vec::new(),
            },
        );
        Ok(id)
    }

    // --- Node creation (staged; does not touch the attached tree) ---

    /// Create a detached element with the default computed style.
    pub fn create_element(&mut self, tag: ElementTag) -> Result<NodeId, DocumentError> {
        self.create_element_styled(tag, ComputedStyle::default())
    }

    /// Create a detached element with an explicit computed style.
    pub fn create_element_styled(
        &mut self,
        tag: ElementTag,
        style: ComputedStyle,
    ) -> Result<NodeId, DocumentError> {
        self.alloc(NodePayload::Element { tag, style })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> Result<NodeId, DocumentError> {
        self.alloc(NodePayload::Text(text.into()))
    }

    // --- Read access ---

    /// The payload of a node.
    pub fn payload(&self, node: NodeId) -> Result<&NodePayload, DocumentError> {
        Ok(&self.entry(node)?.payload)
    }

    /// True if the node is a text node.
    pub fn is_text(&self, node: NodeId) -> Result<bool, DocumentError> {
        Ok(self.entry(node)?.payload.is_text())
    }

    /// The tag of an element node.
    pub fn tag(&self, node: NodeId) -> Result<ElementTag, DocumentError> {
        match &self.entry(node)?.payload {
            NodePayload::Element { tag, .. } => Ok(*tag),
            NodePayload::Text(_) => Err(DocumentError::KindMismatch {
                node,
                expected: "element",
            }),
        }
    }

    /// The computed style of an element node.
    pub fn style(&self, node: NodeId) -> Result<ComputedStyle, DocumentError> {
        match &self.entry(node)?.payload {
            NodePayload::Element { style, .. } => Ok(*style),
            NodePayload::Text(_) => Err(DocumentError::KindMismatch {
                node,
                expected: "element",
            }),
        }
    }

    /// Replace the computed style of an element node.
    pub fn set_style(&mut self, node: NodeId, style: ComputedStyle) -> Result<(), DocumentError> {
        let attached = self.is_attached(node);
        match &mut self.entry_mut(node)?.payload {
            NodePayload::Element { style: slot, .. } => *slot = style,
            NodePayload::Text(_) => {
                return Err(DocumentError::KindMismatch {
                    node,
                    expected: "element",
                });
            }
        }
        if attached {
            self.bump();
        }
        Ok(())
    }

    /// The content of a text node.
    pub fn text(&self, node: NodeId) -> Result<&str, DocumentError> {
        match &self.entry(node)?.payload {
            NodePayload::Text(text) => Ok(text),
            NodePayload::Element { .. } => Err(DocumentError::KindMismatch {
                node,
                expected: "text",
            }),
        }
    }

    /// Length of a text node in characters.
    pub fn text_char_len(&self, node: NodeId) -> Result<usize, DocumentError> {
        Ok(self.text(node)?.chars().count())
    }

    /// The parent of a node, if attached to one.
    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>, DocumentError> {
        Ok(self.entry(node)?.parent)
    }

    /// The children of a node (empty for text nodes).
    pub fn children(&self, node: NodeId) -> Result<&[NodeId], DocumentError> {
        Ok(&self.entry(node)?.children)
    }

    /// Number of children of a node.
    pub fn child_count(&self, node: NodeId) -> Result<usize, DocumentError> {
        Ok(self.entry(node)?.children.len())
    }

    /// Position of `child` within `parent`'s child list.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Result<usize, DocumentError> {
        self.entry(parent)?
            .children
            .iter()
            .position(|c| *c == child)
            .ok_or(DocumentError::NotAChild { parent, child })
    }

    /// True if the node is reachable from the root.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == self.root {
                return true;
            }
            match self.nodes.get(&current).and_then(|entry| entry.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Concatenated text content of a subtree, in document order.
    pub fn plain_text(&self, node: NodeId) -> Result<String, DocumentError> {
        let mut out = String::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let entry = self.entry(current)?;
            match &entry.payload {
                NodePayload::Text(text) => out.push_str(text),
                NodePayload::Element { .. } => {
                    for child in entry.children.iter().rev() {
                        stack.push(*child);
                    }
                }
            }
        }
        Ok(out)
    }

    // --- Structural mutation ---

    fn bump(&mut self) {
        self.generation += 1;
        tracing::trace!(generation = self.generation, "document mutated");
    }

    /// Append a detached node to the end of an element's children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        let index = self.child_count(parent)?;
        self.insert_child(parent, index, child)
    }

    /// Insert a detached node at `index` within an element's children.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), DocumentError> {
        if child == self.root {
            return Err(DocumentError::RootMutation);
        }
        let child_entry = self.entry(child)?;
        if child_entry.parent.is_some() {
            return Err(DocumentError::AlreadyAttached { node: child });
        }
        let parent_entry = self.entry(parent)?;
        if parent_entry.payload.is_text() {
            return Err(DocumentError::KindMismatch {
                node: parent,
                expected: "element",
            });
        }
        let len = parent_entry.children.len();
        if index > len {
            return Err(DocumentError::InvalidChildIndex {
                node: parent,
                index,
                len,
            });
        }
        // Attaching a node above itself would close a cycle.
        if self.is_descendant_or_self(parent, child) {
            return Err(DocumentError::WouldCycle { node: child });
        }

        let attached = self.is_attached(parent);
        self.entry_mut(parent)?.children.insert(index, child);
        self.entry_mut(child)?.parent = Some(parent);
        if attached {
            self.bump();
        }
        Ok(())
    }

    /// Detach a node from its parent, leaving it (and its subtree) staged.
    pub fn detach(&mut self, node: NodeId) -> Result<(), DocumentError> {
        if node == self.root {
            return Err(DocumentError::RootMutation);
        }
        let Some(parent) = self.entry(node)?.parent else {
            return Err(DocumentError::NotAttachedToParent { node });
        };
        let attached = self.is_attached(node);
        let index = self.child_index(parent, node)?;
        self.entry_mut(parent)?.children.remove(index);
        self.entry_mut(node)?.parent = None;
        if attached {
            self.bump();
        }
        Ok(())
    }

    /// Replace the character range `[start, end)` of a text node with
    /// `replacement`. Offsets are in characters.
    pub fn splice_text(
        &mut self,
        node: NodeId,
        start: usize,
        end: usize,
        replacement: &str,
    ) -> Result<(), DocumentError> {
        let attached = self.is_attached(node);
        let text = self.text(node)?;
        let len = text.chars().count();
        if start > end || end > len {
            return Err(DocumentError::InvalidTextOffset {
                node,
                offset: start.max(end),
                len,
            });
        }
        let byte_start = char_to_byte(text, start);
        let byte_end = char_to_byte(text, end);
        let mut updated = String::with_capacity(text.len() + replacement.len());
        updated.push_str(&text[..byte_start]);
        updated.push_str(replacement);
        updated.push_str(&text[byte_end..]);

        match &mut self.entry_mut(node)?.payload {
            NodePayload::Text(slot) => *slot = updated,
            NodePayload::Element { .. } => unreachable!("text() verified the payload kind"),
        }
        if attached {
            self.bump();
        }
        Ok(())
    }

    fn is_descendant_or_self(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|entry| entry.parent);
        }
        false
    }

    /// Verify structural invariants; used by tests and debug assertions.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if !self.contains(self.root) {
            return Err(DocumentError::UnknownNode { node: self.root });
        }
        for (id, entry) in &self.nodes {
            if entry.payload.is_text() && !entry.children.is_empty() {
                return Err(DocumentError::TextWithChildren { node: *id });
            }
            for child in &entry.children {
                let child_entry = self.entry(*child)?;
                if child_entry.parent != Some(*id) {
                    return Err(DocumentError::BrokenParentLink {
                        parent: *id,
                        child: *child,
                    });
                }
            }
            if let Some(parent) = entry.parent {
                self.child_index(parent, *id)?;
            }
        }
        Ok(())
    }
}

fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Structural and range failures in the surface model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Node id 0 is reserved.
    ZeroNodeId,
    /// The id space is exhausted.
    NodeIdOverflow {
        /// The highest id allocated.
        current: NodeId,
    },
    /// No node with this id exists in the arena.
    UnknownNode {
        /// The missing id.
        node: NodeId,
    },
    /// The node is the wrong kind for the operation.
    KindMismatch {
        /// The offending node.
        node: NodeId,
        /// The kind the operation needed.
        expected: &'static str,
    },
    /// A text node reported children.
    TextWithChildren {
        /// The offending node.
        node: NodeId,
    },
    /// Parent and child links disagree.
    BrokenParentLink {
        /// The parent whose child list names `child`.
        parent: NodeId,
        /// The child whose parent link disagrees.
        child: NodeId,
    },
    /// The node is already attached to a parent.
    AlreadyAttached {
        /// The offending node.
        node: NodeId,
    },
    /// The node has no parent to detach from.
    NotAttachedToParent {
        /// The offending node.
        node: NodeId,
    },
    /// The node is not a child of the named parent.
    NotAChild {
        /// The parent searched.
        parent: NodeId,
        /// The node that was not found.
        child: NodeId,
    },
    /// The root cannot be attached, detached, or replaced.
    RootMutation,
    /// Attaching here would create a cycle.
    WouldCycle {
        /// The node whose subtree contains the target parent.
        node: NodeId,
    },
    /// A child index is out of bounds.
    InvalidChildIndex {
        /// The parent element.
        node: NodeId,
        /// The requested index.
        index: usize,
        /// The current child count.
        len: usize,
    },
    /// A text offset is out of bounds.
    InvalidTextOffset {
        /// The text node.
        node: NodeId,
        /// The requested character offset.
        offset: usize,
        /// The text length in characters.
        len: usize,
    },
    /// A boundary point does not refer to an attached node.
    PositionDetached {
        /// The unattached node.
        node: NodeId,
    },
    /// Range boundaries are not in document order.
    InvalidRangeOrder,
    /// The range was captured before the last mutation.
    StaleRange {
        /// Generation the range was captured at.
        captured: u64,
        /// Current document generation.
        current: u64,
    },
    /// The range shape is not supported by this model.
    ///
    /// Boundaries must share a text node, an element, or a parent
    /// element; deeper cross-subtree ranges are rejected.
    UnsupportedRange,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroNodeId => write!(f, "node id 0 is reserved"),
            Self::NodeIdOverflow { current } => {
                write!(f, "node id space exhausted at {current}")
            }
            Self::UnknownNode { node } => write!(f, "unknown node {node}"),
            Self::KindMismatch { node, expected } => {
                write!(f, "node {node} is not a {expected} node")
            }
            Self::TextWithChildren { node } => {
                write!(f, "text node {node} has children")
            }
            Self::BrokenParentLink { parent, child } => {
                write!(f, "parent link of {child} disagrees with child list of {parent}")
            }
            Self::AlreadyAttached { node } => {
                write!(f, "node {node} is already attached")
            }
            Self::NotAttachedToParent { node } => {
                write!(f, "node {node} has no parent")
            }
            Self::NotAChild { parent, child } => {
                write!(f, "node {child} is not a child of {parent}")
            }
            Self::RootMutation => write!(f, "the root cannot be moved"),
            Self::WouldCycle { node } => {
                write!(f, "attaching {node} here would create a cycle")
            }
            Self::InvalidChildIndex { node, index, len } => {
                write!(f, "child index {index} out of bounds for {node} (len {len})")
            }
            Self::InvalidTextOffset { node, offset, len } => {
                write!(f, "text offset {offset} out of bounds for {node} (len {len})")
            }
            Self::PositionDetached { node } => {
                write!(f, "position refers to detached node {node}")
            }
            Self::InvalidRangeOrder => {
                write!(f, "range boundaries are not in document order")
            }
            Self::StaleRange { captured, current } => {
                write!(
                    f,
                    "range captured at generation {captured} is stale (document at {current})"
                )
            }
            Self::UnsupportedRange => {
                write!(f, "range shape is not supported")
            }
        }
    }
}

impl std::error::Error for DocumentError {}
