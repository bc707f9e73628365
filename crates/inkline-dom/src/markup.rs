#![forbid(unsafe_code)]

//! Markup serialization.
//!
//! Hosts persist surface content as HTML-like markup (the equivalent of
//! reading `innerHTML` before a save). Only structure the model can
//! produce is emitted: element tags and text, with the three characters
//! that would corrupt markup escaped.

use crate::document::{Document, DocumentError};
use crate::node::{NodeId, NodePayload};

impl Document {
    /// Serialize a node and its subtree to markup.
    pub fn markup(&self, node: NodeId) -> Result<String, DocumentError> {
        let mut out = String::new();
        self.write_markup(node, &mut out)?;
        Ok(out)
    }

    /// Serialize a node's children to markup, without the node's own
    /// tag. The `innerHTML` shape hosts save.
    pub fn inner_markup(&self, node: NodeId) -> Result<String, DocumentError> {
        let mut out = String::new();
        for child in self.children(node)?.to_vec() {
            self.write_markup(child, &mut out)?;
        }
        Ok(out)
    }

    fn write_markup(&self, node: NodeId, out: &mut String) -> Result<(), DocumentError> {
        match self.payload(node)? {
            NodePayload::Text(text) => push_escaped(text, out),
            NodePayload::Element { tag, .. } => {
                let tag = tag.as_str();
                out.push('<');
                out.push_str(tag);
                out.push('>');
                for child in self.children(node)?.to_vec() {
                    self.write_markup(child, out)?;
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
        Ok(())
    }
}

fn push_escaped(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}
