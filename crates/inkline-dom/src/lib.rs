#![forbid(unsafe_code)]

//! Editable surface model for inkline.
//!
//! # Role in inkline
//! `inkline-dom` is the platform-neutral stand-in for a content-editable
//! region: a tree of element and text nodes with computed styles, plus
//! the selection and range machinery the formatting engine operates
//! through. Nothing here knows about rendering; hosts adapt a real
//! surface (browser DOM, TUI buffer, test fixture) to this model.
//!
//! # This crate provides
//! - [`Document`]: the node arena with structural mutation operations.
//! - [`ElementTag`], [`ComputedStyle`]: wrapper tags and style facts the
//!   format-state walk inspects.
//! - [`Range`] and [`DomPosition`]: boundary-point ranges with staleness
//!   tracking tied to the document's mutation generation.
//! - [`SelectionController`]: the zero-or-one active range plus focus.
//! - [`Surface`] / [`SurfaceHandle`]: shared ownership between a host
//!   and the engine, with the engine holding only a weak handle.
//!
//! # Staleness contract
//! Every mutation bumps the document generation. A [`Range`] captures
//! the generation it was created at; using it against a newer document
//! fails with [`DocumentError::StaleRange`] instead of operating on
//! nodes that may have moved. Callers re-fetch ranges from the
//! selection after any mutation.

/// Node arena, mutation operations, and structural validation.
pub mod document;
/// Serialization of subtrees to HTML-like markup.
pub mod markup;
/// Node identifiers, tags, and payloads.
pub mod node;
/// Boundary points and DOM-shaped ranges.
pub mod range;
/// Selection controller with rangeCount semantics.
pub mod selection;
/// Computed style facts: weight, slant, decoration.
pub mod style;
/// Shared surface state and weak handles.
pub mod surface;

pub use document::{Document, DocumentError};
pub use node::{ElementTag, NodeId, NodePayload};
pub use range::{DomPosition, Range};
pub use selection::SelectionController;
pub use style::{BOLD_WEIGHT_MIN, ComputedStyle, FontStyle, TextDecoration};
pub use surface::{Surface, SurfaceHandle, SurfaceState};
