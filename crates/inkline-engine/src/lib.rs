#![forbid(unsafe_code)]

//! The inline formatting engine.
//!
//! # Role in inkline
//! This crate is the reason the rest exists: it applies bold, italic,
//! and underline to the current selection of an editable surface and
//! reports which of the three are active there. Hosts wire toolbar
//! clicks and keyboard shortcuts to a [`TextFormatter`] and re-render
//! their indicators whenever it emits a selection-changed notification.
//!
//! # How formatting is applied
//! Commands go through an ordered strategy list built at construction
//! from the surface's capabilities:
//!
//! 1. [`NativeCommandStrategy`] — the platform's own formatting command,
//!    when the backend advertises one.
//! 2. [`ManualWrapStrategy`] — direct tree manipulation: wrap the
//!    selected text in a fresh wrapper element, or seed an empty wrapper
//!    with a zero-width space at a collapsed cursor.
//!
//! The first strategy to apply wins. Every success defers a
//! [`inkline_core::EditorEvent::SelectionChanged`] notification to the
//! next scheduler tick so listeners observe the settled tree.
//!
//! # How state is detected
//! [`TextFormatter::format_state`] prefers the backend's native query
//! facility, falling back to a single upward walk over the selection's
//! ancestors ([`ancestor_format_state`]) that checks wrapper tags and
//! computed styles for all three kinds in one pass. Detection never
//! errors: anything that goes wrong reports all-inactive, because a
//! wrong toolbar indicator beats interrupting typing.

/// The command backend seam for native formatting facilities.
pub mod backend;
/// Format commands and their wrapper tags and shortcut keys.
pub mod command;
/// The formatting engine and its error taxonomy.
pub mod formatter;
/// Format-state detection: the style probe and ancestor walk.
pub mod probe;
/// Tri-state snapshot of active inline formats.
pub mod state;
/// The ordered formatting strategy tier.
pub mod strategy;

pub use backend::{CommandBackend, NullBackend};
pub use command::FormatCommand;
pub use formatter::{FormatError, ShortcutOutcome, TextFormatter};
pub use probe::{StyleProbe, ancestor_format_state};
pub use state::FormatState;
pub use strategy::{
    FormatStrategy, ManualWrapStrategy, NativeCommandStrategy, StrategyOutcome, ZERO_WIDTH_SPACE,
};
