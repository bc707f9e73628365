#![forbid(unsafe_code)]

//! Formatting strategies.
//!
//! # Role
//! A [`FormatStrategy`] is one way of toggling a format over the current
//! selection. The engine holds an ordered list and walks it until one
//! strategy reports [`StrategyOutcome::Applied`]: native first when the
//! surface has a native command facility, then the manual wrap.
//!
//! # Design Notes
//! `Unavailable` means "not my job here, try the next one" and is never
//! an error; hard failures (a stale range, an unsupported selection
//! shape) abort the walk and surface to the caller. Strategies mutate
//! the shared [`SurfaceState`] directly; notification is the engine's
//! concern, not theirs.

use std::rc::Rc;

use inkline_core::SurfaceCaps;
use inkline_dom::{DocumentError, DomPosition, SurfaceState};

use crate::backend::CommandBackend;
use crate::command::FormatCommand;

/// Seed character for wrappers created at a collapsed cursor.
///
/// Invisible, but gives the empty wrapper a place for the caret so that
/// subsequent typing lands inside the formatted element.
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// What a strategy did with a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyOutcome {
    /// The format was applied; stop the walk.
    Applied,
    /// This strategy cannot handle the current situation; try the next.
    Unavailable,
}

/// One way of applying a format command to a surface.
pub trait FormatStrategy {
    /// Stable name, for tracing.
    fn name(&self) -> &'static str;

    /// Attempt to apply `command` to the surface's current selection.
    fn apply(
        &self,
        state: &mut SurfaceState,
        command: FormatCommand,
    ) -> Result<StrategyOutcome, DocumentError>;
}

/// Delegate to the surface's native formatting command.
pub struct NativeCommandStrategy {
    backend: Rc<dyn CommandBackend>,
}

impl NativeCommandStrategy {
    /// Wrap a backend as a strategy.
    #[must_use]
    pub fn new(backend: Rc<dyn CommandBackend>) -> Self {
        Self { backend }
    }
}

impl FormatStrategy for NativeCommandStrategy {
    fn name(&self) -> &'static str {
        "native-command"
    }

    fn apply(
        &self,
        _state: &mut SurfaceState,
        command: FormatCommand,
    ) -> Result<StrategyOutcome, DocumentError> {
        if !self.backend.caps().contains(SurfaceCaps::EXEC_COMMAND) {
            return Ok(StrategyOutcome::Unavailable);
        }
        if self.backend.exec(command) {
            tracing::debug!(%command, "native command applied");
            Ok(StrategyOutcome::Applied)
        } else {
            tracing::debug!(%command, "native command refused, falling back");
            Ok(StrategyOutcome::Unavailable)
        }
    }
}

/// Wrap the selection in a fresh formatting element by hand.
///
/// Non-collapsed selections have their covered text extracted, deleted,
/// and re-inserted inside a new wrapper; the selection then spans the
/// wrapper's contents. A collapsed cursor gets a wrapper seeded with
/// [`ZERO_WIDTH_SPACE`] and the selection spans the seed, so typing
/// replaces it with formatted input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualWrapStrategy;

impl ManualWrapStrategy {
    /// Create the manual strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FormatStrategy for ManualWrapStrategy {
    fn name(&self) -> &'static str {
        "manual-wrap"
    }

    fn apply(
        &self,
        state: &mut SurfaceState,
        command: FormatCommand,
    ) -> Result<StrategyOutcome, DocumentError> {
        let Some(range) = state.selection.primary_range() else {
            return Ok(StrategyOutcome::Unavailable);
        };
        let doc = &mut state.document;

        let text = doc.range_text(&range)?;
        let boundary = doc.delete_range_contents(&range)?;
        let wrapper = doc.create_element(command.wrapper_tag())?;

        if text.is_empty() {
            // Collapsed cursor: seed the wrapper so the caret has a home.
            let seed = doc.create_text(ZERO_WIDTH_SPACE.to_string())?;
            doc.append_child(wrapper, seed)?;
            doc.insert_node_at(boundary, wrapper)?;
            let caret = doc.range(
                DomPosition::new(wrapper, 0),
                DomPosition::new(wrapper, 1),
            )?;
            state.selection.add_range(caret);
        } else {
            let content = doc.create_text(text)?;
            doc.append_child(wrapper, content)?;
            doc.insert_node_at(boundary, wrapper)?;
            let selected = doc.select_node_contents(wrapper)?;
            state.selection.add_range(selected);
        }

        tracing::debug!(%command, wrapper = %wrapper, "manual wrap applied");
        Ok(StrategyOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkline_dom::ElementTag;

    fn state_with_text(text: &str) -> (SurfaceState, inkline_dom::NodeId) {
        let mut state = SurfaceState::default();
        let node = state.document.create_text(text).unwrap();
        let root = state.document.root();
        state.document.append_child(root, node).unwrap();
        (state, node)
    }

    #[test]
    fn manual_wrap_extracts_selected_text() {
        let (mut state, node) = state_with_text("hello world");
        let range = state
            .document
            .range(DomPosition::new(node, 0), DomPosition::new(node, 5))
            .unwrap();
        state.selection.add_range(range);

        let outcome = ManualWrapStrategy::new()
            .apply(&mut state, FormatCommand::Bold)
            .unwrap();
        assert_eq!(outcome, StrategyOutcome::Applied);

        let root = state.document.root();
        let children = state.document.children(root).unwrap().to_vec();
        assert_eq!(children.len(), 2);
        let wrapper = children[0];
        assert_eq!(state.document.tag(wrapper).unwrap(), ElementTag::Strong);
        assert_eq!(state.document.plain_text(wrapper).unwrap(), "hello");
        assert_eq!(state.document.text(node).unwrap(), " world");

        // The selection now covers the wrapper's contents.
        let selected = state.selection.primary_range().unwrap();
        assert_eq!(state.document.range_text(&selected).unwrap(), "hello");
    }

    #[test]
    fn manual_wrap_seeds_collapsed_cursor() {
        let (mut state, node) = state_with_text("ab");
        let caret = state.document.caret(DomPosition::new(node, 1)).unwrap();
        state.selection.add_range(caret);

        let outcome = ManualWrapStrategy::new()
            .apply(&mut state, FormatCommand::Italic)
            .unwrap();
        assert_eq!(outcome, StrategyOutcome::Applied);

        let root = state.document.root();
        let children = state.document.children(root).unwrap().to_vec();
        assert_eq!(children.len(), 3, "split text around the wrapper");
        let wrapper = children[1];
        assert_eq!(state.document.tag(wrapper).unwrap(), ElementTag::Em);
        assert_eq!(
            state.document.plain_text(wrapper).unwrap(),
            ZERO_WIDTH_SPACE.to_string()
        );

        let selected = state.selection.primary_range().unwrap();
        assert_eq!(selected.start(), DomPosition::new(wrapper, 0));
        assert_eq!(selected.end(), DomPosition::new(wrapper, 1));
    }

    #[test]
    fn manual_wrap_without_selection_is_unavailable() {
        let (mut state, _node) = state_with_text("text");
        let outcome = ManualWrapStrategy::new()
            .apply(&mut state, FormatCommand::Underline)
            .unwrap();
        assert_eq!(outcome, StrategyOutcome::Unavailable);
    }

    #[test]
    fn manual_wrap_propagates_stale_ranges() {
        let (mut state, node) = state_with_text("hello");
        let range = state
            .document
            .range(DomPosition::new(node, 0), DomPosition::new(node, 5))
            .unwrap();
        state.selection.add_range(range);
        state.document.splice_text(node, 0, 0, "x").unwrap();

        let result = ManualWrapStrategy::new().apply(&mut state, FormatCommand::Bold);
        assert!(matches!(result, Err(DocumentError::StaleRange { .. })));
    }

    #[test]
    fn native_strategy_respects_caps() {
        struct Always(SurfaceCaps, bool);
        impl CommandBackend for Always {
            fn caps(&self) -> SurfaceCaps {
                self.0
            }
            fn exec(&self, _command: FormatCommand) -> bool {
                self.1
            }
            fn query_state(&self, _command: FormatCommand) -> bool {
                false
            }
        }

        let mut state = SurfaceState::default();

        let no_caps = NativeCommandStrategy::new(Rc::new(Always(SurfaceCaps::NONE, true)));
        assert_eq!(
            no_caps.apply(&mut state, FormatCommand::Bold).unwrap(),
            StrategyOutcome::Unavailable
        );

        let refusing =
            NativeCommandStrategy::new(Rc::new(Always(SurfaceCaps::EXEC_COMMAND, false)));
        assert_eq!(
            refusing.apply(&mut state, FormatCommand::Bold).unwrap(),
            StrategyOutcome::Unavailable
        );

        let accepting =
            NativeCommandStrategy::new(Rc::new(Always(SurfaceCaps::EXEC_COMMAND, true)));
        assert_eq!(
            accepting.apply(&mut state, FormatCommand::Bold).unwrap(),
            StrategyOutcome::Applied
        );
    }
}
