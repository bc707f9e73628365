#![forbid(unsafe_code)]

//! The formatting engine.
//!
//! # Role
//! [`TextFormatter`] is the host-facing entry point: apply a format to
//! the current selection, query which formats are active, and route
//! keyboard shortcuts. It holds a weak [`SurfaceHandle`], so an engine
//! outliving its surface degrades to no-ops instead of dangling.
//!
//! # Design Notes
//! - Application is fallible and says so ([`FormatError`]); detection is
//!   not — [`TextFormatter::format_state`] swallows every failure into
//!   the all-inactive state, because an indicator glitch must never
//!   interrupt typing.
//! - Successful mutations notify listeners on the next scheduler drain,
//!   never synchronously inside the mutation.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use inkline_core::{
    EditorEvent, EventBus, KeyDisposition, KeyEvent, SchedulerHandle, SurfaceCaps,
};
use inkline_dom::{DocumentError, SurfaceHandle};

use crate::backend::{CommandBackend, NullBackend};
use crate::command::FormatCommand;
use crate::probe::ancestor_format_state;
use crate::state::FormatState;
use crate::strategy::{
    FormatStrategy, ManualWrapStrategy, NativeCommandStrategy, StrategyOutcome,
};

/// Why a format command could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// There is no selection to format.
    NoSelection,
    /// The surface was unmounted; the handle no longer upgrades.
    SurfaceReleased,
    /// A strategy failed against the document tree.
    Apply(DocumentError),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSelection => write!(f, "no selection to format"),
            Self::SurfaceReleased => write!(f, "surface released"),
            Self::Apply(err) => write!(f, "format application failed: {err}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Apply(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DocumentError> for FormatError {
    fn from(err: DocumentError) -> Self {
        Self::Apply(err)
    }
}

/// What [`TextFormatter::handle_shortcut`] did with a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutOutcome {
    /// A format shortcut was recognized and applied.
    Applied(FormatCommand),
    /// A format shortcut was recognized but application failed.
    Failed(FormatCommand, FormatError),
    /// Not a format shortcut; the host keeps routing the event.
    Declined,
}

impl ShortcutOutcome {
    /// Whether the host must suppress the event's default action.
    ///
    /// A recognized shortcut is consumed even when application fails:
    /// the user asked for bold, not for whatever the platform's default
    /// Ctrl+B behavior is.
    #[must_use]
    pub const fn consumed(&self) -> bool {
        !matches!(self, Self::Declined)
    }

    /// The consumed/declined signal as a [`KeyDisposition`].
    #[must_use]
    pub const fn disposition(&self) -> KeyDisposition {
        if self.consumed() {
            KeyDisposition::Consumed
        } else {
            KeyDisposition::Declined
        }
    }

    /// True only when a format was actually applied.
    #[must_use]
    pub const fn handled(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// The inline formatting engine for one editable surface.
pub struct TextFormatter {
    surface: SurfaceHandle,
    backend: Rc<dyn CommandBackend>,
    strategies: SmallVec<[Box<dyn FormatStrategy>; 2]>,
    scheduler: SchedulerHandle,
    events: EventBus,
}

impl TextFormatter {
    /// Create an engine over a surface with no native facilities.
    #[must_use]
    pub fn new(surface: SurfaceHandle, scheduler: SchedulerHandle) -> Self {
        Self::with_backend(surface, scheduler, Rc::new(NullBackend))
    }

    /// Create an engine with a native command backend.
    ///
    /// The strategy order is fixed at construction from the backend's
    /// capabilities: native command first when advertised, manual wrap
    /// always last.
    #[must_use]
    pub fn with_backend(
        surface: SurfaceHandle,
        scheduler: SchedulerHandle,
        backend: Rc<dyn CommandBackend>,
    ) -> Self {
        let mut strategies: SmallVec<[Box<dyn FormatStrategy>; 2]> = SmallVec::new();
        if backend.caps().contains(SurfaceCaps::EXEC_COMMAND) {
            strategies.push(Box::new(NativeCommandStrategy::new(Rc::clone(&backend))));
        }
        strategies.push(Box::new(ManualWrapStrategy::new()));
        Self {
            surface,
            backend,
            strategies,
            scheduler,
            events: EventBus::new(),
        }
    }

    /// The notification bus hosts subscribe to.
    #[must_use]
    pub fn events(&self) -> EventBus {
        self.events.clone()
    }

    /// Toggle a format over the current selection.
    ///
    /// Strategies are tried in order; the first to apply wins and a
    /// selection-changed notification is deferred to the next scheduler
    /// drain. With no selection (or every strategy unavailable) this
    /// fails with [`FormatError::NoSelection`].
    pub fn apply_format(&self, command: FormatCommand) -> Result<(), FormatError> {
        let surface = self
            .surface
            .upgrade()
            .ok_or(FormatError::SurfaceReleased)?;
        {
            let mut state = surface.write();
            state.selection.focus();
            if state.selection.range_count() == 0 {
                return Err(FormatError::NoSelection);
            }

            let mut applied = false;
            for strategy in &self.strategies {
                match strategy.apply(&mut state, command)? {
                    StrategyOutcome::Applied => {
                        tracing::debug!(%command, strategy = strategy.name(), "format applied");
                        applied = true;
                        break;
                    }
                    StrategyOutcome::Unavailable => {
                        tracing::trace!(
                            %command,
                            strategy = strategy.name(),
                            "strategy unavailable"
                        );
                    }
                }
            }
            if !applied {
                return Err(FormatError::NoSelection);
            }
        }
        self.notify_selection_changed();
        Ok(())
    }

    /// Which formats are active at the current selection.
    ///
    /// Never fails: a released surface, an empty selection, or any
    /// detection error reports all-inactive.
    #[must_use]
    pub fn format_state(&self) -> FormatState {
        let Some(surface) = self.surface.upgrade() else {
            return FormatState::inactive();
        };
        let state = surface.read();
        let Some(range) = state.selection.primary_range() else {
            return FormatState::inactive();
        };

        if self.backend.caps().contains(SurfaceCaps::QUERY_COMMAND_STATE) {
            let mut out = FormatState::inactive();
            for command in FormatCommand::ALL {
                out.set_active(command, self.backend.query_state(command));
            }
            return out;
        }

        match state.document.common_ancestor(&range) {
            Ok(anchor) => {
                ancestor_format_state(&state.document, anchor, state.document.root())
            }
            Err(err) => {
                tracing::debug!(error = %err, "format detection failed; reporting inactive");
                FormatState::inactive()
            }
        }
    }

    /// Route a keyboard event.
    ///
    /// Ctrl/Cmd+B/I/U (either case) applies the matching format;
    /// everything else is declined and stays the host's to handle.
    pub fn handle_shortcut(&self, event: &KeyEvent) -> ShortcutOutcome {
        if !event.command() {
            return ShortcutOutcome::Declined;
        }
        let Some(command) = FormatCommand::from_key(event) else {
            return ShortcutOutcome::Declined;
        };
        match self.apply_format(command) {
            Ok(()) => ShortcutOutcome::Applied(command),
            Err(err) => {
                tracing::debug!(%command, error = %err, "shortcut application failed");
                ShortcutOutcome::Failed(command, err)
            }
        }
    }

    fn notify_selection_changed(&self) {
        let events = self.events.clone();
        self.scheduler.defer(move || {
            events.emit(&EditorEvent::SelectionChanged);
        });
    }
}

impl fmt::Debug for TextFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("TextFormatter")
            .field("caps", &self.backend.caps())
            .field("strategies", &names)
            .finish_non_exhaustive()
    }
}
