#![forbid(unsafe_code)]

//! The native command seam.
//!
//! Some surfaces come with their own formatting machinery: a command
//! the host can invoke to toggle bold over the current selection, and a
//! query that reports whether a format is active there. [`CommandBackend`]
//! is that seam; the engine prefers it when the advertised capabilities
//! include it and falls back to manual tree manipulation otherwise.
//!
//! Backends are deliberately untrusted. `exec` returning `false` (or a
//! capability bit missing) routes the command to the next strategy
//! rather than surfacing an error.

use inkline_core::SurfaceCaps;

use crate::command::FormatCommand;

/// A surface's native formatting facility.
pub trait CommandBackend {
    /// Which native facilities this backend provides.
    fn caps(&self) -> SurfaceCaps;

    /// Toggle a format natively. Returns `false` when the surface
    /// refused or does not support the command.
    fn exec(&self, command: FormatCommand) -> bool;

    /// Query whether a format is natively reported active at the
    /// selection. Only meaningful when
    /// [`SurfaceCaps::QUERY_COMMAND_STATE`] is advertised.
    fn query_state(&self, command: FormatCommand) -> bool;
}

/// A backend with no native facilities at all.
///
/// The default for headless surfaces; everything routes to manual
/// strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl CommandBackend for NullBackend {
    fn caps(&self) -> SurfaceCaps {
        SurfaceCaps::NONE
    }

    fn exec(&self, _command: FormatCommand) -> bool {
        false
    }

    fn query_state(&self, _command: FormatCommand) -> bool {
        false
    }
}
