#![forbid(unsafe_code)]

//! Surface capability flags.
//!
//! An editable surface may expose native formatting facilities (the
//! browser's `execCommand`/`queryCommandState` pair is the canonical
//! example). The engine probes these flags once at construction and
//! builds its strategy order from them: native command first when
//! available, manual tree manipulation as the fallback.

use bitflags::bitflags;

bitflags! {
    /// Native facilities an editable surface backend advertises.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SurfaceCaps: u8 {
        /// No native facilities; manual formatting only.
        const NONE = 0b00;
        /// The backend can execute inline formatting commands natively.
        const EXEC_COMMAND = 0b01;
        /// The backend can report per-command active state natively.
        const QUERY_COMMAND_STATE = 0b10;
    }
}

impl Default for SurfaceCaps {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_manual_only() {
        assert_eq!(SurfaceCaps::default(), SurfaceCaps::NONE);
        assert!(!SurfaceCaps::default().contains(SurfaceCaps::EXEC_COMMAND));
    }

    #[test]
    fn caps_combine() {
        let caps = SurfaceCaps::EXEC_COMMAND | SurfaceCaps::QUERY_COMMAND_STATE;
        assert!(caps.contains(SurfaceCaps::EXEC_COMMAND));
        assert!(caps.contains(SurfaceCaps::QUERY_COMMAND_STATE));
    }
}
