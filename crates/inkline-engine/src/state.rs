#![forbid(unsafe_code)]

//! Active-format snapshot.

use crate::command::FormatCommand;

/// Which of the three inline formats are active at the selection.
///
/// A derived value: recomputed per query, never stored or cached by the
/// engine. All three flags can be set at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatState {
    /// Bold is active.
    pub bold: bool,
    /// Italic is active.
    pub italic: bool,
    /// Underline is active.
    pub underline: bool,
}

impl FormatState {
    /// The all-inactive state.
    #[must_use]
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Whether a specific command's format is active.
    #[must_use]
    pub const fn is_active(&self, command: FormatCommand) -> bool {
        match command {
            FormatCommand::Bold => self.bold,
            FormatCommand::Italic => self.italic,
            FormatCommand::Underline => self.underline,
        }
    }

    /// Set a specific command's flag.
    pub const fn set_active(&mut self, command: FormatCommand, active: bool) {
        match command {
            FormatCommand::Bold => self.bold = active,
            FormatCommand::Italic => self.italic = active,
            FormatCommand::Underline => self.underline = active,
        }
    }

    /// True once every format is marked active.
    #[must_use]
    pub const fn all_active(&self) -> bool {
        self.bold && self.italic && self.underline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_independent() {
        let mut state = FormatState::inactive();
        state.set_active(FormatCommand::Italic, true);
        assert!(!state.is_active(FormatCommand::Bold));
        assert!(state.is_active(FormatCommand::Italic));
        assert!(!state.is_active(FormatCommand::Underline));

        state.set_active(FormatCommand::Bold, true);
        assert!(state.is_active(FormatCommand::Italic), "independence");
        assert!(!state.all_active());

        state.set_active(FormatCommand::Underline, true);
        assert!(state.all_active());
    }
}
