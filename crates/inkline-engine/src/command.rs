#![forbid(unsafe_code)]

//! Format commands.

use std::fmt;

use inkline_core::{KeyCode, KeyEvent};
use inkline_dom::ElementTag;

/// The three inline formats the engine can toggle.
///
/// Not mutually exclusive: a selection can be bold, italic, and
/// underlined at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FormatCommand {
    /// Bold (`strong` wrapper, Ctrl/Cmd+B).
    Bold,
    /// Italic (`em` wrapper, Ctrl/Cmd+I).
    Italic,
    /// Underline (`u` wrapper, Ctrl/Cmd+U).
    Underline,
}

impl FormatCommand {
    /// All commands, in toolbar order.
    pub const ALL: [Self; 3] = [Self::Bold, Self::Italic, Self::Underline];

    /// The canonical wrapper element this command produces.
    #[must_use]
    pub const fn wrapper_tag(self) -> ElementTag {
        match self {
            Self::Bold => ElementTag::Strong,
            Self::Italic => ElementTag::Em,
            Self::Underline => ElementTag::U,
        }
    }

    /// The shortcut letter for this command (lowercase).
    #[must_use]
    pub const fn shortcut_key(self) -> char {
        match self {
            Self::Bold => 'b',
            Self::Italic => 'i',
            Self::Underline => 'u',
        }
    }

    /// Map a key event to a command by its letter, ignoring case.
    ///
    /// Modifier requirements are the caller's concern; this only looks
    /// at the key itself.
    #[must_use]
    pub fn from_key(event: &KeyEvent) -> Option<Self> {
        let KeyCode::Char(ch) = event.code else {
            return None;
        };
        match ch.to_ascii_lowercase() {
            'b' => Some(Self::Bold),
            'i' => Some(Self::Italic),
            'u' => Some(Self::Underline),
            _ => None,
        }
    }
}

impl fmt::Display for FormatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
        };
        f.write_str(name)
    }
}
