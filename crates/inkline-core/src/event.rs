#![forbid(unsafe_code)]

//! Keyboard event types.
//!
//! Hosts translate whatever input source they sit on (terminal, GUI
//! toolkit, test harness) into these canonical types before handing them
//! to the formatting engine. All types derive `Clone`, `PartialEq`, and
//! `Eq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - `Modifiers` use bitflags for easy combination.
//! - The "command" modifier is Ctrl on Windows/Linux and Super/Cmd on
//!   macOS; [`KeyEvent::command`] accepts either so callers do not need
//!   per-platform branches.
//! - [`KeyDisposition`] carries the consumed/declined signal that in a
//!   browser would be `preventDefault` + `stopPropagation` versus
//!   letting the event bubble.

use bitflags::bitflags;

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key, ignoring case.
    #[must_use]
    pub fn is_char_ignore_case(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&c))
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Super/Meta/Cmd is held.
    #[must_use]
    pub const fn super_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SUPER)
    }

    /// Check if the platform command modifier is held.
    ///
    /// Either Ctrl or Super counts, matching the usual
    /// Ctrl-on-Linux/Windows, Cmd-on-macOS convention for editor
    /// shortcuts.
    #[must_use]
    pub const fn command(&self) -> bool {
        self.ctrl() || self.super_key()
    }
}

/// Key codes for keyboard events.
///
/// Only the keys an editable surface cares about; hosts with richer
/// input sources map everything else to their own handling before the
/// event reaches inkline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Backspace key.
    Backspace,

    /// Delete key.
    Delete,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Left arrow.
    Left,

    /// Right arrow.
    Right,

    /// Home key.
    Home,

    /// End key.
    End,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Outcome of offering a key event to a handler.
///
/// `Consumed` means the handler acted on the event and the host must
/// suppress the default action and stop propagation. `Declined` means
/// the event was not recognized and remains the host's to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The event was handled; suppress default action and propagation.
    Consumed,
    /// The event was not handled; the host keeps routing it.
    Declined,
}

impl KeyDisposition {
    /// True if the event was consumed.
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}
