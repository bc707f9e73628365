#![forbid(unsafe_code)]

//! Host-side editor widgets.
//!
//! # Role in inkline
//! Everything in this crate sits above the formatting engine: the
//! [`PostEditor`] composition root that owns a surface and a
//! `TextFormatter`, draft [`validate`] rules for the save path, and the
//! [`NotificationQueue`] that buffers user-facing messages. The engine
//! stays policy-free; the opinions (error copy, validation bounds, save
//! shortcut) live here.

/// The post editor composition root.
pub mod editor;
/// User-facing notification queue.
pub mod notifications;
/// Draft field validation rules.
pub mod validate;

pub use editor::PostEditor;
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use validate::{
    BODY_MIN_CHARS, DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS, DraftValidation,
    TITLE_MAX_CHARS, TITLE_MIN_CHARS, validate_draft, visible_len,
};
