#![forbid(unsafe_code)]

//! Core vocabulary for inkline.
//!
//! # Role in inkline
//! `inkline-core` holds the small shared types every other crate speaks:
//! keyboard events and modifier flags, the capability flags that decide
//! which formatting strategies a surface supports, and the cooperative
//! scheduler used to defer notifications until a mutation has settled.
//!
//! # This crate provides
//! - [`KeyEvent`], [`KeyCode`], and [`Modifiers`] for input handling.
//! - [`KeyDisposition`] to signal whether a handler consumed an event.
//! - [`SurfaceCaps`] for native-command capability detection.
//! - [`Scheduler`] and [`SchedulerHandle`] for zero-delay deferred tasks.
//! - [`EditorEvent`] and [`EventBus`] for selection-changed notifications.

/// Surface capability flags.
pub mod caps;
/// Keyboard event types and modifier flags.
pub mod event;
/// Editor notification vocabulary and subscriber registry.
pub mod notify;
/// Cooperative deferred-task scheduler.
pub mod scheduler;

pub use caps::SurfaceCaps;
pub use event::{KeyCode, KeyDisposition, KeyEvent, Modifiers};
pub use notify::{EditorEvent, EventBus, Subscription};
pub use scheduler::{Scheduler, SchedulerHandle};
