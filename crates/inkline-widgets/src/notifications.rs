#![forbid(unsafe_code)]

//! User-facing notification queue.
//!
//! The editor surfaces outcomes (draft saved, formatting failed,
//! validation errors) as leveled notifications. This queue is the
//! host-side buffer between those events and whatever renders them:
//! FIFO, bounded, with consecutive-duplicate suppression so a key held
//! down does not flood the user with identical errors.

use std::collections::VecDeque;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    /// Something succeeded (draft saved, post published).
    Success,
    /// Neutral information.
    Info,
    /// Something failed and the user should act.
    Error,
}

/// A queued user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Short headline ("Formatting Failed").
    pub title: String,
    /// Full message body.
    pub message: String,
}

impl Notification {
    /// Create a notification.
    #[must_use]
    pub fn new(
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Bounded FIFO of notifications with consecutive-duplicate suppression.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    queue: VecDeque<Notification>,
    capacity: usize,
}

impl NotificationQueue {
    /// Default capacity; matches a short on-screen stack.
    pub const DEFAULT_CAPACITY: usize = 10;

    /// Create a queue with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a queue holding at most `capacity` notifications.
    ///
    /// A zero capacity is clamped to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Number of queued notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Enqueue a notification.
    ///
    /// A notification identical to the most recently queued one is
    /// dropped. When full, the oldest entry is evicted to make room.
    /// Returns whether the notification was queued.
    pub fn push(&mut self, notification: Notification) -> bool {
        if self.queue.back() == Some(&notification) {
            tracing::trace!(title = %notification.title, "duplicate notification suppressed");
            return false;
        }
        if self.queue.len() == self.capacity {
            let evicted = self.queue.pop_front();
            if let Some(evicted) = evicted {
                tracing::debug!(title = %evicted.title, "notification evicted, queue full");
            }
        }
        self.queue.push_back(notification);
        true
    }

    /// Convenience: enqueue a success notification.
    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) -> bool {
        self.push(Notification::new(NotificationLevel::Success, title, message))
    }

    /// Convenience: enqueue an info notification.
    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) -> bool {
        self.push(Notification::new(NotificationLevel::Info, title, message))
    }

    /// Convenience: enqueue an error notification.
    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) -> bool {
        self.push(Notification::new(NotificationLevel::Error, title, message))
    }

    /// Take the oldest notification.
    pub fn pop(&mut self) -> Option<Notification> {
        self.queue.pop_front()
    }

    /// Peek at every queued notification, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    /// Drop everything queued.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}
