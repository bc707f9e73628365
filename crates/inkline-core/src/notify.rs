#![forbid(unsafe_code)]

//! Editor notifications.
//!
//! After a successful formatting mutation the engine emits
//! [`EditorEvent::SelectionChanged`] (via the scheduler, so the mutation
//! settles first). Hosts subscribe to refresh derived state such as
//! toolbar pressed-indicators.
//!
//! Subscribing or unsubscribing from inside a callback is allowed: new
//! subscribers start receiving from the next emit, and removals take
//! effect once the current emit finishes.

use std::cell::RefCell;
use std::rc::Rc;

/// Notifications observable by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// The selection or the formatting under it changed; derived state
    /// (format indicators) should be recomputed.
    SelectionChanged,
}

type Callback = Box<dyn FnMut(&EditorEvent)>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
    /// Ids unsubscribed while an emit was in flight.
    removed: Vec<u64>,
}

/// Token returned by [`EventBus::subscribe`]; pass back to
/// [`EventBus::unsubscribe`] to stop receiving events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

/// Single-threaded subscriber registry.
///
/// Cloning shares the registry; all clones see the same subscribers.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every emitted event.
    pub fn subscribe(&self, callback: impl FnMut(&EditorEvent) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Box::new(callback)));
        Subscription(id)
    }

    /// Remove a previously registered callback.
    pub fn unsubscribe(&self, subscription: Subscription) {
        let mut inner = self.inner.borrow_mut();
        if let Some(pos) = inner
            .subscribers
            .iter()
            .position(|(id, _)| *id == subscription.0)
        {
            inner.subscribers.remove(pos);
        } else {
            // May currently be dispatched out of the registry; drop it
            // when the emit completes.
            inner.removed.push(subscription.0);
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Deliver an event to every subscriber.
    pub fn emit(&self, event: &EditorEvent) {
        // Move subscribers out so callbacks can re-borrow the bus.
        let mut dispatching = std::mem::take(&mut self.inner.borrow_mut().subscribers);
        for (_, callback) in &mut dispatching {
            callback(event);
        }

        let mut inner = self.inner.borrow_mut();
        // Callbacks may have subscribed; keep those after the originals.
        let added = std::mem::take(&mut inner.subscribers);
        dispatching.extend(added);
        let removed = std::mem::take(&mut inner.removed);
        dispatching.retain(|(id, _)| !removed.contains(id));
        inner.subscribers = dispatching;
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
