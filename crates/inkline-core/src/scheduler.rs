#![forbid(unsafe_code)]

//! Cooperative deferred-task scheduler.
//!
//! The formatting engine must not notify listeners in the middle of a
//! mutation: a listener reacting synchronously would observe the surface
//! half-changed. Instead it defers the notification to "the next tick",
//! and the host drains the queue once the current event has fully run.
//! This is the library equivalent of a zero-delay timeout or microtask.
//!
//! # Design Notes
//!
//! - Single-threaded by construction (`Rc`, not `Arc`); everything runs
//!   on the host's event-dispatch thread.
//! - Tasks deferred while draining run in the same drain, preserving the
//!   zero-delay semantics.
//! - There is no cancellation. Once deferred, a task runs.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

type Task = Box<dyn FnOnce()>;

/// Upper bound on tasks executed per drain.
///
/// A task that unconditionally re-defers itself would otherwise spin the
/// drain forever; past this bound the remaining tasks stay queued for
/// the next drain.
pub const MAX_TASKS_PER_DRAIN: usize = 1024;

/// Owner of the deferred-task queue.
///
/// The host creates one `Scheduler`, hands [`SchedulerHandle`]s to
/// producers (the formatting engine), and calls
/// [`Scheduler::run_until_idle`] after each input event.
#[derive(Default)]
pub struct Scheduler {
    queue: Rc<RefCell<VecDeque<Task>>>,
}

impl Scheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cloneable handle producers use to defer tasks.
    #[must_use]
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            queue: Rc::clone(&self.queue),
        }
    }

    /// Number of tasks currently queued.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run queued tasks until the queue is empty.
    ///
    /// Tasks deferred by running tasks execute in this same drain.
    /// Returns the number of tasks executed.
    pub fn run_until_idle(&self) -> usize {
        let mut executed = 0;
        while executed < MAX_TASKS_PER_DRAIN {
            // Take the task out before running it so the queue borrow is
            // released; tasks are allowed to defer more tasks.
            let task = self.queue.borrow_mut().pop_front();
            match task {
                Some(task) => {
                    task();
                    executed += 1;
                }
                None => break,
            }
        }
        if executed == MAX_TASKS_PER_DRAIN && !self.queue.borrow().is_empty() {
            tracing::warn!(
                remaining = self.queue.borrow().len(),
                "scheduler drain hit task cap; deferring remainder to next drain"
            );
        }
        executed
    }
}

/// Cloneable producer handle for deferring tasks.
#[derive(Clone)]
pub struct SchedulerHandle {
    queue: Rc<RefCell<VecDeque<Task>>>,
}

impl SchedulerHandle {
    /// Defer a task to the next drain.
    pub fn defer(&self, task: impl FnOnce() + 'static) {
        self.queue.borrow_mut().push_back(Box::new(task));
        tracing::trace!(pending = self.queue.borrow().len(), "task deferred");
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("pending", &self.queue.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn deferred_tasks_do_not_run_synchronously() {
        let scheduler = Scheduler::new();
        let ran = Rc::new(Cell::new(false));

        let flag = Rc::clone(&ran);
        scheduler.handle().defer(move || flag.set(true));

        assert!(!ran.get(), "task must wait for the drain");
        assert_eq!(scheduler.pending(), 1);

        scheduler.run_until_idle();
        assert!(ran.get());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn tasks_run_in_fifo_order() {
        let scheduler = Scheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for i in 0..4 {
            let order = Rc::clone(&order);
            scheduler.handle().defer(move || order.borrow_mut().push(i));
        }
        scheduler.run_until_idle();

        assert_eq!(*order.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn tasks_deferred_during_drain_run_in_same_drain() {
        let scheduler = Scheduler::new();
        let handle = scheduler.handle();
        let order = Rc::new(RefCell::new(Vec::new()));

        let inner_order = Rc::clone(&order);
        let inner_handle = handle.clone();
        handle.defer(move || {
            inner_order.borrow_mut().push("outer");
            let nested_order = Rc::clone(&inner_order);
            inner_handle.defer(move || nested_order.borrow_mut().push("inner"));
        });

        let executed = scheduler.run_until_idle();
        assert_eq!(executed, 2);
        assert_eq!(*order.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn drain_cap_leaves_remainder_queued() {
        let scheduler = Scheduler::new();
        let handle = scheduler.handle();

        fn respawn(handle: SchedulerHandle) {
            let next = handle.clone();
            handle.defer(move || respawn(next));
        }
        respawn(handle);

        let executed = scheduler.run_until_idle();
        assert_eq!(executed, MAX_TASKS_PER_DRAIN);
        assert_eq!(scheduler.pending(), 1);
    }
}
