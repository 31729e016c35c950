//! The run-loop collaborator: a deterministic queue of scheduled callbacks.
//!
//! Transitions that real toolkits finish on a later run-loop turn (modal
//! dismissal, most of all) land here as queued callbacks. Tests settle them
//! explicitly, one at a time, instead of spinning a live run loop.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

type Task = Box<dyn FnOnce()>;

/// Single-threaded FIFO of pending scheduled callbacks.
///
/// This replaces the host runtime's dispatch queue with a deterministic,
/// testable interface. Clones share one queue, so a tree fixture and the
/// driver observing it always agree on what is pending.
pub struct Scheduler {
    queue: Rc<RefCell<VecDeque<Task>>>,
    completed: Rc<Cell<usize>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.queue.borrow().len())
            .field("completed", &self.completed.get())
            .finish()
    }
}

impl Clone for Scheduler {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
            completed: Rc::clone(&self.completed),
        }
    }
}

impl Scheduler {
    /// Create a scheduler with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
            completed: Rc::new(Cell::new(0)),
        }
    }

    /// Queue a callback for a later scheduling turn.
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + 'static,
    {
        self.queue.borrow_mut().push_back(Box::new(task));
        trace!(pending = self.queue.borrow().len(), "callback scheduled");
    }

    /// Run the oldest pending callback.
    ///
    /// Returns `true` if a callback ran, `false` if the queue was empty.
    /// The queue borrow is released before the callback runs, so a callback
    /// may schedule further callbacks.
    pub fn run_one(&self) -> bool {
        let task = self.queue.borrow_mut().pop_front();
        match task {
            Some(task) => {
                task();
                self.completed.set(self.completed.get() + 1);
                trace!(pending = self.queue.borrow().len(), "callback completed");
                true
            }
            None => false,
        }
    }

    /// Run pending callbacks until the queue empties, up to `max` of them.
    ///
    /// Returns the number of callbacks run. The bound guards against
    /// callbacks that keep rescheduling themselves.
    pub fn run_bounded(&self, max: usize) -> usize {
        let mut completed = 0;
        while completed < max && self.run_one() {
            completed += 1;
        }
        completed
    }

    /// Number of callbacks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Total callbacks run since construction.
    #[must_use]
    pub fn total_completed(&self) -> usize {
        self.completed.get()
    }
}

/// One outstanding scheduled callback gating an interaction's effect.
///
/// Settling consumes the token and runs exactly one pending callback, after
/// which the deferred effect is observable. A stack of N dismissed layers
/// produces N tokens, settled one level at a time.
#[must_use = "a deferred effect is not observable until the completion is settled"]
#[derive(Debug)]
pub struct Completion {
    scheduler: Scheduler,
}

impl Completion {
    pub(crate) fn new(scheduler: Scheduler) -> Self {
        Self { scheduler }
    }

    /// Run the next pending callback.
    ///
    /// Returns `true` if a callback ran.
    pub fn settle(self) -> bool {
        self.scheduler.run_one()
    }
}

/// How an interaction completed.
#[derive(Debug)]
pub enum Outcome {
    /// The effect is already visible in the tree; no settling needed.
    Settled,
    /// The effect lands once the enclosed completion is settled.
    Deferred(Completion),
}

impl Outcome {
    /// Whether the effect was immediately visible.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled)
    }

    /// Whether a completion must be settled before re-querying.
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Settle the completion if the interaction deferred one.
    ///
    /// Returns `true` if a callback ran; `false` for settled outcomes.
    pub fn settle(self) -> bool {
        match self {
            Self::Settled => false,
            Self::Deferred(completion) => completion.settle(),
        }
    }
}
