//! C5: bounded-by-nothing, mutex/condvar multi-producer multi-consumer
//! queues connecting the driver to the worker pool.
//!
//! Modeled directly on the original `ConcurrentQueue` class: a single
//! `Mutex`-guarded `VecDeque` plus a `Condvar`, `push` never blocking beyond
//! the lock, `wait_and_pop` looping on the condition to survive spurious
//! wakeups.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

pub struct ConcurrentQueue<T> {
    queue: Mutex<VecDeque<T>>,
    condvar: Condvar,
}

impl<T> ConcurrentQueue<T> {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
        }
    }

    /// Push never blocks the caller beyond brief mutual exclusion.
    pub fn push(&self, item: T) {
        let mut guard = self.queue.lock().expect("queue mutex poisoned");
        guard.push_back(item);
        drop(guard);
        self.condvar.notify_one();
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().expect("queue mutex poisoned").is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().expect("queue mutex poisoned").len()
    }

    /// Returns immediately: `Some(item)` if one was available, `None` if
    /// the queue was empty.
    pub fn try_pop(&self) -> Option<T> {
        self.queue.lock().expect("queue mutex poisoned").pop_front()
    }

    /// Blocks until an item is available. Loops on the predicate to survive
    /// spurious wakeups.
    pub fn wait_and_pop(&self) -> T {
        let mut guard = self.queue.lock().expect("queue mutex poisoned");
        loop {
            if let Some(item) = guard.pop_front() {
                return item;
            }
            guard = self.condvar.wait(guard).expect("queue condvar poisoned");
        }
    }
}

impl<T> Default for ConcurrentQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
