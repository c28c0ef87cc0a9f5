//! Deferred callbacks on a virtual clock.
//!
//! Everything the engine defers (record expiry, cycle completion) is a task
//! on one [`Scheduler`]. Nothing runs on its own: the host advances the clock
//! with its frame delta and the due tasks come back in deadline order.

use std::collections::BTreeMap;
use std::time::Duration;

use sortflow_core::alloc::HashMap;

/// Handle to a scheduled task, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Single-threaded timer queue.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    /// Keyed by deadline, then id, so equal deadlines fire in scheduling order.
    queue: BTreeMap<(Duration, TimerId), T>,
    deadlines: HashMap<TimerId, Duration>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once `delay` has elapsed.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now + delay;
        self.queue.insert((deadline, id), task);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.queue.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Number of pending tasks.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Move the clock forward by `dt` and take every task that is now due.
    pub fn advance(&mut self, dt: Duration) -> Vec<(TimerId, T)> {
        self.now += dt;
        let mut due = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            let ((_, id), task) = entry.remove_entry();
            self.deadlines.remove(&id);
            due.push((id, task));
        }
        due
    }

    /// Drop every pending task without running it.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.deadlines.clear();
    }
}
