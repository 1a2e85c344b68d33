// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline-ordered timer queue.

use alloc::vec::Vec;
use core::time::Duration;

/// Handle of a scheduled timer.
///
/// Handles are never reused by the queue that issued them, so a stale handle
/// can be cancelled safely: it simply no longer matches anything.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// A timer that has come due, as returned by [`TimerQueue::pop_due`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    /// Handle the timer was scheduled under.
    pub id: TimerId,
    /// Deadline the timer was scheduled for.
    pub deadline: Duration,
    /// Caller-supplied payload.
    pub payload: T,
}

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    deadline: Duration,
    payload: T,
}

/// Pending timers ordered by deadline.
///
/// Timers with equal deadlines fire in the order they were scheduled.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    // Sorted by (deadline, id).
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `payload` to fire once `deadline` has been reached.
    pub fn schedule(&mut self, deadline: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let at = self
            .entries
            .partition_point(|e| (e.deadline, e.id) <= (deadline, id));
        self.entries.insert(
            at,
            Entry {
                id,
                deadline,
                payload,
            },
        );
        id
    }

    /// Cancel a pending timer, returning its payload.
    ///
    /// Returns `None` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let at = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(at).payload)
    }

    /// Returns `true` if `id` is still pending.
    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.first().map(|e| e.deadline)
    }

    /// Remove and return the earliest timer whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<T>> {
        if self.entries.first()?.deadline > now {
            return None;
        }
        let e = self.entries.remove(0);
        Some(Fired {
            id: e.id,
            deadline: e.deadline,
            payload: e.payload,
        })
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(250), 'a');
        q.schedule(ms(30), 'b');
        q.schedule(ms(100), 'c');

        let mut seen = vec![];
        while let Some(f) = q.pop_due(ms(1_000)) {
            seen.push(f.payload);
        }
        assert_eq!(seen, vec!['b', 'c', 'a']);
    }

    #[test]
    fn equal_deadlines_are_fifo() {
        let mut q = TimerQueue::new();
        q.schedule(ms(0), 1);
        q.schedule(ms(0), 2);
        q.schedule(ms(0), 3);
        assert_eq!(q.pop_due(ms(0)).map(|f| f.payload), Some(1));
        assert_eq!(q.pop_due(ms(0)).map(|f| f.payload), Some(2));
        assert_eq!(q.pop_due(ms(0)).map(|f| f.payload), Some(3));
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(ms(30), ());
        assert!(q.pop_due(ms(29)).is_none());
        assert_eq!(q.len(), 1);
        assert!(q.pop_due(ms(30)).is_some());
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_removes_and_stale_cancel_is_harmless() {
        let mut q = TimerQueue::new();
        let a = q.schedule(ms(10), "a");
        let b = q.schedule(ms(20), "b");
        assert!(q.is_scheduled(a));
        assert_eq!(q.cancel(a), Some("a"));
        assert!(!q.is_scheduled(a));
        assert_eq!(q.cancel(a), None);
        assert_eq!(q.next_deadline(), Some(ms(20)));

        let fired = q.pop_due(ms(20)).unwrap();
        assert_eq!(fired.id, b);
        // Already fired: cancelling is a no-op.
        assert_eq!(q.cancel(b), None);
    }

    #[test]
    fn handles_are_not_reused_after_clear() {
        let mut q = TimerQueue::new();
        let a = q.schedule(ms(5), ());
        q.clear();
        let b = q.schedule(ms(5), ());
        assert_ne!(a, b);
        assert_eq!(q.cancel(a), None);
        assert!(q.is_scheduled(b));
    }
}
