// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! UI controllers frequently need "call me back in N milliseconds" without
//! owning a real event loop: polling loops, debounce windows, deferred checks
//! after a key press. This crate models that as data.
//!
//! - [`TimerQueue`] stores pending timers ordered by deadline.
//! - [`TimerId`] is a small, copyable handle used to cancel a timer.
//! - [`TimerQueue::pop_due`] hands back the next timer whose deadline has passed.
//!
//! Time is expressed as a [`Duration`](core::time::Duration) since an arbitrary,
//! host-chosen origin. The queue never reads a clock; the host decides what
//! "now" is, which keeps controllers deterministic under test.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use understory_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let poll = timers.schedule(Duration::from_millis(250), "poll");
//! let settle = timers.schedule(Duration::from_millis(30), "settle");
//!
//! // The earliest deadline is reported first.
//! assert_eq!(timers.next_deadline(), Some(Duration::from_millis(30)));
//!
//! // Cancelling hands the payload back.
//! assert_eq!(timers.cancel(settle), Some("settle"));
//!
//! // Nothing is due yet at t = 100ms.
//! assert!(timers.pop_due(Duration::from_millis(100)).is_none());
//!
//! let fired = timers.pop_due(Duration::from_millis(250)).unwrap();
//! assert_eq!(fired.id, poll);
//! assert_eq!(fired.payload, "poll");
//! assert!(timers.is_empty());
//! ```
//!
//! Hosts typically ask [`TimerQueue::next_deadline`] when to wake up next, arm
//! a single native timer for that instant, and drain [`TimerQueue::pop_due`]
//! when it fires.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod queue;

pub use queue::{Fired, TimerId, TimerQueue};
