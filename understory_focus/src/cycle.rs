// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wrapping focus cycles over a precomputed tab order.

/// Traversal direction of a Tab key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Tab.
    Forward,
    /// Shift+Tab.
    Backward,
}

impl Direction {
    /// Direction for a Tab press with the given Shift state.
    pub fn from_shift(shift: bool) -> Self {
        if shift { Self::Backward } else { Self::Forward }
    }
}

/// Pick the node that receives focus after `current` in `order`.
///
/// Traversal wraps: forward from the last node returns the first, backward
/// from the first returns the last. A `current` that is not part of `order`
/// (including `None`) moves to the first node going forward and to the last
/// node going backward.
///
/// Returns `None` only when `order` is empty.
pub fn cycle<K: Copy + PartialEq>(
    order: &[K],
    current: Option<K>,
    direction: Direction,
) -> Option<K> {
    if order.is_empty() {
        return None;
    }
    let last = order.len() - 1;
    let index = current.and_then(|c| order.iter().position(|&k| k == c));
    let next = match (direction, index) {
        (Direction::Forward, Some(i)) if i < last => i + 1,
        (Direction::Forward, _) => 0,
        (Direction::Backward, Some(i)) if i > 0 => i - 1,
        (Direction::Backward, _) => last,
    };
    Some(order[next])
}
