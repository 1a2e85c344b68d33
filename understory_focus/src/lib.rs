// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Focus: tab ordering and focus containment primitives.
//!
//! This crate answers two questions a modal surface has to answer on every
//! Tab key press:
//!
//! 1. Which descendants of the surface can receive keyboard focus, and in what
//!    order? See [`tab_order`].
//! 2. Given the currently focused node and a direction, which node is next,
//!    wrapping at either end? See [`cycle`].
//!
//! Nodes are described by [`TabEntry`] values. The host collects them from its
//! own tree (a DOM, a box tree, a widget tree) in document order; this crate
//! never walks a tree itself.
//!
//! ## Ordering rules
//!
//! - Candidates are the nodes whose [`TabRole`] is a natively focusable kind
//!   (inputs, links, buttons, text areas, selects), plus [`TabRole::Generic`]
//!   nodes that carry an explicit tab index.
//! - [`TabFlags::DISABLED`] and [`TabFlags::HIDDEN`] nodes are skipped, as are
//!   hidden-type inputs and nodes with a negative tab index.
//! - The remaining nodes are ordered by tab index ascending (absent counts as
//!   `0`); equal tab indices keep document order.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_focus::{cycle, tab_order, Direction, TabEntry, TabRole};
//!
//! let entries = [
//!     TabEntry::new(10, TabRole::Button).with_tab_index(2),
//!     TabEntry::new(11, TabRole::Input).with_tab_index(0),
//!     TabEntry::new(12, TabRole::Generic).with_tab_index(1),
//!     // No tab index: not a candidate.
//!     TabEntry::new(13, TabRole::Generic),
//! ];
//!
//! let mut order = Vec::new();
//! tab_order(&entries, &mut order);
//! assert_eq!(order, [11, 12, 10]);
//!
//! assert_eq!(cycle(&order, Some(10), Direction::Forward), Some(11));
//! assert_eq!(cycle(&order, Some(11), Direction::Backward), Some(10));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cycle;
mod order;

pub use cycle::{Direction, cycle};
pub use order::{TabEntry, TabFlags, TabRole, is_tabbable, tab_order};
