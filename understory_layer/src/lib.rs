// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Layer: modal and popover layers over an abstract rendering surface.
//!
//! A layer is an overlay element that is shown on request, positioned next
//! to an anchor or in the viewport, kept in place while its content or the
//! page changes size, and closed by Escape, by clicks outside, or by focus
//! leaving it.
//!
//! ## Pieces
//!
//! - [`Surface`] is everything the controller needs from the rendering layer:
//!   selector lookup, tree walking, measurement, styling, transitions, and
//!   focus. Implement it for a DOM, a widget tree, or a test fake.
//! - [`LayerHost`] owns all mounted [`Layer`]s, the [`LayerStack`] of open
//!   layers and a timer queue. It is the single entry point for lifecycle
//!   calls ([`LayerHost::show`], [`LayerHost::hide`], ...) and for document
//!   input ([`LayerHost::handle_key`], [`LayerHost::handle_click`]).
//! - [`depth`] decides whether a click target is drawn in front of a layer.
//! - Placement comes from `understory_placement`; Tab ordering and cycling
//!   from `understory_focus`.
//!
//! ## Driving the host
//!
//! The controller never blocks and never reads a clock. Animated work is
//! two-phase: the controller starts a fade or move on the surface, and the
//! host reports completion with [`LayerHost::transition_finished`]. Polling
//! work is scheduled on an internal timer queue; the host asks
//! [`LayerHost::next_deadline`] when to wake up and calls
//! [`LayerHost::advance`] then.
//!
//! A shown layer polls its geometry every [`CHECK_INTERVAL`]. When
//! something moved, it re-measures every [`SETTLE_INTERVAL`] until two
//! consecutive measurements agree, then repositions with an animation.
//!
//! ## Lifecycle
//!
//! ```text
//!   Hidden --show--> Showing --FadeIn finished--> Shown
//!     ^                 |                           |
//!     |               hide                         hide
//!     |                 v                           |
//!     +--FadeOut finished-- Hiding <----------------+
//! ```
//!
//! Document listeners (Escape and outside click) are needed exactly while
//! the stack is non-empty; the host toggles them through
//! [`Surface::listen_document`].
//!
//! ## Errors
//!
//! Only [`LayerHost::show`] and the configuration calls fail, with a
//! [`LayerError`]. Hiding, forced closing and unmounting always succeed, and
//! focus failures reported by the surface are logged and dropped.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
pub mod depth;
mod error;
mod geometry;
mod host;
mod input;
mod layer;
mod stack;
mod surface;

pub use config::{CHECK_INTERVAL, LayerConfig, LayerHooks, SETTLE_INTERVAL, WatchIntervals};
pub use error::{LayerError, SurfaceError};
pub use host::{LayerHost, SHOWING_CLASS, tabbable_nodes};
pub use input::{Click, InputOutcome, KeyInput};
pub use layer::{Layer, LayerId, LayerState, TabHandling};
pub use stack::{LayerStack, ListenerChange};
pub use surface::{CssPosition, Presentation, Surface, Transition};
