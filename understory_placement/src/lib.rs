// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Placement: where to put a floating layer.
//!
//! A floating layer (popover, dropdown, modal dialog) has to be positioned
//! against something: an anchor element, the viewport, or the top of the
//! document. This crate holds the pure geometry for that decision.
//!
//! - [`PlacementInput`] aggregates the measurements a strategy needs: the
//!   layer's size, an optional scrollable content area, the anchor rectangle
//!   and the viewport, all in page coordinates.
//! - [`PlacementStrategy`] turns an input into a [`PlacementResult`]: styles,
//!   offsets and, for anchored layers, an arrow placement.
//! - [`Strategy`] bundles the three built-in strategies:
//!   - [`AnchorPlacement`]: adjacent to an anchor, trying sides in order.
//!   - [`FixedPlacement`]: centered in the viewport with fixed positioning.
//!   - [`AbsolutePlacement`]: attached to the top of the visible document area.
//! - [`GeometrySnapshot`] captures the few measurements that signal a layer
//!   needs repositioning, and compares them exactly.
//!
//! This crate does not measure anything and does not apply anything. Callers
//! measure their rendering surface, run a strategy, and apply the result.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_placement::{
//!     AnchorPlacement, ArrowSize, PlacementInput, PlacementStrategy, Side,
//! };
//!
//! let strategy = AnchorPlacement::new(&[Side::Bottom, Side::Top], ArrowSize::new(10.0, 5.0));
//! let input = PlacementInput {
//!     layer: Size::new(100.0, 50.0),
//!     content_area: None,
//!     anchor: Some(Rect::new(200.0, 100.0, 240.0, 120.0)),
//!     viewport: Rect::new(0.0, 0.0, 800.0, 600.0),
//! };
//!
//! let result = strategy.calculate(&input);
//! assert_eq!(result.side, Some(Side::Bottom));
//! // Below the anchor, separated by the arrow depth, centered on the anchor.
//! assert_eq!(result.offsets.y, 125.0);
//! assert_eq!(result.offsets.x, 170.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod absolute;
mod anchor;
mod fixed;
mod snapshot;
mod strategy;
mod types;

pub use absolute::AbsolutePlacement;
pub use anchor::AnchorPlacement;
pub use fixed::FixedPlacement;
pub use snapshot::GeometrySnapshot;
pub use strategy::{PlacementStrategy, Strategy, StrategyKind};
pub use types::{
    ArrowPlacement, ArrowSize, ContentArea, LayerStyles, PlacementInput, PlacementResult,
    PositionMode, Positioning, Side,
};
