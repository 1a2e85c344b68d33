// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry snapshots for change detection.

use kurbo::Point;

/// The measurements that decide whether a shown layer must be repositioned.
///
/// Two snapshots compare equal only if every field is numerically identical;
/// there is no tolerance. A layer's watch loop keeps the last stable snapshot
/// and repositions when a fresh one differs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeometrySnapshot {
    /// Page offset of the anchor element (the document body when unanchored).
    pub anchor: Point,
    /// Outer height of the layer's projected content.
    pub content_height: f64,
    /// Height of the viewport.
    pub viewport_height: f64,
    /// Vertical scroll offset of the viewport.
    pub scroll_top: f64,
}

impl GeometrySnapshot {
    /// Whether every measurement is finite.
    ///
    /// A NaN field never compares equal, so a snapshot that is not finite
    /// can never be considered stable.
    pub fn is_finite(&self) -> bool {
        self.anchor.is_finite()
            && self.content_height.is_finite()
            && self.viewport_height.is_finite()
            && self.scroll_top.is_finite()
    }
}
