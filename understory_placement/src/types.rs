// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inputs and outputs shared by all placement strategies.

use kurbo::{Point, Rect, Size};

/// Side of an anchor a layer can be attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Right of the anchor.
    Right,
    /// Below the anchor.
    Bottom,
    /// Left of the anchor.
    Left,
}

impl Side {
    /// All sides, in the default preference order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Returns `true` for [`Side::Top`] and [`Side::Bottom`].
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Requested placement mode for layers without an anchor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Positioning {
    /// Horizontally centered at the top of the visible document area.
    #[default]
    Centered,
    /// Centered in the viewport, unaffected by scrolling.
    Middle,
    /// Any other value; treated like [`Positioning::Centered`].
    #[cfg_attr(feature = "serde", serde(other))]
    Other,
}

/// CSS-style positioning scheme of the layer element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PositionMode {
    /// Offsets are page coordinates.
    #[default]
    Absolute,
    /// Offsets are viewport coordinates.
    Fixed,
}

/// Styles a strategy wants applied before offsets are set.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LayerStyles {
    /// Positioning scheme.
    pub position: PositionMode,
    /// Height cap for the scrollable content area; `None` removes any cap.
    pub content_max_height: Option<f64>,
}

/// Arrow geometry: `width` is the base along the layer edge, `height` the
/// depth from the layer edge to the tip.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ArrowSize {
    /// Base length.
    pub width: f64,
    /// Depth; also the gap between layer and anchor.
    pub height: f64,
}

impl ArrowSize {
    /// No arrow.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create an arrow size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Placement of the arrow element in page coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArrowPlacement {
    /// Side of the anchor the layer (and arrow) sits on.
    pub side: Side,
    /// Top-left corner of the arrow box.
    pub origin: Point,
    /// Size of the arrow box; rotated for [`Side::Left`] and [`Side::Right`].
    pub size: Size,
}

/// Measurements of a scrollable region inside the layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContentArea {
    /// Currently rendered height of the region.
    pub visible_height: f64,
    /// Height the region's content would need without scrolling.
    pub scroll_height: f64,
}

/// Everything a strategy needs to know about the current geometry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementInput {
    /// Border-box size of the layer element.
    pub layer: Size,
    /// Scrollable content region, if the layer has one.
    pub content_area: Option<ContentArea>,
    /// Anchor border box in page coordinates.
    pub anchor: Option<Rect>,
    /// Visible viewport in page coordinates; its origin is the scroll offset.
    pub viewport: Rect,
}

impl PlacementInput {
    /// Height of the layer outside its content area (padding, header, footer).
    pub fn chrome_height(&self) -> f64 {
        match self.content_area {
            Some(area) => (self.layer.height - area.visible_height).max(0.0),
            None => self.layer.height,
        }
    }

    /// Size the layer would have if its content area were not capped.
    ///
    /// Using this rather than the measured size keeps a previously applied
    /// cap from feeding back into the next placement.
    pub fn natural_size(&self) -> Size {
        match self.content_area {
            Some(area) => Size::new(
                self.layer.width,
                self.chrome_height() + area.scroll_height.max(area.visible_height),
            ),
            None => self.layer,
        }
    }

    /// Content-area cap that makes the layer fit in `available` height.
    ///
    /// Returns the capped layer height and the content-area cap, or `None`
    /// when the layer fits already or has no content area to shrink.
    pub(crate) fn cap_to(&self, available: f64) -> Option<(f64, f64)> {
        if self.content_area.is_none() {
            return None;
        }
        let natural = self.natural_size().height;
        if natural <= available {
            return None;
        }
        let available = available.max(0.0);
        let content = (available - self.chrome_height()).max(0.0);
        Some((available.max(self.chrome_height()), content))
    }
}

/// Output of a placement strategy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementResult {
    /// Styles to apply to the layer before setting offsets.
    pub styles: LayerStyles,
    /// Top-left corner of the layer; page or viewport coordinates depending
    /// on [`LayerStyles::position`].
    pub offsets: Point,
    /// Chosen anchor side, for anchored layers.
    pub side: Option<Side>,
    /// Arrow placement, for anchored layers.
    pub arrow: Option<ArrowPlacement>,
}

/// Clamp a span of `len` starting at `start` into `[min, max]`.
///
/// Spans longer than the range are aligned to `min`. Never panics; a NaN
/// `start` ends up at `min`.
pub(crate) fn clamp_span(start: f64, len: f64, min: f64, max: f64) -> f64 {
    if len >= max - min {
        min
    } else {
        start.max(min).min(max - len)
    }
}
