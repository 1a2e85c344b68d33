// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::types::clamp_span;
use crate::{
    AbsolutePlacement, ArrowPlacement, ArrowSize, LayerStyles, PlacementInput, PlacementResult,
    PlacementStrategy, PositionMode, Side,
};

/// Places the layer next to an anchor rectangle.
///
/// Sides are tried in the configured order and the first one whose candidate
/// rectangle lies fully inside the viewport wins. A candidate sits outside
/// the anchor, separated by the arrow depth, and is centered on the anchor
/// along the other axis (clamped into the viewport).
///
/// When no side fits, the side with the most room between anchor and
/// viewport edge is used; ties go to the side listed first. If that room is
/// shorter than the layer, its content area (when it has one) is capped.
///
/// Without an anchor in the input this falls back to [`AbsolutePlacement`].
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorPlacement {
    allowed: Vec<Side>,
    arrow: ArrowSize,
}

impl Default for AnchorPlacement {
    fn default() -> Self {
        Self::new(&[], ArrowSize::ZERO)
    }
}

impl AnchorPlacement {
    /// Create a strategy trying `allowed` in order.
    ///
    /// An empty list means all sides in [`Side::ALL`] order. Duplicates are
    /// kept; they only cost a repeated check.
    pub fn new(allowed: &[Side], arrow: ArrowSize) -> Self {
        let allowed = if allowed.is_empty() {
            Side::ALL.to_vec()
        } else {
            allowed.to_vec()
        };
        Self { allowed, arrow }
    }

    /// Sides in the order they are tried.
    pub fn allowed(&self) -> &[Side] {
        &self.allowed
    }

    /// Arrow dimensions.
    pub fn arrow(&self) -> ArrowSize {
        self.arrow
    }

    fn candidate(&self, side: Side, anchor: Rect, viewport: Rect, size: Size) -> Rect {
        let d = self.arrow.height;
        let center = anchor.center();
        let origin = match side {
            Side::Top | Side::Bottom => {
                let x = clamp_span(
                    center.x - size.width * 0.5,
                    size.width,
                    viewport.x0,
                    viewport.x1,
                );
                let y = if side == Side::Top {
                    anchor.y0 - d - size.height
                } else {
                    anchor.y1 + d
                };
                Point::new(x, y)
            }
            Side::Left | Side::Right => {
                let y = clamp_span(
                    center.y - size.height * 0.5,
                    size.height,
                    viewport.y0,
                    viewport.y1,
                );
                let x = if side == Side::Left {
                    anchor.x0 - d - size.width
                } else {
                    anchor.x1 + d
                };
                Point::new(x, y)
            }
        };
        Rect::from_origin_size(origin, size)
    }

    fn available(&self, side: Side, anchor: Rect, viewport: Rect) -> f64 {
        let d = self.arrow.height;
        match side {
            Side::Top => anchor.y0 - viewport.y0 - d,
            Side::Bottom => viewport.y1 - anchor.y1 - d,
            Side::Left => anchor.x0 - viewport.x0 - d,
            Side::Right => viewport.x1 - anchor.x1 - d,
        }
    }

    fn arrow_for(&self, side: Side, anchor: Rect, layer: Rect) -> ArrowPlacement {
        let ArrowSize { width, height } = self.arrow;
        let center = anchor.center();
        match side {
            Side::Top | Side::Bottom => {
                let x = clamp_span(center.x - width * 0.5, width, layer.x0, layer.x1);
                let y = if side == Side::Top {
                    anchor.y0 - height
                } else {
                    anchor.y1
                };
                ArrowPlacement {
                    side,
                    origin: Point::new(x, y),
                    size: Size::new(width, height),
                }
            }
            Side::Left | Side::Right => {
                let y = clamp_span(center.y - width * 0.5, width, layer.y0, layer.y1);
                let x = if side == Side::Left {
                    anchor.x0 - height
                } else {
                    anchor.x1
                };
                ArrowPlacement {
                    side,
                    origin: Point::new(x, y),
                    size: Size::new(height, width),
                }
            }
        }
    }

    fn result(
        &self,
        side: Side,
        anchor: Rect,
        rect: Rect,
        content_max_height: Option<f64>,
    ) -> PlacementResult {
        PlacementResult {
            styles: LayerStyles {
                position: PositionMode::Absolute,
                content_max_height,
            },
            offsets: rect.origin(),
            side: Some(side),
            arrow: Some(self.arrow_for(side, anchor, rect)),
        }
    }
}

impl PlacementStrategy for AnchorPlacement {
    fn calculate(&self, input: &PlacementInput) -> PlacementResult {
        let Some(anchor) = input.anchor else {
            return AbsolutePlacement::default().calculate(input);
        };
        let viewport = input.viewport;
        let natural = input.natural_size();

        for &side in &self.allowed {
            let rect = self.candidate(side, anchor, viewport, natural);
            if fits_within(viewport, rect) {
                return self.result(side, anchor, rect, None);
            }
        }

        let mut best = self.allowed[0];
        let mut best_space = self.available(best, anchor, viewport);
        for &side in &self.allowed[1..] {
            let space = self.available(side, anchor, viewport);
            if space > best_space {
                best = side;
                best_space = space;
            }
        }

        let limit = if best.is_vertical() {
            best_space
        } else {
            viewport.height()
        };
        let (size, cap) = match input.cap_to(limit) {
            Some((height, cap)) => (Size::new(natural.width, height), Some(cap)),
            None => (natural, None),
        };
        let rect = self.candidate(best, anchor, viewport, size);
        self.result(best, anchor, rect, cap)
    }
}

fn fits_within(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}
