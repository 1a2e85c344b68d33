// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::{LayerStyles, PlacementInput, PlacementResult, PlacementStrategy, PositionMode};

/// Centers the layer in the viewport using fixed positioning.
///
/// Offsets are viewport coordinates, so the layer stays put while the page
/// scrolls. A layer taller than the viewport (minus `margin` on both ends) is
/// shrunk by capping its content area, when it has one.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FixedPlacement {
    /// Minimum distance kept from the top and bottom viewport edges.
    pub margin: f64,
}

impl PlacementStrategy for FixedPlacement {
    fn calculate(&self, input: &PlacementInput) -> PlacementResult {
        let natural = input.natural_size();
        let available = input.viewport.height() - 2.0 * self.margin;
        let (height, cap) = match input.cap_to(available) {
            Some((height, cap)) => (height, Some(cap)),
            None => (natural.height, None),
        };
        let top = self.margin + ((available - height) * 0.5).max(0.0);
        let left = ((input.viewport.width() - natural.width) * 0.5).max(0.0);
        PlacementResult {
            styles: LayerStyles {
                position: PositionMode::Fixed,
                content_max_height: cap,
            },
            offsets: Point::new(left, top),
            side: None,
            arrow: None,
        }
    }
}
