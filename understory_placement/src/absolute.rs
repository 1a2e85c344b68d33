// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::{LayerStyles, PlacementInput, PlacementResult, PlacementStrategy, PositionMode};

/// Attaches the layer to the top of the visible document area.
///
/// The layer is absolutely positioned at the current scroll offset (plus
/// `margin`) and centered horizontally. It scrolls with the page until the
/// next placement moves it back into view.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AbsolutePlacement {
    /// Distance kept from the top of the viewport.
    pub margin: f64,
}

impl PlacementStrategy for AbsolutePlacement {
    fn calculate(&self, input: &PlacementInput) -> PlacementResult {
        let vp = input.viewport;
        let width = input.natural_size().width;
        PlacementResult {
            styles: LayerStyles {
                position: PositionMode::Absolute,
                content_max_height: None,
            },
            offsets: Point::new(
                vp.x0 + ((vp.width() - width) * 0.5).max(0.0),
                vp.y0 + self.margin,
            ),
            side: None,
            arrow: None,
        }
    }
}
