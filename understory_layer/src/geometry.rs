// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measuring a surface for placement and change detection.

use understory_placement::{ContentArea, GeometrySnapshot, PlacementInput};

use crate::Surface;

/// Gather the measurements a placement strategy needs.
pub(crate) fn placement_input<S: Surface>(
    surface: &S,
    layer: S::Node,
    content_area: Option<S::Node>,
    anchor: Option<S::Node>,
) -> PlacementInput {
    PlacementInput {
        layer: surface.border_box(layer).size(),
        content_area: content_area.map(|area| ContentArea {
            visible_height: surface.border_box(area).height(),
            scroll_height: surface.scroll_height(area),
        }),
        anchor: anchor.map(|a| surface.border_box(a)),
        viewport: surface.viewport(),
    }
}

/// Capture the watch snapshot; unanchored layers track the body.
pub(crate) fn snapshot<S: Surface>(
    surface: &S,
    layer: S::Node,
    anchor: Option<S::Node>,
) -> GeometrySnapshot {
    let anchor = anchor.unwrap_or_else(|| surface.body());
    let viewport = surface.viewport();
    GeometrySnapshot {
        anchor: surface.border_box(anchor).origin(),
        content_height: surface.content_height(layer),
        viewport_height: viewport.height(),
        scroll_top: viewport.y0,
    }
}
