// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer configuration, lifecycle hooks and watch-loop timing.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use understory_placement::{Positioning, Side};

/// Interval of the slow resize poll while a layer is shown.
pub const CHECK_INTERVAL: Duration = Duration::from_millis(250);

/// Interval of the fast sub-poll that waits for geometry to settle.
pub const SETTLE_INTERVAL: Duration = Duration::from_millis(30);

/// Configuration of a single layer.
///
/// A configuration is replaced as a whole on every
/// [`LayerHost::set_configuration`](crate::LayerHost::set_configuration) call;
/// fields left at their defaults keep the documented default behavior.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct LayerConfig {
    /// Selector of the element to show. Required by `show`.
    pub layer_element_selector: Option<String>,
    /// Selector of the element to attach the layer to.
    pub anchor_element_selector: Option<String>,
    /// Anchor sides to try, in order. Empty means all sides.
    pub allowed_positions: Vec<Side>,
    /// Arrow base length.
    pub arrow_width: f64,
    /// Arrow depth; also the gap between anchor and layer.
    pub arrow_height: f64,
    /// Focus the first tabbable node once the layer is shown.
    pub auto_focus: bool,
    /// Trap Tab inside the layer instead of closing it when focus leaves.
    pub capture_focus: bool,
    /// Close on Escape.
    pub close_by_keyboard: bool,
    /// Close on clicks outside the layer.
    pub close_by_outside_click: bool,
    /// Selector (relative to the layer) of a scrollable region that may be
    /// shrunk to fit.
    pub content_area_selector: Option<String>,
    /// Placement mode for layers without an anchor.
    pub positioning: Positioning,
    /// Lock page scrolling while the layer is open.
    pub prevent_body_scrolling: bool,
    /// DOM id of the arrow element.
    pub arrow_element_id: Option<String>,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            layer_element_selector: None,
            anchor_element_selector: None,
            allowed_positions: Side::ALL.to_vec(),
            arrow_width: 0.0,
            arrow_height: 0.0,
            auto_focus: true,
            capture_focus: true,
            close_by_keyboard: true,
            close_by_outside_click: true,
            content_area_selector: None,
            positioning: Positioning::Centered,
            prevent_body_scrolling: false,
            arrow_element_id: None,
        }
    }
}

impl LayerConfig {
    /// Default configuration targeting `selector`.
    pub fn for_selector(selector: impl Into<String>) -> Self {
        Self {
            layer_element_selector: Some(selector.into()),
            ..Self::default()
        }
    }
}

/// Callbacks invoked by the controller.
///
/// Both default to no-ops.
pub struct LayerHooks {
    when_positioned: Box<dyn FnMut()>,
    when_closed: Box<dyn FnMut(bool)>,
}

impl LayerHooks {
    /// Hooks that do nothing.
    pub fn new() -> Self {
        Self {
            when_positioned: Box::new(|| {}),
            when_closed: Box::new(|_| {}),
        }
    }

    /// Called after every applied positioning.
    pub fn when_positioned(mut self, f: impl FnMut() + 'static) -> Self {
        self.when_positioned = Box::new(f);
        self
    }

    /// Called when the layer starts hiding; the argument is `true` for
    /// forced closes (Escape, outside click, focus leaving, explicit force).
    pub fn when_closed(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.when_closed = Box::new(f);
        self
    }

    pub(crate) fn positioned(&mut self) {
        (self.when_positioned)();
    }

    pub(crate) fn closed(&mut self, forced: bool) {
        (self.when_closed)(forced);
    }
}

impl Default for LayerHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayerHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerHooks").finish_non_exhaustive()
    }
}

/// Timing of the resize-watch loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WatchIntervals {
    /// Slow poll interval.
    pub check: Duration,
    /// Settle sub-poll interval.
    pub settle: Duration,
}

impl Default for WatchIntervals {
    fn default() -> Self {
        Self {
            check: CHECK_INTERVAL,
            settle: SETTLE_INTERVAL,
        }
    }
}
