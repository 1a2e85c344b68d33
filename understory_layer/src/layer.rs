// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-layer state.

use alloc::string::String;

use understory_placement::{
    ArrowPlacement, GeometrySnapshot, PlacementResult, Strategy, StrategyKind,
};
use understory_timing::TimerId;

use crate::{LayerConfig, LayerHooks};

/// Identifier of a mounted layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(u32);

impl LayerId {
    /// Wrap a raw id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Visibility state of a layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayerState {
    /// Not shown.
    #[default]
    Hidden,
    /// Positioned and fading in.
    Showing,
    /// Fully shown; the resize watch and tab handling are active.
    Shown,
    /// Fading out.
    Hiding,
}

impl LayerState {
    /// `true` for [`LayerState::Hidden`] and [`LayerState::Hiding`].
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden | Self::Hiding)
    }
}

/// How a shown layer reacts to Tab.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TabHandling {
    /// Tab is not observed.
    #[default]
    Off,
    /// Focus cycles among the layer's tabbable nodes and never leaves.
    Capture,
    /// Focus may leave; the layer closes when it does.
    DetectExit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum LayerTimer {
    ResizePoll,
    Settle,
    OutsideTab,
}

impl LayerTimer {
    pub(crate) const ALL: [Self; 3] = [Self::ResizePoll, Self::Settle, Self::OutsideTab];
}

/// A mounted layer.
#[derive(Debug)]
pub struct Layer<N> {
    pub(crate) id: LayerId,
    pub(crate) host: N,
    pub(crate) dom_id: Option<String>,
    pub(crate) config: LayerConfig,
    pub(crate) hooks: LayerHooks,
    pub(crate) state: LayerState,
    /// Last value of the host's show signal.
    pub(crate) show_signal: bool,

    pub(crate) element: Option<N>,
    pub(crate) anchor: Option<N>,
    pub(crate) strategy: Option<Strategy>,
    pub(crate) active_before_open: Option<N>,
    pub(crate) placement: Option<PlacementResult>,
    pub(crate) arrow_memo: Option<ArrowPlacement>,
    /// Arrow waiting for the layer's move animation to finish.
    pub(crate) pending_arrow: Option<N>,
    pub(crate) watch: Option<GeometrySnapshot>,

    pub(crate) tab: TabHandling,
    /// Focus at the time of the last Tab press in exit-detection mode.
    pub(crate) tab_probe: Option<N>,

    resize_poll: Option<TimerId>,
    settle: Option<TimerId>,
    outside_tab: Option<TimerId>,
}

impl<N: Copy> Layer<N> {
    pub(crate) fn new(id: LayerId, host: N) -> Self {
        Self {
            id,
            host,
            dom_id: None,
            config: LayerConfig::default(),
            hooks: LayerHooks::new(),
            state: LayerState::Hidden,
            show_signal: false,
            element: None,
            anchor: None,
            strategy: None,
            active_before_open: None,
            placement: None,
            arrow_memo: None,
            pending_arrow: None,
            watch: None,
            tab: TabHandling::Off,
            tab_probe: None,
            resize_poll: None,
            settle: None,
            outside_tab: None,
        }
    }

    /// Identifier.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// The host element the layer was mounted on.
    pub fn host(&self) -> N {
        self.host
    }

    /// DOM id of the layer element, recorded by the last `show`.
    pub fn dom_id(&self) -> Option<&str> {
        self.dom_id.as_deref()
    }

    /// Current configuration.
    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    /// Current visibility state.
    pub fn state(&self) -> LayerState {
        self.state
    }

    /// Shorthand for `state().is_hidden()`.
    pub fn is_hidden(&self) -> bool {
        self.state.is_hidden()
    }

    /// The layer element resolved by the last `show`.
    pub fn element(&self) -> Option<N> {
        self.element
    }

    /// The anchor element resolved by the last `show`, if anchored.
    pub fn anchor(&self) -> Option<N> {
        self.anchor
    }

    /// Which strategy the last `show` selected.
    pub fn strategy_kind(&self) -> Option<StrategyKind> {
        self.strategy.as_ref().map(Strategy::kind)
    }

    /// The most recently applied placement.
    pub fn placement(&self) -> Option<&PlacementResult> {
        self.placement.as_ref()
    }

    /// The last stable geometry snapshot of the resize watch.
    pub fn watch_snapshot(&self) -> Option<GeometrySnapshot> {
        self.watch
    }

    /// Current Tab handling mode.
    pub fn tab_handling(&self) -> TabHandling {
        self.tab
    }

    pub(crate) fn timer_slot(&mut self, kind: LayerTimer) -> &mut Option<TimerId> {
        match kind {
            LayerTimer::ResizePoll => &mut self.resize_poll,
            LayerTimer::Settle => &mut self.settle,
            LayerTimer::OutsideTab => &mut self.outside_tab,
        }
    }

    /// Whether any of the layer's timers is pending.
    pub fn has_pending_timers(&self) -> bool {
        self.resize_poll.is_some() || self.settle.is_some() || self.outside_tab.is_some()
    }
}
