// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layer controller.

use alloc::format;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;
use core::time::Duration;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};
use understory_focus::{Direction, cycle, tab_order};
use understory_placement::{
    AbsolutePlacement, AnchorPlacement, ArrowSize, FixedPlacement, PlacementStrategy, Positioning,
    Strategy,
};
use understory_timing::TimerQueue;

use crate::geometry;
use crate::layer::LayerTimer;
use crate::{
    Click, InputOutcome, KeyInput, Layer, LayerConfig, LayerError, LayerHooks, LayerId, LayerStack,
    LayerState, ListenerChange, Presentation, Surface, SurfaceError, TabHandling, Transition,
    WatchIntervals, depth,
};

/// CSS class carried by a layer element while it is fully shown.
pub const SHOWING_CLASS: &str = "layer-showing";

type Timers = TimerQueue<(LayerId, LayerTimer)>;

/// Owns every mounted layer, the stack of open layers and their timers.
///
/// One host serves a whole document. All operations take the surface they
/// act on, and operations that may schedule work take the current host time
/// `now`. Call [`LayerHost::advance`] when [`LayerHost::next_deadline`] is
/// reached, and report finished animations through
/// [`LayerHost::transition_finished`].
#[derive(Debug)]
pub struct LayerHost<N> {
    layers: HashMap<LayerId, Layer<N>>,
    stack: LayerStack,
    timers: Timers,
    intervals: WatchIntervals,
    next_id: u32,
}

impl<N: Copy + Eq + Hash + Debug> Default for LayerHost<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Copy + Eq + Hash + Debug> LayerHost<N> {
    /// Create a host with the default watch intervals.
    pub fn new() -> Self {
        Self::with_intervals(WatchIntervals::default())
    }

    /// Create a host with custom watch intervals.
    pub fn with_intervals(intervals: WatchIntervals) -> Self {
        Self {
            layers: HashMap::new(),
            stack: LayerStack::new(),
            timers: TimerQueue::new(),
            intervals,
            next_id: 0,
        }
    }

    /// Watch-loop timing.
    pub fn intervals(&self) -> WatchIntervals {
        self.intervals
    }

    /// Look up a mounted layer.
    pub fn layer(&self, id: LayerId) -> Option<&Layer<N>> {
        self.layers.get(&id)
    }

    /// Open layers.
    pub fn stack(&self) -> &LayerStack {
        &self.stack
    }

    /// When [`LayerHost::advance`] next has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Create a layer for the host element `host`.
    ///
    /// Gives `host` a DOM id of the form `layer{n}` if it has none.
    pub fn mount<S: Surface<Node = N>>(&mut self, surface: &mut S, host: N) -> LayerId {
        let id = LayerId::new(self.next_id);
        self.next_id += 1;
        if surface.element_id(host).is_none_or(|s| s.is_empty()) {
            surface.set_element_id(host, &format!("layer{}", id.get()));
        }
        self.layers.insert(id, Layer::new(id, host));
        debug!(layer = ?id, "mounted");
        id
    }

    /// Replace the configuration and hooks of `id` and mark it hidden.
    ///
    /// Nothing is touched on the surface and stack membership is unchanged.
    pub fn set_configuration(
        &mut self,
        id: LayerId,
        config: LayerConfig,
        hooks: LayerHooks,
    ) -> Result<(), LayerError> {
        let layer = self
            .layers
            .get_mut(&id)
            .ok_or(LayerError::UnknownLayer(id))?;
        layer.config = config;
        layer.hooks = hooks;
        layer.state = LayerState::Hidden;
        Ok(())
    }

    /// Show `id`.
    ///
    /// The layer element is positioned while invisible, then faded in. The
    /// resize watch, Tab handling and auto focus start once the fade-in is
    /// reported finished.
    ///
    /// Fails without side effects if the layer element selector is missing
    /// or does not resolve to exactly one element. An anchor selector that
    /// does not resolve to exactly one element is ignored with a warning and
    /// the layer is placed as if it had none.
    pub fn show<S: Surface<Node = N>>(
        &mut self,
        surface: &mut S,
        id: LayerId,
    ) -> Result<(), LayerError> {
        let layer = self
            .layers
            .get_mut(&id)
            .ok_or(LayerError::UnknownLayer(id))?;
        let (element, anchor) = {
            let selector = layer
                .config
                .layer_element_selector
                .as_deref()
                .ok_or(LayerError::MissingLayerSelector)?;
            let element = select_one(surface, selector)?;
            let anchor = match layer.config.anchor_element_selector.as_deref() {
                None => None,
                Some(selector) => {
                    let matches = surface.select(selector);
                    if let [anchor] = matches.as_slice() {
                        Some(*anchor)
                    } else {
                        warn!(
                            layer = ?id,
                            selector,
                            matches = matches.len(),
                            "anchor selector does not resolve to one element; placing unanchored"
                        );
                        None
                    }
                }
            };
            (element, anchor)
        };

        for kind in LayerTimer::ALL {
            cancel_timer(&mut self.timers, layer, kind);
        }
        layer.tab_probe = None;
        layer.dom_id = surface.element_id(element);
        layer.element = Some(element);
        layer.anchor = anchor;
        layer.state = LayerState::Showing;
        layer.tab = TabHandling::Off;
        layer.pending_arrow = None;

        if self.stack.push(id) == Some(ListenerChange::Attach) {
            surface.listen_document(true);
            debug!("document listeners attached");
        }

        surface.set_presentation(element, Presentation::Measuring);
        let strategy = select_strategy(&layer.config, anchor.is_some());
        debug!(layer = ?id, strategy = ?strategy.kind(), "showing");
        layer.strategy = Some(strategy);
        reposition(surface, layer, false);
        layer.watch = Some(geometry::snapshot(surface, element, anchor));
        surface.set_presentation(element, Presentation::Concealed);

        layer.active_before_open = surface.active_element();
        surface.fade_in(element);
        if layer.config.prevent_body_scrolling {
            surface.lock_page_scroll(true);
        }
        Ok(())
    }

    /// Hide `id`. Does nothing unless the layer is open.
    ///
    /// `forced` is passed on to the `when_closed` hook, which runs before the
    /// fade-out starts. Focus returns to the element that had it before the
    /// layer opened once the fade-out is reported finished.
    pub fn hide<S: Surface<Node = N>>(&mut self, surface: &mut S, id: LayerId, forced: bool) {
        let Some(layer) = self.layers.get_mut(&id) else {
            return;
        };
        let Some(change) = self.stack.remove(id) else {
            return;
        };
        if change == ListenerChange::Detach {
            surface.listen_document(false);
            debug!("document listeners detached");
        }

        layer.hooks.closed(forced);
        if let Some(element) = layer.element {
            surface.fade_out(element);
        }
        if let Some(arrow) = arrow_node(surface, &layer.config) {
            surface.fade_out(arrow);
        }
        if layer.config.prevent_body_scrolling {
            surface.lock_page_scroll(false);
        }
        layer.pending_arrow = None;
        layer.state = LayerState::Hiding;
        debug!(layer = ?id, forced, "hiding");
    }

    /// Forced close requested by the host; same as `hide(surface, id, true)`.
    pub fn close_forced<S: Surface<Node = N>>(&mut self, surface: &mut S, id: LayerId) {
        self.hide(surface, id, true);
    }

    /// Follow the host's show signal.
    ///
    /// `true` (re)configures the layer from `configure` and shows it. `false`
    /// hides it if the previous signal was `true`; the initial `false` after
    /// mounting does nothing.
    ///
    /// A configuration whose layer element selector is missing or does not
    /// resolve to exactly one element is rejected before anything changes,
    /// so an open layer stays open under its old configuration.
    pub fn sync_show<S, F>(
        &mut self,
        surface: &mut S,
        id: LayerId,
        show: bool,
        configure: F,
    ) -> Result<(), LayerError>
    where
        S: Surface<Node = N>,
        F: FnOnce() -> (LayerConfig, LayerHooks),
    {
        let layer = self
            .layers
            .get_mut(&id)
            .ok_or(LayerError::UnknownLayer(id))?;
        if show {
            let (config, hooks) = configure();
            let selector = config
                .layer_element_selector
                .as_deref()
                .ok_or(LayerError::MissingLayerSelector)?;
            select_one(surface, selector)?;
            layer.show_signal = true;
            self.set_configuration(id, config, hooks)?;
            self.show(surface, id)
        } else {
            if core::mem::replace(&mut layer.show_signal, false) {
                self.hide(surface, id, false);
            }
            Ok(())
        }
    }

    /// Tear down `id`: cancel its timers, hide it, and forget it.
    ///
    /// A fade-out in progress is treated as finished on the spot, so focus
    /// returns to the element that had it before the layer opened.
    pub fn unmount<S: Surface<Node = N>>(&mut self, surface: &mut S, id: LayerId) {
        let Some(layer) = self.layers.get_mut(&id) else {
            return;
        };
        for kind in LayerTimer::ALL {
            cancel_timer(&mut self.timers, layer, kind);
        }
        self.hide(surface, id, false);
        let hiding = self.layers.get_mut(&id).filter(|l| l.state == LayerState::Hiding);
        if let Some(layer) = hiding {
            faded_out(surface, &mut self.timers, layer);
        }
        self.layers.remove(&id);
        debug!(layer = ?id, "unmounted");
    }

    /// Report that a transition started on `node` has finished.
    ///
    /// Completions that do not match what a layer is waiting for are ignored.
    pub fn transition_finished<S: Surface<Node = N>>(
        &mut self,
        surface: &mut S,
        now: Duration,
        node: N,
        transition: Transition,
    ) {
        let waiting = self.layers.values_mut().find(|l| {
            l.element == Some(node)
                && match transition {
                    Transition::FadeIn => l.state == LayerState::Showing,
                    Transition::FadeOut => l.state == LayerState::Hiding,
                    Transition::Move => l.pending_arrow.is_some(),
                }
        });
        let Some(layer) = waiting else {
            return;
        };
        match transition {
            Transition::FadeIn => faded_in(surface, &mut self.timers, self.intervals, layer, now),
            Transition::FadeOut => faded_out(surface, &mut self.timers, layer),
            Transition::Move => {
                if let Some(arrow) = layer.pending_arrow.take() {
                    surface.fade_in(arrow);
                }
            }
        }
    }

    /// Run every timer due at `now`, in deadline order.
    pub fn advance<S: Surface<Node = N>>(&mut self, surface: &mut S, now: Duration) {
        while let Some(fired) = self.timers.pop_due(now) {
            let (id, kind) = fired.payload;
            let Some(layer) = self.layers.get_mut(&id) else {
                continue;
            };
            let slot = layer.timer_slot(kind);
            if *slot != Some(fired.id) {
                continue;
            }
            *slot = None;
            match kind {
                LayerTimer::ResizePoll => {
                    check_size(surface, &mut self.timers, self.intervals, layer, now);
                }
                LayerTimer::Settle => {
                    settle(surface, &mut self.timers, self.intervals, layer, now);
                }
                LayerTimer::OutsideTab => {
                    if focus_left(surface, layer) {
                        debug!(layer = ?id, "focus left the layer");
                        self.hide(surface, id, true);
                    }
                }
            }
        }
    }

    /// Route a document key event.
    ///
    /// Releasing Escape force-hides the topmost open layer that allows it.
    /// Pressing Tab goes to the topmost shown layer with Tab handling.
    pub fn handle_key<S: Surface<Node = N>>(
        &mut self,
        surface: &mut S,
        now: Duration,
        key: &KeyInput,
    ) -> InputOutcome {
        if key.is_escape_release() {
            self.escape(surface)
        } else if key.is_tab_press() {
            self.tab(surface, now, key.shift())
        } else {
            InputOutcome::Ignored
        }
    }

    /// Route a document click.
    ///
    /// Every open layer that allows it, topmost first, is force-hidden when
    /// the click is outside its border box (edges count as inside) and the
    /// target is attached, not in front of the layer, and not inside it.
    pub fn handle_click<S: Surface<Node = N>>(
        &mut self,
        surface: &mut S,
        click: &Click<N>,
    ) -> InputOutcome {
        let open: SmallVec<[LayerId; 4]> = self.stack.top_down().collect();
        let before = open.len();
        for id in open {
            let Some(layer) = self.layers.get(&id) else {
                continue;
            };
            if !layer.config.close_by_outside_click {
                continue;
            }
            let Some(element) = layer.element else {
                continue;
            };
            if is_outside_click(surface, element, click) {
                debug!(layer = ?id, target = ?click.target, "outside click");
                self.hide(surface, id, true);
            }
        }
        if self.stack.len() < before {
            InputOutcome::Consumed
        } else {
            InputOutcome::Ignored
        }
    }

    fn escape<S: Surface<Node = N>>(&mut self, surface: &mut S) -> InputOutcome {
        let layers = &self.layers;
        let target = self
            .stack
            .top_down()
            .find(|id| layers.get(id).is_some_and(|l| l.config.close_by_keyboard));
        match target {
            Some(id) => {
                self.hide(surface, id, true);
                InputOutcome::Consumed
            }
            None => InputOutcome::Ignored,
        }
    }

    fn tab<S: Surface<Node = N>>(
        &mut self,
        surface: &mut S,
        now: Duration,
        shift: bool,
    ) -> InputOutcome {
        let layers = &self.layers;
        let target = self.stack.top_down().find(|id| {
            layers
                .get(id)
                .is_some_and(|l| l.state == LayerState::Shown && l.tab != TabHandling::Off)
        });
        let Some(layer) = target.and_then(|id| self.layers.get_mut(&id)) else {
            return InputOutcome::Ignored;
        };
        let Some(element) = layer.element else {
            return InputOutcome::Ignored;
        };
        match layer.tab {
            TabHandling::Capture => {
                let order = tabbable_nodes(surface, element);
                let direction = Direction::from_shift(shift);
                if let Some(next) = cycle(&order, surface.active_element(), direction) {
                    report(surface.focus(next), next);
                }
                InputOutcome::Consumed
            }
            TabHandling::DetectExit => {
                layer.tab_probe = surface.active_element();
                schedule(&mut self.timers, layer, LayerTimer::OutsideTab, now);
                InputOutcome::Ignored
            }
            TabHandling::Off => InputOutcome::Ignored,
        }
    }
}

/// Tabbable descendants of `scope` in Tab order.
pub fn tabbable_nodes<S: Surface>(surface: &S, scope: S::Node) -> Vec<S::Node> {
    let mut entries = Vec::new();
    surface.tab_entries(scope, &mut entries);
    let mut order = Vec::with_capacity(entries.len());
    tab_order(&entries, &mut order);
    order
}

fn select_one<S: Surface>(surface: &S, selector: &str) -> Result<S::Node, LayerError> {
    let matches = surface.select(selector);
    match matches.as_slice() {
        [node] => Ok(*node),
        _ => Err(LayerError::ElementNotFound {
            selector: selector.into(),
            matches: matches.len(),
        }),
    }
}

fn select_strategy(config: &LayerConfig, anchored: bool) -> Strategy {
    if anchored {
        AnchorPlacement::new(
            &config.allowed_positions,
            ArrowSize::new(config.arrow_width, config.arrow_height),
        )
        .into()
    } else if config.positioning == Positioning::Middle {
        FixedPlacement::default().into()
    } else {
        AbsolutePlacement::default().into()
    }
}

fn arrow_node<S: Surface>(surface: &S, config: &LayerConfig) -> Option<S::Node> {
    config
        .arrow_element_id
        .as_deref()
        .and_then(|id| surface.element_by_id(id))
}

/// Focus and blur failures are expected for hidden or removed nodes.
fn report<N: Debug>(result: Result<(), SurfaceError>, node: N) {
    if let Err(err) = result {
        debug!(?node, %err, "focus change ignored");
    }
}

fn schedule<N>(timers: &mut Timers, layer: &mut Layer<N>, kind: LayerTimer, deadline: Duration)
where
    N: Copy,
{
    let id = layer.id;
    let slot = layer.timer_slot(kind);
    if let Some(old) = slot.take() {
        timers.cancel(old);
    }
    *slot = Some(timers.schedule(deadline, (id, kind)));
}

fn cancel_timer<N: Copy>(timers: &mut Timers, layer: &mut Layer<N>, kind: LayerTimer) {
    if let Some(old) = layer.timer_slot(kind).take() {
        timers.cancel(old);
    }
}

/// Measure, run the strategy, and apply the result.
fn reposition<S: Surface>(surface: &mut S, layer: &mut Layer<S::Node>, animated: bool) {
    let (Some(element), Some(strategy)) = (layer.element, layer.strategy.as_ref()) else {
        return;
    };
    surface.finish_transitions(element);
    let content_area = layer
        .config
        .content_area_selector
        .as_deref()
        .and_then(|selector| surface.select_within(element, selector).first().copied());
    let input = geometry::placement_input(surface, element, content_area, layer.anchor);
    let result = strategy.calculate(&input);

    let mut arrow_to_show = None;
    if let (Some(arrow), Some(node)) = (result.arrow, arrow_node(surface, &layer.config)) {
        if layer.arrow_memo != Some(arrow) {
            if surface.is_visible(node) {
                surface.fade_out(node);
            }
            surface.place_arrow(node, &arrow);
            layer.arrow_memo = Some(arrow);
            arrow_to_show = Some(node);
        } else if !surface.is_visible(node) {
            arrow_to_show = Some(node);
        }
    }

    // Styles first: the height cap must be in place before offsets move.
    surface.apply_styles(element, content_area, &result.styles);
    if animated {
        surface.animate_offsets(element, result.offsets);
        layer.pending_arrow = arrow_to_show;
    } else {
        surface.set_offsets(element, result.offsets);
        if let Some(node) = arrow_to_show {
            surface.fade_in(node);
        }
    }
    trace!(layer = ?layer.id, side = ?result.side, animated, "positioned");
    layer.placement = Some(result);
    layer.hooks.positioned();
}

fn check_size<S: Surface>(
    surface: &mut S,
    timers: &mut Timers,
    intervals: WatchIntervals,
    layer: &mut Layer<S::Node>,
    now: Duration,
) {
    if layer.state.is_hidden() {
        return;
    }
    let Some(element) = layer.element else {
        return;
    };
    let fresh = geometry::snapshot(surface, element, layer.anchor);
    if layer.watch == Some(fresh) {
        schedule(timers, layer, LayerTimer::ResizePoll, now + intervals.check);
        return;
    }
    if !fresh.is_finite() {
        trace!(layer = ?layer.id, "geometry not measurable");
        schedule(timers, layer, LayerTimer::ResizePoll, now + intervals.check);
        return;
    }
    trace!(layer = ?layer.id, "geometry changed");
    layer.watch = Some(fresh);
    schedule(timers, layer, LayerTimer::Settle, now + intervals.settle);
}

fn settle<S: Surface>(
    surface: &mut S,
    timers: &mut Timers,
    intervals: WatchIntervals,
    layer: &mut Layer<S::Node>,
    now: Duration,
) {
    if layer.state.is_hidden() {
        return;
    }
    let Some(element) = layer.element else {
        return;
    };
    let fresh = geometry::snapshot(surface, element, layer.anchor);
    if !fresh.is_finite() {
        // Back to polling; a NaN snapshot never compares equal. Forgetting
        // the baseline makes the next measurable poll settle again.
        trace!(layer = ?layer.id, "geometry not measurable");
        layer.watch = None;
        schedule(timers, layer, LayerTimer::ResizePoll, now + intervals.check);
        return;
    }
    if layer.watch != Some(fresh) {
        trace!(layer = ?layer.id, "geometry still changing");
        layer.watch = Some(fresh);
        schedule(timers, layer, LayerTimer::Settle, now + intervals.settle);
        return;
    }
    reposition(surface, layer, true);
    check_size(surface, timers, intervals, layer, now);
}

fn faded_in<S: Surface>(
    surface: &mut S,
    timers: &mut Timers,
    intervals: WatchIntervals,
    layer: &mut Layer<S::Node>,
    now: Duration,
) {
    let Some(element) = layer.element else {
        return;
    };
    layer.state = LayerState::Shown;
    check_size(surface, timers, intervals, layer, now);
    layer.tab = if layer.config.capture_focus {
        TabHandling::Capture
    } else {
        TabHandling::DetectExit
    };
    if layer.config.auto_focus {
        if let Some(&first) = tabbable_nodes(surface, element).first() {
            report(surface.focus(first), first);
        }
    } else if let Some(previous) = layer.active_before_open {
        report(surface.blur(previous), previous);
    }
    surface.set_class(element, SHOWING_CLASS, true);
    debug!(layer = ?layer.id, tab = ?layer.tab, "shown");
}

fn faded_out<S: Surface>(surface: &mut S, timers: &mut Timers, layer: &mut Layer<S::Node>) {
    layer.tab = TabHandling::Off;
    layer.tab_probe = None;
    for kind in LayerTimer::ALL {
        cancel_timer(timers, layer, kind);
    }
    if let Some(previous) = layer.active_before_open {
        report(surface.focus(previous), previous);
    }
    if let Some(element) = layer.element {
        surface.set_class(element, SHOWING_CLASS, false);
    }
    layer.state = LayerState::Hidden;
    debug!(layer = ?layer.id, "hidden");
}

/// Whether the Tab press recorded in `tab_probe` took focus out of the layer.
///
/// Focus that did not move at all also counts: some hosts never report focus
/// moving into browser chrome.
fn focus_left<S: Surface>(surface: &S, layer: &Layer<S::Node>) -> bool {
    let Some(element) = layer.element else {
        return false;
    };
    let active = surface.active_element();
    if active == layer.tab_probe {
        return true;
    }
    match active {
        None => true,
        Some(node) => !surface.contains(element, node),
    }
}

fn is_outside_click<S: Surface>(surface: &S, element: S::Node, click: &Click<S::Node>) -> bool {
    let b = surface.border_box(element);
    let p = click.page;
    let inside = p.x >= b.x0 && p.x <= b.x1 && p.y >= b.y0 && p.y <= b.y1;
    !(inside
        || depth::is_detached(surface, click.target)
        || depth::is_on_top_of(surface, click.target, element)
        || surface.contains(element, click.target))
}
