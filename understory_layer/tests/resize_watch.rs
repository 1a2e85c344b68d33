// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry polling, settling and animated repositioning.

mod common;

use common::{Dom, NodeId, Op, Page, ms, open};
use kurbo::{Point, Rect, Size};
use understory_layer::{LayerConfig, LayerHooks, LayerHost, LayerId, Transition, WatchIntervals};
use understory_placement::{ArrowPlacement, Side};

fn opened(page: &mut Page, host: &mut LayerHost<NodeId>, config: LayerConfig) -> LayerId {
    let id = host.mount(&mut page.dom, page.host_element);
    host.set_configuration(id, config, LayerHooks::new()).unwrap();
    open(host, &mut page.dom, id, ms(0));
    page.dom.clear_ops();
    id
}

fn moves(dom: &Dom) -> Vec<Op> {
    dom.ops()
        .into_iter()
        .filter(|op| matches!(op, Op::Animate(..) | Op::Offsets(..)))
        .collect()
}

#[test]
fn steady_geometry_keeps_polling() {
    let mut page = Page::new();
    let mut host = LayerHost::new();
    opened(&mut page, &mut host, LayerConfig::for_selector("#popup"));
    assert_eq!(host.next_deadline(), Some(ms(250)));

    host.advance(&mut page.dom, ms(250));
    assert_eq!(host.next_deadline(), Some(ms(500)));
    host.advance(&mut page.dom, ms(500));
    assert_eq!(host.next_deadline(), Some(ms(750)));
    assert!(page.dom.ops().is_empty());
}

#[test]
fn early_advance_does_nothing() {
    let mut page = Page::new();
    let mut host = LayerHost::new();
    opened(&mut page, &mut host, LayerConfig::for_selector("#popup"));
    page.dom.scroll_to(100.0);
    host.advance(&mut page.dom, ms(249));
    assert_eq!(host.next_deadline(), Some(ms(250)));
}

#[test]
fn change_settles_then_animates() {
    let mut page = Page::new();
    let mut host = LayerHost::new();
    let id = opened(&mut page, &mut host, LayerConfig::for_selector("#popup"));

    page.dom.scroll_to(200.0);
    host.advance(&mut page.dom, ms(250));
    // Change seen: settle instead of the next poll.
    assert_eq!(host.next_deadline(), Some(ms(280)));
    assert!(moves(&page.dom).is_empty());

    host.advance(&mut page.dom, ms(280));
    assert_eq!(
        moves(&page.dom),
        vec![Op::Animate(page.popup, Point::new(312.0, 200.0))]
    );
    assert_eq!(
        host.layer(id).unwrap().placement().unwrap().offsets,
        Point::new(312.0, 200.0)
    );
    // Back to regular polling.
    assert_eq!(host.next_deadline(), Some(ms(530)));
}

#[test]
fn unmeasurable_geometry_is_skipped() {
    let mut page = Page::new();
    let mut host = LayerHost::new();
    opened(&mut page, &mut host, LayerConfig::for_selector("#popup"));

    page.dom[page.popup].content_height = f64::NAN;
    host.advance(&mut page.dom, ms(250));
    assert_eq!(host.next_deadline(), Some(ms(500)));

    // Recovering to the last good measurement is no change.
    page.dom[page.popup].content_height = 300.0;
    host.advance(&mut page.dom, ms(500));
    assert_eq!(host.next_deadline(), Some(ms(750)));
    assert!(moves(&page.dom).is_empty());
}

#[test]
fn unmeasurable_geometry_while_settling_falls_back_to_polling() {
    let mut page = Page::new();
    let mut host = LayerHost::new();
    opened(&mut page, &mut host, LayerConfig::for_selector("#popup"));

    page.dom.scroll_to(200.0);
    host.advance(&mut page.dom, ms(250));
    assert_eq!(host.next_deadline(), Some(ms(280)));

    page.dom[page.popup].content_height = f64::INFINITY;
    host.advance(&mut page.dom, ms(280));
    assert_eq!(host.next_deadline(), Some(ms(530)));
    assert!(moves(&page.dom).is_empty());

    // Measurable again and still different from before the scroll: settle.
    page.dom[page.popup].content_height = 300.0;
    host.advance(&mut page.dom, ms(530));
    assert_eq!(host.next_deadline(), Some(ms(560)));
    host.advance(&mut page.dom, ms(560));
    assert_eq!(
        moves(&page.dom),
        vec![Op::Animate(page.popup, Point::new(312.0, 200.0))]
    );
}

#[test]
fn ongoing_change_delays_repositioning() {
    let mut page = Page::new();
    let mut host = LayerHost::new();
    opened(&mut page, &mut host, LayerConfig::for_selector("#popup"));

    page.dom.scroll_to(200.0);
    host.advance(&mut page.dom, ms(250));
    page.dom.scroll_to(300.0);
    host.advance(&mut page.dom, ms(280));
    assert!(moves(&page.dom).is_empty());
    assert_eq!(host.next_deadline(), Some(ms(310)));

    host.advance(&mut page.dom, ms(310));
    assert_eq!(
        moves(&page.dom),
        vec![Op::Animate(page.popup, Point::new(312.0, 300.0))]
    );
}

#[test]
fn content_growth_is_a_change() {
    let mut page = Page::new();
    let mut host = LayerHost::new();
    opened(&mut page, &mut host, LayerConfig::for_selector("#popup"));
    page.dom[page.popup].content_height = 420.0;
    host.advance(&mut page.dom, ms(250));
    assert_eq!(host.next_deadline(), Some(ms(280)));
}

#[test]
fn watch_stops_once_hidden() {
    let mut page = Page::new();
    let mut host = LayerHost::new();
    let id = opened(&mut page, &mut host, LayerConfig::for_selector("#popup"));
    host.hide(&mut page.dom, id, false);
    page.dom.clear_ops();

    page.dom.scroll_to(200.0);
    host.advance(&mut page.dom, ms(250));
    assert_eq!(host.next_deadline(), None);
    assert!(page.dom.ops().is_empty());
}

#[test]
fn hiding_while_settling_skips_the_reposition() {
    let mut page = Page::new();
    let mut host = LayerHost::new();
    let id = opened(&mut page, &mut host, LayerConfig::for_selector("#popup"));
    page.dom.scroll_to(200.0);
    host.advance(&mut page.dom, ms(250));
    host.hide(&mut page.dom, id, true);
    page.dom.clear_ops();

    host.advance(&mut page.dom, ms(280));
    assert!(page.dom.ops().is_empty());
    assert_eq!(host.next_deadline(), None);
}

#[test]
fn reshowing_restarts_the_watch() {
    let mut page = Page::new();
    let mut host = LayerHost::new();
    let id = opened(&mut page, &mut host, LayerConfig::for_selector("#popup"));
    // Showing again cancels the pending poll; a new one starts after fade-in.
    host.show(&mut page.dom, id).unwrap();
    assert_eq!(host.next_deadline(), None);
    host.transition_finished(&mut page.dom, ms(100), page.popup, Transition::FadeIn);
    assert_eq!(host.next_deadline(), Some(ms(350)));
}

#[test]
fn custom_intervals() {
    let mut page = Page::new();
    let mut host = LayerHost::with_intervals(WatchIntervals {
        check: ms(100),
        settle: ms(10),
    });
    opened(&mut page, &mut host, LayerConfig::for_selector("#popup"));
    assert_eq!(host.next_deadline(), Some(ms(100)));
    page.dom.scroll_to(50.0);
    host.advance(&mut page.dom, ms(100));
    assert_eq!(host.next_deadline(), Some(ms(110)));
}

#[test]
fn arrow_follows_after_the_move() {
    let mut page = Page::new();
    let anchor = page
        .dom
        .element(Dom::BODY, "anchor", Rect::new(400.0, 100.0, 440.0, 120.0));
    let arrow = page.dom.element(Dom::BODY, "arrow", Rect::ZERO);
    page.dom[arrow].visible = false;

    let config = LayerConfig {
        anchor_element_selector: Some("#anchor".into()),
        allowed_positions: vec![Side::Bottom],
        arrow_width: 20.0,
        arrow_height: 10.0,
        arrow_element_id: Some("arrow".into()),
        ..LayerConfig::for_selector("#popup")
    };
    let mut host = LayerHost::new();
    let id = host.mount(&mut page.dom, page.host_element);
    host.set_configuration(id, config, LayerHooks::new()).unwrap();
    host.show(&mut page.dom, id).unwrap();

    // Not animated: the arrow is placed and shown right away.
    let ops = page.dom.ops();
    let first = ArrowPlacement {
        side: Side::Bottom,
        origin: Point::new(410.0, 120.0),
        size: Size::new(20.0, 10.0),
    };
    assert!(ops.contains(&Op::Arrow(arrow, first)));
    assert!(ops.contains(&Op::Offsets(page.popup, Point::new(220.0, 130.0))));
    let shown = ops.iter().position(|op| *op == Op::FadeIn(arrow));
    let faded = ops.iter().position(|op| *op == Op::FadeIn(page.popup));
    assert!(shown.is_some() && shown < faded);

    host.transition_finished(&mut page.dom, ms(0), page.popup, Transition::FadeIn);
    page.dom.clear_ops();

    page.dom[anchor].rect = Rect::new(500.0, 100.0, 540.0, 120.0);
    host.advance(&mut page.dom, ms(250));
    host.advance(&mut page.dom, ms(280));
    let second = ArrowPlacement {
        origin: Point::new(510.0, 120.0),
        ..first
    };
    let ops = page.dom.ops();
    assert!(ops.contains(&Op::FadeOut(arrow)));
    assert!(ops.contains(&Op::Arrow(arrow, second)));
    assert!(ops.contains(&Op::Animate(page.popup, Point::new(320.0, 130.0))));
    assert!(!ops.contains(&Op::FadeIn(arrow)));

    // The arrow reappears once the move completes, exactly once.
    host.transition_finished(&mut page.dom, ms(600), page.popup, Transition::Move);
    assert_eq!(page.dom.ops().last(), Some(&Op::FadeIn(arrow)));
    page.dom.clear_ops();
    host.transition_finished(&mut page.dom, ms(700), page.popup, Transition::Move);
    assert!(page.dom.ops().is_empty());
}

#[test]
fn unchanged_arrow_is_left_alone() {
    let mut page = Page::new();
    page.dom
        .element(Dom::BODY, "anchor", Rect::new(400.0, 100.0, 440.0, 120.0));
    let arrow = page.dom.element(Dom::BODY, "arrow", Rect::ZERO);
    let config = LayerConfig {
        anchor_element_selector: Some("#anchor".into()),
        arrow_width: 20.0,
        arrow_height: 10.0,
        arrow_element_id: Some("arrow".into()),
        ..LayerConfig::for_selector("#popup")
    };
    let mut host = LayerHost::new();
    opened(&mut page, &mut host, config);

    // Content grows but the placement stays the same.
    page.dom[page.popup].content_height = 320.0;
    host.advance(&mut page.dom, ms(250));
    host.advance(&mut page.dom, ms(280));
    let ops = page.dom.ops();
    assert!(ops.iter().any(|op| matches!(op, Op::Animate(..))));
    assert!(!ops.iter().any(|op| matches!(op, Op::Arrow(..) | Op::FadeOut(_))));
    assert!(!ops.contains(&Op::FadeIn(arrow)));
}
