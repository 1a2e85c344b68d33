// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small in-memory document implementing [`Surface`] for controller tests.

#![allow(
    missing_docs,
    dead_code,
    reason = "Integration-test helper module; not every test file uses every helper."
)]

use std::cell::RefCell;
use std::ops::{Index, IndexMut};
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect};
use smallvec::SmallVec;
use understory_focus::{TabEntry, TabFlags, TabRole};
use understory_layer::{
    CssPosition, LayerHooks, LayerHost, LayerId, Presentation, Surface, SurfaceError, Transition,
};
use understory_placement::{ArrowPlacement, LayerStyles, PositionMode};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Presentation(NodeId, Presentation),
    Styles(NodeId, LayerStyles),
    Offsets(NodeId, Point),
    Animate(NodeId, Point),
    FadeIn(NodeId),
    FadeOut(NodeId),
    Finish(NodeId),
    Arrow(NodeId, ArrowPlacement),
    Class(NodeId, String, bool),
    ScrollLock(bool),
    Listen(bool),
    Focus(NodeId),
    Blur(NodeId),
    Positioned,
    Closed(bool),
}

pub type Log = Rc<RefCell<Vec<Op>>>;

#[derive(Clone, Debug)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub tag: &'static str,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub position: CssPosition,
    pub z_index: Option<i32>,
    pub visible: bool,
    pub fixed: bool,
    pub rect: Rect,
    pub content_height: f64,
    pub scroll_height: f64,
    pub tab: Option<(TabRole, Option<i32>, TabFlags)>,
}

impl Node {
    fn new(tag: &'static str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            tag,
            id: None,
            classes: Vec::new(),
            position: CssPosition::Static,
            z_index: None,
            visible: true,
            fixed: false,
            rect: Rect::ZERO,
            content_height: 0.0,
            scroll_height: 0.0,
            tab: None,
        }
    }
}

#[derive(Debug)]
pub struct Dom {
    nodes: Vec<Node>,
    pub viewport: Rect,
    pub active: Option<NodeId>,
    pub listening: bool,
    pub scroll_locked: bool,
    pub log: Log,
}

impl Index<NodeId> for Dom {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Dom {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

impl Dom {
    pub const ROOT: NodeId = NodeId(0);
    pub const BODY: NodeId = NodeId(1);

    pub fn new() -> Self {
        let mut root = Node::new("html");
        root.rect = Rect::new(0.0, 0.0, 1024.0, 2000.0);
        let mut body = Node::new("body");
        body.parent = Some(Self::ROOT);
        body.rect = root.rect;
        root.children.push(Self::BODY);
        Self {
            nodes: vec![root, body],
            viewport: Rect::new(0.0, 0.0, 1024.0, 768.0),
            active: None,
            listening: false,
            scroll_locked: false,
            log: Log::default(),
        }
    }

    pub fn add(&mut self, parent: NodeId, tag: &'static str) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = Node::new(tag);
        node.parent = Some(parent);
        self.nodes.push(node);
        self[parent].children.push(id);
        id
    }

    /// A positioned element with a DOM id and a border box.
    pub fn element(&mut self, parent: NodeId, id: &str, rect: Rect) -> NodeId {
        let node = self.add(parent, "div");
        self[node].id = Some(id.into());
        self[node].rect = rect;
        node
    }

    /// A focusable control.
    pub fn control(&mut self, parent: NodeId, role: TabRole, tab_index: Option<i32>) -> NodeId {
        let node = self.add(parent, "input");
        self[node].tab = Some((role, tab_index, TabFlags::empty()));
        node
    }

    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self[node].parent.take() {
            self[parent].children.retain(|&c| c != node);
        }
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.viewport = Rect::from_origin_size(Point::new(0.0, y), self.viewport.size());
    }

    pub fn ops(&self) -> Vec<Op> {
        self.log.borrow().clone()
    }

    pub fn clear_ops(&self) {
        self.log.borrow_mut().clear();
    }

    /// Hooks that append `Positioned` and `Closed` to this document's log.
    pub fn recording_hooks(&self) -> LayerHooks {
        let positioned = self.log.clone();
        let closed = self.log.clone();
        LayerHooks::new()
            .when_positioned(move || positioned.borrow_mut().push(Op::Positioned))
            .when_closed(move |forced| closed.borrow_mut().push(Op::Closed(forced)))
    }

    fn record(&self, op: Op) {
        self.log.borrow_mut().push(op);
    }

    fn walk(&self, from: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self[from].children {
            out.push(child);
            self.walk(child, out);
        }
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(scope, &mut out);
        out
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        let n = &self[node];
        if let Some(id) = selector.strip_prefix('#') {
            n.id.as_deref() == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            n.classes.iter().any(|c| c == class)
        } else {
            n.tag == selector
        }
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let mut cur = node;
        while cur != Self::ROOT {
            match self[cur].parent {
                Some(p) => cur = p,
                None => return false,
            }
        }
        true
    }

    fn move_to(&mut self, node: NodeId, offsets: Point) {
        let origin = if self[node].fixed {
            offsets + self.viewport.origin().to_vec2()
        } else {
            offsets
        };
        let size = self[node].rect.size();
        self[node].rect = Rect::from_origin_size(origin, size);
    }
}

impl Surface for Dom {
    type Node = NodeId;

    fn select(&self, selector: &str) -> SmallVec<[NodeId; 1]> {
        let mut all = vec![Self::ROOT];
        self.walk(Self::ROOT, &mut all);
        all.into_iter()
            .filter(|&n| self.matches(n, selector))
            .collect()
    }

    fn select_within(&self, scope: NodeId, selector: &str) -> SmallVec<[NodeId; 1]> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.matches(n, selector))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.select(&format!("#{id}")).first().copied()
    }

    fn element_id(&self, node: NodeId) -> Option<String> {
        self[node].id.clone()
    }

    fn set_element_id(&mut self, node: NodeId, id: &str) {
        self[node].id = Some(id.into());
    }

    fn root(&self) -> NodeId {
        Self::ROOT
    }

    fn body(&self) -> NodeId {
        Self::BODY
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self[node].parent
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self[node].parent?;
        let siblings = &self[parent].children;
        let index = siblings.iter().position(|&c| c == node)?;
        siblings.get(index + 1).copied()
    }

    fn offset_parent(&self, node: NodeId) -> Option<NodeId> {
        let mut cur = self[node].parent?;
        loop {
            if cur == Self::BODY || self[cur].position != CssPosition::Static {
                return Some(cur);
            }
            cur = self[cur].parent?;
        }
    }

    fn position(&self, node: NodeId) -> CssPosition {
        self[node].position
    }

    fn z_index(&self, node: NodeId) -> Option<i32> {
        self[node].z_index
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self[node].visible
    }

    fn border_box(&self, node: NodeId) -> Rect {
        self[node].rect
    }

    fn content_height(&self, layer: NodeId) -> f64 {
        self[layer].content_height
    }

    fn scroll_height(&self, node: NodeId) -> f64 {
        self[node].scroll_height
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn set_presentation(&mut self, node: NodeId, presentation: Presentation) {
        self.record(Op::Presentation(node, presentation));
    }

    fn apply_styles(&mut self, layer: NodeId, content_area: Option<NodeId>, styles: &LayerStyles) {
        self[layer].fixed = styles.position == PositionMode::Fixed;
        if let (Some(area), Some(cap)) = (content_area, styles.content_max_height) {
            let r = self[area].rect;
            self[area].rect = Rect::new(r.x0, r.y0, r.x1, r.y0 + cap);
        }
        self.record(Op::Styles(layer, *styles));
    }

    fn set_offsets(&mut self, node: NodeId, offsets: Point) {
        self.move_to(node, offsets);
        self.record(Op::Offsets(node, offsets));
    }

    fn animate_offsets(&mut self, node: NodeId, offsets: Point) {
        self.move_to(node, offsets);
        self.record(Op::Animate(node, offsets));
    }

    fn fade_in(&mut self, node: NodeId) {
        self[node].visible = true;
        self.record(Op::FadeIn(node));
    }

    fn fade_out(&mut self, node: NodeId) {
        self[node].visible = false;
        self.record(Op::FadeOut(node));
    }

    fn finish_transitions(&mut self, node: NodeId) {
        self.record(Op::Finish(node));
    }

    fn place_arrow(&mut self, node: NodeId, arrow: &ArrowPlacement) {
        self[node].rect = Rect::from_origin_size(arrow.origin, arrow.size);
        self.record(Op::Arrow(node, *arrow));
    }

    fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        let classes = &mut self[node].classes;
        classes.retain(|c| c != class);
        if on {
            classes.push(class.into());
        }
        self.record(Op::Class(node, class.into(), on));
    }

    fn lock_page_scroll(&mut self, locked: bool) {
        self.scroll_locked = locked;
        self.record(Op::ScrollLock(locked));
    }

    fn listen_document(&mut self, listening: bool) {
        self.listening = listening;
        self.record(Op::Listen(listening));
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    fn focus(&mut self, node: NodeId) -> Result<(), SurfaceError> {
        if !self.is_attached(node) {
            return Err(SurfaceError::Detached);
        }
        if !self[node].visible {
            return Err(SurfaceError::NotFocusable);
        }
        self.active = Some(node);
        self.record(Op::Focus(node));
        Ok(())
    }

    fn blur(&mut self, node: NodeId) -> Result<(), SurfaceError> {
        if self.active == Some(node) {
            self.active = None;
        }
        self.record(Op::Blur(node));
        Ok(())
    }

    fn tab_entries(&self, scope: NodeId, out: &mut Vec<TabEntry<NodeId>>) {
        for node in self.descendants(scope) {
            let Some((role, tab_index, mut flags)) = self[node].tab else {
                continue;
            };
            if !self[node].visible {
                flags |= TabFlags::HIDDEN;
            }
            let mut entry = TabEntry::new(node, role).with_flags(flags);
            if let Some(index) = tab_index {
                entry = entry.with_tab_index(index);
            }
            out.push(entry);
        }
    }
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// A page with an opener button, a layer host wrapping `#popup`, and an
/// unrelated element below.
pub struct Page {
    pub dom: Dom,
    pub opener: NodeId,
    pub host_element: NodeId,
    pub popup: NodeId,
    pub first: NodeId,
    pub second: NodeId,
    pub outside: NodeId,
}

impl Page {
    pub fn new() -> Self {
        let mut dom = Dom::new();
        let body = Dom::BODY;
        let opener = dom.control(body, TabRole::Button, None);
        dom[opener].rect = Rect::new(10.0, 10.0, 90.0, 40.0);
        let host_element = dom.add(body, "div");
        let popup = dom.element(host_element, "popup", Rect::new(312.0, 0.0, 712.0, 300.0));
        dom[popup].position = CssPosition::Absolute;
        dom[popup].visible = false;
        dom[popup].content_height = 300.0;
        let first = dom.control(popup, TabRole::Input, None);
        let second = dom.control(popup, TabRole::Button, None);
        let outside = dom.element(body, "outside", Rect::new(0.0, 900.0, 1024.0, 1000.0));
        Self {
            dom,
            opener,
            host_element,
            popup,
            first,
            second,
            outside,
        }
    }
}

/// Show `id` and report its fade-in as finished.
pub fn open(host: &mut LayerHost<NodeId>, dom: &mut Dom, id: LayerId, now: Duration) {
    host.show(dom, id).expect("layer shows");
    let element = host.layer(id).and_then(|l| l.element()).expect("element resolved");
    host.transition_finished(dom, now, element, Transition::FadeIn);
}

/// Hide `id` (unforced) and report its fade-out as finished.
pub fn close(host: &mut LayerHost<NodeId>, dom: &mut Dom, id: LayerId, now: Duration) {
    host.hide(dom, id, false);
    let element = host.layer(id).and_then(|l| l.element()).expect("element resolved");
    host.transition_finished(dom, now, element, Transition::FadeOut);
}
