// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth order: is a node rendered in front of a layer?
//!
//! Outside clicks are only outside if the clicked node is not drawn above
//! the layer (a date picker popup appended to the body, another dialog).
//! The comparison here is an approximation of the browser's stacking rules:
//!
//! 1. The page background (document element or body) is never in front.
//! 2. A statically positioned node whose offset parent is the body sits in
//!    normal flow below any positioned layer.
//! 3. Otherwise climb the positioned-ancestor chain until the next step
//!    would reach the body or document element. A chain that detaches from
//!    the document counts as in front.
//! 4. Compare [`effective_z_index`] values; higher wins.
//! 5. On equal z-index, the node later in [`document_order`] is in front.
//!    Nodes with no common root count as in front.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::Surface;

/// Whether `node` has no parent chain up to the document element.
pub fn is_detached<S: Surface>(surface: &S, node: S::Node) -> bool {
    let root = surface.root();
    let mut cur = node;
    while cur != root {
        match surface.parent(cur) {
            Some(p) => cur = p,
            None => return true,
        }
    }
    false
}

/// Nearest positioned ancestor of `node`, or the document element if there
/// is none. `None` if the chain detaches before reaching the root.
///
/// This re-derives the offset parent from computed styles instead of
/// trusting [`Surface::offset_parent`].
pub fn positioned_ancestor<S: Surface>(surface: &S, node: S::Node) -> Option<S::Node> {
    let root = surface.root();
    let mut cur = node;
    while cur != root {
        cur = surface.parent(cur)?;
        if surface.position(cur).is_positioned() {
            return Some(cur);
        }
    }
    Some(root)
}

/// The first non-zero z-index on `node` or its ancestors, considering only
/// relative, absolute and fixed elements. `0` if there is none.
pub fn effective_z_index<S: Surface>(surface: &S, node: S::Node) -> i32 {
    let mut cur = Some(node);
    while let Some(n) = cur {
        if surface.position(n).honors_z_index() {
            match surface.z_index(n) {
                Some(z) if z != 0 => return z,
                _ => {}
            }
        }
        cur = surface.parent(n);
    }
    0
}

/// Compare the document positions of `a` and `b`.
///
/// Ancestors come before their descendants. Returns `None` when the nodes do
/// not share a root.
pub fn document_order<S: Surface>(surface: &S, a: S::Node, b: S::Node) -> Option<Ordering> {
    if a == b {
        return Some(Ordering::Equal);
    }
    let path_a = ancestry(surface, a);
    let path_b = ancestry(surface, b);
    if path_a.first() != path_b.first() {
        return None;
    }
    let shared = path_a
        .iter()
        .zip(&path_b)
        .take_while(|(x, y)| x == y)
        .count();
    if shared == path_a.len() {
        return Some(Ordering::Less);
    }
    if shared == path_b.len() {
        return Some(Ordering::Greater);
    }

    let (from, to) = (path_a[shared], path_b[shared]);
    let mut next = surface.next_sibling(from);
    while let Some(n) = next {
        if n == to {
            return Some(Ordering::Less);
        }
        next = surface.next_sibling(n);
    }
    Some(Ordering::Greater)
}

/// Whether `target` is rendered in front of `layer`.
pub fn is_on_top_of<S: Surface>(surface: &S, target: S::Node, layer: S::Node) -> bool {
    let root = surface.root();
    let body = surface.body();
    if target == root || target == body {
        return false;
    }
    if surface.offset_parent(target) == Some(body) && !surface.position(target).is_positioned() {
        return false;
    }

    let mut node = target;
    loop {
        match positioned_ancestor(surface, node) {
            None => return true,
            Some(p) if p == body || p == root => break,
            Some(p) => node = p,
        }
    }

    let z_node = effective_z_index(surface, node);
    let z_layer = effective_z_index(surface, layer);
    if z_node != z_layer {
        return z_node > z_layer;
    }
    !matches!(
        document_order(surface, node, layer),
        Some(Ordering::Less | Ordering::Equal)
    )
}

/// Root-to-node path.
fn ancestry<S: Surface>(surface: &S, node: S::Node) -> Vec<S::Node> {
    let mut path = Vec::new();
    let mut cur = Some(node);
    while let Some(n) = cur {
        path.push(n);
        cur = surface.parent(n);
    }
    path.reverse();
    path
}
