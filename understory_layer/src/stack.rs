// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stack of open layers.

use alloc::vec::Vec;

use crate::LayerId;

/// What the document-level listeners must do after a stack change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerChange {
    /// The stack went from empty to one layer: attach.
    Attach,
    /// The stack went from one layer to empty: detach.
    Detach,
    /// Listener state stays as it is.
    Unchanged,
}

/// Open layers in show order; the last entry is topmost.
///
/// A layer appears at most once. Document listeners are expected to be
/// attached exactly while the stack is non-empty; [`LayerStack::push`] and
/// [`LayerStack::remove`] report the transitions that require a change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerStack {
    order: Vec<LayerId>,
}

impl LayerStack {
    /// Create an empty stack.
    pub const fn new() -> Self {
        Self { order: Vec::new() }
    }

    /// Append `id` as the topmost layer.
    ///
    /// Returns `None` if `id` is already open; the stack is left unchanged.
    pub fn push(&mut self, id: LayerId) -> Option<ListenerChange> {
        if self.contains(id) {
            return None;
        }
        self.order.push(id);
        Some(if self.order.len() == 1 {
            ListenerChange::Attach
        } else {
            ListenerChange::Unchanged
        })
    }

    /// Remove `id`, wherever it is in the stack.
    ///
    /// Returns `None` if `id` was not open.
    pub fn remove(&mut self, id: LayerId) -> Option<ListenerChange> {
        let index = self.order.iter().position(|&l| l == id)?;
        self.order.remove(index);
        Some(if self.order.is_empty() {
            ListenerChange::Detach
        } else {
            ListenerChange::Unchanged
        })
    }

    /// Whether `id` is open.
    pub fn contains(&self, id: LayerId) -> bool {
        self.order.contains(&id)
    }

    /// The most recently shown layer.
    pub fn top(&self) -> Option<LayerId> {
        self.order.last().copied()
    }

    /// Open layers from topmost to bottom.
    pub fn top_down(&self) -> impl DoubleEndedIterator<Item = LayerId> + '_ {
        self.order.iter().rev().copied()
    }

    /// Number of open layers.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no layer is open.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether document listeners should be attached.
    pub fn is_listening(&self) -> bool {
        !self.is_empty()
    }
}
