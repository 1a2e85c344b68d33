// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabbable candidates and their traversal order.

use alloc::vec::Vec;

/// What kind of element a candidate is.
///
/// This mirrors the selector set used to find focusable descendants:
/// `input, a, button, textarea, select, [tabindex]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TabRole {
    /// A text, checkbox, radio or other visible input.
    Input,
    /// An input of type `hidden`. Never tabbable.
    HiddenInput,
    /// A link.
    Link,
    /// A button.
    Button,
    /// A multi-line text area.
    TextArea,
    /// A select box.
    Select,
    /// Any other element; tabbable only with an explicit tab index.
    #[default]
    Generic,
}

bitflags::bitflags! {
    /// State flags of a tab candidate.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TabFlags: u8 {
        /// The element is disabled.
        const DISABLED = 0b0000_0001;
        /// The element is not rendered (for example `display: none`).
        const HIDDEN   = 0b0000_0010;
    }
}

/// A focusable candidate, as reported by the host in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabEntry<K> {
    /// Host identifier of the element.
    pub id: K,
    /// Element kind.
    pub role: TabRole,
    /// Explicit tab index, if the element carries one.
    pub tab_index: Option<i32>,
    /// State flags.
    pub flags: TabFlags,
}

impl<K> TabEntry<K> {
    /// Create an enabled, visible entry without an explicit tab index.
    pub fn new(id: K, role: TabRole) -> Self {
        Self {
            id,
            role,
            tab_index: None,
            flags: TabFlags::empty(),
        }
    }

    /// Set an explicit tab index.
    #[must_use]
    pub fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Set the state flags.
    #[must_use]
    pub fn with_flags(mut self, flags: TabFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Effective tab index used for sorting; an absent index counts as `0`.
    pub fn sort_index(&self) -> i32 {
        self.tab_index.unwrap_or(0)
    }
}

/// Returns `true` if `entry` takes part in tab traversal.
pub fn is_tabbable<K>(entry: &TabEntry<K>) -> bool {
    let candidate = match entry.role {
        TabRole::HiddenInput => return false,
        TabRole::Generic => entry.tab_index.is_some(),
        _ => true,
    };
    candidate
        && !entry.flags.intersects(TabFlags::DISABLED | TabFlags::HIDDEN)
        && entry.sort_index() >= 0
}

/// Compute the tab traversal order of `entries`.
///
/// `entries` must be in document order. The `out` buffer is cleared and
/// filled with the identifiers of tabbable entries, ordered by tab index and
/// then by document order. The input is not modified, so calling this twice
/// yields the same order.
pub fn tab_order<K: Copy>(entries: &[TabEntry<K>], out: &mut Vec<K>) {
    out.clear();
    let mut ranked: Vec<(i32, K)> = entries
        .iter()
        .filter(|e| is_tabbable(e))
        .map(|e| (e.sort_index(), e.id))
        .collect();
    // Stable: ties keep document order.
    ranked.sort_by_key(|&(index, _)| index);
    out.extend(ranked.into_iter().map(|(_, id)| id));
}
