// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-level input routed to open layers.

use kurbo::Point;
use ui_events::keyboard::{Key, KeyState, KeyboardEvent, Modifiers, NamedKey};

/// The parts of a keyboard event the controller looks at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyInput {
    /// Logical key.
    pub key: Key,
    /// Press or release.
    pub state: KeyState,
    /// Modifier state at the time of the event.
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// A key event without modifiers.
    pub fn new(key: Key, state: KeyState) -> Self {
        Self {
            key,
            state,
            modifiers: Modifiers::empty(),
        }
    }

    /// Replace the modifier state.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Escape being released.
    pub(crate) fn is_escape_release(&self) -> bool {
        self.key == Key::Named(NamedKey::Escape) && matches!(self.state, KeyState::Up)
    }

    /// Tab being pressed.
    pub(crate) fn is_tab_press(&self) -> bool {
        self.key == Key::Named(NamedKey::Tab) && matches!(self.state, KeyState::Down)
    }

    pub(crate) fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

impl From<&KeyboardEvent> for KeyInput {
    fn from(event: &KeyboardEvent) -> Self {
        Self {
            key: event.key.clone(),
            state: event.state,
            modifiers: event.modifiers,
        }
    }
}

/// A document click.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Click<N> {
    /// Pointer position in page coordinates.
    pub page: Point,
    /// Event target.
    pub target: N,
}

/// Whether the controller acted on an input event.
///
/// On [`InputOutcome::Consumed`] the host should try to stop propagation
/// and prevent the default action. For clicks this is best effort: by the
/// time a click is dispatched, other handlers may already have seen it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputOutcome {
    /// No layer reacted.
    Ignored,
    /// A layer reacted.
    Consumed,
}

impl InputOutcome {
    /// `true` for [`InputOutcome::Consumed`].
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}
