// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::string::String;
use core::fmt;

use crate::LayerId;

/// Error returned when a layer cannot be shown or addressed.
///
/// Only configuration problems are errors. Failures while hiding, tearing
/// down, or moving focus are swallowed where they happen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayerError {
    /// No layer with this id is mounted.
    UnknownLayer(LayerId),
    /// The configuration has no layer element selector.
    MissingLayerSelector,
    /// A required selector did not resolve to exactly one element.
    ElementNotFound {
        /// The selector as configured.
        selector: String,
        /// How many elements it matched.
        matches: usize,
    },
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLayer(id) => write!(f, "layer {id:?} is not mounted"),
            Self::MissingLayerSelector => f.write_str("no layer element selector configured"),
            Self::ElementNotFound {
                selector,
                matches: 0,
            } => write!(f, "no element with selector \"{selector}\" found"),
            Self::ElementNotFound { selector, matches } => write!(
                f,
                "selector \"{selector}\" matched {matches} elements, expected exactly one"
            ),
        }
    }
}

impl core::error::Error for LayerError {}

/// Error a [`Surface`](crate::Surface) reports when focus cannot be moved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceError {
    /// The node is no longer part of the document.
    Detached,
    /// The node is hidden or cannot take focus.
    NotFocusable,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detached => f.write_str("node is detached from the document"),
            Self::NotFocusable => f.write_str("node cannot take focus"),
        }
    }
}

impl core::error::Error for SurfaceError {}
