// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The strategy seam and the built-in strategy set.

use crate::{
    AbsolutePlacement, AnchorPlacement, FixedPlacement, PlacementInput, PlacementResult,
};

/// Converts measured geometry into a concrete placement.
///
/// Implementations must be pure: the same input always yields the same
/// result. Hosts may call [`PlacementStrategy::calculate`] repeatedly while a
/// layer is shown (for example after every detected resize).
pub trait PlacementStrategy {
    /// Compute the placement for `input`.
    fn calculate(&self, input: &PlacementInput) -> PlacementResult;
}

/// Discriminant of a [`Strategy`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// [`AnchorPlacement`].
    Anchor,
    /// [`FixedPlacement`].
    Fixed,
    /// [`AbsolutePlacement`].
    Absolute,
}

/// One of the built-in strategies, chosen once when a layer is shown.
#[derive(Clone, Debug, PartialEq)]
pub enum Strategy {
    /// Adjacent to an anchor element.
    Anchor(AnchorPlacement),
    /// Centered in the viewport.
    Fixed(FixedPlacement),
    /// Attached to the top of the visible document area.
    Absolute(AbsolutePlacement),
}

impl Strategy {
    /// Which strategy this is.
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Anchor(_) => StrategyKind::Anchor,
            Self::Fixed(_) => StrategyKind::Fixed,
            Self::Absolute(_) => StrategyKind::Absolute,
        }
    }
}

impl PlacementStrategy for Strategy {
    fn calculate(&self, input: &PlacementInput) -> PlacementResult {
        match self {
            Self::Anchor(s) => s.calculate(input),
            Self::Fixed(s) => s.calculate(input),
            Self::Absolute(s) => s.calculate(input),
        }
    }
}

impl From<AnchorPlacement> for Strategy {
    fn from(s: AnchorPlacement) -> Self {
        Self::Anchor(s)
    }
}

impl From<FixedPlacement> for Strategy {
    fn from(s: FixedPlacement) -> Self {
        Self::Fixed(s)
    }
}

impl From<AbsolutePlacement> for Strategy {
    fn from(s: AbsolutePlacement) -> Self {
        Self::Absolute(s)
    }
}
