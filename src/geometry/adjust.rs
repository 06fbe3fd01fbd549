//! Post-processing transforms that turn valid triples into negative test data.
//!
//! Zeroed and negated sides are produced by adjusting a generated triple
//! rather than by a generator strategy of their own.

use crate::geometry::sides::SideTriple;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Which sides an adjustment touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SideSelector {
    /// First side only
    First,
    /// Second side only
    Second,
    /// Third side only
    Third,
    /// All three sides
    All,
}

impl SideSelector {
    /// Rotation order used across consecutive rows of test data.
    pub const ROTATION: [Self; 4] = [Self::First, Self::Second, Self::Third, Self::All];

    /// Endless iterator over [`Self::ROTATION`].
    pub fn rotation() -> impl Iterator<Item = Self> {
        Self::ROTATION.into_iter().cycle()
    }

    const fn covers(self, index: usize) -> bool {
        match self {
            Self::First => index == 0,
            Self::Second => index == 1,
            Self::Third => index == 2,
            Self::All => true,
        }
    }
}

/// Kind of adjustment, selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum AdjustmentKind {
    /// Force selected sides to zero
    Zero,
    /// Flip the sign of selected sides
    Negate,
}

impl AdjustmentKind {
    /// Pairs this kind with a selector.
    #[must_use]
    pub const fn select(self, selector: SideSelector) -> SideAdjustment {
        match self {
            Self::Zero => SideAdjustment::Zero(selector),
            Self::Negate => SideAdjustment::Negate(selector),
        }
    }
}

/// A transform applied to a generated triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SideAdjustment {
    /// Replace the selected sides with zero
    Zero(SideSelector),
    /// Negate the selected sides
    Negate(SideSelector),
}

impl SideAdjustment {
    /// Applies the adjustment to a triple.
    #[must_use]
    pub fn apply(self, triple: SideTriple) -> SideTriple {
        let mut sides = triple.sides();
        for (index, side) in sides.iter_mut().enumerate() {
            match self {
                Self::Zero(selector) if selector.covers(index) => *side = 0.0,
                Self::Negate(selector) if selector.covers(index) => *side = -*side,
                _ => {}
            }
        }
        SideTriple::from(sides)
    }
}

impl fmt::Display for SideAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero(selector) => write!(f, "zero {selector:?}"),
            Self::Negate(selector) => write!(f, "negate {selector:?}"),
        }
    }
}
