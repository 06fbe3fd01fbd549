//! Generation strategies and their acceptance predicates.
//!
//! Predicates take sides as integer multiples of the rounding step so that
//! decimal equality holds exactly, e.g. `0.1 + 0.2 == 0.3` at one digit.

use crate::errors::ProbeError;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Geometric predicate a generated triple must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Strategy {
    /// Strict triangle inequality on all three permutations
    Valid,
    /// Two sides sum exactly to the third
    SumEqual,
    /// Two sides sum to strictly less than the third
    Invalid,
    /// Three equal sides
    Equilateral,
    /// A pair of equal sides that still closes into a triangle
    Isosceles,
}

impl Strategy {
    /// Every strategy the generator dispatches.
    pub const ALL: [Self; 5] = [
        Self::Valid,
        Self::SumEqual,
        Self::Invalid,
        Self::Equilateral,
        Self::Isosceles,
    ];

    /// Tag used on the command line and in serialized form.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::SumEqual => "sum-equal",
            Self::Invalid => "invalid",
            Self::Equilateral => "equilateral",
            Self::Isosceles => "isosceles",
        }
    }

    /// Whether the generator must redraw until [`Self::accepts`] holds.
    ///
    /// `Equilateral` copies a single draw and never rejects.
    #[must_use]
    pub const fn is_rejection_sampled(self) -> bool {
        !matches!(self, Self::Equilateral)
    }

    /// Evaluates the strategy's predicate on sides expressed in grid units.
    #[must_use]
    pub const fn accepts(self, [a, b, c]: [i64; 3]) -> bool {
        match self {
            Self::Valid => a + b > c && a + c > b && b + c > a,
            Self::Invalid => a + b < c || a + c < b || b + c < a,
            Self::SumEqual => a + b == c || a + c == b || b + c == a,
            Self::Equilateral => a == b && b == c,
            Self::Isosceles => {
                (a == b && 2 * a > c) || (a == c && 2 * c > b) || (b == c && 2 * b > a)
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Strategy {
    type Err = ProbeError;

    /// Parses a strategy tag, case-insensitively, accepting `_` for `-`.
    ///
    /// Unknown tags fail instead of falling back to a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.tag() == normalized)
            .ok_or_else(|| ProbeError::UnsupportedStrategy(s.to_string()))
    }
}
