//! Classification of side triples.

use crate::geometry::sides::SideTriple;
use std::cmp::Ordering;
use std::fmt;

/// Shape category of a side triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriangleKind {
    /// All three sides equal
    Equilateral,
    /// Exactly two sides equal
    Isosceles,
    /// No two sides equal
    Scalene,
    /// Two sides sum exactly to the third (zero area)
    Degenerate,
    /// Two sides sum to less than the third
    Impossible,
    /// At least one side is zero or negative
    NonPositive,
}

impl TriangleKind {
    /// Classifies a triple.
    ///
    /// Positivity is checked first, then the triangle inequality in decimal
    /// terms (see [`SideTriple::closure`]), then side equalities.
    #[must_use]
    pub fn of(triple: &SideTriple) -> Self {
        if !triple.is_positive() {
            return Self::NonPositive;
        }
        match triple.closure() {
            Ordering::Less => Self::Impossible,
            Ordering::Equal => Self::Degenerate,
            Ordering::Greater => {
                let [x, y, z] = triple.sorted();
                if x >= z {
                    Self::Equilateral
                } else if x >= y || y >= z {
                    Self::Isosceles
                } else {
                    Self::Scalene
                }
            }
        }
    }

    /// Whether the kind describes a triangle with positive area.
    #[must_use]
    pub const fn is_triangle(self) -> bool {
        matches!(self, Self::Equilateral | Self::Isosceles | Self::Scalene)
    }
}

impl fmt::Display for TriangleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equilateral => "equilateral",
            Self::Isosceles => "isosceles",
            Self::Scalene => "scalene",
            Self::Degenerate => "degenerate",
            Self::Impossible => "impossible",
            Self::NonPositive => "non-positive",
        };
        f.write_str(name)
    }
}
