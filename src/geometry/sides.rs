//! Candidate triangle side triples and the metrics derived from them.

use crate::errors::{ProbeError, ProbeResult};
use crate::geometry::adjust::SideAdjustment;
use crate::geometry::classify::TriangleKind;
use crate::util::common_units;
use float_ord::FloatOrd;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Three candidate side lengths of a triangle.
///
/// Generated triples hold positive values; adjusted triples built for
/// negative tests may carry zeros or negatives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SideTriple {
    /// First side
    pub a: f64,
    /// Second side
    pub b: f64,
    /// Third side
    pub c: f64,
}

impl SideTriple {
    /// Creates a triple from three side lengths.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Creates a triple with three equal sides.
    #[must_use]
    pub const fn uniform(side: f64) -> Self {
        Self::new(side, side, side)
    }

    /// Returns the sides in order as an array.
    #[must_use]
    pub const fn sides(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Returns the sides sorted ascending.
    #[must_use]
    pub fn sorted(&self) -> [f64; 3] {
        let mut sides = self.sides();
        sides.sort_by_key(|&side| FloatOrd(side));
        sides
    }

    /// Whether every side is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.a > 0.0 && self.b > 0.0 && self.c > 0.0
    }

    /// Compares the sum of the two shorter sides with the longest side.
    ///
    /// Sides are compared as integer multiples of the finest decimal step
    /// they need, so `0.1 + 0.2` equals `0.3`. Sides with more than nine
    /// decimal digits fall back to `f64` arithmetic.
    #[must_use]
    pub fn closure(&self) -> Ordering {
        if let Some(mut units) = common_units(self.sides()) {
            units.sort_unstable();
            let [x, y, z] = units;
            return (x + y).cmp(&z);
        }
        let [x, y, z] = self.sorted();
        FloatOrd(x + y).cmp(&FloatOrd(z))
    }

    /// Whether the sum of any two sides strictly exceeds the third.
    ///
    /// See [`Self::closure`] for how sums are compared.
    #[must_use]
    pub fn satisfies_triangle_inequality(&self) -> bool {
        self.closure() == Ordering::Greater
    }

    /// Classifies the triple by side equalities and the triangle inequality.
    #[must_use]
    pub fn classify(&self) -> TriangleKind {
        TriangleKind::of(self)
    }

    /// Sum of the three sides.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.a + self.b + self.c
    }

    /// Area by Heron's formula.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::DegenerateTriangle`] if the sides violate the
    /// strict triangle inequality, where the radicand is not positive.
    pub fn area(&self) -> ProbeResult<f64> {
        if !self.is_positive() || !self.satisfies_triangle_inequality() {
            return Err(ProbeError::DegenerateTriangle(format!(
                "sides {self} do not satisfy the strict triangle inequality"
            )));
        }
        let s = self.perimeter() / 2.0;
        Ok((s * (s - self.a) * (s - self.b) * (s - self.c)).sqrt())
    }

    /// Returns a copy with the given adjustment applied.
    #[must_use]
    pub fn adjusted(&self, adjustment: SideAdjustment) -> Self {
        adjustment.apply(*self)
    }

    /// Joins the sides with `separator` into the service's `input` string.
    #[must_use]
    pub fn to_input(&self, separator: &str) -> String {
        format!(
            "{}{separator}{}{separator}{}",
            self.a, self.b, self.c
        )
    }

    /// Parses a delimiter-separated `input` string back into a triple.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidParameters`] if the separator is empty,
    /// the input does not split into exactly three parts, or a part is not a
    /// number.
    pub fn parse_input(input: &str, separator: &str) -> ProbeResult<Self> {
        if separator.is_empty() {
            return Err(ProbeError::InvalidParameters(
                "separator must not be empty".to_string(),
            ));
        }
        let parts: Vec<&str> = input.split(separator).collect();
        let &[a, b, c] = parts.as_slice() else {
            return Err(ProbeError::InvalidParameters(format!(
                "expected three sides separated by '{separator}', got {} part(s) in '{input}'",
                parts.len()
            )));
        };
        let parse = |part: &str| {
            part.trim().parse::<f64>().map_err(|e| {
                ProbeError::InvalidParameters(format!("side '{part}' is not a number: {e}"))
            })
        };
        Ok(Self::new(parse(a)?, parse(b)?, parse(c)?))
    }
}

impl From<[f64; 3]> for SideTriple {
    fn from([a, b, c]: [f64; 3]) -> Self {
        Self::new(a, b, c)
    }
}

impl fmt::Display for SideTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.a, self.b, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perimeter_and_area_3_4_5() {
        let triple = SideTriple::new(3.0, 4.0, 5.0);
        assert_relative_eq!(triple.perimeter(), 12.0);
        assert_relative_eq!(triple.area().expect("right triangle"), 6.0);
    }

    #[test]
    fn test_area_equilateral() {
        let triple = SideTriple::uniform(2.0);
        assert_relative_eq!(
            triple.area().expect("equilateral"),
            3.0_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_area_rejects_degenerate_and_impossible() {
        assert!(matches!(
            SideTriple::new(1.0, 2.0, 3.0).area(),
            Err(ProbeError::DegenerateTriangle(_))
        ));
        assert!(SideTriple::new(1.0, 1.0, 5.0).area().is_err());
        assert!(SideTriple::new(0.0, 1.0, 1.0).area().is_err());
        assert!(SideTriple::new(-3.0, 4.0, 5.0).area().is_err());
    }

    #[test]
    fn test_triangle_inequality() {
        assert!(SideTriple::new(3.0, 4.0, 5.0).satisfies_triangle_inequality());
        assert!(!SideTriple::new(1.0, 2.0, 3.0).satisfies_triangle_inequality());
        assert!(!SideTriple::new(10.0, 1.0, 1.0).satisfies_triangle_inequality());
    }

    #[test]
    fn test_decimal_sums_are_exact() {
        for (a, b, c) in [(0.1, 0.2, 0.3), (8.4, 10.8, 19.2), (11.4, 0.7, 10.7)] {
            let triple = SideTriple::new(a, b, c);
            assert_eq!(triple.closure(), Ordering::Equal, "{triple}");
            assert!(!triple.satisfies_triangle_inequality(), "{triple}");
            assert!(
                matches!(triple.area(), Err(ProbeError::DegenerateTriangle(_))),
                "{triple}"
            );
        }
        assert_eq!(SideTriple::new(0.1, 0.2, 0.31).closure(), Ordering::Less);
        assert_eq!(SideTriple::new(0.1, 0.21, 0.3).closure(), Ordering::Greater);
    }

    #[test]
    fn test_closure_falls_back_to_floats() {
        let third = 1.0 / 3.0;
        assert_eq!(
            SideTriple::new(third, third, 0.5).closure(),
            Ordering::Greater
        );
        assert_eq!(SideTriple::new(third, third, 1.0).closure(), Ordering::Less);
    }

    #[test]
    fn test_sorted() {
        let triple = SideTriple::new(5.0, 3.0, 4.0);
        assert_eq!(triple.sorted(), [3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_input_round_trip_with_custom_separator() {
        let triple = SideTriple::new(0.5, 1.25, 1.5);
        let input = triple.to_input("_");
        assert_eq!(input, "0.5_1.25_1.5");
        assert_eq!(SideTriple::parse_input(&input, "_").expect("parse"), triple);
    }

    #[test]
    fn test_parse_input_errors() {
        assert!(SideTriple::parse_input("3;4", ";").is_err());
        assert!(SideTriple::parse_input("3;4;5;6", ";").is_err());
        assert!(SideTriple::parse_input("3;x;5", ";").is_err());
        assert!(SideTriple::parse_input("3;4;5", "").is_err());
        assert!(SideTriple::parse_input("3;4;5", ".").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(SideTriple::new(3.0, 4.0, 5.5).to_string(), "(3, 4, 5.5)");
    }
}
