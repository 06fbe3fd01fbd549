use crate::errors::{ProbeError, ProbeResult};
use num_traits::cast::NumCast;
use rand::{Rng, RngExt};

/// Lower floor of every raw side draw.
pub const MIN_SIDE: f64 = 0.01;

/// Largest supported number of decimal digits.
pub const MAX_PRECISION: u32 = 9;

/// Largest integer that an `f64` represents exactly (2^53).
const MAX_EXACT_UNITS: f64 = 9_007_199_254_740_992.0;

/// Rounds `value` to `precision` decimal digits via decimal formatting.
///
/// Formatting works on the exact decimal expansion of the binary value, so
/// the result is the same on every platform. Exact ties round half to even
/// (`2.5` to `2`, `0.125` to `0.12`); most decimal ties such as `1.005` are
/// not exact in binary and round by their true value. Rounding an already
/// rounded value at the same precision returns it unchanged.
///
/// # Returns
///
/// The rounded value, or `value` itself when it is not finite.
#[must_use]
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let digits = precision as usize;
    format!("{value:.digits$}").parse().unwrap_or(value)
}

/// Fewest decimal digits, up to [`MAX_PRECISION`], that hold `value` exactly.
#[must_use]
pub fn decimal_places(value: f64) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    (0..=MAX_PRECISION)
        .find(|&precision| round_to_precision(value, precision).to_bits() == value.to_bits())
}

/// Expresses three values as integer multiples of the finest decimal step
/// any of them needs.
///
/// # Returns
///
/// The units, or `None` when a value needs more than [`MAX_PRECISION`]
/// digits or its units leave the exact `f64` integer range.
#[must_use]
pub fn common_units(values: [f64; 3]) -> Option<[i64; 3]> {
    let precision = values
        .iter()
        .try_fold(0, |finest, &value| Some(finest.max(decimal_places(value)?)))?;
    let scale = 10_f64.powi(precision.cast_signed());

    let mut units = [0_i64; 3];
    for (slot, value) in units.iter_mut().zip(values) {
        let scaled = (value * scale).round();
        if scaled.abs() > MAX_EXACT_UNITS {
            return None;
        }
        *slot = <i64 as NumCast>::from(scaled)?;
    }
    Some(units)
}

/// Fixed-point grid with spacing `10^-precision` bounded above by `bound`.
///
/// Sides on the grid are compared as integer multiples of the spacing, which
/// keeps equality and inequality checks exact in decimal terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecimalGrid {
    precision: u32,
    bound: f64,
    scale: f64,
}

impl DecimalGrid {
    /// Creates a grid for the given precision and exclusive bound.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidParameters`] if the bound is not finite,
    /// does not exceed [`MIN_SIDE`], if the precision exceeds
    /// [`MAX_PRECISION`], or if `bound × 10^precision` leaves the range of
    /// exactly representable integers.
    pub fn new(precision: u32, bound: f64) -> ProbeResult<Self> {
        if !bound.is_finite() || bound <= 0.0 {
            return Err(ProbeError::InvalidParameters(format!(
                "bound must be a positive finite number, got {bound}"
            )));
        }
        if bound <= MIN_SIDE {
            return Err(ProbeError::InvalidParameters(format!(
                "bound must exceed the side floor {MIN_SIDE}, got {bound}"
            )));
        }
        if precision > MAX_PRECISION {
            return Err(ProbeError::InvalidParameters(format!(
                "precision must be at most {MAX_PRECISION}, got {precision}"
            )));
        }

        // precision <= 9, so the cast is lossless
        let scale = 10_f64.powi(precision.cast_signed());
        if bound * scale > MAX_EXACT_UNITS {
            return Err(ProbeError::InvalidParameters(format!(
                "bound {bound} at precision {precision} exceeds exact f64 range"
            )));
        }

        Ok(Self {
            precision,
            bound,
            scale,
        })
    }

    /// Decimal digits retained per side.
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Exclusive upper bound of every side.
    #[must_use]
    pub const fn bound(&self) -> f64 {
        self.bound
    }

    /// Rounds a raw value onto the grid.
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        round_to_precision(value, self.precision)
    }

    /// Expresses a rounded value as an integer count of grid steps.
    #[must_use]
    pub fn to_units(&self, value: f64) -> Option<i64> {
        <i64 as NumCast>::from((value * self.scale).round())
    }

    /// Draws one side uniformly from `[MIN_SIDE, bound)` and rounds it.
    ///
    /// # Returns
    ///
    /// The rounded side and its grid units, or `None` when rounding collapsed
    /// the side to zero or pushed it up to the bound.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<(f64, i64)> {
        let raw = rng.random_range(MIN_SIDE..self.bound);
        let side = self.round(raw);
        let units = self.to_units(side)?;
        (units > 0 && side < self.bound).then_some((side, units))
    }
}
