//! Sweeps over precision and magnitude for batches of test data.
//!
//! A sweep walks the precision down from its maximum to zero, then multiplies
//! the bound by ten and starts over. The default plan yields twelve rows at
//! two, one and zero digits for bounds 1, 10, 100 and 1000.
//!
//! A point whose grid holds no value inside `(0, bound)` (bound 1 at zero
//! digits) is lifted to the smallest precision that does.

use crate::errors::{ProbeError, ProbeResult};
use crate::generator::sampler::SideGenerator;
use crate::generator::strategy::Strategy;
use crate::geometry::adjust::{AdjustmentKind, SideAdjustment, SideSelector};
use crate::geometry::sides::SideTriple;
use crate::util::MAX_PRECISION;
use rand::Rng;
use serde::Serialize;

/// Shape of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPlan {
    /// Number of rows to produce
    pub rows: usize,
    /// Bound used for the first precision cycle
    pub start_bound: f64,
    /// Precision at the start of each cycle
    pub max_precision: u32,
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            rows: 12,
            start_bound: 1.0,
            max_precision: 2,
        }
    }
}

/// One `(precision, bound)` combination of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Decimal digits retained per side
    pub precision: u32,
    /// Exclusive upper bound of every side
    pub bound: f64,
}

impl SweepPlan {
    /// Creates a sweep plan.
    #[must_use]
    pub const fn new(rows: usize, start_bound: f64, max_precision: u32) -> Self {
        Self {
            rows,
            start_bound,
            max_precision,
        }
    }

    /// Iterates over the plan's points in row order.
    pub fn points(&self) -> impl Iterator<Item = SweepPoint> + use<> {
        let cycle = self.max_precision.saturating_add(1);
        let start_bound = self.start_bound;
        (0..self.rows).scan((self.max_precision, start_bound), move |state, row| {
            let (precision, bound) = *state;
            let point = SweepPoint {
                precision: precision.max(min_precision(bound)),
                bound,
            };
            *state = if (row + 1) % (cycle as usize) == 0 {
                (cycle - 1, bound * 10.0)
            } else {
                (precision.saturating_sub(1), bound)
            };
            Some(point)
        })
    }
}

/// Smallest precision whose grid step fits strictly below `bound`.
fn min_precision(bound: f64) -> u32 {
    let mut precision = 0;
    let mut scale = 1.0;
    while precision < MAX_PRECISION && bound * scale <= 1.0 {
        precision += 1;
        scale *= 10.0;
    }
    precision
}

/// A generated row of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepSample {
    /// Where in the sweep the row was drawn
    pub point: SweepPoint,
    /// Adjustment applied after generation, if any
    pub adjustment: Option<SideAdjustment>,
    /// Resulting sides
    pub sides: SideTriple,
}

/// Generates one triple per point of `plan`.
///
/// When `adjust` is set, consecutive rows have the first, second, third and
/// then all sides zeroed or negated, in rotation.
///
/// # Errors
///
/// Returns [`ProbeError::InvalidParameters`] for an empty plan, and
/// propagates any generation error from the individual rows.
pub fn generate_sweep<R: Rng>(
    generator: &mut SideGenerator<R>,
    strategy: Strategy,
    plan: &SweepPlan,
    adjust: Option<AdjustmentKind>,
) -> ProbeResult<Vec<SweepSample>> {
    if plan.rows == 0 {
        return Err(ProbeError::InvalidParameters(
            "sweep must have at least one row".to_string(),
        ));
    }

    log::info!(
        "Sweeping {} {strategy} rows from bound {} at up to {} digits",
        plan.rows,
        plan.start_bound,
        plan.max_precision
    );

    plan.points()
        .zip(SideSelector::rotation())
        .map(|(point, selector)| {
            let generated = generator.generate(strategy, point.precision, point.bound)?;
            let adjustment = adjust.map(|kind| kind.select(selector));
            let sides = adjustment.map_or(generated, |a| generated.adjusted(a));
            Ok(SweepSample {
                point,
                adjustment,
                sides,
            })
        })
        .collect()
}
