//! Constrained random side generator.
//!
//! Each call draws sides uniformly from `[0.01, bound)`, rounds them to the
//! requested number of decimal digits, and redraws until the rounded triple
//! satisfies the strategy's predicate or the retry policy runs out.

use crate::errors::{ProbeError, ProbeResult};
use crate::generator::strategy::Strategy;
use crate::geometry::sides::SideTriple;
use crate::util::DecimalGrid;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Upper limit on candidate draws for a single generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of candidate triples drawn before failing
    pub max_attempts: u64,
}

impl Default for RetryPolicy {
    /// One million draws: enough for isosceles and sum-equal triples at two
    /// digits up to a bound of 1000.
    fn default() -> Self {
        Self {
            max_attempts: 1_000_000,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given attempt cap.
    #[must_use]
    pub const fn new(max_attempts: u64) -> Self {
        Self { max_attempts }
    }
}

/// Random side generator with an owned RNG and retry policy.
#[derive(Debug, Clone)]
pub struct SideGenerator<R = ThreadRng> {
    rng: R,
    policy: RetryPolicy,
}

impl SideGenerator<ThreadRng> {
    /// Creates a generator backed by the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for SideGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl SideGenerator<StdRng> {
    /// Creates a reproducible generator from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SideGenerator<R> {
    /// Creates a generator around an existing RNG with the default policy.
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            policy: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current retry policy.
    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Generates a triple satisfying `strategy`.
    ///
    /// # Arguments
    ///
    /// * `strategy` - Predicate the rounded triple must satisfy
    /// * `precision` - Decimal digits retained per side
    /// * `bound` - Exclusive upper bound of every side
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidParameters`] for an unusable bound or
    /// precision (see [`DecimalGrid::new`]), or
    /// [`ProbeError::SamplingExhausted`] when no satisfying triple turned up
    /// within the policy's attempt cap.
    pub fn generate(
        &mut self,
        strategy: Strategy,
        precision: u32,
        bound: f64,
    ) -> ProbeResult<SideTriple> {
        if self.policy.max_attempts == 0 {
            return Err(ProbeError::InvalidParameters(
                "retry policy must allow at least one attempt".to_string(),
            ));
        }
        let grid = DecimalGrid::new(precision, bound)?;

        for attempt in 1..=self.policy.max_attempts {
            if let Some(triple) = self.candidate(strategy, &grid) {
                log::debug!(
                    "{strategy} sides {triple} found after {attempt} attempt(s) \
                     (precision {precision}, bound {bound})"
                );
                return Ok(triple);
            }
        }

        log::warn!(
            "Gave up on {strategy} sides after {} attempts (precision {precision}, bound {bound})",
            self.policy.max_attempts
        );
        Err(ProbeError::SamplingExhausted {
            strategy,
            attempts: self.policy.max_attempts,
            precision,
            bound,
        })
    }

    /// Draws one candidate; `None` means it was rejected.
    fn candidate(&mut self, strategy: Strategy, grid: &DecimalGrid) -> Option<SideTriple> {
        if !strategy.is_rejection_sampled() {
            let (side, _) = grid.draw(&mut self.rng)?;
            return Some(SideTriple::uniform(side));
        }

        let (a, a_units) = grid.draw(&mut self.rng)?;
        let (b, b_units) = grid.draw(&mut self.rng)?;
        let (c, c_units) = grid.draw(&mut self.rng)?;
        strategy
            .accepts([a_units, b_units, c_units])
            .then_some(SideTriple::new(a, b, c))
    }
}

/// Generates a triple with a thread-local RNG and the default retry policy.
///
/// # Errors
///
/// See [`SideGenerator::generate`].
pub fn generate(strategy: Strategy, precision: u32, bound: f64) -> ProbeResult<SideTriple> {
    SideGenerator::new().generate(strategy, precision, bound)
}
