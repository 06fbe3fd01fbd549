#![allow(clippy::multiple_crate_versions)]
#![warn(missing_docs)]

//! Constrained random triangle side generation and an end-to-end probe for a
//! remote triangle service.
//!
//! The generator produces side triples that satisfy a chosen geometric
//! predicate at a fixed decimal precision, for use as test data against a
//! service that stores triangles and computes their perimeter and area.
//!
//! # Key Features
//!
//! - Rejection sampling for valid, invalid, sum-equal, equilateral and
//!   isosceles triples, with an explicit attempt cap
//! - Decimal rounding that keeps equality checks exact at the chosen precision
//! - Precision and bound sweeps, with rotating zero or negative sides
//! - Heron's formula and triangle classification
//! - A blocking HTTP client and orchestration helpers for the remote service
//!
//! # Example
//!
//! ```rust
//! use triangle_probe::{SideGenerator, Strategy};
//!
//! let mut generator = SideGenerator::seeded(42);
//! let sides = generator.generate(Strategy::Valid, 2, 10.0).unwrap();
//! assert!(sides.satisfies_triangle_inequality());
//! ```

use rand::Rng;

// Module declarations (avoiding mod.rs files)
/// Error types for the probe library.
pub mod errors;

/// Decimal rounding and random draw helpers.
pub mod util;

/// Command line configuration.
pub mod config;

/// Side triples and the geometry derived from them.
pub mod geometry {
    /// Zero and negative side transforms.
    pub mod adjust;
    /// Triangle classification.
    pub mod classify;
    /// The side triple value type, perimeter and area.
    pub mod sides;
}

/// Constrained random side generation.
pub mod generator {
    /// Rejection-sampling generator and retry policy.
    pub mod sampler;
    /// Generation strategies and their predicates.
    pub mod strategy;
    /// Precision and bound sweeps.
    pub mod sweep;
}

/// HTTP collaborator for the remote triangle service.
pub mod client {
    /// Typed requests, responses and the blocking client.
    pub mod api;
    /// Orchestration helpers asserting each endpoint's happy path.
    pub mod session;
    /// Connection settings.
    pub mod settings;
}

// Re-exports for convenience
pub use client::api::{
    ApiResponse, CreateTriangle, MetricResult, ServiceError, TriangleClient, TriangleRecord,
};
pub use client::session::{ProbeSession, SERVICE_CAPACITY};
pub use client::settings::ApiConfig;
pub use config::{ProbeCommand, ProbeConfig};
pub use errors::{ProbeError, ProbeResult};
pub use generator::sampler::{RetryPolicy, SideGenerator, generate};
pub use generator::strategy::Strategy;
pub use generator::sweep::{SweepPlan, SweepPoint, SweepSample, generate_sweep};
pub use geometry::adjust::{AdjustmentKind, SideAdjustment, SideSelector};
pub use geometry::classify::TriangleKind;
pub use geometry::sides::SideTriple;

use config::{GenerateArgs, MeasureArgs, ServiceArgs, SweepArgs};

/// Runs the configured command.
///
/// # Returns
///
/// The lines to print on standard output.
///
/// # Errors
///
/// Returns [`ProbeError::InvalidParameters`] for arguments that fail
/// validation, and propagates generation and service errors.
pub fn run(config: &ProbeConfig) -> ProbeResult<Vec<String>> {
    config.validate()?;

    match &config.command {
        ProbeCommand::Generate(args) => {
            let policy = args.sampling.policy();
            match args.sampling.seed {
                Some(seed) => run_generate(SideGenerator::seeded(seed).with_policy(policy), args),
                None => run_generate(SideGenerator::new().with_policy(policy), args),
            }
        }
        ProbeCommand::Sweep(args) => {
            let policy = args.sampling.policy();
            match args.sampling.seed {
                Some(seed) => run_sweep(SideGenerator::seeded(seed).with_policy(policy), args),
                None => run_sweep(SideGenerator::new().with_policy(policy), args),
            }
        }
        ProbeCommand::Measure(args) => run_measure(args),
        ProbeCommand::Purge(args) => run_purge(args),
    }
}

fn run_generate<R: Rng>(
    mut generator: SideGenerator<R>,
    args: &GenerateArgs,
) -> ProbeResult<Vec<String>> {
    log::info!("Strategy: {}", args.strategy);
    log::info!("Precision: {}", args.precision);
    log::info!("Bound: {}", args.bound);

    (0..args.count)
        .map(|_| {
            generator
                .generate(args.strategy, args.precision, args.bound)
                .map(|sides| sides.to_input(&args.sampling.separator))
        })
        .collect()
}

fn run_sweep<R: Rng>(
    mut generator: SideGenerator<R>,
    args: &SweepArgs,
) -> ProbeResult<Vec<String>> {
    let samples = generate_sweep(&mut generator, args.strategy, &args.plan(), args.adjust)?;
    if args.json {
        return samples
            .iter()
            .map(|sample| {
                serde_json::to_string(sample).map_err(|e| ProbeError::Serialization(e.to_string()))
            })
            .collect();
    }
    Ok(samples
        .iter()
        .map(|sample| {
            format!(
                "{}\t{}\t{}",
                sample.point.precision,
                sample.point.bound,
                sample.sides.to_input(&args.sampling.separator)
            )
        })
        .collect())
}

fn run_measure(args: &MeasureArgs) -> ProbeResult<Vec<String>> {
    let sides = args.triple()?;
    let area = match sides.area() {
        Ok(area) => area.to_string(),
        Err(e) => {
            log::warn!("{e}");
            "undefined".to_string()
        }
    };
    Ok(vec![
        format!("sides: {sides}"),
        format!("kind: {}", sides.classify()),
        format!("perimeter: {}", sides.perimeter()),
        format!("area: {area}"),
    ])
}

fn run_purge(args: &ServiceArgs) -> ProbeResult<Vec<String>> {
    let client = TriangleClient::new(args.to_api_config()?)?;
    let deleted = ProbeSession::new(client).purge()?;
    log::info!("Purged {deleted} triangle(s) from {}", args.url);
    Ok(vec![format!("deleted: {deleted}")])
}
