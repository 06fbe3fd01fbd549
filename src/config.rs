//! Command line configuration for the `tprobe` binary.
//!
//! This module covers:
//! - Side generation parameters (strategy, precision, bound, count)
//! - Sweep parameters for batches of test data
//! - Remote service settings, with environment fallbacks

use crate::client::settings::{ApiConfig, DEFAULT_AUTH_HEADER, TOKEN_ENV, URL_ENV};
use crate::errors::{ProbeError, ProbeResult};
use crate::generator::sampler::RetryPolicy;
use crate::generator::strategy::Strategy;
use crate::generator::sweep::SweepPlan;
use crate::geometry::adjust::AdjustmentKind;
use crate::geometry::sides::SideTriple;
use crate::util::{MAX_PRECISION, MIN_SIDE};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

/// Top-level configuration parsed from the command line.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ProbeConfig {
    /// Operation to run
    #[command(subcommand)]
    pub command: ProbeCommand,
}

/// Operations offered by the binary.
#[derive(Subcommand, Debug, Clone)]
pub enum ProbeCommand {
    /// Generate side triples satisfying a strategy
    Generate(GenerateArgs),
    /// Generate one triple per row of a precision and bound sweep
    Sweep(SweepArgs),
    /// Classify three sides and compute their perimeter and area
    Measure(MeasureArgs),
    /// Delete every triangle stored on the remote service
    Purge(ServiceArgs),
}

/// Options shared by the generating subcommands.
#[derive(Args, Debug, Clone)]
pub struct SamplingArgs {
    /// Separator placed between sides in the output
    #[arg(long, default_value = ";")]
    pub separator: String,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum candidate draws per triple before giving up
    #[arg(long, default_value = "1000000", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_attempts: u64,
}

impl SamplingArgs {
    /// Retry policy for these options.
    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts)
    }
}

/// Arguments of `generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Predicate the generated sides must satisfy
    #[arg(short, long, value_enum)]
    pub strategy: Strategy,

    /// Decimal digits retained per side
    #[arg(
        short,
        long,
        default_value = "2",
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_PRECISION))
    )]
    pub precision: u32,

    /// Exclusive upper bound of every side
    #[arg(short, long, default_value = "10", allow_negative_numbers = true)]
    pub bound: f64,

    /// Number of triples to generate
    #[arg(short = 'n', long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Sampling options
    #[command(flatten)]
    pub sampling: SamplingArgs,
}

/// Arguments of `sweep`.
#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    /// Predicate the generated sides must satisfy
    #[arg(short, long, value_enum)]
    pub strategy: Strategy,

    /// Number of rows
    #[arg(long, default_value = "12", value_parser = clap::value_parser!(u32).range(1..))]
    pub rows: u32,

    /// Bound of the first precision cycle
    #[arg(long, default_value = "1", allow_negative_numbers = true)]
    pub start_bound: f64,

    /// Precision at the start of each cycle
    #[arg(
        long,
        default_value = "2",
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_PRECISION))
    )]
    pub max_precision: u32,

    /// Zero or negate sides in rotation after generation
    #[arg(long, value_enum)]
    pub adjust: Option<AdjustmentKind>,

    /// Print each row as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Sampling options
    #[command(flatten)]
    pub sampling: SamplingArgs,
}

impl SweepArgs {
    /// Sweep plan described by these arguments.
    #[must_use]
    pub fn plan(&self) -> SweepPlan {
        SweepPlan::new(self.rows as usize, self.start_bound, self.max_precision)
    }
}

/// Arguments of `measure`.
#[derive(Args, Debug, Clone)]
pub struct MeasureArgs {
    /// Three side lengths
    #[arg(num_args = 3, required = true, value_name = "SIDE", allow_negative_numbers = true)]
    pub sides: Vec<f64>,
}

impl MeasureArgs {
    /// The sides as a triple.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidParameters`] unless exactly three finite
    /// sides were given.
    pub fn triple(&self) -> ProbeResult<SideTriple> {
        match self.sides.as_slice() {
            &[a, b, c] if [a, b, c].iter().all(|side| side.is_finite()) => {
                Ok(SideTriple::new(a, b, c))
            }
            other => Err(ProbeError::InvalidParameters(format!(
                "expected three finite sides, got {other:?}"
            ))),
        }
    }
}

/// Remote service settings.
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Base URL of the triangle resource
    #[arg(long, env = URL_ENV)]
    pub url: String,

    /// Personal token
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: String,

    /// Header carrying the token
    #[arg(long, default_value = DEFAULT_AUTH_HEADER)]
    pub auth_header: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,
}

impl ServiceArgs {
    /// Converts these arguments into client settings.
    ///
    /// # Errors
    ///
    /// See [`ApiConfig::new`].
    pub fn to_api_config(&self) -> ProbeResult<ApiConfig> {
        Ok(ApiConfig::new(&self.url, self.token.as_str())?
            .with_auth_header(self.auth_header.as_str())
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

fn validate_bound(name: &str, bound: f64) -> ProbeResult<()> {
    if bound.is_finite() && bound > MIN_SIDE {
        Ok(())
    } else {
        Err(ProbeError::InvalidParameters(format!(
            "{name} must be a finite number greater than {MIN_SIDE}, got {bound}"
        )))
    }
}

fn validate_separator(separator: &str) -> ProbeResult<()> {
    if separator.is_empty() {
        Err(ProbeError::InvalidParameters(
            "separator must not be empty".to_string(),
        ))
    } else {
        Ok(())
    }
}

impl ProbeConfig {
    /// Builds a new instance of `ProbeConfig` from command line arguments.
    #[must_use]
    pub fn build() -> Self {
        Self::parse()
    }

    /// Validates values that clap's range checks cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidParameters`] for a bound at or below the
    /// side floor, an empty separator, or non-finite sides.
    pub fn validate(&self) -> ProbeResult<()> {
        match &self.command {
            ProbeCommand::Generate(args) => {
                validate_bound("bound", args.bound)?;
                validate_separator(&args.sampling.separator)
            }
            ProbeCommand::Sweep(args) => {
                validate_bound("start bound", args.start_bound)?;
                validate_separator(&args.sampling.separator)
            }
            ProbeCommand::Measure(args) => args.triple().map(|_| ()),
            ProbeCommand::Purge(args) => args.to_api_config().map(|_| ()),
        }
    }
}
