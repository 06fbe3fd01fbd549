//! Error types for the triangle probe library.

use crate::generator::strategy::Strategy;
use thiserror::Error;

/// Main error type for triangle probe operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbeError {
    /// Invalid generator or configuration parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A strategy tag that the generator does not dispatch
    #[error("Unsupported strategy: {0}")]
    UnsupportedStrategy(String),

    /// Rejection sampling hit its attempt cap
    #[error(
        "No satisfying {strategy} sample found after {attempts} attempts \
         (precision {precision}, bound {bound})"
    )]
    SamplingExhausted {
        /// Strategy being sampled
        strategy: Strategy,
        /// Number of candidates drawn before giving up
        attempts: u64,
        /// Decimal digits retained per side
        precision: u32,
        /// Exclusive upper bound of each side
        bound: f64,
    },

    /// Sides do not form a triangle with positive area
    #[error("Degenerate triangle: {0}")]
    DegenerateTriangle(String),

    /// Sides rejected before being sent to the service
    #[error("Invalid triangle sides: {0}")]
    InvalidTriangle(String),

    /// The service already holds its maximum number of triangles
    #[error(
        "The service allows only {capacity} triangles and all of them are present; \
         delete some triangle to add a new one"
    )]
    CapacityExceeded {
        /// Maximum number of stored triangles
        capacity: usize,
    },

    /// The service answered with a status other than the expected one
    #[error("Unexpected status from {endpoint}: expected {expected}, got {actual}: {body}")]
    UnexpectedStatus {
        /// Request description, e.g. `GET /triangle/all`
        endpoint: String,
        /// Expected HTTP status
        expected: u16,
        /// Received HTTP status
        actual: u16,
        /// Response body as text
        body: String,
    },

    /// A response was well formed but contradicted what was sent
    #[error("Verification failed: {0}")]
    Verification(String),

    /// The HTTP request could not be performed
    #[error("HTTP transport error: {0}")]
    Transport(String),

    /// A response body could not be decoded
    #[error("Malformed response: {0}")]
    Decode(String),

    /// A request body or output row could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type for triangle probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;
