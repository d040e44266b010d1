//! Error types for the command-line front end.

use logicians_core::SolveError;
use thiserror::Error;

/// Errors raised while reading input, solving, or writing results.
#[derive(Debug, Error)]
pub enum FrontendError {
    /// A token that should have been a number was not
    #[error("Expected a number for {what}, got '{token}'")]
    InvalidNumber { what: &'static str, token: String },

    /// Input ended before all values were read
    #[error("Input ended while reading {0}")]
    MissingInput(&'static str),

    /// Positions are entered 1-based
    #[error("Position of logician {0} must be at least 1")]
    ZeroPosition(usize),

    /// Options that only make sense together were not given together
    #[error("Usage error: {0}")]
    Usage(String),

    /// The solver rejected the input or hit a limit
    #[error(transparent)]
    Solve(#[from] SolveError),

    /// Reading stdin or writing an export failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FrontendError {
    /// Creates a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}
