//! Error types for the deduction engine.

use crate::Round;
use thiserror::Error;

/// Errors that can occur when setting up or running a simulation.
///
/// Everything except [`SolveError::RoundLimit`] is detected before the world
/// table is built, so a failed call never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The puzzle needs at least one logician
    #[error("At least one logician is required")]
    NoLogicians,

    /// More logicians than there are slots to stand on
    #[error("{logicians} logicians cannot fit on {positions} positions")]
    TooManyLogicians { logicians: usize, positions: usize },

    /// Line is longer than the configured maximum
    #[error("{positions} positions exceeds the limit of {max}")]
    TooManyPositions { positions: usize, max: usize },

    /// Arrangement does not have one position per logician
    #[error("Arrangement has {actual} positions, expected {expected}")]
    ArrangementLength { expected: usize, actual: usize },

    /// A logician stands outside the line
    #[error("Logician {logician} is at position {position}, outside 0..{positions}")]
    PositionOutOfRange {
        logician: usize,
        position: usize,
        positions: usize,
    },

    /// Two logicians share a slot
    #[error("Logicians {first} and {second} both stand at position {position}")]
    SharedPosition {
        position: usize,
        first: usize,
        second: usize,
    },

    /// The world table would be too large to hold (or overflows `usize`)
    #[error("World table would need {worlds} entries, limit is {max}")]
    WorldLimit { worlds: String, max: usize },

    /// Round counter hit the configured bound before reaching a fixed point
    #[error("No fixed point after {0} rounds")]
    RoundLimit(Round),
}

impl SolveError {
    /// Creates a world-limit error for a count that overflowed.
    pub fn world_overflow(max: usize) -> Self {
        Self::WorldLimit {
            worlds: "more than usize::MAX".to_string(),
            max,
        }
    }

    /// Returns true if the error is caused by the caller's input rather than
    /// by resource limits.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(
            self,
            Self::TooManyPositions { .. } | Self::WorldLimit { .. } | Self::RoundLimit(_)
        )
    }
}
