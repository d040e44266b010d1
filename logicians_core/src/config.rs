//! Solver limits.

use crate::error::SolveError;
use crate::world::world_count;
use crate::Round;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Hard upper bound on line length. Positions are stored as `u8` and the
/// indexer tracks used slots in a `u64` mask.
pub const POSITION_CAP: usize = 32;

/// Resource limits for a simulation run.
///
/// The world count grows as `positions! / (positions - logicians)!`, so the
/// limits here are the only thing standing between a careless input and an
/// out-of-memory abort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum number of positions on the line
    pub max_positions: usize,

    /// Maximum number of worlds the table may hold
    pub max_worlds: usize,

    /// Round at which the run is abandoned if no fixed point was reached
    pub max_rounds: Round,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_positions: 20,
            max_worlds: 20_000_000,
            max_rounds: Round::MAX,
        }
    }
}

impl SolverConfig {
    /// Sets the maximum line length (clamped to [`POSITION_CAP`]).
    pub fn with_max_positions(mut self, positions: usize) -> Self {
        self.max_positions = positions.min(POSITION_CAP);
        self
    }

    /// Sets the maximum world-table size.
    pub fn with_max_worlds(mut self, worlds: usize) -> Self {
        self.max_worlds = worlds;
        self
    }

    /// Sets the round bound.
    pub fn with_max_rounds(mut self, rounds: Round) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Checks a puzzle size against these limits and returns its world count.
    pub fn admit(&self, num_logicians: usize, num_positions: usize) -> Result<usize, SolveError> {
        if num_logicians == 0 {
            return Err(SolveError::NoLogicians);
        }
        if num_positions > self.max_positions {
            return Err(SolveError::TooManyPositions {
                positions: num_positions,
                max: self.max_positions,
            });
        }
        if num_logicians > num_positions {
            return Err(SolveError::TooManyLogicians {
                logicians: num_logicians,
                positions: num_positions,
            });
        }

        let worlds = world_count(num_logicians, num_positions)
            .ok_or_else(|| SolveError::world_overflow(self.max_worlds))?;
        if worlds > self.max_worlds {
            warn!(
                "Refusing to enumerate {} worlds (limit {})",
                worlds, self.max_worlds
            );
            return Err(SolveError::WorldLimit {
                worlds: worlds.to_string(),
                max: self.max_worlds,
            });
        }
        Ok(worlds)
    }
}
