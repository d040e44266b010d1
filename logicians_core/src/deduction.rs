//! The yes-predicate: can a logician name their own position yet?

use crate::config::POSITION_CAP;
use crate::table::WorldTable;
use crate::world::Position;
use crate::Round;

/// Positions a logician could swap into without anyone else noticing.
///
/// The range runs from one past the nearest occupied slot below the
/// logician to one before the nearest occupied slot above, and always
/// contains the logician's own position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub low: Position,
    pub high: Position,
}

impl Gap {
    /// Computes the gap around `logician` in `world` on a line of
    /// `num_positions`.
    pub fn around(logician: usize, world: &[Position], num_positions: usize) -> Self {
        let own = world[logician];
        let mut low: Position = 0;
        let mut high = (num_positions - 1) as Position;
        for &position in world {
            if position < own {
                low = low.max(position + 1);
            } else if position > own {
                high = high.min(position - 1);
            }
        }
        Self { low, high }
    }

    /// True if `position` lies inside the gap.
    pub fn contains(&self, position: Position) -> bool {
        self.low <= position && position <= self.high
    }
}

/// Decides whether `logician`, seeing `world`, announces "yes" at `round`.
///
/// The logician says yes once every informative alternative position has
/// been ruled out strictly before `round`. Alternatives are the free slots
/// outside the logician's [`Gap`]; each is checked by moving the logician
/// there with everyone else fixed. A world ruled out *in* `round` still
/// counts as possible.
///
/// `world` must be a valid world of `table`.
pub fn says_yes(table: &WorldTable, logician: usize, world: &[Position], round: Round) -> bool {
    let num_positions = table.indexer().num_positions();
    let gap = Gap::around(logician, world, num_positions);

    let used = world
        .iter()
        .fold(0u64, |mask, &position| mask | (1u64 << position));

    // worlds never exceed POSITION_CAP entries, so the scratch copy stays on the stack
    let mut scratch = [0 as Position; POSITION_CAP];
    let hypothetical = &mut scratch[..world.len()];
    hypothetical.copy_from_slice(world);

    for position in 0..num_positions as Position {
        if used & (1u64 << position) != 0 || gap.contains(position) {
            continue;
        }
        hypothetical[logician] = position;
        match table.get(hypothetical) {
            Some(ruled_out) if ruled_out < round => {}
            _ => return false,
        }
    }
    true
}
