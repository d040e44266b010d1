//! World table: every possible world and the round it was ruled out in.

use crate::world::{Position, WorldIndexer};
use crate::Round;
use tracing::debug;

/// Every valid world, keyed by its dense index.
///
/// Worlds are stored flat, `num_logicians` positions per entry, in index
/// order. Keys never change after construction; each status moves from
/// `None` (live) to `Some(round)` at most once.
#[derive(Debug, Clone)]
pub struct WorldTable {
    indexer: WorldIndexer,

    /// Concatenated worlds, entry `i` is `worlds[i * n..(i + 1) * n]`
    worlds: Vec<Position>,

    /// First round each world was ruled out in
    ruled_out: Vec<Option<Round>>,

    live: usize,
}

impl WorldTable {
    /// Enumerates every world for `indexer` with every world live.
    pub fn new(indexer: WorldIndexer) -> Self {
        let count = indexer.len();
        let num_logicians = indexer.num_logicians();

        let mut table = Self {
            worlds: Vec::with_capacity(count * num_logicians),
            ruled_out: vec![None; count],
            live: count,
            indexer,
        };

        let mut acc = Vec::with_capacity(num_logicians);
        let mut used = vec![false; table.indexer.num_positions()];
        table.enumerate(&mut acc, &mut used);

        debug_assert_eq!(table.worlds.len(), count * num_logicians);
        debug!("World table initialized with {} worlds", count);
        table
    }

    fn enumerate(&mut self, acc: &mut Vec<Position>, used: &mut [bool]) {
        if acc.len() == self.indexer.num_logicians() {
            debug_assert_eq!(self.indexer.index(acc), self.len_enumerated());
            self.worlds.extend_from_slice(acc);
            return;
        }
        for position in 0..used.len() {
            if used[position] {
                continue;
            }
            acc.push(position as Position);
            used[position] = true;
            self.enumerate(acc, used);
            acc.pop();
            used[position] = false;
        }
    }

    fn len_enumerated(&self) -> usize {
        match self.indexer.num_logicians() {
            0 => 0,
            n => self.worlds.len() / n,
        }
    }

    /// The indexer backing this table.
    pub fn indexer(&self) -> &WorldIndexer {
        &self.indexer
    }

    /// Number of worlds (live or not).
    pub fn len(&self) -> usize {
        self.ruled_out.len()
    }

    /// True if the table holds no worlds.
    pub fn is_empty(&self) -> bool {
        self.ruled_out.is_empty()
    }

    /// Number of worlds not yet ruled out.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// The world stored at `index`.
    pub fn world(&self, index: usize) -> &[Position] {
        let n = self.indexer.num_logicians();
        &self.worlds[index * n..(index + 1) * n]
    }

    /// Status of the world at `index`: `None` while live.
    pub fn status(&self, index: usize) -> Option<Round> {
        self.ruled_out[index]
    }

    /// Status of `world`, looked up through the indexer.
    pub fn get(&self, world: &[Position]) -> Option<Round> {
        self.ruled_out[self.indexer.index(world)]
    }

    /// Indices of the worlds still live.
    pub fn live_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.ruled_out
            .iter()
            .enumerate()
            .filter(|(_, status)| status.is_none())
            .map(|(index, _)| index)
    }

    /// Marks the world at `index` as ruled out in `round`.
    ///
    /// Returns false (and leaves the table untouched) if it was already
    /// ruled out.
    pub fn rule_out(&mut self, index: usize, round: Round) -> bool {
        match self.ruled_out[index] {
            Some(previous) => {
                debug!(
                    "World {:?} already ruled out in round {}, ignoring round {}",
                    self.world(index),
                    previous,
                    round
                );
                false
            }
            None => {
                self.ruled_out[index] = Some(round);
                self.live -= 1;
                true
            }
        }
    }
}
