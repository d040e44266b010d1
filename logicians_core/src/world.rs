//! Worlds and the dense world index.
//!
//! A world assigns one position to every logician. The indexer ranks a world
//! among all partial permutations of the line in lexicographic order, so the
//! ranks of `n` logicians on `m` positions cover exactly
//! `0..m! / (m - n)!` with no holes.

use crate::error::SolveError;

/// A slot on the line, `0..num_positions`.
pub type Position = u8;

/// One position per logician, pairwise distinct.
pub type World = Vec<Position>;

/// Returns `num_positions! / (num_positions - num_logicians)!`, or `None` if
/// it does not fit in a `usize`.
///
/// Zero when there are more logicians than positions.
pub fn world_count(num_logicians: usize, num_positions: usize) -> Option<usize> {
    if num_logicians > num_positions {
        return Some(0);
    }
    (num_positions - num_logicians + 1..=num_positions)
        .try_fold(1usize, |acc, k| acc.checked_mul(k))
}

/// Checks that `world` is a valid arrangement on a line of `num_positions`.
pub fn validate_world(num_positions: usize, world: &[Position]) -> Result<(), SolveError> {
    let mut seen: Vec<Option<usize>> = vec![None; num_positions];
    for (logician, &position) in world.iter().enumerate() {
        let slot = seen
            .get_mut(position as usize)
            .ok_or(SolveError::PositionOutOfRange {
                logician,
                position: position as usize,
                positions: num_positions,
            })?;
        if let Some(first) = *slot {
            return Err(SolveError::SharedPosition {
                position: position as usize,
                first,
                second: logician,
            });
        }
        *slot = Some(logician);
    }
    Ok(())
}

/// Maps valid worlds onto `0..world_count` in O(num_logicians).
#[derive(Debug, Clone)]
pub struct WorldIndexer {
    num_positions: usize,

    /// `place_values[i]` = number of ways to fill the slots after `i`
    place_values: Vec<usize>,
}

impl WorldIndexer {
    /// Creates an indexer, or `None` if the world count overflows.
    pub fn new(num_logicians: usize, num_positions: usize) -> Option<Self> {
        debug_assert!(num_positions <= crate::config::POSITION_CAP);
        let count = world_count(num_logicians, num_positions)?;
        if count == 0 {
            return None;
        }

        let mut place_values = vec![1usize; num_logicians];
        for i in (0..num_logicians.saturating_sub(1)).rev() {
            // slots i+1.. still have (num_positions - i - 1) choices for the next one
            place_values[i] = place_values[i + 1] * (num_positions - i - 1);
        }

        Some(Self {
            num_positions,
            place_values,
        })
    }

    /// Number of positions on the line.
    pub fn num_positions(&self) -> usize {
        self.num_positions
    }

    /// Number of logicians per world.
    pub fn num_logicians(&self) -> usize {
        self.place_values.len()
    }

    /// Total number of valid worlds (one past the largest index).
    pub fn len(&self) -> usize {
        self.place_values
            .first()
            .map_or(1, |&first| first * self.num_positions)
    }

    /// Always false: an indexer is only built for a non-empty world set.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the dense index of `world`.
    ///
    /// `world` must hold `num_logicians` distinct positions below
    /// `num_positions`; other inputs give an unspecified index.
    pub fn index(&self, world: &[Position]) -> usize {
        debug_assert_eq!(world.len(), self.place_values.len());
        let mut used: u64 = 0;
        let mut index = 0;
        for (&position, &place) in world.iter().zip(&self.place_values) {
            let bit = 1u64 << position;
            let used_below = (used & (bit - 1)).count_ones() as usize;
            index += (position as usize - used_below) * place;
            used |= bit;
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_worlds(num_logicians: usize, num_positions: usize) -> Vec<World> {
        fn recurse(n: usize, m: usize, acc: &mut World, out: &mut Vec<World>) {
            if acc.len() == n {
                out.push(acc.clone());
                return;
            }
            for p in 0..m as Position {
                if !acc.contains(&p) {
                    acc.push(p);
                    recurse(n, m, acc, out);
                    acc.pop();
                }
            }
        }
        let mut out = Vec::new();
        recurse(num_logicians, num_positions, &mut Vec::new(), &mut out);
        out
    }

    #[test]
    fn test_world_count() {
        assert_eq!(world_count(1, 5), Some(5));
        assert_eq!(world_count(2, 3), Some(6));
        assert_eq!(world_count(3, 5), Some(60));
        assert_eq!(world_count(4, 4), Some(24));
        assert_eq!(world_count(0, 4), Some(1));
        assert_eq!(world_count(5, 4), Some(0));
        assert_eq!(world_count(30, 30), None);
    }

    #[test]
    fn test_index_is_dense_lexicographic_rank() {
        let indexer = WorldIndexer::new(2, 4).unwrap();
        assert_eq!(indexer.len(), 12);

        for (rank, world) in all_worlds(2, 4).iter().enumerate() {
            assert_eq!(indexer.index(world), rank, "world {:?}", world);
        }
    }

    #[test]
    fn test_index_separates_naive_hash_collision() {
        // position-weighted factorial sum maps both of these to 2
        let indexer = WorldIndexer::new(2, 3).unwrap();
        assert_ne!(indexer.index(&[0, 2]), indexer.index(&[1, 0]));
    }

    #[test]
    fn test_index_injective_full_permutations() {
        let indexer = WorldIndexer::new(5, 5).unwrap();
        let worlds = all_worlds(5, 5);
        let indices: HashSet<usize> = worlds.iter().map(|w| indexer.index(w)).collect();

        assert_eq!(indices.len(), 120);
        assert!(indices.iter().all(|&i| i < indexer.len()));
    }

    #[test]
    fn test_indexer_rejects_empty_world_set() {
        assert!(WorldIndexer::new(4, 3).is_none());
    }

    #[test]
    fn test_validate_world() {
        assert!(validate_world(4, &[0, 3, 1]).is_ok());
        assert_eq!(
            validate_world(4, &[0, 4]),
            Err(SolveError::PositionOutOfRange {
                logician: 1,
                position: 4,
                positions: 4
            })
        );
        assert_eq!(
            validate_world(4, &[2, 1, 2]),
            Err(SolveError::SharedPosition {
                position: 2,
                first: 0,
                second: 2
            })
        );
    }
}
