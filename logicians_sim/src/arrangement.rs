//! Arrangements as users type and read them.
//!
//! Users count positions and rounds from 1; the solver counts from 0.
//! Everything crossing that boundary goes through this module.

use crate::error::FrontendError;
use logicians_core::{Position, Round, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Marker printed for a logician who never says yes.
pub const NEVER: &str = "N";

/// Converts a 1-based position typed by the user into a solver position.
pub fn position_from_user(logician: usize, value: u64) -> Result<Position, FrontendError> {
    if value == 0 {
        return Err(FrontendError::ZeroPosition(logician + 1));
    }
    Position::try_from(value - 1).map_err(|_| FrontendError::InvalidNumber {
        what: "position",
        token: value.to_string(),
    })
}

/// Parses a 1-based arrangement such as `"1,3,5"` or `"1 3 5"`.
pub fn parse_arrangement(text: &str) -> Result<World, FrontendError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(logician, token)| {
            let value = token.parse::<u64>().map_err(|_| FrontendError::InvalidNumber {
                what: "position",
                token: token.to_string(),
            })?;
            position_from_user(logician, value)
        })
        .collect()
}

/// Draws a random arrangement of `num_logicians` on `num_positions`.
///
/// The same seed always gives the same arrangement.
pub fn random_arrangement(
    seed: u64,
    num_logicians: usize,
    num_positions: usize,
) -> Result<World, FrontendError> {
    if num_logicians > num_positions {
        return Err(logicians_core::SolveError::TooManyLogicians {
            logicians: num_logicians,
            positions: num_positions,
        }
        .into());
    }
    if num_positions > Position::MAX as usize + 1 {
        return Err(FrontendError::usage(format!(
            "{} positions do not fit the solver",
            num_positions
        )));
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(rand::seq::index::sample(&mut rng, num_positions, num_logicians)
        .into_iter()
        .map(|position| position as Position)
        .collect())
}

/// Renders positions 1-based, space separated.
pub fn format_positions(world: &[Position]) -> String {
    world
        .iter()
        .map(|&p| (p as u32 + 1).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders one first-yes value: the 1-based round, or [`NEVER`].
pub fn format_round(round: Option<Round>) -> String {
    match round {
        Some(round) => (u64::from(round) + 1).to_string(),
        None => NEVER.to_string(),
    }
}

/// Renders first-yes values space separated.
pub fn format_rounds(rounds: &[Option<Round>]) -> String {
    rounds
        .iter()
        .map(|&r| format_round(r))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The line printed once a puzzle is solved.
pub fn answer_line(rounds: &[Option<Round>]) -> String {
    format!("First yes said in round: {}", format_rounds(rounds))
}

/// A first-yes round used as a sort key.
///
/// Orders by round number with "never" after every finite round, prints
/// like [`format_round`], and serializes as that string so it can key a
/// JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FirstYes(pub Option<Round>);

impl Ord for FirstYes {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for FirstYes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FirstYes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format_round(self.0))
    }
}

impl Serialize for FirstYes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_round(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_arrangement() {
        assert_eq!(parse_arrangement("1,3,5").unwrap(), vec![0, 2, 4]);
        assert_eq!(parse_arrangement(" 2  1\t4 ").unwrap(), vec![1, 0, 3]);
        assert_eq!(parse_arrangement("4, 2").unwrap(), vec![3, 1]);
        assert!(parse_arrangement("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_arrangement_rejects_bad_tokens() {
        assert!(matches!(
            parse_arrangement("1,x"),
            Err(FrontendError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_arrangement("2,0"),
            Err(FrontendError::ZeroPosition(2))
        ));
        assert!(matches!(
            parse_arrangement("300"),
            Err(FrontendError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_random_arrangement_deterministic() {
        let a = random_arrangement(42, 3, 7).unwrap();
        let b = random_arrangement(42, 3, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert!(a.iter().all(|&p| p < 7));
        assert!(logicians_core::validate_world(7, &a).is_ok());
    }

    #[test]
    fn test_random_arrangement_too_many_logicians() {
        assert!(matches!(
            random_arrangement(1, 4, 3),
            Err(FrontendError::Solve(_))
        ));
    }

    #[test]
    fn test_format_rounds() {
        assert_eq!(format_rounds(&[Some(0), None, Some(2)]), "1 N 3");
        assert_eq!(format_positions(&[0, 4]), "1 5");
    }

    #[test]
    fn test_answer_line() {
        assert_eq!(answer_line(&[None, Some(0)]), "First yes said in round: N 1");
        assert_eq!(answer_line(&[]), "First yes said in round: ");
    }

    #[test]
    fn test_first_yes_orders_numerically_never_last() {
        let mut keys = vec![
            FirstYes(None),
            FirstYes(Some(9)),
            FirstYes(Some(1)),
            FirstYes(Some(0)),
        ];
        keys.sort();
        let shown: Vec<String> = keys.iter().map(ToString::to_string).collect();
        // "10" would sort before "2" as text
        assert_eq!(shown, ["1", "2", "10", "N"]);
    }

    proptest! {
        #[test]
        fn prop_random_arrangement_is_valid(
            seed in any::<u64>(),
            positions in 1usize..=20,
            logicians in 1usize..=20,
        ) {
            let logicians = logicians.min(positions);
            let world = random_arrangement(seed, logicians, positions).unwrap();
            prop_assert_eq!(world.len(), logicians);
            prop_assert!(logicians_core::validate_world(positions, &world).is_ok());
        }

        #[test]
        fn prop_formatted_positions_parse_back(seed in any::<u64>()) {
            let world = random_arrangement(seed, 4, 9).unwrap();
            prop_assert_eq!(parse_arrangement(&format_positions(&world)).unwrap(), world);
        }
    }
}
