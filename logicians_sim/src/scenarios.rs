//! Named puzzle set-ups.

use logicians_core::{Position, Round};

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// One logician alone on the line
    Lone,

    /// Two logicians at both ends of a three-slot line
    FarApart,

    /// Two logicians side by side at the left edge
    AdjacentPair,

    /// Two logicians pinned to both ends of a longer line
    EdgePair,

    /// Two logicians inside a longer line
    InnerPair,

    /// Three logicians evenly spaced
    Trio,

    /// Three logicians, two of them bunched together
    Crowd,

    /// Every slot taken
    FullLine,
}

/// Concrete input for a scenario (0-based positions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSetup {
    pub num_logicians: usize,
    pub num_positions: usize,
    pub arrangement: Vec<Position>,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::Lone,
            ScenarioId::FarApart,
            ScenarioId::AdjacentPair,
            ScenarioId::EdgePair,
            ScenarioId::InnerPair,
            ScenarioId::Trio,
            ScenarioId::Crowd,
            ScenarioId::FullLine,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Lone => "lone",
            ScenarioId::FarApart => "far_apart",
            ScenarioId::AdjacentPair => "adjacent_pair",
            ScenarioId::EdgePair => "edge_pair",
            ScenarioId::InnerPair => "inner_pair",
            ScenarioId::Trio => "trio",
            ScenarioId::Crowd => "crowd",
            ScenarioId::FullLine => "full_line",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::Lone => "1 logician on 5 positions: nothing to rule out",
            ScenarioId::FarApart => "2 logicians at both ends of 3 positions",
            ScenarioId::AdjacentPair => "2 logicians at positions 1-2 of 4",
            ScenarioId::EdgePair => "2 logicians at positions 1 and 5 of 5",
            ScenarioId::InnerPair => "2 logicians at positions 2 and 4 of 5",
            ScenarioId::Trio => "3 logicians at positions 1, 3, 5 of 5",
            ScenarioId::Crowd => "3 logicians at positions 1, 2, 5 of 6",
            ScenarioId::FullLine => "4 logicians filling 4 positions",
        }
    }

    /// Returns the puzzle input.
    pub fn setup(&self) -> ScenarioSetup {
        let (num_logicians, num_positions, arrangement) = match self {
            ScenarioId::Lone => (1, 5, vec![2]),
            ScenarioId::FarApart => (2, 3, vec![0, 2]),
            ScenarioId::AdjacentPair => (2, 4, vec![0, 1]),
            ScenarioId::EdgePair => (2, 5, vec![0, 4]),
            ScenarioId::InnerPair => (2, 5, vec![1, 3]),
            ScenarioId::Trio => (3, 5, vec![0, 2, 4]),
            ScenarioId::Crowd => (3, 6, vec![0, 1, 4]),
            ScenarioId::FullLine => (4, 4, vec![2, 0, 3, 1]),
        };
        ScenarioSetup {
            num_logicians,
            num_positions,
            arrangement,
        }
    }

    /// Known first-yes rounds, where they have been worked out by hand.
    pub fn expected(&self) -> Option<Vec<Option<Round>>> {
        match self {
            ScenarioId::Lone => Some(vec![Some(0)]),
            ScenarioId::FarApart => Some(vec![Some(0), Some(0)]),
            ScenarioId::AdjacentPair => Some(vec![None, Some(0)]),
            ScenarioId::EdgePair => Some(vec![Some(0), Some(0)]),
            ScenarioId::FullLine => Some(vec![Some(0); 4]),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lone" => Ok(ScenarioId::Lone),
            "far_apart" | "farapart" => Ok(ScenarioId::FarApart),
            "adjacent_pair" | "adjacentpair" => Ok(ScenarioId::AdjacentPair),
            "edge_pair" | "edgepair" => Ok(ScenarioId::EdgePair),
            "inner_pair" | "innerpair" => Ok(ScenarioId::InnerPair),
            "trio" => Ok(ScenarioId::Trio),
            "crowd" => Ok(ScenarioId::Crowd),
            "full_line" | "fullline" => Ok(ScenarioId::FullLine),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}
