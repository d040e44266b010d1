//! Round driver and fixed-point simulation.
//!
//! A [`Simulation`] owns the world table and the first-yes vector for one
//! concrete arrangement. Each round first settles what the real logicians
//! announce, then rules out every live world whose announcements would
//! differ. The run stops at the first round that rules out nothing.

use crate::config::SolverConfig;
use crate::deduction::says_yes;
use crate::error::SolveError;
use crate::table::WorldTable;
use crate::world::{validate_world, Position, World, WorldIndexer};
use crate::Round;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

/// What happened in a single round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Round number (0-based)
    pub round: Round,

    /// Logicians who said yes for the first time this round
    pub announced: Vec<usize>,

    /// Worlds ruled out this round
    pub ruled_out: usize,

    /// Worlds still live after the round
    pub live_worlds: usize,
}

impl RoundReport {
    /// True if the round ruled out at least one world.
    pub fn changed(&self) -> bool {
        self.ruled_out > 0
    }
}

/// Result of running a simulation to its fixed point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// First round each logician said yes, `None` if never
    pub first_yes: Vec<Option<Round>>,

    /// Every round performed, the last one being the round without change
    pub rounds: Vec<RoundReport>,

    /// Size of the world table
    pub total_worlds: usize,
}

impl Outcome {
    /// Number of rounds performed, including the final unchanged one.
    pub fn rounds_performed(&self) -> usize {
        self.rounds.len()
    }

    /// Worlds still live at the fixed point.
    pub fn live_worlds(&self) -> usize {
        self.rounds
            .last()
            .map_or(self.total_worlds, |report| report.live_worlds)
    }
}

/// One solver run over a fixed arrangement.
pub struct Simulation {
    config: SolverConfig,

    /// The real arrangement
    arrangement: World,

    table: WorldTable,

    first_yes: Vec<Option<Round>>,

    /// Round the next call to [`Simulation::step`] performs
    next_round: Round,

    reports: Vec<RoundReport>,
}

impl Simulation {
    /// Validates the input and builds the world table.
    pub fn new(
        config: SolverConfig,
        num_logicians: usize,
        num_positions: usize,
        arrangement: &[Position],
    ) -> Result<Self, SolveError> {
        let worlds = config.admit(num_logicians, num_positions)?;
        if arrangement.len() != num_logicians {
            return Err(SolveError::ArrangementLength {
                expected: num_logicians,
                actual: arrangement.len(),
            });
        }
        validate_world(num_positions, arrangement)?;

        let indexer = WorldIndexer::new(num_logicians, num_positions)
            .ok_or_else(|| SolveError::world_overflow(config.max_worlds))?;

        info!(
            "Solving {} logicians on {} positions ({} worlds)",
            num_logicians, num_positions, worlds
        );

        Ok(Self {
            config,
            arrangement: arrangement.to_vec(),
            table: WorldTable::new(indexer),
            first_yes: vec![None; num_logicians],
            next_round: 0,
            reports: Vec::new(),
        })
    }

    /// The world table in its current state.
    pub fn table(&self) -> &WorldTable {
        &self.table
    }

    /// First-yes rounds decided so far.
    pub fn first_yes(&self) -> &[Option<Round>] {
        &self.first_yes
    }

    /// The real arrangement being solved.
    pub fn arrangement(&self) -> &[Position] {
        &self.arrangement
    }

    /// Reports of the rounds performed so far.
    pub fn reports(&self) -> &[RoundReport] {
        &self.reports
    }

    /// Performs `round`: records the real announcements, then rules out every
    /// live world that would have announced differently.
    pub fn perform_round(&mut self, round: Round) -> RoundReport {
        let mut announced = Vec::new();
        for logician in 0..self.first_yes.len() {
            if self.first_yes[logician].is_none()
                && says_yes(&self.table, logician, &self.arrangement, round)
            {
                self.first_yes[logician] = Some(round);
                announced.push(logician);
            }
        }

        let mut ruled_out = 0;
        let mut world = Vec::with_capacity(self.arrangement.len());
        for index in 0..self.table.len() {
            if self.table.status(index).is_some() {
                continue;
            }
            world.clear();
            world.extend_from_slice(self.table.world(index));

            let inconsistent = self.first_yes.iter().enumerate().any(|(logician, &yes)| {
                match yes {
                    Some(decided) if decided < round => false,
                    _ => says_yes(&self.table, logician, &world, round) != (yes == Some(round)),
                }
            });
            if inconsistent && self.table.rule_out(index, round) {
                trace!("Round {}: ruled out {:?}", round, world);
                ruled_out += 1;
            }
        }

        let report = RoundReport {
            round,
            announced,
            ruled_out,
            live_worlds: self.table.live_count(),
        };
        debug!(
            "Round {}: announced={:?} ruled_out={} live={}",
            report.round, report.announced, report.ruled_out, report.live_worlds
        );
        report
    }

    /// Performs the next round and records its report.
    pub fn step(&mut self) -> Result<&RoundReport, SolveError> {
        if self.next_round >= self.config.max_rounds {
            warn!("Round limit {} reached", self.config.max_rounds);
            return Err(SolveError::RoundLimit(self.next_round));
        }
        let report = self.perform_round(self.next_round);
        self.next_round += 1;
        self.reports.push(report);
        Ok(&self.reports[self.reports.len() - 1])
    }

    /// True once a round has ruled out nothing.
    pub fn is_settled(&self) -> bool {
        self.reports.last().is_some_and(|report| !report.changed())
    }

    /// Drives rounds until one rules out no world.
    pub fn run(mut self) -> Result<Outcome, SolveError> {
        while !self.is_settled() {
            self.step()?;
        }

        info!(
            "Fixed point after {} rounds, {} of {} worlds live",
            self.reports.len(),
            self.table.live_count(),
            self.table.len()
        );

        Ok(Outcome {
            first_yes: self.first_yes,
            rounds: self.reports,
            total_worlds: self.table.len(),
        })
    }
}

/// Computes the first round each logician says yes for `arrangement`, using
/// the default limits.
pub fn simulate(
    num_logicians: usize,
    num_positions: usize,
    arrangement: &[Position],
) -> Result<Vec<Option<Round>>, SolveError> {
    let outcome = Simulation::new(
        SolverConfig::default(),
        num_logicians,
        num_positions,
        arrangement,
    )?
    .run()?;
    Ok(outcome.first_yes)
}
