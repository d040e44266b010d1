//! Scenario runner - solves arrangements and checks the solver's invariants.

use crate::arrangement::{format_positions, format_rounds, FirstYes};
use crate::scenarios::ScenarioId;

use logicians_core::{
    Outcome, Position, Round, Simulation, SolveError, SolverConfig, WorldIndexer, WorldTable,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Results from running a scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Scenario that was run
    pub scenario: ScenarioId,

    /// Whether every check passed
    pub passed: bool,

    /// First-yes rounds (0-based), empty if the solver failed
    pub first_yes: Vec<Option<Round>>,

    /// Rounds performed until the fixed point
    pub rounds_performed: usize,

    /// Size of the world table
    pub total_worlds: usize,

    /// Worlds still live at the end
    pub live_worlds: usize,

    /// Wall-clock time spent solving
    pub elapsed_ms: u128,

    /// Failure message if any
    pub failure_reason: Option<String>,
}

/// One scenario line of [`ScenarioSummary`], rounds written 1-based.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioEntry {
    pub scenario: &'static str,
    pub passed: bool,
    pub first_yes: String,
    pub rounds: usize,
    pub worlds: usize,
    pub live_worlds: usize,
    pub elapsed_ms: u64,
    pub failure_reason: Option<String>,
}

impl From<&ScenarioResult> for ScenarioEntry {
    fn from(result: &ScenarioResult) -> Self {
        Self {
            scenario: result.scenario.name(),
            passed: result.passed,
            first_yes: format_rounds(&result.first_yes),
            rounds: result.rounds_performed,
            worlds: result.total_worlds,
            live_worlds: result.live_worlds,
            elapsed_ms: u64::try_from(result.elapsed_ms).unwrap_or(u64::MAX),
            failure_reason: result.failure_reason.clone(),
        }
    }
}

/// Pass/fail totals over a batch of scenario runs.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<ScenarioEntry>,
}

impl ScenarioSummary {
    pub fn new(results: &[ScenarioResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            results: results.iter().map(ScenarioEntry::from).collect(),
        }
    }

    /// True if every scenario passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A solved arrangement plus any invariant it broke.
#[derive(Debug, Clone)]
pub struct CheckedRun {
    pub outcome: Outcome,
    pub violations: Vec<String>,
}

impl CheckedRun {
    /// True if no invariant was broken.
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Aggregate over every arrangement of a given size.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    pub num_logicians: usize,
    pub num_positions: usize,

    /// Arrangements solved
    pub arrangements: usize,

    /// How many logicians first said yes in each round, never last
    pub histogram: BTreeMap<FirstYes, usize>,

    /// Latest first-yes round seen (0-based)
    pub latest_round: Option<Round>,

    /// Largest number of rounds any arrangement needed
    pub most_rounds: usize,

    /// One line per broken invariant
    pub failures: Vec<String>,
}

impl SweepReport {
    /// True if no arrangement broke an invariant.
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// One printable line per histogram bucket, in round order.
    pub fn histogram_lines(&self) -> Vec<String> {
        self.histogram
            .iter()
            .map(|(round, count)| format!("round {:>3}: {}", round, count))
            .collect()
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Solves arrangements and checks them.
pub struct ScenarioRunner {
    config: SolverConfig,
}

impl ScenarioRunner {
    /// Creates a runner with the given solver limits.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solves `arrangement` and checks it against the solver invariants:
    /// the real world survives, the run settles within the world count,
    /// and mirroring or relabelling the arrangement moves the result along.
    pub fn check(
        &self,
        num_logicians: usize,
        num_positions: usize,
        arrangement: &[Position],
    ) -> Result<CheckedRun, SolveError> {
        let mut sim = Simulation::new(
            self.config.clone(),
            num_logicians,
            num_positions,
            arrangement,
        )?;
        while !sim.is_settled() {
            sim.step()?;
        }
        let mut violations = Vec::new();
        if sim.table().get(arrangement).is_some() {
            violations.push("real arrangement was ruled out".to_string());
        }
        let outcome = sim.run()?;

        if outcome.rounds_performed() > outcome.total_worlds + 1 {
            violations.push(format!(
                "took {} rounds for {} worlds",
                outcome.rounds_performed(),
                outcome.total_worlds
            ));
        }

        let last = (num_positions - 1) as Position;
        let mirrored: Vec<Position> = arrangement.iter().map(|&p| last - p).collect();
        let mirrored_yes = self.solve(num_logicians, num_positions, &mirrored)?;
        if mirrored_yes != outcome.first_yes {
            violations.push(format!(
                "mirror image gave {:?}, expected {:?}",
                mirrored_yes, outcome.first_yes
            ));
        }

        let reversed: Vec<Position> = arrangement.iter().rev().copied().collect();
        let mut reversed_yes = self.solve(num_logicians, num_positions, &reversed)?;
        reversed_yes.reverse();
        if reversed_yes != outcome.first_yes {
            violations.push(format!(
                "relabelled logicians gave {:?}, expected {:?}",
                reversed_yes, outcome.first_yes
            ));
        }

        Ok(CheckedRun {
            outcome,
            violations,
        })
    }

    fn solve(
        &self,
        num_logicians: usize,
        num_positions: usize,
        arrangement: &[Position],
    ) -> Result<Vec<Option<Round>>, SolveError> {
        let outcome = Simulation::new(
            self.config.clone(),
            num_logicians,
            num_positions,
            arrangement,
        )?
        .run()?;
        Ok(outcome.first_yes)
    }

    /// Runs a scenario and returns the result.
    pub fn run(&self, scenario: ScenarioId) -> ScenarioResult {
        info!("Starting scenario: {} ({})", scenario.name(), scenario.description());
        let setup = scenario.setup();
        let started = Instant::now();

        let checked = self.check(setup.num_logicians, setup.num_positions, &setup.arrangement);
        let elapsed_ms = started.elapsed().as_millis();

        let checked = match checked {
            Ok(checked) => checked,
            Err(e) => {
                warn!("Scenario {} could not be solved: {}", scenario, e);
                return ScenarioResult {
                    scenario,
                    passed: false,
                    first_yes: Vec::new(),
                    rounds_performed: 0,
                    total_worlds: 0,
                    live_worlds: 0,
                    elapsed_ms,
                    failure_reason: Some(e.to_string()),
                };
            }
        };

        let mut failures = checked.violations.clone();
        if let Some(expected) = scenario.expected() {
            if expected != checked.outcome.first_yes {
                failures.push(format!(
                    "expected {:?}, got {:?}",
                    expected, checked.outcome.first_yes
                ));
            }
        }

        ScenarioResult {
            scenario,
            passed: failures.is_empty(),
            rounds_performed: checked.outcome.rounds_performed(),
            total_worlds: checked.outcome.total_worlds,
            live_worlds: checked.outcome.live_worlds(),
            first_yes: checked.outcome.first_yes,
            elapsed_ms,
            failure_reason: if failures.is_empty() {
                None
            } else {
                Some(failures.join("; "))
            },
        }
    }

    /// Solves every arrangement of `num_logicians` on `num_positions`.
    pub fn sweep(
        &self,
        num_logicians: usize,
        num_positions: usize,
    ) -> Result<SweepReport, SolveError> {
        self.config.admit(num_logicians, num_positions)?;
        let indexer = WorldIndexer::new(num_logicians, num_positions)
            .ok_or_else(|| SolveError::world_overflow(self.config.max_worlds))?;
        let arrangements = WorldTable::new(indexer);
        info!(
            "Sweeping {} arrangements of {} logicians on {} positions",
            arrangements.len(),
            num_logicians,
            num_positions
        );

        let mut report = SweepReport {
            num_logicians,
            num_positions,
            ..Default::default()
        };

        for index in 0..arrangements.len() {
            let arrangement = arrangements.world(index);
            let checked = self.check(num_logicians, num_positions, arrangement)?;
            report.arrangements += 1;
            report.most_rounds = report.most_rounds.max(checked.outcome.rounds_performed());

            for &round in &checked.outcome.first_yes {
                *report.histogram.entry(FirstYes(round)).or_default() += 1;
                if round > report.latest_round {
                    report.latest_round = round;
                }
            }
            for violation in checked.violations {
                let line = format!("[{}] {}", format_positions(arrangement), violation);
                warn!("{}", line);
                report.failures.push(line);
            }
            if index % 1000 == 0 {
                debug!("  swept {}/{}", index + 1, arrangements.len());
            }
        }

        Ok(report)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}
