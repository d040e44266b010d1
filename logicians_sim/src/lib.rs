//! Logicians simulator front end
//!
//! Drives the deduction engine from the command line:
//! - **Interactive**: asks for the puzzle on stdin, prints the first-yes rounds
//! - **Direct / random**: arrangement from flags or from a seed
//! - **Scenarios**: named set-ups checked against the solver invariants
//! - **Sweep**: every arrangement of a given size
//!
//! Users count positions and rounds from 1; [`arrangement`] converts at the
//! boundary.

pub mod arrangement;
mod error;
mod exporter;
pub mod prompt;
mod runner;
pub mod scenarios;

pub use error::FrontendError;
pub use exporter::{RoundFrame, SolveExport};
pub use runner::{
    CheckedRun, ScenarioEntry, ScenarioResult, ScenarioRunner, ScenarioSummary, SweepReport,
};
