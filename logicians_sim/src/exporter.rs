//! JSON exporter for solver traces.
//!
//! Positions, logicians and rounds are written 1-based, the way users enter
//! and read them.

use crate::arrangement::format_round;
use logicians_core::{Outcome, Position, RoundReport};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// A single round of the trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundFrame {
    /// Round number (1-based)
    pub round: u64,

    /// Logicians who said yes for the first time (1-based)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub announced: Vec<usize>,

    /// Worlds ruled out this round
    pub ruled_out: usize,

    /// Worlds still live after the round
    pub live_worlds: usize,
}

impl From<&RoundReport> for RoundFrame {
    fn from(report: &RoundReport) -> Self {
        Self {
            round: u64::from(report.round) + 1,
            announced: report.announced.iter().map(|l| l + 1).collect(),
            ruled_out: report.ruled_out,
            live_worlds: report.live_worlds,
        }
    }
}

/// Complete solver export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveExport {
    /// Number of logicians
    pub logicians: usize,

    /// Number of positions on the line
    pub positions: usize,

    /// Real arrangement (1-based)
    pub arrangement: Vec<u32>,

    /// Size of the world table
    pub total_worlds: usize,

    /// All rounds
    pub frames: Vec<RoundFrame>,

    /// First-yes round per logician, 1-based or "N"
    pub first_yes: Vec<String>,
}

impl SolveExport {
    /// Builds an export from a finished run.
    pub fn new(positions: usize, arrangement: &[Position], outcome: &Outcome) -> Self {
        Self {
            logicians: arrangement.len(),
            positions,
            arrangement: arrangement.iter().map(|&p| u32::from(p) + 1).collect(),
            total_worlds: outcome.total_worlds,
            frames: outcome.rounds.iter().map(RoundFrame::from).collect(),
            first_yes: outcome.first_yes.iter().map(|&r| format_round(r)).collect(),
        }
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
