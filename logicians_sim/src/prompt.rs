//! Interactive question-and-answer mode.

use crate::arrangement::{answer_line, position_from_user};
use crate::error::FrontendError;
use logicians_core::{Round, Simulation, SolverConfig, World};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use tracing::debug;

/// Whitespace-separated tokens pulled line by line from a reader.
struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn next_number(&mut self, what: &'static str) -> Result<u64, FrontendError> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(FrontendError::MissingInput(what));
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        let token = self.pending.pop_front().unwrap_or_default();
        token
            .parse()
            .map_err(|_| FrontendError::InvalidNumber { what, token })
    }
}

fn ask<W: Write>(output: &mut W, question: &str) -> Result<(), FrontendError> {
    write!(output, "{}", question)?;
    output.flush()?;
    Ok(())
}

/// Asks for the puzzle on `output`, reads the answers from `input`, solves
/// it, and prints the first-yes rounds.
pub fn run_interactive<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    config: SolverConfig,
) -> Result<Vec<Option<Round>>, FrontendError> {
    let mut tokens = Tokens::new(input);

    ask(output, "Number of logicians: ")?;
    let num_logicians = tokens.next_number("number of logicians")? as usize;

    ask(output, "Number of positions: ")?;
    let num_positions = tokens.next_number("number of positions")? as usize;
    config.admit(num_logicians, num_positions)?;

    ask(output, "Position of each logician: ")?;
    let mut arrangement: World = Vec::with_capacity(num_logicians);
    for logician in 0..num_logicians {
        let value = tokens.next_number("logician position")?;
        arrangement.push(position_from_user(logician, value)?);
    }
    debug!("Read arrangement {:?}", arrangement);

    let outcome = Simulation::new(config, num_logicians, num_positions, &arrangement)?.run()?;

    writeln!(output, "{}", answer_line(&outcome.first_yes))?;
    Ok(outcome.first_yes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logicians_core::SolveError;

    fn session(input: &str) -> (Result<Vec<Option<Round>>, FrontendError>, String) {
        let mut output = Vec::new();
        let result = run_interactive(input.as_bytes(), &mut output, SolverConfig::default());
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_interactive_session() {
        let (result, output) = session("2\n4\n1 2\n");
        assert_eq!(result.unwrap(), vec![None, Some(0)]);
        assert_eq!(
            output,
            "Number of logicians: Number of positions: Position of each logician: \
             First yes said in round: N 1\n"
        );
    }

    #[test]
    fn test_interactive_accepts_single_line() {
        let (result, output) = session("2 3 1 3");
        assert_eq!(result.unwrap(), vec![Some(0), Some(0)]);
        assert!(output.ends_with("First yes said in round: 1 1\n"));
    }

    #[test]
    fn test_interactive_truncated_input() {
        let (result, _) = session("3\n5\n1 2\n");
        assert!(matches!(result, Err(FrontendError::MissingInput(_))));
    }

    #[test]
    fn test_interactive_rejects_oversized_count() {
        // a count near u64::MAX is refused before any positions are read
        let (result, output) = session("18446744073709551615\n5\n1\n");
        assert!(matches!(
            result,
            Err(FrontendError::Solve(SolveError::TooManyLogicians { .. }))
        ));
        assert!(!output.contains("Position of each logician"));
    }

    #[test]
    fn test_interactive_rejects_line_over_limit() {
        let (result, _) = session("1\n21\n1\n");
        assert!(matches!(
            result,
            Err(FrontendError::Solve(SolveError::TooManyPositions { .. }))
        ));
    }

    #[test]
    fn test_interactive_rejects_duplicates() {
        let (result, _) = session("2\n3\n2 2\n");
        assert!(matches!(result, Err(FrontendError::Solve(_))));
    }
}
