//! Logicians simulator CLI
//!
//! Solve a single arrangement, run the named scenarios, or sweep every
//! arrangement of a given size.

use clap::Parser;
use logicians_core::{Round, Simulation, SolverConfig, World};
use logicians_sim::arrangement::{
    answer_line, format_positions, format_rounds, parse_arrangement, random_arrangement,
};
use logicians_sim::prompt::run_interactive;
use logicians_sim::scenarios::ScenarioId;
use logicians_sim::{FrontendError, ScenarioResult, ScenarioRunner, ScenarioSummary, SolveExport};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Logicians line-up puzzle solver
#[derive(Parser, Debug)]
#[command(name = "logicians-sim")]
#[command(
    about = "Compute the round each logician first deduces their position",
    long_about = None
)]
struct Args {
    /// Number of logicians
    #[arg(short = 'n', long)]
    logicians: Option<usize>,

    /// Number of positions on the line
    #[arg(short = 'm', long)]
    positions: Option<usize>,

    /// Positions of the logicians, 1-based (e.g. "1,3,5")
    #[arg(short, long)]
    arrangement: Option<String>,

    /// Draw a random arrangement from this seed (0 = random from time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Scenario to run: lone, far_apart, adjacent_pair, edge_pair,
    /// inner_pair, trio, crowd, full_line, or all
    #[arg(short = 'S', long)]
    scenario: Option<String>,

    /// Solve every arrangement of the given size
    #[arg(long)]
    sweep: bool,

    /// Largest line the solver accepts
    #[arg(long, default_value = "20")]
    max_positions: usize,

    /// Largest world table the solver builds
    #[arg(long, default_value = "20000000")]
    max_worlds: usize,

    /// Give up after this many rounds
    #[arg(long)]
    max_rounds: Option<Round>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for scripting
    #[arg(long)]
    json: bool,

    /// Export the round-by-round trace to a JSON file
    #[arg(long)]
    export: Option<String>,
}

impl Args {
    fn solver_config(&self) -> SolverConfig {
        let config = SolverConfig::default()
            .with_max_positions(self.max_positions)
            .with_max_worlds(self.max_worlds);
        match self.max_rounds {
            Some(rounds) => config.with_max_rounds(rounds),
            None => config,
        }
    }

    fn size(&self) -> Result<(usize, usize), FrontendError> {
        match (self.logicians, self.positions) {
            (Some(logicians), Some(positions)) => Ok((logicians, positions)),
            _ => Err(FrontendError::usage(
                "--logicians and --positions must be given together",
            )),
        }
    }
}

fn main() {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for results
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Dispatches on the mode; returns false if any check failed.
fn run(args: &Args) -> Result<bool, FrontendError> {
    let config = args.solver_config();

    if let Some(scenario) = &args.scenario {
        return run_scenarios(args, config, scenario);
    }

    if args.sweep {
        let (logicians, positions) = args.size()?;
        return run_sweep(args, config, logicians, positions);
    }

    if args.logicians.is_some() || args.positions.is_some() {
        let (logicians, positions) = args.size()?;
        let arrangement = match (&args.arrangement, args.seed) {
            (Some(text), None) => parse_arrangement(text)?,
            (None, Some(seed)) => {
                let seed = if seed == 0 { clock_seed() } else { seed };
                let arrangement = random_arrangement(seed, logicians, positions)?;
                info!("Seed {} drew arrangement {}", seed, format_positions(&arrangement));
                arrangement
            }
            _ => {
                return Err(FrontendError::usage(
                    "give exactly one of --arrangement or --seed",
                ))
            }
        };
        run_direct(args, config, logicians, positions, &arrangement)?;
        return Ok(true);
    }

    if args.export.is_some() {
        return Err(FrontendError::usage(
            "--export needs --logicians, --positions and an arrangement",
        ));
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_interactive(stdin.lock(), &mut stdout, config)?;
    Ok(true)
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn run_direct(
    args: &Args,
    config: SolverConfig,
    logicians: usize,
    positions: usize,
    arrangement: &World,
) -> Result<(), FrontendError> {
    let outcome = Simulation::new(config, logicians, positions, arrangement)?.run()?;
    let export = SolveExport::new(positions, arrangement, &outcome);

    if let Some(path) = &args.export {
        export.write_to_file(path)?;
        info!("Exported {} rounds to {}", export.frames.len(), path);
    }

    if args.json {
        println!("{}", export.to_json()?);
    } else {
        println!("{}", answer_line(&outcome.first_yes));
    }
    Ok(())
}

fn run_scenarios(args: &Args, config: SolverConfig, name: &str) -> Result<bool, FrontendError> {
    let scenarios: Vec<ScenarioId> = if name == "all" {
        ScenarioId::all()
    } else {
        vec![name.parse().map_err(FrontendError::Usage)?]
    };

    let runner = ScenarioRunner::new(config);
    let results: Vec<ScenarioResult> = scenarios.iter().map(|&s| runner.run(s)).collect();
    let summary = ScenarioSummary::new(&results);

    if args.json {
        println!("{}", summary.to_json()?);
    } else {
        for result in &results {
            if result.passed {
                info!(
                    "✓ {} first yes: {} ({} rounds, {} worlds)",
                    result.scenario,
                    format_rounds(&result.first_yes),
                    result.rounds_performed,
                    result.total_worlds
                );
            } else {
                error!(
                    "✗ {} FAILED: {}",
                    result.scenario,
                    result.failure_reason.as_deref().unwrap_or("unknown")
                );
            }
        }
        if summary.all_passed() {
            info!("All {} scenarios passed", summary.total);
        } else {
            error!("{}/{} scenarios failed", summary.failed, summary.total);
        }
    }

    Ok(summary.all_passed())
}

fn run_sweep(
    args: &Args,
    config: SolverConfig,
    logicians: usize,
    positions: usize,
) -> Result<bool, FrontendError> {
    let report = ScenarioRunner::new(config).sweep(logicians, positions)?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        info!(
            "Swept {} arrangements, longest run {} rounds",
            report.arrangements, report.most_rounds
        );
        for line in report.histogram_lines() {
            println!("{}", line);
        }
        if report.passed() {
            info!("All invariants held");
        } else {
            error!("{} invariant violations", report.failures.len());
        }
    }

    Ok(report.passed())
}
