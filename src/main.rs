//! Digits Puzzle Solver
//!
//! Finds the shortest sequence of `+ - * /` moves that turns a set of
//! starting numbers into a target, as in the NYT Digits game. Can also
//! create random puzzles with a guaranteed solution.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use digits::format::{format_search, format_solution};
use digits::generator::{generate, GeneratorConfig};
use digits::{solve, DigitsPuzzle, Error, Op, Rules, SolveLimit};

/// Solves and creates NYT Digits puzzles.
#[derive(Parser)]
#[command(name = "digits")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the shortest way to reach TARGET from VALUES.
    Solve {
        /// Each move after the first must use the previous result.
        #[arg(short, long)]
        chain: bool,
        /// Print every shortest solution instead of the first.
        #[arg(short, long)]
        all: bool,
        /// Allow multiplying and dividing by 1.
        #[arg(long)]
        allow_unit: bool,
        /// Allow subtractions that produce 0.
        #[arg(long)]
        allow_zero: bool,
        target: u64,
        #[arg(required = true)]
        values: Vec<u64>,
    },
    /// Create a random puzzle that has a solution.
    Create {
        /// Minimum number of moves in the solution.
        #[arg(short, long, default_value_t = 3)]
        steps: usize,
        /// Operator the solution must use (+ - * /); repeatable.
        #[arg(short = 'r', long = "require")]
        require: Vec<Op>,
        /// Do not require the puzzle to be solvable in chain mode.
        #[arg(long)]
        free: bool,
        /// Number of starting values.
        #[arg(long, default_value_t = 6)]
        size: usize,
        /// Give up after this many attempts.
        #[arg(long)]
        attempts: Option<usize>,
        /// Seed for reproducible puzzles.
        #[arg(long)]
        seed: Option<u64>,
        /// Candidate targets (default: 50 to 449).
        targets: Vec<u64>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Solve {
            chain,
            all,
            allow_unit,
            allow_zero,
            target,
            values,
        } => {
            let rules = Rules {
                unit_operands: allow_unit,
                zero_results: allow_zero,
            };
            run_solve(target, &values, chain, all, rules).map(|output| print!("{output}"))
        }
        Command::Create {
            steps,
            require,
            free,
            size,
            attempts,
            seed,
            targets,
        } => {
            let mut config = GeneratorConfig {
                min_steps: steps,
                chain_mode: !free,
                puzzle_size: size,
                required_ops: require,
                attempt_limit: attempts,
                ..GeneratorConfig::default()
            };
            if !targets.is_empty() {
                config.targets = targets;
            }
            run_create(&config, seed).map(|output| print!("{output}"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Solves one puzzle and renders the moves and statistics.
///
/// An unsolvable puzzle is reported in the output, not as an error.
fn run_solve(
    target: u64,
    values: &[u64],
    chain: bool,
    all: bool,
    rules: Rules,
) -> Result<String, Error> {
    let puzzle = DigitsPuzzle::new(target, values)?
        .with_chain_mode(chain)
        .with_rules(rules);
    let limit = if all {
        SolveLimit::All
    } else {
        SolveLimit::First
    };
    let search = solve(&puzzle, limit)?;
    Ok(format_search(&search))
}

/// Creates a puzzle and renders it with the solution that was found.
fn run_create(config: &GeneratorConfig, seed: Option<u64>) -> Result<String, Error> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    match generate(config, &mut rng)? {
        Some(generated) => {
            let puzzle = &generated.puzzle;
            let values: Vec<String> = puzzle.values().iter().map(u64::to_string).collect();
            Ok(format!(
                "{} {}\n{}",
                puzzle.target(),
                values.join(" "),
                format_solution(&generated.solution)
            ))
        }
        None => Ok("No puzzle found within the attempt limit\n".to_string()),
    }
}
