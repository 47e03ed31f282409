//! Random puzzle creation.
//!
//! Puzzles are drawn at random and kept only if the solver finds a solution
//! that is long enough and uses the required operators. The defaults mirror
//! the ranges seen in published NYT puzzles.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::digits::{DigitsPuzzle, Rules};
use crate::error::{Error, Result};
use crate::ops::{Move, Op};
use crate::solver::{solve, SolveLimit};

/// Criteria a generated puzzle must meet.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Minimum number of moves in the solution found.
    pub min_steps: usize,
    /// Require the puzzle to be solvable in chain mode.
    pub chain_mode: bool,
    /// Candidate targets, one picked per attempt.
    pub targets: Vec<u64>,
    /// Population the starting numbers are sampled from, without replacement.
    pub sources: Vec<u64>,
    /// How many starting numbers the puzzle gets.
    pub puzzle_size: usize,
    /// Operators that must appear in the solution found.
    ///
    /// Other solutions may avoid them; only the one found is checked.
    pub required_ops: Vec<Op>,
    /// Give up after this many attempts; `None` keeps trying.
    pub attempt_limit: Option<usize>,
    pub rules: Rules,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_steps: 3,
            chain_mode: true,
            targets: (50..450).collect(),
            sources: (1..=25).collect(),
            puzzle_size: 6,
            required_ops: Vec::new(),
            attempt_limit: None,
            rules: Rules::default(),
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(Error::EmptyTargets);
        }
        if self.puzzle_size < 2 {
            return Err(Error::PuzzleSizeTooSmall(self.puzzle_size));
        }
        if self.puzzle_size > self.sources.len() {
            return Err(Error::PuzzleSizeTooLarge {
                size: self.puzzle_size,
                available: self.sources.len(),
            });
        }
        Ok(())
    }

    fn accepts(&self, solution: &[Move]) -> bool {
        solution.len() >= self.min_steps
            && self
                .required_ops
                .iter()
                .all(|op| solution.iter().any(|mv| mv.op == *op))
    }
}

/// A puzzle that met the generator's criteria.
#[derive(Debug, Clone)]
pub struct Generated {
    pub puzzle: DigitsPuzzle,
    /// The shortest solution the solver found.
    pub solution: Vec<Move>,
    /// Attempts made, including the successful one.
    pub attempts: usize,
}

/// Generates a puzzle meeting `config`.
///
/// Returns `Ok(None)` when the attempt limit runs out first.
pub fn generate<R>(config: &GeneratorConfig, rng: &mut R) -> Result<Option<Generated>>
where
    R: Rng + ?Sized,
{
    config.validate()?;

    let mut attempts = 0;
    while config.attempt_limit.map_or(true, |limit| attempts < limit) {
        attempts += 1;

        let target = *config.targets.choose(rng).ok_or(Error::EmptyTargets)?;
        let sources: Vec<u64> = config
            .sources
            .choose_multiple(rng, config.puzzle_size)
            .copied()
            .collect();

        let puzzle = DigitsPuzzle::new(target, &sources)?
            .with_chain_mode(config.chain_mode)
            .with_rules(config.rules);

        let search = solve(&puzzle, SolveLimit::First)?;
        if let Some(solution) = search.solutions.into_iter().next() {
            if config.accepts(&solution) {
                debug!("generated puzzle after {attempts} attempt(s)");
                return Ok(Some(Generated {
                    puzzle,
                    solution,
                    attempts,
                }));
            }
        }
    }

    debug!("gave up after {attempts} attempt(s)");
    Ok(None)
}
