//! Error type shared by the puzzles and the puzzle generator.

use thiserror::Error;

use crate::ops::Move;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building puzzles or applying moves.
///
/// An unsolvable puzzle is not an error; the solver reports it as an empty
/// solution set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A digits puzzle needs at least two starting numbers.
    #[error("a puzzle needs at least two starting numbers, got {0}")]
    TooFewSources(usize),

    /// Starting numbers must be positive.
    #[error("illegal (non-positive) source value ({0})")]
    NonPositiveSource(u64),

    /// The target must be positive.
    #[error("illegal (non-positive) target value ({0})")]
    NonPositiveTarget(u64),

    /// The move is not legal in the puzzle's current state.
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    /// A Tower of Hanoi disc cannot go from `from` to `to`.
    #[error("illegal disc move {from}->{to}")]
    IllegalDiscMove { from: usize, to: usize },

    /// The generator has no targets to choose from.
    #[error("generator needs at least one candidate target")]
    EmptyTargets,

    /// The generator was asked for a puzzle with fewer than two numbers.
    #[error("puzzle size must be at least 2, got {0}")]
    PuzzleSizeTooSmall(usize),

    /// The generator cannot sample more distinct sources than it has.
    #[error("puzzle size {size} exceeds the {available} candidate sources")]
    PuzzleSizeTooLarge { size: usize, available: usize },
}
