//! Digits Puzzle Solver Library
//!
//! Breadth-first search over puzzle state spaces, plus the NYT "Digits"
//! puzzle: combine starting numbers with `+ - * /` until the target appears.
//!
//! Any type implementing [`Puzzle`] can be handed to [`solver::solve`]; the
//! crate ships [`DigitsPuzzle`] and [`hanoi::TowerOfHanoi`].

use std::hash::Hash;

pub mod digits;
pub mod error;
pub mod format;
pub mod generator;
pub mod hanoi;
pub mod ops;
pub mod solver;

pub use digits::{DigitsKey, DigitsPuzzle, ForcedOperand, Rules};
pub use error::Error;
pub use ops::{Move, Op};
pub use solver::{solve, Search, SolveLimit, Statistics};

/// Capabilities the breadth-first solver needs from a puzzle.
///
/// Implementations behave as immutable values: the solver never changes a
/// state in place, it only derives new states with [`copy_and_move`].
///
/// [`copy_and_move`]: Puzzle::copy_and_move
pub trait Puzzle: Sized {
    /// An opaque move, passed back into [`Puzzle::copy_and_move`].
    type Move: Clone + Eq + Hash;
    /// Deduplication key; equal keys mean equivalent states.
    type Key: Eq + Hash;
    /// Raised when a move is applied that is not legal in this state.
    type Error;

    /// Moves available from this state, in a deterministic order.
    ///
    /// Redundant symmetric moves should be left out, but the solver does not
    /// rely on it: states are deduplicated by [`Puzzle::canonical_state`].
    fn legal_moves(&self) -> impl Iterator<Item = Self::Move> + '_;

    /// Returns the state reached by applying `mv`, leaving `self` untouched.
    fn copy_and_move(&self, mv: &Self::Move) -> Result<Self, Self::Error>;

    /// Key that is equal for any two states that play identically.
    ///
    /// States that differ from a gameplay point of view must map to
    /// different keys.
    fn canonical_state(&self) -> Self::Key;

    /// Whether this state satisfies the puzzle's solved condition.
    fn is_end_state(&self) -> bool;
}
