//! Tower of Hanoi, a second [`Puzzle`] implementation.
//!
//! Pegs are ordered and their contents matter, so the canonical state is
//! simply the peg contents.

use crate::error::{Error, Result};
use crate::Puzzle;

/// Moves the top disc of peg `.0` onto peg `.1`.
pub type DiscMove = (usize, usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerOfHanoi {
    discs: usize,
    /// Disc sizes on each peg, bottom first.
    pegs: Vec<Vec<u8>>,
}

impl TowerOfHanoi {
    /// All `discs` start on the first peg; the goal is the last peg.
    pub fn new(discs: u8, pegs: usize) -> Self {
        assert!(pegs >= 2, "Tower of Hanoi needs at least two pegs");
        let mut all_pegs = vec![Vec::new(); pegs];
        all_pegs[0] = (1..=discs).rev().collect();
        Self {
            discs: usize::from(discs),
            pegs: all_pegs,
        }
    }

    pub fn pegs(&self) -> &[Vec<u8>] {
        &self.pegs
    }

    fn can_move(&self, (from, to): DiscMove) -> bool {
        if from == to {
            return false;
        }
        match (
            self.pegs.get(from).and_then(|peg| peg.last()),
            self.pegs.get(to),
        ) {
            (Some(disc), Some(destination)) => destination.last().map_or(true, |top| disc < top),
            _ => false,
        }
    }
}

impl Puzzle for TowerOfHanoi {
    type Move = DiscMove;
    type Key = Vec<Vec<u8>>;
    type Error = Error;

    fn legal_moves(&self) -> impl Iterator<Item = DiscMove> + '_ {
        let count = self.pegs.len();
        (0..count)
            .flat_map(move |from| (0..count).map(move |to| (from, to)))
            .filter(move |&mv| self.can_move(mv))
    }

    fn copy_and_move(&self, &(from, to): &DiscMove) -> Result<Self> {
        if !self.can_move((from, to)) {
            return Err(Error::IllegalDiscMove { from, to });
        }
        let mut next = self.clone();
        if let Some(disc) = next.pegs[from].pop() {
            next.pegs[to].push(disc);
        }
        Ok(next)
    }

    fn canonical_state(&self) -> Vec<Vec<u8>> {
        self.pegs.clone()
    }

    fn is_end_state(&self) -> bool {
        self.pegs.last().is_some_and(|peg| peg.len() == self.discs)
    }
}
