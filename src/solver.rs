//! Breadth-first puzzle solver.
//!
//! Key properties:
//! - FIFO frontier, so the first solved state dequeued is at minimum depth
//! - FxHashSet of canonical keys, so each state is expanded at most once
//! - Parent-linked node arena instead of a move list per frontier entry
//! - In all-solutions mode the search drains the solved depth, then stops

use std::collections::VecDeque;
use std::fmt;

use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::Puzzle;

/// How many shortest solutions a search should collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveLimit {
    /// Stop at the first solution found.
    #[default]
    First,
    /// Collect every distinct solution at the shortest depth.
    All,
    /// Collect up to this many shortest solutions.
    AtMost(usize),
}

impl SolveLimit {
    fn max_solutions(self) -> usize {
        match self {
            SolveLimit::First => 1,
            SolveLimit::All => usize::MAX,
            SolveLimit::AtMost(n) => n,
        }
    }
}

/// Counters accumulated over one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Largest frontier size observed.
    pub maxq: usize,
    /// Number of states taken off the frontier.
    pub iterations: usize,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "maxq={} iterations={}", self.maxq, self.iterations)
    }
}

/// Outcome of a search: the solutions found plus run statistics.
///
/// An empty `solutions` means the state space was exhausted without reaching
/// a solved state. A single empty move list means the root was already solved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search<M> {
    /// Move sequences in application order, all of the same (minimal) length.
    pub solutions: Vec<Vec<M>>,
    pub stats: Statistics,
}

impl<M> Search<M> {
    /// The first solution found, if any.
    pub fn first(&self) -> Option<&[M]> {
        self.solutions.first().map(Vec::as_slice)
    }

    pub fn is_solved(&self) -> bool {
        !self.solutions.is_empty()
    }
}

/// A discovered state: how it was reached and at what depth.
struct Node<M> {
    parent: Option<usize>,
    applied: Option<M>,
    depth: usize,
}

/// Walks parent links back to the root, returning moves in application order.
fn reconstruct_path<M: Clone>(nodes: &[Node<M>], mut index: usize) -> Vec<M> {
    let mut path = Vec::with_capacity(nodes[index].depth);
    while let Some(node) = nodes.get(index) {
        if let Some(applied) = &node.applied {
            path.push(applied.clone());
        }
        match node.parent {
            Some(parent) => index = parent,
            None => break,
        }
    }
    path.reverse();
    path
}

/// Searches for the shortest move sequences that solve `root`.
///
/// Every returned sequence has the minimum possible length. Errors from
/// [`Puzzle::copy_and_move`] abort the search and are returned as-is.
pub fn solve<P>(root: &P, limit: SolveLimit) -> Result<Search<P::Move>, P::Error>
where
    P: Puzzle + Clone,
{
    let max_solutions = limit.max_solutions();
    let mut stats = Statistics::default();
    let mut solutions: Vec<Vec<P::Move>> = Vec::new();

    if max_solutions == 0 {
        return Ok(Search { solutions, stats });
    }

    debug!("starting breadth-first search ({limit:?})");

    let mut nodes: Vec<Node<P::Move>> = vec![Node {
        parent: None,
        applied: None,
        depth: 0,
    }];
    let mut visited: FxHashSet<P::Key> = FxHashSet::default();
    visited.insert(root.canonical_state());

    // solutions are only compared against each other, never against states
    let mut distinct_solutions: FxHashSet<Vec<P::Move>> = FxHashSet::default();

    let mut frontier: VecDeque<(P, usize)> = VecDeque::new();
    frontier.push_back((root.clone(), 0));
    stats.maxq = frontier.len();

    // depth of the first solution; nothing deeper is ever reported
    let mut solved_depth: Option<usize> = None;

    while let Some((state, index)) = frontier.pop_front() {
        let depth = nodes[index].depth;
        if solved_depth.is_some_and(|solved| depth > solved) {
            break;
        }
        stats.iterations += 1;

        if state.is_end_state() {
            solved_depth = Some(depth);
            let path = reconstruct_path(&nodes, index);
            if distinct_solutions.insert(path.clone()) {
                trace!("solution #{} at depth {depth}", solutions.len() + 1);
                solutions.push(path);
                if solutions.len() >= max_solutions {
                    break;
                }
            }
            continue;
        }

        // same depth as a known solution: successors would be too deep
        if solved_depth.is_some() {
            continue;
        }

        for mv in state.legal_moves() {
            let next = state.copy_and_move(&mv)?;
            let solved = next.is_end_state();

            // solved states skip deduplication so that every last move
            // reaching the target at this depth is reported
            if !visited.insert(next.canonical_state()) && !solved {
                continue;
            }

            nodes.push(Node {
                parent: Some(index),
                applied: Some(mv),
                depth: depth + 1,
            });
            frontier.push_back((next, nodes.len() - 1));
            stats.maxq = stats.maxq.max(frontier.len());
        }
    }

    debug!(
        "search finished: {} solution(s), {} states discovered, {stats}",
        solutions.len(),
        nodes.len()
    );

    Ok(Search { solutions, stats })
}
