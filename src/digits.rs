//! The NYT "Digits" puzzle.
//!
//! A state is a multiset of available numbers, kept sorted in descending
//! order. A move takes two of them, combines them with one operator, and puts
//! the result back. The puzzle is solved once the target is among the values.
//!
//! Chain mode is modelled by [`ForcedOperand`]: after the first move, the
//! previous result must be the left operand of the next move.

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::ops::{Move, Op};
use crate::Puzzle;

/// Inline capacity covers the six numbers of a regular puzzle.
type Values = SmallVec<[u64; 8]>;

/// Which operand, if any, the next move is required to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ForcedOperand {
    /// Any pair of available numbers may be combined.
    #[default]
    Free,
    /// Chain mode before the first move: no constraint yet.
    Chain,
    /// This value must be the left operand of the next move.
    ///
    /// When the value is not among the available numbers the constraint
    /// does not apply.
    Operand(u64),
}

/// Puzzle-level filters on otherwise valid arithmetic.
///
/// The defaults follow the NYT rules: no move may produce zero, and
/// multiplying or dividing by one is not allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rules {
    /// Permit `x * 1` and `x / 1`.
    pub unit_operands: bool,
    /// Permit subtractions that produce zero.
    pub zero_results: bool,
}

/// Canonical state of a [`DigitsPuzzle`]: sorted values plus the constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigitsKey {
    values: Values,
    forced: ForcedOperand,
}

/// One state of a Digits puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitsPuzzle {
    target: u64,
    /// Available numbers, largest first.
    values: Values,
    forced: ForcedOperand,
    rules: Rules,
}

impl DigitsPuzzle {
    /// Creates a non-chain puzzle with the default rules.
    ///
    /// Fails when fewer than two sources are given or any number is zero.
    pub fn new(target: u64, sources: &[u64]) -> Result<Self> {
        if sources.len() < 2 {
            return Err(Error::TooFewSources(sources.len()));
        }
        if target == 0 {
            return Err(Error::NonPositiveTarget(target));
        }

        let mut values: Values = sources.iter().copied().collect();
        values.sort_unstable_by(|a, b| b.cmp(a));

        // sorted descending, so the last value is the smallest
        if let Some(&smallest @ 0) = values.last() {
            return Err(Error::NonPositiveSource(smallest));
        }

        Ok(Self {
            target,
            values,
            forced: ForcedOperand::Free,
            rules: Rules::default(),
        })
    }

    pub fn with_chain_mode(mut self, enabled: bool) -> Self {
        self.set_chain_mode(enabled);
        self
    }

    pub fn with_forced_operand(mut self, forced: ForcedOperand) -> Self {
        self.forced = forced;
        self
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// Switches chain mode on or off, discarding any pending forced operand.
    pub fn set_chain_mode(&mut self, enabled: bool) {
        self.forced = if enabled {
            ForcedOperand::Chain
        } else {
            ForcedOperand::Free
        };
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Available numbers, largest first.
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn forced_operand(&self) -> ForcedOperand {
        self.forced
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn is_chain_mode(&self) -> bool {
        self.forced != ForcedOperand::Free
    }

    /// Position of the forced operand, when one applies to this state.
    fn forced_index(&self) -> Option<usize> {
        match self.forced {
            ForcedOperand::Operand(value) => self.values.iter().position(|&v| v == value),
            ForcedOperand::Free | ForcedOperand::Chain => None,
        }
    }

    /// Candidate operand pairs, without repeats.
    ///
    /// Pairs are `(a, b)` with `a >= b`, except that a forced operand is
    /// always `a`. Only one copy of a duplicated forced value is forced; any
    /// other copy can still be its partner.
    fn operand_pairs(&self) -> SmallVec<[(u64, u64); 16]> {
        let mut pairs: SmallVec<[(u64, u64); 16]> = SmallVec::new();
        let mut push_unique = |pair| {
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        };

        match self.forced_index() {
            Some(forced) => {
                let a = self.values[forced];
                for (index, &b) in self.values.iter().enumerate() {
                    if index != forced {
                        push_unique((a, b));
                    }
                }
            }
            None => {
                for (i, &a) in self.values.iter().enumerate() {
                    for &b in &self.values[i + 1..] {
                        push_unique((a, b));
                    }
                }
            }
        }

        pairs
    }

    /// Result of `a op b` if the rules allow it, with `b` as the operand
    /// checked against the unit filter.
    fn outcome(&self, op: Op, a: u64, b: u64) -> Option<u64> {
        let result = op.apply(a, b)?;
        if result == 0 && !self.rules.zero_results {
            return None;
        }
        if b == 1 && matches!(op, Op::Mul | Op::Div) && !self.rules.unit_operands {
            return None;
        }
        Some(result)
    }

    /// Validates `mv` against this state.
    ///
    /// Returns the positions of the two operands and the move's result.
    fn check_move(&self, mv: &Move) -> Option<(usize, usize, u64)> {
        let forced = self.forced_index();
        let (mut a, mut b) = (mv.a, mv.b);

        // without a forced left operand, commutative moves are checked in
        // the same (larger, smaller) order legal_moves uses
        if forced.is_none() && mv.op.is_commutative() && a < b {
            std::mem::swap(&mut a, &mut b);
        }

        let first = match forced {
            Some(index) if self.values[index] == a => index,
            Some(_) => return None,
            None => self.values.iter().position(|&v| v == a)?,
        };
        let second = self
            .values
            .iter()
            .enumerate()
            .position(|(index, &v)| index != first && v == b)?;

        let result = self.outcome(mv.op, a, b)?;
        Some((first, second, result))
    }

    /// Whether `mv` could be applied to this state.
    pub fn is_legal(&self, mv: &Move) -> bool {
        self.check_move(mv).is_some()
    }
}

impl Puzzle for DigitsPuzzle {
    type Move = Move;
    type Key = DigitsKey;
    type Error = Error;

    /// Moves grouped by operator (`+ - * /`), each group in pair order.
    fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        let pairs = self.operand_pairs();
        Op::ALL.into_iter().flat_map(move |op| {
            pairs
                .clone()
                .into_iter()
                .filter(move |&(a, b)| self.outcome(op, a, b).is_some())
                .map(move |(a, b)| Move::new(op, a, b))
        })
    }

    fn copy_and_move(&self, mv: &Move) -> Result<Self> {
        let (first, second, result) = self.check_move(mv).ok_or(Error::IllegalMove(*mv))?;

        let mut values = self.values.clone();
        values.remove(first.max(second));
        values.remove(first.min(second));
        let slot = values
            .iter()
            .position(|&v| v < result)
            .unwrap_or(values.len());
        values.insert(slot, result);

        let forced = match self.forced {
            ForcedOperand::Free => ForcedOperand::Free,
            ForcedOperand::Chain | ForcedOperand::Operand(_) => ForcedOperand::Operand(result),
        };

        Ok(Self {
            target: self.target,
            values,
            forced,
            rules: self.rules,
        })
    }

    fn canonical_state(&self) -> DigitsKey {
        DigitsKey {
            values: self.values.clone(),
            forced: self.forced,
        }
    }

    fn is_end_state(&self) -> bool {
        self.values.contains(&self.target)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::solver::{solve, SolveLimit};

    fn moves(puzzle: &DigitsPuzzle) -> Vec<Move> {
        puzzle.legal_moves().collect()
    }

    /// Whether any sequence of at most `depth` moves solves `puzzle`,
    /// found by plain recursion with no deduplication.
    fn solvable_within(puzzle: &DigitsPuzzle, depth: usize) -> bool {
        if puzzle.is_end_state() {
            return true;
        }
        depth > 0
            && puzzle.legal_moves().any(|mv| {
                let next = puzzle.copy_and_move(&mv).unwrap();
                solvable_within(&next, depth - 1)
            })
    }

    fn collect_states(puzzle: &DigitsPuzzle, seen: &mut HashSet<DigitsKey>) {
        if !seen.insert(puzzle.canonical_state()) {
            return;
        }
        for mv in puzzle.legal_moves() {
            collect_states(&puzzle.copy_and_move(&mv).unwrap(), seen);
        }
    }

    /// Applies `solution` from `root`, checking each move is legal when played.
    fn replay(root: &DigitsPuzzle, solution: &[Move]) -> DigitsPuzzle {
        solution.iter().fold(root.clone(), |state, mv| {
            assert!(moves(&state).contains(mv), "{mv} not legal in {state:?}");
            state.copy_and_move(mv).unwrap()
        })
    }

    fn nyt_puzzle() -> DigitsPuzzle {
        DigitsPuzzle::new(123, &[5, 9, 10, 14, 19, 21]).unwrap()
    }

    #[test]
    fn test_two_numbers_have_three_moves() {
        // 7 / 3 is not exact
        let puzzle = DigitsPuzzle::new(10, &[3, 7]).unwrap();
        assert_eq!(
            moves(&puzzle),
            vec![
                Move::new(Op::Add, 7, 3),
                Move::new(Op::Sub, 7, 3),
                Move::new(Op::Mul, 7, 3),
            ]
        );
    }

    #[test]
    fn test_division_needs_exact_result() {
        let puzzle = DigitsPuzzle::new(10, &[3, 14, 2]).unwrap();
        let legal = moves(&puzzle);
        assert_eq!(legal.len(), 10);

        let divisions: Vec<_> = legal.iter().filter(|m| m.op == Op::Div).collect();
        assert_eq!(divisions, vec![&Move::new(Op::Div, 14, 2)]);
    }

    #[test]
    fn test_chain_mode_forces_previous_result() {
        let from_builder = DigitsPuzzle::new(10, &[3, 14, 2, 13])
            .unwrap()
            .with_chain_mode(true);
        let mut from_setter = DigitsPuzzle::new(10, &[3, 14, 2, 13]).unwrap();
        from_setter.set_chain_mode(true);

        for puzzle in [from_builder, from_setter] {
            assert_eq!(puzzle.forced_operand(), ForcedOperand::Chain);
            assert_eq!(moves(&puzzle).len(), 19);

            let next = puzzle.copy_and_move(&Move::new(Op::Div, 14, 2)).unwrap();
            assert_eq!(next.forced_operand(), ForcedOperand::Operand(7));

            let legal = moves(&next);
            assert_eq!(legal.len(), 5);
            for expected in [
                Move::new(Op::Add, 7, 13),
                Move::new(Op::Add, 7, 3),
                Move::new(Op::Mul, 7, 13),
                Move::new(Op::Mul, 7, 3),
                Move::new(Op::Sub, 7, 3),
            ] {
                assert!(legal.contains(&expected), "missing {expected}");
            }
            assert!(legal.iter().all(|m| m.a == 7));
        }
    }

    #[test]
    fn test_chain_mode_with_duplicated_forced_value() {
        let puzzle = DigitsPuzzle::new(10, &[3, 14, 2, 7])
            .unwrap()
            .with_chain_mode(true);
        assert_eq!(moves(&puzzle).len(), 20);

        // leaves two 7s, one of them forced
        let next = puzzle.copy_and_move(&Move::new(Op::Div, 14, 2)).unwrap();
        assert_eq!(next.values(), &[7, 7, 3]);

        let legal = moves(&next);
        assert_eq!(legal.len(), 6);
        for expected in [
            Move::new(Op::Add, 7, 3),
            Move::new(Op::Add, 7, 7),
            Move::new(Op::Mul, 7, 3),
            Move::new(Op::Mul, 7, 7),
            Move::new(Op::Sub, 7, 3),
            Move::new(Op::Div, 7, 7),
        ] {
            assert!(legal.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_forced_operand_must_lead() {
        let puzzle = DigitsPuzzle::new(10, &[13, 7, 3])
            .unwrap()
            .with_forced_operand(ForcedOperand::Operand(7));
        assert!(puzzle.is_legal(&Move::new(Op::Add, 7, 13)));
        assert!(!puzzle.is_legal(&Move::new(Op::Sub, 13, 7)));
        assert!(!puzzle.is_legal(&Move::new(Op::Add, 13, 3)));
    }

    #[test]
    fn test_absent_forced_operand_is_ignored() {
        let free = DigitsPuzzle::new(10, &[13, 7, 3]).unwrap();
        let forced = free.clone().with_forced_operand(ForcedOperand::Operand(99));
        assert_eq!(moves(&free), moves(&forced));
    }

    #[test]
    fn test_duplicate_values_do_not_duplicate_moves() {
        let puzzle = DigitsPuzzle::new(100, &[5, 5, 3]).unwrap();
        let legal = moves(&puzzle);
        let unique: HashSet<_> = legal.iter().collect();
        assert_eq!(unique.len(), legal.len());
        assert!(legal.contains(&Move::new(Op::Div, 5, 5)));
    }

    #[test]
    fn test_end_state() {
        let puzzle = DigitsPuzzle::new(10, &[3, 14, 2, 13]).unwrap();
        assert!(!puzzle.is_end_state());
        let puzzle = puzzle.copy_and_move(&Move::new(Op::Div, 14, 2)).unwrap();
        assert!(!puzzle.is_end_state());
        let puzzle = puzzle.copy_and_move(&Move::new(Op::Add, 7, 3)).unwrap();
        assert!(puzzle.is_end_state());
    }

    #[test]
    fn test_illegal_moves_are_rejected() {
        let puzzle = DigitsPuzzle::new(10, &[3, 14, 2, 13, 13]).unwrap();
        for illegal in [
            Move::new(Op::Add, 16, 17),
            Move::new(Op::Sub, 13, 13),
            Move::new(Op::Sub, 13, 14),
            Move::new(Op::Mul, 14, 1),
            Move::new(Op::Div, 13, 2),
            Move::new(Op::Add, 2, 2),
        ] {
            assert_eq!(
                puzzle.copy_and_move(&illegal),
                Err(Error::IllegalMove(illegal)),
                "{illegal} should be illegal"
            );
        }
    }

    #[test]
    fn test_commutative_moves_accept_either_order() {
        let puzzle = DigitsPuzzle::new(10, &[3, 7]).unwrap();
        let forward = puzzle.copy_and_move(&Move::new(Op::Add, 7, 3)).unwrap();
        let reversed = puzzle.copy_and_move(&Move::new(Op::Add, 3, 7)).unwrap();
        assert_eq!(forward, reversed);
        assert!(!puzzle.is_legal(&Move::new(Op::Sub, 3, 7)));
    }

    #[test]
    fn test_copy_and_move_leaves_receiver_untouched() {
        let puzzle = nyt_puzzle().with_chain_mode(true);
        let before = puzzle.clone();
        let next = puzzle.copy_and_move(&Move::new(Op::Sub, 21, 14)).unwrap();
        assert_eq!(puzzle, before);
        assert_eq!(next.values(), &[19, 10, 9, 7, 5]);
        assert_eq!(next.forced_operand(), ForcedOperand::Operand(7));
    }

    #[test]
    fn test_non_chain_move_keeps_free_mode() {
        let next = nyt_puzzle()
            .copy_and_move(&Move::new(Op::Add, 19, 14))
            .unwrap();
        assert_eq!(next.forced_operand(), ForcedOperand::Free);
        assert!(!next.is_chain_mode());
    }

    #[test]
    fn test_unit_operands_rule() {
        let nyt = DigitsPuzzle::new(50, &[7, 1]).unwrap();
        assert!(!moves(&nyt).iter().any(|m| m.op == Op::Mul || m.op == Op::Div));

        let relaxed = nyt.with_rules(Rules {
            unit_operands: true,
            ..Rules::default()
        });
        let legal = moves(&relaxed);
        assert!(legal.contains(&Move::new(Op::Mul, 7, 1)));
        assert!(legal.contains(&Move::new(Op::Div, 7, 1)));
    }

    #[test]
    fn test_forced_one_may_be_multiplied() {
        let puzzle = DigitsPuzzle::new(50, &[7, 1])
            .unwrap()
            .with_forced_operand(ForcedOperand::Operand(1));
        assert!(moves(&puzzle).contains(&Move::new(Op::Mul, 1, 7)));
    }

    #[test]
    fn test_zero_results_rule() {
        let nyt = DigitsPuzzle::new(50, &[5, 5]).unwrap();
        assert!(!nyt.is_legal(&Move::new(Op::Sub, 5, 5)));

        let relaxed = nyt.with_rules(Rules {
            zero_results: true,
            ..Rules::default()
        });
        let next = relaxed.copy_and_move(&Move::new(Op::Sub, 5, 5)).unwrap();
        assert_eq!(next.values(), &[0]);
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(DigitsPuzzle::new(10, &[3]), Err(Error::TooFewSources(1)));
        assert_eq!(DigitsPuzzle::new(10, &[]), Err(Error::TooFewSources(0)));
        assert_eq!(DigitsPuzzle::new(0, &[3, 4]), Err(Error::NonPositiveTarget(0)));
        assert_eq!(DigitsPuzzle::new(10, &[3, 0]), Err(Error::NonPositiveSource(0)));
    }

    #[test]
    fn test_canonical_state_ignores_order() {
        let a = DigitsPuzzle::new(20, &[5, 9, 14]).unwrap();
        let b = DigitsPuzzle::new(20, &[9, 14, 5]).unwrap();
        assert_eq!(a.canonical_state(), b.canonical_state());

        let chained = b.with_chain_mode(true);
        assert_ne!(a.canonical_state(), chained.canonical_state());
    }

    #[test]
    fn test_move_orders_collapse_to_one_state() {
        let puzzle = DigitsPuzzle::new(100, &[1, 2, 3, 4]).unwrap();
        let big_first = puzzle
            .copy_and_move(&Move::new(Op::Add, 4, 3))
            .and_then(|p| p.copy_and_move(&Move::new(Op::Add, 2, 1)))
            .unwrap();
        let small_first = puzzle
            .copy_and_move(&Move::new(Op::Add, 2, 1))
            .and_then(|p| p.copy_and_move(&Move::new(Op::Add, 4, 3)))
            .unwrap();
        assert_eq!(big_first.values(), &[7, 3]);
        assert_eq!(big_first.canonical_state(), small_first.canonical_state());
    }

    #[test]
    fn test_nyt_scenario_first_solution() {
        let puzzle = nyt_puzzle();
        let search = solve(&puzzle, SolveLimit::First).unwrap();
        let solution = search.first().expect("puzzle is solvable");

        assert_eq!(solution.len(), 3);
        assert!(!solvable_within(&puzzle, 2));
        assert!(replay(&puzzle, solution).is_end_state());
    }

    #[test]
    fn test_nyt_scenario_known_solution_replays() {
        let puzzle = nyt_puzzle();
        let known = [
            Move::new(Op::Add, 19, 14),
            Move::new(Op::Mul, 10, 9),
            Move::new(Op::Add, 90, 33),
        ];
        assert!(replay(&puzzle, &known).is_end_state());
    }

    #[test]
    fn test_nyt_scenario_chain_mode() {
        let puzzle = nyt_puzzle().with_chain_mode(true);
        let known = [
            Move::new(Op::Sub, 21, 14),
            Move::new(Op::Mul, 7, 19),
            Move::new(Op::Sub, 133, 10),
        ];
        assert!(replay(&puzzle, &known).is_end_state());

        let search = solve(&puzzle, SolveLimit::All).unwrap();
        assert!(search.is_solved());
        for solution in &search.solutions {
            assert_eq!(solution.len(), 3);
            assert!(replay(&puzzle, solution).is_end_state());
            for pair in solution.windows(2) {
                assert_eq!(Some(pair[1].a), pair[0].result());
            }
        }
    }

    #[test]
    fn test_all_solutions_are_distinct_and_shortest() {
        let puzzle = nyt_puzzle();
        let search = solve(&puzzle, SolveLimit::All).unwrap();
        assert!(search.solutions.len() > 1);

        let unique: HashSet<_> = search.solutions.iter().collect();
        assert_eq!(unique.len(), search.solutions.len());
        for solution in &search.solutions {
            assert_eq!(solution.len(), 3);
            assert!(replay(&puzzle, solution).is_end_state());
        }
    }

    #[test]
    fn test_every_final_move_is_reported() {
        // 8 + 2 and 5 * 2 both reach 10 in one move
        let puzzle = DigitsPuzzle::new(10, &[2, 5, 8]).unwrap();
        let search = solve(&puzzle, SolveLimit::All).unwrap();
        assert_eq!(
            search.solutions,
            vec![vec![Move::new(Op::Add, 8, 2)], vec![Move::new(Op::Mul, 5, 2)]]
        );
    }

    #[test]
    fn test_search_is_deterministic() {
        let puzzle = nyt_puzzle().with_chain_mode(true);
        let first = solve(&puzzle, SolveLimit::All).unwrap();
        let second = solve(&puzzle, SolveLimit::All).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_root_already_solved() {
        let puzzle = DigitsPuzzle::new(5, &[5, 9]).unwrap();
        let search = solve(&puzzle, SolveLimit::First).unwrap();
        assert_eq!(search.solutions, vec![Vec::<Move>::new()]);
        assert_eq!(search.stats.iterations, 1);
    }

    #[test]
    fn test_unsolvable_explores_every_state() {
        // reachable: {3, 2}, {5}, {1}, {6}
        let puzzle = DigitsPuzzle::new(100, &[2, 3]).unwrap();
        let search = solve(&puzzle, SolveLimit::All).unwrap();
        assert!(search.solutions.is_empty());
        assert_eq!(search.stats.iterations, 4);

        let puzzle = DigitsPuzzle::new(1000, &[2, 3, 7, 11]).unwrap();
        let mut states = HashSet::new();
        collect_states(&puzzle, &mut states);
        let search = solve(&puzzle, SolveLimit::All).unwrap();
        assert!(search.solutions.is_empty());
        assert_eq!(search.stats.iterations, states.len());
    }
}
