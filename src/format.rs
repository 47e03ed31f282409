//! Human-readable rendering of solutions and search results.

use std::fmt::Write;

use crate::ops::Move;
use crate::solver::Search;

/// Formats one move as `a op b = result`.
pub fn format_move(mv: &Move) -> String {
    match mv.result() {
        Some(result) => format!("{mv} = {result}"),
        None => format!("{mv} = ?"),
    }
}

/// Formats a solution, one move per line.
pub fn format_solution(solution: &[Move]) -> String {
    let mut output = String::new();
    for mv in solution {
        output.push_str(&format_move(mv));
        output.push('\n');
    }
    output
}

/// Formats every solution of a search followed by its statistics.
///
/// A single solution is printed bare; several are numbered.
pub fn format_search(search: &Search<Move>) -> String {
    let mut output = String::new();

    match search.solutions.as_slice() {
        [] => output.push_str("No solution found\n"),
        [solution] => output.push_str(&format_solution(solution)),
        solutions => {
            for (i, solution) in solutions.iter().enumerate() {
                // writing to a String cannot fail
                let _ = writeln!(output, "Solution {} ({} moves):", i + 1, solution.len());
                output.push_str(&format_solution(solution));
                output.push('\n');
            }
        }
    }

    let _ = writeln!(output, "{}", search.stats);
    output
}
