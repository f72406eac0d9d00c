//! Heuristic estimation and board-analysis helpers.
//!
//! The solver ranks boards by `g + h`, where `h` comes from
//! `estimate_moves`: the total number of same-color segments sitting in
//! tubes that still need work. The remaining functions are small analysis
//! helpers used by the binaries and the tests.

use crate::engine::{Board, Color, Tube};
use std::collections::HashSet;

/// Counts the maximal same-color contiguous runs ("segments") in a tube.
///
/// An empty tube has zero segments; a monochrome tube has one; every color
/// change adds one. `"AABB"` has two segments, `"ABAB"` has four.
pub fn segment_count(tube: &Tube) -> u32 {
    let contents = tube.contents();
    if contents.is_empty() {
        return 0;
    }
    let mut segments = 1;
    for pair in contents.windows(2) {
        if pair[0] != pair[1] {
            segments += 1;
        }
    }
    segments
}

/// Estimates the number of moves still needed to solve `board`.
///
/// Sums `segment_count` over every tube that is not yet completed
/// (completed covers empty, so both contribute zero). Each displaced
/// segment needs at least one pour to relocate. The estimate can
/// overcount, since a tube's bottom segment may already sit where it
/// belongs, so it is not an admissible lower bound: solutions found with
/// it are near-minimal rather than provably minimal.
pub fn estimate_moves(board: &Board) -> u32 {
    board
        .tubes()
        .iter()
        .filter(|tube| !tube.is_completed())
        .map(|tube| segment_count(tube))
        .sum()
}

/// Number of distinct colors present on the board.
pub fn unique_colors(board: &Board) -> usize {
    let mut seen: HashSet<Color> = HashSet::new();
    for tube in board.tubes() {
        seen.extend(tube.contents().iter().copied());
    }
    seen.len()
}

/// Number of tubes already sorted into a single full color. Empty tubes
/// count as completed for the solved check but not here; this reports
/// finished colors, not free space.
pub fn filled_completed_tubes(board: &Board) -> usize {
    board
        .tubes()
        .iter()
        .filter(|tube| tube.is_completed() && !tube.is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn tube_of(letters: &str, capacity: usize) -> Tube {
        let board = board_from_str_array(&[letters], capacity).unwrap();
        board.tubes()[0].clone()
    }

    #[test]
    fn test_segment_count() {
        assert_eq!(segment_count(&Tube::new(4)), 0);
        assert_eq!(segment_count(&tube_of("AAAA", 4)), 1);
        assert_eq!(segment_count(&tube_of("AABB", 4)), 2);
        assert_eq!(segment_count(&tube_of("ABAB", 4)), 4);
        assert_eq!(segment_count(&tube_of("A", 4)), 1);
    }

    #[test]
    fn test_estimate_excludes_completed_and_empty_tubes() {
        // Tube 0 is completed, tube 2 is empty: both contribute zero.
        // Tube 1 has four segments, tube 3 has two.
        let board = board_from_str_array(&["AAAA", "ABAB", "-", "BA"], 4).unwrap();
        assert_eq!(estimate_moves(&board), 6);
    }

    #[test]
    fn test_estimate_is_zero_for_solved_board() {
        let board = board_from_str_array(&["AA", "BB", "-"], 2).unwrap();
        assert_eq!(estimate_moves(&board), 0);
    }

    #[test]
    fn test_estimate_counts_partial_monochrome_tube() {
        // A monochrome tube that is not full is not completed, so its
        // single segment still counts.
        let board = board_from_str_array(&["AA", "-", "AA"], 4).unwrap();
        assert_eq!(estimate_moves(&board), 2);
    }

    #[test]
    fn test_unique_colors() {
        let board = board_from_str_array(&["AB", "BA", "-"], 2).unwrap();
        assert_eq!(unique_colors(&board), 2);

        let empty = board_from_str_array(&["-", "-"], 2).unwrap();
        assert_eq!(unique_colors(&empty), 0);
    }

    #[test]
    fn test_filled_completed_tubes() {
        let board = board_from_str_array(&["AAAA", "BABA", "-"], 4).unwrap();
        assert_eq!(filled_completed_tubes(&board), 1);
    }
}
