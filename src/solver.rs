//! Best-first search over pour sequences.
//!
//! The search is A*-shaped: a priority frontier ordered by
//! `f = moves so far + estimated moves remaining`, and a cost table
//! mapping each board configuration to the best move count at which it
//! has been enqueued. Boards are never mutated after construction; the
//! search branches by generating fresh successor boards, and every node
//! keeps an `Rc` link to its predecessor so the winning move sequence can
//! be read back off the node chain.

use crate::engine::{Board, Move};
use crate::heuristics::estimate_moves;
use log::{debug, info};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;
use std::time::Instant;

/// A solution found by the solver.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Pours to perform, in order, to sort the initial board.
    pub moves: Vec<Move>,
    /// Number of boards expanded before the solution was popped.
    pub states_expanded: usize,
}

/// Outcome of a budget-capped search.
///
/// `Unsolvable` is a proof (the reachable space was exhausted), while
/// `OutOfBudget` is inconclusive: the search stopped before reaching a
/// verdict and the caller decides how to present that.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    Solved(Solution),
    Unsolvable,
    OutOfBudget,
}

/// One explored board plus its search bookkeeping, frozen at construction.
///
/// `parent` links form a tree rooted at the initial board; `Rc` keeps a
/// predecessor alive exactly as long as some frontier entry or child still
/// refers to it, which is precisely the lifetime path reconstruction needs.
struct SearchNode {
    board: Board,
    /// Pours taken from the initial board to reach this one.
    g: u32,
    /// Estimated pours remaining, computed once.
    h: u32,
    /// The pour that produced this board; `None` only on the root.
    produced_by: Option<Move>,
    parent: Option<Rc<SearchNode>>,
}

impl SearchNode {
    fn priority(&self) -> u32 {
        self.g + self.h
    }
}

/// Frontier entry: min-ordered by priority, FIFO among equal priorities
/// via the monotone insertion sequence number.
struct FrontierEntry {
    priority: u32,
    seq: u64,
    node: Rc<SearchNode>,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reverse both fields to pop the lowest
        // priority first and the oldest entry among ties.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Searches for a pour sequence that sorts `initial`.
///
/// Returns `None` when the puzzle is unsolvable; that is a defined
/// outcome, not an error. An already-solved board yields an empty move
/// list.
pub fn solve(initial: &Board) -> Option<Solution> {
    match solve_bounded(initial, usize::MAX) {
        SearchOutcome::Solved(solution) => Some(solution),
        _ => None,
    }
}

/// Searches like [`solve`], but gives up after expanding `max_expanded`
/// boards.
///
/// The search itself has no intrinsic timeout; callers needing bounded
/// latency cap the node count here and treat `OutOfBudget` as "no answer
/// yet" rather than "unsolvable".
pub fn solve_bounded(initial: &Board, max_expanded: usize) -> SearchOutcome {
    let start = Instant::now();

    let mut frontier = BinaryHeap::new();
    let mut best_g: HashMap<Vec<u8>, u32> = HashMap::new();
    let mut seq: u64 = 0;
    let mut expanded: usize = 0;

    let root = Rc::new(SearchNode {
        board: initial.clone(),
        g: 0,
        h: estimate_moves(initial),
        produced_by: None,
        parent: None,
    });
    best_g.insert(initial.encode_key(), 0);
    frontier.push(FrontierEntry {
        priority: root.priority(),
        seq,
        node: root,
    });

    debug!(
        "searching over {} tubes, initial estimate {}",
        initial.tubes().len(),
        estimate_moves(initial)
    );

    while let Some(FrontierEntry { node, .. }) = frontier.pop() {
        if node.board.is_solved() {
            let moves = reconstruct_path(&node);
            info!(
                "solved in {} moves after expanding {} states ({} configurations seen, {:?})",
                moves.len(),
                expanded,
                best_g.len(),
                start.elapsed()
            );
            return SearchOutcome::Solved(Solution {
                moves,
                states_expanded: expanded,
            });
        }

        if expanded >= max_expanded {
            info!("budget of {} expansions exhausted without a verdict", max_expanded);
            return SearchOutcome::OutOfBudget;
        }
        expanded += 1;

        for (mv, next_board) in node.board.successors() {
            let g = node.g + 1;

            // Skip the successor when a path at least as short already
            // reached this configuration; otherwise this path becomes the
            // best known one.
            let key = next_board.encode_key();
            if let Some(&known) = best_g.get(&key) {
                if known <= g {
                    continue;
                }
            }
            best_g.insert(key, g);

            let h = estimate_moves(&next_board);
            let child = Rc::new(SearchNode {
                board: next_board,
                g,
                h,
                produced_by: Some(mv),
                parent: Some(Rc::clone(&node)),
            });
            seq += 1;
            frontier.push(FrontierEntry {
                priority: child.priority(),
                seq,
                node: child,
            });
        }
    }

    info!(
        "frontier exhausted after {} expansions, puzzle is unsolvable ({:?})",
        expanded,
        start.elapsed()
    );
    SearchOutcome::Unsolvable
}

/// Walks predecessor links from the solved node back to the root and
/// returns the collected pours in forward order.
fn reconstruct_path(solved: &Rc<SearchNode>) -> Vec<Move> {
    let mut moves = Vec::with_capacity(solved.g as usize);
    let mut current = solved;
    while let Some(parent) = &current.parent {
        if let Some(mv) = current.produced_by {
            moves.push(mv);
        }
        current = parent;
    }
    moves.reverse();
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    /// Replays `moves` against `board`, asserting legality and color
    /// conservation at every step, and returns the final board.
    fn replay(board: &Board, moves: &[Move]) -> Board {
        let counts = board.color_counts();
        let mut current = board.clone();
        for mv in moves {
            current = current
                .apply(*mv)
                .unwrap_or_else(|| panic!("returned move {} is illegal during replay", mv));
            assert_eq!(current.color_counts(), counts, "pour changed color totals");
        }
        current
    }

    #[test]
    fn test_already_solved_board_returns_no_moves() {
        // Full monochrome tubes and an empty tube: solved at construction.
        let board = board_from_str_array(&["AA", "BB", "-"], 2).unwrap();
        let solution = solve(&board).unwrap();
        assert!(solution.moves.is_empty());
        assert_eq!(solution.states_expanded, 0);
    }

    #[test]
    fn test_single_merge_solves_in_one_move() {
        let board = board_from_str_array(&["A", "A"], 2).unwrap();
        let solution = solve(&board).unwrap();
        assert_eq!(solution.moves.len(), 1);
        let final_board = replay(&board, &solution.moves);
        assert!(final_board.is_solved());
    }

    #[test]
    fn test_two_tube_deadlock_is_unsolvable() {
        // Tops mismatch and there is no empty tube to break the deadlock.
        let board = board_from_str_array(&["AB", "BA"], 2).unwrap();
        assert!(solve(&board).is_none());
        assert!(matches!(
            solve_bounded(&board, usize::MAX),
            SearchOutcome::Unsolvable
        ));
    }

    #[test]
    fn test_three_tube_puzzle_solves() {
        let board = board_from_str_array(&["AB", "BA", "-"], 2).unwrap();
        let solution = solve(&board).unwrap();
        assert!(!solution.moves.is_empty());
        // Unstacking both mixed tubes takes at least three pours.
        assert!(solution.moves.len() >= 3);
        let final_board = replay(&board, &solution.moves);
        assert!(final_board.is_solved());
    }

    #[test]
    fn test_solution_replay_is_sound_on_larger_board() {
        let board = board_from_str_array(&["ABC", "BCA", "CAB", "-", "-"], 3).unwrap();
        let solution = solve(&board).unwrap();
        let final_board = replay(&board, &solution.moves);
        assert!(final_board.is_solved());
    }

    #[test]
    fn test_solved_seeded_scramble() {
        let board = Board::new_random_with_seed(4, 4, 2, 11);
        let solution = solve(&board).expect("scramble with two spare tubes should solve");
        let final_board = replay(&board, &solution.moves);
        assert!(final_board.is_solved());
    }

    #[test]
    fn test_search_is_deterministic() {
        let board = board_from_str_array(&["ABC", "BCA", "CAB", "-", "-"], 3).unwrap();
        let first = solve(&board).unwrap();
        let second = solve(&board).unwrap();
        assert_eq!(first.moves, second.moves);
        assert_eq!(first.states_expanded, second.states_expanded);
    }

    #[test]
    fn test_completed_tubes_never_appear_in_solutions() {
        // Tube 1 starts completed; no returned pour may touch it.
        let board = board_from_str_array(&["AABB", "CCCC", "BBAA", "-"], 4).unwrap();
        let solution = solve(&board).unwrap();
        for mv in &solution.moves {
            assert_ne!(mv.from, 1);
            assert_ne!(mv.to, 1);
        }
    }

    #[test]
    fn test_bounded_search_reports_out_of_budget() {
        let board = board_from_str_array(&["AB", "BA", "-"], 2).unwrap();
        assert!(matches!(
            solve_bounded(&board, 0),
            SearchOutcome::OutOfBudget
        ));
    }

    #[test]
    fn test_bounded_search_still_returns_immediate_solution() {
        // A zero budget permits no expansions, but a board that is solved
        // when popped is still reported solved.
        let board = board_from_str_array(&["AA", "-"], 2).unwrap();
        assert!(matches!(
            solve_bounded(&board, 0),
            SearchOutcome::Solved(_)
        ));
    }

    #[test]
    fn test_dead_branches_are_never_mistaken_for_solutions() {
        // Legal pours exist, but three A units can never evenly fill a
        // two-unit tube: every line of play dead-ends. The search must
        // exhaust the space and report unsolvable.
        let board = board_from_str_array(&["AB", "BA", "A"], 2).unwrap();
        assert!(!board.successors().is_empty());
        assert!(solve(&board).is_none());
    }
}
