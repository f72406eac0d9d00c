use clap::Parser;
use liquidsort_solver::engine::Board;
use liquidsort_solver::heuristics::{filled_completed_tubes, unique_colors};
use liquidsort_solver::solver::{solve_bounded, SearchOutcome};
use liquidsort_solver::utils::board_from_str_array;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Uniform tube capacity
    #[clap(short, long, default_value_t = 4)]
    capacity: usize,

    /// Stop after expanding this many states (0 = unbounded)
    #[clap(short, long, default_value_t = 0)]
    max_states: usize,

    /// Path to the layout file (one tube per line, letters bottom-to-top,
    /// '-' for an empty tube)
    layout_file: PathBuf,
}

fn read_layout_file(path: &PathBuf, capacity: usize) -> Result<Board, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file: {}", e))?;

    let lines: Vec<&str> = content.lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    board_from_str_array(&lines, capacity)
        .map_err(|e| format!("Invalid layout: {}", e))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let board = read_layout_file(&args.layout_file, args.capacity)
        .expect(&format!("Failed to read layout from file: {}", args.layout_file.display()));
    println!(
        "Loaded {} tubes from {} ({} colors, {} already sorted)\n",
        board.tubes().len(),
        args.layout_file.display(),
        unique_colors(&board),
        filled_completed_tubes(&board)
    );
    println!("Initial board state:\n{}\n", board);

    let budget = if args.max_states == 0 { usize::MAX } else { args.max_states };
    match solve_bounded(&board, budget) {
        SearchOutcome::Solved(solution) => {
            println!("Solution found:\n");
            println!("Moves ({}):", solution.moves.len());
            if solution.moves.is_empty() {
                println!("  Already solved, no moves needed.");
            }

            let mut replayed = board.clone();
            for (i, mv) in solution.moves.iter().enumerate() {
                println!("  Move {}: {}", i + 1, mv);
                replayed = replayed.apply(*mv).expect("solver returned an illegal move");
            }
            println!("\nStates expanded: {}\n", solution.states_expanded);
            println!("Final board state:\n{}\n", replayed);
        }
        SearchOutcome::Unsolvable => {
            println!("No solution found.\n");
        }
        SearchOutcome::OutOfBudget => {
            println!(
                "Search stopped after {} states without a verdict; raise --max-states to keep looking.\n",
                args.max_states
            );
        }
    }
}
