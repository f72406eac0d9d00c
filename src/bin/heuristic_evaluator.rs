use clap::Parser;
use liquidsort_solver::engine::Board;
use liquidsort_solver::heuristics::estimate_moves;
use liquidsort_solver::solver::solve;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of random boards to evaluate
    #[clap(long, default_value_t = 20)]
    boards: usize,

    /// Number of colors per board
    #[clap(long, default_value_t = 6)]
    colors: u8,

    /// Uniform tube capacity
    #[clap(long, default_value_t = 4)]
    capacity: usize,

    /// Number of extra empty tubes
    #[clap(long, default_value_t = 2)]
    empty: usize,

    /// Seed of the first board; board i uses start_seed + i
    #[clap(long, default_value_t = 0)]
    start_seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    println!(
        "Evaluating the segment heuristic on {} random boards ({} colors, capacity {}, {} empty tubes)...\n",
        args.boards, args.colors, args.capacity, args.empty
    );

    let mut solved = 0usize;
    let mut total_moves = 0usize;
    let mut total_estimate = 0u64;
    let mut total_expanded = 0usize;

    for board_idx in 0..args.boards {
        let seed = args.start_seed + board_idx as u64;
        let board =
            Board::new_random_with_seed(args.colors, args.capacity, args.empty, seed);
        let estimate = estimate_moves(&board);

        match solve(&board) {
            Some(solution) => {
                println!(
                    "Board {:>3} (seed {:>4}): estimate {:>3}, solved in {:>3} moves, {:>7} states expanded",
                    board_idx,
                    seed,
                    estimate,
                    solution.moves.len(),
                    solution.states_expanded
                );
                solved += 1;
                total_moves += solution.moves.len();
                total_estimate += estimate as u64;
                total_expanded += solution.states_expanded;
            }
            None => {
                println!(
                    "Board {:>3} (seed {:>4}): estimate {:>3}, unsolvable",
                    board_idx, seed, estimate
                );
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Solved {}/{} boards", solved, args.boards);
    if solved > 0 {
        println!("Average solution length:  {:.2}", total_moves as f64 / solved as f64);
        println!("Average initial estimate: {:.2}", total_estimate as f64 / solved as f64);
        println!("Average states expanded:  {:.2}", total_expanded as f64 / solved as f64);
    }
}
