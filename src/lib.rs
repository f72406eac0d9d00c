//! # Liquid Sort Solver Library
//!
//! This library provides the core mechanics of the liquid-sorting ("water
//! sort") puzzle and a best-first (A*-style) solver that finds shortest or
//! near-shortest pour sequences.
//!
//! It is used by two binaries:
//! - `ai_solver`: Reads a tube layout from a file and prints the pour
//!   sequence that sorts it, or reports that the layout is unsolvable.
//! - `heuristic_evaluator`: Generates seeded random boards, solves each,
//!   and reports how tight the heuristic estimate is against the solved
//!   move counts.
//!
//! ## Modules
//! - `engine`: Tube and board representation (`Color`, `Tube`, `Board`,
//!   `Move`) and all pour mechanics: legality checks, the greedy transfer,
//!   successor generation, the solved check, and seeded scrambles.
//! - `solver`: The best-first search (`solve`, `solve_bounded`) with path
//!   reconstruction over predecessor links.
//! - `heuristics`: The remaining-move estimate and board-analysis helpers.
//! - `utils`: Parsing tube layouts from text.
//! - `error`: The crate error type; all variants are construction or parse
//!   failures, never search outcomes.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;
