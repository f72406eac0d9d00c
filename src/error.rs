//! Error types for the liquid-sorting crate.

use thiserror::Error;

/// Main error type for the liquid-sorting crate.
///
/// Every variant is a construction-time or parse-time failure. An
/// unsolvable puzzle is never an `Error`; the solver reports it as a
/// normal search outcome.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("initial contents of {len} units exceed tube capacity {capacity}")]
    TubeOverflow { len: usize, capacity: usize },

    #[error("tube {tube} is described by {len} characters but capacity is {capacity}")]
    RowTooLong {
        tube: usize,
        len: usize,
        capacity: usize,
    },

    #[error("unrecognized color character '{character}' in tube {tube} at position {position}")]
    UnknownColor {
        character: char,
        tube: usize,
        position: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
