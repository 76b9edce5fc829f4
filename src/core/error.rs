//! Error types for course generation

use thiserror::Error;

/// Main error type for the generator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// No valid tee or hole candidate exists for the requested board.
    #[error(
        "no tee/hole placement for {width}x{height} board with edge margin ({margin_x}, {margin_y})"
    )]
    Placement {
        width: usize,
        height: usize,
        margin_x: i32,
        margin_y: i32,
    },

    /// The random walk drained its path stack while still searching.
    /// A defensive invariant; seeing this means bad parameters, not bad luck.
    #[error("random walk exhausted its path stack")]
    PathExhausted,

    /// A grid had different dimensions than its context requires.
    #[error("grid is {width}x{height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
}
