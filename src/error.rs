//! Error type shared by the board engine, the parsers and the binaries.

use thiserror::Error;

/// Errors raised while building boards or applying moves.
///
/// A search that cannot reach its goal is not an error; it is reported as
/// [`crate::solver::SearchOutcome::Failed`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PegError {
    /// The seed was not a non-negative integer.
    #[error("invalid seed '{0}': state must be a non-negative integer")]
    InvalidSeed(String),
    /// The seed needs more cells than a board can hold.
    #[error("seed needs {bits} bits, but boards are limited to {max} cells", max = crate::engine::MAX_CELLS)]
    BoardTooLarge { bits: usize },
    /// A textual board could not be parsed.
    #[error("invalid board: {0}")]
    InvalidBoard(String),
    /// A move was applied to a state where its precondition does not hold.
    #[error("illegal move: slot {jumper} over slot {goner} into slot {newpos}")]
    InvalidMove {
        jumper: usize,
        goner: usize,
        newpos: usize,
    },
}
