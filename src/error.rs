//! Recoverable error types.
//!
//! Broken internal invariants (a corrupt board, an impossible piece index
//! inside the solver) are not represented here: they panic.

use thiserror::Error;

use crate::pieces::{Location, PieceMove};

/// Errors raised while constructing or mutating a [`Board`](crate::board::Board).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The location list does not hold exactly one entry per piece.
    #[error("wrong number of piece locations: got {0}")]
    WrongPieceCount(usize),

    /// A piece index past the end of the catalog.
    #[error("piece index {0} is out of range")]
    UnknownPiece(usize),

    /// The piece would stick out of the grid.
    #[error("piece {piece} does not fit on the grid at {location}")]
    OutOfBounds { piece: usize, location: Location },

    /// Two pieces claim the same cell.
    #[error("piece {piece} at {location} overlaps another piece")]
    Overlap { piece: usize, location: Location },

    /// The move is blocked or leaves the grid.
    #[error("move {0} is not legal on this board")]
    IllegalMove(PieceMove),
}

/// Errors raised while searching the state graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// No reachable board satisfies the goal.
    #[error("goal is unreachable from the start board ({explored} states explored)")]
    Unreachable { explored: usize },
}
