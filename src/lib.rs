//! Klotski Puzzle Solver Library
//!
//! Models the 4x5 sliding-block puzzle, enumerates every board reachable
//! from a start layout and finds shortest solutions.
//!
//! ```
//! use klotski::{solve, piece_anchored_at, Board, HashGraph, StateGraph};
//! use klotski::pieces::{BIG_SQUARE_PIECE, DEFAULT_GOAL};
//!
//! let graph = HashGraph::build(Board::default_start());
//! let solution = solve(&graph, piece_anchored_at(BIG_SQUARE_PIECE, DEFAULT_GOAL)).unwrap();
//! assert_eq!(solution.start.replay(&solution.moves), Ok(solution.goal));
//! ```

pub mod board;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod pieces;
pub mod solver;

pub use board::Board;
pub use error::{BoardError, SolveError};
pub use geometry::{Direction, MoveSet};
pub use graph::{HashGraph, StateGraph, Transition};
pub use grid::Occupancy;
pub use pieces::{Location, PieceMove, PieceType};
pub use solver::{piece_anchored_at, solve, Distances, Solution};
