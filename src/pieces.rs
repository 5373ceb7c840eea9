//! Piece catalog and coordinate types for the 4x5 sliding-block puzzle.
//!
//! The puzzle always has the same ten pieces in the same index order:
//! four 1x1 blocks, one 2x1 bar, four 1x2 bars and the 2x2 block that has
//! to be brought to the exit.

use std::fmt;

use crate::geometry::Direction;

/// Grid width in cells.
pub const WIDTH: usize = 4;

/// Grid height in cells.
pub const HEIGHT: usize = 5;

/// Total number of cells in the grid.
pub const GRID_SIZE: usize = WIDTH * HEIGHT;

/// Number of pieces on every board.
pub const NUM_PIECES: usize = 10;

/// Index of the horizontal bar.
pub const HORIZONTAL_PIECE: usize = 4;

/// Index of the 2x2 block.
pub const BIG_SQUARE_PIECE: usize = 9;

/// The shape of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    /// 1x1 block.
    Small,
    /// 2 cells wide, 1 cell tall.
    Horizontal,
    /// 1 cell wide, 2 cells tall.
    Vertical,
    /// 2x2 block.
    BigSquare,
}

impl PieceType {
    /// Width and height of the shape in cells.
    pub const fn extent(self) -> (usize, usize) {
        match self {
            PieceType::Small => (1, 1),
            PieceType::Horizontal => (2, 1),
            PieceType::Vertical => (1, 2),
            PieceType::BigSquare => (2, 2),
        }
    }

    /// Number of cells the shape covers.
    pub const fn cell_count(self) -> u32 {
        let (width, height) = self.extent();
        (width * height) as u32
    }
}

/// Piece type of every piece index.
pub const PIECE_TYPES: [PieceType; NUM_PIECES] = [
    PieceType::Small,
    PieceType::Small,
    PieceType::Small,
    PieceType::Small,
    PieceType::Horizontal,
    PieceType::Vertical,
    PieceType::Vertical,
    PieceType::Vertical,
    PieceType::Vertical,
    PieceType::BigSquare,
];

/// Groups of mutually interchangeable pieces, as (first index, length).
///
/// Pieces inside a group have the same shape, so swapping their positions
/// yields the same physical puzzle state.
pub const INTERCHANGEABLE_GROUPS: [(usize, usize); 2] = [(0, 4), (5, 4)];

const _: () = {
    let mut g = 0;
    while g < INTERCHANGEABLE_GROUPS.len() {
        let (base, len) = INTERCHANGEABLE_GROUPS[g];
        assert!(len == 4, "canonicalizer sorts groups of exactly four");
        assert!(base + len <= NUM_PIECES, "group exceeds piece catalog");
        let mut i = 1;
        while i < len {
            assert!(
                PIECE_TYPES[base + i] as u8 == PIECE_TYPES[base] as u8,
                "interchangeable pieces must share a shape"
            );
            i += 1;
        }
        g += 1;
    }
};

/// Returns the type of the piece at `piece` index.
///
/// Panics if `piece >= NUM_PIECES`.
#[inline(always)]
pub const fn piece_type(piece: usize) -> PieceType {
    PIECE_TYPES[piece]
}

/// Anchor cell of a piece: its top-left-most covered cell.
///
/// Signed so that a unit step off the edge is representable and can be
/// rejected by the occupancy check instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Row-major reading-order key, used to order interchangeable pieces.
    #[inline(always)]
    pub const fn reading_order(self) -> i32 {
        self.y * WIDTH as i32 + self.x
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A single edge label of the state graph: which piece moved, and where.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceMove {
    pub piece: usize,
    pub direction: Direction,
}

impl PieceMove {
    pub const fn new(piece: usize, direction: Direction) -> Self {
        Self { piece, direction }
    }

    /// The same piece moving back the way it came.
    pub const fn reverse(self) -> Self {
        Self::new(self.piece, self.direction.reverse())
    }
}

impl fmt::Display for PieceMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.piece, self.direction)
    }
}

/// The standard opening layout.
///
/// Four small blocks fill the bottom row with the horizontal bar above
/// them, vertical bars flank the 2x2 block, and the two free cells sit in
/// the middle of the top row.
pub const DEFAULT_START: [Location; NUM_PIECES] = [
    Location::new(0, 4),
    Location::new(1, 4),
    Location::new(2, 4),
    Location::new(3, 4),
    Location::new(1, 3),
    Location::new(0, 0),
    Location::new(0, 2),
    Location::new(3, 0),
    Location::new(3, 2),
    Location::new(1, 1),
];

/// Anchor the 2x2 block has to reach to solve the default puzzle.
pub const DEFAULT_GOAL: Location = Location::new(1, 3);
