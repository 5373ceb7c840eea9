//! Bit-packed board states.
//!
//! A [`Board`] stores the anchor of every piece in one `u64`. Piece `i` owns
//! the five bits starting at `i * FIELD_BITS`: `y` in the low three bits and
//! `x` in the two above it.
//!
//! Boards handed out by this module are always canonical: interchangeable
//! pieces are sorted into reading order, so two boards that only differ in
//! which small block sits where compare equal.

use std::fmt;

use crate::error::BoardError;
use crate::geometry::{MoveSet, DIRECTIONS};
use crate::grid::{self, occupancy_of, Occupancy};
use crate::pieces::{
    piece_type, Location, PieceMove, DEFAULT_START, HEIGHT, INTERCHANGEABLE_GROUPS, NUM_PIECES,
    WIDTH,
};

/// Bits holding a piece's `x`.
const X_BITS: u32 = 2;
/// Bits holding a piece's `y`.
const Y_BITS: u32 = 3;
/// Width of one piece's field.
const FIELD_BITS: u32 = X_BITS + Y_BITS;
const FIELD_MASK: u64 = (1 << FIELD_BITS) - 1;
const X_MASK: u64 = (1 << X_BITS) - 1;
const Y_MASK: u64 = (1 << Y_BITS) - 1;

const _: () = {
    assert!(WIDTH <= 1 << X_BITS, "x field too narrow for WIDTH");
    assert!(HEIGHT <= 1 << Y_BITS, "y field too narrow for HEIGHT");
    assert!(
        NUM_PIECES * FIELD_BITS as usize <= u64::BITS as usize,
        "piece fields must fit a u64"
    );
};

/// Comparator pairs of the four-element sorting network.
const SORT_NETWORK: [(usize, usize); 6] = [(0, 1), (2, 3), (0, 3), (1, 2), (0, 1), (2, 3)];

/// Position of every piece, packed into one integer.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board(u64);

impl Board {
    /// All pieces anchored at `(0, 0)`. Only useful as a codec scratch value.
    pub const EMPTY: Self = Self(0);

    /// Builds a canonical board from one location per piece, in catalog order.
    ///
    /// Fails if the count is wrong, a piece leaves the grid, or two pieces
    /// overlap.
    pub fn from_locations(locations: &[Location]) -> Result<Self, BoardError> {
        if locations.len() != NUM_PIECES {
            return Err(BoardError::WrongPieceCount(locations.len()));
        }

        let mut filled = Occupancy::EMPTY;
        let mut board = Self::EMPTY;
        for (piece, &location) in locations.iter().enumerate() {
            let occupancy = occupancy_of(piece_type(piece), location)
                .ok_or(BoardError::OutOfBounds { piece, location })?;
            if !filled.is_disjoint(occupancy) {
                return Err(BoardError::Overlap { piece, location });
            }
            filled |= occupancy;
            board = board.encode(piece, location);
        }

        Ok(board.canonicalize())
    }

    /// The standard opening layout, canonicalized.
    pub fn default_start() -> Self {
        Self::pack(DEFAULT_START).canonicalize()
    }

    /// Packs one anchor per piece without validating or canonicalizing.
    pub fn pack(locations: [Location; NUM_PIECES]) -> Self {
        locations
            .iter()
            .enumerate()
            .fold(Self::EMPTY, |board, (piece, &location)| {
                board.encode(piece, location)
            })
    }

    /// Unpacks the anchor of every piece.
    pub fn unpack(self) -> [Location; NUM_PIECES] {
        std::array::from_fn(|piece| self.decode(piece))
    }

    /// Raw packed value.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Anchor of `piece`.
    #[inline(always)]
    pub const fn decode(self, piece: usize) -> Location {
        debug_assert!(piece < NUM_PIECES);
        let field = self.0 >> (piece as u32 * FIELD_BITS);
        Location::new(((field >> Y_BITS) & X_MASK) as i32, (field & Y_MASK) as i32)
    }

    /// Replaces the anchor of `piece`, leaving every other field untouched.
    ///
    /// This is the raw codec: the result is neither validated nor
    /// canonicalized. `at` must lie on the grid.
    #[inline(always)]
    pub const fn encode(self, piece: usize, at: Location) -> Self {
        debug_assert!(piece < NUM_PIECES);
        debug_assert!(at.x >= 0 && (at.x as usize) < WIDTH);
        debug_assert!(at.y >= 0 && (at.y as usize) < HEIGHT);
        let shift = piece as u32 * FIELD_BITS;
        let field = ((at.x as u64 & X_MASK) << Y_BITS) | (at.y as u64 & Y_MASK);
        Self((self.0 & !(FIELD_MASK << shift)) | (field << shift))
    }

    /// Sorts every group of interchangeable pieces into reading order.
    ///
    /// Idempotent, and never changes [`Board::total_occupancy`].
    pub fn canonicalize(self) -> Self {
        INTERCHANGEABLE_GROUPS
            .iter()
            .fold(self, |board, &(base, _)| board.sort_group(base))
    }

    /// Runs the sorting network over pieces `base..base + 4`.
    fn sort_group(mut self, base: usize) -> Self {
        for &(a, b) in &SORT_NETWORK {
            let (first, second) = (base + a, base + b);
            let first_at = self.decode(first);
            let second_at = self.decode(second);
            if first_at.reading_order() > second_at.reading_order() {
                self = self.encode(first, second_at).encode(second, first_at);
            }
        }
        self
    }

    pub fn is_canonical(self) -> bool {
        self.canonicalize() == self
    }

    /// Cells covered by `piece`.
    ///
    /// Panics if the piece sits off the grid, which can only happen when a
    /// raw [`Board::encode`] was fed a bad anchor.
    #[inline]
    pub fn piece_occupancy(self, piece: usize) -> Occupancy {
        let location = self.decode(piece);
        occupancy_of(piece_type(piece), location).unwrap_or_else(|| {
            panic!("corrupt board {self:?}: piece {piece} at {location} is off the grid")
        })
    }

    /// Union of every piece's cells.
    pub fn total_occupancy(self) -> Occupancy {
        (0..NUM_PIECES).fold(Occupancy::EMPTY, |filled, piece| {
            filled | self.piece_occupancy(piece)
        })
    }

    /// Cells no piece covers.
    pub fn free_cells(self) -> Occupancy {
        Occupancy::FULL.without(self.total_occupancy())
    }

    /// True when some cell is claimed by two pieces.
    pub fn has_overlap(self) -> bool {
        let claimed: u32 = (0..NUM_PIECES)
            .map(|piece| self.piece_occupancy(piece).count())
            .sum();
        claimed != self.total_occupancy().count()
    }

    /// Directions each piece can slide one step in.
    pub fn legal_moves(self) -> [MoveSet; NUM_PIECES] {
        let filled = self.total_occupancy();
        std::array::from_fn(|piece| self.piece_moves(piece, filled))
    }

    /// Legal directions for one piece, given the board's total occupancy.
    fn piece_moves(self, piece: usize, filled: Occupancy) -> MoveSet {
        let shape = piece_type(piece);
        let location = self.decode(piece);
        let rest = filled.without(self.piece_occupancy(piece));

        DIRECTIONS
            .iter()
            .fold(MoveSet::EMPTY, |moves, &direction| {
                match occupancy_of(shape, direction.transform(location)) {
                    Some(target) if target.is_disjoint(rest) => moves.with(direction),
                    _ => moves,
                }
            })
    }

    /// Whether `mv` is currently legal.
    pub fn can_move(self, mv: PieceMove) -> bool {
        mv.piece < NUM_PIECES
            && self
                .piece_moves(mv.piece, self.total_occupancy())
                .contains(mv.direction)
    }

    /// Applies a move already known to be legal and canonicalizes the result.
    ///
    /// Piece indices of interchangeable pieces may be reassigned by the
    /// canonicalization.
    #[inline]
    pub fn apply_move(self, mv: PieceMove) -> Self {
        debug_assert!(self.can_move(mv), "illegal move {mv} on {self:?}");
        let to = mv.direction.transform(self.decode(mv.piece));
        self.encode(mv.piece, to).canonicalize()
    }

    /// Applies `mv` after checking it is legal.
    pub fn try_apply_move(self, mv: PieceMove) -> Result<Self, BoardError> {
        if mv.piece >= NUM_PIECES {
            return Err(BoardError::UnknownPiece(mv.piece));
        }
        if !self.can_move(mv) {
            return Err(BoardError::IllegalMove(mv));
        }
        Ok(self.apply_move(mv))
    }

    /// Plays a sequence of moves, stopping at the first illegal one.
    pub fn replay(self, moves: &[PieceMove]) -> Result<Self, BoardError> {
        moves
            .iter()
            .try_fold(self, |board, &mv| board.try_apply_move(mv))
    }

    /// Every legal move from this board and the canonical board it leads to,
    /// ordered by piece index, then direction.
    pub fn successors(self) -> impl Iterator<Item = (PieceMove, Board)> {
        self.legal_moves()
            .into_iter()
            .enumerate()
            .flat_map(move |(piece, moves)| {
                moves.iter().map(move |direction| {
                    let mv = PieceMove::new(piece, direction);
                    (mv, self.apply_move(mv))
                })
            })
    }

    /// Index of the piece covering `(x, y)`, if any.
    pub fn piece_at(self, x: usize, y: usize) -> Option<usize> {
        (0..NUM_PIECES).find(|&piece| self.piece_occupancy(piece).get(x, y))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:#x})", self.0)
    }
}

/// One row per line, each cell showing the covering piece's index or `.`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        grid::render(f, |x, y| match self.piece_at(x, y) {
            Some(piece) => char::from(b'0' + piece as u8),
            None => '.',
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;
    use crate::pieces::{BIG_SQUARE_PIECE, HORIZONTAL_PIECE};

    fn loc(x: i32, y: i32) -> Location {
        Location::new(x, y)
    }

    #[test]
    fn test_field_layout() {
        assert_eq!(Board::EMPTY.encode(0, loc(0, 1)).bits(), 1);
        assert_eq!(Board::EMPTY.encode(0, loc(1, 0)).bits(), 8);
        assert_eq!(Board::EMPTY.encode(1, loc(0, 1)).bits(), 1 << FIELD_BITS);
        assert_eq!(
            Board::EMPTY.encode(9, loc(3, 4)).bits(),
            0b11100 << (9 * FIELD_BITS)
        );
    }

    #[test]
    fn test_encode_decode_leaves_neighbours_alone() {
        let board = Board::pack(DEFAULT_START);
        let moved = board.encode(4, loc(2, 0));
        assert_eq!(moved.decode(4), loc(2, 0));
        for piece in (0..NUM_PIECES).filter(|&p| p != 4) {
            assert_eq!(moved.decode(piece), board.decode(piece));
        }
        assert_eq!(board.unpack(), DEFAULT_START);
    }

    #[test]
    fn test_default_start_encoding() {
        assert_eq!(Board::pack(DEFAULT_START).bits(), 346_073_444_798_852);
        assert_eq!(Board::default_start().bits(), 345_341_152_874_884);
    }

    #[test]
    fn test_canonical_order() {
        let start = Board::default_start();
        assert_eq!(
            start.unpack(),
            [
                loc(0, 4),
                loc(1, 4),
                loc(2, 4),
                loc(3, 4),
                loc(1, 3),
                loc(0, 0),
                loc(3, 0),
                loc(0, 2),
                loc(3, 2),
                loc(1, 1),
            ]
        );
        assert!(start.is_canonical());
    }

    #[test]
    fn test_canonicalize_sorts_every_permutation() {
        let smalls = [loc(3, 4), loc(0, 0), loc(2, 1), loc(1, 3)];
        let expected = Board::pack(DEFAULT_START)
            .encode(0, loc(0, 0))
            .encode(1, loc(2, 1))
            .encode(2, loc(1, 3))
            .encode(3, loc(3, 4));

        let mut order = [0, 1, 2, 3];
        for _ in 0..24 {
            let board = (0..4).fold(Board::pack(DEFAULT_START), |board, slot| {
                board.encode(slot, smalls[order[slot]])
            });
            assert_eq!(board.canonicalize().unpack()[..4], expected.unpack()[..4]);
            next_permutation(&mut order);
        }
    }

    fn next_permutation(order: &mut [usize; 4]) {
        let Some(i) = (0..3).rev().find(|&i| order[i] < order[i + 1]) else {
            order.reverse();
            return;
        };
        let j = (i + 1..4).rev().find(|&j| order[j] > order[i]).unwrap();
        order.swap(i, j);
        order[i + 1..].reverse();
    }

    #[test]
    fn test_canonicalize_is_idempotent_and_keeps_occupancy() {
        let raw = Board::pack(DEFAULT_START);
        let once = raw.canonicalize();
        assert_eq!(once.canonicalize(), once);
        assert_eq!(once.total_occupancy(), raw.total_occupancy());
        assert_ne!(raw, once);
    }

    #[test]
    fn test_default_occupancy() {
        let filled = Board::default_start().total_occupancy();
        assert_eq!(filled.count(), 18);
        let free = Board::default_start().free_cells();
        assert_eq!(free, Occupancy::cell(1, 0) | Occupancy::cell(2, 0));
        assert!(free.is_disjoint(filled));
        assert!(!Board::default_start().has_overlap());
    }

    #[test]
    fn test_from_locations_rejects_bad_layouts() {
        assert_eq!(
            Board::from_locations(&DEFAULT_START[..3]),
            Err(BoardError::WrongPieceCount(3))
        );

        let mut off_grid = DEFAULT_START;
        off_grid[HORIZONTAL_PIECE] = loc(3, 0);
        assert_eq!(
            Board::from_locations(&off_grid),
            Err(BoardError::OutOfBounds {
                piece: HORIZONTAL_PIECE,
                location: loc(3, 0)
            })
        );

        let mut overlapping = DEFAULT_START;
        overlapping[BIG_SQUARE_PIECE] = loc(1, 2);
        assert_eq!(
            Board::from_locations(&overlapping),
            Err(BoardError::Overlap {
                piece: BIG_SQUARE_PIECE,
                location: loc(1, 2)
            })
        );

        assert_eq!(
            Board::from_locations(&DEFAULT_START),
            Ok(Board::default_start())
        );
    }

    #[test]
    fn test_only_big_square_moves_at_start() {
        let moves = Board::default_start().legal_moves();
        let mut expected = [MoveSet::EMPTY; NUM_PIECES];
        expected[BIG_SQUARE_PIECE] = MoveSet::of(&[Direction::Up]);
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_legal_moves_after_opening() {
        let board = Board::default_start()
            .apply_move(PieceMove::new(BIG_SQUARE_PIECE, Direction::Up))
            .apply_move(PieceMove::new(HORIZONTAL_PIECE, Direction::Up));
        let up = MoveSet::of(&[Direction::Up]);
        let mut expected = [MoveSet::EMPTY; NUM_PIECES];
        expected[1] = up;
        expected[2] = up;
        expected[HORIZONTAL_PIECE] = MoveSet::of(&[Direction::Down]);
        assert_eq!(board.legal_moves(), expected);

        // the small block from (1,4) moves up and is re-sorted to slot 0
        let board = board.apply_move(PieceMove::new(1, Direction::Up));
        assert_eq!(board.decode(0), loc(1, 3));
        let mut expected = [MoveSet::EMPTY; NUM_PIECES];
        expected[0] = MoveSet::of(&[Direction::Down, Direction::Right]);
        expected[1] = MoveSet::of(&[Direction::Right]);
        expected[2] = MoveSet::of(&[Direction::Up, Direction::Left]);
        assert_eq!(board.legal_moves(), expected);
    }

    #[test]
    fn test_move_then_reverse_restores_occupancy() {
        let board = Board::default_start()
            .apply_move(PieceMove::new(BIG_SQUARE_PIECE, Direction::Up))
            .apply_move(PieceMove::new(HORIZONTAL_PIECE, Direction::Up))
            .apply_move(PieceMove::new(1, Direction::Up));

        for (mv, next) in board.successors() {
            let landed = mv.direction.transform(board.decode(mv.piece));
            let slot = (0..NUM_PIECES)
                .find(|&p| piece_type(p) == piece_type(mv.piece) && next.decode(p) == landed)
                .unwrap();
            let back = next.apply_move(PieceMove::new(slot, mv.direction.reverse()));
            assert_eq!(back.total_occupancy(), board.total_occupancy());
            assert_eq!(back, board);
        }
    }

    #[test]
    fn test_try_apply_move_rejects_illegal() {
        let start = Board::default_start();
        let blocked = PieceMove::new(0, Direction::Up);
        assert_eq!(
            start.try_apply_move(blocked),
            Err(BoardError::IllegalMove(blocked))
        );
        assert_eq!(
            start.try_apply_move(PieceMove::new(NUM_PIECES, Direction::Up)),
            Err(BoardError::UnknownPiece(NUM_PIECES))
        );
        let off_grid = PieceMove::new(5, Direction::Left);
        assert_eq!(
            start.try_apply_move(off_grid),
            Err(BoardError::IllegalMove(off_grid))
        );
    }

    #[test]
    fn test_replay_stops_at_first_illegal_move() {
        let start = Board::default_start();
        let opening = [
            PieceMove::new(BIG_SQUARE_PIECE, Direction::Up),
            PieceMove::new(HORIZONTAL_PIECE, Direction::Up),
        ];
        let played = start.replay(&opening).unwrap();
        assert_eq!(played.decode(HORIZONTAL_PIECE), loc(1, 2));

        let bad = PieceMove::new(BIG_SQUARE_PIECE, Direction::Up);
        assert_eq!(
            start.replay(&[opening[0], bad]),
            Err(BoardError::IllegalMove(bad))
        );
    }

    #[test]
    fn test_render_default_start() {
        insta::assert_snapshot!(Board::default_start().to_string(), @r"
        5..6
        5996
        7998
        7448
        0123
        ");
    }
}
