//! Move directions and per-piece move sets.
//!
//! A piece only ever slides one cell at a time in one of four directions.
//! Directions double as bit flags so that all legal directions of a piece
//! fit in a single byte.

use std::fmt;

use crate::pieces::Location;

/// A unit slide of one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// All directions, in the order moves are generated and stored.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// Bit flag of this direction inside a [`MoveSet`].
    #[inline(always)]
    pub const fn flag(self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Down => 1 << 1,
            Direction::Left => 1 << 2,
            Direction::Right => 1 << 3,
        }
    }

    /// Cell offset of a one-step slide. `y` grows downwards.
    #[inline(always)]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Where an anchor ends up after sliding one step.
    ///
    /// The result may be off the grid; the occupancy check rejects it.
    #[inline(always)]
    pub const fn transform(self, from: Location) -> Location {
        let (dx, dy) = self.offset();
        Location::new(from.x + dx, from.y + dy)
    }

    /// The direction that undoes this one.
    pub const fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn glyph(self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Down => '↓',
            Direction::Left => '←',
            Direction::Right => '→',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Set of directions a single piece may slide in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MoveSet(u8);

impl MoveSet {
    pub const EMPTY: Self = Self(0);

    /// Builds a set from a list of directions.
    pub fn of(directions: &[Direction]) -> Self {
        directions
            .iter()
            .fold(Self::EMPTY, |set, &direction| set.with(direction))
    }

    /// Returns a copy of the set with `direction` added.
    #[inline(always)]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.flag())
    }

    #[inline(always)]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.flag() != 0
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Iterates the contained directions in generation order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        DIRECTIONS.into_iter().filter(move |&d| self.contains(d))
    }
}

impl fmt::Display for MoveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Ø");
        }
        for direction in self.iter() {
            write!(f, "{}", direction.glyph())?;
        }
        Ok(())
    }
}
