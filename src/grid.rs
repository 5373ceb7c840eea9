//! Cell occupancy bitmasks for the 4x5 grid.
//!
//! Bit `y * WIDTH + x` is set when cell `(x, y)` is covered. Placements that
//! would leave the grid have no bitmask at all: [`occupancy_of`] returns
//! `None` for them, which callers must never confuse with an empty mask.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::pieces::{Location, PieceType, GRID_SIZE, HEIGHT, WIDTH};

/// Bitmask with every grid cell set.
const ALL_CELLS: u32 = (1 << GRID_SIZE) - 1;

const _: () = assert!(GRID_SIZE <= 32, "GRID_SIZE must fit a u32 bitmask");

/// Converts in-grid coordinates to a cell index.
#[inline(always)]
pub const fn cell_index(x: usize, y: usize) -> usize {
    y * WIDTH + x
}

/// Set of covered grid cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Occupancy(u32);

impl Occupancy {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(ALL_CELLS);

    /// Mask of a single cell. `(x, y)` must be on the grid.
    #[inline(always)]
    pub const fn cell(x: usize, y: usize) -> Self {
        Self(1 << cell_index(x, y))
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether cell `(x, y)` is covered.
    #[inline(always)]
    pub const fn get(self, x: usize, y: usize) -> bool {
        self.0 & (1 << cell_index(x, y)) != 0
    }

    /// Number of covered cells.
    #[inline(always)]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// True when the two masks share no cell.
    #[inline(always)]
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    /// Removes the cells of `other`, which must be a subset of `self`.
    #[inline(always)]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for Occupancy {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Occupancy {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Cells covered by a piece of type `piece_type` anchored at `anchor`.
///
/// Returns `None` if any covered cell lies outside the grid.
#[inline]
pub fn occupancy_of(piece_type: PieceType, anchor: Location) -> Option<Occupancy> {
    let (width, height) = piece_type.extent();
    if anchor.x < 0 || anchor.y < 0 {
        return None;
    }
    let (x, y) = (anchor.x as usize, anchor.y as usize);
    if x + width > WIDTH || y + height > HEIGHT {
        return None;
    }

    let mut mask = Occupancy::EMPTY;
    for dy in 0..height {
        for dx in 0..width {
            mask |= Occupancy::cell(x + dx, y + dy);
        }
    }
    Some(mask)
}

/// Renders the grid one row per line, asking `cell` for each character.
pub(crate) fn render(f: &mut fmt::Formatter<'_>, cell: impl Fn(usize, usize) -> char) -> fmt::Result {
    for y in 0..HEIGHT {
        let row: String = (0..WIDTH).map(|x| cell(x, y)).collect();
        writeln!(f, "{row}")?;
    }
    Ok(())
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, |x, y| if self.get(x, y) { '#' } else { '.' })
    }
}
