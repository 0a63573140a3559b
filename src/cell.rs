use std::ops::{Add, Mul};

use serde::Serialize;

pub const BOARD_SIZE: i32 = 8;
pub const NUM_CELLS: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// The four axis-aligned unit offsets. Diagonals are never used.
pub const DIRECTIONS: [Cell; 4] = [
    Cell::new(-1, 0),
    Cell::new(1, 0),
    Cell::new(0, 1),
    Cell::new(0, -1),
];

/// A board coordinate, or an offset between two coordinates.
///
/// Ordering is lexicographic by `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True iff both components lie in `[0, 8)`.
    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    /// Linear index `x + y * 8`. Caller contract: `self.in_bounds()`.
    #[inline]
    pub fn index(self) -> usize {
        debug_assert!(self.in_bounds(), "cell {self:?} is off the board");
        (self.x + self.y * BOARD_SIZE) as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= NUM_CELLS {
            return None;
        }
        let index = index as i32;
        Some(Self::new(index % BOARD_SIZE, index / BOARD_SIZE))
    }

    /// Every cell in redraw scan order: x outer, y inner.
    pub fn scan_order() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE).flat_map(|x| (0..BOARD_SIZE).map(move |y| Cell::new(x, y)))
    }
}

impl Add for Cell {
    type Output = Cell;

    #[inline]
    fn add(self, rhs: Cell) -> Self::Output {
        Cell::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<i32> for Cell {
    type Output = Cell;

    #[inline]
    fn mul(self, rhs: i32) -> Self::Output {
        Cell::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}
