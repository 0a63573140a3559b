use std::fmt;

use tracing::{instrument, trace};

use crate::cell::{BOARD_SIZE, Cell, NUM_CELLS};
use crate::types::{Occupancy, Player};

/// Corner blocks of the starting position, as `(x range, y range)`.
const WHITE_CORNER: (std::ops::Range<i32>, std::ops::Range<i32>) = (5..8, 0..3);
const BLACK_CORNER: (std::ops::Range<i32>, std::ops::Range<i32>) = (0..3, 5..8);

/// Corners board: one occupancy value per cell, linearized as `x + y * 8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Occupancy; NUM_CELLS],
}

impl Board {
    /// Creates the initial board:
    /// white fills x=5..7, y=0..2 and black fills x=0..2, y=5..7.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (player, (xs, ys)) in [(Player::White, WHITE_CORNER), (Player::Black, BLACK_CORNER)] {
            for x in xs {
                for y in ys.clone() {
                    board.place(Cell::new(x, y), player.piece());
                }
            }
        }
        board
    }

    /// A board with no pieces.
    pub fn empty() -> Self {
        Self {
            cells: [Occupancy::Empty; NUM_CELLS],
        }
    }

    pub fn in_bounds(cell: Cell) -> bool {
        cell.in_bounds()
    }

    /// Returns the occupancy of `cell`.
    ///
    /// # Panics
    /// If `cell` is off the board.
    pub fn occupancy(&self, cell: Cell) -> Occupancy {
        assert!(cell.in_bounds(), "cell {cell:?} is off the board");
        self.cells[cell.index()]
    }

    /// Like [`Board::occupancy`] but `None` off the board.
    pub fn get(&self, cell: Cell) -> Option<Occupancy> {
        cell.in_bounds().then(|| self.cells[cell.index()])
    }

    /// True iff `cell` is on the board and holds no piece.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell) == Some(Occupancy::Empty)
    }

    /// True iff `cell` is on the board and holds a piece of either colour.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        matches!(self.get(cell), Some(Occupancy::White | Occupancy::Black))
    }

    /// Sets the occupancy of `cell`. Used for setting up positions.
    ///
    /// # Panics
    /// If `cell` is off the board.
    pub fn place(&mut self, cell: Cell, occupancy: Occupancy) {
        assert!(cell.in_bounds(), "cell {cell:?} is off the board");
        self.cells[cell.index()] = occupancy;
    }

    /// Exchanges the contents of two cells. A committed move is a swap of
    /// its endpoints; the cells jumped over are untouched.
    ///
    /// # Panics
    /// If either cell is off the board.
    #[instrument(level = "debug", skip(self))]
    pub fn swap(&mut self, a: Cell, b: Cell) {
        assert!(a.in_bounds() && b.in_bounds(), "swap {a:?} <-> {b:?} leaves the board");
        self.cells.swap(a.index(), b.index());
        trace!("swapped cells");
    }

    /// Number of pieces owned by `player`.
    pub fn count(&self, player: Player) -> u8 {
        let piece = player.piece();
        self.cells.iter().filter(|&&c| c == piece).count() as u8
    }

    /// Returns `(white_count, black_count)`.
    pub fn counts(&self) -> (u8, u8) {
        (self.count(Player::White), self.count(Player::Black))
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=white, 2=black.
    pub fn to_array(&self) -> [u8; NUM_CELLS] {
        let mut board = [0u8; NUM_CELLS];
        for (out, cell) in board.iter_mut().zip(self.cells.iter()) {
            *out = cell.to_u8();
        }
        board
    }

    /// Iterates over occupied cells in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Cell, Player)> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, occupancy)| {
            let owner = occupancy.owner()?;
            Cell::from_index(index).map(|cell| (cell, owner))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Row `y = 0` first, `W`/`B` for pieces and `.` for empty cells.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let symbol = match self.cells[Cell::new(x, y).index()] {
                    Occupancy::Empty => '.',
                    Occupancy::White => 'W',
                    Occupancy::Black => 'B',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_board_has_nine_pieces_per_side_in_opposite_corners() {
        let board = Board::new();

        assert_eq!(board.counts(), (9, 9));
        assert_eq!(board.occupancy(Cell::new(7, 0)), Occupancy::White);
        assert_eq!(board.occupancy(Cell::new(5, 2)), Occupancy::White);
        assert_eq!(board.occupancy(Cell::new(0, 7)), Occupancy::Black);
        assert_eq!(board.occupancy(Cell::new(2, 5)), Occupancy::Black);
        assert!(board.is_empty(Cell::new(4, 4)));
        assert!(board.is_empty(Cell::new(0, 0)));
    }

    #[test]
    fn is_empty_is_false_off_the_board() {
        let board = Board::empty();

        assert!(!board.is_empty(Cell::new(-1, 0)));
        assert!(!board.is_empty(Cell::new(0, 8)));
        assert!(!board.is_occupied(Cell::new(8, 8)));
        assert_eq!(board.get(Cell::new(8, 0)), None);
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn occupancy_off_the_board_panics() {
        Board::new().occupancy(Cell::new(8, 3));
    }

    #[test]
    fn swap_exchanges_endpoints_and_conserves_counts() {
        let mut board = Board::new();
        let before = board;

        board.swap(Cell::new(5, 2), Cell::new(5, 3));

        assert_eq!(board.occupancy(Cell::new(5, 2)), Occupancy::Empty);
        assert_eq!(board.occupancy(Cell::new(5, 3)), Occupancy::White);
        assert_eq!(board.counts(), before.counts());
        let changed = Cell::scan_order()
            .filter(|&c| board.occupancy(c) != before.occupancy(c))
            .count();
        assert_eq!(changed, 2);
    }

    #[test]
    fn to_array_and_display_encode_cells() {
        let mut board = Board::empty();
        board.place(Cell::new(1, 0), Occupancy::White);
        board.place(Cell::new(0, 1), Occupancy::Black);

        let cells = board.to_array();
        assert_eq!(cells[1], 1);
        assert_eq!(cells[8], 2);
        assert_eq!(cells[0], 0);

        let text = board.to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(".W......"));
        assert_eq!(lines.next(), Some("B......."));
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn pieces_lists_every_occupied_cell() {
        let board = Board::new();
        let pieces: Vec<_> = board.pieces().collect();

        assert_eq!(pieces.len(), 18);
        assert!(pieces.contains(&(Cell::new(6, 1), Player::White)));
        assert!(pieces.contains(&(Cell::new(1, 6), Player::Black)));
    }
}
