//! Move generation: single steps plus chained jumps.

use std::collections::{BTreeSet, VecDeque};

use tracing::instrument;

use crate::board::Board;
use crate::cell::{Cell, DIRECTIONS};

/// Returns every cell the piece on `source` may move to this turn.
///
/// A piece steps to an orthogonally adjacent empty cell, or jumps over an
/// orthogonally adjacent piece of either colour onto the empty cell directly
/// behind it. Jumps chain from each landing cell in any direction.
/// `source` itself is never part of the result.
#[instrument(level = "trace", skip(board))]
pub fn available_moves(board: &Board, source: Cell) -> BTreeSet<Cell> {
    let mut cells = step_moves(board, source);
    cells.extend(jump_moves(board, source));
    cells
}

/// Adjacent empty cells.
pub fn step_moves(board: &Board, source: Cell) -> BTreeSet<Cell> {
    DIRECTIONS
        .iter()
        .map(|&offset| source + offset)
        .filter(|&cell| board.is_empty(cell))
        .collect()
}

/// Landing cells of every jump chain starting at `source`, by breadth-first
/// flood fill.
pub fn jump_moves(board: &Board, source: Cell) -> BTreeSet<Cell> {
    let mut cells = BTreeSet::new();
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::from([source]);

    while let Some(node) = queue.pop_front() {
        if !visited.insert(node) {
            continue;
        }

        for offset in DIRECTIONS {
            let over = node + offset;
            let landing = node + offset * 2;
            if board.is_occupied(over) && board.is_empty(landing) {
                cells.insert(landing);
                queue.push_back(landing);
            }
        }
    }

    // The mover's own cell is occupied, so it can only reappear as a landing
    // cell if the board was handed in with `source` empty.
    cells.remove(&source);
    cells
}

/// True iff moving the piece on `from` to `to` is legal.
pub fn is_legal_move(board: &Board, from: Cell, to: Cell) -> bool {
    board.is_empty(to) && available_moves(board, from).contains(&to)
}
