use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::board::Board;
use crate::cell::Cell;
use crate::moves::available_moves;
use crate::types::{GameState, Occupancy, Player};

/// Which piece, if any, the active player has picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    /// `next` is the player who takes over once this piece moves.
    Selected { cell: Cell, next: Player },
}

impl Selection {
    pub fn cell(self) -> Option<Cell> {
        match self {
            Self::None => None,
            Self::Selected { cell, .. } => Some(cell),
        }
    }
}

/// Result of pressing a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// The pressed cell is now the selected piece.
    Selected(Cell),
    /// The selected piece moved and the turn passed.
    Moved { from: Cell, to: Cell },
    /// Nothing changed.
    Ignored,
}

/// Board plus turn state for one session.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active_player: Player,
    selection: Selection,
}

impl Game {
    pub fn new(first_player: Player) -> Self {
        Self::from_board(Board::new(), first_player)
    }

    pub fn from_board(board: Board, active_player: Player) -> Self {
        Self {
            board,
            active_player,
            selection: Selection::None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_player(&self) -> Player {
        self.active_player
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_cell(&self) -> Option<Cell> {
        self.selection.cell()
    }

    /// Legal targets of the selected piece, recomputed on every call.
    pub fn targets(&self) -> BTreeSet<Cell> {
        self.selected_cell()
            .map(|cell| available_moves(&self.board, cell))
            .unwrap_or_default()
    }

    /// Applies one press on `cell`.
    ///
    /// - The active player's piece becomes the selection, replacing any
    ///   earlier one.
    /// - An empty cell among the selected piece's targets completes the
    ///   move and hands the turn over.
    /// - Anything else is ignored.
    ///
    /// Off-board cells are ignored.
    #[instrument(skip(self), fields(active = ?self.active_player))]
    pub fn press(&mut self, cell: Cell) -> PressOutcome {
        let Some(occupancy) = self.board.get(cell) else {
            return PressOutcome::Ignored;
        };

        match (occupancy, self.selection) {
            (Occupancy::Empty, Selection::None) => PressOutcome::Ignored,
            (Occupancy::Empty, Selection::Selected { cell: from, next }) => {
                if !available_moves(&self.board, from).contains(&cell) {
                    debug!(?from, to = ?cell, "target not reachable");
                    return PressOutcome::Ignored;
                }
                self.board.swap(from, cell);
                self.selection = Selection::None;
                self.active_player = next;
                debug!(?from, to = ?cell, next = ?next, "move committed");
                PressOutcome::Moved { from, to: cell }
            }
            (piece, _) if piece.owner() == Some(self.active_player) => {
                self.selection = Selection::Selected {
                    cell,
                    next: self.active_player.opponent(),
                };
                debug!("piece selected");
                PressOutcome::Selected(cell)
            }
            _ => PressOutcome::Ignored,
        }
    }

    pub fn to_game_state(&self) -> GameState {
        let (white_count, black_count) = self.board.counts();
        GameState {
            board: self.board.to_array().to_vec(),
            active_player: self.active_player,
            selected: self.selected_cell(),
            white_count,
            black_count,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_board_for_test(&mut self, board: Board, active_player: Player) {
        self.board = board;
        self.active_player = active_player;
        self.selection = Selection::None;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Player::White)
    }
}
