use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// One of the two sides.
///
/// White moves first and starts in the upper-right corner block, Black in the
/// lower-left one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    #[default]
    White,
    Black,
}

impl Player {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Occupancy value of a cell holding this player's piece.
    pub fn piece(self) -> Occupancy {
        match self {
            Self::White => Occupancy::White,
            Self::Black => Occupancy::Black,
        }
    }
}

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Occupancy {
    #[default]
    Empty,
    White,
    Black,
}

impl Occupancy {
    /// Returns the owning player, or `None` for an empty cell.
    pub fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::White => Some(Player::White),
            Self::Black => Some(Player::Black),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    /// Wire encoding: 0=empty, 1=white, 2=black.
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::White => 1,
            Self::Black => 2,
        }
    }
}

impl From<Player> for Occupancy {
    fn from(player: Player) -> Self {
        player.piece()
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Cells linearized as `x + y * 8`, encoded with [`Occupancy::to_u8`].
    pub board: Vec<u8>,
    pub active_player: Player,
    pub selected: Option<Cell>,
    pub white_count: u8,
    pub black_count: u8,
}
