//! Session configuration.

use serde::Deserialize;
use tracing::instrument;

use crate::error::{CornersError, CornersErrorKind};
use crate::render::CANVAS_SIZE;
use crate::types::Player;

/// Texture paths, relative to the host's asset root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TexturePaths {
    pub board: String,
    pub white: String,
    pub black: String,
    pub select: String,
}

impl Default for TexturePaths {
    fn default() -> Self {
        Self {
            board: "assets/board.png".to_string(),
            white: "assets/white.png".to_string(),
            black: "assets/black.png".to_string(),
            select: "assets/select.png".to_string(),
        }
    }
}

/// Everything a session needs besides its collaborators.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Side of the square canvas in pixels.
    pub canvas_size: f32,
    pub first_player: Player,
    pub textures: TexturePaths,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_size: CANVAS_SIZE,
            first_player: Player::White,
            textures: TexturePaths::default(),
        }
    }
}

impl GameConfig {
    /// Parses and validates a TOML document. Missing keys take defaults.
    #[instrument(skip(text))]
    pub fn from_toml_str(text: &str) -> Result<Self, CornersError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CornersError> {
        if !self.canvas_size.is_finite() || self.canvas_size <= 0.0 {
            return Err(CornersError::new(CornersErrorKind::Config(format!(
                "canvas_size must be a positive number, got {}",
                self.canvas_size
            ))));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();

        assert_eq!(config, GameConfig::default());
        assert_eq!(config.canvas_size, 450.0);
        assert_eq!(config.first_player, Player::White);
        assert_eq!(config.textures.select, "assets/select.png");
    }

    #[test]
    fn overrides_are_applied() {
        let config = GameConfig::from_toml_str(
            r#"
            canvas_size = 800.0
            first_player = "black"

            [textures]
            board = "img/wood.png"
            "#,
        )
        .unwrap();

        assert_eq!(config.canvas_size, 800.0);
        assert_eq!(config.first_player, Player::Black);
        assert_eq!(config.textures.board, "img/wood.png");
        assert_eq!(config.textures.white, "assets/white.png");
    }

    #[test]
    fn non_positive_canvas_is_rejected() {
        let err = GameConfig::from_toml_str("canvas_size = 0.0").unwrap_err();

        assert!(matches!(err.kind, CornersErrorKind::Config(_)));
        assert!(err.to_string().contains("canvas_size"));
    }

    #[test]
    fn unknown_keys_and_players_are_rejected() {
        assert!(GameConfig::from_toml_str("board_size = 10").is_err());
        assert!(GameConfig::from_toml_str("first_player = \"red\"").is_err());
    }
}
