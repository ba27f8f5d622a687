use std::path::PathBuf;

use crate::game::{MoveError, Swap};

/// Errors that can occur while building a board or a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("board dimensions {rows}x{cols} out of range (each must be in 3..=32)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("move limit must be > 0")]
    InvalidMoveLimit,

    #[error("gem kinds must be in 3..=6, got {0}")]
    InvalidPalette(usize),

    #[error("match bonus must be > 0")]
    InvalidBonus,

    #[error("injected board has an empty cell at ({row}, {col})")]
    EmptyCell { row: usize, col: usize },

    #[error("failed to parse board: {0}")]
    Parse(String),

    #[error("no playable board after {attempts} attempts")]
    GenerationExhausted { attempts: usize },
}

/// Errors that can occur while running automated sessions.
#[derive(Debug, thiserror::Error)]
pub enum AutoplayError {
    #[error("{agent} agent proposed illegal swap {swap:?}: {reason}")]
    IllegalSwap {
        agent: String,
        swap: Swap,
        reason: MoveError,
    },

    #[error("{agent} agent found no swap in an ongoing game")]
    NoSwap { agent: String },

    #[error("game setup failed: {0}")]
    Game(#[from] GameError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid game settings: {0}")]
    Game(#[from] GameError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_display() {
        let err = GameError::InvalidDimensions { rows: 2, cols: 8 };
        assert_eq!(
            err.to_string(),
            "board dimensions 2x8 out of range (each must be in 3..=32)"
        );
    }

    #[test]
    fn test_empty_cell_display() {
        let err = GameError::EmptyCell { row: 4, col: 1 };
        assert_eq!(err.to_string(), "injected board has an empty cell at (4, 1)");
    }

    #[test]
    fn test_config_error_wraps_game_error() {
        let err: ConfigError = GameError::InvalidMoveLimit.into();
        assert_eq!(err.to_string(), "invalid game settings: move limit must be > 0");
    }

    #[test]
    fn test_autoplay_error_display() {
        let err = AutoplayError::NoSwap {
            agent: "Greedy".to_string(),
        };
        assert_eq!(err.to_string(), "Greedy agent found no swap in an ongoing game");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("autoplay.games must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: autoplay.games must be > 0"
        );
    }
}
