use std::path::Path;

use log::warn;

use crate::autoplay::AutoplayConfig;
use crate::error::ConfigError;
use crate::game::GameConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub autoplay: AutoplayConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;

        if self.autoplay.games == 0 {
            return Err(ConfigError::Validation(
                "autoplay.games must be > 0".into(),
            ));
        }
        if self.autoplay.log_interval == 0 {
            return Err(ConfigError::Validation(
                "autoplay.log_interval must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AgentKind;
    use crate::error::GameError;
    use crate::game::GameMode;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_default_game_settings() {
        let game = AppConfig::default().game;
        assert_eq!((game.rows, game.cols), (8, 8));
        assert_eq!(game.gem_kinds, 6);
        assert_eq!(game.move_limit, 20);
        assert_eq!(game.match_bonus, 3);
        assert_eq!(game.mode, GameMode::TwoPlayer);
        assert!(!game.cascade);
        assert_eq!(game.seed, None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
move_limit = 30
mode = "single-player"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.move_limit, 30);
        assert_eq!(config.game.mode, GameMode::SinglePlayer);
        // Other fields should be defaults
        assert_eq!(config.game.rows, 8);
        assert_eq!(config.autoplay.games, 100);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_autoplay_agents_parse() {
        let toml_str = r#"
[autoplay]
player_one = "random"
player_two = "greedy"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.autoplay.player_one, AgentKind::Random);
        assert_eq!(config.autoplay.player_two, AgentKind::Greedy);
    }

    #[test]
    fn test_validation_rejects_zero_moves() {
        let mut config = AppConfig::default();
        config.game.move_limit = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Game(GameError::InvalidMoveLimit))
        ));
    }

    #[test]
    fn test_validation_rejects_small_board() {
        let mut config = AppConfig::default();
        config.game.cols = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_palette_size() {
        let mut config = AppConfig::default();
        config.game.gem_kinds = 7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_games() {
        let mut config = AppConfig::default();
        config.autoplay.games = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game.move_limit, 20);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[game]
rows = 6
seed = 99
cascade = true
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.game.rows, 6);
        assert_eq!(config.game.seed, Some(99));
        assert!(config.game.cascade);
        // Others are defaults
        assert_eq!(config.game.cols, 8);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[game]\nmatch_bonus = 0\n").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Game(GameError::InvalidBonus))
        ));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[game\nrows = ").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, AppConfig::default());
        config.validate().expect("roundtripped config should be valid");
    }
}
