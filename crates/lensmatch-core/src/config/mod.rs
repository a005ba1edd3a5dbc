//! Configuration management for Lensmatch.
//!
//! Configuration is loaded from the platform config directory with defaults
//! for every field, so an empty or partial file is valid.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Lensmatch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ranking engine tuning
    pub ranking: RankingConfig,

    /// Catalog source
    pub catalog: CatalogConfig,

    /// External classifier
    pub classifier: ClassifierConfig,

    /// Upload limits
    pub upload: UploadConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.lensmatch.lensmatch/config.toml
    /// - Linux: ~/.config/lensmatch/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\lensmatch\config\config.toml
    ///
    /// Falls back to ~/.lensmatch/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "lensmatch", "lensmatch")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".lensmatch").join("config.toml")
            })
    }

    /// Get the resolved catalog path (with ~ expansion).
    pub fn catalog_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.catalog.path);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ranking.default_limit, 8);
        assert_eq!(config.ranking.min_score, 100.0);
        assert_eq!(config.ranking.rank_weights, vec![5.0, 4.0, 3.0]);
        assert_eq!(config.ranking.rank_weight_floor, 2.0);
        assert_eq!(config.classifier.provider, ClassifierProvider::Sidecar);
        assert_eq!(config.upload.max_file_size_mb, 10);
    }

    #[test]
    fn test_default_field_weights() {
        let ranking = RankingConfig::default();
        assert_eq!(ranking.tag_weights.exact, 100.0);
        assert_eq!(ranking.tag_weights.partial, 10.0);
        assert_eq!(ranking.name_weights.exact, 150.0);
        assert_eq!(ranking.name_weights.partial, 15.0);
        assert_eq!(ranking.category_weight, 5.0);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[ranking]"));
        assert!(toml.contains("[classifier]"));
        assert!(toml.contains("[ranking.tag_weights]"));
    }

    #[test]
    fn test_toml_round_trip_keeps_defaults() {
        let toml = Config::default().to_toml().unwrap();
        let parsed = Config::from_toml(&toml).unwrap();
        assert_eq!(parsed.ranking, RankingConfig::default());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = Config::from_toml(
            r#"
            [ranking]
            min_score = 50.0

            [classifier]
            provider = "http"
            endpoint = "http://localhost:9000/predict"
            "#,
        )
        .unwrap();
        assert_eq!(config.ranking.min_score, 50.0);
        assert_eq!(config.ranking.default_limit, 8);
        assert_eq!(config.classifier.provider, ClassifierProvider::Http);
        assert_eq!(config.classifier.top_k, 5);
    }

    #[test]
    fn test_invalid_toml_value_rejected() {
        let err = Config::from_toml("[ranking]\ndefault_limit = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\npath = \"/srv/catalog.json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.catalog_path(), PathBuf::from("/srv/catalog.json"));
    }

    #[test]
    fn test_catalog_path_expands_tilde() {
        let config = Config::default();
        let path = config.catalog_path();
        assert!(path.ends_with(".lensmatch/catalog.json"));

        let mut config = Config::default();
        config.catalog.path = "~/shop/catalog.json".to_string();
        let expected = shellexpand::tilde("~/shop/catalog.json").into_owned();
        assert_eq!(config.catalog_path(), PathBuf::from(expected));
    }
}
