//! Theme configuration: `config.toml`.
//!
//! | Key            | Type   | Default                       |
//! |----------------|--------|-------------------------------|
//! | `default-seed` | string | `#3FBCA5`                     |
//! | `style-id`     | string | `dynamic-color-vars`          |
//! | `engine`       | string | `auto` (`auto` / `fallback`)  |
//! | `store-path`   | path   | `<data dir>/tint/state.toml`  |
//! | `output`       | path   | none (stdout)                 |
//!
//! Every key is optional; unknown keys are rejected so typos surface.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::EngineSelection;
use crate::scheme::DEFAULT_SEED;
use crate::store::FileStore;
use crate::tokens::STYLE_ID;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ThemeConfig {
    /// Seed used when none is given or persisted. Malformed values fall back
    /// to the brand color at resolution time.
    pub default_seed: String,
    /// Id the published style block is installed under.
    pub style_id: String,
    pub engine: EngineSelection,
    /// State file for the seed and mode; see [`ThemeConfig::store_path`].
    pub store_path: Option<PathBuf>,
    /// Where the CLI writes the style sheet; stdout when unset.
    pub output: Option<PathBuf>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_seed: DEFAULT_SEED.to_owned(),
            style_id: STYLE_ID.to_owned(),
            engine: EngineSelection::default(),
            store_path: None,
            output: None,
        }
    }
}

impl ThemeConfig {
    /// Parse configuration text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed text or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `<config dir>/tint/config.toml` when it exists, defaults
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or parsed.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tint").join("config.toml"))
    }

    /// Configured state file, or the platform default.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(FileStore::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_text_is_default() {
        assert_eq!(ThemeConfig::from_toml_str("").unwrap(), ThemeConfig::default());
    }

    #[test]
    fn defaults() {
        let config = ThemeConfig::default();
        assert_eq!(config.default_seed, "#3FBCA5");
        assert_eq!(config.style_id, "dynamic-color-vars");
        assert_eq!(config.engine, EngineSelection::Auto);
        assert_eq!(config.output, None);
    }

    #[test]
    fn full_config() {
        let config = ThemeConfig::from_toml_str(
            r##"
default-seed = "#6750A4"
style-id = "brand-vars"
engine = "fallback"
store-path = "/var/lib/tint/state.toml"
output = "public/theme.css"
"##,
        )
        .unwrap();

        assert_eq!(
            config,
            ThemeConfig {
                default_seed: "#6750A4".to_owned(),
                style_id: "brand-vars".to_owned(),
                engine: EngineSelection::Fallback,
                store_path: Some(PathBuf::from("/var/lib/tint/state.toml")),
                output: Some(PathBuf::from("public/theme.css")),
            }
        );
        assert_eq!(config.store_path(), PathBuf::from("/var/lib/tint/state.toml"));
    }

    #[test]
    fn unknown_keys_and_engines_are_rejected() {
        assert!(ThemeConfig::from_toml_str("seed = \"#000000\"").is_err());
        assert!(ThemeConfig::from_toml_str("engine = \"hct\"").is_err());
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "engine = 3\n").unwrap();

        let err = ThemeConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"), "{err}");

        let missing = ThemeConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default-seed = \"#1E88E5\"\n").unwrap();

        let config = ThemeConfig::load(&path).unwrap();
        assert_eq!(config.default_seed, "#1E88E5");
        assert_eq!(config.style_id, STYLE_ID);
    }
}
