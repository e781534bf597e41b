//! # Configuration
//!
//! Settings are loaded with [`confique`] from, in priority order:
//!
//! 1. **Environment variables**: `SWING_OUTPUT`, `SWING_LIMIT`, `SWING_TOP`.
//! 2. **Config file**: `swing.toml` in the OS config directory (via `directories`). Optional.
//! 3. **Compiled defaults**.
//!
//! Command-line flags override all of these. Configuration only changes presentation,
//! never catalog content.
//!
//! | Key      | Default | Description                                   |
//! |----------|---------|-----------------------------------------------|
//! | `output` | `term`  | Output mode: `term`, `text` or `json`         |
//! | `limit`  | `25`    | Maximum hits shown by `search` and `similar`  |
//! | `top`    | `10`    | Entries in each `stats --detailed` list       |

use crate::error::Result;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "swing.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SwingConfig {
    /// Output mode: "term", "text" or "json"
    #[config(env = "SWING_OUTPUT", default = "term")]
    pub output: String,

    /// Maximum number of results shown
    #[config(env = "SWING_LIMIT", default = 25)]
    pub limit: usize,

    /// Size of the composer and performer rankings in detailed stats
    #[config(env = "SWING_TOP", default = 10)]
    pub top: usize,
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            output: "term".to_string(),
            limit: 25,
            top: 10,
        }
    }
}

impl SwingConfig {
    /// Loads environment, then the user config file if there is one.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path().as_deref())
    }

    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }
}

/// `swing.toml` in the platform config directory, when one can be determined.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "swing").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SwingConfig::default();
        assert_eq!(config.output, "term");
        assert_eq!(config.limit, 25);
        assert_eq!(config.top, 10);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "limit = 5\noutput = \"json\"\n").unwrap();

        let config = SwingConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.limit, 5);
        assert_eq!(config.output, "json");
        assert_eq!(config.top, 10);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SwingConfig::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, SwingConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "limit = \"many\"\n").unwrap();
        assert!(SwingConfig::load_from(Some(&path)).is_err());
    }
}
