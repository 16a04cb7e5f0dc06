//! Driver configuration.
//!
//! Settings are read from a TOML file.  Every key is optional and falls
//! back to its default:
//!
//! ```toml
//! extensions = ["php", "phtml"]
//! respect_gitignore = true
//! include_abstract = true
//! pretty = false
//! ```
//!
//! # Lookup order
//!
//!   1. the path given with `--config` (must exist),
//!   2. `.phpantom-signatures.toml` in the working directory,
//!   3. `phpantom-signatures/config.toml` in the user config directory,
//!   4. built-in defaults.

use std::path::{Path, PathBuf};

use etcetera::{BaseStrategy, choose_base_strategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Name of the per-project config file.
pub const CONFIG_FILE_NAME: &str = ".phpantom-signatures.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// File extensions (without the dot) that are scanned when walking
    /// directories.  Files named explicitly are always scanned.
    pub extensions: Vec<String>,
    /// Honour `.gitignore` / `.ignore` files while walking.
    pub respect_gitignore: bool,
    /// Report body-less (abstract and interface) declarations.
    pub include_abstract: bool,
    /// Pretty-print the JSON output.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: vec!["php".to_string()],
            respect_gitignore: true,
            include_abstract: true,
            pretty: false,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve the configuration following the lookup order above.
    pub fn discover(explicit: Option<&Path>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        let local = working_dir.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load_file(&local);
        }

        if let Some(user) = Self::user_config_path()
            && user.is_file()
        {
            return Self::load_file(&user);
        }

        Ok(Self::default())
    }

    /// Location of the user-level config file, if a home directory exists.
    pub fn user_config_path() -> Option<PathBuf> {
        let strategy = choose_base_strategy().ok()?;
        Some(
            strategy
                .config_dir()
                .join("phpantom-signatures")
                .join("config.toml"),
        )
    }

    /// Whether a file found while walking should be scanned.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}
