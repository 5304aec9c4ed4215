//! Command configuration.
//!
//! Settings are read from a TOML file.  The first file found wins:
//!
//!   1. an explicit `--config <PATH>`
//!   2. `.phpantom-deduce.toml` in the working directory
//!   3. `phpantom/deduce.toml` in the user's configuration directory
//!
//! ```toml
//! # Symbol index dump used when --index is not given.
//! index = "var/phpantom-index.json"
//! # Default log filter; PHPANTOM_LOG overrides it.
//! log_level = "debug"
//! ```
//!
//! A relative `index` path is taken relative to the file it appears in.

use std::path::{Path, PathBuf};

use etcetera::BaseStrategy;
use serde::Deserialize;
use thiserror::Error;

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = ".phpantom-deduce.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default symbol index dump.
    pub index: Option<PathBuf>,
    /// Default `tracing` filter directive (e.g. `"debug"`).
    pub log_level: Option<String>,
}

impl Config {
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Config = toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        })?;

        if let Some(index) = config.index.take() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.index = Some(if index.is_relative() {
                base.join(index)
            } else {
                index
            });
        }
        Ok(config)
    }

    /// Load the configuration that applies to `working_dir`.
    ///
    /// An explicit path must exist.  Discovered files are optional; when
    /// none is found the defaults are used.
    pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }
        match discover_config_path(working_dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using config file");
                Self::load_from_path(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

/// Find the configuration file for `working_dir`, if any.
pub fn discover_config_path(working_dir: &Path) -> Option<PathBuf> {
    let project = working_dir.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }
    user_config_path().filter(|p| p.is_file())
}

/// `<config dir>/phpantom/deduce.toml` for the current user.
fn user_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("phpantom").join("deduce.toml"))
}

// ─── Tests ──────────────────────────────────────────────────────────────────
