//! Configuration file
//!
//! hookstack works without any configuration. The optional TOML file only
//! tunes where global hooks live, how long a hook may run and where logs go:
//!
//! ```toml
//! global_dir = "~/.hookstack/hooks/global"
//! timeout = 300
//! log_file = "~/.cache/hookstack.log"
//! ```

use crate::dirs::{default_config_file, expand_tilde};
use hookstack_core::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the global hook tree
    #[serde(default)]
    pub global_dir: Option<PathBuf>,

    /// Per-hook timeout in seconds (0 or unset = wait forever)
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Append debug logs to this file
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Relative paths are resolved against the file's directory and a
    /// leading `~` is expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let mut config = Self::from_toml_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })?;

        if let Some(parent) = path.parent() {
            config.resolve_relative_paths(parent);
        }

        Ok(config)
    }

    /// Load the explicitly named file, or the default file if it exists
    ///
    /// A missing default file yields the default configuration; a missing
    /// explicit file is an error.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_file() {
            Some(path) if path.is_file() => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Parse configuration from a TOML string without path resolution
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Per-hook timeout, with `cli` (if given) taking precedence over the file
    ///
    /// Zero from either place means "no timeout".
    #[must_use]
    pub fn effective_timeout(&self, cli: Option<u64>) -> Option<Duration> {
        cli.or(self.timeout)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    fn resolve_relative_paths(&mut self, base: &Path) {
        for path in [&mut self.global_dir, &mut self.log_file].into_iter().flatten() {
            let expanded = expand_tilde(path);
            *path = if expanded.is_absolute() {
                expanded
            } else {
                base.join(expanded)
            };
        }
    }
}
