//! Directory defaults
//!
//! The configuration file follows the XDG Base Directory specification using
//! the `xdg` crate (`XDG_CONFIG_HOME` defaults to ~/.config). Global hooks are
//! anchored on the home directory.

use hookstack_core::CONFIG_DIR;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

/// Get the hookstack config directory
///
/// Returns `$XDG_CONFIG_HOME/hookstack` or `~/.config/hookstack`
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    BaseDirectories::with_prefix("hookstack").get_config_home()
}

/// Get the default config file path
///
/// Returns `$XDG_CONFIG_HOME/hookstack/config.toml`
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Get the default global hooks root for a home directory
///
/// Returns `<home>/.hookstack/hooks/global`
#[must_use]
pub fn default_global_hooks_dir(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR).join("hooks").join("global")
}

/// Home directory of the invoking user
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    ::dirs::home_dir()
}

/// Expand a leading `~` to the home directory
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    // Early return for common case (no tilde) - avoids string conversion
    if !path.as_os_str().as_encoded_bytes().starts_with(b"~") {
        return path.to_path_buf();
    }

    let Some(home) = home_dir() else {
        return path.to_path_buf();
    };

    match path.to_str() {
        Some("~") => home,
        Some(s) if s.starts_with("~/") => home.join(&s[2..]),
        _ => path.to_path_buf(),
    }
}
