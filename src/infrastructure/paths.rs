//! Platform directories for configuration and trace data.
//!
//! Resolved through `dirs`, so they follow each platform's conventions
//! (XDG on Linux, `~/Library/Application Support` on macOS, `%APPDATA%` on
//! Windows). When the platform reports no such directory the current
//! directory is used.

use std::path::{Path, PathBuf};

/// Subdirectory name used under every platform directory.
pub const APP_DIR_NAME: &str = "dexview";

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory holding `config.toml`, e.g. `~/.config/dexview`.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Directory holding trace output, e.g. `~/.local/share/dexview`.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Default location of the configuration file.
#[must_use]
pub fn default_config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Expands a leading `~` to the home directory.
///
/// ```
/// use dexview::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/var/log/dex.log"), PathBuf::from("/var/log/dex.log"));
/// if let Some(home) = dirs::home_dir() {
///     assert_eq!(expand_tilde("~/dex.log"), home.join("dex.log"));
/// }
/// ```
#[must_use]
pub fn expand_tilde(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
