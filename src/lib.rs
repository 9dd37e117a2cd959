//! dexview: a terminal catalog viewer for the PokéAPI.
//!
//! dexview browses the catalog as a paginated card grid and provides:
//! - Server-side pagination over the full catalog
//! - Type filtering with client-side pagination over the resolved members
//! - Search and autocomplete over the resolved set
//! - A detail view with stats, size and types
//! - Themes with per-type badge colours

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Interactive shell (main.rs)                        │  ← stdin commands
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, request generations              │
//! │  - Pagination, search, sidebar                      │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                       │
//! ┌───────────────┐                       ┌───────────────┐
//! │ UI Layer      │                       │ Worker Layer  │
//! │ (ui/)         │                       │ (worker/)     │
//! │ - Rendering   │                       │ - Fan-out     │
//! │ - Theming     │                       │ - Join all    │
//! │ - Components  │                       │ - Responses   │
//! └───────────────┘                       └───────────────┘
//!                                                 │
//! ┌─────────────────────────────────────────────────────┐
//! │  API client (api/)                                  │  ← reqwest
//! │  Domain (domain/), platform paths (infrastructure/) │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: Catalog API trait, HTTP client and wire schemas
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (Item, Category, errors)
//! - [`infrastructure`]: Platform directories
//! - [`worker`]: Fetch execution with partial-failure tolerance
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! Settings are read, lowest precedence first, from the defaults, the TOML
//! file at `<config_dir>/dexview/config.toml` (or `--config PATH`), the
//! `DEXVIEW_BASE_URL` environment variable and the command-line flags:
//!
//! ```toml
//! base_url = "https://pokeapi.co/api/v2"
//! request_timeout_secs = 10
//! theme = "pokedex-dark"
//! trace_level = "debug"
//! log_file = "~/.local/state/dexview.log"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use dexview::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Mount)?;
//!
//! // The shell hands these to the fetch worker and feeds the responses
//! // back as `Event::Fetched`.
//! assert!(actions.iter().all(|a| matches!(a, Action::Fetch(_))));
//! # Ok::<(), dexview::DexError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, FilterMode};
pub use domain::{Category, DexError, Item, Result};
pub use ui::Theme;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog API root, without trailing slash.
    pub base_url: String,

    /// Per-request timeout in seconds. Default: 10
    pub request_timeout_secs: u64,

    /// Built-in theme: `pokedex-red` or `pokedex-dark`. Ignored if
    /// `theme_file` loads.
    pub theme_name: Option<String>,

    /// Custom TOML theme. See [`ui::theme`] for the format.
    pub theme_file: Option<PathBuf>,

    /// `trace`, `debug`, `info`, `warn` or `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Plain-text log output in addition to the trace file.
    pub log_file: Option<PathBuf>,

    /// Frame size overrides; the terminal size is used otherwise.
    pub rows: Option<u16>,
    pub cols: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: api::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            log_file: None,
            rows: None,
            cols: None,
        }
    }
}

/// Partial settings from one source. `None` leaves the lower layer in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,
    pub theme_file: Option<PathBuf>,
    pub trace_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub rows: Option<u16>,
    pub cols: Option<u16>,
}

impl Config {
    /// Parses settings from a string map with fallback defaults.
    ///
    /// Unparseable numbers fall back to their defaults; unknown keys are
    /// ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use dexview::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("theme".to_string(), "pokedex-dark".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.theme_name.as_deref(), Some("pokedex-dark"));
    /// assert_eq!(config.request_timeout_secs, 10);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let path = |key: &str| text(key).map(infrastructure::expand_tilde);

        let mut config = Self::default();
        config.apply(ConfigOverrides {
            base_url: text("base_url"),
            request_timeout_secs: text("request_timeout_secs").and_then(|v| v.parse().ok()),
            theme_name: text("theme"),
            theme_file: path("theme_file"),
            trace_level: text("trace_level"),
            log_file: path("log_file"),
            rows: text("rows").and_then(|v| v.parse().ok()),
            cols: text("cols").and_then(|v| v.parse().ok()),
        });
        config
    }

    /// Parses a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Config`] on malformed TOML, unknown keys or
    /// wrongly typed values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let overrides: ConfigOverrides =
            toml::from_str(contents).map_err(|e| DexError::Config(e.to_string()))?;
        let mut config = Self::default();
        config.apply(overrides);
        Ok(config)
    }

    /// Loads defaults plus the configuration file.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used when present.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Config`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (infrastructure::expand_tilde(path), true),
            None => (infrastructure::default_config_file(), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| DexError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
            .map_err(|e| DexError::Config(format!("{}: {e}", path.display())))
    }

    /// Layers `overrides` on top of the current values.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = overrides.request_timeout_secs.filter(|s| *s > 0) {
            self.request_timeout_secs = secs;
        }
        if overrides.theme_name.is_some() {
            self.theme_name = overrides.theme_name;
        }
        if let Some(file) = overrides.theme_file {
            self.theme_file = Some(infrastructure::expand_tilde(file));
        }
        if overrides.trace_level.is_some() {
            self.trace_level = overrides.trace_level;
        }
        if let Some(file) = overrides.log_file {
            self.log_file = Some(infrastructure::expand_tilde(file));
        }
        if overrides.rows.is_some() {
            self.rows = overrides.rows;
        }
        if overrides.cols.is_some() {
            self.cols = overrides.cols;
        }
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Creates the initial application state with the configured theme.
///
/// A theme that fails to load falls back to the default with a warning.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, "initializing dexview");

    let theme = Theme::resolve(config.theme_name.as_deref(), config.theme_file.as_deref());
    tracing::debug!(theme = %theme.name, "theme loaded");

    AppState::new(theme)
}
