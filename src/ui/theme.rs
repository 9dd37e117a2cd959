//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents: a palette for the UI chrome plus a table of
//! per-category badge colours. Two themes are compiled in; a custom one can be
//! loaded from disk.
//!
//! # Built-in Themes
//!
//! - `pokedex-red`: Red chrome on a dark background (default)
//! - `pokedex-dark`: Muted greys with coloured badges
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#ffffff"
//! header_bg = "#cc0000"
//! selection_fg = "#1a1a1a"
//! selection_bg = "#ffcb05"
//! text_normal = "#e8e8e8"
//! text_dim = "#8a8a8a"
//! border = "#5a5a5a"
//! search_bar_border = "#ffcb05"
//! match_highlight_fg = "#1a1a1a"
//! match_highlight_bg = "#ffcb05"
//! empty_state_fg = "#3d7dca"
//! card_border = "#5a5a5a"
//! modal_border = "#cc0000"
//! status_fg = "#ffcb05"
//! error_fg = "#ff5555"
//! category_fallback = "#a8a878"
//!
//! [categories]
//! fire = "#f08030"
//! water = "#6890f0"
//! ```
//!
//! # Example
//!
//! ```rust
//! use dexview::ui::theme::Theme;
//!
//! let theme = Theme::from_name("pokedex-red").unwrap();
//! assert_eq!(theme.category_color("fire"), "#f08030");
//! print!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::{DexError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "pokedex-red";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Palette for the UI chrome.
    pub colors: ThemeColors,
    /// Badge colour per category name. Missing names use
    /// [`ThemeColors::category_fallback`].
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Active sidebar entry and selected suggestion.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text (footer hints, identifiers).
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    /// Search match highlight inside card names.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    pub card_border: String,
    pub modal_border: String,

    /// Loading and informational status line.
    pub status_fg: String,
    /// Failed request status line.
    pub error_fg: String,

    pub category_fallback: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "pokedex-red" => include_str!("../../themes/pokedex-red.toml"),
            "pokedex-dark" => include_str!("../../themes/pokedex-dark.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Theme`] if the file cannot be read or does not
    /// parse as a theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| DexError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| DexError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Resolves the configured theme: a custom file wins over a built-in name.
    ///
    /// Unknown names and unreadable files fall back to the default theme with
    /// a warning; a broken theme never prevents startup.
    #[must_use]
    pub fn resolve(name: Option<&str>, file: Option<&Path>) -> Self {
        if let Some(path) = file {
            match Self::from_file(path) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(error = %e, "custom theme ignored"),
            }
        }

        if let Some(name) = name {
            if let Some(theme) = Self::from_name(name) {
                return theme;
            }
            tracing::warn!(theme = %name, "unknown theme, using default");
        }

        Self::default()
    }

    /// Badge colour for a category, case-insensitive.
    #[must_use]
    pub fn category_color(&self, category: &str) -> &str {
        self.categories
            .get(&category.to_lowercase())
            .map_or(self.colors.category_fallback.as_str(), String::as_str)
    }

    /// Converts a hex color to RGB. Malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape for a hex colour.
    ///
    /// ```rust
    /// use dexview::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff0000"), "\u{1b}[38;2;255;0;0m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex colour.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the `pokedex-red` theme.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in pokedex-red theme should always parse")
    }
}
