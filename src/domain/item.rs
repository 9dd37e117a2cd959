//! Catalog item domain model.
//!
//! This module defines [`Item`], the fully resolved catalog entry, together
//! with the lightweight [`ListReference`] that points at one and the
//! [`Category`] tag used for filtering. Wire shapes live in
//! [`crate::api::schema`]; the types here are what the rest of the crate
//! works with.

use serde::{Deserialize, Serialize};

/// Inline image used when an item has no usable asset or an asset fails to load.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='96' height='96'><circle cx='48' cy='48' r='40' fill='%23eee' stroke='%23333' stroke-width='4'/><line x1='8' y1='48' x2='88' y2='48' stroke='%23333' stroke-width='4'/><circle cx='48' cy='48' r='10' fill='%23fff' stroke='%23333' stroke-width='4'/></svg>";

/// A category tag attached to an item at a given slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySlot {
    pub slot: u8,
    pub name: String,
}

/// One base stat of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// Stat name as reported by the API (e.g. `special-attack`).
    pub name: String,
    /// Base value.
    pub base: u32,
    /// Effort value yield.
    pub effort: u32,
}

/// Visual asset locators. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    pub back_default: Option<String>,
    pub back_shiny: Option<String>,
    pub official_artwork: Option<String>,
    pub dream_world: Option<String>,
}

impl Sprites {
    /// Resolves the display asset: default, official artwork, dream world,
    /// shiny, then the placeholder. Blank strings count as absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use dexview::domain::item::{Sprites, PLACEHOLDER_IMAGE};
    ///
    /// let sprites = Sprites {
    ///     official_artwork: Some("https://img/art/25.png".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(sprites.display_image(), "https://img/art/25.png");
    /// assert_eq!(Sprites::default().display_image(), PLACEHOLDER_IMAGE);
    /// ```
    #[must_use]
    pub fn display_image(&self) -> &str {
        [
            &self.front_default,
            &self.official_artwork,
            &self.dream_world,
            &self.front_shiny,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
        .find(|url| !url.trim().is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

/// A fully resolved catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    /// Ordered by slot. May be empty.
    pub categories: Vec<CategorySlot>,
    pub sprites: Sprites,
    pub stats: Vec<Stat>,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    pub base_experience: Option<u32>,
}

impl Item {
    /// Identifier formatted for display, zero-padded to three digits.
    ///
    /// ```
    /// # use dexview::domain::item::format_display_id;
    /// assert_eq!(format_display_id(7), "#007");
    /// assert_eq!(format_display_id(1025), "#1025");
    /// ```
    #[must_use]
    pub fn display_id(&self) -> String {
        format_display_id(self.id)
    }

    /// Name with its first letter upper-cased.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Resolved display image, see [`Sprites::display_image`].
    #[must_use]
    pub fn display_image(&self) -> &str {
        self.sprites.display_image()
    }

    /// Category names in slot order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn total_base_stats(&self) -> u32 {
        self.stats.iter().map(|s| s.base).sum()
    }

    /// Height in metres.
    #[must_use]
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    /// Weight in kilograms.
    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    /// Search predicate: case-insensitive substring on the name, or exact
    /// match of the term against the numeric identifier.
    ///
    /// `term` is expected to be trimmed and lowercased already.
    #[must_use]
    pub fn matches_term(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term) || self.id.to_string() == term
    }

    /// Byte range of `term` inside the lowercased name, for highlighting.
    #[must_use]
    pub fn name_match_range(&self, term: &str) -> Option<(usize, usize)> {
        if term.is_empty() {
            return None;
        }
        self.name
            .to_lowercase()
            .find(term)
            .map(|start| (start, start + term.len()))
    }
}

/// Formats an identifier as `#NNN`.
#[must_use]
pub fn format_display_id(id: u32) -> String {
    format!("#{id:03}")
}

/// Lightweight pointer to an item, resolved on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReference {
    pub name: String,
    /// Absolute URL of the item detail resource.
    pub url: String,
}

impl ListReference {
    /// Parses the trailing numeric path segment of the locator.
    ///
    /// ```
    /// use dexview::domain::ListReference;
    ///
    /// let r = ListReference {
    ///     name: "pikachu".to_string(),
    ///     url: "https://pokeapi.co/api/v2/pokemon/25/".to_string(),
    /// };
    /// assert_eq!(r.id_hint(), Some(25));
    /// ```
    #[must_use]
    pub fn id_hint(&self) -> Option<u32> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

/// A named filter tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
