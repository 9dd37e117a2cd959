//! Upstream API boundary.
//!
//! - [`schema`]: Explicit response shapes for the four endpoints
//! - [`client`]: The [`CatalogApi`] trait and its `reqwest` implementation

pub mod client;
pub mod schema;

pub use client::{
    filter_selectable_categories, CatalogApi, ListPage, PokeApiClient, DEFAULT_BASE_URL,
    NON_SELECTABLE_CATEGORIES,
};
