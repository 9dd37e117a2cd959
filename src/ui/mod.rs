//! Terminal presentation layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Frame assembly and output
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Line buffer and text measurement utilities
//! - [`theme`]: Color schemes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{
    CardItem, CategoryBadge, DetailModal, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo,
    SidebarEntry, SidebarInfo, StatRow, StatusLine, SuggestionItem, UIViewModel,
};
