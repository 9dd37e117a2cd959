//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings and colours only; every
//! decision about what is visible has already been made.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present while the sidebar is open.
    pub sidebar: Option<SidebarInfo>,

    pub search_bar: SearchBarInfo,

    /// Cards on the current page, in display order.
    pub cards: Vec<CardItem>,

    /// Number of card columns that fit the terminal width.
    pub columns: usize,

    pub footer: FooterInfo,

    /// Loading indicator or last error/warning.
    pub status: Option<StatusLine>,

    /// Detail overlay for the selected item.
    pub modal: Option<DetailModal>,

    /// Shown instead of the grid when the displayed set is empty.
    pub empty_state: Option<EmptyState>,
}

/// Title bar content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// `All`, `Type: fire` or `Search: "char"`.
    pub mode: String,
    /// e.g. `1302 total`.
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarInfo {
    pub entries: Vec<SidebarEntry>,
    /// Loading or failure notice in place of entries.
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub name: String,
    pub is_active: bool,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub suggestions: Vec<SuggestionItem>,
}

/// One autocomplete entry; `index` is what `pick` expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    pub index: usize,
    pub display_id: String,
    pub name: String,
}

/// A grid card for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub id: u32,
    pub display_id: String,
    pub name: String,
    pub categories: Vec<CategoryBadge>,
    /// Image locator, or the placeholder after a reported load failure.
    pub image: String,
    /// Character range of the search term inside `name`.
    pub highlight: Option<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBadge {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// `Page 2 of 8`.
    pub page_label: String,
    /// `#021 - #040`, absent when nothing is visible.
    pub range_label: Option<String>,
    pub has_previous: bool,
    pub has_next: bool,
    pub hints: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub is_loading: bool,
    pub is_error: bool,
}

/// Detail overlay content.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailModal {
    pub display_id: String,
    pub name: String,
    pub image: String,
    pub categories: Vec<CategoryBadge>,
    pub stats: Vec<StatRow>,
    pub total: u32,
    pub height_m: f64,
    pub weight_kg: f64,
    pub base_experience: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub name: String,
    pub base: u32,
    pub effort: u32,
}

/// Empty-result message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// `No results`.
    pub message: String,
    /// Reset hint.
    pub subtitle: String,
}
