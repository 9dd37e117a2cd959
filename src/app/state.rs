//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the viewer. It is mutated
//! only by [`handle_event`](super::handle_event) and read by the renderer
//! through [`AppState::compute_viewmodel`].
//!
//! # Sets
//!
//! Three item sets are derived from the stored data:
//!
//! - **Resolved set**: what has been fetched for the current filter mode.
//!   The category buffer in category mode, otherwise the current server page.
//! - **Current set**: search matches when a search is active, otherwise the
//!   resolved set.
//! - **Visible items**: the slice of the current set on the current page.
//!
//! # Example
//!
//! ```rust
//! use dexview::app::AppState;
//! use dexview::ui::theme::Theme;
//!
//! let state = AppState::new(Theme::default());
//! let viewmodel = state.compute_viewmodel(80);
//! assert_eq!(viewmodel.footer.page_label, "Page 1 of 1");
//! ```

use super::modes::{FilterMode, PaginationSource};
use super::pagination;
use super::sidebar::{Sidebar, SidebarStatus, ALL_ENTRY};
use crate::domain::{Item, PLACEHOLDER_IMAGE};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardItem, CategoryBadge, DetailModal, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo,
    SidebarEntry, SidebarInfo, StatRow, StatusLine, SuggestionItem, UIViewModel,
};
use crate::worker::Generation;
use std::collections::HashSet;

/// Upper bound on autocomplete entries.
pub const MAX_SUGGESTIONS: usize = 5;

/// Shortest trimmed term, in characters, that produces suggestions.
pub const MIN_SUGGESTION_CHARS: usize = 2;

/// Width of one grid card in terminal columns.
pub const CARD_WIDTH: usize = 26;

const TITLE: &str = "Pokédex";

const FOOTER_HINTS: &str =
    "n/p: page  page N  type NAME  all  search TERM  open ID  types  reset  help  q: quit";

/// Search state over the resolved set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Text in the search field.
    pub term: String,

    /// Matches of the last submitted term. `None` when no search is active.
    pub results: Option<Vec<Item>>,

    /// Page shown before the search started, restored when it is cleared.
    pub pre_search_page: Option<usize>,
}

impl SearchState {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.results.is_some()
    }

    pub fn clear(&mut self) {
        self.term.clear();
        self.results = None;
        self.pre_search_page = None;
    }
}

/// Message shown on the status line when not loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Partial result, e.g. some detail fetches were dropped.
    Warning(String),
    /// A request failed; the previous state is still displayed.
    Error(String),
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Warning(message) | Self::Error(message) => message,
        }
    }
}

/// The parts of the displayed view a set-replacing request changes up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub filter_mode: FilterMode,
    pub page: usize,
    pub search: SearchState,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// 1-based current page.
    ///
    /// In server mode this is only updated when the requested page arrives.
    pub page: usize,

    /// Catalog-wide total reported by the last server page.
    pub total_count: Option<u64>,

    pub filter_mode: FilterMode,

    /// Settled view replaced by the pending request, restored if it fails.
    pub restore_point: Option<ViewSnapshot>,

    /// Items of the last server page, ascending by identifier.
    pub page_items: Vec<Item>,

    /// Every resolved member of `buffer_category`, ascending by identifier.
    pub category_buffer: Vec<Item>,

    /// Category the buffer belongs to, once its load has completed.
    pub buffer_category: Option<String>,

    pub search: SearchState,

    /// At most [`MAX_SUGGESTIONS`] matches for the text being typed.
    pub suggestions: Vec<Item>,

    /// Item shown in the detail modal.
    pub selected: Option<Item>,
    pub modal_open: bool,

    /// A request that replaces the displayed set is in flight.
    pub loading: bool,

    pub notice: Option<Notice>,

    /// Token of the latest displayed-set request.
    pub generation: Generation,

    pub sidebar: Sidebar,
    pub sidebar_open: bool,

    /// Items whose image failed to load and now show the placeholder.
    pub failed_images: HashSet<u32>,

    pub theme: Theme,
}

impl AppState {
    /// Creates an empty state on page 1 in unfiltered mode.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            page: 1,
            total_count: None,
            filter_mode: FilterMode::Unfiltered,
            restore_point: None,
            page_items: vec![],
            category_buffer: vec![],
            buffer_category: None,
            search: SearchState::default(),
            suggestions: vec![],
            selected: None,
            modal_open: false,
            loading: false,
            notice: None,
            generation: 0,
            sidebar: Sidebar::default(),
            sidebar_open: false,
            failed_images: HashSet::new(),
            theme,
        }
    }

    /// Records the displayed view before a request starts changing it.
    ///
    /// While an earlier request is still pending the older, settled view is
    /// kept, so a chain of failures always lands on something that was
    /// actually shown.
    pub fn remember_view(&mut self) {
        if self.restore_point.is_none() {
            self.restore_point = Some(ViewSnapshot {
                filter_mode: self.filter_mode.clone(),
                page: self.page,
                search: self.search.clone(),
            });
        }
    }

    /// Puts the remembered view back after a failed request.
    ///
    /// Returns `false` if it named a category whose buffer is gone; the
    /// state is then unfiltered on page 1 and needs a fresh server page.
    pub fn restore_view(&mut self) -> bool {
        let Some(snapshot) = self.restore_point.take() else {
            return true;
        };

        if let FilterMode::Category(name) = &snapshot.filter_mode {
            if self.buffer_category.as_deref() != Some(name.as_str()) {
                self.filter_mode = FilterMode::Unfiltered;
                self.page = 1;
                self.search.clear();
                return false;
            }
        }

        self.filter_mode = snapshot.filter_mode;
        self.page = snapshot.page;
        self.search = snapshot.search;
        true
    }

    /// Advances and returns the request generation.
    ///
    /// Every request that replaces the displayed set calls this, which
    /// invalidates the responses of all earlier requests.
    pub fn next_generation(&mut self) -> Generation {
        self.generation += 1;
        self.generation
    }

    /// Items fetched for the current filter mode.
    ///
    /// Empty in category mode until that category's buffer has loaded.
    #[must_use]
    pub fn resolved_set(&self) -> &[Item] {
        match &self.filter_mode {
            FilterMode::Unfiltered => &self.page_items,
            FilterMode::Category(name) if self.buffer_category.as_deref() == Some(name) => {
                &self.category_buffer
            }
            FilterMode::Category(_) => &[],
        }
    }

    /// Search matches when a search is active, otherwise the resolved set.
    #[must_use]
    pub fn current_set(&self) -> &[Item] {
        self.search
            .results
            .as_deref()
            .unwrap_or_else(|| self.resolved_set())
    }

    #[must_use]
    pub fn pagination_source(&self) -> PaginationSource {
        if self.filter_mode.is_unfiltered() && !self.search.is_active() {
            PaginationSource::Server {
                total_count: self
                    .total_count
                    .unwrap_or(self.page_items.len() as u64),
            }
        } else {
            PaginationSource::Client {
                len: self.current_set().len(),
            }
        }
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.pagination_source().total_pages()
    }

    /// Items on the current page.
    #[must_use]
    pub fn visible_items(&self) -> &[Item] {
        match self.pagination_source() {
            PaginationSource::Server { .. } => &self.page_items,
            PaginationSource::Client { .. } => pagination::page_slice(self.current_set(), self.page),
        }
    }

    /// Looks up an already resolved item: visible first, then the current
    /// set, then the resolved set.
    #[must_use]
    pub fn find_item(&self, id: u32) -> Option<&Item> {
        self.visible_items()
            .iter()
            .chain(self.current_set())
            .chain(self.resolved_set())
            .find(|item| item.id == id)
    }

    /// Matches of `term` in the resolved set, capped at [`MAX_SUGGESTIONS`].
    ///
    /// Terms shorter than [`MIN_SUGGESTION_CHARS`] after trimming yield none.
    #[must_use]
    pub fn suggestions_for(&self, term: &str) -> Vec<Item> {
        let term = term.trim().to_lowercase();
        if term.chars().count() < MIN_SUGGESTION_CHARS {
            return vec![];
        }

        self.resolved_set()
            .iter()
            .filter(|item| item.matches_term(&term))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }

    /// Image locator for an item, honoring reported load failures.
    #[must_use]
    pub fn image_for<'a>(&self, item: &'a Item) -> &'a str {
        if self.failed_images.contains(&item.id) {
            PLACEHOLDER_IMAGE
        } else {
            item.display_image()
        }
    }

    /// Computes a renderable view model for a terminal `cols` wide.
    #[must_use]
    pub fn compute_viewmodel(&self, cols: usize) -> UIViewModel {
        let visible = self.visible_items();
        let total_pages = self.total_pages();

        let highlight_term = if self.search.is_active() {
            self.search.term.trim().to_lowercase()
        } else {
            String::new()
        };

        let cards = visible
            .iter()
            .map(|item| self.compute_card(item, &highlight_term))
            .collect();

        let empty_state = (!self.loading && visible.is_empty()).then(|| EmptyState {
            message: "No results".to_string(),
            subtitle: "Type `reset` to return to the full list".to_string(),
        });

        UIViewModel {
            header: self.compute_header(),
            sidebar: self.sidebar_open.then(|| self.compute_sidebar()),
            search_bar: self.compute_search_bar(),
            cards,
            columns: self.grid_columns(cols),
            footer: FooterInfo {
                page_label: format!("Page {} of {total_pages}", self.page),
                range_label: pagination::range_label(visible),
                has_previous: self.page > 1,
                has_next: self.page < total_pages,
                hints: FOOTER_HINTS.to_string(),
            },
            status: self.compute_status(),
            modal: self.compute_modal(),
            empty_state,
        }
    }

    /// Card columns for the grid. Never less than one.
    #[must_use]
    pub fn grid_columns(&self, cols: usize) -> usize {
        (cols / CARD_WIDTH).max(1)
    }

    fn badges(&self, item: &Item) -> Vec<CategoryBadge> {
        item.category_names()
            .map(|name| CategoryBadge {
                name: name.to_string(),
                color: self.theme.category_color(name).to_string(),
            })
            .collect()
    }

    fn compute_card(&self, item: &Item, term: &str) -> CardItem {
        // name_match_range works on bytes of the lowercased name; the
        // renderer highlights by character.
        let highlight = item.name_match_range(term).map(|(start, end)| {
            let lower = item.name.to_lowercase();
            let to_chars = |byte: usize| lower[..byte].chars().count();
            (to_chars(start), to_chars(end))
        });

        CardItem {
            id: item.id,
            display_id: item.display_id(),
            name: item.display_name(),
            categories: self.badges(item),
            image: self.image_for(item).to_string(),
            highlight,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let mode = if self.search.is_active() {
            format!("Search: \"{}\"", self.search.term.trim())
        } else {
            match &self.filter_mode {
                FilterMode::Unfiltered => "All".to_string(),
                FilterMode::Category(name) => format!("Type: {name}"),
            }
        };

        let total = match self.pagination_source() {
            PaginationSource::Server { total_count } => total_count,
            PaginationSource::Client { len } => len as u64,
        };

        HeaderInfo {
            title: TITLE.to_string(),
            mode,
            total: format!("{total} total"),
        }
    }

    fn compute_sidebar(&self) -> SidebarInfo {
        let notice = match self.sidebar.status() {
            SidebarStatus::Ready => None,
            SidebarStatus::NotRequested => Some("Types not loaded".to_string()),
            SidebarStatus::Loading => Some("Loading types...".to_string()),
            SidebarStatus::Failed(message) => Some(format!("Types unavailable: {message}")),
        };

        let active = self.filter_mode.category();
        let all = SidebarEntry {
            name: ALL_ENTRY.to_string(),
            is_active: active.is_none(),
            color: self.theme.colors.text_normal.clone(),
        };

        let entries = std::iter::once(all)
            .chain(self.sidebar.categories().iter().map(|category| SidebarEntry {
                name: category.name.clone(),
                is_active: active == Some(category.name.as_str()),
                color: self.theme.category_color(&category.name).to_string(),
            }))
            .collect();

        SidebarInfo { entries, notice }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.search.term.clone(),
            suggestions: self
                .suggestions
                .iter()
                .enumerate()
                .map(|(index, item)| SuggestionItem {
                    index,
                    display_id: item.display_id(),
                    name: item.display_name(),
                })
                .collect(),
        }
    }

    fn compute_status(&self) -> Option<StatusLine> {
        if self.loading {
            return Some(StatusLine {
                message: "Loading...".to_string(),
                is_loading: true,
                is_error: false,
            });
        }

        self.notice.as_ref().map(|notice| StatusLine {
            message: notice.message().to_string(),
            is_loading: false,
            is_error: matches!(notice, Notice::Error(_)),
        })
    }

    fn compute_modal(&self) -> Option<DetailModal> {
        if !self.modal_open {
            return None;
        }
        let item = self.selected.as_ref()?;

        Some(DetailModal {
            display_id: item.display_id(),
            name: item.display_name(),
            image: self.image_for(item).to_string(),
            categories: self.badges(item),
            stats: item
                .stats
                .iter()
                .map(|stat| StatRow {
                    name: stat.name.clone(),
                    base: stat.base,
                    effort: stat.effort,
                })
                .collect(),
            total: item.total_base_stats(),
            height_m: item.height_m(),
            weight_kg: item.weight_kg(),
            base_experience: item.base_experience,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategorySlot, Sprites};

    fn item(id: u32, name: &str) -> Item {
        Item {
            id,
            name: name.to_string(),
            categories: vec![CategorySlot {
                slot: 1,
                name: "fire".to_string(),
            }],
            sprites: Sprites {
                front_default: Some(format!("https://img/{id}.png")),
                ..Sprites::default()
            },
            stats: vec![],
            height: 7,
            weight: 69,
            base_experience: Some(64),
        }
    }

    fn state_with_page(items: Vec<Item>, total: u64) -> AppState {
        let mut state = AppState::new(Theme::default());
        state.page_items = items;
        state.total_count = Some(total);
        state
    }

    #[test]
    fn server_pagination_uses_total_count() {
        let state = state_with_page((1..=20).map(|i| item(i, "x")).collect(), 151);
        assert_eq!(state.total_pages(), 8);
        assert_eq!(state.visible_items().len(), 20);
    }

    #[test]
    fn pending_category_resolves_to_empty_set() {
        let mut state = state_with_page(vec![item(1, "bulbasaur")], 1);
        state.filter_mode = FilterMode::Category("fire".to_string());
        assert!(state.resolved_set().is_empty());

        state.category_buffer = vec![item(4, "charmander")];
        state.buffer_category = Some("fire".to_string());
        assert_eq!(state.resolved_set()[0].id, 4);
    }

    #[test]
    fn suggestions_need_two_characters_and_cap_at_five() {
        let names = ["pidgey", "pidgeotto", "pidgeot", "pikachu", "pichu", "pinsir", "piplup"];
        let items = names
            .iter()
            .enumerate()
            .map(|(i, n)| item(u32::try_from(i).unwrap() + 1, n))
            .collect();
        let state = state_with_page(items, 7);

        assert!(state.suggestions_for(" p ").is_empty());
        assert_eq!(state.suggestions_for("PI").len(), MAX_SUGGESTIONS);
        assert_eq!(state.suggestions_for("pidge").len(), 3);
    }

    #[test]
    fn failed_image_uses_placeholder() {
        let mut state = state_with_page(vec![item(25, "pikachu")], 1);
        state.failed_images.insert(25);
        let vm = state.compute_viewmodel(80);
        assert_eq!(vm.cards[0].image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn viewmodel_reports_range_and_empty_state() {
        let state = state_with_page((1..=20).map(|i| item(i, "x")).collect(), 151);
        let vm = state.compute_viewmodel(80);
        assert_eq!(vm.footer.range_label.as_deref(), Some("#001 - #020"));
        assert_eq!(vm.columns, 3);
        assert!(vm.empty_state.is_none());

        let empty = AppState::new(Theme::default()).compute_viewmodel(10);
        assert_eq!(empty.columns, 1);
        assert_eq!(empty.empty_state.map(|e| e.message).as_deref(), Some("No results"));
    }

    #[test]
    fn search_highlight_is_in_characters() {
        let mut state = state_with_page(vec![item(6, "charizard")], 1);
        state.search.term = "Zar".to_string();
        state.search.results = Some(vec![item(6, "charizard")]);
        let vm = state.compute_viewmodel(80);
        assert_eq!(vm.cards[0].highlight, Some((5, 8)));
        assert_eq!(vm.header.mode, "Search: \"Zar\"");
    }

    #[test]
    fn modal_reports_units() {
        let mut state = state_with_page(vec![item(4, "charmander")], 1);
        state.selected = state.find_item(4).cloned();
        state.modal_open = true;
        let modal = state.compute_viewmodel(80).modal.unwrap();
        assert!((modal.height_m - 0.7).abs() < f64::EPSILON);
        assert!((modal.weight_kg - 6.9).abs() < f64::EPSILON);
        assert_eq!(modal.categories[0].color, state.theme.category_color("fire"));
    }
}
