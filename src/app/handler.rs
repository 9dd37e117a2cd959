//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place [`AppState`] changes. It returns whether
//! the view needs to be redrawn plus the actions the shell must execute.
//!
//! # Event Types
//!
//! - **Paging**: `LoadPage`, `GoToPage`, `NextPage`, `PreviousPage`
//! - **Filtering**: `FilterByCategory`, `ShowAll`, `SidebarSelect`, `Reset`
//! - **Search**: `Search`, `UpdateSuggestions`, `SelectSuggestion`
//! - **Detail**: `OpenDetail`, `CloseDetail`, `ImageFailed`
//! - **Lifecycle**: `Mount`, `ToggleSidebar`, `Quit`
//! - **Worker**: `Fetched` with a typed [`FetchResponse`]
//!
//! # Generations
//!
//! Every event that issues a request replacing the displayed set advances
//! [`AppState::generation`]. A `Fetched` response carrying any other
//! generation is stale and ignored, so a slow answer can never overwrite the
//! result of a later command.
//!
//! # Example
//!
//! ```rust
//! use dexview::app::{handle_event, Action, AppState, Event};
//! use dexview::ui::theme::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert!(render);
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), dexview::DexError>(())
//! ```

use super::modes::{FilterMode, PaginationSource};
use super::pagination::{self, ITEMS_PER_PAGE};
use super::sidebar::{SidebarMessage, ALL_ENTRY};
use super::state::Notice;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::worker::{FetchKind, FetchRequest, FetchResponse};

/// Commands from the shell and responses from the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The view became active. Loads the sidebar vocabulary and page 1.
    Mount,

    /// Loads a server page of the full catalog, leaving any filter or search.
    LoadPage(usize),

    /// Restricts the set to one category. `all` or an empty name clears it.
    FilterByCategory(String),

    /// Clears the category filter and reloads page 1.
    ShowAll,

    /// Submits a search term. An empty term restores the pre-search set.
    Search(String),

    /// The search field changed; recompute autocomplete entries.
    UpdateSuggestions(String),

    /// Collapses the displayed set to one autocomplete entry.
    SelectSuggestion(usize),

    GoToPage(usize),
    NextPage,
    PreviousPage,

    /// Opens the detail modal for an already resolved item.
    OpenDetail(u32),
    CloseDetail,

    /// The image of an item failed to load.
    ImageFailed(u32),

    ToggleSidebar,

    /// An entry was picked in the sidebar.
    SidebarSelect(String),

    /// Returns to unfiltered page 1 and clears search, status and modal.
    Reset,

    Quit,

    /// A fetch completed.
    Fetched(FetchResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. `should_render` is `false` for no-ops such as
/// out-of-range page requests or stale responses.
///
/// # Errors
///
/// The controller itself does not fail; request errors arrive as
/// [`FetchResponse::Failed`] and are recorded on the status line. The
/// `Result` keeps the shell's error path uniform.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Mount => Ok(mount(state)),
        Event::LoadPage(page) => Ok(load_page(state, *page)),
        Event::FilterByCategory(name) => Ok(filter_by_category(state, name)),
        Event::ShowAll => Ok(show_all(state)),
        Event::Search(term) => Ok(search(state, term)),
        Event::UpdateSuggestions(term) => {
            state.search.term.clone_from(term);
            state.suggestions = state.suggestions_for(term);
            tracing::debug!(count = state.suggestions.len(), "suggestions updated");
            Ok((true, vec![]))
        }
        Event::SelectSuggestion(index) => Ok(select_suggestion(state, *index)),
        Event::GoToPage(page) => Ok(go_to_page(state, *page)),
        Event::NextPage => {
            let next = state.page.saturating_add(1);
            Ok(go_to_page(state, next))
        }
        Event::PreviousPage => {
            let previous = state.page.saturating_sub(1);
            Ok(go_to_page(state, previous))
        }
        Event::OpenDetail(id) => {
            let Some(item) = state.find_item(*id).cloned() else {
                tracing::debug!(id, "open_detail for unknown item ignored");
                return Ok((false, vec![]));
            };
            state.selected = Some(item);
            state.modal_open = true;
            Ok((true, vec![]))
        }
        Event::CloseDetail => {
            let was_open = state.modal_open;
            state.selected = None;
            state.modal_open = false;
            Ok((was_open, vec![]))
        }
        Event::ImageFailed(id) => {
            let inserted = state.failed_images.insert(*id);
            if inserted {
                tracing::debug!(id, "image replaced by placeholder");
            }
            Ok((inserted, vec![]))
        }
        Event::ToggleSidebar => {
            state.sidebar_open = !state.sidebar_open;
            Ok((true, vec![]))
        }
        Event::SidebarSelect(name) => match state.sidebar.select(name) {
            Some(SidebarMessage::CategorySelected(category)) => {
                Ok(filter_by_category(state, &category))
            }
            Some(SidebarMessage::ShowAll) => Ok(show_all(state)),
            None => {
                tracing::debug!(entry = %name, "sidebar entry not selectable");
                Ok((false, vec![]))
            }
        },
        Event::Reset => {
            state.notice = None;
            state.selected = None;
            state.modal_open = false;
            Ok(show_all(state))
        }
        Event::Quit => Ok((false, vec![Action::Exit])),
        Event::Fetched(response) => Ok(apply_response(state, response)),
    }
}

fn mount(state: &mut AppState) -> (bool, Vec<Action>) {
    if !state.sidebar.mount() {
        return (false, vec![]);
    }

    let (_, mut actions) = load_page(state, 1);
    actions.insert(0, Action::Fetch(FetchRequest::categories(state.generation)));
    (true, actions)
}

/// Issues a server page request under a fresh generation.
fn request_server_page(state: &mut AppState, page: usize) -> Action {
    state.remember_view();
    let generation = state.next_generation();
    state.loading = true;
    state.notice = None;

    tracing::debug!(generation, page, "requesting server page");
    Action::Fetch(FetchRequest::page(
        generation,
        page,
        ITEMS_PER_PAGE,
        pagination::offset_for(page),
    ))
}

fn clear_search(state: &mut AppState) {
    state.search.clear();
    state.suggestions.clear();
}

fn load_page(state: &mut AppState, page: usize) -> (bool, Vec<Action>) {
    if page == 0 {
        return (false, vec![]);
    }

    let total_pages = match state.total_count {
        Some(total_count) => PaginationSource::Server { total_count }.total_pages(),
        // Until the first page reports the catalog size only page 1 is known.
        None => 1,
    };
    if !pagination::is_valid_page(page, total_pages) {
        tracing::debug!(page, total_pages, "load_page out of range");
        return (false, vec![]);
    }

    state.remember_view();
    state.filter_mode = FilterMode::Unfiltered;
    clear_search(state);

    (true, vec![request_server_page(state, page)])
}

/// Switches to the full catalog. The category buffer is dropped once the
/// server page arrives.
fn show_all(state: &mut AppState) -> (bool, Vec<Action>) {
    state.remember_view();
    state.filter_mode = FilterMode::Unfiltered;
    clear_search(state);

    (true, vec![request_server_page(state, 1)])
}

fn filter_by_category(state: &mut AppState, name: &str) -> (bool, Vec<Action>) {
    let name = name.trim().to_lowercase();
    if name.is_empty() || name == ALL_ENTRY {
        return show_all(state);
    }

    if state.filter_mode.category() == Some(name.as_str()) {
        if state.buffer_category.as_deref() == Some(name.as_str()) {
            tracing::debug!(category = %name, "category reselected from buffer");
            clear_search(state);
            state.page = 1;
            return (true, vec![]);
        }
        if state.loading {
            tracing::debug!(category = %name, "category load already pending");
            return (false, vec![]);
        }
        tracing::debug!(category = %name, "category has no buffer, requesting again");
    }

    state.remember_view();
    state.filter_mode = FilterMode::Category(name.clone());
    clear_search(state);
    state.page = 1;

    let generation = state.next_generation();
    state.loading = true;
    state.notice = None;

    tracing::debug!(generation, category = %name, "requesting category");
    (true, vec![Action::Fetch(FetchRequest::category(generation, name))])
}

fn search(state: &mut AppState, term: &str) -> (bool, Vec<Action>) {
    let trimmed = term.trim();
    state.suggestions.clear();

    if trimmed.is_empty() {
        if !state.search.is_active() {
            state.search.term.clear();
            return (true, vec![]);
        }

        if state.filter_mode.is_unfiltered() {
            state.remember_view();
            state.search.clear();
            return (true, vec![request_server_page(state, 1)]);
        }

        let restore_page = state.search.pre_search_page.unwrap_or(1);
        state.search.clear();

        state.page = restore_page.min(state.total_pages());
        tracing::debug!(page = state.page, "search cleared, buffer restored");
        return (true, vec![]);
    }

    let needle = trimmed.to_lowercase();
    let results: Vec<_> = state
        .resolved_set()
        .iter()
        .filter(|item| item.matches_term(&needle))
        .cloned()
        .collect();

    tracing::debug!(term = %trimmed, matches = results.len(), "search applied");

    if !state.search.is_active() {
        state.search.pre_search_page = Some(state.page);
    }
    state.search.term = trimmed.to_string();
    state.search.results = Some(results);
    state.page = 1;

    (true, vec![])
}

fn select_suggestion(state: &mut AppState, index: usize) -> (bool, Vec<Action>) {
    let Some(item) = state.suggestions.get(index).cloned() else {
        tracing::debug!(index, "suggestion index out of range");
        return (false, vec![]);
    };

    if !state.search.is_active() {
        state.search.pre_search_page = Some(state.page);
    }
    state.search.term.clone_from(&item.name);
    state.search.results = Some(vec![item]);
    state.suggestions.clear();
    state.page = 1;

    (true, vec![])
}

fn go_to_page(state: &mut AppState, page: usize) -> (bool, Vec<Action>) {
    let source = state.pagination_source();
    let total_pages = source.total_pages();

    if !pagination::is_valid_page(page, total_pages) || page == state.page {
        tracing::debug!(page, total_pages, current = state.page, "page request ignored");
        return (false, vec![]);
    }

    if source.is_server() {
        return (true, vec![request_server_page(state, page)]);
    }

    state.page = page;
    (true, vec![])
}

fn dropped_notice(dropped: usize, total: usize) -> Option<Notice> {
    (dropped > 0).then(|| Notice::Warning(format!("{dropped} of {total} entries could not be loaded")))
}

fn apply_response(state: &mut AppState, response: &FetchResponse) -> (bool, Vec<Action>) {
    if let Some(generation) = response.generation() {
        if generation != state.generation {
            tracing::debug!(
                generation,
                current = state.generation,
                "discarding stale response"
            );
            return (false, vec![]);
        }
    }

    match response {
        FetchResponse::PageLoaded {
            page,
            total_count,
            items,
            dropped,
            ..
        } => {
            state.page_items.clone_from(items);
            state.total_count = Some(*total_count);
            state.page = *page;
            state.restore_point = None;
            state.category_buffer.clear();
            state.buffer_category = None;
            state.loading = false;
            state.notice = dropped_notice(*dropped, items.len() + dropped);
            tracing::debug!(page, items = items.len(), total_count, "page applied");
        }
        FetchResponse::CategoryLoaded {
            category,
            items,
            dropped,
            ..
        } => {
            state.category_buffer.clone_from(items);
            state.buffer_category = Some(category.clone());
            state.restore_point = None;
            state.page = 1;
            state.loading = false;
            state.notice = dropped_notice(*dropped, items.len() + dropped);
            tracing::debug!(category = %category, items = items.len(), "category buffer filled");
        }
        FetchResponse::CategoriesLoaded { categories } => {
            state.sidebar.set_categories(categories.clone());
        }
        FetchResponse::Failed { kind, message, .. } => match kind {
            FetchKind::Categories => state.sidebar.load_failed(message.clone()),
            FetchKind::Page { .. } | FetchKind::Category { .. } => {
                tracing::error!(error = %message, ?kind, "request failed");
                state.loading = false;
                let notice = Notice::Error(message.clone());

                if !state.restore_view() {
                    tracing::debug!("previous category buffer is gone, reloading page 1");
                    let action = request_server_page(state, 1);
                    state.notice = Some(notice);
                    return (true, vec![action]);
                }
                state.notice = Some(notice);
            }
        },
    }

    (true, vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;

    fn state() -> AppState {
        AppState::new(Theme::default())
    }

    #[test]
    fn mount_fetches_categories_once() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::Mount).unwrap();
        assert_eq!(actions.len(), 2);
        assert!(matches!(
            actions[0].as_fetch().map(|r| &r.kind),
            Some(FetchKind::Categories)
        ));

        let (render, actions) = handle_event(&mut state, &Event::Mount).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn page_zero_and_previous_from_first_page_are_noops() {
        let mut state = state();
        assert_eq!(handle_event(&mut state, &Event::LoadPage(0)).unwrap(), (false, vec![]));
        assert_eq!(handle_event(&mut state, &Event::PreviousPage).unwrap(), (false, vec![]));
    }

    #[test]
    fn failed_page_keeps_previous_state() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::LoadPage(1)).unwrap();
        let generation = actions[0].as_fetch().unwrap().generation;

        let failed = FetchResponse::Failed {
            generation,
            kind: FetchKind::Page { page: 1, limit: 20, offset: 0 },
            message: "timed out".to_string(),
        };
        handle_event(&mut state, &Event::Fetched(failed)).unwrap();

        assert!(!state.loading);
        assert_eq!(state.notice, Some(Notice::Error("timed out".to_string())));
        assert_eq!(state.page, 1);
    }

    fn category_failure(state: &AppState, name: &str) -> Event {
        Event::Fetched(FetchResponse::Failed {
            generation: state.generation,
            kind: FetchKind::Category { name: name.to_string() },
            message: "404".to_string(),
        })
    }

    #[test]
    fn failed_category_restores_previous_mode() {
        let mut state = state();
        handle_event(&mut state, &Event::FilterByCategory("Fire".to_string())).unwrap();
        assert_eq!(state.filter_mode, FilterMode::Category("fire".to_string()));

        let failed = category_failure(&state, "fire");
        handle_event(&mut state, &failed).unwrap();
        assert_eq!(state.filter_mode, FilterMode::Unfiltered);
        assert!(state.restore_point.is_none());
    }

    #[test]
    fn overlapping_category_failures_fall_back_to_settled_view() {
        let mut state = state();
        handle_event(&mut state, &Event::FilterByCategory("fire".to_string())).unwrap();
        handle_event(&mut state, &Event::FilterByCategory("normal".to_string())).unwrap();

        let failed = category_failure(&state, "normal");
        handle_event(&mut state, &failed).unwrap();
        assert_eq!(state.filter_mode, FilterMode::Unfiltered);
        assert!(!state.loading);

        let (render, actions) =
            handle_event(&mut state, &Event::FilterByCategory("fire".to_string())).unwrap();
        assert!(render);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn unbuffered_category_is_requested_again_once_idle() {
        let mut state = state();
        state.filter_mode = FilterMode::Category("fire".to_string());

        let (_, actions) =
            handle_event(&mut state, &Event::FilterByCategory("fire".to_string())).unwrap();
        assert_eq!(actions.len(), 1);

        let (render, actions) =
            handle_event(&mut state, &Event::FilterByCategory("fire".to_string())).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn restoring_a_category_without_buffer_reloads_page_one() {
        let mut state = state();
        state.filter_mode = FilterMode::Category("fire".to_string());
        handle_event(&mut state, &Event::ShowAll).unwrap();

        let failed = Event::Fetched(FetchResponse::Failed {
            generation: state.generation,
            kind: FetchKind::Page { page: 1, limit: 20, offset: 0 },
            message: "timed out".to_string(),
        });
        let (_, actions) = handle_event(&mut state, &failed).unwrap();

        assert_eq!(state.filter_mode, FilterMode::Unfiltered);
        assert!(matches!(
            actions[0].as_fetch().map(|r| &r.kind),
            Some(FetchKind::Page { page: 1, .. })
        ));
        assert_eq!(state.notice, Some(Notice::Error("timed out".to_string())));
    }

    #[test]
    fn huge_page_before_first_load_is_ignored() {
        let mut state = state();
        assert_eq!(
            handle_event(&mut state, &Event::LoadPage(usize::MAX)).unwrap(),
            (false, vec![])
        );
        assert_eq!(handle_event(&mut state, &Event::LoadPage(2)).unwrap(), (false, vec![]));
        assert!(!state.loading);
    }

    #[test]
    fn sidebar_failure_is_not_generation_checked() {
        let mut state = state();
        handle_event(&mut state, &Event::Mount).unwrap();
        handle_event(&mut state, &Event::NextPage).unwrap();

        let failed = FetchResponse::Failed {
            generation: 0,
            kind: FetchKind::Categories,
            message: "down".to_string(),
        };
        let (render, _) = handle_event(&mut state, &Event::Fetched(failed)).unwrap();
        assert!(render);
        assert!(matches!(
            state.sidebar.status(),
            crate::app::sidebar::SidebarStatus::Failed(_)
        ));
    }

    #[test]
    fn close_and_image_failure_render_only_on_change() {
        let mut state = state();
        assert!(!handle_event(&mut state, &Event::CloseDetail).unwrap().0);
        assert!(handle_event(&mut state, &Event::ImageFailed(7)).unwrap().0);
        assert!(!handle_event(&mut state, &Event::ImageFailed(7)).unwrap().0);
    }

    #[test]
    fn quit_exits() {
        let mut state = state();
        assert_eq!(
            handle_event(&mut state, &Event::Quit).unwrap(),
            (false, vec![Action::Exit])
        );
    }
}
