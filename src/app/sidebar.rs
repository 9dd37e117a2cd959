//! Category sidebar state.
//!
//! The sidebar owns the category vocabulary, fetched once when the view is
//! mounted, and turns a user pick into a [`SidebarMessage`] for the
//! controller. Its open/closed flag belongs to the container
//! ([`AppState::sidebar_open`](super::AppState::sidebar_open)).

use crate::api::filter_selectable_categories;
use crate::domain::Category;

/// Synthetic entry that clears the category filter.
pub const ALL_ENTRY: &str = "all";

/// Messages the sidebar sends to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarMessage {
    /// Filter by the named category.
    CategorySelected(String),
    /// Clear the category filter.
    ShowAll,
}

/// Loading status of the category vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SidebarStatus {
    #[default]
    NotRequested,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct Sidebar {
    categories: Vec<Category>,
    status: SidebarStatus,
}

impl Sidebar {
    /// Marks the vocabulary as requested.
    ///
    /// Returns `true` only on the first call, when the caller should issue
    /// the fetch.
    pub fn mount(&mut self) -> bool {
        if self.status == SidebarStatus::NotRequested {
            self.status = SidebarStatus::Loading;
            true
        } else {
            tracing::debug!(status = ?self.status, "sidebar already mounted");
            false
        }
    }

    /// Stores the fetched vocabulary without the non-selectable entries.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = filter_selectable_categories(categories);
        self.status = SidebarStatus::Ready;
        tracing::debug!(count = self.categories.len(), "sidebar categories loaded");
    }

    pub fn load_failed(&mut self, message: String) {
        tracing::warn!(error = %message, "sidebar categories failed to load");
        self.status = SidebarStatus::Failed(message);
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub const fn status(&self) -> &SidebarStatus {
        &self.status
    }

    /// Maps a picked entry to a controller message.
    ///
    /// `all` clears the filter; a known category selects it; anything else
    /// is ignored.
    #[must_use]
    pub fn select(&self, name: &str) -> Option<SidebarMessage> {
        let name = name.trim();
        if name.eq_ignore_ascii_case(ALL_ENTRY) {
            return Some(SidebarMessage::ShowAll);
        }

        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| SidebarMessage::CategorySelected(c.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(names: &[&str]) -> Sidebar {
        let mut sidebar = Sidebar::default();
        sidebar.set_categories(names.iter().copied().map(Category::new).collect());
        sidebar
    }

    #[test]
    fn mount_requests_once() {
        let mut sidebar = Sidebar::default();
        assert!(sidebar.mount());
        assert!(!sidebar.mount());
        assert_eq!(sidebar.status(), &SidebarStatus::Loading);
    }

    #[test]
    fn hides_stellar_and_unknown() {
        let sidebar = loaded(&["normal", "fighting", "stellar", "fire", "unknown"]);
        let names: Vec<&str> = sidebar.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["normal", "fighting", "fire"]);
    }

    #[test]
    fn select_maps_entries_to_messages() {
        let sidebar = loaded(&["fire", "water", "stellar"]);
        assert_eq!(
            sidebar.select("Water"),
            Some(SidebarMessage::CategorySelected("water".to_string()))
        );
        assert_eq!(sidebar.select("all"), Some(SidebarMessage::ShowAll));
        assert_eq!(sidebar.select("stellar"), None);
        assert_eq!(sidebar.select("dragon"), None);
    }
}
