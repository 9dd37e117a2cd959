//! Filter mode and pagination source types.
//!
//! These enums drive how the displayed set is obtained and paginated.
//!
//! # State Machine
//!
//! The controller operates in one of two filter modes:
//! - **Unfiltered**: pages come from the server, one request per page
//! - **Category**: every member is resolved once and paged locally
//!
//! Independently, an active search always pages locally over its matches.
//! [`PaginationSource`] captures the resulting combination.
//!
//! # Example
//!
//! ```rust
//! use dexview::app::modes::{FilterMode, PaginationSource};
//!
//! let mode = FilterMode::Category("fire".to_string());
//! assert_eq!(mode.category(), Some("fire"));
//! assert_eq!(PaginationSource::Server { total_count: 151 }.total_pages(), 8);
//! ```

use super::pagination::ITEMS_PER_PAGE;

/// Which items form the base set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// The whole catalog, paginated by the server.
    #[default]
    Unfiltered,

    /// Members of one category, resolved up front and paginated locally.
    Category(String),
}

impl FilterMode {
    /// Category name in category mode.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Unfiltered => None,
            Self::Category(name) => Some(name),
        }
    }

    #[must_use]
    pub const fn is_unfiltered(&self) -> bool {
        matches!(self, Self::Unfiltered)
    }
}

/// Where page slicing happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationSource {
    /// Pages are requested with `limit`/`offset`; the total comes from the server.
    Server {
        total_count: u64,
    },

    /// Pages are slices of an in-memory set of `len` items.
    Client {
        len: usize,
    },
}

impl PaginationSource {
    /// Number of pages, never less than one.
    #[must_use]
    pub fn total_pages(self) -> usize {
        let len = match self {
            Self::Server { total_count } => usize::try_from(total_count).unwrap_or(usize::MAX),
            Self::Client { len } => len,
        };
        len.div_ceil(ITEMS_PER_PAGE).max(1)
    }

    #[must_use]
    pub const fn is_server(self) -> bool {
        matches!(self, Self::Server { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up_with_minimum_one() {
        assert_eq!(PaginationSource::Server { total_count: 151 }.total_pages(), 8);
        assert_eq!(PaginationSource::Server { total_count: 160 }.total_pages(), 8);
        assert_eq!(PaginationSource::Server { total_count: 0 }.total_pages(), 1);
        assert_eq!(PaginationSource::Client { len: 0 }.total_pages(), 1);
        assert_eq!(PaginationSource::Client { len: 21 }.total_pages(), 2);
    }
}
