//! Fetch request and response types.
//!
//! The controller never performs I/O. It emits [`FetchRequest`]s inside
//! actions; the shell hands them to the [`FetchWorker`](super::FetchWorker)
//! and feeds the resulting [`FetchResponse`]s back as events. Requests that
//! replace the displayed set carry the controller's generation so late
//! answers to superseded requests can be recognized and dropped.

use crate::domain::{Category, Item};
use serde::{Deserialize, Serialize};

/// Monotonically increasing token identifying the latest displayed-set request.
pub type Generation = u64;

/// What to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchKind {
    /// One server-paginated page, resolved to full items.
    Page {
        /// 1-based page number.
        page: usize,
        limit: usize,
        offset: usize,
    },

    /// Every member of a category, resolved to full items.
    Category {
        name: String,
    },

    /// The category vocabulary for the sidebar.
    Categories,
}

/// A fetch request tagged with the generation that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub generation: Generation,
    pub kind: FetchKind,
}

/// Macro to generate constructors for `FetchRequest` kinds.
macro_rules! fetch_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl FetchRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request for the given generation")]
                #[must_use]
                pub fn $builder_name(generation: Generation, $($field: $ty),*) -> Self {
                    Self {
                        generation,
                        kind: FetchKind::$variant { $($field,)* },
                    }
                }
            )*
        }
    };
}

fetch_request_builders! {
    page(Page { page: usize, limit: usize, offset: usize }),
    category(Category { name: String }),
    categories(Categories {}),
}

/// Results sent from the worker back to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchResponse {
    /// A server page was listed and its details resolved.
    PageLoaded {
        generation: Generation,
        page: usize,
        total_count: u64,
        /// Resolved items, ascending by identifier.
        items: Vec<Item>,
        /// Detail fetches that failed and were left out.
        dropped: usize,
    },

    /// A category's members were listed and resolved.
    CategoryLoaded {
        generation: Generation,
        category: String,
        /// Resolved items, ascending by identifier.
        items: Vec<Item>,
        dropped: usize,
    },

    /// The category vocabulary was fetched.
    CategoriesLoaded {
        categories: Vec<Category>,
    },

    /// The request failed as a whole.
    Failed {
        generation: Generation,
        kind: FetchKind,
        message: String,
    },
}

impl FetchResponse {
    /// Generation of the request this answers; `None` for sidebar data,
    /// which is not tied to the displayed set.
    #[must_use]
    pub const fn generation(&self) -> Option<Generation> {
        match self {
            Self::PageLoaded { generation, .. }
            | Self::CategoryLoaded { generation, .. } => Some(*generation),
            Self::Failed { generation, kind, .. } => match kind {
                FetchKind::Categories => None,
                _ => Some(*generation),
            },
            Self::CategoriesLoaded { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_kind_and_generation() {
        let req = FetchRequest::page(3, 2, 20, 20);
        assert_eq!(req.generation, 3);
        assert_eq!(req.kind, FetchKind::Page { page: 2, limit: 20, offset: 20 });

        let req = FetchRequest::category(4, "fire".to_string());
        assert_eq!(req.kind, FetchKind::Category { name: "fire".to_string() });

        assert_eq!(FetchRequest::categories(0).kind, FetchKind::Categories);
    }

    #[test]
    fn sidebar_responses_have_no_generation() {
        let failed = FetchResponse::Failed {
            generation: 9,
            kind: FetchKind::Categories,
            message: "down".to_string(),
        };
        assert_eq!(failed.generation(), None);
        assert_eq!(FetchResponse::CategoriesLoaded { categories: vec![] }.generation(), None);

        let failed_page = FetchResponse::Failed {
            generation: 9,
            kind: FetchKind::Page { page: 1, limit: 20, offset: 0 },
            message: "down".to_string(),
        };
        assert_eq!(failed_page.generation(), Some(9));
    }
}
