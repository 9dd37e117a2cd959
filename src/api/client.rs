//! HTTP client for the upstream catalog API.
//!
//! [`CatalogApi`] is the seam between the fetch worker and the network: the
//! worker only ever talks to the trait, so tests drive it with an in-memory
//! implementation. [`PokeApiClient`] is the `reqwest` implementation.
//!
//! Every call is a single stateless GET. There is no cache and no retry;
//! a failed call surfaces as [`DexError::Transport`] or, when the body does
//! not match the endpoint schema, [`DexError::Decode`].

use super::schema::{CategoryListResponse, CategoryMembersResponse, ItemResponse, ListPageResponse};
use crate::domain::{Category, DexError, Item, ListReference, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default upstream endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Upper bound for the category listing; the upstream paginates `/type` at 20 by default.
const CATEGORY_LIST_LIMIT: usize = 100;

/// Category names the upstream lists but that no item can be filtered by.
pub const NON_SELECTABLE_CATEGORIES: [&str; 2] = ["stellar", "unknown"];

/// One page of references plus the catalog-wide total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    pub references: Vec<ListReference>,
    pub total_count: u64,
}

/// Read-only operations against the catalog API.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches `limit` references starting at `offset`.
    async fn list_page(&self, limit: usize, offset: usize) -> Result<ListPage>;

    /// Resolves a reference locator to a full item.
    async fn get_detail(&self, locator: &str) -> Result<Item>;

    /// Fetches the category names usable as filters.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Fetches every reference tagged with `category`, unpaginated.
    async fn items_by_category(&self, category: &str) -> Result<Vec<ListReference>>;
}

/// Drops the placeholder categories that cannot be used as filters.
///
/// # Examples
///
/// ```
/// use dexview::api::filter_selectable_categories;
/// use dexview::domain::Category;
///
/// let all = vec![Category::new("fire"), Category::new("stellar"), Category::new("Unknown")];
/// let names: Vec<_> = filter_selectable_categories(all).into_iter().map(|c| c.name).collect();
/// assert_eq!(names, vec!["fire"]);
/// ```
#[must_use]
pub fn filter_selectable_categories(categories: Vec<Category>) -> Vec<Category> {
    categories
        .into_iter()
        .filter(|c| {
            !NON_SELECTABLE_CATEGORIES
                .iter()
                .any(|excluded| c.name.eq_ignore_ascii_case(excluded))
        })
        .collect()
}

/// `reqwest`-backed client for the PokéAPI.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl PokeApiClient {
    /// Builds a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Config`] if the HTTP client cannot be constructed
    /// (e.g. the TLS backend fails to initialize).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dexview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DexError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn list_page_url(&self, limit: usize, offset: usize) -> String {
        format!("{}/pokemon?limit={limit}&offset={offset}", self.base_url)
    }

    fn categories_url(&self) -> String {
        format!("{}/type?limit={CATEGORY_LIST_LIMIT}", self.base_url)
    }

    /// Members URL for `category`. The name is one percent-encoded path
    /// segment, so `/` or `?` in it cannot change the request.
    fn category_url(&self, category: &str) -> Result<String> {
        let invalid = || DexError::Config(format!("invalid base URL: {}", self.base_url));

        let mut url = reqwest::Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .push("type")
            .push(&category.trim().to_lowercase());
        Ok(url.into())
    }

    /// Issues a GET and decodes the body into `T`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.http.get(url).send().await.map_err(|e| DexError::Transport {
            url: url.to_string(),
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DexError::Transport {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| DexError::Transport {
            url: url.to_string(),
            status: Some(status.as_u16()),
            message: format!("failed to read body: {e}"),
        })?;

        serde_json::from_slice(&body).map_err(|e| DexError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl CatalogApi for PokeApiClient {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_page(&self, limit: usize, offset: usize) -> Result<ListPage> {
        let url = self.list_page_url(limit, offset);
        let response: ListPageResponse = self.get_json(&url).await?;

        tracing::debug!(
            returned = response.results.len(),
            total_count = response.count,
            "list page fetched"
        );

        Ok(ListPage {
            references: response.results.into_iter().map(Into::into).collect(),
            total_count: response.count,
        })
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_detail(&self, locator: &str) -> Result<Item> {
        let response: ItemResponse = self.get_json(locator).await?;
        Ok(response.into())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let url = self.categories_url();
        let response: CategoryListResponse = self.get_json(&url).await?;
        Ok(filter_selectable_categories(response.into_categories()))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn items_by_category(&self, category: &str) -> Result<Vec<ListReference>> {
        let url = self.category_url(category)?;
        let response: CategoryMembersResponse = self.get_json(&url).await?;
        let references = response.into_references();
        tracing::debug!(category = %category, members = references.len(), "category members fetched");
        Ok(references)
    }
}
