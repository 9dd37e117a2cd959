//! Fetch execution with fan-out/join.
//!
//! [`FetchWorker`] turns a [`FetchRequest`] into a [`FetchResponse`] by
//! calling the [`CatalogApi`]. Listing failures fail the whole request;
//! individual detail failures inside a fan-out are logged and dropped so
//! that one bad record never blanks a page.

use crate::api::CatalogApi;
use crate::domain::{Item, ListReference, Result};
use crate::worker::messages::{FetchKind, FetchRequest, FetchResponse};
use futures_util::future;
use std::sync::Arc;
use tracing::Instrument;

/// Outcome of resolving a batch of references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Successfully resolved items, ascending by identifier.
    pub items: Vec<Item>,
    /// Number of references whose detail fetch failed.
    pub dropped: usize,
}

/// Executes fetch requests against a catalog API.
///
/// Cheap to clone; the API handle is shared.
#[derive(Debug)]
pub struct FetchWorker<A: ?Sized> {
    api: Arc<A>,
}

impl<A: ?Sized> Clone for FetchWorker<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: CatalogApi + ?Sized> FetchWorker<A> {
    #[must_use]
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Resolves every reference concurrently and waits for all of them.
    ///
    /// Each outcome is collected independently: a failure does not cancel
    /// or fail its siblings. Failed entries are logged and counted.
    #[tracing::instrument(level = "debug", skip(self, references), fields(count = references.len()))]
    pub async fn resolve_all(&self, references: &[ListReference]) -> Resolved {
        let fetches = references.iter().map(|reference| self.api.get_detail(&reference.url));
        let outcomes = future::join_all(fetches).await;

        let mut items = Vec::with_capacity(outcomes.len());
        let mut dropped = 0;

        for (reference, outcome) in references.iter().zip(outcomes) {
            match outcome {
                Ok(item) => items.push(item),
                Err(e) => {
                    dropped += 1;
                    tracing::warn!(
                        name = %reference.name,
                        id_hint = ?reference.id_hint(),
                        error = %e,
                        "detail fetch failed, dropping entry"
                    );
                }
            }
        }

        items.sort_by_key(|item| item.id);

        tracing::debug!(resolved = items.len(), dropped = dropped, "fan-out joined");

        Resolved { items, dropped }
    }

    async fn load_page(&self, limit: usize, offset: usize) -> Result<(u64, Resolved)> {
        let page = self.api.list_page(limit, offset).await?;
        let resolved = self.resolve_all(&page.references).await;
        Ok((page.total_count, resolved))
    }

    async fn load_category(&self, name: &str) -> Result<Resolved> {
        let references = self.api.items_by_category(name).await?;
        Ok(self.resolve_all(&references).await)
    }

    /// Processes a request and returns the response for the controller.
    ///
    /// Never fails: whole-request errors become [`FetchResponse::Failed`].
    pub async fn handle(&self, request: FetchRequest) -> FetchResponse {
        let span = tracing::debug_span!(
            "worker_handle_request",
            generation = request.generation,
            kind = ?request.kind
        );
        self.execute(request).instrument(span).await
    }

    async fn execute(&self, request: FetchRequest) -> FetchResponse {
        let FetchRequest { generation, kind } = request;

        let outcome = match &kind {
            FetchKind::Page { page, limit, offset } => {
                self.load_page(*limit, *offset)
                    .await
                    .map(|(total_count, resolved)| FetchResponse::PageLoaded {
                        generation,
                        page: *page,
                        total_count,
                        items: resolved.items,
                        dropped: resolved.dropped,
                    })
            }
            FetchKind::Category { name } => {
                self.load_category(name)
                    .await
                    .map(|resolved| FetchResponse::CategoryLoaded {
                        generation,
                        category: name.clone(),
                        items: resolved.items,
                        dropped: resolved.dropped,
                    })
            }
            FetchKind::Categories => self
                .api
                .list_categories()
                .await
                .map(|categories| FetchResponse::CategoriesLoaded { categories }),
        };

        outcome.unwrap_or_else(|e| {
            tracing::error!(generation = generation, kind = ?kind, error = %e, "fetch failed");
            FetchResponse::Failed {
                generation,
                kind,
                message: e.to_string(),
            }
        })
    }
}
