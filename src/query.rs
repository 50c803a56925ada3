//! List loading.
//!
//! [`TransferListQuery`] fetches transfer lists through a
//! [`TransferListSource`] and stores each result under the key of the exact
//! parameters it was fetched with. The parameters are cloned before the fetch
//! is awaited, so later draft edits cannot leak into an in-flight request.
//!
//! A response for a key that started a newer fetch in the meantime is dropped
//! (see [`CacheStore::complete_fetch`]). Responses for other keys land under
//! their own key and may simply never be read again.

use std::future::Future;
use std::sync::Arc;

use crate::alert::{Alert, AlertSink};
use crate::cache::{CacheKey, CacheStore, CachedValue, FetchTicket};
use crate::error::FetchError;
use crate::params::RequestParams;
use crate::types::{TransferListPage, TransferListRow};

/// Response of a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ListResponse {
    /// Rows of the requested page.
    pub rows: Vec<TransferListRow>,
    /// Error reported by the server instead of rows.
    pub error: Option<String>,
    /// Number of pages.
    pub page_count: u32,
    /// Number of rows across all pages.
    pub total_count: u64,
}

impl ListResponse {
    /// Converts the response into a page.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Server` if the response carries an `error`.
    pub fn into_page(self) -> Result<TransferListPage, FetchError> {
        match self.error {
            Some(error) => Err(FetchError::Server(error)),
            None => Ok(TransferListPage {
                rows: self.rows,
                page_count: self.page_count,
                total_count: self.total_count,
            }),
        }
    }
}

/// Server side of list fetching. How rows are assembled is opaque.
pub trait TransferListSource: Send + Sync {
    /// Fetches the transfer list page described by `params`.
    fn fetch_list(
        &self,
        params: &RequestParams,
    ) -> impl Future<Output = Result<ListResponse, FetchError>> + Send;

    /// Fetches every transfer of one account.
    fn fetch_account(
        &self,
        account_number: &str,
    ) -> impl Future<Output = Result<ListResponse, FetchError>> + Send;
}

/// Loads transfer lists into a shared [`CacheStore`].
pub struct TransferListQuery<S> {
    store: Arc<CacheStore>,
    source: S,
    alerts: Arc<dyn AlertSink>,
}

impl<S: TransferListSource> TransferListQuery<S> {
    /// Creates a loader writing to `store` and reporting failures to `alerts`.
    pub fn new(store: Arc<CacheStore>, source: S, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            store,
            source,
            alerts,
        }
    }

    /// Returns the source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the list for `committed`, fetching only if it is not cached or
    /// was marked stale.
    pub async fn load(&self, committed: &RequestParams) -> Option<TransferListPage> {
        let key = CacheKey::transfer_list(committed);
        if self.store.is_fresh(&key) {
            tracing::debug!(key = %key, "serving transfer list from cache");
            return self.store.page(&key);
        }
        self.refresh(committed).await
    }

    /// Fetches the list for `committed` regardless of the cache.
    ///
    /// On failure the cached entry is kept and returned, if there is one.
    pub async fn refresh(&self, committed: &RequestParams) -> Option<TransferListPage> {
        let snapshot = committed.clone();
        let ticket = self.store.begin_fetch(CacheKey::transfer_list(&snapshot));
        let result = self.source.fetch_list(&snapshot).await;
        self.settle(ticket, result)
    }

    /// Returns the transfer list of one account, fetching it if needed.
    pub async fn load_account(&self, account_number: &str) -> Option<TransferListPage> {
        let key = CacheKey::account_transfers(account_number);
        if self.store.is_fresh(&key) {
            return self.store.page(&key);
        }
        let ticket = self.store.begin_fetch(key);
        let result = self.source.fetch_account(account_number).await;
        self.settle(ticket, result)
    }

    fn settle(
        &self,
        ticket: FetchTicket,
        result: Result<ListResponse, FetchError>,
    ) -> Option<TransferListPage> {
        let key = ticket.key().clone();
        match result.and_then(ListResponse::into_page) {
            Ok(page) => {
                let rows = page.rows.len();
                if self
                    .store
                    .complete_fetch(ticket, CachedValue::TransferPage(page))
                {
                    tracing::info!(key = %key, rows, "loaded transfer list");
                }
                self.store.page(&key)
            }
            Err(error) => {
                self.store.abandon_fetch(ticket);
                tracing::warn!(key = %key, %error, "transfer list fetch failed");
                self.alerts.show(Alert::error(error.to_string()));
                self.store.page(&key)
            }
        }
    }
}
