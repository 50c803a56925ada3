//! The transfers list console.
//!
//! [`TransferConsole`] ties one mounted list view together: the parameter
//! reconciler seeded from the location, the list loader, the mutation gateway,
//! and the cache patcher that settles mutation results. All of them share one
//! [`CacheStore`] passed in by the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use transfer_reconcile::prelude::*;
//!
//! let mut console = TransferConsole::new(
//!     ConsoleConfig::from_env()?,
//!     Arc::new(CacheStore::new()),
//!     api.clone(),
//!     api,
//!     MemoryLocation::new("?status=pending"),
//!     Arc::new(TracingAlertSink),
//! );
//! console.open().await;
//! console.set_parameter(ParameterChange::Page(1));
//! let page = console.commit().await;
//! console.run_mutation(TransferMutation::Cancel { request_id: 10 }).await;
//!
//! // keep editing the draft while the fetch runs
//! let committed = console.commit_parameters();
//! let loader = console.loader();
//! let fetch = tokio::spawn(async move { loader.load(&committed).await });
//! console.set_parameter(ParameterChange::Search("smith".into()));
//! let page = fetch.await?;
//! ```

use std::sync::Arc;

use crate::alert::AlertSink;
use crate::cache::{CacheKey, CacheStore};
use crate::config::ConsoleConfig;
use crate::mutation::{MutationGateway, Settlement, TransferMutation};
use crate::params::{ParamKey, ParameterChange, ParameterReconciler, QueryLocation, RequestParams};
use crate::patch::{CachePatcher, PatchReport};
use crate::query::{TransferListQuery, TransferListSource};
use crate::types::TransferListPage;

/// One mounted transfers list.
pub struct TransferConsole<S, G, L> {
    config: ConsoleConfig,
    store: Arc<CacheStore>,
    reconciler: ParameterReconciler<L>,
    query: Arc<TransferListQuery<S>>,
    gateway: G,
    alerts: Arc<dyn AlertSink>,
}

impl<S, G, L> TransferConsole<S, G, L>
where
    S: TransferListSource,
    G: MutationGateway,
    L: QueryLocation,
{
    /// Mounts a console, seeding the parameters from `location`.
    pub fn new(
        config: ConsoleConfig,
        store: Arc<CacheStore>,
        source: S,
        gateway: G,
        location: L,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            query: Arc::new(TransferListQuery::new(
                Arc::clone(&store),
                source,
                Arc::clone(&alerts),
            )),
            reconciler: ParameterReconciler::from_location(location),
            config,
            store,
            gateway,
            alerts,
        }
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Returns the shared cache.
    pub const fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    /// Returns the parameter reconciler.
    pub const fn reconciler(&self) -> &ParameterReconciler<L> {
        &self.reconciler
    }

    /// Returns the list loader.
    pub fn query(&self) -> &TransferListQuery<S> {
        &self.query
    }

    /// Returns a handle to the list loader that does not borrow the console.
    ///
    /// Pair it with [`commit_parameters`](Self::commit_parameters) to load a
    /// committed snapshot while the draft stays editable.
    pub fn loader(&self) -> Arc<TransferListQuery<S>> {
        Arc::clone(&self.query)
    }

    /// Returns the committed parameters.
    pub const fn committed(&self) -> &RequestParams {
        self.reconciler.committed()
    }

    /// Returns the page size in effect for the committed parameters.
    pub fn effective_limit(&self) -> u32 {
        self.committed().limit.unwrap_or(self.config.default_limit)
    }

    /// Returns the cached list for the committed parameters, if loaded.
    pub fn current_page(&self) -> Option<TransferListPage> {
        self.store.page(&CacheKey::transfer_list(self.committed()))
    }

    /// Loads the list for the parameters the console was mounted with.
    pub async fn open(&mut self) -> Option<TransferListPage> {
        let committed = self.committed().clone();
        self.query.load(&committed).await
    }

    /// Changes one draft field. Nothing is fetched.
    pub fn set_parameter(&mut self, change: ParameterChange) {
        self.reconciler.set_parameter(change);
    }

    /// Changes one draft field from raw control values.
    ///
    /// Page sizes outside [`ConsoleConfig::page_size_options`] are ignored.
    /// Returns `true` if the draft was updated.
    pub fn set_raw(&mut self, key: ParamKey, values: &[&str]) -> bool {
        if let Some(ParameterChange::Limit(limit)) = ParameterChange::from_raw(key, values) {
            if !self.config.accepts_page_size(limit) {
                tracing::warn!(limit, "ignoring page size that is not offered");
                return false;
            }
        }
        self.reconciler.set_raw(key, values)
    }

    /// Commits the draft and returns the snapshot that keys the next fetch.
    ///
    /// Nothing is fetched; load the snapshot through [`loader`](Self::loader).
    pub fn commit_parameters(&mut self) -> RequestParams {
        self.reconciler.commit_parameters()
    }

    /// Commits the draft and loads the list it describes.
    ///
    /// The console stays borrowed until the fetch settles. Use
    /// [`commit_parameters`](Self::commit_parameters) and
    /// [`loader`](Self::loader) to keep editing the draft meanwhile.
    pub async fn commit(&mut self) -> Option<TransferListPage> {
        let committed = self.commit_parameters();
        let loader = self.loader();
        loader.load(&committed).await
    }

    /// Refetches the committed list, ignoring the cache.
    pub async fn reload(&self) -> Option<TransferListPage> {
        let committed = self.committed().clone();
        self.query.refresh(&committed).await
    }

    /// Submits `mutation` and settles its payload.
    ///
    /// Returns `None` if the mutation never produced a payload.
    pub async fn run_mutation(&self, mutation: TransferMutation) -> Option<PatchReport> {
        tracing::debug!(mutation = %mutation, "submitting mutation");
        let result = self.gateway.submit(&mutation).await;
        let settlement = self.settlement();
        match result {
            Ok(payload) => Some(settlement.settle(&mutation, payload, self.committed())),
            Err(error) => {
                settlement.fail(&mutation, &error);
                None
            }
        }
    }

    fn settlement(&self) -> Settlement<'_> {
        Settlement::new(
            CachePatcher::new(&self.store)
                .with_mark_inactive_lists_stale(self.config.mark_inactive_lists_stale),
            self.alerts.as_ref(),
            self.config.forward_messages,
        )
    }
}
