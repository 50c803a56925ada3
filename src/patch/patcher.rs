//! Optimistic patching of cached read-models.
//!
//! After a mutation succeeds, [`CachePatcher::apply_update`] brings every
//! cached copy of the changed entities up to date without a refetch:
//!
//! | Change | Detail entry | Embedded in rows |
//! |---|---|---|
//! | request | `TransferRequest/{id}` overwritten | request-drawn fields merged |
//! | document | `TransferDocument/{request}` overwritten | `document` replaced |
//! | operation | `TransferOperations/{request}` upserted | `operations` upserted |
//! | deleted document | `TransferDocument/{request}` dropped | `document` reset |
//!
//! Rows live in the active `TransferList` entry and in every cached
//! `AccountTransfers` entry. Patches run synchronously in the order listed by
//! [`CacheUpdate`]; a later patch sees the effect of an earlier one. Absent
//! entries and rows are skipped: a patch never creates anything.

use super::{CacheUpdate, RowRepository};
use crate::cache::{CacheKey, CacheStore, CachedValue, Route};
use crate::params::RequestParams;
use crate::types::{
    upsert_by_id, RowDocument, TransferDocument, TransferListRow, TransferOperation,
    TransferRequest,
};

/// Counts of what one [`CachePatcher::apply_update`] call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatchReport {
    /// Detail entries overwritten, upserted into, or dropped.
    pub entries: usize,
    /// List rows replaced.
    pub rows: usize,
    /// Inactive list entries marked stale.
    pub stale_lists: usize,
}

impl PatchReport {
    /// Returns `true` if nothing in the cache changed.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.entries == 0 && self.rows == 0 && self.stale_lists == 0
    }
}

/// Applies [`CacheUpdate`]s to a [`CacheStore`].
#[derive(Debug, Clone, Copy)]
pub struct CachePatcher<'a> {
    store: &'a CacheStore,
    mark_inactive_lists_stale: bool,
}

impl<'a> CachePatcher<'a> {
    /// Creates a patcher over `store`. Inactive lists are marked stale after a
    /// patch that touched rows.
    #[must_use]
    pub const fn new(store: &'a CacheStore) -> Self {
        Self {
            store,
            mark_inactive_lists_stale: true,
        }
    }

    /// Sets whether inactive lists are marked stale after a row patch.
    #[must_use]
    pub const fn with_mark_inactive_lists_stale(self, mark_inactive_lists_stale: bool) -> Self {
        Self {
            mark_inactive_lists_stale,
            ..self
        }
    }

    /// Patches every cached copy of the entities in `update`.
    ///
    /// `active` is the committed parameter set whose list is on screen.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transfer_reconcile::cache::{CacheKey, CacheStore, CachedValue};
    /// use transfer_reconcile::params::RequestParams;
    /// use transfer_reconcile::patch::{CachePatcher, CacheUpdate};
    /// use transfer_reconcile::types::{RequestStatus, TransferListPage, TransferListRow};
    ///
    /// let store = CacheStore::new();
    /// let active = RequestParams::default();
    /// let row = TransferListRow { id: 10, ..TransferListRow::default() };
    /// store.insert(
    ///     CacheKey::transfer_list(&active),
    ///     CachedValue::TransferPage(TransferListPage { rows: vec![row.clone()], page_count: 1, total_count: 1 }),
    /// );
    ///
    /// let mut request = row.to_request();
    /// request.status = RequestStatus::Voided;
    /// let report = CachePatcher::new(&store).apply_update(&CacheUpdate::from_request(request), &active);
    ///
    /// assert_eq!(report.rows, 1);
    /// let page = store.page(&CacheKey::transfer_list(&active)).unwrap();
    /// assert_eq!(page.rows[0].status, RequestStatus::Voided);
    /// ```
    pub fn apply_update(&self, update: &CacheUpdate, active: &RequestParams) -> PatchReport {
        let mut report = PatchReport::default();
        if update.is_empty() {
            return report;
        }

        let active_key = CacheKey::transfer_list(active);
        let collections = self.row_collections(&active_key);

        if let Some(request) = &update.request {
            self.patch_request(request, &collections, &mut report);
        }

        let mut document_done = vec![false; update.documents.len()];
        for request in &update.requests {
            self.patch_request(request, &collections, &mut report);
            for (document, done) in update.documents.iter().zip(document_done.iter_mut()) {
                if document.operation_id == request.id {
                    self.patch_document(document, &collections, &mut report);
                    *done = true;
                }
            }
        }

        if let Some(document) = &update.document {
            self.patch_document(document, &collections, &mut report);
        }
        for (document, done) in update.documents.iter().zip(document_done) {
            if !done {
                self.patch_document(document, &collections, &mut report);
            }
        }

        for operation in update.operation.iter().chain(&update.operations) {
            self.patch_operation(operation, &collections, &mut report);
        }

        if let Some(request_id) = update.delete_document {
            self.reset_document(request_id, &collections, &mut report);
        }

        if self.mark_inactive_lists_stale && report.rows > 0 {
            report.stale_lists = self.mark_inactive_lists(&active_key);
        }

        tracing::debug!(
            active = %active_key,
            entries = report.entries,
            rows = report.rows,
            stale_lists = report.stale_lists,
            "applied optimistic cache update"
        );
        report
    }

    /// The active list plus every cached per-account list.
    fn row_collections(&self, active_key: &CacheKey) -> Vec<CacheKey> {
        let mut collections = vec![active_key.clone()];
        collections.extend(self.store.keys(Route::AccountTransfers));
        collections
    }

    fn patch_request(
        &self,
        request: &TransferRequest,
        collections: &[CacheKey],
        report: &mut PatchReport,
    ) {
        if self
            .store
            .update(&CacheKey::transfer_request(request.id), |value| {
                *value = CachedValue::Request(request.clone());
            })
        {
            report.entries += 1;
        }
        report.rows += self.patch_rows(collections, request.id, |row| row.merge_request(request));
    }

    fn patch_document(
        &self,
        document: &TransferDocument,
        collections: &[CacheKey],
        report: &mut PatchReport,
    ) {
        if self
            .store
            .update(&CacheKey::transfer_document(document.operation_id), |value| {
                *value = CachedValue::Document(document.clone());
            })
        {
            report.entries += 1;
        }
        report.rows += self.patch_rows(collections, document.operation_id, |row| {
            row.with_document(RowDocument::from(document))
        });
    }

    fn patch_operation(
        &self,
        operation: &TransferOperation,
        collections: &[CacheKey],
        report: &mut PatchReport,
    ) {
        let mut upserted = false;
        self.store
            .update(&CacheKey::transfer_operations(operation.request_id), |value| {
                if let CachedValue::Operations(operations) = value {
                    upsert_by_id(operations, operation);
                    upserted = true;
                }
            });
        if upserted {
            report.entries += 1;
        }
        report.rows += self.patch_rows(collections, operation.request_id, |row| {
            row.upsert_operation(operation)
        });
    }

    fn reset_document(&self, request_id: u64, collections: &[CacheKey], report: &mut PatchReport) {
        if self
            .store
            .remove(&CacheKey::transfer_document(request_id))
            .is_some()
        {
            report.entries += 1;
        }
        report.rows += self.patch_rows(collections, request_id, |row| {
            row.with_document(RowDocument::default())
        });
    }

    /// Rewrites the rows with `id` in each collection, returning how many were replaced.
    fn patch_rows<F>(&self, collections: &[CacheKey], id: u64, patch: F) -> usize
    where
        F: Fn(TransferListRow) -> TransferListRow,
    {
        collections
            .iter()
            .map(|key| {
                self.store
                    .find_rows(key, &|row| row.id == id)
                    .into_iter()
                    .map(|row| self.store.replace(key, patch(row)))
                    .filter(|replaced| *replaced)
                    .count()
            })
            .sum()
    }

    fn mark_inactive_lists(&self, active_key: &CacheKey) -> usize {
        self.store
            .keys(Route::TransferList)
            .iter()
            .filter(|key| *key != active_key)
            .filter(|key| self.store.mark_stale(key))
            .count()
    }
}
