//! Row-level access to cached list pages.

use crate::cache::{CacheKey, CacheStore, CachedValue};
use crate::types::TransferListRow;

/// Reads and writes rows of the cached list under a key.
///
/// Rows are handed out as copies; a changed row goes back through
/// [`replace`](RowRepository::replace). Neither method creates cache entries
/// or rows.
pub trait RowRepository {
    /// Returns copies of the rows under `key` that satisfy `predicate`.
    ///
    /// Returns an empty vector if `key` holds no list.
    fn find_rows(
        &self,
        key: &CacheKey,
        predicate: &dyn Fn(&TransferListRow) -> bool,
    ) -> Vec<TransferListRow>;

    /// Replaces the row with `row.id` under `key`.
    ///
    /// Returns `false` if the key holds no list or no row with that id.
    fn replace(&self, key: &CacheKey, row: TransferListRow) -> bool;
}

impl RowRepository for CacheStore {
    fn find_rows(
        &self,
        key: &CacheKey,
        predicate: &dyn Fn(&TransferListRow) -> bool,
    ) -> Vec<TransferListRow> {
        self.page(key)
            .map(|page| page.rows.into_iter().filter(|row| predicate(row)).collect())
            .unwrap_or_default()
    }

    fn replace(&self, key: &CacheKey, row: TransferListRow) -> bool {
        let mut replaced = false;
        self.update(key, |value| {
            if let CachedValue::TransferPage(page) = value {
                if let Some(existing) = page.rows.iter_mut().find(|existing| existing.id == row.id) {
                    *existing = row;
                    replaced = true;
                }
            }
        });
        replaced
    }
}
