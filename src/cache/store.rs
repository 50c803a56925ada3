//! Keyed store of fetched query results.
//!
//! # Design
//!
//! - **Explicit service**: one `CacheStore` is created per console and passed
//!   by reference (usually behind an `Arc`) to the list loader and the patcher
//! - **Update, never create**: [`CacheStore::update`] is a no-op for absent
//!   keys; only fetch completion and [`CacheStore::insert`] add entries
//! - **Fetch tickets**: each fetch takes a ticket; a response for a key that
//!   has since started a newer fetch is discarded. Only keys with a fetch in
//!   flight are tracked
//! - **Stale marking**: an entry can be flagged stale, keeping it readable
//!   until the next fetch for its key replaces it

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use static_assertions::assert_impl_all;

use super::{CacheKey, Route};
use crate::types::{TransferDocument, TransferListPage, TransferOperation, TransferRequest};

/// A cached query result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    /// A page of list rows.
    TransferPage(TransferListPage),
    /// A request detail.
    Request(TransferRequest),
    /// A request's document.
    Document(TransferDocument),
    /// A request's operations.
    Operations(Vec<TransferOperation>),
}

impl CachedValue {
    /// Returns the page, if this value is one.
    #[must_use]
    pub const fn as_page(&self) -> Option<&TransferListPage> {
        match self {
            Self::TransferPage(page) => Some(page),
            _ => None,
        }
    }
}

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: CacheKey,
    generation: u64,
}

impl FetchTicket {
    /// Returns the key being fetched.
    #[must_use]
    pub const fn key(&self) -> &CacheKey {
        &self.key
    }
}

#[derive(Debug)]
struct CacheEntry {
    value: CachedValue,
    stale: bool,
}

#[derive(Debug, Default)]
struct Entries {
    values: FxHashMap<CacheKey, CacheEntry>,
    /// Latest ticket per key with a fetch in flight.
    in_flight: FxHashMap<CacheKey, u64>,
    /// Store-wide, so a generation is never reused for a key.
    next_generation: u64,
}

/// Shared store of query results.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: RwLock<Entries>,
}

assert_impl_all!(CacheStore: Send, Sync);

impl CacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the value under `key`.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        self.entries
            .read()
            .values
            .get(key)
            .map(|entry| entry.value.clone())
    }

    /// Returns a copy of the page under `key`.
    #[must_use]
    pub fn page(&self, key: &CacheKey) -> Option<TransferListPage> {
        self.entries
            .read()
            .values
            .get(key)
            .and_then(|entry| entry.value.as_page().cloned())
    }

    /// Returns `true` if `key` holds a value.
    #[must_use]
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.read().values.contains_key(key)
    }

    /// Returns `true` if `key` holds a value that is not stale.
    #[must_use]
    pub fn is_fresh(&self, key: &CacheKey) -> bool {
        self.entries
            .read()
            .values
            .get(key)
            .is_some_and(|entry| !entry.stale)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().values.len()
    }

    /// Returns `true` if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the keys under `route`, sorted.
    #[must_use]
    pub fn keys(&self, route: Route) -> Vec<CacheKey> {
        let mut keys: Vec<CacheKey> = self
            .entries
            .read()
            .values
            .keys()
            .filter(|key| key.route() == route)
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Stores a fresh value under `key`, returning the previous one.
    pub fn insert(&self, key: CacheKey, value: CachedValue) -> Option<CachedValue> {
        self.entries
            .write()
            .values
            .insert(key, CacheEntry { value, stale: false })
            .map(|entry| entry.value)
    }

    /// Mutates the value under `key` in place.
    ///
    /// Returns `false` without calling `mutate` when the key is absent.
    ///
    /// `mutate` runs under the store's write lock, which is not re-entrant:
    /// it must not call back into this store, or it deadlocks. Read whatever
    /// it needs before calling `update`.
    pub fn update<F>(&self, key: &CacheKey, mutate: F) -> bool
    where
        F: FnOnce(&mut CachedValue),
    {
        match self.entries.write().values.get_mut(key) {
            Some(entry) => {
                mutate(&mut entry.value);
                true
            }
            None => false,
        }
    }

    /// Removes the value under `key`.
    pub fn remove(&self, key: &CacheKey) -> Option<CachedValue> {
        self.entries
            .write()
            .values
            .remove(key)
            .map(|entry| entry.value)
    }

    /// Flags the entry under `key` as stale. Returns `false` if absent.
    pub fn mark_stale(&self, key: &CacheKey) -> bool {
        match self.entries.write().values.get_mut(key) {
            Some(entry) => {
                entry.stale = true;
                true
            }
            None => false,
        }
    }

    /// Starts a fetch for `key`, superseding any fetch already in flight for it.
    pub fn begin_fetch(&self, key: CacheKey) -> FetchTicket {
        let mut entries = self.entries.write();
        entries.next_generation += 1;
        let generation = entries.next_generation;
        entries.in_flight.insert(key.clone(), generation);
        FetchTicket { key, generation }
    }

    /// Stores the result of the fetch behind `ticket`.
    ///
    /// Returns `false` and stores nothing if a newer fetch for the same key
    /// was started after this one.
    pub fn complete_fetch(&self, ticket: FetchTicket, value: CachedValue) -> bool {
        let mut entries = self.entries.write();
        if !Self::settle_ticket(&mut entries, &ticket) {
            tracing::debug!(key = %ticket.key, "discarding superseded fetch result");
            return false;
        }
        entries
            .values
            .insert(ticket.key, CacheEntry { value, stale: false });
        true
    }

    /// Ends the fetch behind `ticket` without storing anything, e.g. after a
    /// failed request. The cached entry is left as it is.
    pub fn abandon_fetch(&self, ticket: FetchTicket) {
        Self::settle_ticket(&mut self.entries.write(), &ticket);
    }

    /// Returns the number of keys with a fetch in flight.
    #[must_use]
    pub fn fetches_in_flight(&self) -> usize {
        self.entries.read().in_flight.len()
    }

    /// Stops tracking `ticket`'s key if `ticket` is its latest fetch.
    fn settle_ticket(entries: &mut Entries, ticket: &FetchTicket) -> bool {
        let latest = entries.in_flight.get(&ticket.key) == Some(&ticket.generation);
        if latest {
            entries.in_flight.remove(&ticket.key);
        }
        latest
    }
}
