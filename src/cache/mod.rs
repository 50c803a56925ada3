//! Keyed cache of fetched results.
//!
//! - [`CacheKey`], [`Route`]: addressing scheme shared by loaders and patchers
//! - [`CacheStore`], [`CachedValue`], [`FetchTicket`]: the store itself

mod key;
mod store;

pub use key::{CacheKey, Route};
pub use store::{CacheStore, CachedValue, FetchTicket};
