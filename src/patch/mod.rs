//! Optimistic cache patching.
//!
//! - [`CacheUpdate`]: entities changed by a successful mutation
//! - [`RowRepository`]: row-level access to cached list pages
//! - [`CachePatcher`], [`PatchReport`]: the patch algorithm

mod patcher;
mod repository;
mod update;

pub use patcher::{CachePatcher, PatchReport};
pub use repository::RowRepository;
pub use update::CacheUpdate;
