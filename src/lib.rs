//! # transfer-reconcile
//!
//! Request-parameter reconciliation and optimistic cache patching for the
//! transfers list of an account administration console.
//!
//! ## Overview
//!
//! - **Parameters**: a draft/committed filter state for a paginated list,
//!   persisted to the URL query string on commit ([`params`])
//! - **Cache**: results keyed by route and discriminator, with superseded
//!   fetches dropped ([`cache`], [`query`])
//! - **Patching**: after a mutation, every cached copy of the changed request,
//!   document, or operation is merged in place ([`patch`], [`mutation`])
//! - **Console**: the pieces wired together for one list view ([`console`])
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for entities, payloads, and parameters
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use transfer_reconcile::prelude::*;
//!
//! let mut reconciler = ParameterReconciler::from_location(MemoryLocation::default());
//! reconciler.set_parameter(ParameterChange::Status(vec![RequestStatus::Approved.into()]));
//! reconciler.set_parameter(ParameterChange::Page(1));
//! assert!(reconciler.has_pending_changes());
//!
//! let committed = reconciler.commit_parameters();
//! assert_eq!(committed.page, Some(1));
//! assert_eq!(reconciler.location().search(), "?status=approved&page=1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the types needed to mount a console and drive it.
///
/// # Usage
///
/// ```rust
/// use transfer_reconcile::prelude::*;
/// ```
pub mod prelude {
    pub use crate::alert::{Alert, AlertSink, CollectingAlertSink, Severity, TracingAlertSink};
    pub use crate::cache::{CacheKey, CacheStore, CachedValue, Route};
    pub use crate::config::ConsoleConfig;
    pub use crate::console::TransferConsole;
    pub use crate::error::{ConfigError, FetchError, ParamError};
    pub use crate::mutation::{MutationGateway, MutationPayload, TransferMutation};
    pub use crate::params::{
        MemoryLocation, ParamKey, ParameterChange, ParameterReconciler, QueryLocation,
        RequestParams,
    };
    pub use crate::patch::{CachePatcher, CacheUpdate, PatchReport, RowRepository};
    pub use crate::query::{ListResponse, TransferListQuery, TransferListSource};
    pub use crate::types::*;
}

pub mod alert;
pub mod cache;
pub mod config;
pub mod console;
pub mod error;
pub mod mutation;
pub mod params;
pub mod patch;
pub mod query;
pub mod types;
