//! Query parameter reconciliation.
//!
//! UI controls propose filter and pagination changes against a *draft*;
//! nothing is fetched and the URL is not touched until the draft is
//! *committed*.
//!
//! - [`RequestParams`]: the filter/pagination descriptor
//! - [`ParamKey`]: the allow-list of query parameters
//! - [`ParameterChange`]: a typed single-field change, with raw coercion
//! - [`to_query_string`] / [`from_query_string`]: URL codec
//! - [`reduce`], [`ReconcilerState`], [`ReconcilerAction`]: the pure reducer
//! - [`ParameterReconciler`], [`QueryLocation`]: the stateful wrapper that
//!   persists committed parameters

mod query_string;
mod reconciler;
mod reducer;
mod request_params;

pub use query_string::{from_query_string, to_query_string};
pub use reconciler::{MemoryLocation, ParameterReconciler, QueryLocation};
pub use reducer::{reduce, ReconcilerAction, ReconcilerState};
pub use request_params::{ParamKey, ParameterChange, RequestParams};
