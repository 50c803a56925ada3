//! URL query-string codec for [`RequestParams`].
//!
//! Every allow-listed key maps to one parameter, except `status`, which is
//! written once per selected status. Keys are written in [`ParamKey::ALL`]
//! order and only when set, so equal parameters always produce the same
//! string. That string doubles as the cache discriminator of a list query.
//!
//! Parsing accumulates repeated `status` entries, drops keys outside the
//! allow-list, and skips values that do not coerce.
//!
//! # Examples
//!
//! ```rust
//! use transfer_reconcile::params::{from_query_string, to_query_string, RequestParams};
//! use transfer_reconcile::types::{RequestStatus, StatusFilter};
//!
//! let params = RequestParams {
//!     status: StatusFilter::from_statuses([RequestStatus::Approved, RequestStatus::Pending]),
//!     page: Some(2),
//!     search: Some("smith".into()),
//!     ..RequestParams::default()
//! };
//!
//! let query = to_query_string(&params);
//! assert_eq!(query, "status=approved&status=pending&page=2&search=smith");
//! assert_eq!(from_query_string(&query), params);
//! ```

use url::form_urlencoded;

use super::{ParamKey, ParameterChange, RequestParams};

/// Serializes `params` to a query string without the leading `?`.
#[must_use]
pub fn to_query_string(params: &RequestParams) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for key in ParamKey::ALL {
        let name = key.as_str();
        match key {
            ParamKey::Status => {
                for status in params.status.statuses() {
                    serializer.append_pair(name, status.as_str());
                }
            }
            ParamKey::Page => append_display(&mut serializer, name, params.page),
            ParamKey::Limit => append_display(&mut serializer, name, params.limit),
            ParamKey::Search => append_display(&mut serializer, name, params.search.as_ref()),
            ParamKey::ManagerId => append_display(&mut serializer, name, params.manager_id),
            ParamKey::EffectiveMonth => {
                append_display(&mut serializer, name, params.effective_month.as_ref());
            }
            ParamKey::TransferType => append_display(&mut serializer, name, params.transfer_type),
            ParamKey::Stage => append_display(&mut serializer, name, params.stage),
        }
    }
    serializer.finish()
}

fn append_display<T: std::fmt::Display>(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    name: &str,
    value: Option<T>,
) {
    if let Some(value) = value {
        serializer.append_pair(name, &value.to_string());
    }
}

/// Parses a query string (with or without the leading `?`).
///
/// The last occurrence wins for single-valued keys.
#[must_use]
pub fn from_query_string(query: &str) -> RequestParams {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = RequestParams::default();
    let mut statuses = Vec::new();

    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        let Some(key) = ParamKey::from_query_name(&name) else {
            tracing::trace!(key = %name, "dropping query parameter outside the allow-list");
            continue;
        };
        if key == ParamKey::Status {
            statuses.push(value.into_owned());
            continue;
        }
        match ParameterChange::from_raw(key, &[&*value]) {
            // a page size in the URL keeps the page from the URL
            Some(ParameterChange::Limit(limit)) => params.limit = Some(limit),
            Some(change) => params = change.apply(params),
            None => tracing::debug!(key = %key, value = %value, "ignoring unparsable query value"),
        }
    }

    if !statuses.is_empty() {
        let raw: Vec<&str> = statuses.iter().map(String::as_str).collect();
        if let Some(change) = ParameterChange::from_raw(ParamKey::Status, &raw) {
            params = change.apply(params);
        }
    }
    params
}
