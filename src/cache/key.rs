//! Cache addressing.
//!
//! A [`CacheKey`] is a route plus a discriminator that makes it unique per
//! distinct query. The patcher finds entries only through these keys.

use std::fmt;

use crate::params::{to_query_string, RequestParams};

/// Identifies the kind of query a cache entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Route {
    /// The filtered transfer list, discriminated by its query string.
    TransferList,
    /// Every transfer of one account, discriminated by account number.
    AccountTransfers,
    /// One request, discriminated by request id.
    TransferRequest,
    /// The document of one request, discriminated by request id.
    TransferDocument,
    /// The operations of one request, discriminated by request id.
    TransferOperations,
}

impl Route {
    /// Returns the route path.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TransferList => "/transfers/requests",
            Self::AccountTransfers => "/accounts/transfers",
            Self::TransferRequest => "/transfers/request",
            Self::TransferDocument => "/transfers/document",
            Self::TransferOperations => "/transfers/operations",
        }
    }
}

/// Address of one cached query result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    route: Route,
    discriminator: String,
}

impl CacheKey {
    /// Creates a key from its parts.
    #[must_use]
    pub fn new(route: Route, discriminator: impl Into<String>) -> Self {
        Self {
            route,
            discriminator: discriminator.into(),
        }
    }

    /// Key of the transfer list fetched with `params`.
    #[must_use]
    pub fn transfer_list(params: &RequestParams) -> Self {
        Self::new(Route::TransferList, to_query_string(params))
    }

    /// Key of the transfer list of one account.
    #[must_use]
    pub fn account_transfers(account_number: &str) -> Self {
        Self::new(Route::AccountTransfers, account_number)
    }

    /// Key of a request detail.
    #[must_use]
    pub fn transfer_request(request_id: u64) -> Self {
        Self::new(Route::TransferRequest, request_id.to_string())
    }

    /// Key of the document of a request.
    #[must_use]
    pub fn transfer_document(request_id: u64) -> Self {
        Self::new(Route::TransferDocument, request_id.to_string())
    }

    /// Key of the operations of a request.
    #[must_use]
    pub fn transfer_operations(request_id: u64) -> Self {
        Self::new(Route::TransferOperations, request_id.to_string())
    }

    /// Returns the route.
    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    /// Returns the discriminator.
    #[must_use]
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.route {
            Route::TransferList if self.discriminator.is_empty() => {
                formatter.write_str(self.route.as_str())
            }
            Route::TransferList => write!(formatter, "{}?{}", self.route.as_str(), self.discriminator),
            _ => write!(formatter, "{}/{}", self.route.as_str(), self.discriminator),
        }
    }
}
