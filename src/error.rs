//! Error types shared across the crate.
//!
//! The reducer and the cache patcher are infallible by construction; the
//! errors here describe what can go wrong at the edges: fetching a list,
//! submitting a mutation, loading configuration, and parsing user-supplied
//! values such as an effective month.

use thiserror::Error;

/// Failure of a list fetch or a mutation submission.
///
/// These never reach the cache patcher. They are forwarded to an
/// [`AlertSink`](crate::alert::AlertSink) and the affected cache entry is left
/// in its previous state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with an `error` string instead of data.
    #[error("{0}")]
    Server(String),

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Errors raised while loading [`ConsoleConfig`](crate::config::ConsoleConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable has a value that cannot be used.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

/// Errors raised while interpreting a single parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// The value is not a `MM-yyyy` month.
    #[error("invalid effective month {0:?}, expected MM-yyyy")]
    InvalidEffectiveMonth(String),

    /// The value is not one of the known variants of an enumerated field.
    #[error("unknown {field} value {value:?}")]
    UnknownVariant {
        /// The field being parsed.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
}
