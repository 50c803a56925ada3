//! Console configuration.
//!
//! Configuration is loaded once when the console is built. Every value has a
//! default; a value that is set but unusable is an error rather than being
//! silently replaced.
//!
//! # Environment Variables
//!
//! - `TRANSFERS_DEFAULT_LIMIT`: page size when none is committed (default: 25)
//! - `TRANSFERS_PAGE_SIZES`: comma-separated page sizes offered by the page-size
//!   control; empty accepts any size (default: `10,25,50,100`)
//! - `TRANSFERS_FORWARD_MESSAGES`: forward informational mutation messages to
//!   the alert sink (default: true)
//! - `TRANSFERS_MARK_STALE`: mark inactive lists stale after a row patch
//!   (default: true)
//!
//! # Example
//!
//! ```rust,ignore
//! use transfer_reconcile::config::ConsoleConfig;
//!
//! let config = ConsoleConfig::from_env()?;
//! println!("Default page size: {}", config.default_limit);
//! ```

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

const DEFAULT_LIMIT: u32 = 25;
const DEFAULT_PAGE_SIZES: [u32; 4] = [10, 25, 50, 100];

/// Settings of a [`TransferConsole`](crate::console::TransferConsole).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Page size used when the committed parameters carry none.
    pub default_limit: u32,
    /// Page sizes accepted from raw control input; empty accepts any.
    pub page_size_options: Vec<u32>,
    /// Whether mutation `message`s are shown as informational alerts.
    pub forward_messages: bool,
    /// Whether inactive lists are marked stale after a row patch.
    pub mark_inactive_lists_stale: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            page_size_options: DEFAULT_PAGE_SIZES.to_vec(),
            forward_messages: true,
            mark_inactive_lists_stale: true,
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from environment variables, reading `.env` first
    /// if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set but cannot be
    /// used.
    pub fn from_env() -> Result<Self, ConfigError> {
        // a missing .env file is fine
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns the value of a
    /// variable or `None` if unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a value is set but cannot be
    /// used.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_limit = parsed(&lookup, "TRANSFERS_DEFAULT_LIMIT", defaults.default_limit)?;
        if default_limit == 0 {
            return Err(invalid("TRANSFERS_DEFAULT_LIMIT", "must be greater than zero"));
        }

        let page_size_options = match lookup("TRANSFERS_PAGE_SIZES") {
            None => defaults.page_size_options,
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|size| !size.is_empty())
                .map(|size| {
                    size.parse::<u32>()
                        .map_err(|error| invalid("TRANSFERS_PAGE_SIZES", &error.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(Self {
            default_limit,
            page_size_options,
            forward_messages: parsed(&lookup, "TRANSFERS_FORWARD_MESSAGES", defaults.forward_messages)?,
            mark_inactive_lists_stale: parsed(
                &lookup,
                "TRANSFERS_MARK_STALE",
                defaults.mark_inactive_lists_stale,
            )?,
        })
    }

    /// Returns `true` if `limit` may be chosen from the page-size control.
    #[must_use]
    pub fn accepts_page_size(&self, limit: u32) -> bool {
        limit > 0 && (self.page_size_options.is_empty() || self.page_size_options.contains(&limit))
    }
}

fn parsed<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|error: T::Err| invalid(key, &error.to_string()))
    })
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
