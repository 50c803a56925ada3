//! `MM-yyyy` effective month.
//!
//! The list filter keeps the raw string (see
//! [`RequestParams::effective_month`](crate::params::RequestParams)); this type
//! is used where the month has to be compared against entity data.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::ParamError;

/// A calendar month, written `MM-yyyy` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectiveMonth(NaiveDate);

impl EffectiveMonth {
    /// Creates a month from a year and a 1-based month number.
    ///
    /// Returns `None` if `month` is out of range.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Returns the year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Returns the 1-based month number.
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Returns the first day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }
}

impl FromStr for EffectiveMonth {
    type Err = ParamError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParamError::InvalidEffectiveMonth(value.to_string());
        // chrono needs a day to build a date
        let (month, year) = value.split_once('-').ok_or_else(invalid)?;
        if month.len() != 2 || year.len() != 4 {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(&format!("01-{month}-{year}"), "%d-%m-%Y")
            .map(Self)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for EffectiveMonth {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0.format("%m-%Y"))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EffectiveMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EffectiveMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
