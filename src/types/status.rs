//! Request status and the multi-select status filter.
//!
//! A [`StatusFilter`] is either [`StatusFilter::All`] (no filtering) or a
//! non-empty, duplicate-free selection of *filterable* statuses. The empty
//! string is the "all" sentinel on the wire, mirrored by [`StatusOption::All`].
//!
//! # Examples
//!
//! ```rust
//! use transfer_reconcile::types::{RequestStatus, StatusFilter};
//!
//! let filter = StatusFilter::from_statuses([
//!     RequestStatus::Approved,
//!     RequestStatus::Pending,
//!     RequestStatus::Approved,
//! ]);
//! assert_eq!(filter.statuses(), &[RequestStatus::Approved, RequestStatus::Pending]);
//!
//! // Nothing selected means "all"
//! assert!(StatusFilter::from_statuses([]).is_all());
//! ```

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::ParamError;

/// Lifecycle status of a transfer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RequestStatus {
    /// Submitted and awaiting review.
    Pending,
    /// Approved but not yet posted to the ledger.
    Approved,
    /// Posted to the ledger.
    Posted,
    /// Cancelled or un-posted.
    Voided,
    /// Refused during review. Not offered as a list filter.
    Rejected,
}

impl RequestStatus {
    /// Statuses a list can be filtered by, in display order.
    pub const FILTERABLE: [Self; 4] = [Self::Pending, Self::Approved, Self::Posted, Self::Voided];

    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Posted => "posted",
            Self::Voided => "voided",
            Self::Rejected => "rejected",
        }
    }

    /// Returns `true` if the status may appear in a [`StatusFilter`].
    #[must_use]
    pub const fn is_filterable(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ParamError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "posted" => Ok(Self::Posted),
            "voided" => Ok(Self::Voided),
            "rejected" => Ok(Self::Rejected),
            other => Err(ParamError::UnknownVariant {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// One entry of a status multi-select: either the "all" sentinel or a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusOption {
    /// The "all statuses" entry, the empty string on the wire.
    All,
    /// A concrete status.
    Only(RequestStatus),
}

impl StatusOption {
    /// Parses a raw multi-select value. Unknown values yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            Some(Self::All)
        } else {
            raw.parse().ok().map(Self::Only)
        }
    }

    /// Returns the concrete status, if any.
    #[must_use]
    pub const fn status(self) -> Option<RequestStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }
}

impl From<RequestStatus> for StatusOption {
    fn from(status: RequestStatus) -> Self {
        Self::Only(status)
    }
}

/// Inline capacity covers every filterable status.
type StatusSet = SmallVec<[RequestStatus; 4]>;

/// Status filter of a transfer list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// No status filtering.
    #[default]
    All,
    /// Only rows with one of these statuses. Never empty.
    Only(StatusSet),
}

impl StatusFilter {
    /// Builds a filter from statuses, keeping the first occurrence of each
    /// filterable status in order. An empty result is [`StatusFilter::All`].
    #[must_use]
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = RequestStatus>,
    {
        let mut selected = StatusSet::new();
        for status in statuses {
            if status.is_filterable() && !selected.contains(&status) {
                selected.push(status);
            }
        }
        if selected.is_empty() {
            Self::All
        } else {
            Self::Only(selected)
        }
    }

    /// Applies a multi-select change to the current filter.
    ///
    /// Picking the "all" entry while a concrete filter is active clears the
    /// filter. In every other case the "all" entry is dropped and the
    /// remaining statuses become the filter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transfer_reconcile::types::{RequestStatus, StatusFilter, StatusOption};
    ///
    /// let approved = StatusFilter::from_statuses([RequestStatus::Approved]);
    /// let toggled = approved.select(&[StatusOption::All, RequestStatus::Approved.into()]);
    /// assert!(toggled.is_all());
    ///
    /// let narrowed = StatusFilter::All.select(&[StatusOption::All, RequestStatus::Posted.into()]);
    /// assert_eq!(narrowed.statuses(), &[RequestStatus::Posted]);
    /// ```
    #[must_use]
    pub fn select(&self, selection: &[StatusOption]) -> Self {
        if !self.is_all() && selection.contains(&StatusOption::All) {
            return Self::All;
        }
        Self::from_statuses(selection.iter().filter_map(|option| option.status()))
    }

    /// Returns `true` if no status filtering applies.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns the selected statuses; empty for [`StatusFilter::All`].
    #[must_use]
    pub fn statuses(&self) -> &[RequestStatus] {
        match self {
            Self::All => &[],
            Self::Only(selected) => selected.as_slice(),
        }
    }

    /// Returns `true` if a row with `status` passes the filter.
    #[must_use]
    pub fn admits(&self, status: RequestStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected.contains(&status),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for StatusFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::All => serializer.serialize_none(),
            Self::Only(selected) => serializer.serialize_some(selected.as_slice()),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for StatusFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let selected = Option::<Vec<RequestStatus>>::deserialize(deserializer)?;
        Ok(selected.map_or(Self::All, Self::from_statuses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pending", RequestStatus::Pending)]
    #[case("approved", RequestStatus::Approved)]
    #[case("posted", RequestStatus::Posted)]
    #[case("voided", RequestStatus::Voided)]
    #[case("rejected", RequestStatus::Rejected)]
    fn status_names_parse_back(#[case] raw: &str, #[case] status: RequestStatus) {
        assert_eq!(raw.parse::<RequestStatus>(), Ok(status));
        assert_eq!(status.as_str(), raw);
    }

    #[rstest]
    fn unknown_status_is_rejected() {
        assert!("archived".parse::<RequestStatus>().is_err());
        assert_eq!(StatusOption::parse("archived"), None);
        assert_eq!(StatusOption::parse(""), Some(StatusOption::All));
    }

    #[rstest]
    fn rejected_is_not_filterable() {
        let filter = StatusFilter::from_statuses([RequestStatus::Rejected]);
        assert!(filter.is_all());
    }

    #[rstest]
    fn select_all_clears_concrete_filter() {
        let current = StatusFilter::from_statuses([RequestStatus::Approved]);
        let next = current.select(&[StatusOption::All, StatusOption::Only(RequestStatus::Approved)]);
        assert_eq!(next, StatusFilter::All);
    }

    #[rstest]
    fn select_all_on_all_stays_all() {
        assert!(StatusFilter::All.select(&[StatusOption::All]).is_all());
    }

    #[rstest]
    fn select_replaces_selection_in_order() {
        let current = StatusFilter::from_statuses([RequestStatus::Approved]);
        let next = current.select(&[
            StatusOption::Only(RequestStatus::Voided),
            StatusOption::Only(RequestStatus::Pending),
        ]);
        assert_eq!(
            next.statuses(),
            &[RequestStatus::Voided, RequestStatus::Pending]
        );
    }

    #[rstest]
    fn empty_selection_means_all() {
        let current = StatusFilter::from_statuses([RequestStatus::Posted]);
        assert!(current.select(&[]).is_all());
    }

    #[rstest]
    fn admits_follows_selection() {
        let filter = StatusFilter::from_statuses([RequestStatus::Posted]);
        assert!(filter.admits(RequestStatus::Posted));
        assert!(!filter.admits(RequestStatus::Pending));
        assert!(StatusFilter::All.admits(RequestStatus::Rejected));
    }
}
