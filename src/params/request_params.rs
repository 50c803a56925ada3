//! Filter and pagination descriptor of the transfer list.

use std::fmt;
use std::str::FromStr;

use crate::types::{
    DocumentStage, EffectiveMonth, StatusFilter, StatusOption, TransferListRow, TransferType,
};

/// The allow-listed query parameters.
///
/// Only these keys are read from or written to the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// `status`, repeated once per selected status.
    Status,
    /// `page`, 0-based.
    Page,
    /// `limit`, rows per page.
    Limit,
    /// `search`, free text.
    Search,
    /// `fmId`, manager id.
    ManagerId,
    /// `effectiveMonth`, `MM-yyyy`.
    EffectiveMonth,
    /// `type`, transfer direction.
    TransferType,
    /// `stage`, document stage.
    Stage,
}

impl ParamKey {
    /// Every key, in query-string order.
    pub const ALL: [Self; 8] = [
        Self::Status,
        Self::Page,
        Self::Limit,
        Self::Search,
        Self::ManagerId,
        Self::EffectiveMonth,
        Self::TransferType,
        Self::Stage,
    ];

    /// Returns the query-string name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Page => "page",
            Self::Limit => "limit",
            Self::Search => "search",
            Self::ManagerId => "fmId",
            Self::EffectiveMonth => "effectiveMonth",
            Self::TransferType => "type",
            Self::Stage => "stage",
        }
    }

    /// Looks up a query-string name. Keys outside the allow-list yield `None`.
    #[must_use]
    pub fn from_query_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Filter and pagination state of the transfer list.
///
/// `None` means "not set"; the empty filter is `RequestParams::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RequestParams {
    /// 0-based page index.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Free-text search.
    pub search: Option<String>,
    /// Status multi-select.
    pub status: StatusFilter,
    /// Manager filter.
    #[cfg_attr(feature = "serde", serde(rename = "fmId"))]
    pub manager_id: Option<u64>,
    /// Effective month filter, `MM-yyyy`, kept as entered.
    pub effective_month: Option<String>,
    /// Transfer direction filter.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub transfer_type: Option<TransferType>,
    /// Document stage filter.
    pub stage: Option<DocumentStage>,
}

impl RequestParams {
    /// Returns a copy with `change` applied.
    #[must_use]
    pub fn with(self, change: ParameterChange) -> Self {
        change.apply(self)
    }

    /// Returns `true` if `row` passes every filter that is set.
    ///
    /// Pagination is ignored. An effective month that does not parse does not
    /// filter anything.
    #[must_use]
    pub fn admits(&self, row: &TransferListRow) -> bool {
        let search_matches = self.search.as_deref().is_none_or(|search| {
            let needle = search.trim().to_lowercase();
            needle.is_empty()
                || row.account.display_name.to_lowercase().contains(&needle)
                || row.account.number.to_lowercase().contains(&needle)
                || row.notes.to_lowercase().contains(&needle)
        });
        let month_matches = self
            .effective_month
            .as_deref()
            .and_then(|raw| raw.parse::<EffectiveMonth>().ok())
            .is_none_or(|month| row.effective_month == Some(month));

        search_matches
            && month_matches
            && self.status.admits(row.status)
            && self
                .manager_id
                .is_none_or(|id| row.manager.as_ref().is_some_and(|manager| manager.id == id))
            && self
                .transfer_type
                .is_none_or(|transfer_type| row.transfer_type == transfer_type)
            && self.stage.is_none_or(|stage| row.document.stage == stage)
    }
}

/// A single-field change to [`RequestParams`].
///
/// Each change is applied on its own; there is no batched form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterChange {
    /// Jump to a page.
    Page(u32),
    /// Change the page size. Also resets the page to 0.
    Limit(u32),
    /// Replace the search text.
    Search(String),
    /// Apply a status multi-select change, see [`StatusFilter::select`].
    Status(Vec<StatusOption>),
    /// Set or clear the manager filter.
    ManagerId(Option<u64>),
    /// Set or clear the effective month filter.
    EffectiveMonth(Option<String>),
    /// Set or clear the transfer direction filter.
    TransferType(Option<TransferType>),
    /// Set or clear the document stage filter.
    Stage(Option<DocumentStage>),
}

impl ParameterChange {
    /// Returns the key this change writes.
    #[must_use]
    pub const fn key(&self) -> ParamKey {
        match self {
            Self::Page(_) => ParamKey::Page,
            Self::Limit(_) => ParamKey::Limit,
            Self::Search(_) => ParamKey::Search,
            Self::Status(_) => ParamKey::Status,
            Self::ManagerId(_) => ParamKey::ManagerId,
            Self::EffectiveMonth(_) => ParamKey::EffectiveMonth,
            Self::TransferType(_) => ParamKey::TransferType,
            Self::Stage(_) => ParamKey::Stage,
        }
    }

    /// Builds a change from raw control values, coercing them per field.
    ///
    /// Numeric fields take the first value and must parse; `status` keeps the
    /// values it recognises and is ignored when it recognises none; `search`
    /// and `effectiveMonth` pass through verbatim; `type` and `stage` must name
    /// a variant. An empty string clears `fmId`, `type`, and `stage`. Returns
    /// `None` when nothing usable remains.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transfer_reconcile::params::{ParamKey, ParameterChange};
    ///
    /// assert_eq!(
    ///     ParameterChange::from_raw(ParamKey::Limit, &["50"]),
    ///     Some(ParameterChange::Limit(50))
    /// );
    /// assert_eq!(ParameterChange::from_raw(ParamKey::Limit, &["fifty"]), None);
    /// ```
    #[must_use]
    pub fn from_raw(key: ParamKey, values: &[&str]) -> Option<Self> {
        let first = values.first().map(|value| value.trim());
        match key {
            ParamKey::Page => first?.parse().ok().map(Self::Page),
            ParamKey::Limit => first?.parse().ok().map(Self::Limit),
            ParamKey::Search => Some(Self::Search(values.first().copied()?.to_string())),
            ParamKey::Status => {
                let selection: Vec<StatusOption> = values
                    .iter()
                    .filter_map(|value| StatusOption::parse(value))
                    .collect();
                // nothing recognised in a non-empty selection keeps the filter
                (values.is_empty() || !selection.is_empty()).then_some(Self::Status(selection))
            }
            ParamKey::ManagerId => optional(first?).map(Self::ManagerId),
            ParamKey::EffectiveMonth => Some(Self::EffectiveMonth(Some(
                values.first().copied()?.to_string(),
            ))),
            ParamKey::TransferType => optional(first?).map(Self::TransferType),
            ParamKey::Stage => optional(first?).map(Self::Stage),
        }
    }

    /// Applies the change to `params`.
    #[must_use]
    pub fn apply(self, params: RequestParams) -> RequestParams {
        match self {
            Self::Page(page) => RequestParams {
                page: Some(page),
                ..params
            },
            Self::Limit(limit) => RequestParams {
                limit: Some(limit),
                page: Some(0),
                ..params
            },
            Self::Search(search) => RequestParams {
                search: Some(search),
                ..params
            },
            Self::Status(selection) => RequestParams {
                status: params.status.select(&selection),
                ..params
            },
            Self::ManagerId(manager_id) => RequestParams { manager_id, ..params },
            Self::EffectiveMonth(effective_month) => RequestParams {
                effective_month,
                ..params
            },
            Self::TransferType(transfer_type) => RequestParams {
                transfer_type,
                ..params
            },
            Self::Stage(stage) => RequestParams { stage, ..params },
        }
    }
}

/// `""` clears, anything else must parse.
fn optional<T: FromStr>(raw: &str) -> Option<Option<T>> {
    if raw.is_empty() {
        Some(None)
    } else {
        raw.parse().ok().map(Some)
    }
}
