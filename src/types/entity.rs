//! Backend entities carried by mutation payloads and detail fetches.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{DocumentStage, EffectiveMonth, RequestStatus, TransferType};

/// A deposit or withdrawal request against an account.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TransferRequest {
    /// Request identifier.
    pub id: u64,
    /// Account the request belongs to.
    pub account_number: String,
    /// Manager responsible for the account, if any.
    #[cfg_attr(feature = "serde", serde(rename = "fmId", default))]
    pub manager_id: Option<u64>,
    /// Direction of the transfer.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub transfer_type: TransferType,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// Requested amount.
    pub amount: Decimal,
    /// Month the transfer takes effect.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effective_month: Option<EffectiveMonth>,
    /// Whether the request repeats every month.
    #[cfg_attr(feature = "serde", serde(default))]
    pub recurring: bool,
    /// Free-text notes entered by staff.
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: String,
    /// Last modification, epoch milliseconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_updated: i64,
}

/// The signed document backing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TransferDocument {
    /// Document identifier.
    pub id: u64,
    /// Identifier of the owning request.
    pub operation_id: u64,
    /// Verification stage.
    pub stage: DocumentStage,
    /// Free-text processing status reported by the document service.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: String,
    /// Download link.
    #[cfg_attr(feature = "serde", serde(default))]
    pub link: String,
    /// Last modification, epoch milliseconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_updated: i64,
}

/// A ledger operation posted for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TransferOperation {
    /// Operation identifier.
    pub id: u64,
    /// Identifier of the request the operation was posted for.
    pub request_id: u64,
    /// Posted amount.
    pub amount: Decimal,
    /// When the operation was posted; `None` once un-posted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub posted_at: Option<DateTime<Utc>>,
}

/// Account data denormalized into list rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AccountSummary {
    /// Account number.
    pub number: String,
    /// Holder name as shown in the console.
    pub display_name: String,
}

/// Manager data denormalized into list rows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManagerSummary {
    /// Manager identifier.
    pub id: u64,
    /// Manager name.
    pub name: String,
}
