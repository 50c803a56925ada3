//! Denormalized list rows.
//!
//! A [`TransferListRow`] merges a request with its document, its posted
//! operations, and the account and manager it belongs to. Rows are only ever
//! changed through the consuming `merge_*`/`with_*` methods below, which
//! return a new row and leave every field they do not name untouched.
//!
//! # Examples
//!
//! ```rust
//! use transfer_reconcile::types::{AccountSummary, RequestStatus, TransferListRow};
//!
//! let row = TransferListRow {
//!     id: 10,
//!     account: AccountSummary {
//!         number: "ACC-1".into(),
//!         display_name: "Jane Doe".into(),
//!     },
//!     ..TransferListRow::default()
//! };
//!
//! let mut request = row.to_request();
//! request.status = RequestStatus::Approved;
//!
//! let merged = row.merge_request(&request);
//! assert_eq!(merged.status, RequestStatus::Approved);
//! assert_eq!(merged.account.display_name, "Jane Doe");
//! ```

use rust_decimal::Decimal;

use super::{
    AccountSummary, DocumentStage, EffectiveMonth, ManagerSummary, RequestStatus,
    TransferDocument, TransferOperation, TransferRequest, TransferType,
};

/// Document data embedded in a row.
///
/// `Default` is the "no document" value a row falls back to when its document
/// is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RowDocument {
    /// Document identifier, `0` when absent.
    pub id: u64,
    /// Verification stage.
    pub stage: DocumentStage,
    /// The document's processing status. Named `notes` so it is not mistaken
    /// for the request status.
    pub notes: String,
    /// Download link.
    pub link: String,
    /// Last modification, epoch milliseconds.
    pub last_updated: i64,
}

impl From<&TransferDocument> for RowDocument {
    fn from(document: &TransferDocument) -> Self {
        Self {
            id: document.id,
            stage: document.stage,
            notes: document.status.clone(),
            link: document.link.clone(),
            last_updated: document.last_updated,
        }
    }
}

/// One row of a transfer list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TransferListRow {
    /// Request identifier.
    pub id: u64,
    /// Account the request belongs to.
    pub account: AccountSummary,
    /// Manager of the account.
    #[cfg_attr(feature = "serde", serde(default))]
    pub manager: Option<ManagerSummary>,
    /// Direction of the transfer.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub transfer_type: TransferType,
    /// Request status.
    pub status: RequestStatus,
    /// Requested amount.
    pub amount: Decimal,
    /// Month the transfer takes effect.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effective_month: Option<EffectiveMonth>,
    /// Whether the request repeats monthly.
    #[cfg_attr(feature = "serde", serde(default))]
    pub recurring: bool,
    /// Staff notes on the request.
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: String,
    /// Last modification of the request, epoch milliseconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_updated: i64,
    /// Embedded document.
    #[cfg_attr(feature = "serde", serde(default))]
    pub document: RowDocument,
    /// Operations posted for the request, unique by id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub operations: Vec<TransferOperation>,
}

impl Default for TransferListRow {
    fn default() -> Self {
        Self {
            id: 0,
            account: AccountSummary::default(),
            manager: None,
            transfer_type: TransferType::Deposit,
            status: RequestStatus::Pending,
            amount: Decimal::ZERO,
            effective_month: None,
            recurring: false,
            notes: String::new(),
            last_updated: 0,
            document: RowDocument::default(),
            operations: Vec::new(),
        }
    }
}

impl TransferListRow {
    /// Builds a row for `request` with no document and no operations.
    #[must_use]
    pub fn from_request(
        request: &TransferRequest,
        display_name: impl Into<String>,
        manager: Option<ManagerSummary>,
    ) -> Self {
        Self {
            id: request.id,
            account: AccountSummary {
                number: request.account_number.clone(),
                display_name: display_name.into(),
            },
            manager,
            ..Self::default()
        }
        .merge_request(request)
    }

    /// Reconstructs the request-drawn part of the row as a request.
    #[must_use]
    pub fn to_request(&self) -> TransferRequest {
        TransferRequest {
            id: self.id,
            account_number: self.account.number.clone(),
            manager_id: self.manager.as_ref().map(|manager| manager.id),
            transfer_type: self.transfer_type,
            status: self.status,
            amount: self.amount,
            effective_month: self.effective_month,
            recurring: self.recurring,
            notes: self.notes.clone(),
            last_updated: self.last_updated,
        }
    }

    /// Overwrites the fields drawn from the request.
    ///
    /// `account`, `manager`, `document`, and `operations` are kept as they
    /// are; they are only available from the list fetch.
    #[must_use]
    pub fn merge_request(self, request: &TransferRequest) -> Self {
        Self {
            transfer_type: request.transfer_type,
            status: request.status,
            amount: request.amount,
            effective_month: request.effective_month,
            recurring: request.recurring,
            notes: request.notes.clone(),
            last_updated: request.last_updated,
            ..self
        }
    }

    /// Replaces the embedded document wholesale.
    #[must_use]
    pub fn with_document(self, document: RowDocument) -> Self {
        Self { document, ..self }
    }

    /// Inserts `operation`, or replaces the operation with the same id.
    #[must_use]
    pub fn upsert_operation(mut self, operation: &TransferOperation) -> Self {
        upsert_by_id(&mut self.operations, operation);
        self
    }
}

/// Replaces the entry with `operation.id` or appends it, keeping ids unique.
pub(crate) fn upsert_by_id(operations: &mut Vec<TransferOperation>, operation: &TransferOperation) {
    match operations.iter_mut().find(|existing| existing.id == operation.id) {
        Some(existing) => existing.clone_from(operation),
        None => operations.push(operation.clone()),
    }
}

/// A fetched page of rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TransferListPage {
    /// Rows of the page, in server order.
    pub rows: Vec<TransferListRow>,
    /// Number of pages at the current page size.
    pub page_count: u32,
    /// Number of rows across all pages.
    pub total_count: u64,
}

impl TransferListPage {
    /// Returns the row with the given request id.
    #[must_use]
    pub fn row(&self, id: u64) -> Option<&TransferListRow> {
        self.rows.iter().find(|row| row.id == id)
    }
}
