//! Test data factories for integration tests.

use rust_decimal::Decimal;
use transfer_reconcile::cache::{CacheKey, CacheStore, CachedValue};
use transfer_reconcile::types::{
    AccountSummary, DocumentStage, EffectiveMonth, ManagerSummary, RequestStatus, RowDocument,
    TransferDocument, TransferListPage, TransferListRow, TransferOperation, TransferRequest,
    TransferType,
};

pub struct RowFactory;

impl RowFactory {
    /// A pending deposit row with a populated document.
    pub fn row(id: u64, account_number: &str, display_name: &str) -> TransferListRow {
        TransferListRow {
            id,
            account: AccountSummary {
                number: account_number.to_string(),
                display_name: display_name.to_string(),
            },
            manager: Some(ManagerSummary {
                id: 7,
                name: "Morgan Lee".to_string(),
            }),
            transfer_type: TransferType::Deposit,
            status: RequestStatus::Pending,
            amount: Decimal::new(250_000, 2),
            effective_month: EffectiveMonth::new(2024, 3),
            recurring: false,
            notes: String::new(),
            last_updated: 1_700_000_000_000,
            document: RowDocument {
                id: id * 100,
                stage: DocumentStage::Uploaded,
                notes: "awaiting signature check".to_string(),
                link: format!("https://files.example/{id}"),
                last_updated: 1_700_000_000_500,
            },
            operations: Vec::new(),
        }
    }

    pub fn with_status(status: RequestStatus, row: TransferListRow) -> TransferListRow {
        TransferListRow { status, ..row }
    }

    pub fn page(rows: Vec<TransferListRow>) -> TransferListPage {
        let total_count = rows.len() as u64;
        TransferListPage {
            rows,
            page_count: 1,
            total_count,
        }
    }
}

pub struct EntityFactory;

impl EntityFactory {
    /// The request behind `row` with `status` changed.
    pub fn request_with_status(row: &TransferListRow, status: RequestStatus) -> TransferRequest {
        TransferRequest {
            status,
            ..row.to_request()
        }
    }

    pub fn document(id: u64, request_id: u64, stage: DocumentStage, status: &str) -> TransferDocument {
        TransferDocument {
            id,
            operation_id: request_id,
            stage,
            status: status.to_string(),
            link: format!("https://files.example/documents/{id}"),
            last_updated: 1_800_000_000_000,
        }
    }

    pub fn operation(id: u64, request_id: u64, amount: i64) -> TransferOperation {
        TransferOperation {
            id,
            request_id,
            amount: Decimal::new(amount, 2),
            posted_at: None,
        }
    }
}

/// Seeds `key` with a page of `rows`.
pub fn seed_page(store: &CacheStore, key: CacheKey, rows: Vec<TransferListRow>) {
    store.insert(key, CachedValue::TransferPage(RowFactory::page(rows)));
}

/// Returns the rows cached under `key`, panicking if there is no page.
pub fn cached_rows(store: &CacheStore, key: &CacheKey) -> Vec<TransferListRow> {
    store
        .page(key)
        .unwrap_or_else(|| panic!("no page cached under {key}"))
        .rows
}
