//! In-memory server used by the integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use transfer_reconcile::error::FetchError;
use transfer_reconcile::mutation::{MutationGateway, MutationPayload, TransferMutation};
use transfer_reconcile::params::RequestParams;
use transfer_reconcile::query::{ListResponse, TransferListSource};
use transfer_reconcile::types::{
    DocumentStage, RequestStatus, TransferDocument, TransferListRow, TransferOperation,
};

const DEFAULT_LIMIT: u32 = 25;

#[derive(Default)]
struct State {
    rows: Vec<TransferListRow>,
    next_operation_id: u64,
    fail_next: Option<FetchError>,
    delays: Vec<(RequestParams, Duration)>,
    list_requests: Vec<RequestParams>,
    mutations: Vec<TransferMutation>,
}

/// Serves lists from a fixed set of rows and applies mutations to them.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<State>>,
    fetches: Arc<AtomicUsize>,
}

impl InMemoryBackend {
    pub fn with_rows(rows: Vec<TransferListRow>) -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state.lock();
            state.rows = rows;
            state.next_operation_id = 900;
        }
        backend
    }

    /// Number of list and account fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Parameters of every list fetch, in arrival order.
    pub fn list_requests(&self) -> Vec<RequestParams> {
        self.state.lock().list_requests.clone()
    }

    pub fn mutations(&self) -> Vec<TransferMutation> {
        self.state.lock().mutations.clone()
    }

    /// Makes the next fetch or mutation fail with `error`.
    pub fn fail_next(&self, error: FetchError) {
        self.state.lock().fail_next = Some(error);
    }

    /// Delays the next list fetch for `params` by `delay`.
    pub fn delay(&self, params: RequestParams, delay: Duration) {
        self.state.lock().delays.push((params, delay));
    }

    fn take_failure(&self) -> Option<FetchError> {
        self.state.lock().fail_next.take()
    }

    fn page_of(rows: Vec<TransferListRow>, params: &RequestParams) -> ListResponse {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).max(1) as usize;
        let page = params.page.unwrap_or(0) as usize;
        let total_count = rows.len();
        ListResponse {
            page_count: u32::try_from(total_count.div_ceil(limit)).unwrap_or(u32::MAX),
            total_count: total_count as u64,
            rows: rows.into_iter().skip(page * limit).take(limit).collect(),
            error: None,
        }
    }

    fn apply(&self, mutation: &TransferMutation) -> MutationPayload {
        let mut state = self.state.lock();
        state.mutations.push(mutation.clone());
        let request_id = mutation.request_id();
        let Some(index) = state.rows.iter().position(|row| row.id == request_id) else {
            return MutationPayload {
                error: Some(format!("Transfer request {request_id} not found")),
                ..MutationPayload::default()
            };
        };

        match mutation {
            TransferMutation::Cancel { .. } => {
                state.rows[index].status = RequestStatus::Voided;
                MutationPayload {
                    request: Some(state.rows[index].to_request()),
                    message: Some("Transfer request cancelled".to_string()),
                    ..MutationPayload::default()
                }
            }
            TransferMutation::MakeRecurring { recurring, .. } => {
                state.rows[index].recurring = *recurring;
                MutationPayload {
                    request: Some(state.rows[index].to_request()),
                    ..MutationPayload::default()
                }
            }
            TransferMutation::Post { .. } => {
                state.next_operation_id += 1;
                let operation = TransferOperation {
                    id: state.next_operation_id,
                    request_id,
                    amount: state.rows[index].amount,
                    posted_at: chrono::DateTime::from_timestamp(1_710_000_000, 0),
                };
                let row = &mut state.rows[index];
                row.status = RequestStatus::Posted;
                row.operations.push(operation.clone());
                MutationPayload {
                    request: Some(row.to_request()),
                    operation: Some(operation),
                    message: Some("Transfer posted".to_string()),
                    ..MutationPayload::default()
                }
            }
            TransferMutation::ManualEdit { request } => {
                let row = state.rows[index].clone().merge_request(request);
                state.rows[index] = row;
                MutationPayload {
                    request: Some(request.clone()),
                    ..MutationPayload::default()
                }
            }
            TransferMutation::RegisterDocument { link, .. } => {
                let document = TransferDocument {
                    id: request_id * 100 + 1,
                    operation_id: request_id,
                    stage: DocumentStage::Uploaded,
                    status: "received".to_string(),
                    link: link.clone(),
                    last_updated: 1_710_000_000_000,
                };
                state.rows[index].document = (&document).into();
                MutationPayload {
                    document: Some(document),
                    ..MutationPayload::default()
                }
            }
            TransferMutation::DeleteDocument { .. } => {
                state.rows[index].document = Default::default();
                MutationPayload {
                    message: Some("Document deleted".to_string()),
                    ..MutationPayload::default()
                }
            }
            TransferMutation::DeleteOperations { operation_ids, .. } => {
                let row = &mut state.rows[index];
                let operations = row
                    .operations
                    .iter_mut()
                    .filter(|operation| operation_ids.contains(&operation.id))
                    .map(|operation| {
                        operation.posted_at = None;
                        operation.clone()
                    })
                    .collect();
                MutationPayload {
                    operations,
                    ..MutationPayload::default()
                }
            }
        }
    }
}

impl TransferListSource for InMemoryBackend {
    async fn fetch_list(&self, params: &RequestParams) -> Result<ListResponse, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let (rows, delay) = {
            let mut state = self.state.lock();
            state.list_requests.push(params.clone());
            let delay = state
                .delays
                .iter()
                .position(|(delayed, _)| delayed == params)
                .map(|index| state.delays.remove(index).1);
            let rows: Vec<TransferListRow> = state
                .rows
                .iter()
                .filter(|row| params.admits(row))
                .cloned()
                .collect();
            (rows, delay)
        };
        // rows are read before the delay, like a response already on the wire
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        Ok(Self::page_of(rows, params))
    }

    async fn fetch_account(&self, account_number: &str) -> Result<ListResponse, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let rows = self
            .state
            .lock()
            .rows
            .iter()
            .filter(|row| row.account.number == account_number)
            .cloned()
            .collect::<Vec<_>>();
        let total_count = rows.len() as u64;
        Ok(ListResponse {
            rows,
            error: None,
            page_count: 1,
            total_count,
        })
    }
}

impl MutationGateway for InMemoryBackend {
    async fn submit(&self, mutation: &TransferMutation) -> Result<MutationPayload, FetchError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        Ok(self.apply(mutation))
    }
}
