//! Mutations and their settlement.
//!
//! A mutation is submitted through a [`MutationGateway`]; its
//! [`MutationPayload`] is then *settled*: `error` and `message` go to the alert
//! sink, and whatever entities came back are patched into the cache. The
//! patcher only ever sees payloads of mutations that reached the server.

use std::fmt;
use std::future::Future;

use crate::alert::{Alert, AlertSink};
use crate::error::FetchError;
use crate::params::RequestParams;
use crate::patch::{CachePatcher, CacheUpdate, PatchReport};
use crate::types::{TransferDocument, TransferOperation, TransferRequest};

/// A write against a transfer request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferMutation {
    /// Cancel a request; it comes back voided.
    Cancel {
        /// Request to cancel.
        request_id: u64,
    },
    /// Turn monthly repetition on or off.
    MakeRecurring {
        /// Request to change.
        request_id: u64,
        /// New repetition flag.
        recurring: bool,
    },
    /// Post a request to the ledger.
    Post {
        /// Request to post.
        request_id: u64,
    },
    /// Save staff edits to a request.
    ManualEdit {
        /// The edited request.
        request: TransferRequest,
    },
    /// Attach an uploaded document to a request.
    RegisterDocument {
        /// Owning request.
        request_id: u64,
        /// Link to the uploaded file.
        link: String,
    },
    /// Delete a request's document.
    DeleteDocument {
        /// Owning request.
        request_id: u64,
    },
    /// Delete posted operations of a request.
    DeleteOperations {
        /// Owning request.
        request_id: u64,
        /// Operations to delete.
        operation_ids: Vec<u64>,
    },
}

impl TransferMutation {
    /// Returns the request the mutation targets.
    #[must_use]
    pub const fn request_id(&self) -> u64 {
        match self {
            Self::Cancel { request_id }
            | Self::MakeRecurring { request_id, .. }
            | Self::Post { request_id }
            | Self::RegisterDocument { request_id, .. }
            | Self::DeleteDocument { request_id }
            | Self::DeleteOperations { request_id, .. } => *request_id,
            Self::ManualEdit { request } => request.id,
        }
    }

    /// Returns a short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cancel { .. } => "cancel",
            Self::MakeRecurring { .. } => "make-recurring",
            Self::Post { .. } => "post",
            Self::ManualEdit { .. } => "manual-edit",
            Self::RegisterDocument { .. } => "register-document",
            Self::DeleteDocument { .. } => "delete-document",
            Self::DeleteOperations { .. } => "delete-operations",
        }
    }
}

impl fmt::Display for TransferMutation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} #{}", self.name(), self.request_id())
    }
}

/// Body returned by every mutation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct MutationPayload {
    /// Updated request.
    pub request: Option<TransferRequest>,
    /// Updated document.
    pub document: Option<TransferDocument>,
    /// Updated operation.
    pub operation: Option<TransferOperation>,
    /// Requests updated together.
    pub requests: Vec<TransferRequest>,
    /// Documents updated together.
    pub documents: Vec<TransferDocument>,
    /// Operations updated together.
    pub operations: Vec<TransferOperation>,
    /// Id of the request whose document was deleted.
    pub delete_document: Option<u64>,
    /// Failure reported by the server.
    pub error: Option<String>,
    /// Confirmation text for the user.
    pub message: Option<String>,
}

impl MutationPayload {
    /// Splits off the entity fields as a [`CacheUpdate`].
    #[must_use]
    pub fn into_update(self) -> CacheUpdate {
        CacheUpdate {
            request: self.request,
            document: self.document,
            operation: self.operation,
            requests: self.requests,
            documents: self.documents,
            operations: self.operations,
            delete_document: self.delete_document,
        }
    }
}

/// Server side of mutations.
pub trait MutationGateway: Send + Sync {
    /// Submits `mutation`.
    fn submit(
        &self,
        mutation: &TransferMutation,
    ) -> impl Future<Output = Result<MutationPayload, FetchError>> + Send;
}

/// Settles mutation payloads against the cache and the alert sink.
#[derive(Clone, Copy)]
pub struct Settlement<'a> {
    patcher: CachePatcher<'a>,
    alerts: &'a dyn AlertSink,
    forward_messages: bool,
}

impl<'a> Settlement<'a> {
    /// Creates a settlement step.
    #[must_use]
    pub fn new(patcher: CachePatcher<'a>, alerts: &'a dyn AlertSink, forward_messages: bool) -> Self {
        Self {
            patcher,
            alerts,
            forward_messages,
        }
    }

    /// Forwards the payload's `error`/`message` and patches its entities.
    ///
    /// A `DeleteDocument` payload without `deleteDocument` and without an
    /// error resets the document of the mutated request.
    pub fn settle(
        &self,
        mutation: &TransferMutation,
        mut payload: MutationPayload,
        active: &RequestParams,
    ) -> PatchReport {
        if let Some(error) = payload.error.take() {
            tracing::warn!(mutation = %mutation, %error, "mutation reported an error");
            self.alerts.show(Alert::error(error));
        } else if let TransferMutation::DeleteDocument { request_id } = mutation {
            if payload.delete_document.is_none() {
                payload.delete_document = Some(*request_id);
            }
        }

        if let Some(message) = payload.message.take() {
            if self.forward_messages {
                self.alerts.show(Alert::info(message));
            }
        }

        let report = self.patcher.apply_update(&payload.into_update(), active);
        tracing::info!(
            mutation = %mutation,
            rows = report.rows,
            entries = report.entries,
            "settled mutation"
        );
        report
    }

    /// Reports a mutation that never produced a payload.
    pub fn fail(&self, mutation: &TransferMutation, error: &FetchError) {
        tracing::warn!(mutation = %mutation, %error, "mutation failed");
        self.alerts.show(Alert::error(error.to_string()));
    }
}
