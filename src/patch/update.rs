//! Entity changes reported by a successful mutation.

use crate::types::{TransferDocument, TransferOperation, TransferRequest};

/// What changed, as far as cached read-models are concerned.
///
/// Every field is optional; an empty update patches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheUpdate {
    /// A single updated request.
    pub request: Option<TransferRequest>,
    /// A single updated document.
    pub document: Option<TransferDocument>,
    /// A single updated operation.
    pub operation: Option<TransferOperation>,
    /// Requests updated together, e.g. by a bulk un-post.
    pub requests: Vec<TransferRequest>,
    /// Documents updated together.
    pub documents: Vec<TransferDocument>,
    /// Operations updated together.
    pub operations: Vec<TransferOperation>,
    /// Id of the request whose document was deleted.
    pub delete_document: Option<u64>,
}

impl CacheUpdate {
    /// An update carrying one request.
    #[must_use]
    pub fn from_request(request: TransferRequest) -> Self {
        Self {
            request: Some(request),
            ..Self::default()
        }
    }

    /// An update carrying one document.
    #[must_use]
    pub fn from_document(document: TransferDocument) -> Self {
        Self {
            document: Some(document),
            ..Self::default()
        }
    }

    /// An update resetting the document of `request_id`.
    #[must_use]
    pub fn delete_document(request_id: u64) -> Self {
        Self {
            delete_document: Some(request_id),
            ..Self::default()
        }
    }

    /// Returns `true` if there is nothing to patch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.request.is_none()
            && self.document.is_none()
            && self.operation.is_none()
            && self.requests.is_empty()
            && self.documents.is_empty()
            && self.operations.is_empty()
            && self.delete_document.is_none()
    }
}
