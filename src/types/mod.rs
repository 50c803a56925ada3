//! Shapes shared by the reconciler, the cache, and the patcher.
//!
//! - [`RequestStatus`], [`StatusFilter`], [`StatusOption`]: request status and
//!   its multi-select filter
//! - [`TransferType`], [`DocumentStage`]: single-select enumerations
//! - [`EffectiveMonth`]: `MM-yyyy` month
//! - [`TransferRequest`], [`TransferDocument`], [`TransferOperation`]: backend
//!   entities as returned by mutations
//! - [`TransferListRow`], [`RowDocument`], [`TransferListPage`]: the
//!   denormalized read-model cached per list query

mod entity;
mod month;
mod row;
mod status;
mod transfer;

pub use entity::{
    AccountSummary, ManagerSummary, TransferDocument, TransferOperation, TransferRequest,
};
pub use month::EffectiveMonth;
pub use row::{RowDocument, TransferListPage, TransferListRow};
pub(crate) use row::upsert_by_id;
pub use status::{RequestStatus, StatusFilter, StatusOption};
pub use transfer::{DocumentStage, TransferType};
