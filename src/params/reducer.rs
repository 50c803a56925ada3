//! Draft/committed reducer.
//!
//! ```text
//!              set_parameter               set_parameter
//!     Clean ──────────────────► Dirty ◄───────────────┐
//!       ▲  │                      │  └─────────────────┘
//!       │  └── commit (no-op) ──┐ │ commit
//!       └───────────────────────┴─┘
//! ```
//!
//! [`reduce`] is pure: it consumes the previous state and returns the next
//! one. Draft changes never touch the committed half; only
//! [`ReconcilerAction::CommitParameters`] copies the draft across.

use super::{ParameterChange, RequestParams};

/// Draft and committed request parameters.
///
/// Only [`seeded`](Self::seeded) and [`reduce`] build states, so a clean
/// state always has draft equal to committed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconcilerState {
    request_parameters: RequestParams,
    committed_request_parameters: RequestParams,
    pending_changes: bool,
}

impl ReconcilerState {
    /// Creates a clean state where draft and committed both equal `params`.
    #[must_use]
    pub fn seeded(params: RequestParams) -> Self {
        Self {
            request_parameters: params.clone(),
            committed_request_parameters: params,
            pending_changes: false,
        }
    }

    /// Draft parameters edited by the controls.
    #[must_use]
    pub const fn draft(&self) -> &RequestParams {
        &self.request_parameters
    }

    /// Parameters driving the active fetch and the URL.
    #[must_use]
    pub const fn committed(&self) -> &RequestParams {
        &self.committed_request_parameters
    }

    /// Set by every draft change, cleared by a commit.
    #[must_use]
    pub const fn has_pending_changes(&self) -> bool {
        self.pending_changes
    }
}

/// Actions accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcilerAction {
    /// Change one field of the draft.
    SetParameter(ParameterChange),
    /// Copy the draft into the committed parameters.
    CommitParameters,
}

/// Computes the next reconciler state.
///
/// # Examples
///
/// ```rust
/// use transfer_reconcile::params::{reduce, ParameterChange, ReconcilerAction, ReconcilerState};
///
/// let state = reduce(
///     ReconcilerState::default(),
///     ReconcilerAction::SetParameter(ParameterChange::Page(1)),
/// );
/// assert!(state.has_pending_changes());
/// assert_eq!(state.committed().page, None);
///
/// let state = reduce(state, ReconcilerAction::CommitParameters);
/// assert!(!state.has_pending_changes());
/// assert_eq!(state.committed().page, Some(1));
/// ```
#[must_use]
pub fn reduce(state: ReconcilerState, action: ReconcilerAction) -> ReconcilerState {
    match action {
        ReconcilerAction::SetParameter(change) => ReconcilerState {
            request_parameters: change.apply(state.request_parameters),
            pending_changes: true,
            ..state
        },
        ReconcilerAction::CommitParameters if !state.pending_changes => state,
        ReconcilerAction::CommitParameters => ReconcilerState {
            committed_request_parameters: state.request_parameters.clone(),
            pending_changes: false,
            ..state
        },
    }
}
