//! Stateful wrapper around [`reduce`] that keeps the URL in step with the
//! committed parameters.

use super::{
    from_query_string, reduce, to_query_string, ParamKey, ParameterChange, ReconcilerAction,
    ReconcilerState, RequestParams,
};

/// Where the committed parameters are persisted, normally the address bar.
pub trait QueryLocation {
    /// Returns the current query string, with or without a leading `?`.
    fn query(&self) -> String;

    /// Replaces the query string. `query` has no leading `?` and may be empty.
    fn replace_query(&mut self, query: &str);
}

/// In-memory [`QueryLocation`], for tests and headless use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    query: String,
    replacements: usize,
}

impl MemoryLocation {
    /// Creates a location holding `query`.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            replacements: 0,
        }
    }

    /// Returns the query in `location.search` form: empty, or starting with `?`.
    #[must_use]
    pub fn search(&self) -> String {
        let query = self.query.strip_prefix('?').unwrap_or(&self.query);
        if query.is_empty() {
            String::new()
        } else {
            format!("?{query}")
        }
    }

    /// Returns how many times the query was replaced.
    #[must_use]
    pub const fn replacements(&self) -> usize {
        self.replacements
    }
}

impl QueryLocation for MemoryLocation {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.replacements += 1;
    }
}

/// Owns the reconciler state for one mounted list view.
///
/// Draft edits go through [`set_parameter`](Self::set_parameter) and never
/// reach the location or trigger a fetch. [`commit_parameters`](Self::commit_parameters)
/// publishes the draft: the committed parameters change, the location is
/// rewritten, and the returned snapshot keys the next fetch.
///
/// # Examples
///
/// ```rust
/// use transfer_reconcile::params::{MemoryLocation, ParameterChange, ParameterReconciler};
/// use transfer_reconcile::types::RequestStatus;
///
/// let mut reconciler = ParameterReconciler::from_location(MemoryLocation::default());
/// reconciler.set_parameter(ParameterChange::Status(vec![RequestStatus::Approved.into()]));
/// reconciler.set_parameter(ParameterChange::Page(1));
/// assert_eq!(reconciler.location().search(), "");
///
/// reconciler.commit_parameters();
/// assert_eq!(reconciler.location().search(), "?status=approved&page=1");
/// ```
#[derive(Debug)]
pub struct ParameterReconciler<L> {
    state: ReconcilerState,
    location: L,
}

impl<L: QueryLocation> ParameterReconciler<L> {
    /// Seeds draft and committed parameters from the location's query string.
    pub fn from_location(location: L) -> Self {
        let params = from_query_string(&location.query());
        tracing::debug!(query = %to_query_string(&params), "seeded request parameters from location");
        Self {
            state: ReconcilerState::seeded(params),
            location,
        }
    }

    /// Returns the full reconciler state.
    pub const fn state(&self) -> &ReconcilerState {
        &self.state
    }

    /// Returns the draft parameters.
    pub const fn draft(&self) -> &RequestParams {
        self.state.draft()
    }

    /// Returns the committed parameters.
    pub const fn committed(&self) -> &RequestParams {
        self.state.committed()
    }

    /// Returns `true` if the draft has changes since the last commit.
    pub const fn has_pending_changes(&self) -> bool {
        self.state.has_pending_changes()
    }

    /// Returns the location the committed parameters are written to.
    pub const fn location(&self) -> &L {
        &self.location
    }

    /// Applies `action`, writing the location if the committed half changed.
    pub fn dispatch(&mut self, action: ReconcilerAction) {
        let state = std::mem::take(&mut self.state);
        let previous = state.committed().clone();
        self.state = reduce(state, action);

        if self.state.committed() != &previous {
            let query = to_query_string(self.state.committed());
            tracing::info!(query = %query, "committed request parameters");
            self.location.replace_query(&query);
        }
    }

    /// Changes one draft field.
    pub fn set_parameter(&mut self, change: ParameterChange) {
        tracing::debug!(key = %change.key(), "draft parameter changed");
        self.dispatch(ReconcilerAction::SetParameter(change));
    }

    /// Changes one draft field from raw control values.
    ///
    /// Values that do not coerce are ignored. Returns `true` if the draft was
    /// updated.
    pub fn set_raw(&mut self, key: ParamKey, values: &[&str]) -> bool {
        match ParameterChange::from_raw(key, values) {
            Some(change) => {
                self.set_parameter(change);
                true
            }
            None => {
                tracing::warn!(key = %key, ?values, "ignoring value that does not coerce");
                false
            }
        }
    }

    /// Commits the draft and returns the committed snapshot.
    pub fn commit_parameters(&mut self) -> RequestParams {
        self.dispatch(ReconcilerAction::CommitParameters);
        self.committed().clone()
    }

    /// Consumes the reconciler, returning its location.
    pub fn into_location(self) -> L {
        self.location
    }
}
