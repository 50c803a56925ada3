//! Property-based tests for the draft/committed reducer and the URL codec.
//!
//! ## Reducer Laws
//! - Draft isolation: any run of `SetParameter` leaves the committed half as it was
//! - Commit idempotence: commit after commit changes nothing
//! - Commit copies: after a commit, committed equals the draft and nothing is pending
//! - Clean means published: without pending changes, draft equals committed
//!
//! ## Codec Laws
//! - Round trip: `from_query_string(to_query_string(p)) == p`
//! - Stable output: encoding is deterministic and repeats `status` in selection order

use proptest::prelude::*;
use transfer_reconcile::params::{
    ParameterChange, ReconcilerAction, ReconcilerState, RequestParams, from_query_string, reduce,
    to_query_string,
};
use transfer_reconcile::types::{
    DocumentStage, RequestStatus, StatusFilter, StatusOption, TransferType,
};

// =============================================================================
// Strategies
// =============================================================================

fn filterable_status() -> impl Strategy<Value = RequestStatus> {
    prop::sample::select(RequestStatus::FILTERABLE.to_vec())
}

fn status_option() -> impl Strategy<Value = StatusOption> {
    prop_oneof![
        1 => Just(StatusOption::All),
        4 => filterable_status().prop_map(StatusOption::Only),
    ]
}

fn status_filter() -> impl Strategy<Value = StatusFilter> {
    prop::collection::vec(filterable_status(), 0..5).prop_map(StatusFilter::from_statuses)
}

fn transfer_type() -> impl Strategy<Value = TransferType> {
    prop_oneof![Just(TransferType::Deposit), Just(TransferType::Withdrawal)]
}

fn document_stage() -> impl Strategy<Value = DocumentStage> {
    prop_oneof![
        Just(DocumentStage::Requested),
        Just(DocumentStage::Uploaded),
        Just(DocumentStage::Verified),
        Just(DocumentStage::Rejected),
    ]
}

fn effective_month() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (1u32..=12, 2000i32..2100).prop_map(|(month, year)| format!("{month:02}-{year}")),
        1 => "[ 0-9a-z+&=-]{0,9}",
    ]
}

fn request_params() -> impl Strategy<Value = RequestParams> {
    (
        prop::option::of(0u32..500),
        prop::option::of(1u32..200),
        prop::option::of("[a-zA-Z0-9 &=+%?#']{0,16}"),
        status_filter(),
        prop::option::of(any::<u64>()),
        prop::option::of(effective_month()),
        prop::option::of(transfer_type()),
        prop::option::of(document_stage()),
    )
        .prop_map(
            |(page, limit, search, status, manager_id, effective_month, transfer_type, stage)| {
                RequestParams {
                    page,
                    limit,
                    search,
                    status,
                    manager_id,
                    effective_month,
                    transfer_type,
                    stage,
                }
            },
        )
}

fn parameter_change() -> impl Strategy<Value = ParameterChange> {
    prop_oneof![
        (0u32..100).prop_map(ParameterChange::Page),
        (1u32..100).prop_map(ParameterChange::Limit),
        "[a-z ]{0,8}".prop_map(ParameterChange::Search),
        prop::collection::vec(status_option(), 0..4).prop_map(ParameterChange::Status),
        prop::option::of(0u64..50).prop_map(ParameterChange::ManagerId),
        prop::option::of(effective_month()).prop_map(ParameterChange::EffectiveMonth),
        prop::option::of(transfer_type()).prop_map(ParameterChange::TransferType),
        prop::option::of(document_stage()).prop_map(ParameterChange::Stage),
    ]
}

fn action() -> impl Strategy<Value = ReconcilerAction> {
    prop_oneof![
        4 => parameter_change().prop_map(ReconcilerAction::SetParameter),
        1 => Just(ReconcilerAction::CommitParameters),
    ]
}

/// States reachable from a URL seed through any run of actions.
fn state() -> impl Strategy<Value = ReconcilerState> {
    (request_params(), prop::collection::vec(action(), 0..8)).prop_map(|(seed, actions)| {
        actions
            .into_iter()
            .fold(ReconcilerState::seeded(seed), reduce)
    })
}

// =============================================================================
// Reducer Laws
// =============================================================================

proptest! {
    /// Draft isolation: committed parameters survive any run of draft edits.
    #[test]
    fn prop_draft_edits_never_touch_committed(
        initial in state(),
        changes in prop::collection::vec(parameter_change(), 0..12),
    ) {
        let committed_before = initial.committed().clone();
        let final_state = changes.into_iter().fold(initial, |state, change| {
            reduce(state, ReconcilerAction::SetParameter(change))
        });

        prop_assert_eq!(final_state.committed(), &committed_before);
    }

    /// Commit idempotence: commit(commit(s)) == commit(s)
    #[test]
    fn prop_commit_is_idempotent(initial in state()) {
        let once = reduce(initial, ReconcilerAction::CommitParameters);
        let twice = reduce(once.clone(), ReconcilerAction::CommitParameters);

        prop_assert_eq!(twice, once);
    }

    /// A commit after a draft edit publishes exactly the draft.
    #[test]
    fn prop_commit_publishes_the_draft(initial in state(), change in parameter_change()) {
        let edited = reduce(initial, ReconcilerAction::SetParameter(change));
        prop_assert!(edited.has_pending_changes());

        let committed = reduce(edited.clone(), ReconcilerAction::CommitParameters);

        prop_assert!(!committed.has_pending_changes());
        prop_assert_eq!(committed.committed(), edited.draft());
        prop_assert_eq!(committed.draft(), edited.draft());
    }

    /// A clean state never hides an unpublished draft.
    #[test]
    fn prop_clean_state_has_equal_halves(state in state()) {
        if !state.has_pending_changes() {
            prop_assert_eq!(state.draft(), state.committed());
        }
    }

    /// A limit change always lands on the first page.
    #[test]
    fn prop_limit_change_resets_page(params in request_params(), limit in 1u32..500) {
        let changed = params.with(ParameterChange::Limit(limit));

        prop_assert_eq!(changed.page, Some(0));
        prop_assert_eq!(changed.limit, Some(limit));
    }
}

// =============================================================================
// Codec Laws
// =============================================================================

proptest! {
    /// Round trip: parse(encode(p)) == p
    #[test]
    fn prop_query_string_round_trip(params in request_params()) {
        let encoded = to_query_string(&params);

        prop_assert_eq!(from_query_string(&encoded), params.clone());
        prop_assert_eq!(from_query_string(&format!("?{encoded}")), params);
    }

    /// Status values are written once each, in selection order.
    #[test]
    fn prop_status_order_is_preserved(status in status_filter()) {
        let params = RequestParams { status: status.clone(), ..RequestParams::default() };
        let encoded = to_query_string(&params);
        let written: Vec<&str> = encoded
            .split('&')
            .filter_map(|pair| pair.strip_prefix("status="))
            .collect();
        let expected: Vec<&str> = status.statuses().iter().map(|status| status.as_str()).collect();

        prop_assert_eq!(written, expected);
    }
}
