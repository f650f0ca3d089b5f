use pretty_assertions::assert_eq;

use super::*;

#[test]
fn successful_delete_invalidates_the_address_tag_exactly_once() {
    let mut state = state();
    open_with_addresses(&mut state, vec![address("a1", false)]);

    let effects = run_user(&mut state, UserAction::DeleteAddress(AddressId::new("a1")));
    let request = dispatched(&effects);
    assert_eq!(state.modal.step(), ModalStep::List);

    let effects = run_runtime(
        &mut state,
        RuntimeAction::MutationSettled {
            request,
            result: Ok(()),
        },
    );
    assert_eq!(invalidations(&effects), vec![CacheTag::SearchAddress]);
    assert_eq!(state.modal.step(), ModalStep::List);
    assert!(state.pending.is_empty());
}

#[test]
fn failed_delete_keeps_the_snapshot_and_surfaces_a_notice() {
    let mut state = state();
    open_with_addresses(&mut state, vec![address("a1", false), address("a2", true)]);
    let snapshot = state.addresses.clone();

    let effects = run_user(&mut state, UserAction::DeleteAddress(AddressId::new("a2")));
    let request = dispatched(&effects);
    let effects = run_runtime(
        &mut state,
        RuntimeAction::MutationSettled {
            request,
            result: Err(GatewayError::NotFound("addresses/a2".to_string())),
        },
    );

    assert_eq!(state.addresses, snapshot);
    assert_eq!(state.modal.step(), ModalStep::List);
    assert_eq!(invalidations(&effects), Vec::new());
    let notice = state.notices.iter().last().expect("a notice is shown");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.title.contains("delete address"));
}

#[test]
fn delete_is_not_retriggerable_while_in_flight() {
    let mut state = state();
    open_with_addresses(&mut state, vec![address("a1", false)]);

    let first = run_user(&mut state, UserAction::DeleteAddress(AddressId::new("a1")));
    assert!(!first.is_empty());
    let second = run_user(&mut state, UserAction::DeleteAddress(AddressId::new("a1")));
    assert_eq!(second, Vec::new());

    // A different id is a different guard and may proceed.
    open_with_addresses(&mut state, vec![address("a1", false), address("a2", false)]);
    let other = run_user(&mut state, UserAction::DeleteAddress(AddressId::new("a2")));
    assert!(!other.is_empty());
}

#[test]
fn create_success_returns_to_the_list_and_invalidates_once() {
    let mut state = state();
    open_with_addresses(&mut state, Vec::new());
    run_user(&mut state, UserAction::RequestNewAddress);
    run_user(&mut state, UserAction::PatchDraft(filled_patch()));

    let effects = run_user(&mut state, UserAction::SubmitAddressForm);
    let request = dispatched(&effects);
    assert!(matches!(request.op, MutationOp::CreateAddress(_)));
    assert_eq!(state.modal.step(), ModalStep::Add);

    let effects = run_runtime(
        &mut state,
        RuntimeAction::MutationSettled {
            request,
            result: Ok(()),
        },
    );
    assert_eq!(state.modal.step(), ModalStep::List);
    assert_eq!(invalidations(&effects), vec![CacheTag::SearchAddress]);
}

#[test]
fn submit_while_editing_updates_the_remembered_target() {
    let mut state = state();
    open_with_addresses(&mut state, vec![address("a7", false)]);
    run_user(
        &mut state,
        UserAction::RequestEditAddress(AddressId::new("a7")),
    );

    let effects = run_user(&mut state, UserAction::SubmitAddressForm);
    let request = dispatched(&effects);
    match request.op {
        MutationOp::UpdateAddress { id, .. } => assert_eq!(id, AddressId::new("a7")),
        other => panic!("expected an update, got {other:?}"),
    }
}

#[test]
fn invalid_draft_blocks_the_request_entirely() {
    let mut state = state();
    open_with_addresses(&mut state, Vec::new());
    run_user(&mut state, UserAction::RequestNewAddress);

    let effects = run_user(&mut state, UserAction::SubmitAddressForm);
    assert_eq!(effects, vec![Effect::RequestFrame]);
    assert!(state.pending.is_empty());
    let notice = state.notices.iter().last().expect("a notice is shown");
    assert_eq!(notice.level, NoticeLevel::Error);
}

#[test]
fn double_submit_of_the_form_dispatches_once() {
    let mut state = state();
    open_with_addresses(&mut state, Vec::new());
    run_user(&mut state, UserAction::RequestNewAddress);
    run_user(&mut state, UserAction::PatchDraft(filled_patch()));

    let first = run_user(&mut state, UserAction::SubmitAddressForm);
    assert!(!first.is_empty());
    let second = run_user(&mut state, UserAction::SubmitAddressForm);
    assert_eq!(second, Vec::new());
}

#[test]
fn failed_submit_stays_in_the_form_for_a_retry() {
    let mut state = state();
    open_with_addresses(&mut state, Vec::new());
    run_user(&mut state, UserAction::RequestNewAddress);
    run_user(&mut state, UserAction::PatchDraft(filled_patch()));

    let effects = run_user(&mut state, UserAction::SubmitAddressForm);
    let request = dispatched(&effects);
    run_runtime(
        &mut state,
        RuntimeAction::MutationSettled {
            request,
            result: Err(GatewayError::Network("timeout".to_string())),
        },
    );

    assert_eq!(state.modal.step(), ModalStep::Add);
    assert_eq!(state.modal.draft().receiver_name, "Dana");
    assert!(state.pending.is_empty());
}

#[test]
fn completions_from_a_closed_session_change_nothing() {
    let mut state = state();
    open_with_addresses(&mut state, vec![address("a1", false)]);

    let effects = run_user(&mut state, UserAction::DeleteAddress(AddressId::new("a1")));
    let request = dispatched(&effects);
    run_user(&mut state, UserAction::CloseAddressBook);
    let notices_before = state.notices.len();

    let effects = run_runtime(
        &mut state,
        RuntimeAction::MutationSettled {
            request,
            result: Err(GatewayError::Network("late failure".to_string())),
        },
    );
    assert_eq!(effects, Vec::new());
    assert_eq!(state.notices.len(), notices_before);
    assert_eq!(state.modal.step(), ModalStep::Closed);
    // The guard is released even for orphaned completions.
    assert!(state.pending.is_empty());
}

#[test]
fn late_success_after_close_is_also_orphaned() {
    let mut state = state();
    open_with_addresses(&mut state, Vec::new());
    run_user(&mut state, UserAction::RequestNewAddress);
    run_user(&mut state, UserAction::PatchDraft(filled_patch()));
    let request = dispatched(&run_user(&mut state, UserAction::SubmitAddressForm));

    run_user(&mut state, UserAction::CloseAddressBook);
    let effects = run_runtime(
        &mut state,
        RuntimeAction::MutationSettled {
            request,
            result: Ok(()),
        },
    );
    assert_eq!(effects, Vec::new());
    assert_eq!(state.modal.step(), ModalStep::Closed);
}
