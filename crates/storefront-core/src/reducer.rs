use crate::actions::RuntimeAction;
use crate::actions::StoreAction;
use crate::actions::UserAction;
use crate::cache::CacheTag;
use crate::cache::QueryKey;
use crate::models::sort_addresses;
use crate::models::Address;
use crate::models::AddressDraft;
use crate::models::AddressId;
use crate::state::ModalStep;
use crate::state::MutationOp;
use crate::state::MutationRequest;
use crate::state::NoticeLevel;
use crate::state::Remote;
use crate::state::ReviewPanel;
use crate::state::StoreState;
use crate::validation::validate_draft;

/// Work the shell performs after a reduce step. The reducer never does
/// I/O itself; it only describes what must happen next.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    RequestFrame,
    /// Mount and fetch one cached read (deduplicated by the cache).
    Fetch(QueryKey),
    /// Unmount a cached read; late completions for it are dropped.
    Release(QueryKey),
    /// Mark a tag stale and refetch its mounted readers.
    Invalidate(CacheTag),
    /// Dispatch a mutation to the gateway.
    Run(MutationRequest),
    /// Hand the picked address to the embedding caller.
    EmitSelectedAddress(Address),
    /// Tell the embedding caller which address entered the edit form.
    EmitEditTarget(AddressId),
}

pub fn reduce(state: &mut StoreState, action: StoreAction) -> Vec<Effect> {
    match action {
        StoreAction::User(user) => reduce_user(state, user),
        StoreAction::Runtime(runtime) => reduce_runtime(state, runtime),
    }
}

fn reduce_user(state: &mut StoreState, action: UserAction) -> Vec<Effect> {
    match action {
        UserAction::OpenAddressBook => {
            if state.modal.is_open() {
                return Vec::new();
            }
            state.modal.open_list();
            state.addresses = Remote::Loading;
            vec![Effect::Fetch(QueryKey::SearchAddress), Effect::RequestFrame]
        }
        UserAction::CloseAddressBook => {
            if !state.modal.is_open() {
                return Vec::new();
            }
            state.modal.close();
            vec![
                Effect::Release(QueryKey::SearchAddress),
                Effect::RequestFrame,
            ]
        }
        UserAction::RequestNewAddress => {
            state.modal.enter_add();
            vec![Effect::RequestFrame]
        }
        UserAction::RequestEditAddress(id) => {
            let seed = state.address(&id).map(AddressDraft::from_address);
            state.modal.enter_edit(id.clone(), seed);
            vec![Effect::EmitEditTarget(id), Effect::RequestFrame]
        }
        UserAction::SelectAddress(id) => {
            if state.modal.step() != ModalStep::List {
                return Vec::new();
            }
            let Some(address) = state.address(&id).cloned() else {
                state.notices.push(
                    NoticeLevel::Error,
                    "That address is no longer available",
                    None,
                );
                return vec![Effect::RequestFrame];
            };
            state.modal.close();
            vec![
                Effect::EmitSelectedAddress(address),
                Effect::Release(QueryKey::SearchAddress),
                Effect::RequestFrame,
            ]
        }
        UserAction::DeleteAddress(id) => {
            if state.modal.step() != ModalStep::List {
                return Vec::new();
            }
            dispatch_mutation(state, MutationOp::DeleteAddress(id))
        }
        UserAction::PatchDraft(patch) => {
            if !state.modal.step().is_form() {
                return Vec::new();
            }
            state.modal.patch_draft(patch);
            vec![Effect::RequestFrame]
        }
        UserAction::SubmitAddressForm => {
            if !state.modal.step().is_form() {
                return Vec::new();
            }
            let draft = state.modal.draft().clone();
            if let Err(err) = validate_draft(&draft) {
                state.notices.push(
                    NoticeLevel::Error,
                    "Check the address form",
                    Some(err.to_string()),
                );
                return vec![Effect::RequestFrame];
            }
            let op = if state.modal.edit_mode() {
                let Some(id) = state.modal.edit_target().cloned() else {
                    state
                        .notices
                        .push(NoticeLevel::Error, "No address selected to edit", None);
                    return vec![Effect::RequestFrame];
                };
                MutationOp::UpdateAddress { id, draft }
            } else {
                MutationOp::CreateAddress(draft)
            };
            dispatch_mutation(state, op)
        }
        UserAction::CancelAddressForm => {
            if !state.modal.step().is_form() {
                return Vec::new();
            }
            state.modal.back_to_list();
            vec![Effect::RequestFrame]
        }
        UserAction::OpenReviews(article) => {
            state.reviews = Some(ReviewPanel {
                article: article.clone(),
                list: Remote::Loading,
            });
            vec![
                Effect::Fetch(QueryKey::Reviews(article)),
                Effect::RequestFrame,
            ]
        }
        UserAction::CloseReviews => {
            let Some(panel) = state.reviews.take() else {
                return Vec::new();
            };
            vec![
                Effect::Release(QueryKey::Reviews(panel.article)),
                Effect::RequestFrame,
            ]
        }
        UserAction::ToggleReviewLike(id) => {
            let Some(user_id) = state.logged_in_user().map(|user| user.user_id.clone()) else {
                state
                    .notices
                    .push(NoticeLevel::Error, "Sign in to like reviews", None);
                return vec![Effect::RequestFrame];
            };
            let Some(review) = state.review(&id) else {
                return Vec::new();
            };
            let article = review.article.clone();
            let op = if review.liked_by_user(&user_id) {
                MutationOp::UnlikeReview { id, article }
            } else {
                MutationOp::LikeReview { id, article }
            };
            dispatch_mutation(state, op)
        }
        UserAction::RemoveReview(id) => {
            let Some(review) = state.review(&id) else {
                return Vec::new();
            };
            let article = review.article.clone();
            dispatch_mutation(state, MutationOp::RemoveReview { id, article })
        }
        UserAction::DismissNotice => {
            if state.notices.dismiss_front().is_none() {
                return Vec::new();
            }
            vec![Effect::RequestFrame]
        }
    }
}

/// Claim the op's guard and emit the dispatch. A held guard means the
/// same target already has a request in flight; the trigger is simply
/// ignored until the completion lands.
fn dispatch_mutation(state: &mut StoreState, op: MutationOp) -> Vec<Effect> {
    let Some(request_id) = state.pending.begin(op.guard()) else {
        return Vec::new();
    };
    vec![
        Effect::Run(MutationRequest {
            request_id,
            session: state.modal.session(),
            op,
        }),
        Effect::RequestFrame,
    ]
}

fn reduce_runtime(state: &mut StoreState, action: RuntimeAction) -> Vec<Effect> {
    match action {
        RuntimeAction::SessionLoaded { result } => {
            state.session = match result {
                Ok(user) => Remote::Ready(user),
                Err(err) => Remote::Failed(err.to_string()),
            };
            vec![Effect::RequestFrame]
        }
        RuntimeAction::AddressesLoaded { result } => {
            state.addresses = match result {
                Ok(mut list) => {
                    sort_addresses(&mut list);
                    Remote::Ready(list)
                }
                Err(err) => Remote::Failed(err.to_string()),
            };
            vec![Effect::RequestFrame]
        }
        RuntimeAction::ReviewsLoaded { article, result } => {
            let Some(panel) = state.reviews.as_mut() else {
                return Vec::new();
            };
            if panel.article != article {
                return Vec::new();
            }
            panel.list = match result {
                Ok(list) => Remote::Ready(list),
                Err(err) => Remote::Failed(err.to_string()),
            };
            vec![Effect::RequestFrame]
        }
        RuntimeAction::MutationSettled { request, result } => {
            state.pending.settle(&request.op.guard());
            if request.op.is_modal_scoped() && request.session != state.modal.session() {
                // The modal this request belonged to is gone; nothing
                // on screen may change.
                return Vec::new();
            }
            match result {
                Ok(()) => settle_success(state, &request.op),
                Err(err) => {
                    state.notices.push(
                        NoticeLevel::Error,
                        format!("Failed to {}", request.op.label()),
                        Some(err.to_string()),
                    );
                    vec![Effect::RequestFrame]
                }
            }
        }
    }
}

fn settle_success(state: &mut StoreState, op: &MutationOp) -> Vec<Effect> {
    let tag = op.invalidates();
    match op {
        MutationOp::CreateAddress(_) | MutationOp::UpdateAddress { .. } => {
            if state.modal.step().is_form() {
                state.modal.back_to_list();
            }
            state
                .notices
                .push(NoticeLevel::Success, "Address saved", None);
            vec![Effect::Invalidate(tag), Effect::RequestFrame]
        }
        MutationOp::DeleteAddress(_)
        | MutationOp::RemoveReview { .. }
        | MutationOp::LikeReview { .. }
        | MutationOp::UnlikeReview { .. } => {
            vec![Effect::Invalidate(tag), Effect::RequestFrame]
        }
    }
}

#[cfg(test)]
mod tests;
