use chrono::DateTime;
use chrono::Utc;

pub(super) use super::reduce;
pub(super) use super::Effect;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::StoreAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::cache::CacheTag;
pub(super) use crate::cache::QueryKey;
pub(super) use crate::error::GatewayError;
pub(super) use crate::models::Address;
pub(super) use crate::models::AddressId;
pub(super) use crate::models::ArticleId;
pub(super) use crate::models::DraftPatch;
pub(super) use crate::models::Review;
pub(super) use crate::models::ReviewId;
pub(super) use crate::models::SessionUser;
pub(super) use crate::state::ModalStep;
pub(super) use crate::state::MutationOp;
pub(super) use crate::state::MutationRequest;
pub(super) use crate::state::NoticeLevel;
pub(super) use crate::state::Remote;
pub(super) use crate::state::StoreState;

mod mutations;

fn state() -> StoreState {
    StoreState::new()
}

fn address(id: &str, is_default: bool) -> Address {
    Address {
        id: AddressId::new(id),
        receiver_name: format!("receiver-{id}"),
        receiver_phone: "01012345678".to_string(),
        main_address: "12 Mapo-daero".to_string(),
        detail_address: "Apt 301".to_string(),
        zip_code: "04123".to_string(),
        is_default,
        shipping_memo: None,
    }
}

fn review(id: &str, article: &str, liked_by: &[&str]) -> Review {
    Review {
        id: ReviewId::new(id),
        article: ArticleId::new(article),
        rate: 4,
        content: "well packed".to_string(),
        liked_by: liked_by.iter().map(|user| user.to_string()).collect(),
        updated_at: DateTime::<Utc>::from_timestamp(1_714_550_400, 0)
            .expect("valid test timestamp"),
    }
}

fn run_user(state: &mut StoreState, action: UserAction) -> Vec<Effect> {
    reduce(state, StoreAction::User(action))
}

fn run_runtime(state: &mut StoreState, action: RuntimeAction) -> Vec<Effect> {
    reduce(state, StoreAction::Runtime(action))
}

/// Open the modal and land the list fetch, the common starting point.
fn open_with_addresses(state: &mut StoreState, list: Vec<Address>) {
    run_user(state, UserAction::OpenAddressBook);
    run_runtime(state, RuntimeAction::AddressesLoaded { result: Ok(list) });
}

fn sign_in(state: &mut StoreState, user_id: &str) {
    run_runtime(
        state,
        RuntimeAction::SessionLoaded {
            result: Ok(SessionUser {
                user_id: user_id.to_string(),
                email: format!("{user_id}@shop.example"),
                username: user_id.to_string(),
                role: "user".to_string(),
                is_logged_in: true,
            }),
        },
    );
}

fn filled_patch() -> DraftPatch {
    DraftPatch {
        receiver_name: Some("Dana".to_string()),
        receiver_phone: Some("01012345678".to_string()),
        main_address: Some("12 Mapo-daero".to_string()),
        detail_address: Some("Apt 301".to_string()),
        zip_code: Some("04123".to_string()),
        is_default: Some(false),
        shipping_memo: None,
    }
}

/// Pull the dispatched request out of a reduce result.
fn dispatched(effects: &[Effect]) -> MutationRequest {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Run(request) => Some(request.clone()),
            _ => None,
        })
        .expect("expected a dispatched mutation")
}

fn invalidations(effects: &[Effect]) -> Vec<CacheTag> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Invalidate(tag) => Some(tag.clone()),
            _ => None,
        })
        .collect()
}
