use crate::error::GatewayError;
use crate::models::Address;
use crate::models::AddressId;
use crate::models::ArticleId;
use crate::models::DraftPatch;
use crate::models::Review;
use crate::models::ReviewId;
use crate::models::SessionUser;
use crate::state::MutationRequest;

#[derive(Debug, Clone)]
pub enum StoreAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

/// Explicit user gestures. Nothing here fires implicitly on data
/// arrival; every transition of the modal starts with one of these.
#[derive(Debug, Clone)]
pub enum UserAction {
    OpenAddressBook,
    CloseAddressBook,
    RequestNewAddress,
    RequestEditAddress(AddressId),
    SelectAddress(AddressId),
    DeleteAddress(AddressId),
    PatchDraft(DraftPatch),
    SubmitAddressForm,
    CancelAddressForm,
    OpenReviews(ArticleId),
    CloseReviews,
    ToggleReviewLike(ReviewId),
    RemoveReview(ReviewId),
    DismissNotice,
}

/// Completions delivered by the shell after the cache layer has
/// accepted them. Mutation completions carry the original request so
/// the reducer can release the guard and check session freshness.
#[derive(Debug, Clone)]
pub enum RuntimeAction {
    SessionLoaded {
        result: Result<SessionUser, GatewayError>,
    },
    AddressesLoaded {
        result: Result<Vec<Address>, GatewayError>,
    },
    ReviewsLoaded {
        article: ArticleId,
        result: Result<Vec<Review>, GatewayError>,
    },
    MutationSettled {
        request: MutationRequest,
        result: Result<(), GatewayError>,
    },
}
