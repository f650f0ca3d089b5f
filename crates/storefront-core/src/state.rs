use std::collections::BTreeSet;
use std::collections::VecDeque;

use crate::cache::CacheTag;
use crate::models::Address;
use crate::models::AddressDraft;
use crate::models::AddressId;
use crate::models::ArticleId;
use crate::models::DraftPatch;
use crate::models::Review;
use crate::models::ReviewId;
use crate::models::SessionUser;

/// Discrete UI state of the address-management overlay. The wire codes
/// are the step numbers the web client stores (0 closed, 1 list,
/// 2 add, 3 neutral/selection-confirmed, 4 edit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalStep {
    Closed,
    List,
    Add,
    Review,
    Edit,
}

impl ModalStep {
    pub fn wire_code(self) -> u8 {
        match self {
            Self::Closed => 0,
            Self::List => 1,
            Self::Add => 2,
            Self::Review => 3,
            Self::Edit => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::List => "list",
            Self::Add => "add",
            Self::Review => "review",
            Self::Edit => "edit",
        }
    }

    pub fn is_form(self) -> bool {
        matches!(self, Self::Add | Self::Edit)
    }
}

/// The address modal as one state machine object. Step and edit mode
/// are logically a single value; only the transition methods below may
/// change them, and they always change them together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressModal {
    step: ModalStep,
    edit_mode: bool,
    edit_target: Option<AddressId>,
    session: u64,
    draft: AddressDraft,
}

impl Default for AddressModal {
    fn default() -> Self {
        Self {
            step: ModalStep::Closed,
            edit_mode: false,
            edit_target: None,
            session: 1,
            draft: AddressDraft::default(),
        }
    }
}

impl AddressModal {
    pub fn step(&self) -> ModalStep {
        self.step
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn edit_target(&self) -> Option<&AddressId> {
        self.edit_target.as_ref()
    }

    /// Identifies one open-close cycle. Completions issued under an
    /// older session are discarded by the reducer.
    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn draft(&self) -> &AddressDraft {
        &self.draft
    }

    pub fn is_open(&self) -> bool {
        self.step != ModalStep::Closed
    }

    pub(crate) fn open_list(&mut self) {
        self.step = ModalStep::List;
    }

    pub(crate) fn enter_add(&mut self) {
        self.step = ModalStep::Add;
        self.edit_mode = false;
        self.edit_target = None;
        self.draft = AddressDraft::default();
    }

    pub(crate) fn enter_edit(&mut self, target: AddressId, seed: Option<AddressDraft>) {
        self.step = ModalStep::Edit;
        self.edit_mode = true;
        self.edit_target = Some(target);
        self.draft = seed.unwrap_or_default();
    }

    /// Cancel or a successful form submit: back to the list, form state
    /// discarded. Edit mode is irrelevant outside Add/Edit and left
    /// as-is; the next enter_add/enter_edit sets it.
    pub(crate) fn back_to_list(&mut self) {
        self.step = ModalStep::List;
        self.edit_target = None;
        self.draft = AddressDraft::default();
    }

    pub(crate) fn close(&mut self) {
        self.step = ModalStep::Closed;
        self.edit_mode = false;
        self.edit_target = None;
        self.draft = AddressDraft::default();
        self.session += 1;
    }

    pub(crate) fn patch_draft(&mut self, patch: DraftPatch) {
        self.draft.apply(patch);
    }
}

/// Snapshot of one remote read as the views see it. The cache layer
/// decides which completions may write here.
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Remote<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A dismissable overlay message, the terminal stand-in for the web
/// client's alert popups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub seq: u64,
    pub level: NoticeLevel,
    pub title: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NoticeQueue {
    cap: usize,
    next_seq: u64,
    buf: VecDeque<Notice>,
}

impl Default for NoticeQueue {
    fn default() -> Self {
        Self::new(16)
    }
}

impl NoticeQueue {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            next_seq: 1,
            buf: VecDeque::with_capacity(cap),
        }
    }

    pub fn push(&mut self, level: NoticeLevel, title: impl Into<String>, body: Option<String>) {
        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(Notice {
            seq: self.next_seq,
            level,
            title: title.into(),
            body,
        });
        self.next_seq += 1;
    }

    pub fn dismiss_front(&mut self) -> Option<Notice> {
        self.buf.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.buf.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }
}

/// What a mutation locks while in flight. The cache layer does not
/// serialize writes by key, so double-submission guarding happens here:
/// one guard may hold at most one pending mutation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum MutationGuard {
    CreateAddress,
    Address(AddressId),
    Review(ReviewId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOp {
    CreateAddress(AddressDraft),
    UpdateAddress {
        id: AddressId,
        draft: AddressDraft,
    },
    DeleteAddress(AddressId),
    RemoveReview {
        id: ReviewId,
        article: ArticleId,
    },
    LikeReview {
        id: ReviewId,
        article: ArticleId,
    },
    UnlikeReview {
        id: ReviewId,
        article: ArticleId,
    },
}

impl MutationOp {
    pub fn guard(&self) -> MutationGuard {
        match self {
            Self::CreateAddress(_) => MutationGuard::CreateAddress,
            Self::UpdateAddress { id, .. } | Self::DeleteAddress(id) => {
                MutationGuard::Address(id.clone())
            }
            Self::RemoveReview { id, .. }
            | Self::LikeReview { id, .. }
            | Self::UnlikeReview { id, .. } => MutationGuard::Review(id.clone()),
        }
    }

    /// Tag refetched after this mutation succeeds.
    pub fn invalidates(&self) -> CacheTag {
        match self {
            Self::CreateAddress(_) | Self::UpdateAddress { .. } | Self::DeleteAddress(_) => {
                CacheTag::SearchAddress
            }
            Self::RemoveReview { article, .. }
            | Self::LikeReview { article, .. }
            | Self::UnlikeReview { article, .. } => CacheTag::Reviews(Some(article.clone())),
        }
    }

    /// Address mutations belong to one modal session; their completions
    /// are dropped once that session is gone. Review mutations outlive
    /// the modal.
    pub fn is_modal_scoped(&self) -> bool {
        matches!(
            self,
            Self::CreateAddress(_) | Self::UpdateAddress { .. } | Self::DeleteAddress(_)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateAddress(_) => "create address",
            Self::UpdateAddress { .. } => "update address",
            Self::DeleteAddress(_) => "delete address",
            Self::RemoveReview { .. } => "remove review",
            Self::LikeReview { .. } => "like review",
            Self::UnlikeReview { .. } => "unlike review",
        }
    }
}

/// One dispatched mutation: the op plus the identifiers the completion
/// must echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub request_id: u64,
    pub session: u64,
    pub op: MutationOp,
}

#[derive(Debug, Clone, Default)]
pub struct PendingMutations {
    next_request_id: u64,
    in_flight: BTreeSet<MutationGuard>,
}

impl PendingMutations {
    /// Claim a guard. `None` means the same target already has a
    /// mutation in flight and the trigger must stay disabled.
    pub fn begin(&mut self, guard: MutationGuard) -> Option<u64> {
        if !self.in_flight.insert(guard) {
            return None;
        }
        self.next_request_id += 1;
        Some(self.next_request_id)
    }

    pub fn settle(&mut self, guard: &MutationGuard) -> bool {
        self.in_flight.remove(guard)
    }

    pub fn holds(&self, guard: &MutationGuard) -> bool {
        self.in_flight.contains(guard)
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}

/// Review list currently on screen, scoped by article.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPanel {
    pub article: ArticleId,
    pub list: Remote<Vec<Review>>,
}

#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub modal: AddressModal,
    pub addresses: Remote<Vec<Address>>,
    pub reviews: Option<ReviewPanel>,
    pub session: Remote<SessionUser>,
    pub notices: NoticeQueue,
    pub pending: PendingMutations,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logged_in_user(&self) -> Option<&SessionUser> {
        self.session.ready().filter(|user| user.is_logged_in)
    }

    pub fn address(&self, id: &AddressId) -> Option<&Address> {
        self.addresses
            .ready()
            .and_then(|list| list.iter().find(|address| &address.id == id))
    }

    pub fn review(&self, id: &ReviewId) -> Option<&Review> {
        self.reviews
            .as_ref()
            .and_then(|panel| panel.list.ready())
            .and_then(|list| list.iter().find(|review| &review.id == id))
    }
}
