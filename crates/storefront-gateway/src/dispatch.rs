use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use tracing::debug;

use storefront_core::actions::RuntimeAction;
use storefront_core::cache::QueryKey;
use storefront_core::state::MutationOp;
use storefront_core::state::MutationRequest;

use crate::client::StoreClient;
use crate::contracts::AddressPayload;

/// What the worker threads hand back to the shell loop. Fetch
/// completions carry the key and generation so the shell can settle
/// the cache before applying the action; mutation completions go
/// straight to the reducer, which holds the session guard.
#[derive(Debug)]
pub enum GatewayEvent {
    Fetch {
        key: QueryKey,
        generation: u64,
        ok: bool,
        action: RuntimeAction,
    },
    Mutation(RuntimeAction),
}

/// Runs gateway calls off the UI thread. One worker per request; each
/// dispatched request produces exactly one event on the channel, and a
/// receiver that went away just drops it.
pub struct Dispatcher {
    client: Arc<dyn StoreClient>,
    tx: Sender<GatewayEvent>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn StoreClient>, tx: Sender<GatewayEvent>) -> Self {
        Self { client, tx }
    }

    pub fn fetch(&self, key: QueryKey, generation: u64) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        thread::spawn(move || {
            debug!(?key, generation, "fetch dispatched");
            let action = match &key {
                QueryKey::SearchAddress => RuntimeAction::AddressesLoaded {
                    result: client.list_addresses(),
                },
                QueryKey::Reviews(article) => RuntimeAction::ReviewsLoaded {
                    article: article.clone(),
                    result: client.list_reviews(article),
                },
                QueryKey::AuthCheck => RuntimeAction::SessionLoaded {
                    result: client.auth_check(),
                },
            };
            let ok = fetch_succeeded(&action);
            let _ = tx.send(GatewayEvent::Fetch {
                key,
                generation,
                ok,
                action,
            });
        });
    }

    pub fn run(&self, request: MutationRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        thread::spawn(move || {
            debug!(request_id = request.request_id, op = request.op.label(), "mutation dispatched");
            let result = match &request.op {
                MutationOp::CreateAddress(draft) => client
                    .create_address(&AddressPayload::from(draft))
                    .map(|_| ()),
                MutationOp::UpdateAddress { id, draft } => client
                    .update_address(id, &AddressPayload::from(draft))
                    .map(|_| ()),
                MutationOp::DeleteAddress(id) => client.delete_address(id),
                MutationOp::RemoveReview { id, .. } => client.remove_review(id),
                MutationOp::LikeReview { id, .. } => client.like_review(id),
                MutationOp::UnlikeReview { id, .. } => client.unlike_review(id),
            };
            let _ = tx.send(GatewayEvent::Mutation(RuntimeAction::MutationSettled {
                request,
                result,
            }));
        });
    }
}

fn fetch_succeeded(action: &RuntimeAction) -> bool {
    match action {
        RuntimeAction::AddressesLoaded { result } => result.is_ok(),
        RuntimeAction::ReviewsLoaded { result, .. } => result.is_ok(),
        RuntimeAction::SessionLoaded { result } => result.is_ok(),
        RuntimeAction::MutationSettled { .. } => false,
    }
}
