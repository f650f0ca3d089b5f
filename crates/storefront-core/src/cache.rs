use std::collections::BTreeMap;

use crate::models::ArticleId;

/// Logical resource tags, named exactly as the API consumers key their
/// queries. A mutation invalidates a tag; every cached read grouped
/// under it goes stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheTag {
    SearchAddress,
    /// `None` covers every article's review list; `Some` scopes to one.
    Reviews(Option<ArticleId>),
    AuthCheck,
}

impl CacheTag {
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::SearchAddress => "searchAddress",
            Self::Reviews(_) => "reviews",
            Self::AuthCheck => "authCheck",
        }
    }

    fn covers(&self, key: &QueryKey) -> bool {
        match (self, key) {
            (Self::SearchAddress, QueryKey::SearchAddress) => true,
            (Self::Reviews(None), QueryKey::Reviews(_)) => true,
            (Self::Reviews(Some(article)), QueryKey::Reviews(key_article)) => {
                article == key_article
            }
            (Self::AuthCheck, QueryKey::AuthCheck) => true,
            _ => false,
        }
    }
}

/// One cached read the shell can mount, fetch and invalidate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum QueryKey {
    SearchAddress,
    Reviews(ArticleId),
    AuthCheck,
}

impl QueryKey {
    pub fn tag(&self) -> CacheTag {
        match self {
            Self::SearchAddress => CacheTag::SearchAddress,
            Self::Reviews(article) => CacheTag::Reviews(Some(article.clone())),
            Self::AuthCheck => CacheTag::AuthCheck,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Idle,
    Pending,
    Fresh,
    Stale,
    Failed,
}

#[derive(Debug, Clone)]
struct Slot {
    status: SlotStatus,
    generation: u64,
    mounted: bool,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            status: SlotStatus::Idle,
            generation: 0,
            mounted: false,
        }
    }
}

/// Bookkeeping for the query layer: which reads are mounted, which are
/// pending, and which fetch generation is still current. Data itself
/// lives in the store state; this only decides whether a completion is
/// allowed to touch it.
#[derive(Debug, Default)]
pub struct QueryCache {
    slots: BTreeMap<QueryKey, Slot>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, key: QueryKey) {
        self.slots.entry(key).or_default().mounted = true;
    }

    /// Unmounting keeps the slot (and its generation) so late
    /// completions can still be recognized and dropped.
    pub fn release(&mut self, key: &QueryKey) {
        if let Some(slot) = self.slots.get_mut(key) {
            slot.mounted = false;
        }
    }

    /// Start a fetch for `key`. Returns the new generation, or `None`
    /// when a fetch for the same key is already pending; concurrent
    /// identical reads are deduplicated here, mutations never are.
    pub fn begin_fetch(&mut self, key: &QueryKey) -> Option<u64> {
        let slot = self.slots.entry(key.clone()).or_default();
        if slot.status == SlotStatus::Pending {
            return None;
        }
        slot.generation += 1;
        slot.status = SlotStatus::Pending;
        Some(slot.generation)
    }

    /// Accept or drop a fetch completion. Only the matching generation
    /// of a still-mounted slot is applied; everything else is a no-op
    /// for the caller.
    pub fn settle(&mut self, key: &QueryKey, generation: u64, ok: bool) -> bool {
        let Some(slot) = self.slots.get_mut(key) else {
            return false;
        };
        if slot.generation != generation {
            return false;
        }
        slot.status = if ok {
            SlotStatus::Fresh
        } else {
            SlotStatus::Failed
        };
        slot.mounted
    }

    /// Mark every read under `tag` stale and return the mounted keys
    /// that need a background refetch.
    pub fn invalidate(&mut self, tag: &CacheTag) -> Vec<QueryKey> {
        let mut refetch = Vec::new();
        for (key, slot) in &mut self.slots {
            if !tag.covers(key) {
                continue;
            }
            if slot.status != SlotStatus::Idle {
                slot.status = SlotStatus::Stale;
            }
            if slot.mounted {
                refetch.push(key.clone());
            }
        }
        refetch
    }

    pub fn status(&self, key: &QueryKey) -> SlotStatus {
        self.slots
            .get(key)
            .map(|slot| slot.status)
            .unwrap_or(SlotStatus::Idle)
    }
}
