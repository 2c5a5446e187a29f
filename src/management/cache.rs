use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use crate::{config::Config, types::TrackData};

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub data: TrackData,
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn age_at(&self, now: DateTime<Utc>) -> TimeDelta {
        now - self.stored_at
    }
}

/// Time-bounded cache of resolved tracks keyed by track id.
///
/// Entries stay fresh for `fresh_for`. Past that they are still kept to serve
/// as stale fallbacks, until a later write finds them older than
/// `evict_after` and purges them. There is no background sweep and no
/// capacity bound.
pub struct TrackCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    fresh_for: TimeDelta,
    evict_after: TimeDelta,
}

impl TrackCache {
    pub fn new(fresh_for: TimeDelta, evict_after: TimeDelta) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            fresh_for,
            evict_after,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.fresh_for, config.evict_after)
    }

    pub async fn get(&self, id: &str) -> Option<CacheEntry> {
        self.get_at(id, Utc::now()).await
    }

    /// Fresh hit only. Reading never touches `stored_at`.
    pub async fn get_at(&self, id: &str, now: DateTime<Utc>) -> Option<CacheEntry> {
        self.entries
            .read()
            .await
            .get(id)
            .filter(|e| e.age_at(now) < self.fresh_for)
            .cloned()
    }

    /// Any entry for `id`, regardless of age.
    pub async fn get_stale(&self, id: &str) -> Option<CacheEntry> {
        self.entries.read().await.get(id).cloned()
    }

    pub async fn put(&self, id: &str, data: TrackData) {
        self.put_at(id, data, Utc::now()).await
    }

    /// Stores `data` as of `now`, overwriting any previous entry, after
    /// purging every entry older than `evict_after` relative to `now`.
    pub async fn put_at(&self, id: &str, data: TrackData, now: DateTime<Utc>) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| e.age_at(now) <= self.evict_after);
        entries.insert(
            id.to_string(),
            CacheEntry {
                data,
                stored_at: now,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
