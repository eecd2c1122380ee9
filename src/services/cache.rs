use crate::models::RoommateMatch;
use moka::future::{Cache, CacheBuilder};
use std::sync::Arc;
use std::time::Duration;

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Ranked roommate list for a user at a given limit
    pub fn roommates(user_id: &str, limit: usize) -> String {
        format!("roommates:{}:{}", user_id, limit)
    }
}

/// In-memory cache of ranked roommate lists
///
/// Preferences are written by the web app straight to the backend, so
/// entries cannot be invalidated on change; a short TTL bounds staleness.
/// A disabled cache never stores anything.
#[derive(Clone)]
pub struct MatchCache {
    entries: Cache<String, Arc<Vec<RoommateMatch>>>,
    enabled: bool,
}

impl MatchCache {
    pub fn new(max_entries: u64, ttl_secs: u64, enabled: bool) -> Self {
        let entries = CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries, enabled }
    }

    pub fn disabled() -> Self {
        Self::new(1, 1, false)
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Vec<RoommateMatch>>> {
        if !self.enabled {
            return None;
        }

        let hit = self.entries.get(key).await;
        tracing::trace!("Cache {}: {}", if hit.is_some() { "hit" } else { "miss" }, key);
        hit
    }

    pub async fn insert(&self, key: String, matches: Vec<RoommateMatch>) {
        if self.enabled {
            self.entries.insert(key, Arc::new(matches)).await;
        }
    }

    pub async fn invalidate(&self, key: &str) {
        self.entries.invalidate(key).await;
    }
}
