use super::clock::now_millis;
use super::storage::DnsCache;
use std::sync::atomic::Ordering as AtomicOrdering;
use tracing::debug;

impl DnsCache {
    /// Removes every entry whose lifetime has elapsed or that a reader
    /// already found expired. Returns the number of entries dropped.
    pub fn evict_expired(&self) -> usize {
        let now = now_millis();
        let before = self.cache.len();
        self.cache
            .retain(|_, entry| !entry.is_marked_for_deletion() && !entry.is_expired_at(now));
        let removed = before.saturating_sub(self.cache.len());

        if removed > 0 {
            self.metrics
                .evictions
                .fetch_add(removed as u64, AtomicOrdering::Relaxed);

            debug!(
                removed,
                cache_size = self.cache.len(),
                "Expired cache entries removed"
            );
        }

        removed
    }
}
