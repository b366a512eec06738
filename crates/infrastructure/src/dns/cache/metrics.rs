use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

#[derive(Default, Debug)]
pub struct CacheMetrics {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub insertions: AtomicU64,
    /// `add` calls ignored because a live entry already held the key.
    pub duplicate_inserts: AtomicU64,
    pub rejected_full: AtomicU64,
    pub evictions: AtomicU64,
    pub lazy_expirations: AtomicU64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(AtomicOrdering::Relaxed) as f64;
        let total = hits + self.misses.load(AtomicOrdering::Relaxed) as f64;

        if total > 0.0 {
            (hits / total) * 100.0
        } else {
            0.0
        }
    }
}
