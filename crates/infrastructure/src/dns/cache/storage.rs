use super::clock::now_millis;
use super::entry::CachedEntry;
use super::key::CacheKey;
use super::CacheMetrics;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use delve_dns_domain::{CacheConfig, RecordType, ResourceRecord};
use rustc_hash::FxBuildHasher;
use std::path::PathBuf;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::sync::Arc;
use tracing::{debug, info};

const MAX_PREALLOCATED_ENTRIES: usize = 4096;

pub struct DnsCacheConfig {
    pub max_entries: usize,
    /// Lifetime given to an entry that holds no records.
    pub empty_answer_ttl: u32,
    /// Where `load`/`save` read and write; `None` keeps the cache in memory only.
    pub snapshot_path: Option<PathBuf>,
}

impl From<&CacheConfig> for DnsCacheConfig {
    fn from(config: &CacheConfig) -> Self {
        Self {
            max_entries: config.max_entries,
            empty_answer_ttl: config.empty_answer_ttl,
            snapshot_path: Some(PathBuf::from(&config.snapshot_path)),
        }
    }
}

/// Response cache keyed by (name, type).
///
/// Safe to share between query handlers and the sweep job: every operation
/// locks a single shard for the duration of one map access, never across
/// I/O.
pub struct DnsCache {
    pub(super) cache: DashMap<CacheKey, CachedEntry, FxBuildHasher>,
    pub(super) max_entries: usize,
    pub(super) empty_answer_ttl: u32,
    pub(super) snapshot_path: Option<PathBuf>,
    pub(super) metrics: Arc<CacheMetrics>,
}

impl DnsCache {
    pub fn new(config: DnsCacheConfig) -> Self {
        info!(
            max_entries = config.max_entries,
            empty_answer_ttl = config.empty_answer_ttl,
            snapshot = ?config.snapshot_path,
            "Initializing DNS cache"
        );

        Self {
            cache: DashMap::with_capacity_and_hasher(
                config.max_entries.min(MAX_PREALLOCATED_ENTRIES),
                FxBuildHasher,
            ),
            max_entries: config.max_entries,
            empty_answer_ttl: config.empty_answer_ttl,
            snapshot_path: config.snapshot_path,
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn metrics(&self) -> &Arc<CacheMetrics> {
        &self.metrics
    }

    /// Copies of the records stored under (domain, record_type), or `None`
    /// when the key is absent or its lifetime has run out.
    pub fn get(&self, domain: &str, record_type: RecordType) -> Option<Vec<ResourceRecord>> {
        let key = CacheKey::new(domain, record_type);

        if let Some(entry) = self.cache.get(&key) {
            if entry.is_expired_at(now_millis()) {
                // Left in place for the sweep; readers already treat it as gone.
                entry.mark_for_deletion();
                self.metrics
                    .lazy_expirations
                    .fetch_add(1, AtomicOrdering::Relaxed);
                self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
                return None;
            }

            self.metrics.hits.fetch_add(1, AtomicOrdering::Relaxed);
            return Some(entry.records.to_vec());
        }

        self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
        None
    }

    /// Stores `records` under (domain, record_type) unless a live entry
    /// already holds that key, in which case the call is a no-op. Returns
    /// whether the records were stored.
    pub fn add(&self, domain: &str, record_type: RecordType, records: Vec<ResourceRecord>) -> bool {
        let now = now_millis();
        let key = CacheKey::new(domain, record_type);

        if self.cache.len() >= self.max_entries && !self.cache.contains_key(&key) {
            self.metrics
                .rejected_full
                .fetch_add(1, AtomicOrdering::Relaxed);
            debug!(
                domain = %domain,
                record_type = %record_type,
                max_entries = self.max_entries,
                "Cache full, entry not stored"
            );
            return false;
        }

        let stored = match self.cache.entry(key) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired_at(now) {
                    occupied.insert(CachedEntry::new(records, self.empty_answer_ttl, now));
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(CachedEntry::new(records, self.empty_answer_ttl, now));
                true
            }
        };

        if stored {
            self.metrics.insertions.fetch_add(1, AtomicOrdering::Relaxed);
            debug!(domain = %domain, record_type = %record_type, "Cache entry stored");
        } else {
            self.metrics
                .duplicate_inserts
                .fetch_add(1, AtomicOrdering::Relaxed);
        }

        stored
    }

    pub(super) fn insert_restored(&self, key: CacheKey, entry: CachedEntry) -> bool {
        if self.cache.len() >= self.max_entries {
            return false;
        }
        self.cache.insert(key, entry);
        true
    }
}
