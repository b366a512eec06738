use super::clock::now_millis;
use super::entry::CachedEntry;
use super::key::CacheKey;
use super::storage::DnsCache;
use delve_dns_domain::{DomainError, RecordType, ResourceRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct CacheSnapshot {
    version: u32,
    saved_at_millis: u64,
    entries: Vec<SnapshotEntry>,
}

#[derive(Serialize, Deserialize)]
struct SnapshotEntry {
    domain: String,
    record_type: RecordType,
    /// Lifetime left when the snapshot was written.
    remaining_millis: u64,
    records: Vec<ResourceRecord>,
}

impl DnsCache {
    /// Restores entries from the snapshot file, if one is configured and
    /// present. A missing or unreadable snapshot leaves the cache empty;
    /// time spent offline is deducted from every restored lifetime.
    pub fn load(&self) -> usize {
        let Some(path) = self.snapshot_path.clone() else {
            return 0;
        };

        match self.restore_from(&path) {
            Ok(restored) => {
                info!(
                    path = %path.display(),
                    restored,
                    "Cache snapshot loaded"
                );
                restored
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Cache snapshot unusable, starting with an empty cache"
                );
                0
            }
        }
    }

    /// Writes every live entry to the snapshot file. The file is replaced
    /// atomically, so a crash mid-write keeps the previous snapshot.
    pub fn save(&self) -> Result<usize, DomainError> {
        let Some(path) = self.snapshot_path.as_ref() else {
            return Ok(0);
        };

        let now = now_millis();
        let entries: Vec<SnapshotEntry> = self
            .cache
            .iter()
            .filter(|item| {
                let entry = item.value();
                !entry.is_marked_for_deletion() && !entry.is_expired_at(now)
            })
            .map(|item| SnapshotEntry {
                domain: item.key().domain.to_string(),
                record_type: item.key().record_type,
                remaining_millis: item.value().remaining_millis(now),
                records: item.value().records.to_vec(),
            })
            .collect();
        let saved = entries.len();

        let snapshot = CacheSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at_millis: now,
            entries,
        };
        let bytes = serde_json::to_vec(&snapshot)
            .map_err(|e| DomainError::CacheIo(format!("failed to encode snapshot: {}", e)))?;

        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, bytes).map_err(|e| {
            DomainError::CacheIo(format!("failed to write {}: {}", tmp_path.display(), e))
        })?;
        fs::rename(&tmp_path, path).map_err(|e| {
            DomainError::CacheIo(format!("failed to replace {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), saved, "Cache snapshot written");
        Ok(saved)
    }

    fn restore_from(&self, path: &Path) -> Result<usize, DomainError> {
        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No cache snapshot found");
                return Ok(0);
            }
            Err(e) => {
                return Err(DomainError::CacheIo(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let snapshot: CacheSnapshot = serde_json::from_slice(&contents)
            .map_err(|e| DomainError::CacheIo(format!("corrupt snapshot: {}", e)))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(DomainError::CacheIo(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }

        let now = now_millis();
        let offline_millis = now.saturating_sub(snapshot.saved_at_millis);
        let mut restored = 0;

        for entry in snapshot.entries {
            let remaining = entry.remaining_millis.saturating_sub(offline_millis);
            if remaining == 0 {
                continue;
            }

            let key = CacheKey::new(&entry.domain, entry.record_type);
            if !self.insert_restored(key, CachedEntry::with_remaining(entry.records, remaining, now)) {
                debug!(restored, "Cache full while loading snapshot, remaining entries skipped");
                break;
            }
            restored += 1;
        }

        Ok(restored)
    }
}
