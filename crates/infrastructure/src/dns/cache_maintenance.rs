use super::cache::DnsCache;
use async_trait::async_trait;
use delve_dns_application::ports::{CacheMaintenancePort, CacheSweepOutcome};
use delve_dns_domain::DomainError;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{error, warn};

/// Infrastructure adapter implementing `CacheMaintenancePort`.
///
/// Both the sweep and the snapshot write walk the whole map, so they run on
/// the blocking pool instead of a runtime worker.
pub struct DnsCacheMaintenance {
    cache: Arc<DnsCache>,
}

impl DnsCacheMaintenance {
    pub fn new(cache: Arc<DnsCache>) -> Self {
        Self { cache }
    }

    async fn save_snapshot(&self) -> Result<usize, DomainError> {
        let cache = Arc::clone(&self.cache);
        tokio::task::spawn_blocking(move || cache.save())
            .await
            .map_err(|e| DomainError::CacheIo(format!("snapshot task failed: {}", e)))?
    }
}

#[async_trait]
impl CacheMaintenancePort for DnsCacheMaintenance {
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError> {
        let cache = Arc::clone(&self.cache);
        let entries_removed =
            eviction_count(tokio::task::spawn_blocking(move || cache.evict_expired()).await);

        let entries_saved = match self.save_snapshot().await {
            Ok(saved) => Some(saved),
            Err(e) => {
                warn!(error = %e, "Cache snapshot failed");
                None
            }
        };

        Ok(CacheSweepOutcome {
            entries_removed,
            entries_saved,
            cache_size: self.cache.len(),
        })
    }

    async fn flush(&self) -> Result<usize, DomainError> {
        self.save_snapshot().await
    }
}

fn eviction_count(result: Result<usize, JoinError>) -> usize {
    result.unwrap_or_else(|e| {
        error!(error = %e, "Eviction task failed");
        0
    })
}
