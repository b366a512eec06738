use async_trait::async_trait;
use delve_dns_domain::DomainError;

/// Outcome of a cache sweep cycle.
#[derive(Debug, Default, Clone)]
pub struct CacheSweepOutcome {
    pub entries_removed: usize,
    /// Entries written to the snapshot, `None` when the save failed.
    pub entries_saved: Option<usize>,
    pub cache_size: usize,
}

/// Port for periodic DNS cache housekeeping (expiry + persistence).
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    /// Drop expired entries and write the snapshot.
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError>;

    /// Write the snapshot without sweeping, used on shutdown.
    async fn flush(&self) -> Result<usize, DomainError>;
}
