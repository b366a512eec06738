use async_trait::async_trait;
use delve_dns_application::ports::{CacheMaintenancePort, CacheSweepOutcome};
use delve_dns_domain::DomainError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

pub struct MockCacheMaintenancePort {
    sweep_call_count: Arc<AtomicU64>,
    flush_call_count: Arc<AtomicU64>,
    should_fail_sweep: Arc<AtomicBool>,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self {
            sweep_call_count: Arc::new(AtomicU64::new(0)),
            flush_call_count: Arc::new(AtomicU64::new(0)),
            should_fail_sweep: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_should_fail_sweep(&self, fail: bool) {
        self.should_fail_sweep.store(fail, Ordering::SeqCst);
    }

    pub fn sweep_call_count(&self) -> u64 {
        self.sweep_call_count.load(Ordering::SeqCst)
    }

    pub fn flush_call_count(&self) -> u64 {
        self.flush_call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError> {
        self.sweep_call_count.fetch_add(1, Ordering::SeqCst);

        if self.should_fail_sweep.load(Ordering::SeqCst) {
            return Err(DomainError::CacheIo("mock sweep failure".to_string()));
        }
        Ok(CacheSweepOutcome::default())
    }

    async fn flush(&self) -> Result<usize, DomainError> {
        self.flush_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(0)
    }
}
