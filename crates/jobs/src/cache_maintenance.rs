use delve_dns_application::ports::CacheMaintenancePort;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Periodic cache sweep. The loop writes a final snapshot when it is
/// cancelled, so `close()` returning means the cache is on disk.
pub struct CacheMaintenanceJob {
    maintenance: Arc<dyn CacheMaintenancePort>,
    sweep_interval_secs: u64,
    shutdown: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl CacheMaintenanceJob {
    pub fn new(maintenance: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
            handle: Mutex::new(None),
        }
    }

    pub fn with_interval(mut self, sweep_interval_secs: u64) -> Self {
        self.sweep_interval_secs = sweep_interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .map(|handle| handle.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    pub async fn start(self: Arc<Self>) {
        let Ok(mut slot) = self.handle.lock() else {
            error!("Cache maintenance job state poisoned, not starting");
            return;
        };
        if slot.is_some() {
            warn!("Cache maintenance job already started");
            return;
        }

        info!(
            interval_secs = self.sweep_interval_secs,
            "Starting cache maintenance background job"
        );

        let job = Arc::clone(&self);
        *slot = Some(tokio::spawn(async move { job.run().await }));
    }

    /// Stops the sweep loop and waits for its final flush.
    pub async fn close(&self) {
        self.shutdown.cancel();

        let handle = match self.handle.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };

        match handle {
            Some(handle) => {
                if let Err(e) = handle.await {
                    error!(error = %e, "Cache maintenance task ended abnormally");
                }
            }
            None => {
                // Never started: still persist what is in memory.
                self.flush().await;
            }
        }
    }

    async fn run(&self) {
        let period = Duration::from_secs(self.sweep_interval_secs);
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("CacheMaintenanceJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    match self.maintenance.run_sweep_cycle().await {
                        Ok(outcome) => {
                            debug!(
                                entries_removed = outcome.entries_removed,
                                entries_saved = ?outcome.entries_saved,
                                cache_size = outcome.cache_size,
                                "Cache sweep cycle completed"
                            );
                        }
                        Err(e) => {
                            error!(error = %e, "Cache sweep cycle failed");
                        }
                    }
                }
            }
        }

        self.flush().await;
    }

    async fn flush(&self) {
        match self.maintenance.flush().await {
            Ok(saved) => info!(entries = saved, "Cache snapshot flushed"),
            Err(e) => error!(error = %e, "Cache snapshot flush failed"),
        }
    }
}
