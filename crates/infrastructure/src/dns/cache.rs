pub mod clock;
pub mod compaction;
pub mod entry;
pub mod key;
pub mod metrics;
pub mod snapshot;
pub mod storage;

pub use entry::CachedEntry;
pub use key::CacheKey;
pub use metrics::CacheMetrics;
pub use storage::{DnsCache, DnsCacheConfig};
