pub mod cache;
pub mod cache_maintenance;
pub mod codec;
pub mod resolver;
pub mod server;
pub mod transport;

pub use cache::{CacheKey, CacheMetrics, CachedEntry, DnsCache, DnsCacheConfig};
pub use cache_maintenance::DnsCacheMaintenance;
pub use resolver::{IterativeResolver, ResolverBuilder};
pub use server::DnsServerHandler;
pub use transport::{DnsTransport, UdpTransport};
