mod cache_maintenance_port;
mod dns_resolver;

pub use cache_maintenance_port::{CacheMaintenancePort, CacheSweepOutcome};
pub use dns_resolver::DnsResolver;

// Re-export for convenience
pub use delve_dns_domain::DnsMessage;
