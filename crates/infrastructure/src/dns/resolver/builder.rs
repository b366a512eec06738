use super::core::IterativeResolver;
use crate::dns::cache::DnsCache;
use crate::dns::transport::{DnsTransport, UdpTransport};
use delve_dns_application::ports::DnsResolver;
use delve_dns_domain::{DomainError, ResolverConfig};
use std::sync::Arc;
use tracing::info;

pub struct ResolverBuilder {
    config: ResolverConfig,
    transport: Option<Arc<dyn DnsTransport>>,
    cache: Option<Arc<DnsCache>>,
}

impl ResolverBuilder {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            transport: None,
            cache: None,
        }
    }

    /// Replaces the default UDP transport.
    pub fn with_transport(mut self, transport: Arc<dyn DnsTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_cache(mut self, cache: Arc<DnsCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Result<Arc<dyn DnsResolver>, DomainError> {
        let root = self.config.root_address().ok_or_else(|| {
            DomainError::InvalidDomainName(format!(
                "root server '{}' is not an IP address",
                self.config.root_server
            ))
        })?;

        info!(
            root = %root,
            cache = self.cache.is_some(),
            max_referral_depth = self.config.max_referral_depth,
            "Building DNS resolver"
        );

        let transport: Arc<dyn DnsTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(UdpTransport::default()),
        };

        let mut resolver = IterativeResolver::new(
            transport,
            root,
            self.config.referral_port,
            self.config.query_timeout(),
        )
        .with_limits(
            self.config.max_referral_depth,
            self.config.max_queries_per_resolution,
        );

        if let Some(cache) = self.cache {
            resolver = resolver.with_cache(cache);
        }

        Ok(Arc::new(resolver))
    }
}
