use anyhow::Context;
use delve_dns_application::ports::CacheMaintenancePort;
use delve_dns_application::use_cases::HandleDnsQueryUseCase;
use delve_dns_domain::Config;
use delve_dns_infrastructure::dns::{
    DnsCache, DnsCacheConfig, DnsCacheMaintenance, DnsServerHandler, ResolverBuilder,
    UdpTransport,
};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub cache: Option<Arc<DnsCache>>,
    pub handler: Arc<DnsServerHandler>,
    pub cache_maintenance: Option<Arc<dyn CacheMaintenancePort>>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS services");

        let cache = config.cache.enabled.then(|| {
            let cache = Arc::new(DnsCache::new(DnsCacheConfig::from(&config.cache)));
            cache.load();
            cache
        });

        let transport = Arc::new(UdpTransport::new(config.server.max_datagram_size.max(512)));
        let mut builder = ResolverBuilder::new(config.resolver.clone()).with_transport(transport);
        if let Some(cache) = &cache {
            builder = builder.with_cache(Arc::clone(cache));
        }
        let resolver = builder.build().context("Failed to build resolver")?;

        let use_case = Arc::new(HandleDnsQueryUseCase::new(resolver));
        let handler = Arc::new(DnsServerHandler::new(use_case));

        let cache_maintenance = cache.as_ref().map(|cache| {
            Arc::new(DnsCacheMaintenance::new(Arc::clone(cache))) as Arc<dyn CacheMaintenancePort>
        });

        info!(
            cache_enabled = cache.is_some(),
            root = %config.resolver.root_server,
            "DNS services ready"
        );

        Ok(Self {
            cache,
            handler,
            cache_maintenance,
        })
    }
}
