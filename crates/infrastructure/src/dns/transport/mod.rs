pub mod udp;

use async_trait::async_trait;
use delve_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

pub use udp::UdpTransport;

/// One request/response exchange with a remote DNS server.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn exchange(
        &self,
        server: SocketAddr,
        message: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError>;
}
