//! UDP transport (RFC 1035 §4.2.1).
//!
//! Messages go out as-is, one datagram each way. Every exchange binds its
//! own ephemeral socket, so concurrent resolutions never read each other's
//! replies.

use super::DnsTransport;
use async_trait::async_trait;
use delve_dns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

pub const DEFAULT_MAX_RESPONSE_SIZE: usize = 512;

pub struct UdpTransport {
    max_response_size: usize,
}

impl UdpTransport {
    pub fn new(max_response_size: usize) -> Self {
        Self { max_response_size }
    }

    pub fn max_response_size(&self) -> usize {
        self.max_response_size
    }
}

impl Default for UdpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESPONSE_SIZE)
    }
}

fn unreachable_server(server: SocketAddr, reason: impl ToString) -> DomainError {
    DomainError::UnreachableServer {
        server: server.to_string(),
        reason: reason.to_string(),
    }
}

fn timed_out(server: SocketAddr) -> DomainError {
    DomainError::NetworkTimeout {
        server: server.to_string(),
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn exchange(
        &self,
        server: SocketAddr,
        message: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        let bind_addr = if server.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| unreachable_server(server, format!("bind failed: {}", e)))?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send_to(message, server))
            .await
            .map_err(|_| timed_out(server))?
            .map_err(|e| unreachable_server(server, e))?;

        debug!(server = %server, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; self.max_response_size];
        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| timed_out(server))?
                .map_err(|e| unreachable_server(server, e))?;

        if from_addr.ip() != server.ip() {
            warn!(
                expected = %server,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(server = %server, bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}
