use delve_dns_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Serves DNS over UDP until `shutdown` is cancelled. Every datagram is
/// handled on its own task; only a bind failure is fatal.
///
/// Returns once every task still answering a query has finished, so cache
/// writes made by those resolutions precede any final snapshot.
pub async fn start_dns_server(
    bind_addr: SocketAddr,
    handler: Arc<DnsServerHandler>,
    max_datagram_size: usize,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket = Arc::new(create_udp_socket(bind_addr)?);

    info!(bind_address = %bind_addr, max_datagram_size, "DNS server ready");

    let mut recv_buf = vec![0u8; max_datagram_size];
    let tracker = TaskTracker::new();

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("DNS server: shutting down");
                break;
            }
            result = socket.recv_from(&mut recv_buf) => {
                match result {
                    Ok((len, peer)) => {
                        let request: Arc<[u8]> = Arc::from(&recv_buf[..len]);
                        let handler = Arc::clone(&handler);
                        let socket = Arc::clone(&socket);

                        tracker.spawn(async move {
                            let response = handler.handle_raw(&request).await;
                            if let Err(e) = socket.send_to(&response, peer).await {
                                debug!(client = %peer, error = %e, "Failed to send DNS response");
                            }
                        });
                    }
                    Err(e) => {
                        warn!(error = %e, "UDP recv error");
                    }
                }
            }
        }
    }

    tracker.close();
    if !tracker.is_empty() {
        info!(in_flight = tracker.len(), "DNS server: waiting for in-flight queries");
    }
    tracker.wait().await;

    Ok(())
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    Ok(UdpSocket::from_std(socket.into())?)
}
