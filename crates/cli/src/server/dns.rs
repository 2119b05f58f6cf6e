use ferrous_relay_infrastructure::dns::DnsServerHandler;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Binds the listener and serves until `shutdown` is cancelled.
pub async fn start_dns_server(
    bind_addr: String,
    recv_buffer_size: usize,
    handler: DnsServerHandler,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let socket = UdpSocket::bind(socket_addr).await?;

    info!(bind_address = %socket.local_addr()?, "DNS server ready");

    serve_udp(socket, recv_buffer_size, handler, shutdown).await;

    info!("DNS server stopped");
    Ok(())
}

/// One datagram at a time: the next one is received only after the
/// current one has been answered or dropped.
pub async fn serve_udp(
    socket: UdpSocket,
    recv_buffer_size: usize,
    handler: DnsServerHandler,
    shutdown: CancellationToken,
) {
    let mut buf = vec![0u8; recv_buffer_size];

    loop {
        let received = tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut buf) => received,
        };

        let (len, client) = match received {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "UDP receive failed");
                continue;
            }
        };

        let Some(reply) = handler.handle_raw_udp(&buf[..len], client).await else {
            continue;
        };

        if let Err(e) = socket.send_to(&reply, client).await {
            warn!(client = %client, error = %e, "Failed to send reply");
        }
    }
}
