//! Upstream forwarder over a single connected UDP socket.
//!
//! The client's query is sent byte for byte and the upstream's reply is
//! returned byte for byte; the reply is only parsed to learn cacheable
//! records from it.

use super::response_parser::ResponseParser;
use async_trait::async_trait;
use ferrous_relay_application::ports::{UpstreamPort, UpstreamReply};
use ferrous_relay_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::debug;

pub struct UdpUpstreamForwarder {
    socket: UdpSocket,
    server: SocketAddr,
    timeout: Duration,
    recv_buffer_size: usize,
}

impl UdpUpstreamForwarder {
    /// Binds an ephemeral local port and connects it to `server`.
    pub async fn connect(
        server: SocketAddr,
        timeout: Duration,
        recv_buffer_size: usize,
    ) -> io::Result<Self> {
        let bind_addr: SocketAddr = if server.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(server).await?;

        debug!(
            server = %server,
            local = ?socket.local_addr().ok(),
            "Upstream socket connected"
        );

        Ok(Self {
            socket,
            server,
            timeout,
            recv_buffer_size,
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server
    }

    fn transport_error(&self, e: io::Error) -> DomainError {
        if e.kind() == io::ErrorKind::ConnectionRefused {
            DomainError::TransportConnectionRefused {
                server: self.server.to_string(),
            }
        } else {
            DomainError::TransportError {
                server: self.server.to_string(),
                reason: e.to_string(),
            }
        }
    }

    /// Waits for the datagram carrying `id`. Anything else that arrives
    /// before the deadline (typically a late reply to an earlier query that
    /// already timed out) is dropped.
    async fn recv_matching(&self, id: u16, deadline: Instant) -> Result<Vec<u8>, DomainError> {
        let mut buf = vec![0u8; self.recv_buffer_size];

        loop {
            let received = tokio::time::timeout_at(deadline, self.socket.recv(&mut buf))
                .await
                .map_err(|_| DomainError::QueryTimeout)?
                .map_err(|e| self.transport_error(e))?;

            if received >= 2 && u16::from_be_bytes([buf[0], buf[1]]) == id {
                buf.truncate(received);
                return Ok(buf);
            }

            debug!(
                server = %self.server,
                expected_id = id,
                bytes = received,
                "Discarding upstream datagram with mismatched transaction ID"
            );
        }
    }
}

#[async_trait]
impl UpstreamPort for UdpUpstreamForwarder {
    async fn forward(&self, query: &[u8]) -> Result<UpstreamReply, DomainError> {
        if query.len() < 2 {
            return Err(DomainError::InvalidDnsQuery(format!(
                "Query too short to carry an ID: {} bytes",
                query.len()
            )));
        }
        let id = u16::from_be_bytes([query[0], query[1]]);
        let deadline = Instant::now() + self.timeout;

        tokio::time::timeout_at(deadline, self.socket.send(query))
            .await
            .map_err(|_| DomainError::QueryTimeout)?
            .map_err(|e| self.transport_error(e))?;

        let raw = self.recv_matching(id, deadline).await?;
        debug!(server = %self.server, bytes = raw.len(), "Upstream reply received");

        let records = ResponseParser::parse_learned_records(&raw);
        Ok(UpstreamReply::new(raw, records))
    }

    fn server(&self) -> String {
        self.server.to_string()
    }
}
