use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use ferrous_relay_application::use_cases::{DnsResolution, HandleDnsQueryUseCase};
use ferrous_relay_domain::{DnsRequest, DomainError};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns one client datagram into the datagram to send back, if any.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Every failure is contained here: it is logged and the client gets no
    /// reply.
    pub async fn handle_raw_udp(&self, query: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        match self.resolve(query, client).await {
            Ok(reply) => Some(reply),
            Err(DomainError::QueryTimeout) => {
                debug!(client = %client, "Upstream timed out, query dropped");
                None
            }
            Err(e) => {
                warn!(client = %client, error = %e, "Query dropped");
                None
            }
        }
    }

    async fn resolve(&self, query: &[u8], client: SocketAddr) -> Result<Vec<u8>, DomainError> {
        let parsed = ResponseParser::parse_query(query)?;

        debug!(
            domain = %parsed.domain,
            record_type = ?parsed.record_type,
            client = %client,
            "DNS query received"
        );

        let request = DnsRequest::new(parsed.domain, parsed.record_type, query, client);

        match self.use_case.execute(&request).await? {
            DnsResolution::Cached(answer) => {
                debug!(
                    domain = %request.domain,
                    answers = answer.payload.len(),
                    ttl = answer.ttl,
                    "Answering from cache"
                );
                MessageBuilder::build_cached_reply(&parsed.message, &answer)
            }
            DnsResolution::Forwarded(raw) => Ok(raw),
        }
    }
}
