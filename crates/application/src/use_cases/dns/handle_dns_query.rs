use crate::ports::{DnsCachePort, UpstreamPort};
use ferrous_relay_domain::{CachedAnswer, DnsQuery, DnsRequest, DomainError};
use std::sync::Arc;
use tracing::{debug, warn};

/// How a request was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsResolution {
    /// Served from cache; the caller encodes the answer message.
    Cached(CachedAnswer),
    /// Relayed from upstream; the bytes go back to the client untouched.
    Forwarded(Vec<u8>),
}

impl DnsResolution {
    pub fn is_cache_hit(&self) -> bool {
        matches!(self, DnsResolution::Cached(_))
    }
}

pub struct HandleDnsQueryUseCase {
    cache: Arc<dyn DnsCachePort>,
    upstream: Arc<dyn UpstreamPort>,
}

impl HandleDnsQueryUseCase {
    pub fn new(cache: Arc<dyn DnsCachePort>, upstream: Arc<dyn UpstreamPort>) -> Self {
        Self { cache, upstream }
    }

    pub async fn execute(&self, request: &DnsRequest) -> Result<DnsResolution, DomainError> {
        if let Some(record_type) = request.record_type {
            let query = DnsQuery::new(Arc::clone(&request.domain), record_type);
            if let Some(answer) = self.cache.lookup(&query) {
                debug!(
                    domain = %request.domain,
                    record_type = %record_type,
                    ttl = answer.ttl,
                    "Cache hit"
                );
                return Ok(DnsResolution::Cached(answer));
            }
        }

        // Nothing is written to the cache unless the round trip succeeds.
        let reply = self.upstream.forward(&request.raw).await?;

        match reply.records {
            Ok(records) => {
                debug!(
                    domain = %request.domain,
                    learned = records.len(),
                    "Forwarded to upstream"
                );
                if !records.is_empty() {
                    self.cache.learn(&records);
                }
            }
            Err(e) => {
                warn!(
                    domain = %request.domain,
                    upstream = %self.upstream.server(),
                    error = %e,
                    "Relaying upstream reply that could not be parsed"
                );
            }
        }

        Ok(DnsResolution::Forwarded(reply.raw))
    }
}
