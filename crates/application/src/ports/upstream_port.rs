use async_trait::async_trait;
use ferrous_relay_domain::{DomainError, LearnedRecord};

/// Reply to one forwarded query.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    /// Reply datagram exactly as the upstream sent it.
    pub raw: Vec<u8>,
    /// Cacheable records found in the reply, or why it could not be parsed.
    pub records: Result<Vec<LearnedRecord>, DomainError>,
}

impl UpstreamReply {
    pub fn new(raw: Vec<u8>, records: Result<Vec<LearnedRecord>, DomainError>) -> Self {
        Self { raw, records }
    }
}

#[async_trait]
pub trait UpstreamPort: Send + Sync {
    /// Sends `query` upstream unmodified and waits for the matching reply.
    async fn forward(&self, query: &[u8]) -> Result<UpstreamReply, DomainError>;

    fn server(&self) -> String;
}
