use super::RecordType;
use std::net::SocketAddr;
use std::sync::Arc;

/// One client datagram after its question has been decoded.
///
/// `record_type` is `None` when the queried type is not cacheable; such a
/// request is always forwarded. `raw` holds the datagram exactly as received
/// so it can be relayed upstream unmodified.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub domain: Arc<str>,
    pub record_type: Option<RecordType>,
    pub raw: Arc<[u8]>,
    pub client: SocketAddr,
}

impl DnsRequest {
    pub fn new(
        domain: impl Into<Arc<str>>,
        record_type: Option<RecordType>,
        raw: impl Into<Arc<[u8]>>,
        client: SocketAddr,
    ) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            raw: raw.into(),
            client,
        }
    }
}
