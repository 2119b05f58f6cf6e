//! DNS Message Builder
//!
//! Encodes the answer to a cache hit in wire format using `hickory-proto`.

use ferrous_relay_domain::{CachedAnswer, DomainError, RecordPayload};
use hickory_proto::op::{Message, MessageType, OpCode};
use hickory_proto::rr::rdata::{A, AAAA, NS, PTR};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// Builds DNS messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build the reply to `request` from cached data.
    ///
    /// The reply echoes the request's ID and question. Every address or
    /// server in the payload becomes one answer record owned by the queried
    /// name, in the queried class, carrying the remaining ttl.
    pub fn build_cached_reply(
        request: &Message,
        answer: &CachedAnswer,
    ) -> Result<Vec<u8>, DomainError> {
        let question = request.queries().first().ok_or_else(|| {
            DomainError::InvalidDnsQuery("Cannot answer a query without a question".to_string())
        })?;

        let mut message = Message::new(request.id(), MessageType::Response, OpCode::Query);
        message.set_recursion_desired(request.recursion_desired());
        message.set_recursion_available(true);
        message.add_query(question.clone());

        for rdata in Self::answer_rdata(&answer.payload)? {
            let mut record = Record::from_rdata(question.name().clone(), answer.ttl, rdata);
            record.set_dns_class(question.query_class());
            message.add_answer(record);
        }

        Self::serialize_message(&message)
    }

    fn answer_rdata(payload: &RecordPayload) -> Result<Vec<RData>, DomainError> {
        let rdata: Vec<RData> = match payload {
            RecordPayload::A(addrs) => addrs.iter().map(|ip| RData::A(A(*ip))).collect(),
            RecordPayload::Aaaa(addrs) => addrs.iter().map(|ip| RData::AAAA(AAAA(*ip))).collect(),
            RecordPayload::Ns(servers) => servers
                .iter()
                .map(|host| Self::parse_name(host).map(|name| RData::NS(NS(name))))
                .collect::<Result<Vec<_>, _>>()?,
            RecordPayload::Ptr(host) => vec![RData::PTR(PTR(Self::parse_name(host)?))],
        };
        Ok(rdata)
    }

    fn parse_name(host: &str) -> Result<Name, DomainError> {
        Name::from_ascii(host).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Cached hostname '{}' is invalid: {}", host, e))
        })
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
