use super::record_type_map::RecordTypeMapper;
use ferrous_relay_domain::{DomainError, LearnedRecord, RecordData, RecordType};
use hickory_proto::op::Message;
use hickory_proto::rr::{RData, Record};
use tracing::debug;

/// A client query after its first question has been decoded.
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    pub message: Message,
    /// Presentation form of the queried name, used as the cache key.
    pub domain: String,
    /// `None` when the queried type is not one the cache holds.
    pub record_type: Option<RecordType>,
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse_query(query_bytes: &[u8]) -> Result<ParsedQuery, DomainError> {
        let message = Message::from_vec(query_bytes).map_err(|e| {
            DomainError::InvalidDnsQuery(format!("Failed to parse DNS query: {}", e))
        })?;

        let question = message
            .queries()
            .first()
            .ok_or_else(|| DomainError::InvalidDnsQuery("Query has no question".to_string()))?;

        let domain = question.name().to_ascii();
        let record_type = RecordTypeMapper::from_hickory(question.query_type());

        Ok(ParsedQuery {
            message,
            domain,
            record_type,
        })
    }

    /// Cacheable records of an upstream reply: the answer section first, then
    /// the additional section, in wire order and with duplicates kept.
    pub fn parse_learned_records(response_bytes: &[u8]) -> Result<Vec<LearnedRecord>, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        Ok(Self::learned_records(&message))
    }

    pub fn learned_records(message: &Message) -> Vec<LearnedRecord> {
        let learned: Vec<LearnedRecord> = message
            .answers()
            .iter()
            .chain(message.additionals().iter())
            .filter_map(Self::project)
            .collect();

        debug!(
            rcode = ?message.response_code(),
            answers = message.answers().len(),
            additionals = message.additionals().len(),
            learned = learned.len(),
            "DNS response parsed"
        );

        learned
    }

    fn project(record: &Record) -> Option<LearnedRecord> {
        let data = match record.data() {
            RData::A(a) => RecordData::A(a.0),
            RData::AAAA(aaaa) => RecordData::Aaaa(aaaa.0),
            RData::NS(ns) => RecordData::Ns(ns.to_ascii()),
            RData::PTR(ptr) => RecordData::Ptr(ptr.to_ascii()),
            _ => return None,
        };

        Some(LearnedRecord::new(
            record.name().to_ascii(),
            record.ttl(),
            data,
        ))
    }
}
