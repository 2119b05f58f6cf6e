#![allow(dead_code)]
use ferrous_relay_domain::{LearnedRecord, RecordData, RecordType};
use ferrous_relay_infrastructure::dns::{DnsCache, ManualClock};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::{A, AAAA, NS, PTR};
use hickory_proto::rr::{Name, RData, Record, RecordType as HickoryRecordType};
use hickory_proto::serialize::binary::BinEncodable;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

pub const T0_MS: u64 = 1_700_000_000_000;

pub fn manual_cache() -> (Arc<DnsCache>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(T0_MS));
    let cache = Arc::new(DnsCache::with_clock(clock.clone()));
    (cache, clock)
}

/// Recursive query with one IN question, encoded by hickory.
pub fn query_bytes(id: u16, domain: &str, record_type: RecordType) -> Vec<u8> {
    let qtype = match record_type {
        RecordType::A => HickoryRecordType::A,
        RecordType::AAAA => HickoryRecordType::AAAA,
        RecordType::NS => HickoryRecordType::NS,
        RecordType::PTR => HickoryRecordType::PTR,
    };

    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(domain).unwrap(), qtype));
    message.to_vec().unwrap()
}

/// Recursive IN query assembled byte by byte, so label case reaches the
/// parser exactly as written.
pub fn raw_query_bytes(id: u16, labels: &[&str], qtype: u16) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(32);
    bytes.extend_from_slice(&id.to_be_bytes());
    bytes.extend_from_slice(&[0x01, 0x00]); // RD
    bytes.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    for label in labels {
        bytes.push(label.len() as u8);
        bytes.extend_from_slice(label.as_bytes());
    }
    bytes.push(0);
    bytes.extend_from_slice(&qtype.to_be_bytes());
    bytes.extend_from_slice(&1u16.to_be_bytes());
    bytes
}

pub fn learned_a(name: &str, ttl: u32, ip: [u8; 4]) -> LearnedRecord {
    LearnedRecord::new(name, ttl, RecordData::A(Ipv4Addr::from(ip)))
}

pub fn learned_aaaa(name: &str, ttl: u32, ip: &str) -> LearnedRecord {
    LearnedRecord::new(name, ttl, RecordData::Aaaa(ip.parse::<Ipv6Addr>().unwrap()))
}

pub fn learned_ns(name: &str, ttl: u32, host: &str) -> LearnedRecord {
    LearnedRecord::new(name, ttl, RecordData::Ns(host.to_string()))
}

pub fn learned_ptr(name: &str, ttl: u32, host: &str) -> LearnedRecord {
    LearnedRecord::new(name, ttl, RecordData::Ptr(host.to_string()))
}

/// Wire records for the mock upstream.
pub struct WireRecordBuilder;

impl WireRecordBuilder {
    pub fn a(name: &str, ttl: u32, ip: [u8; 4]) -> Record {
        Record::from_rdata(Self::name(name), ttl, RData::A(A(Ipv4Addr::from(ip))))
    }

    pub fn aaaa(name: &str, ttl: u32, ip: &str) -> Record {
        Record::from_rdata(
            Self::name(name),
            ttl,
            RData::AAAA(AAAA(ip.parse::<Ipv6Addr>().unwrap())),
        )
    }

    pub fn ns(name: &str, ttl: u32, host: &str) -> Record {
        Record::from_rdata(Self::name(name), ttl, RData::NS(NS(Self::name(host))))
    }

    pub fn ptr(name: &str, ttl: u32, host: &str) -> Record {
        Record::from_rdata(Self::name(name), ttl, RData::PTR(PTR(Self::name(host))))
    }

    fn name(name: &str) -> Name {
        Name::from_ascii(name).unwrap()
    }
}
