#![allow(dead_code)]
use ferrous_relay_domain::{CachedRecord, LearnedRecord, RecordData, RecordPayload};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Fixed instant used as "creation time" across the domain tests.
pub const T0_MS: u64 = 1_700_000_000_000;

pub fn secs_after_t0(secs: u64) -> u64 {
    T0_MS + secs * 1000
}

pub fn a(ip: [u8; 4]) -> RecordData {
    RecordData::A(Ipv4Addr::from(ip))
}

pub fn aaaa(ip: &str) -> RecordData {
    RecordData::Aaaa(ip.parse::<Ipv6Addr>().unwrap())
}

pub fn ns(host: &str) -> RecordData {
    RecordData::Ns(host.to_string())
}

pub fn ptr(host: &str) -> RecordData {
    RecordData::Ptr(host.to_string())
}

pub struct CachedRecordBuilder {
    ttl: u32,
    created_at_ms: u64,
    payload: RecordPayload,
}

impl CachedRecordBuilder {
    pub fn new() -> Self {
        Self {
            ttl: 60,
            created_at_ms: T0_MS,
            payload: RecordPayload::A(vec![Ipv4Addr::new(1, 2, 3, 4)]),
        }
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn created_at_ms(mut self, created_at_ms: u64) -> Self {
        self.created_at_ms = created_at_ms;
        self
    }

    pub fn payload(mut self, payload: RecordPayload) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> CachedRecord {
        CachedRecord::new_at(self.ttl, self.payload, self.created_at_ms)
    }
}

impl Default for CachedRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn learned(name: &str, ttl: u32, data: RecordData) -> LearnedRecord {
    LearnedRecord::new(name, ttl, data)
}
