use super::{RecordData, RecordType};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock time as Unix milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Kind-specific data held by a [`CachedRecord`].
///
/// A, AAAA and NS lists only ever grow while the record lives. A PTR target
/// is written once, when the record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum RecordPayload {
    A(Vec<Ipv4Addr>),
    Aaaa(Vec<Ipv6Addr>),
    Ns(Vec<String>),
    Ptr(String),
}

impl RecordPayload {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordPayload::A(_) => RecordType::A,
            RecordPayload::Aaaa(_) => RecordType::AAAA,
            RecordPayload::Ns(_) => RecordType::NS,
            RecordPayload::Ptr(_) => RecordType::PTR,
        }
    }

    /// Number of answer records this payload expands to.
    pub fn len(&self) -> usize {
        match self {
            RecordPayload::A(addrs) => addrs.len(),
            RecordPayload::Aaaa(addrs) => addrs.len(),
            RecordPayload::Ns(servers) => servers.len(),
            RecordPayload::Ptr(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fresh payload for a record created from `data`.
    pub(crate) fn seeded_from(data: &RecordData) -> Self {
        match data {
            RecordData::A(_) => RecordPayload::A(Vec::new()),
            RecordData::Aaaa(_) => RecordPayload::Aaaa(Vec::new()),
            RecordData::Ns(_) => RecordPayload::Ns(Vec::new()),
            RecordData::Ptr(host) => RecordPayload::Ptr(host.clone()),
        }
    }

    /// Appends list data. PTR payloads and mismatched kinds are left alone.
    pub(crate) fn append(&mut self, data: &RecordData) -> bool {
        match (self, data) {
            (RecordPayload::A(addrs), RecordData::A(addr)) => addrs.push(*addr),
            (RecordPayload::Aaaa(addrs), RecordData::Aaaa(addr)) => addrs.push(*addr),
            (RecordPayload::Ns(servers), RecordData::Ns(server)) => servers.push(server.clone()),
            _ => return false,
        }
        true
    }
}

/// One TTL-bearing payload for one name.
///
/// `ttl` and `created_at_ms` are fixed at creation; later learnings of the
/// same type only grow the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedRecord {
    ttl: u32,
    created_at_ms: u64,
    payload: RecordPayload,
}

impl CachedRecord {
    pub fn new(ttl: u32, payload: RecordPayload) -> Self {
        Self::new_at(ttl, payload, now_millis())
    }

    pub fn new_at(ttl: u32, payload: RecordPayload, created_at_ms: u64) -> Self {
        Self {
            ttl,
            created_at_ms,
            payload,
        }
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn created_at_ms(&self) -> u64 {
        self.created_at_ms
    }

    pub fn payload(&self) -> &RecordPayload {
        &self.payload
    }

    pub(crate) fn payload_mut(&mut self) -> &mut RecordPayload {
        &mut self.payload
    }

    pub fn record_type(&self) -> RecordType {
        self.payload.record_type()
    }

    /// Whole seconds elapsed since creation. A clock that went backwards
    /// counts as no time elapsed.
    #[inline]
    pub fn elapsed_secs_at(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at_ms) / 1000
    }

    #[inline]
    pub fn remaining_ttl_at(&self, now_ms: u64) -> u32 {
        (self.ttl as u64).saturating_sub(self.elapsed_secs_at(now_ms)) as u32
    }

    #[inline]
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        self.remaining_ttl_at(now_ms) == 0
    }

    pub fn remaining_ttl(&self) -> u32 {
        self.remaining_ttl_at(now_millis())
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now_millis())
    }

    /// Snapshot of this record as a cache answer at `now_ms`.
    pub fn answer_at(&self, now_ms: u64) -> CachedAnswer {
        CachedAnswer {
            ttl: self.remaining_ttl_at(now_ms),
            payload: self.payload.clone(),
        }
    }
}

/// Data served for a cache hit: the payload and the ttl left on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedAnswer {
    pub ttl: u32,
    pub payload: RecordPayload,
}

impl CachedAnswer {
    pub fn record_type(&self) -> RecordType {
        self.payload.record_type()
    }
}
