#![allow(dead_code)]
#![allow(unused_imports)]

use async_trait::async_trait;
use ferrous_relay_application::ports::{DnsCachePort, UpstreamPort, UpstreamReply};
use ferrous_relay_domain::{
    CachedAnswer, DnsQuery, DomainError, LearnedRecord, RecordSet, RecordType,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory cache backed by real record sets at a fixed instant.
pub struct MockDnsCache {
    entries: Mutex<HashMap<String, RecordSet>>,
    learned: Mutex<Vec<LearnedRecord>>,
    now_ms: AtomicU64,
    lookups: AtomicU64,
}

impl MockDnsCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            learned: Mutex::new(Vec::new()),
            now_ms: AtomicU64::new(1_700_000_000_000),
            lookups: AtomicU64::new(0),
        }
    }

    pub fn advance_secs(&self, secs: u64) {
        self.now_ms.fetch_add(secs * 1000, Ordering::Relaxed);
    }

    pub fn learned(&self) -> Vec<LearnedRecord> {
        self.learned.lock().unwrap().clone()
    }

    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.lock().unwrap().contains_key(name)
    }
}

impl Default for MockDnsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsCachePort for MockDnsCache {
    fn lookup(&self, query: &DnsQuery) -> Option<CachedAnswer> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let now = self.now_ms.load(Ordering::Relaxed);
        let mut entries = self.entries.lock().unwrap();
        entries
            .get_mut(&*query.domain)
            .and_then(|set| set.answer_at(query.record_type, now))
    }

    fn learn(&self, records: &[LearnedRecord]) {
        let now = self.now_ms.load(Ordering::Relaxed);
        let mut entries = self.entries.lock().unwrap();
        for record in records {
            entries
                .entry(record.name.to_string())
                .or_default()
                .learn_at(record.ttl, &record.data, now);
        }
        self.learned.lock().unwrap().extend_from_slice(records);
    }

    fn cache_size(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

enum Scripted {
    Reply(UpstreamReply),
    Fail(DomainError),
}

/// Upstream that replays scripted outcomes and records what it was sent.
pub struct MockUpstream {
    script: Mutex<Vec<Scripted>>,
    sent: Mutex<Vec<Vec<u8>>>,
    calls: AtomicU64,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            calls: AtomicU64::new(0),
        }
    }

    pub fn with_reply(self, raw: &[u8], records: Vec<LearnedRecord>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push(Scripted::Reply(UpstreamReply::new(raw.to_vec(), Ok(records))));
        self
    }

    pub fn with_unparsable_reply(self, raw: &[u8]) -> Self {
        self.script.lock().unwrap().push(Scripted::Reply(UpstreamReply::new(
            raw.to_vec(),
            Err(DomainError::InvalidDnsResponse("truncated".to_string())),
        )));
        self
    }

    pub fn with_failure(self, error: DomainError) -> Self {
        self.script.lock().unwrap().push(Scripted::Fail(error));
        self
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockUpstream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamPort for MockUpstream {
    async fn forward(&self, query: &[u8]) -> Result<UpstreamReply, DomainError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.sent.lock().unwrap().push(query.to_vec());

        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            return Err(DomainError::QueryTimeout);
        }
        match script.remove(0) {
            Scripted::Reply(reply) => Ok(reply),
            Scripted::Fail(error) => Err(error),
        }
    }

    fn server(&self) -> String {
        "mock-upstream:53".to_string()
    }
}
