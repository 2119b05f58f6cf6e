use super::clock::{Clock, SystemClock};
use ferrous_relay_application::ports::{CacheSweepOutcome, DnsCachePort};
use ferrous_relay_domain::{CachedAnswer, DnsQuery, LearnedRecord, RecordSet, RecordType};
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Name → record set map shared by the serving loop and the sweeper.
///
/// Names are compared exactly as given: no case folding, no trailing-dot
/// normalization. Each public method holds the lock for its own duration
/// only.
pub struct DnsCache {
    entries: Mutex<FxHashMap<Arc<str>, RecordSet>>,
    clock: Arc<dyn Clock>,
}

impl DnsCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(FxHashMap::default()),
            clock,
        }
    }

    // Every mutation leaves the map consistent, so a poisoned lock is still usable.
    fn entries(&self) -> MutexGuard<'_, FxHashMap<Arc<str>, RecordSet>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    pub fn get(&self, name: &str) -> Option<RecordSet> {
        self.entries().get(name).cloned()
    }

    /// Binds an empty record set to `name` unless one is already present.
    pub fn get_or_create(&self, name: &str) -> RecordSet {
        self.entries()
            .entry(Arc::from(name))
            .or_default()
            .clone()
    }

    pub fn remove(&self, name: &str) -> bool {
        self.entries().remove(name).is_some()
    }

    /// Applies every record in order, each under its own owner name.
    pub fn learn(&self, records: &[LearnedRecord]) {
        if records.is_empty() {
            return;
        }

        let now = self.now_millis();
        let mut entries = self.entries();
        for record in records {
            entries
                .entry(Arc::clone(&record.name))
                .or_default()
                .learn_at(record.ttl, &record.data, now);
        }

        debug!(learned = records.len(), cache_size = entries.len(), "Cache updated");
    }

    /// Read path: drops the name's expired slots, then answers from the
    /// requested slot if it is still there.
    pub fn lookup(&self, name: &str, record_type: RecordType) -> Option<CachedAnswer> {
        let now = self.now_millis();
        let mut entries = self.entries();
        entries
            .get_mut(name)
            .and_then(|set| set.answer_at(record_type, now))
    }

    /// Full scan: purge expired slots everywhere, then drop every name whose
    /// set ended up empty.
    pub fn sweep(&self) -> CacheSweepOutcome {
        let now = self.now_millis();
        let mut entries = self.entries();

        let mut records_expired = 0;
        let mut empty_names = Vec::new();
        for (name, set) in entries.iter_mut() {
            records_expired += set.delete_expired_records_at(now);
            if set.is_empty() {
                empty_names.push(Arc::clone(name));
            }
        }

        for name in &empty_names {
            entries.remove(name);
        }

        CacheSweepOutcome {
            records_expired,
            names_removed: empty_names.len(),
            cache_size: entries.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Copy of every entry, for persistence.
    pub fn snapshot_entries(&self) -> Vec<(Arc<str>, RecordSet)> {
        self.entries()
            .iter()
            .map(|(name, set)| (Arc::clone(name), set.clone()))
            .collect()
    }

    /// Inserts restored entries, replacing any set already held for the same
    /// name. Empty sets are skipped. Returns how many names were inserted.
    pub fn restore<I>(&self, restored: I) -> usize
    where
        I: IntoIterator<Item = (Arc<str>, RecordSet)>,
    {
        let mut entries = self.entries();
        let mut inserted = 0;
        for (name, set) in restored {
            if set.is_empty() {
                continue;
            }
            entries.insert(name, set);
            inserted += 1;
        }
        inserted
    }
}

impl Default for DnsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsCachePort for DnsCache {
    fn lookup(&self, query: &DnsQuery) -> Option<CachedAnswer> {
        DnsCache::lookup(self, &query.domain, query.record_type)
    }

    fn learn(&self, records: &[LearnedRecord]) {
        DnsCache::learn(self, records)
    }

    fn cache_size(&self) -> usize {
        self.len()
    }
}
