use ferrous_relay_domain::{CachedAnswer, DnsQuery, LearnedRecord};

/// Port for the resolution path's view of the DNS cache.
///
/// Every call is atomic with respect to every other cache operation.
pub trait DnsCachePort: Send + Sync {
    /// Purges the name's expired records, then returns the requested type if
    /// it is still cached.
    fn lookup(&self, query: &DnsQuery) -> Option<CachedAnswer>;

    /// Applies learned records in order, all under one critical section.
    fn learn(&self, records: &[LearnedRecord]);

    fn cache_size(&self) -> usize;
}
