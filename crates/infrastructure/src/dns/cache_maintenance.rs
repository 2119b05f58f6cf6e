use super::cache::DnsCache;

use async_trait::async_trait;
use ferrous_relay_application::ports::{CacheMaintenancePort, CacheSweepOutcome};
use ferrous_relay_domain::DomainError;
use std::sync::Arc;
use tracing::debug;

/// Infrastructure adapter implementing `CacheMaintenancePort`.
pub struct DnsCacheMaintenance {
    cache: Arc<DnsCache>,
}

impl DnsCacheMaintenance {
    pub fn new(cache: Arc<DnsCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl CacheMaintenancePort for DnsCacheMaintenance {
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError> {
        let outcome = self.cache.sweep();
        debug!(
            records_expired = outcome.records_expired,
            names_removed = outcome.names_removed,
            cache_size = outcome.cache_size,
            "Sweep cycle finished"
        );
        Ok(outcome)
    }
}
