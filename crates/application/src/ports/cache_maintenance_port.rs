use async_trait::async_trait;
use ferrous_relay_domain::DomainError;

/// Outcome of one expiry sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheSweepOutcome {
    /// Slots cleared because their record had expired.
    pub records_expired: usize,
    /// Names dropped because their record set was left empty.
    pub names_removed: usize,
    pub cache_size: usize,
}

impl CacheSweepOutcome {
    pub fn removed_anything(&self) -> bool {
        self.records_expired > 0 || self.names_removed > 0
    }
}

/// Port for periodic cache maintenance.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    /// Purge expired records and then every name left without records.
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError>;
}
