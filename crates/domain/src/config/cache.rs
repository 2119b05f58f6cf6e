use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Seconds between expiry sweeps.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Snapshot loaded at startup and written at shutdown.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval_secs(),
            snapshot_path: default_snapshot_path(),
        }
    }
}

fn default_sweep_interval_secs() -> u64 {
    10
}

fn default_snapshot_path() -> String {
    "ferrous-relay.cache".to_string()
}
