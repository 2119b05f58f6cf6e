use ferrous_relay_infrastructure::dns::{CacheSnapshotFile, DnsCache, SnapshotEntry, SnapshotError};
use tracing::{debug, error, info};

/// A missing or unusable snapshot means a cold start, never a failure.
pub fn restore_cache(cache: &DnsCache, snapshot: &CacheSnapshotFile) {
    let path = snapshot.path().display();

    match snapshot.load() {
        Ok(entries) => {
            let restored = cache.restore(entries.into_iter().map(|e| (e.name, e.records)));
            info!(path = %path, names = restored, "Cache snapshot restored");
        }
        Err(SnapshotError::NotFound(_)) => {
            debug!(path = %path, "No cache snapshot, starting with an empty cache");
        }
        Err(e) => {
            debug!(path = %path, error = %e, "Ignoring unusable cache snapshot");
        }
    }
}

pub fn persist_cache(cache: &DnsCache, snapshot: &CacheSnapshotFile) {
    let entries: Vec<SnapshotEntry> = cache
        .snapshot_entries()
        .into_iter()
        .map(|(name, records)| SnapshotEntry { name, records })
        .collect();

    match snapshot.save(entries) {
        Ok(names) => info!(path = %snapshot.path().display(), names, "Cache snapshot saved"),
        Err(e) => error!(
            path = %snapshot.path().display(),
            error = %e,
            "Failed to save cache snapshot"
        ),
    }
}
