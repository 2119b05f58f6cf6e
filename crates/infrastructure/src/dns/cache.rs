pub mod clock;
pub mod snapshot;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use snapshot::{CacheSnapshotFile, SnapshotEntry, SnapshotError};
pub use storage::DnsCache;
