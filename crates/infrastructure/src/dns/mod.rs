pub mod cache;
pub mod cache_maintenance;
pub mod forwarding;
pub mod server;

pub use cache::{
    CacheSnapshotFile, Clock, DnsCache, ManualClock, SnapshotEntry, SnapshotError, SystemClock,
};
pub use cache_maintenance::DnsCacheMaintenance;
pub use forwarding::UdpUpstreamForwarder;
pub use server::DnsServerHandler;
