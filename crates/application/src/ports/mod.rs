mod cache_maintenance_port;
mod dns_cache_port;
mod upstream_port;

pub use cache_maintenance_port::{CacheMaintenancePort, CacheSweepOutcome};
pub use dns_cache_port::DnsCachePort;
pub use upstream_port::{UpstreamPort, UpstreamReply};

pub use ferrous_relay_domain::DnsQuery;
