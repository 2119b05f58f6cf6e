mod handle_dns_query;

pub use handle_dns_query::{DnsResolution, HandleDnsQueryUseCase};
