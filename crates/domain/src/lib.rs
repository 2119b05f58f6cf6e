//! Ferrous Relay Domain Layer
pub mod cached_record;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod dns_request;
pub mod errors;
pub mod record_set;

pub use cached_record::{now_millis, CachedAnswer, CachedRecord, RecordPayload};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use dns_record::{LearnedRecord, RecordData, RecordType};
pub use dns_request::DnsRequest;
pub use errors::DomainError;
pub use record_set::RecordSet;
