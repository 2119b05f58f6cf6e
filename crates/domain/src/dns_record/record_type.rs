use serde::{Deserialize, Serialize};
use std::fmt;

/// Record types the cache can hold. Every other type is forwarded upstream
/// on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    A,
    AAAA,
    NS,
    PTR,
}

impl RecordType {
    pub const ALL: [RecordType; 4] = [RecordType::A, RecordType::AAAA, RecordType::NS, RecordType::PTR];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::NS => "NS",
            RecordType::PTR => "PTR",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
