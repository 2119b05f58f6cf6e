//! Mapping from `hickory_proto::rr::RecordType` to `ferrous_relay_domain::RecordType`

use ferrous_relay_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

/// Maps the question type of a decoded query onto the cacheable types
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Returns `None` for every type the cache does not hold.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> Option<RecordType> {
        match hickory_type {
            HickoryRecordType::A => Some(RecordType::A),
            HickoryRecordType::AAAA => Some(RecordType::AAAA),
            HickoryRecordType::NS => Some(RecordType::NS),
            HickoryRecordType::PTR => Some(RecordType::PTR),
            _ => None,
        }
    }
}
