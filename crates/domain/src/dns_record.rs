mod learned;
mod record_type;

pub use learned::{LearnedRecord, RecordData};
pub use record_type::RecordType;
