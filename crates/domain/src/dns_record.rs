pub mod record;
pub mod record_type;

pub use record::ZoneRecord;
pub use record_type::RecordType;
