pub mod delegation;
pub mod zone;

pub use delegation::is_deletable;
pub use zone::{qualified_name, Record, RecordData, RecordType, Soa, Zone, APEX};
