pub mod entity;
pub mod fields;
pub mod record;

pub use entity::EntityKind;
pub use fields::{Fields, SYSTEM_FIELDS};
pub use record::{format_timestamp, Record, RecordId, RecordKey};
