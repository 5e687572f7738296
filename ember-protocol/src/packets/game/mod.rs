mod c_set_entity_data;

pub use c_set_entity_data::{CSetEntityData, EntryMarker};
