use rustc_hash::FxHashMap;

use super::{EntityDataValue, IntoEntityData};
use crate::{packets::game::CSetEntityData, utils::ReservedIndex};

/// Collects entity data entries before they are frozen into a
/// [`CSetEntityData`].
///
/// A later insert at the same index replaces the earlier value.
#[derive(Debug, Clone, Default)]
pub struct EntityDataBuilder {
    entries: FxHashMap<u8, EntityDataValue>,
}

impl EntityDataBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value at `index`, returning the value it replaced.
    pub fn insert(
        &mut self,
        index: u8,
        value: impl IntoEntityData,
    ) -> Result<Option<EntityDataValue>, ReservedIndex> {
        if index == CSetEntityData::TERMINATOR {
            return Err(ReservedIndex);
        }
        Ok(self.entries.insert(index, value.into_entity_data()))
    }

    /// Chained form of [`EntityDataBuilder::insert`].
    pub fn with(mut self, index: u8, value: impl IntoEntityData) -> Result<Self, ReservedIndex> {
        self.insert(index, value)?;
        Ok(self)
    }

    /// Number of distinct indices set so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freezes the entries into a packet for `entity_id`.
    #[must_use]
    pub fn build(self, entity_id: i32) -> CSetEntityData {
        CSetEntityData::from_entries(entity_id, self.entries)
    }
}
