//! Network item stacks.
//!
//! A stack is serialized as:
//! - count: `VarInt` (0 = empty slot, nothing follows)
//! - if count > 0:
//!   - item id: `VarInt`
//!   - components to add: `VarInt`
//!   - components to remove: `VarInt`
//!   - each added component: id `VarInt` + payload
//!   - each removed component: id `VarInt`

mod components;

use std::io::{Read, Write};

use ember_utils::{
    codec::VarInt,
    serial::{ReadFrom, WriteTo},
    text::TextComponent,
};

pub use components::{ItemComponent, Rarity};

use crate::{
    config::{MAX_ITEM_COMPONENTS, ProtocolConfig},
    utils::{PacketReadError, PacketWriteError},
};
use components::{read_count, write_count};

/// A stack of items with its component patch.
///
/// Components keep their wire order so a decoded stack writes back to the
/// same bytes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemStack {
    /// The item's registry id.
    pub item_id: i32,
    /// The number of items, 0 for an empty slot.
    pub count: i32,
    /// Components added on top of the item's defaults.
    pub components: Vec<ItemComponent>,
    /// Ids of default components removed from this stack.
    pub removed: Vec<i32>,
}

impl ItemStack {
    /// An empty slot.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            item_id: 0,
            count: 0,
            components: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// A stack without components.
    #[must_use]
    pub const fn new(item_id: i32, count: i32) -> Self {
        Self {
            item_id,
            count,
            components: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Returns whether this slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count <= 0
    }

    /// Adds `component`, replacing any component of the same type in place.
    #[must_use]
    pub fn with_component(mut self, component: ItemComponent) -> Self {
        match self
            .components
            .iter_mut()
            .find(|existing| existing.id() == component.id())
        {
            Some(existing) => *existing = component,
            None => self.components.push(component),
        }
        self
    }

    /// Sets the custom name.
    #[must_use]
    pub fn with_display_name(self, name: impl Into<TextComponent>) -> Self {
        self.with_component(ItemComponent::CustomName(name.into()))
    }

    /// Sets the lore lines.
    #[must_use]
    pub fn with_lore(self, lines: Vec<TextComponent>) -> Self {
        self.with_component(ItemComponent::Lore(lines))
    }

    /// The custom name, if the stack has one.
    #[must_use]
    pub fn display_name(&self) -> Option<&TextComponent> {
        self.components.iter().find_map(|component| match component {
            ItemComponent::CustomName(name) => Some(name),
            _ => None,
        })
    }

    /// The lore lines, empty if the stack has none.
    #[must_use]
    pub fn lore(&self) -> &[TextComponent] {
        self.components
            .iter()
            .find_map(|component| match component {
                ItemComponent::Lore(lines) => Some(lines.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Pushes the text of every custom name and lore component onto `out`,
    /// in component order. This is the order [`ItemStack::try_map_text`]
    /// calls its transform in.
    pub fn collect_text<'a>(&'a self, out: &mut Vec<&'a TextComponent>) {
        for component in &self.components {
            match component {
                ItemComponent::CustomName(name) => out.push(name),
                ItemComponent::Lore(lines) => out.extend(lines),
                _ => {}
            }
        }
    }

    /// Returns a copy with every custom name and lore line passed through
    /// `f`. Everything else, including component order, is kept.
    pub fn try_map_text<E>(
        &self,
        f: &mut impl FnMut(&TextComponent) -> Result<TextComponent, E>,
    ) -> Result<Self, E> {
        let components = self
            .components
            .iter()
            .map(|component| -> Result<ItemComponent, E> {
                Ok(match component {
                    ItemComponent::CustomName(name) => ItemComponent::CustomName(f(name)?),
                    ItemComponent::Lore(lines) => ItemComponent::Lore(
                        lines.iter().map(&mut *f).collect::<Result<_, E>>()?,
                    ),
                    other => other.clone(),
                })
            })
            .collect::<Result<_, E>>()?;

        Ok(Self {
            item_id: self.item_id,
            count: self.count,
            components,
            removed: self.removed.clone(),
        })
    }

    /// Reads a stack, enforcing the component and lore limits of `config`.
    pub fn read(data: &mut impl Read, config: &ProtocolConfig) -> Result<Self, PacketReadError> {
        let count = VarInt::read(data)?.0;
        if count < 0 {
            return Err(PacketReadError::MalformedValue(format!(
                "negative item count {count}"
            )));
        }
        if count == 0 {
            return Ok(Self::empty());
        }

        let item_id = VarInt::read(data)?.0;
        let added = read_count(data, config.max_item_components)?;
        let removed = read_count(data, config.max_item_components)?;

        let mut components = Vec::with_capacity(added);
        for _ in 0..added {
            let id = VarInt::read(data)?.0;
            components.push(ItemComponent::read(id, data, config)?);
        }

        let mut removed_ids = Vec::with_capacity(removed);
        for _ in 0..removed {
            removed_ids.push(VarInt::read(data)?.0);
        }

        Ok(Self {
            item_id,
            count,
            components,
            removed: removed_ids,
        })
    }

    /// Writes the stack. An empty stack is written as a single zero count.
    pub fn write(&self, writer: &mut impl Write) -> Result<(), PacketWriteError> {
        if self.is_empty() {
            VarInt(0).write(writer)?;
            return Ok(());
        }

        VarInt(self.count).write(writer)?;
        VarInt(self.item_id).write(writer)?;
        write_count(writer, self.components.len(), MAX_ITEM_COMPONENTS)?;
        write_count(writer, self.removed.len(), MAX_ITEM_COMPONENTS)?;
        for component in &self.components {
            component.write(writer)?;
        }
        for id in &self.removed {
            VarInt(*id).write(writer)?;
        }
        Ok(())
    }
}
