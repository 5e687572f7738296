//! The item component patches an [`ItemStack`](super::ItemStack) can carry on
//! the wire.

use std::io::{Read, Write};

use ember_utils::{
    codec::VarInt,
    serial::{ReadFrom, WriteTo},
    text::TextComponent,
};

use crate::{
    config::{MAX_LORE_LINES, ProtocolConfig},
    ser::{read_string, read_text, write_string, write_text},
    utils::{PacketReadError, PacketWriteError},
};

/// The rarity of an item, which colors its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Rarity {
    /// White name.
    #[default]
    Common = 0,
    /// Yellow name.
    Uncommon = 1,
    /// Aqua name.
    Rare = 2,
    /// Light purple name.
    Epic = 3,
}

impl Rarity {
    /// Looks up a rarity by its network id.
    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Self::Common),
            1 => Some(Self::Uncommon),
            2 => Some(Self::Rare),
            3 => Some(Self::Epic),
            _ => None,
        }
    }
}

/// A single added component on an item stack.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemComponent {
    /// Overrides how many items fit in one stack.
    MaxStackSize(i32),
    /// Overrides the durability of the item.
    MaxDamage(i32),
    /// Damage taken so far.
    Damage(i32),
    /// The item never loses durability.
    Unbreakable {
        /// Whether the tooltip says so.
        show_in_tooltip: bool,
    },
    /// The name shown for the item, usually set by an anvil or a plugin.
    CustomName(TextComponent),
    /// The default name of the item, used when there is no custom name.
    ItemName(TextComponent),
    /// The model used to render the item.
    ItemModel(String),
    /// Tooltip lines below the name.
    Lore(Vec<TextComponent>),
    /// Overrides the rarity.
    Rarity(Rarity),
}

#[allow(missing_docs)]
impl ItemComponent {
    pub const MAX_STACK_SIZE: i32 = 1;
    pub const MAX_DAMAGE: i32 = 2;
    pub const DAMAGE: i32 = 3;
    pub const UNBREAKABLE: i32 = 4;
    pub const CUSTOM_NAME: i32 = 5;
    pub const ITEM_NAME: i32 = 6;
    pub const ITEM_MODEL: i32 = 7;
    pub const LORE: i32 = 8;
    pub const RARITY: i32 = 9;

    /// The network id of this component type.
    #[must_use]
    pub fn id(&self) -> i32 {
        match self {
            Self::MaxStackSize(_) => Self::MAX_STACK_SIZE,
            Self::MaxDamage(_) => Self::MAX_DAMAGE,
            Self::Damage(_) => Self::DAMAGE,
            Self::Unbreakable { .. } => Self::UNBREAKABLE,
            Self::CustomName(_) => Self::CUSTOM_NAME,
            Self::ItemName(_) => Self::ITEM_NAME,
            Self::ItemModel(_) => Self::ITEM_MODEL,
            Self::Lore(_) => Self::LORE,
            Self::Rarity(_) => Self::RARITY,
        }
    }

    /// Reads the payload of the component with network id `id`.
    pub fn read(
        id: i32,
        data: &mut impl Read,
        config: &ProtocolConfig,
    ) -> Result<Self, PacketReadError> {
        Ok(match id {
            Self::MAX_STACK_SIZE => Self::MaxStackSize(VarInt::read(data)?.0),
            Self::MAX_DAMAGE => Self::MaxDamage(VarInt::read(data)?.0),
            Self::DAMAGE => Self::Damage(VarInt::read(data)?.0),
            Self::UNBREAKABLE => Self::Unbreakable {
                show_in_tooltip: bool::read(data)?,
            },
            Self::CUSTOM_NAME => Self::CustomName(read_text(data, config)?),
            Self::ITEM_NAME => Self::ItemName(read_text(data, config)?),
            Self::ITEM_MODEL => Self::ItemModel(read_string(data, config)?),
            Self::LORE => {
                let count = read_count(data, config.max_lore_lines)?;
                let mut lines = Vec::with_capacity(count);
                for _ in 0..count {
                    lines.push(read_text(data, config)?);
                }
                Self::Lore(lines)
            }
            Self::RARITY => {
                let id = VarInt::read(data)?.0;
                Self::Rarity(Rarity::from_id(id).ok_or_else(|| {
                    PacketReadError::MalformedValue(format!("unknown rarity {id}"))
                })?)
            }
            other => return Err(PacketReadError::UnknownItemComponent(other)),
        })
    }

    /// Writes the component id followed by its payload.
    pub fn write(&self, writer: &mut impl Write) -> Result<(), PacketWriteError> {
        VarInt(self.id()).write(writer)?;
        match self {
            Self::MaxStackSize(v) | Self::MaxDamage(v) | Self::Damage(v) => {
                VarInt(*v).write(writer)?;
            }
            Self::Unbreakable { show_in_tooltip } => show_in_tooltip.write(writer)?,
            Self::CustomName(text) | Self::ItemName(text) => write_text(text, writer)?,
            Self::ItemModel(model) => write_string(model, writer)?,
            Self::Lore(lines) => {
                write_count(writer, lines.len(), MAX_LORE_LINES)?;
                for line in lines {
                    write_text(line, writer)?;
                }
            }
            Self::Rarity(rarity) => VarInt(*rarity as i32).write(writer)?,
        }
        Ok(())
    }
}

/// Reads a `VarInt` count, rejecting negatives and anything above `max`.
pub(crate) fn read_count(data: &mut impl Read, max: usize) -> Result<usize, PacketReadError> {
    let raw = VarInt::read(data)?.0;
    let count = usize::try_from(raw)
        .map_err(|_| PacketReadError::MalformedValue(format!("negative count {raw}")))?;
    if count > max {
        return Err(PacketReadError::TooLong { len: count, max });
    }
    Ok(count)
}

/// Writes a `VarInt` count, refusing anything above `max`.
pub(crate) fn write_count(
    writer: &mut impl Write,
    len: usize,
    max: usize,
) -> Result<(), PacketWriteError> {
    if len > max {
        return Err(PacketWriteError::TooLong { len, max });
    }
    VarInt::from(len).write(writer)?;
    Ok(())
}
