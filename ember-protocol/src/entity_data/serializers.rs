//! The serializer registry: maps each serializer id to its payload shape.

use std::io::{Read, Write};

use ember_utils::{
    BlockPos,
    codec::{VarInt, VarLong},
    serial::{ReadFrom, WriteTo},
};
use uuid::Uuid;

use super::{Direction, EntityDataValue, GlobalPos, Pose, Quaternionf, Vector3f, VillagerData};
use crate::{
    config::ProtocolConfig,
    item::ItemStack,
    ser::{read_string, read_text, write_string, write_text},
    utils::{PacketReadError, PacketWriteError},
};

/// Entity data serializer IDs (network protocol)
pub struct EntityDataSerializers;

impl EntityDataSerializers {
    /// Byte serializer (u8)
    pub const BYTE: i32 = 0;
    /// Integer serializer (i32/VarInt)
    pub const INT: i32 = 1;
    /// Long serializer (i64/VarLong)
    pub const LONG: i32 = 2;
    /// Float serializer (f32)
    pub const FLOAT: i32 = 3;
    /// String serializer
    pub const STRING: i32 = 4;
    /// Text component serializer
    pub const TEXT_COMPONENT: i32 = 5;
    /// Optional text component serializer
    pub const OPTIONAL_TEXT_COMPONENT: i32 = 6;
    /// Item stack serializer
    pub const ITEM_STACK: i32 = 7;
    /// Boolean serializer
    pub const BOOLEAN: i32 = 8;
    /// Rotations serializer
    pub const ROTATIONS: i32 = 9;
    /// Block position serializer
    pub const BLOCK_POS: i32 = 10;
    /// Optional block position serializer
    pub const OPTIONAL_BLOCK_POS: i32 = 11;
    /// Direction serializer
    pub const DIRECTION: i32 = 12;
    /// Optional UUID serializer
    pub const OPTIONAL_UUID: i32 = 13;
    /// Block state serializer
    pub const BLOCK_STATE: i32 = 14;
    /// Optional block state serializer
    pub const OPTIONAL_BLOCK_STATE: i32 = 15;
    /// Villager data serializer
    pub const VILLAGER_DATA: i32 = 18;
    /// Optional integer serializer
    pub const OPTIONAL_INT: i32 = 19;
    /// Pose serializer
    pub const POSE: i32 = 20;
    /// Cat variant serializer
    pub const CAT_VARIANT: i32 = 21;
    /// Frog variant serializer
    pub const FROG_VARIANT: i32 = 22;
    /// Optional global position serializer
    pub const OPTIONAL_GLOBAL_POS: i32 = 23;
    /// Painting variant serializer
    pub const PAINTING_VARIANT: i32 = 24;
    /// Sniffer state serializer
    pub const SNIFFER_STATE: i32 = 25;
    /// Vector3 serializer
    pub const VECTOR3: i32 = 26;
    /// Quaternion serializer
    pub const QUATERNION: i32 = 27;

    /// Returns whether a payload shape is registered for `id`.
    #[must_use]
    pub fn is_registered(id: i32) -> bool {
        matches!(
            id,
            Self::BYTE..=Self::OPTIONAL_BLOCK_STATE | Self::VILLAGER_DATA..=Self::QUATERNION
        )
    }
}

fn read_optional<R: Read, T>(
    data: &mut R,
    read: impl FnOnce(&mut R) -> Result<T, PacketReadError>,
) -> Result<Option<T>, PacketReadError> {
    if bool::read(data)? {
        Ok(Some(read(data)?))
    } else {
        Ok(None)
    }
}

fn write_optional<T, W: Write>(
    value: Option<&T>,
    writer: &mut W,
    write: impl FnOnce(&T, &mut W) -> Result<(), PacketWriteError>,
) -> Result<(), PacketWriteError> {
    value.is_some().write(writer)?;
    if let Some(value) = value {
        write(value, writer)?;
    }
    Ok(())
}

fn invalid_ordinal(kind: &str, id: i32) -> PacketReadError {
    PacketReadError::MalformedValue(format!("unknown {kind} {id}"))
}

impl EntityDataValue {
    /// Reads the payload for serializer id `serializer`.
    ///
    /// Fails with [`PacketReadError::UnknownEntryType`] when no payload shape
    /// is registered for the id; nothing past the id can be read safely then.
    pub fn read(
        serializer: i32,
        data: &mut impl Read,
        config: &ProtocolConfig,
    ) -> Result<Self, PacketReadError> {
        use EntityDataSerializers as S;

        Ok(match serializer {
            S::BYTE => Self::Byte(u8::read(data)?),
            S::INT => Self::Int(VarInt::read(data)?.0),
            S::LONG => Self::Long(VarLong::read(data)?.0),
            S::FLOAT => Self::Float(f32::read(data)?),
            S::STRING => Self::String(read_string(data, config)?),
            S::TEXT_COMPONENT => Self::TextComponent(read_text(data, config)?),
            S::OPTIONAL_TEXT_COMPONENT => {
                Self::OptionalTextComponent(read_optional(data, |data| read_text(data, config))?)
            }
            S::ITEM_STACK => Self::ItemStack(ItemStack::read(data, config)?),
            S::BOOLEAN => Self::Boolean(bool::read(data)?),
            S::ROTATIONS => Self::Rotations(Vector3f::read(data)?),
            S::BLOCK_POS => Self::BlockPos(BlockPos::read(data)?),
            S::OPTIONAL_BLOCK_POS => {
                Self::OptionalBlockPos(read_optional(data, |data| Ok(BlockPos::read(data)?))?)
            }
            S::DIRECTION => {
                let id = VarInt::read(data)?.0;
                let direction =
                    Direction::from_id(id).ok_or_else(|| invalid_ordinal("direction", id))?;
                Self::Direction(direction)
            }
            S::OPTIONAL_UUID => {
                Self::OptionalUuid(read_optional(data, |data| Ok(Uuid::read(data)?))?)
            }
            S::BLOCK_STATE => Self::BlockState(VarInt::read(data)?.0),
            S::OPTIONAL_BLOCK_STATE => {
                let id = VarInt::read(data)?.0;
                Self::OptionalBlockState((id != 0).then_some(id))
            }
            S::VILLAGER_DATA => Self::VillagerData(VillagerData::read(data)?),
            S::OPTIONAL_INT => {
                let raw = VarInt::read(data)?.0;
                Self::OptionalInt((raw != 0).then_some(raw.wrapping_sub(1)))
            }
            S::POSE => {
                let id = VarInt::read(data)?.0;
                Self::Pose(Pose::from_id(id).ok_or_else(|| invalid_ordinal("pose", id))?)
            }
            S::CAT_VARIANT => Self::CatVariant(VarInt::read(data)?.0),
            S::FROG_VARIANT => Self::FrogVariant(VarInt::read(data)?.0),
            S::OPTIONAL_GLOBAL_POS => Self::OptionalGlobalPos(read_optional(data, |data| {
                Ok(GlobalPos {
                    dimension: read_string(data, config)?,
                    pos: BlockPos::read(data)?,
                })
            })?),
            S::PAINTING_VARIANT => Self::PaintingVariant(VarInt::read(data)?.0),
            S::SNIFFER_STATE => Self::SnifferState(VarInt::read(data)?.0),
            S::VECTOR3 => Self::Vector3(Vector3f::read(data)?),
            S::QUATERNION => Self::Quaternion(Quaternionf::read(data)?),
            unknown => {
                log::warn!("Unsupported entity data serializer: {unknown}");
                return Err(PacketReadError::UnknownEntryType(unknown));
            }
        })
    }

    /// Writes the serializer id followed by the payload.
    pub fn write(&self, writer: &mut impl Write) -> Result<(), PacketWriteError> {
        VarInt(self.serializer_id()).write(writer)?;
        self.write_payload(writer)
    }

    /// Writes the payload only, in the shape [`EntityDataValue::read`]
    /// consumes for [`EntityDataValue::serializer_id`].
    pub fn write_payload<W: Write>(&self, writer: &mut W) -> Result<(), PacketWriteError> {
        match self {
            Self::Byte(v) => v.write(writer)?,
            Self::Int(v)
            | Self::BlockState(v)
            | Self::CatVariant(v)
            | Self::FrogVariant(v)
            | Self::PaintingVariant(v)
            | Self::SnifferState(v) => VarInt(*v).write(writer)?,
            Self::Long(v) => VarLong(*v).write(writer)?,
            Self::Float(v) => v.write(writer)?,
            Self::String(v) => write_string(v, writer)?,
            Self::TextComponent(text) => write_text(text, writer)?,
            Self::OptionalTextComponent(text) => {
                write_optional(text.as_ref(), writer, |text, writer| write_text(text, writer))?;
            }
            Self::ItemStack(stack) => stack.write(writer)?,
            Self::Boolean(v) => v.write(writer)?,
            Self::Rotations(v) | Self::Vector3(v) => v.write(writer)?,
            Self::BlockPos(pos) => pos.write(writer)?,
            Self::OptionalBlockPos(pos) => {
                write_optional(pos.as_ref(), writer, |pos, writer| Ok(pos.write(writer)?))?;
            }
            Self::Direction(direction) => VarInt(*direction as i32).write(writer)?,
            Self::OptionalUuid(uuid) => {
                write_optional(uuid.as_ref(), writer, |uuid, writer| Ok(uuid.write(writer)?))?;
            }
            // Air (0) doubles as the absent marker.
            Self::OptionalBlockState(state) => VarInt(state.unwrap_or(0)).write(writer)?,
            Self::VillagerData(v) => v.write(writer)?,
            Self::OptionalInt(v) => VarInt(v.map_or(0, |v| v.wrapping_add(1))).write(writer)?,
            Self::Pose(pose) => VarInt(*pose as i32).write(writer)?,
            Self::OptionalGlobalPos(pos) => {
                write_optional(pos.as_ref(), writer, |pos, writer| {
                    write_string(&pos.dimension, writer)?;
                    Ok(pos.pos.write(writer)?)
                })?;
            }
            Self::Quaternion(v) => v.write(writer)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_utils::text::TextComponent;

    fn round_trip(value: &EntityDataValue) -> Vec<u8> {
        let mut buf = Vec::new();
        value.write_payload(&mut buf).unwrap();

        let mut slice = buf.as_slice();
        let read =
            EntityDataValue::read(value.serializer_id(), &mut slice, &ProtocolConfig::DEFAULT)
                .unwrap();
        assert!(slice.is_empty(), "{value:?} left {} bytes", slice.len());
        assert_eq!(&read, value);

        let mut again = Vec::new();
        read.write_payload(&mut again).unwrap();
        assert_eq!(again, buf);
        buf
    }

    #[test]
    fn every_kind_reads_back_exactly() {
        let values = [
            EntityDataValue::Byte(0x21),
            EntityDataValue::Int(-7),
            EntityDataValue::Long(1 << 40),
            EntityDataValue::Float(0.6),
            EntityDataValue::String("minecraft:zombie".into()),
            EntityDataValue::TextComponent(TextComponent::text("Grumm").color("red")),
            EntityDataValue::OptionalTextComponent(None),
            EntityDataValue::OptionalTextComponent(Some("Dinnerbone".into())),
            EntityDataValue::ItemStack(ItemStack::new(1, 3).with_display_name("Rock")),
            EntityDataValue::Boolean(true),
            EntityDataValue::Rotations(Vector3f(0.0, 90.0, -10.0)),
            EntityDataValue::BlockPos(BlockPos::new(-30, 64, 12)),
            EntityDataValue::OptionalBlockPos(Some(BlockPos::new(1, -64, 1))),
            EntityDataValue::OptionalBlockPos(None),
            EntityDataValue::Direction(Direction::West),
            EntityDataValue::OptionalUuid(Some(Uuid::from_u128(0x1234_5678))),
            EntityDataValue::BlockState(4012),
            EntityDataValue::OptionalBlockState(Some(9)),
            EntityDataValue::OptionalBlockState(None),
            EntityDataValue::VillagerData(VillagerData {
                villager_type: 2,
                profession: 5,
                level: 3,
            }),
            EntityDataValue::OptionalInt(Some(0)),
            EntityDataValue::OptionalInt(None),
            EntityDataValue::Pose(Pose::Crouching),
            EntityDataValue::CatVariant(3),
            EntityDataValue::FrogVariant(1),
            EntityDataValue::OptionalGlobalPos(Some(GlobalPos {
                dimension: "minecraft:the_nether".into(),
                pos: BlockPos::new(8, 32, -8),
            })),
            EntityDataValue::PaintingVariant(11),
            EntityDataValue::SnifferState(2),
            EntityDataValue::Vector3(Vector3f(1.0, 1.5, 1.0)),
            EntityDataValue::Quaternion(Quaternionf::default()),
        ];

        for value in &values {
            assert!(EntityDataSerializers::is_registered(value.serializer_id()));
            round_trip(value);
        }
    }

    #[test]
    fn optional_int_is_offset_by_one() {
        assert_eq!(round_trip(&EntityDataValue::OptionalInt(Some(0))), [1]);
        assert_eq!(round_trip(&EntityDataValue::OptionalInt(None)), [0]);
    }

    #[test]
    fn write_prefixes_the_serializer_id() {
        let mut buf = Vec::new();
        EntityDataValue::Boolean(true).write(&mut buf).unwrap();
        assert_eq!(buf, [8, 1]);
    }

    #[test]
    fn unregistered_ids_are_rejected() {
        for id in [16, 17, 28, -1, 300] {
            assert!(!EntityDataSerializers::is_registered(id));
            let err =
                EntityDataValue::read(id, &mut [0u8; 8].as_slice(), &ProtocolConfig::DEFAULT)
                    .unwrap_err();
            assert!(matches!(err, PacketReadError::UnknownEntryType(got) if got == id));
        }
    }

    #[test]
    fn out_of_range_ordinals_are_malformed() {
        let err = EntityDataValue::read(
            EntityDataSerializers::DIRECTION,
            &mut [6u8].as_slice(),
            &ProtocolConfig::DEFAULT,
        )
        .unwrap_err();
        assert!(matches!(err, PacketReadError::MalformedValue(_)));

        let err = EntityDataValue::read(
            EntityDataSerializers::POSE,
            &mut [18u8].as_slice(),
            &ProtocolConfig::DEFAULT,
        )
        .unwrap_err();
        assert!(matches!(err, PacketReadError::MalformedValue(_)));
    }

    #[test]
    fn truncated_payload_is_end_of_stream() {
        let err = EntityDataValue::read(
            EntityDataSerializers::QUATERNION,
            &mut [0u8; 9].as_slice(),
            &ProtocolConfig::DEFAULT,
        )
        .unwrap_err();
        assert!(matches!(err, PacketReadError::UnexpectedEndOfStream));
    }
}
