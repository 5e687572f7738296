//! Typed entity data values
//!
//! Every entry of a `set_entity_data` packet carries one [`EntityDataValue`].
//! The variant decides the serializer id written before the payload, see
//! [`EntityDataSerializers`] for the registry.

mod builder;
mod serializers;
mod types;

use ember_utils::{BlockPos, text::TextComponent};
use uuid::Uuid;

pub use builder::EntityDataBuilder;
pub use serializers::EntityDataSerializers;
pub use types::{Direction, GlobalPos, Pose, Quaternionf, Vector3f, VillagerData};

use crate::item::ItemStack;

/// Entity data value - a strongly typed enum for all possible entity metadata values
#[derive(Debug, Clone)]
pub enum EntityDataValue {
    /// Byte value (u8), mostly used for bit flags
    Byte(u8),
    /// Integer value (i32, sent as `VarInt`)
    Int(i32),
    /// Long value (i64, sent as `VarLong`)
    Long(i64),
    /// Float value (f32)
    Float(f32),
    /// String value
    String(String),
    /// Rich text, e.g. a custom name
    TextComponent(TextComponent),
    /// Optional rich text, e.g. an unset custom name
    OptionalTextComponent(Option<TextComponent>),
    /// Item stack, e.g. the item shown by an item frame
    ItemStack(ItemStack),
    /// Boolean value
    Boolean(bool),
    /// Armor stand limb rotations in degrees
    Rotations(Vector3f),
    /// Block position
    BlockPos(BlockPos),
    /// Optional block position
    OptionalBlockPos(Option<BlockPos>),
    /// Block face
    Direction(Direction),
    /// Optional entity uuid, e.g. a tamed animal's owner
    OptionalUuid(Option<Uuid>),
    /// Block state id
    BlockState(i32),
    /// Optional block state id, absent is sent as air
    OptionalBlockState(Option<i32>),
    /// Villager type, profession and level
    VillagerData(VillagerData),
    /// Optional integer
    OptionalInt(Option<i32>),
    /// Entity pose
    Pose(Pose),
    /// Cat variant registry id
    CatVariant(i32),
    /// Frog variant registry id
    FrogVariant(i32),
    /// Optional position in a dimension
    OptionalGlobalPos(Option<GlobalPos>),
    /// Painting variant registry id
    PaintingVariant(i32),
    /// Sniffer state ordinal
    SnifferState(i32),
    /// Display entity translation or scale
    Vector3(Vector3f),
    /// Display entity rotation
    Quaternion(Quaternionf),
}

// Floats compare by bits so a decoded NaN still equals itself.
impl PartialEq for EntityDataValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Byte(a), Self::Byte(b)) => a == b,
            (Self::Int(a), Self::Int(b))
            | (Self::BlockState(a), Self::BlockState(b))
            | (Self::CatVariant(a), Self::CatVariant(b))
            | (Self::FrogVariant(a), Self::FrogVariant(b))
            | (Self::PaintingVariant(a), Self::PaintingVariant(b))
            | (Self::SnifferState(a), Self::SnifferState(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::TextComponent(a), Self::TextComponent(b)) => a == b,
            (Self::OptionalTextComponent(a), Self::OptionalTextComponent(b)) => a == b,
            (Self::ItemStack(a), Self::ItemStack(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Rotations(a), Self::Rotations(b)) | (Self::Vector3(a), Self::Vector3(b)) => {
                a == b
            }
            (Self::BlockPos(a), Self::BlockPos(b)) => a == b,
            (Self::OptionalBlockPos(a), Self::OptionalBlockPos(b)) => a == b,
            (Self::Direction(a), Self::Direction(b)) => a == b,
            (Self::OptionalUuid(a), Self::OptionalUuid(b)) => a == b,
            (Self::OptionalBlockState(a), Self::OptionalBlockState(b))
            | (Self::OptionalInt(a), Self::OptionalInt(b)) => a == b,
            (Self::VillagerData(a), Self::VillagerData(b)) => a == b,
            (Self::Pose(a), Self::Pose(b)) => a == b,
            (Self::OptionalGlobalPos(a), Self::OptionalGlobalPos(b)) => a == b,
            (Self::Quaternion(a), Self::Quaternion(b)) => a == b,
            _ => false,
        }
    }
}

impl EntityDataValue {
    /// Gets the serializer ID for this value type
    #[must_use]
    pub fn serializer_id(&self) -> i32 {
        match self {
            Self::Byte(_) => EntityDataSerializers::BYTE,
            Self::Int(_) => EntityDataSerializers::INT,
            Self::Long(_) => EntityDataSerializers::LONG,
            Self::Float(_) => EntityDataSerializers::FLOAT,
            Self::String(_) => EntityDataSerializers::STRING,
            Self::TextComponent(_) => EntityDataSerializers::TEXT_COMPONENT,
            Self::OptionalTextComponent(_) => EntityDataSerializers::OPTIONAL_TEXT_COMPONENT,
            Self::ItemStack(_) => EntityDataSerializers::ITEM_STACK,
            Self::Boolean(_) => EntityDataSerializers::BOOLEAN,
            Self::Rotations(_) => EntityDataSerializers::ROTATIONS,
            Self::BlockPos(_) => EntityDataSerializers::BLOCK_POS,
            Self::OptionalBlockPos(_) => EntityDataSerializers::OPTIONAL_BLOCK_POS,
            Self::Direction(_) => EntityDataSerializers::DIRECTION,
            Self::OptionalUuid(_) => EntityDataSerializers::OPTIONAL_UUID,
            Self::BlockState(_) => EntityDataSerializers::BLOCK_STATE,
            Self::OptionalBlockState(_) => EntityDataSerializers::OPTIONAL_BLOCK_STATE,
            Self::VillagerData(_) => EntityDataSerializers::VILLAGER_DATA,
            Self::OptionalInt(_) => EntityDataSerializers::OPTIONAL_INT,
            Self::Pose(_) => EntityDataSerializers::POSE,
            Self::CatVariant(_) => EntityDataSerializers::CAT_VARIANT,
            Self::FrogVariant(_) => EntityDataSerializers::FROG_VARIANT,
            Self::OptionalGlobalPos(_) => EntityDataSerializers::OPTIONAL_GLOBAL_POS,
            Self::PaintingVariant(_) => EntityDataSerializers::PAINTING_VARIANT,
            Self::SnifferState(_) => EntityDataSerializers::SNIFFER_STATE,
            Self::Vector3(_) => EntityDataSerializers::VECTOR3,
            Self::Quaternion(_) => EntityDataSerializers::QUATERNION,
        }
    }

    /// Gets a typed copy of the value, if it has the matching kind
    #[must_use]
    pub fn get<T: IntoEntityData>(&self) -> Option<T> {
        T::from_entity_data(self)
    }

    /// Returns whether this value carries rich text, directly or inside an
    /// item stack.
    #[must_use]
    pub fn holds_text(&self) -> bool {
        matches!(
            self,
            Self::TextComponent(_) | Self::OptionalTextComponent(_) | Self::ItemStack(_)
        )
    }

    /// Pushes every text component of this value onto `out`.
    ///
    /// Plain and present optional text push themselves; item stacks push
    /// their display name followed by each lore line.
    pub fn collect_text<'a>(&'a self, out: &mut Vec<&'a TextComponent>) {
        match self {
            Self::TextComponent(text) | Self::OptionalTextComponent(Some(text)) => out.push(text),
            Self::ItemStack(stack) => stack.collect_text(out),
            _ => {}
        }
    }

    /// Returns a copy of this value with every text component passed
    /// through `f`.
    ///
    /// The variant never changes: plain text stays plain, optional text stays
    /// optional (and absent stays absent). Values without text are cloned.
    pub fn try_map_text<E>(
        &self,
        f: &mut impl FnMut(&TextComponent) -> Result<TextComponent, E>,
    ) -> Result<Self, E> {
        Ok(match self {
            Self::TextComponent(text) => Self::TextComponent(f(text)?),
            Self::OptionalTextComponent(text) => {
                Self::OptionalTextComponent(text.as_ref().map(&mut *f).transpose()?)
            }
            Self::ItemStack(stack) => Self::ItemStack(stack.try_map_text(f)?),
            other => other.clone(),
        })
    }
}

/// Trait for types that can be stored in entity data
pub trait IntoEntityData: Clone {
    /// Converts this value into an `EntityDataValue`
    fn into_entity_data(self) -> EntityDataValue;
    /// Extracts this value from an `EntityDataValue`
    fn from_entity_data(value: &EntityDataValue) -> Option<Self>;
}

impl IntoEntityData for EntityDataValue {
    fn into_entity_data(self) -> EntityDataValue {
        self
    }
    fn from_entity_data(value: &EntityDataValue) -> Option<Self> {
        Some(value.clone())
    }
}

macro_rules! impl_into_entity_data {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl IntoEntityData for $ty {
                fn into_entity_data(self) -> EntityDataValue {
                    EntityDataValue::$variant(self)
                }
                fn from_entity_data(value: &EntityDataValue) -> Option<Self> {
                    match value {
                        EntityDataValue::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_into_entity_data! {
    u8 => Byte,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    String => String,
    TextComponent => TextComponent,
    Option<TextComponent> => OptionalTextComponent,
    ItemStack => ItemStack,
    bool => Boolean,
    BlockPos => BlockPos,
    Option<BlockPos> => OptionalBlockPos,
    Direction => Direction,
    Option<Uuid> => OptionalUuid,
    VillagerData => VillagerData,
    Pose => Pose,
    Option<GlobalPos> => OptionalGlobalPos,
    Vector3f => Vector3,
    Quaternionf => Quaternion,
}
