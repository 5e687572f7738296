use std::io::{self, Read, Write};

use ember_utils::{
    BlockPos,
    codec::VarInt,
    serial::{ReadFrom, WriteTo},
};

/// Represents an entity's pose (standing, crouching, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Pose {
    /// Standing normally
    #[default]
    Standing = 0,
    /// Flying with elytra
    FallFlying = 1,
    /// Sleeping in a bed
    Sleeping = 2,
    /// Swimming in water
    Swimming = 3,
    /// Performing spin attack
    SpinAttack = 4,
    /// Crouching/sneaking
    Crouching = 5,
    /// Long jumping (goat)
    LongJumping = 6,
    /// Dying animation
    Dying = 7,
    /// Croaking (frog)
    Croaking = 8,
    /// Using tongue (frog)
    UsingTongue = 9,
    /// Sitting (cat/wolf)
    Sitting = 10,
    /// Roaring (warden)
    Roaring = 11,
    /// Sniffing (sniffer)
    Sniffing = 12,
    /// Emerging (warden)
    Emerging = 13,
    /// Digging (sniffer/warden)
    Digging = 14,
    /// Sliding (powder snow)
    Sliding = 15,
    /// Shooting (crossbow)
    Shooting = 16,
    /// Inhaling (breath attack)
    Inhaling = 17,
}

impl Pose {
    const ALL: [Self; 18] = [
        Self::Standing,
        Self::FallFlying,
        Self::Sleeping,
        Self::Swimming,
        Self::SpinAttack,
        Self::Crouching,
        Self::LongJumping,
        Self::Dying,
        Self::Croaking,
        Self::UsingTongue,
        Self::Sitting,
        Self::Roaring,
        Self::Sniffing,
        Self::Emerging,
        Self::Digging,
        Self::Sliding,
        Self::Shooting,
        Self::Inhaling,
    ];

    /// Looks up a pose by its network id.
    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }
}

/// One of the six block faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// -Y
    Down = 0,
    /// +Y
    Up = 1,
    /// -Z
    North = 2,
    /// +Z
    South = 3,
    /// -X
    West = 4,
    /// +X
    East = 5,
}

impl Direction {
    /// Looks up a direction by its network id.
    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Self::Down),
            1 => Some(Self::Up),
            2 => Some(Self::North),
            3 => Some(Self::South),
            4 => Some(Self::West),
            5 => Some(Self::East),
            _ => None,
        }
    }
}

/// Three floats, used for rotations and display translations and scales.
///
/// Equality compares bit patterns, so a value read from the wire always
/// equals itself, NaN included.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector3f(pub f32, pub f32, pub f32);

impl PartialEq for Vector3f {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
            && self.1.to_bits() == other.1.to_bits()
            && self.2.to_bits() == other.2.to_bits()
    }
}

impl ReadFrom for Vector3f {
    fn read(data: &mut impl Read) -> io::Result<Self> {
        Ok(Self(f32::read(data)?, f32::read(data)?, f32::read(data)?))
    }
}

impl WriteTo for Vector3f {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        self.0.write(writer)?;
        self.1.write(writer)?;
        self.2.write(writer)
    }
}

/// A rotation quaternion (x, y, z, w). Compared bitwise like [`Vector3f`].
#[derive(Debug, Clone, Copy)]
pub struct Quaternionf(pub f32, pub f32, pub f32, pub f32);

impl PartialEq for Quaternionf {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
            && self.1.to_bits() == other.1.to_bits()
            && self.2.to_bits() == other.2.to_bits()
            && self.3.to_bits() == other.3.to_bits()
    }
}

impl Default for Quaternionf {
    fn default() -> Self {
        Self(0.0, 0.0, 0.0, 1.0)
    }
}

impl ReadFrom for Quaternionf {
    fn read(data: &mut impl Read) -> io::Result<Self> {
        Ok(Self(
            f32::read(data)?,
            f32::read(data)?,
            f32::read(data)?,
            f32::read(data)?,
        ))
    }
}

impl WriteTo for Quaternionf {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        self.0.write(writer)?;
        self.1.write(writer)?;
        self.2.write(writer)?;
        self.3.write(writer)
    }
}

/// A villager's biome type, profession and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VillagerData {
    /// Biome type registry id.
    pub villager_type: i32,
    /// Profession registry id.
    pub profession: i32,
    /// Trading level, 1 to 5.
    pub level: i32,
}

impl ReadFrom for VillagerData {
    fn read(data: &mut impl Read) -> io::Result<Self> {
        Ok(Self {
            villager_type: VarInt::read(data)?.0,
            profession: VarInt::read(data)?.0,
            level: VarInt::read(data)?.0,
        })
    }
}

impl WriteTo for VillagerData {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        VarInt(self.villager_type).write(writer)?;
        VarInt(self.profession).write(writer)?;
        VarInt(self.level).write(writer)
    }
}

/// A block position in a specific dimension, e.g. a lodestone target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalPos {
    /// The dimension identifier, e.g. `minecraft:overworld`.
    pub dimension: String,
    /// The position within that dimension.
    pub pos: BlockPos,
}
