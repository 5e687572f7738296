// Wrapper types making it harder to accidentally use the wrong underlying type.

use std::{
    fmt::{self, Display},
    io::{self, Read, Write},
};

use crate::serial::{ReadFrom, WriteTo};

/// A block position, packed into a single `i64` on the wire.
///
/// Layout from the most significant bit: 26 bits of x, 26 bits of z and
/// 12 bits of y, each two's complement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BlockPos {
    /// The x coordinate, in `-2^25..2^25`.
    pub x: i32,
    /// The y coordinate, in `-2^11..2^11`.
    pub y: i32,
    /// The z coordinate, in `-2^25..2^25`.
    pub z: i32,
}

impl BlockPos {
    /// Creates a new block position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Packs the position into its wire representation. Coordinates outside
    /// the representable range wrap.
    #[must_use]
    pub const fn packed(self) -> i64 {
        ((self.x as i64 & 0x3FF_FFFF) << 38)
            | ((self.z as i64 & 0x3FF_FFFF) << 12)
            | (self.y as i64 & 0xFFF)
    }

    /// Unpacks a position from its wire representation.
    #[must_use]
    pub const fn from_packed(packed: i64) -> Self {
        Self {
            x: (packed >> 38) as i32,
            y: (packed << 52 >> 52) as i32,
            z: (packed << 26 >> 38) as i32,
        }
    }
}

impl Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

impl ReadFrom for BlockPos {
    fn read(data: &mut impl Read) -> io::Result<Self> {
        Ok(Self::from_packed(i64::read(data)?))
    }
}

impl WriteTo for BlockPos {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        self.packed().write(writer)
    }
}
