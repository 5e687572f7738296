use std::io::{self, Read, Write};

use crate::serial::{ReadFrom, WriteTo};

/// An `i32` encoded with variable length, seven bits per byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct VarInt(pub i32);

impl VarInt {
    /// The maximum number of bytes a `VarInt` can occupy on the wire.
    pub const MAX_SIZE: usize = 5;

    /// Returns the exact number of bytes this `VarInt` will write.
    #[must_use]
    pub fn written_size(self) -> usize {
        match self.0 {
            0 => 1,
            n => (31 - n.leading_zeros() as usize) / 7 + 1,
        }
    }
}

impl ReadFrom for VarInt {
    fn read(data: &mut impl Read) -> io::Result<Self> {
        let mut val = 0;
        for i in 0..Self::MAX_SIZE {
            let byte = u8::read(data)?;
            val |= (i32::from(byte) & 0x7F) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(Self(val));
            }
        }
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "VarInt is too large",
        ))
    }
}

impl WriteTo for VarInt {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        let mut val = self.0 as u32;
        loop {
            let b = (val & 0x7F) as u8;
            val >>= 7;
            if val == 0 {
                return b.write(writer);
            }
            (b | 0x80).write(writer)?;
        }
    }
}

impl From<i32> for VarInt {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<VarInt> for i32 {
    fn from(value: VarInt) -> Self {
        value.0
    }
}

impl From<usize> for VarInt {
    fn from(value: usize) -> Self {
        Self(value as _)
    }
}
