use std::io::{self, Read, Write};

use crate::serial::{ReadFrom, WriteTo};

/// An `i64` encoded with variable length, seven bits per byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct VarLong(pub i64);

impl VarLong {
    /// The maximum number of bytes a `VarLong` can occupy on the wire.
    pub const MAX_SIZE: usize = 10;

    /// Returns the exact number of bytes this `VarLong` will write.
    #[must_use]
    pub fn written_size(self) -> usize {
        match self.0 {
            0 => 1,
            n => (63 - n.leading_zeros() as usize) / 7 + 1,
        }
    }
}

impl ReadFrom for VarLong {
    fn read(data: &mut impl Read) -> io::Result<Self> {
        let mut val = 0;
        for i in 0..Self::MAX_SIZE {
            let byte = u8::read(data)?;
            val |= (i64::from(byte) & 0x7F) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(Self(val));
            }
        }
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "VarLong is too large",
        ))
    }
}

impl WriteTo for VarLong {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        let mut val = self.0 as u64;
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

impl From<i64> for VarLong {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<VarLong> for i64 {
    fn from(value: VarLong) -> Self {
        value.0
    }
}
