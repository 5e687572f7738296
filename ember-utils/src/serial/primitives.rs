use std::io::{self, Read, Write};

use uuid::Uuid;

use super::{ReadFrom, WriteTo};

macro_rules! impl_be_number {
    ($($ty:ty),*) => {$(
        impl ReadFrom for $ty {
            fn read(data: &mut impl Read) -> io::Result<Self> {
                let mut buf = [0; size_of::<Self>()];
                data.read_exact(&mut buf)?;
                Ok(Self::from_be_bytes(buf))
            }
        }

        impl WriteTo for $ty {
            fn write(&self, writer: &mut impl Write) -> io::Result<()> {
                writer.write_all(&self.to_be_bytes())
            }
        }
    )*};
}

impl_be_number!(u8, i8, u16, i16, i32, i64, f32, f64);

impl ReadFrom for bool {
    fn read(data: &mut impl Read) -> io::Result<Self> {
        match u8::read(data)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid boolean byte {other:#04x}"),
            )),
        }
    }
}

impl WriteTo for bool {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        u8::from(*self).write(writer)
    }
}

impl ReadFrom for Uuid {
    fn read(data: &mut impl Read) -> io::Result<Self> {
        let mut buf = [0; 16];
        data.read_exact(&mut buf)?;
        Ok(Self::from_bytes(buf))
    }
}

impl WriteTo for Uuid {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_all(self.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_big_endian() {
        let mut buf = Vec::new();
        0x0102_0304i32.write(&mut buf).unwrap();
        1.0f32.write(&mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3, 4, 0x3F, 0x80, 0, 0]);

        let mut slice = buf.as_slice();
        assert_eq!(i32::read(&mut slice).unwrap(), 0x0102_0304);
        assert!((f32::read(&mut slice).unwrap() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn bool_rejects_other_bytes() {
        assert!(bool::read(&mut [1u8].as_slice()).unwrap());
        assert!(!bool::read(&mut [0u8].as_slice()).unwrap());
        let err = bool::read(&mut [2u8].as_slice()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn uuid_round_trip() {
        let uuid = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
        let mut buf = Vec::new();
        uuid.write(&mut buf).unwrap();
        assert_eq!(buf.len(), 16);
        assert_eq!(Uuid::read(&mut buf.as_slice()).unwrap(), uuid);
    }
}
