use std::{
    io::{self, Read, Write},
    num::TryFromIntError,
};

use thiserror::Error;

use super::{PrefixedRead, PrefixedWrite, ReadFrom, WriteTo};
use crate::codec::VarInt;

/// The length prefix of a value was larger than the permitted bound.
///
/// Carried inside an [`io::Error`] of kind [`io::ErrorKind::InvalidData`] so
/// callers can recover the lengths with [`io::Error::get_ref`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("length {len} exceeds bound {bound}")]
pub struct PrefixLengthError {
    /// The length announced by the prefix.
    pub len: usize,
    /// The largest length that was accepted.
    pub bound: usize,
}

impl From<PrefixLengthError> for io::Error {
    fn from(err: PrefixLengthError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

impl TryFrom<VarInt> for usize {
    type Error = TryFromIntError;

    fn try_from(value: VarInt) -> Result<Self, Self::Error> {
        usize::try_from(value.0)
    }
}

impl PrefixedRead for String {
    fn read_prefixed_bound<P: ReadFrom + TryInto<usize>>(
        data: &mut impl Read,
        bound: usize,
    ) -> io::Result<Self> {
        let len: usize = P::read(data)?
            .try_into()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "negative string length"))?;
        if len > bound {
            return Err(PrefixLengthError { len, bound }.into());
        }

        let mut buf = vec![0; len];
        data.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl PrefixedWrite for str {
    fn write_prefixed_bound<P: WriteTo + TryFrom<usize>>(
        &self,
        writer: &mut impl Write,
        bound: usize,
    ) -> io::Result<()> {
        if self.len() > bound {
            return Err(PrefixLengthError {
                len: self.len(),
                bound,
            }
            .into());
        }

        let len = P::try_from(self.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "string length overflow"))?;
        len.write(writer)?;
        writer.write_all(self.as_bytes())
    }
}

impl PrefixedWrite for String {
    fn write_prefixed_bound<P: WriteTo + TryFrom<usize>>(
        &self,
        writer: &mut impl Write,
        bound: usize,
    ) -> io::Result<()> {
        self.as_str().write_prefixed_bound::<P>(writer, bound)
    }
}
