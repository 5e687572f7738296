//! Traits for reading and writing protocol values over `std::io` streams.
//!
//! Every primitive is big endian. Strings are prefixed with their byte length,
//! usually as a [`VarInt`](crate::codec::VarInt).

use std::io::{self, Read, Write};

mod prefixed;
mod primitives;

pub use prefixed::PrefixLengthError;

/// A value that can be decoded from a byte stream.
pub trait ReadFrom: Sized {
    /// Reads exactly the bytes of one value.
    fn read(data: &mut impl Read) -> io::Result<Self>;
}

/// A value that can be encoded into a byte stream.
pub trait WriteTo {
    /// Writes this value in the same shape [`ReadFrom::read`] consumes.
    fn write(&self, writer: &mut impl Write) -> io::Result<()>;
}

/// A value read behind a length prefix of type `P`.
pub trait PrefixedRead: Sized {
    /// Reads a length prefix, rejects it if it exceeds `bound`, then reads
    /// exactly that many bytes.
    fn read_prefixed_bound<P: ReadFrom + TryInto<usize>>(
        data: &mut impl Read,
        bound: usize,
    ) -> io::Result<Self>;
}

/// A value written behind a length prefix of type `P`.
pub trait PrefixedWrite {
    /// Writes the byte length as `P` followed by the content. Fails if the
    /// content is longer than `bound`.
    fn write_prefixed_bound<P: WriteTo + TryFrom<usize>>(
        &self,
        writer: &mut impl Write,
        bound: usize,
    ) -> io::Result<()>;
}
