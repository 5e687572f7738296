use std::io;

use ember_utils::serial::PrefixLengthError;
use thiserror::Error;

/// Errors raised while decoding a packet.
///
/// Every variant is fatal to the packet being decoded; nothing decoded so far
/// is returned.
#[derive(Debug, Error)]
pub enum PacketReadError {
    /// A serializer id with no registered payload shape. The stream cannot be
    /// resynchronized past it.
    #[error("unknown entity data serializer {0}")]
    UnknownEntryType(i32),
    /// An item component id with no registered payload shape.
    #[error("unknown item component {0}")]
    UnknownItemComponent(i32),
    /// The stream ended in the middle of a value or before the terminator.
    #[error("unexpected end of stream")]
    UnexpectedEndOfStream,
    /// A length or count above the configured limit.
    #[error("length {len} exceeds the limit of {max}")]
    TooLong {
        /// The announced length.
        len: usize,
        /// The configured limit.
        max: usize,
    },
    /// A value outside its valid range.
    #[error("malformed value: {0}")]
    MalformedValue(String),
    /// Text that is not valid chat JSON.
    #[error("malformed text component: {0}")]
    Json(#[from] serde_json::Error),
    /// An index of `0xFF` reached the entry map.
    #[error(transparent)]
    ReservedIndex(#[from] ReservedIndex),
    /// Any other failure of the underlying reader.
    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for PacketReadError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            return Self::UnexpectedEndOfStream;
        }
        if let Some(prefix) = err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<PrefixLengthError>())
        {
            return Self::TooLong {
                len: prefix.len,
                max: prefix.bound,
            };
        }
        if err.kind() == io::ErrorKind::InvalidData {
            return Self::MalformedValue(err.to_string());
        }
        Self::Io(err)
    }
}

/// Errors raised while encoding a packet.
#[derive(Debug, Error)]
pub enum PacketWriteError {
    /// A string, text or list longer than the protocol allows.
    #[error("length {len} exceeds the limit of {max}")]
    TooLong {
        /// The length of the value.
        len: usize,
        /// The protocol limit.
        max: usize,
    },
    /// A text component could not be serialized.
    #[error("failed to serialize text component: {0}")]
    Json(#[from] serde_json::Error),
    /// The underlying writer failed.
    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for PacketWriteError {
    fn from(err: io::Error) -> Self {
        if let Some(prefix) = err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<PrefixLengthError>())
        {
            return Self::TooLong {
                len: prefix.len,
                max: prefix.bound,
            };
        }
        Self::Io(err)
    }
}

/// Index `0xFF` terminates the entry list and can't address an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("entity data index 0xFF is reserved for the terminator")]
pub struct ReservedIndex;
