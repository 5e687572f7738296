use std::{
    convert::Infallible,
    io::{Read, Write},
};

use ember_utils::{codec::VarInt, serial::WriteTo, text::TextComponent};

use crate::utils::{PacketReadError, PacketWriteError};

/// A packet body that can be decoded from a byte stream.
pub trait PacketRead: Sized {
    /// Reads the body up to and including its last byte.
    fn read_packet(data: &mut impl Read) -> Result<Self, PacketReadError>;
}

/// A packet body that can be encoded into a byte stream.
pub trait PacketWrite {
    /// Writes the body without the packet id.
    fn write_packet(&self, writer: &mut impl Write) -> Result<(), PacketWriteError>;
}

/// A packet sent from the server to the client.
pub trait ClientPacket: PacketWrite {
    /// The packet id in the play state.
    const PACKET_ID: i32;

    /// Same as [`ClientPacket::PACKET_ID`].
    fn packet_id(&self) -> i32 {
        Self::PACKET_ID
    }

    /// Writes the packet id followed by the body, as it appears inside an
    /// uncompressed frame.
    fn write_with_id(&self, writer: &mut impl Write) -> Result<(), PacketWriteError> {
        VarInt(Self::PACKET_ID).write(writer)?;
        self.write_packet(writer)
    }
}

/// A packet carrying rich text that a text stage (translation, filtering)
/// may inspect and rewrite.
pub trait TextHoldingPacket: Sized {
    /// Every text component in the packet. Duplicates are kept.
    fn text_components(&self) -> Vec<&TextComponent>;

    /// Returns a new packet with every text component passed through `f`.
    /// The first error returned by `f` is returned unchanged.
    fn try_map_text<E>(
        &self,
        f: impl FnMut(&TextComponent) -> Result<TextComponent, E>,
    ) -> Result<Self, E>;

    /// Infallible form of [`TextHoldingPacket::try_map_text`].
    fn map_text(&self, mut f: impl FnMut(&TextComponent) -> TextComponent) -> Self {
        match self.try_map_text(|text| Ok::<_, Infallible>(f(text))) {
            Ok(packet) => packet,
            Err(never) => match never {},
        }
    }
}
