use std::io::{Read, Write};

use ember_utils::{
    codec::VarInt,
    serial::{PrefixedRead, PrefixedWrite},
    text::TextComponent,
};

use crate::{
    config::{MAX_STRING_LENGTH, MAX_TEXT_LENGTH, ProtocolConfig},
    utils::{PacketReadError, PacketWriteError},
};

/// Reads a `VarInt` prefixed UTF-8 string of at most `max_string_length` bytes.
pub fn read_string(
    data: &mut impl Read,
    config: &ProtocolConfig,
) -> Result<String, PacketReadError> {
    Ok(String::read_prefixed_bound::<VarInt>(
        data,
        config.max_string_length,
    )?)
}

/// Writes a `VarInt` prefixed UTF-8 string.
pub fn write_string(value: &str, writer: &mut impl Write) -> Result<(), PacketWriteError> {
    Ok(value.write_prefixed_bound::<VarInt>(writer, MAX_STRING_LENGTH)?)
}

/// Reads a text component sent as a `VarInt` prefixed JSON string.
pub fn read_text(
    data: &mut impl Read,
    config: &ProtocolConfig,
) -> Result<TextComponent, PacketReadError> {
    let json = String::read_prefixed_bound::<VarInt>(data, config.max_text_length)?;
    Ok(TextComponent::from_json(&json)?)
}

/// Writes a text component as JSON, reusing the JSON it was read from when
/// it is unchanged.
pub fn write_text(
    value: &TextComponent,
    writer: &mut impl Write,
) -> Result<(), PacketWriteError> {
    let json = value.to_json()?;
    Ok(json.write_prefixed_bound::<VarInt>(writer, MAX_TEXT_LENGTH)?)
}
