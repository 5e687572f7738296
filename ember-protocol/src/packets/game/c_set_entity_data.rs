use std::io::{self, Read, Write};

use ember_utils::{
    codec::VarInt,
    serial::{ReadFrom, WriteTo},
    text::TextComponent,
};
use rustc_hash::FxHashMap;

use crate::{
    config::ProtocolConfig,
    entity_data::{EntityDataBuilder, EntityDataValue},
    packet_ids::play::C_SET_ENTITY_DATA,
    packet_traits::{ClientPacket, PacketRead, PacketWrite, TextHoldingPacket},
    utils::{PacketReadError, PacketWriteError, ReservedIndex},
};

/// The byte in front of each entry, or the terminator after the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMarker {
    /// An entry at this index follows.
    Entry(u8),
    /// No more entries.
    End,
}

impl ReadFrom for EntryMarker {
    fn read(data: &mut impl Read) -> io::Result<Self> {
        Ok(match u8::read(data)? {
            CSetEntityData::TERMINATOR => Self::End,
            index => Self::Entry(index),
        })
    }
}

impl WriteTo for EntryMarker {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Entry(index) => {
                debug_assert_ne!(*index, CSetEntityData::TERMINATOR);
                index.write(writer)
            }
            Self::End => CSetEntityData::TERMINATOR.write(writer),
        }
    }
}

/// Synchronizes part of an entity's state with the client.
///
/// Wire format: the entity id as a `VarInt`, then any number of
/// `index: u8, serializer: VarInt, payload` entries, then `0xFF`.
///
/// The packet is immutable once built. Entries are keyed by index, so their
/// order carries no meaning; they are written in ascending index order.
#[derive(Debug, Clone, PartialEq)]
pub struct CSetEntityData {
    entity_id: i32,
    entries: FxHashMap<u8, EntityDataValue>,
}

impl CSetEntityData {
    /// The index byte ending the entry list.
    pub const TERMINATOR: u8 = 0xFF;

    /// Creates a packet from `entries`. Later entries replace earlier ones at
    /// the same index.
    pub fn new(
        entity_id: i32,
        entries: impl IntoIterator<Item = (u8, EntityDataValue)>,
    ) -> Result<Self, ReservedIndex> {
        let mut builder = EntityDataBuilder::new();
        for (index, value) in entries {
            builder.insert(index, value)?;
        }
        Ok(builder.build(entity_id))
    }

    pub(crate) fn from_entries(entity_id: i32, entries: FxHashMap<u8, EntityDataValue>) -> Self {
        debug_assert!(!entries.contains_key(&Self::TERMINATOR));
        Self { entity_id, entries }
    }

    /// The network id of the entity this packet updates.
    #[must_use]
    pub fn entity_id(&self) -> i32 {
        self.entity_id
    }

    /// The value at `index`, if the packet sets it.
    #[must_use]
    pub fn get(&self, index: u8) -> Option<&EntityDataValue> {
        self.entries.get(&index)
    }

    /// All entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, &EntityDataValue)> {
        self.entries.iter().map(|(index, value)| (*index, value))
    }

    /// All entries in ascending index order.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(u8, &EntityDataValue)> {
        let mut entries: Vec<_> = self.entries().collect();
        entries.sort_unstable_by_key(|(index, _)| *index);
        entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the packet carries no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads the packet body, enforcing the limits of `config`.
    ///
    /// Nothing is returned unless the terminator was reached; a duplicate
    /// index replaces the earlier value.
    pub fn read_with_config(
        data: &mut impl Read,
        config: &ProtocolConfig,
    ) -> Result<Self, PacketReadError> {
        let entity_id = VarInt::read(data)?.0;
        let mut builder = EntityDataBuilder::new();

        loop {
            match EntryMarker::read(data)? {
                EntryMarker::End => break,
                EntryMarker::Entry(index) => {
                    let serializer = VarInt::read(data)?.0;
                    let value = EntityDataValue::read(serializer, data, config)?;
                    log::trace!("entity {entity_id} data [{index}] = {value:?}");

                    if let Some(previous) = builder.insert(index, value)? {
                        log::debug!(
                            "entity {entity_id} data index {index} sent twice, dropping {previous:?}"
                        );
                    }
                }
            }
        }

        Ok(builder.build(entity_id))
    }
}

impl PacketRead for CSetEntityData {
    fn read_packet(data: &mut impl Read) -> Result<Self, PacketReadError> {
        Self::read_with_config(data, &ProtocolConfig::DEFAULT)
    }
}

impl PacketWrite for CSetEntityData {
    fn write_packet(&self, writer: &mut impl Write) -> Result<(), PacketWriteError> {
        VarInt(self.entity_id).write(writer)?;

        for (index, value) in self.sorted_entries() {
            EntryMarker::Entry(index).write(writer)?;
            value.write(writer)?;
        }

        EntryMarker::End.write(writer)?;
        Ok(())
    }
}

impl ClientPacket for CSetEntityData {
    const PACKET_ID: i32 = C_SET_ENTITY_DATA;
}

impl TextHoldingPacket for CSetEntityData {
    fn text_components(&self) -> Vec<&TextComponent> {
        let mut text = Vec::new();
        for (_, value) in self.sorted_entries() {
            value.collect_text(&mut text);
        }
        text
    }

    fn try_map_text<E>(
        &self,
        mut f: impl FnMut(&TextComponent) -> Result<TextComponent, E>,
    ) -> Result<Self, E> {
        let entries = self
            .sorted_entries()
            .into_iter()
            .map(|(index, value)| -> Result<(u8, EntityDataValue), E> {
                Ok((index, value.try_map_text(&mut f)?))
            })
            .collect::<Result<_, E>>()?;

        Ok(Self::from_entries(self.entity_id, entries))
    }
}

#[cfg(test)]
mod tests {
    use ember_utils::BlockPos;
    use uuid::Uuid;

    use super::*;
    use crate::{
        entity_data::{Direction, EntityDataSerializers, Pose, Vector3f},
        item::{ItemComponent, ItemStack},
    };

    /// Text at 2 and 3, an item at 8, and plenty of entries without text.
    fn fixture() -> CSetEntityData {
        EntityDataBuilder::new()
            .with(0, 0x02u8)
            .and_then(|b| b.with(1, 300i32))
            .and_then(|b| b.with(2, TextComponent::text("C1").color("yellow")))
            .and_then(|b| b.with(3, Some(TextComponent::translate("C2"))))
            .and_then(|b| b.with(4, true))
            .and_then(|b| b.with(6, Pose::Crouching))
            .and_then(|b| {
                b.with(
                    8,
                    ItemStack::new(880, 1)
                        .with_component(ItemComponent::Damage(3))
                        .with_display_name("D")
                        .with_lore(vec!["L1".into(), "L2".into()]),
                )
            })
            .and_then(|b| b.with(9, BlockPos::new(-1, 70, 5)))
            .and_then(|b| b.with(10, Some(Uuid::from_u128(7))))
            .and_then(|b| b.with(11, EntityDataValue::Rotations(Vector3f(1.0, 2.0, 3.0))))
            .and_then(|b| b.with(12, Direction::East))
            .and_then(|b| b.with(13, EntityDataValue::OptionalInt(Some(5))))
            .unwrap()
            .build(42)
    }

    fn encode(packet: &CSetEntityData) -> Vec<u8> {
        let mut buf = Vec::new();
        packet.write_packet(&mut buf).unwrap();
        buf
    }

    fn decode(bytes: &[u8]) -> Result<CSetEntityData, PacketReadError> {
        let mut slice = bytes;
        let packet = CSetEntityData::read_packet(&mut slice)?;
        assert!(slice.is_empty(), "{} trailing bytes", slice.len());
        Ok(packet)
    }

    fn plain(text: &[&TextComponent]) -> Vec<String> {
        text.iter().map(|t| t.plain_text()).collect()
    }

    /// Appends `json` as a `VarInt` prefixed string.
    fn push_json(buf: &mut Vec<u8>, json: &str) {
        VarInt::from(json.len()).write(buf).unwrap();
        buf.extend_from_slice(json.as_bytes());
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    const VANILLA_NAME: &str = r#"{"italic":false,"color":"white","text":"Boss"}"#;
    const HOVER_NAME: &str = r#"{"text":"Guide","hoverEvent":{"action":"show_text","contents":"Ask me"},"clickEvent":{"action":"run_command","value":"/help"}}"#;
    const SELECTOR: &str = r#"{"selector":"@p","separator":", "}"#;
    const SCORE: &str = r#"{"score":{"name":"@s","objective":"kills"},"color":"red"}"#;
    const NBT_LORE: &str = r#"{"nbt":"Owner","entity":"@s","interpret":true}"#;

    /// A packet as another server would write it: text in vanilla key order,
    /// with events, and with selector, score and NBT content.
    fn foreign_bytes() -> Vec<u8> {
        let mut bytes = vec![7];

        bytes.extend([2, 5]);
        push_json(&mut bytes, VANILLA_NAME);

        bytes.extend([3, 6, 1]);
        push_json(&mut bytes, HOVER_NAME);

        bytes.extend([4, 6, 1]);
        push_json(&mut bytes, SELECTOR);

        bytes.extend([5, 7]);
        for v in [1, 880, 2, 0, ItemComponent::CUSTOM_NAME] {
            VarInt(v).write(&mut bytes).unwrap();
        }
        push_json(&mut bytes, SCORE);
        bytes.extend([8, 1]);
        push_json(&mut bytes, NBT_LORE);

        bytes.push(0xFF);
        bytes
    }

    #[test]
    fn foreign_text_reencodes_byte_for_byte() {
        let bytes = foreign_bytes();
        let packet = decode(&bytes).unwrap();
        assert_eq!(encode(&packet), bytes);
        assert_eq!(
            plain(&packet.text_components()),
            ["Boss", "Guide", "@p", "@s", "Owner"]
        );

        let rewritten = packet.map_text(TextComponent::clone);
        assert_eq!(rewritten, packet);
        assert_eq!(encode(&rewritten), bytes);
    }

    #[test]
    fn rewriting_one_text_keeps_the_others_verbatim() {
        let packet = decode(&foreign_bytes()).unwrap();
        let rewritten = packet.map_text(|t| {
            if t.plain_text() == "Guide" {
                t.map_literals(&|s: &str| s.to_uppercase())
            } else {
                t.clone()
            }
        });

        let bytes = encode(&rewritten);
        for json in [VANILLA_NAME, SELECTOR, SCORE, NBT_LORE] {
            assert!(contains(&bytes, json), "{json} was re-encoded");
        }
        assert!(!contains(&bytes, HOVER_NAME));

        let reread = decode(&bytes).unwrap();
        let Some(EntityDataValue::OptionalTextComponent(Some(guide))) = reread.get(3) else {
            panic!("index 3 lost its kind");
        };
        assert_eq!(guide.plain_text(), "GUIDE");
        assert_eq!(guide.other.len(), 2);
        assert!(guide.other.contains_key("hoverEvent"));
        assert!(guide.other.contains_key("clickEvent"));
    }

    #[test]
    fn nan_float_equals_itself_after_decode() {
        // entity 1, [0] = Float NaN, end
        let bytes = [1, 0, 3, 0x7F, 0xC0, 0x00, 0x00, 0xFF];
        let packet = decode(&bytes).unwrap();
        assert_eq!(packet, decode(&bytes).unwrap());

        let rewritten = packet.map_text(TextComponent::clone);
        assert_eq!(rewritten, packet);
        assert_eq!(encode(&rewritten), bytes);
    }

    #[test]
    fn decode_encode_decode_is_stable() {
        let packet = fixture();
        let bytes = encode(&packet);

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.entity_id(), 42);
        assert_eq!(decoded, packet);
        assert_eq!(encode(&decoded), bytes);
    }

    #[test]
    fn entries_in_any_order_decode_to_the_same_map() {
        // entity 5, [3] = Int 1, [0] = Byte 9, end
        let shuffled = [5, 3, 1, 1, 0, 0, 9, 0xFF];
        let packet = decode(&shuffled).unwrap();
        assert_eq!(packet.len(), 2);

        let bytes = encode(&packet);
        assert_eq!(bytes, [5, 0, 0, 9, 3, 1, 1, 0xFF]);
        assert_eq!(decode(&bytes).unwrap(), packet);
    }

    #[test]
    fn terminator_alone_is_empty() {
        let packet = decode(&[0x80, 0x01, 0xFF]).unwrap();
        assert_eq!(packet.entity_id(), 128);
        assert!(packet.is_empty());
        assert_eq!(encode(&packet), [0x80, 0x01, 0xFF]);
    }

    #[test]
    fn duplicate_index_keeps_the_last_value() {
        // entity 1, [0] = Byte 1, [0] = Boolean true, end
        let packet = decode(&[1, 0, 0, 1, 0, 8, 1, 0xFF]).unwrap();
        assert_eq!(packet.len(), 1);
        assert_eq!(packet.get(0), Some(&EntityDataValue::Boolean(true)));
    }

    #[test]
    fn text_components_cover_values_and_items() {
        let packet = fixture();
        assert_eq!(
            plain(&packet.text_components()),
            ["C1", "C2", "D", "L1", "L2"]
        );
    }

    #[test]
    fn duplicated_text_is_reported_twice() {
        let same = TextComponent::text("twin");
        let packet = CSetEntityData::new(
            3,
            [
                (2, EntityDataValue::TextComponent(same.clone())),
                (5, EntityDataValue::OptionalTextComponent(Some(same))),
            ],
        )
        .unwrap();
        assert_eq!(plain(&packet.text_components()), ["twin", "twin"]);
    }

    #[test]
    fn identity_rewrite_is_equal() {
        let packet = fixture();
        let rewritten = packet.map_text(TextComponent::clone);
        assert_eq!(rewritten, packet);
        assert_eq!(encode(&rewritten), encode(&packet));
    }

    #[test]
    fn rewrite_touches_only_text() {
        let packet = fixture();
        let rewritten = packet.map_text(|t| TextComponent::text(t.plain_text().to_lowercase()));

        assert_eq!(
            plain(&rewritten.text_components()),
            ["c1", "c2", "d", "l1", "l2"]
        );
        assert_eq!(rewritten.entity_id(), packet.entity_id());
        assert_eq!(rewritten.len(), packet.len());
        for (index, value) in packet.entries() {
            if !value.holds_text() {
                assert_eq!(rewritten.get(index), Some(value), "index {index}");
            }
        }

        let Some(EntityDataValue::ItemStack(stack)) = rewritten.get(8) else {
            panic!("item entry lost its kind");
        };
        assert_eq!(stack.components[0], ItemComponent::Damage(3));
        assert_eq!(stack.lore().len(), 2);
    }

    #[test]
    fn rewrite_keeps_the_optional_kind() {
        let packet = fixture();
        let rewritten = packet.map_text(|_| TextComponent::text("x"));

        let optional = rewritten.get(3).unwrap();
        assert_eq!(
            optional.serializer_id(),
            EntityDataSerializers::OPTIONAL_TEXT_COMPONENT
        );
        assert_eq!(
            rewritten.get(2).unwrap().serializer_id(),
            EntityDataSerializers::TEXT_COMPONENT
        );

        let absent = CSetEntityData::new(1, [(2, EntityDataValue::OptionalTextComponent(None))])
            .unwrap()
            .map_text(|_| TextComponent::text("x"));
        assert_eq!(
            absent.get(2),
            Some(&EntityDataValue::OptionalTextComponent(None))
        );
    }

    #[test]
    fn transform_errors_propagate() {
        let packet = fixture();
        let mut calls = 0;
        let result = packet.try_map_text(|t| {
            calls += 1;
            if t.plain_text() == "D" {
                Err("blocked word")
            } else {
                Ok(t.clone())
            }
        });
        assert_eq!(result, Err("blocked word"));
        assert_eq!(calls, 3);
    }

    #[test]
    fn unknown_serializer_fails_the_whole_packet() {
        // entity 1, [0] = Byte 1, [1] = serializer 16, end
        let err = decode(&[1, 0, 0, 1, 1, 16, 0, 0xFF]).unwrap_err();
        assert!(matches!(err, PacketReadError::UnknownEntryType(16)));
    }

    #[test]
    fn terminator_index_is_never_an_entry() {
        let err = CSetEntityData::new(1, [(0xFF, EntityDataValue::Byte(0))]).unwrap_err();
        assert_eq!(err, ReservedIndex);

        // The first 0xFF ends the list, whatever bytes follow it.
        let mut slice: &[u8] = &[1, 0xFF, 0, 1];
        let packet = CSetEntityData::read_packet(&mut slice).unwrap();
        assert!(packet.get(0xFF).is_none());
        assert!(packet.is_empty());
        assert_eq!(slice, [0, 1]);
    }

    #[test]
    fn truncation_anywhere_is_end_of_stream() {
        let bytes = encode(&fixture());
        for len in 0..bytes.len() {
            let err = decode(&bytes[..len]).unwrap_err();
            assert!(
                matches!(err, PacketReadError::UnexpectedEndOfStream),
                "prefix of {len} bytes gave {err:?}"
            );
        }
    }

    #[test]
    fn read_limits_come_from_config() {
        let packet =
            CSetEntityData::new(1, [(0, EntityDataValue::String("a".repeat(64)))]).unwrap();
        let bytes = encode(&packet);

        let config = ProtocolConfig {
            max_string_length: 16,
            ..ProtocolConfig::DEFAULT
        };
        let err = CSetEntityData::read_with_config(&mut bytes.as_slice(), &config).unwrap_err();
        assert!(matches!(err, PacketReadError::TooLong { len: 64, max: 16 }));
    }

    #[test]
    fn write_with_id_prefixes_the_packet_id() {
        let packet = CSetEntityData::new(1, []).unwrap();
        let mut buf = Vec::new();
        packet.write_with_id(&mut buf).unwrap();

        let mut expected = Vec::new();
        VarInt(C_SET_ENTITY_DATA).write(&mut expected).unwrap();
        expected.extend([1, 0xFF]);
        assert_eq!(buf, expected);
        assert_eq!(packet.packet_id(), C_SET_ENTITY_DATA);
    }

    #[test]
    fn packet_can_be_shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CSetEntityData>();
    }

    #[test]
    fn marker_reads_terminator() {
        assert_eq!(
            EntryMarker::read(&mut [0xFFu8].as_slice()).unwrap(),
            EntryMarker::End
        );
        assert_eq!(
            EntryMarker::read(&mut [0xFEu8].as_slice()).unwrap(),
            EntryMarker::Entry(0xFE)
        );
    }
}
