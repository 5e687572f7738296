//! # Ember Protocol
//!
//! The entity data packet (`set_entity_data`) and everything needed to read,
//! write and rewrite it: the entity data value registry, item stacks, packet
//! traits and the protocol limits configuration.
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    missing_docs,
    clippy::unwrap_used
)]
#![allow(
    clippy::single_call_fn,
    clippy::multiple_inherent_impl,
    clippy::shadow_unrelated,
    clippy::missing_errors_doc,
    clippy::struct_excessive_bools,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata
)]

/// Protocol limits applied while decoding.
pub mod config;
/// Typed entity data values and their serializer registry.
pub mod entity_data;
/// Item stacks as carried by entity data.
pub mod item;
/// Clientbound packet ids.
pub mod packet_ids;
/// Packet level traits.
pub mod packet_traits;
/// Packet definitions.
pub mod packets;
/// Read and write helpers for strings and text.
pub mod ser;
/// Error types.
pub mod utils;

pub use config::ProtocolConfig;
pub use entity_data::{EntityDataBuilder, EntityDataSerializers, EntityDataValue};
pub use item::ItemStack;
pub use packet_traits::{ClientPacket, PacketRead, PacketWrite, TextHoldingPacket};
pub use packets::game::CSetEntityData;
pub use utils::{PacketReadError, PacketWriteError, ReservedIndex};
