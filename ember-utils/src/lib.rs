//! # Ember Utils
//!
//! Shared building blocks for the Ember protocol crates: variable length
//! integer codecs, the `ReadFrom`/`WriteTo` serialization traits, chat text
//! components and logging setup.
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

/// Variable length integer codecs.
pub mod codec;
/// Logging setup for binaries and tests.
pub mod logger;
/// Reading and writing protocol primitives.
pub mod serial;
/// Chat text components.
pub mod text;
/// Small wrapper types shared across the protocol.
pub mod types;

pub use types::BlockPos;
