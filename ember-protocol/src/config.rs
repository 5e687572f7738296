use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

/// Longest string, in bytes, the protocol allows.
pub const MAX_STRING_LENGTH: usize = 32767;
/// Longest serialized text component, in bytes, the protocol allows.
pub const MAX_TEXT_LENGTH: usize = 262_144;
/// Most lore lines an item can carry.
pub const MAX_LORE_LINES: usize = 256;
/// Most component patches accepted on a single item.
pub const MAX_ITEM_COMPONENTS: usize = 256;

/// Limits applied while decoding untrusted input.
///
/// Each limit may be lowered below the protocol maximum, never raised above
/// it. Writing always enforces the protocol maxima.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProtocolConfig {
    /// Longest plain string accepted, in bytes.
    pub max_string_length: usize,
    /// Longest text component JSON accepted, in bytes.
    pub max_text_length: usize,
    /// Most lore lines accepted on one item.
    pub max_lore_lines: usize,
    /// Most added (and, separately, removed) components accepted on one item.
    pub max_item_components: usize,
}

/// Errors raised while loading a [`ProtocolConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    /// The file is not valid JSON5 or has unknown keys.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A limit is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ProtocolConfig {
    /// The protocol maxima.
    pub const DEFAULT: Self = Self {
        max_string_length: MAX_STRING_LENGTH,
        max_text_length: MAX_TEXT_LENGTH,
        max_lore_lines: MAX_LORE_LINES,
        max_item_components: MAX_ITEM_COMPONENTS,
    };

    /// Parses a JSON5 document. Missing keys keep their default.
    pub fn from_json5(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json5::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        let config = Self::from_json5(&source)?;
        log::debug!("loaded protocol limits from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Checks every limit lies between 1 and its protocol maximum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("max_string_length", self.max_string_length, MAX_STRING_LENGTH),
            ("max_text_length", self.max_text_length, MAX_TEXT_LENGTH),
            ("max_lore_lines", self.max_lore_lines, MAX_LORE_LINES),
            ("max_item_components", self.max_item_components, MAX_ITEM_COMPONENTS),
        ];

        for (name, value, max) in limits {
            if value == 0 || value > max {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between 1 and {max}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
