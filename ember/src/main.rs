//! `ember` inspects `set_entity_data` packet bodies captured as hex.
//!
//! The body is decoded and every entry and text component is logged. With
//! `--rewrite`, every text component is rewritten and the re-encoded body is
//! printed to stdout as hex.

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use ember_protocol::{CSetEntityData, PacketWrite, ProtocolConfig, TextHoldingPacket};
use ember_utils::{logger, text::TextComponent};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// JSON5 file with decode limits. The protocol maxima are used without it.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Rewrite every text component and print the new packet body as hex.
    #[arg(short, long, value_enum)]
    rewrite: Option<Rewrite>,
    /// File holding the packet body as hex, starting at the entity id. `-`
    /// reads standard input.
    input: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Rewrite {
    /// Uppercase all literal text.
    Upper,
    /// Replace every literal character with `*`.
    Redact,
}

impl Rewrite {
    fn apply(self, text: &TextComponent) -> TextComponent {
        match self {
            Self::Upper => text.map_literals(&|s: &str| s.to_uppercase()),
            Self::Redact => text.map_literals(&|s: &str| "*".repeat(s.chars().count())),
        }
    }
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read standard input")?;
        return Ok(source);
    }
    fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

/// Decodes a hex dump, ignoring whitespace and an optional `0x` prefix.
fn parse_hex(source: &str) -> anyhow::Result<Vec<u8>> {
    let digits: String = source.split_whitespace().collect();
    let digits = digits.strip_prefix("0x").unwrap_or(&digits);
    if digits.is_empty() {
        bail!("input contains no hex digits");
    }
    hex::decode(digits).context("input is not valid hex")
}

fn decode(bytes: &[u8], config: &ProtocolConfig) -> anyhow::Result<CSetEntityData> {
    let mut data = bytes;
    let packet = CSetEntityData::read_with_config(&mut data, config)
        .context("failed to decode entity data")?;
    if !data.is_empty() {
        tracing::warn!("{} bytes after the terminator were ignored", data.len());
    }
    Ok(packet)
}

fn log_packet(packet: &CSetEntityData) {
    tracing::info!(
        "entity {} with {} entries",
        packet.entity_id(),
        packet.len()
    );
    for (index, value) in packet.sorted_entries() {
        tracing::info!("[{index}] serializer {}: {value:?}", value.serializer_id());
    }
    for text in packet.text_components() {
        tracing::info!("text: {text}");
    }
}

fn encode(packet: &CSetEntityData) -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    packet
        .write_packet(&mut bytes)
        .context("failed to encode entity data")?;
    Ok(hex::encode(bytes))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init("info").context("failed to install the logger")?;

    let config = match &cli.config {
        Some(path) => ProtocolConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ProtocolConfig::default(),
    };

    let bytes = parse_hex(&read_input(&cli.input)?)?;
    tracing::debug!("decoding {} bytes", bytes.len());
    let packet = decode(&bytes, &config)?;
    log_packet(&packet);

    if let Some(rewrite) = cli.rewrite {
        let rewritten = packet.map_text(|text| rewrite.apply(text));
        println!("{}", encode(&rewritten)?);
    }
    Ok(())
}
