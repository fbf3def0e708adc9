use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use octaglyph_cipher::{CipherConfig, DEFAULT_MAX_INPUT};
use octaglyph_tables::{Glyph, TableId};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod doctor;
pub mod encode;
pub mod envinfo;
pub mod input;
pub mod inspect;
pub mod lookup;
pub mod tables;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode bytes as a glyph stream.
    Encode(EncodeArgs),
    /// Decode a glyph stream back into bytes.
    Decode(DecodeArgs),
    /// Show a per-triplet breakdown of a glyph stream.
    Inspect(InspectArgs),
    /// Render the glyph tables.
    Tables(TablesArgs),
    /// List every cell of a table that carries a glyph.
    Lookup(LookupArgs),
    /// Run protocol self-checks.
    Doctor(DoctorArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Tables(args) => tables::run(args, format),
        Command::Lookup(args) => lookup::run(args, format),
        Command::Doctor(args) => doctor::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Envinfo(args) => envinfo::run(args, format),
    }
}

/// Serialized form of a glyph stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum WireForm {
    /// `OCTA13 {bit_len} tokens...`
    #[default]
    Text,
    /// `OG` header followed by 9-byte triplets.
    Binary,
}

#[derive(Args, Debug, Clone)]
pub struct LimitArgs {
    /// Maximum input size in bytes.
    #[arg(long, env = "OCTAGLYPH_MAX_INPUT", default_value_t = DEFAULT_MAX_INPUT)]
    pub max_input: usize,
}

impl LimitArgs {
    pub fn config(&self) -> CipherConfig {
        CipherConfig::for_input_limit(self.max_input)
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Raw string input.
    #[arg(long, conflicts_with_all = ["hex", "file"])]
    pub data: Option<String>,
    /// Hex-encoded input.
    #[arg(long, conflicts_with_all = ["data", "file"])]
    pub hex: Option<String>,
    /// Read input from file. Stdin is used when no input is given.
    #[arg(long, conflicts_with_all = ["data", "hex"])]
    pub file: Option<PathBuf>,
    /// Stream form to produce.
    #[arg(long, value_enum, default_value_t = WireForm::Text)]
    pub wire: WireForm,
    /// Write the stream to a file instead of stdout.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
    #[command(flatten)]
    pub limits: LimitArgs,
}

/// Where a glyph stream comes from.
#[derive(Args, Debug)]
pub struct StreamSource {
    /// Text stream given inline.
    #[arg(long, conflicts_with = "file")]
    pub stream: Option<String>,
    /// Read the stream from file. Stdin is used when no input is given.
    #[arg(long, conflicts_with = "stream")]
    pub file: Option<PathBuf>,
    /// Stream form to read.
    #[arg(long, value_enum, default_value_t = WireForm::Text)]
    pub wire: WireForm,
    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub source: StreamSource,
    /// Write decoded bytes to a file instead of stdout.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: StreamSource,
}

#[derive(Args, Debug)]
pub struct TablesArgs {
    /// Render a single table (letter A-D or watchtower name).
    #[arg(long)]
    pub table: Option<TableId>,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Table letter (A-D) or watchtower name.
    pub table: TableId,
    /// Glyph letter or name.
    pub glyph: Glyph,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}
