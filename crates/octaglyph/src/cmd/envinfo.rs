use std::collections::BTreeMap;

use serde::Serialize;

use octaglyph_cipher::{CipherConfig, HEADER_SIZE, ROTATION_STEP, STREAM_TAG, TRIPLET_SIZE};
use octaglyph_frame::{NODE_TYPE_BITS, OCTAVE_BITS, PACKET_BITS, PAYLOAD_BITS};
use octaglyph_tables::{ALPHABET_LEN, GRID_SIDE};

use crate::cmd::EnvinfoArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, schema_id, OutputFormat};

const ENV_VARS: [&str; 3] = ["OCTAGLYPH_MAX_INPUT", "OCTAGLYPH_LOG_LEVEL", "RUST_LOG"];

#[derive(Serialize)]
struct ProtocolInfo {
    tag: &'static str,
    packet_bits: u32,
    field_bits: [u32; 3],
    alphabet: usize,
    grid_side: usize,
    rotation_step: u16,
    wire_header_bytes: usize,
    wire_triplet_bytes: usize,
}

#[derive(Serialize)]
struct LimitInfo {
    max_input_bytes: usize,
    max_triplets: usize,
}

#[derive(Serialize)]
struct EnvInfoOutput {
    schema_id: String,
    version: String,
    target: String,
    os: &'static str,
    arch: &'static str,
    protocol: ProtocolInfo,
    limits: LimitInfo,
    environment: BTreeMap<&'static str, Option<String>>,
}

pub fn run(_args: EnvinfoArgs, format: OutputFormat) -> CliResult<i32> {
    let output = collect(&CipherConfig::default());
    print_envinfo(&output, format);
    Ok(SUCCESS)
}

fn collect(config: &CipherConfig) -> EnvInfoOutput {
    EnvInfoOutput {
        schema_id: schema_id("envinfo"),
        version: env!("CARGO_PKG_VERSION").to_string(),
        target: target_triple(),
        os: std::env::consts::OS,
        arch: std::env::consts::ARCH,
        protocol: ProtocolInfo {
            tag: STREAM_TAG,
            packet_bits: PACKET_BITS,
            field_bits: [NODE_TYPE_BITS, OCTAVE_BITS, PAYLOAD_BITS],
            alphabet: ALPHABET_LEN,
            grid_side: GRID_SIDE,
            rotation_step: ROTATION_STEP,
            wire_header_bytes: HEADER_SIZE,
            wire_triplet_bytes: TRIPLET_SIZE,
        },
        limits: LimitInfo {
            max_input_bytes: config.max_input_bytes,
            max_triplets: config.max_triplets,
        },
        environment: ENV_VARS
            .iter()
            .map(|name| (*name, std::env::var(name).ok()))
            .collect(),
    }
}

fn target_triple() -> String {
    option_env!("OCTAGLYPH_BUILD_TARGET")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS))
}

fn print_envinfo(output: &EnvInfoOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table | OutputFormat::Pretty => {
            let p = &output.protocol;
            println!("octaglyph {} ({})\n", output.version, output.target);
            println!(
                "  Protocol:   {} {}-bit packets ({}+{}+{})",
                p.tag, p.packet_bits, p.field_bits[0], p.field_bits[1], p.field_bits[2]
            );
            println!(
                "  Tables:     4 × {0}×{0}, {1} glyphs, rotation step {2}",
                p.grid_side, p.alphabet, p.rotation_step
            );
            println!(
                "  Wire:       {} byte header, {} bytes per triplet",
                p.wire_header_bytes, p.wire_triplet_bytes
            );
            println!(
                "  Limits:     {} bytes in, {} triplets",
                output.limits.max_input_bytes, output.limits.max_triplets
            );
            println!("\n  Environment:");
            for (name, value) in &output.environment {
                println!("    {name:<20} {}", value.as_deref().unwrap_or("(not set)"));
            }
        }
        OutputFormat::Raw => println!("{}", output.version),
    }
}
