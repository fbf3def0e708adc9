use std::fs::File;
use std::io::Write;

use serde::Serialize;
use tracing::debug;

use octaglyph_cipher::{encode, CipherConfig, GlyphStream, GlyphStreamWriter, GlyphTriplet};

use crate::cmd::input::{parse_hex, read_bytes};
use crate::cmd::{EncodeArgs, WireForm};
use crate::exit::{cipher_error, io_error, CliResult, SUCCESS};
use crate::output::{new_table, print_json, print_raw, schema_id, OutputFormat};

#[derive(Serialize)]
struct EncodeOutput<'a> {
    schema_id: String,
    input_size: usize,
    bit_len: u64,
    triplet_count: usize,
    stream: String,
    triplets: &'a [GlyphTriplet],
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = args.limits.config();
    let input = resolve_input(&args, &config)?;

    if args.wire == WireForm::Binary {
        return write_binary(&args, &input, config);
    }

    config
        .check_input(input.len())
        .map_err(|err| cipher_error("encode failed", err))?;
    let stream = encode(&input);
    debug!(
        input = input.len(),
        triplets = stream.len(),
        "encoded text stream"
    );

    if let Some(path) = &args.out {
        let mut file = File::create(path)
            .map_err(|err| io_error(&format!("failed creating {}", path.display()), err))?;
        writeln!(file, "{stream}")
            .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))?;
        return Ok(SUCCESS);
    }

    print_stream(&stream, input.len(), format);
    Ok(SUCCESS)
}

fn resolve_input(args: &EncodeArgs, config: &CipherConfig) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(hex) = &args.hex {
        return parse_hex(hex);
    }
    read_bytes(args.file.as_deref(), config.max_input_bytes)
}

fn write_binary(args: &EncodeArgs, input: &[u8], config: CipherConfig) -> CliResult<i32> {
    let result = match &args.out {
        Some(path) => {
            let file = File::create(path)
                .map_err(|err| io_error(&format!("failed creating {}", path.display()), err))?;
            GlyphStreamWriter::with_config(file, config).send(input)
        }
        None => GlyphStreamWriter::with_config(std::io::stdout().lock(), config).send(input),
    };
    result.map_err(|err| cipher_error("encode failed", err))?;
    Ok(SUCCESS)
}

fn print_stream(stream: &GlyphStream, input_size: usize, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&EncodeOutput {
            schema_id: schema_id("encode-result"),
            input_size,
            bit_len: stream.bit_len,
            triplet_count: stream.len(),
            stream: stream.to_string(),
            triplets: &stream.triplets,
        }),
        OutputFormat::Table => {
            let mut table = new_table(["SEQ", "NODE", "CELL", "CHECKSUM", "TOKEN"]);
            for triplet in &stream.triplets {
                table.add_row(vec![
                    triplet.seq.to_string(),
                    triplet.node.name().to_string(),
                    triplet.cell.to_string(),
                    triplet.checksum.name().to_string(),
                    triplet.to_string(),
                ]);
            }
            println!("{table}");
            println!("{stream}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            print_raw(format!("{stream}\n").as_bytes());
        }
    }
}
