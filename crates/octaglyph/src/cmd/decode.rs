use serde::Serialize;
use tracing::debug;

use octaglyph_cipher::decode;

use crate::cmd::input::read_stream;
use crate::cmd::DecodeArgs;
use crate::exit::{cipher_error, io_error, CliResult, SUCCESS};
use crate::output::{
    hex, new_table, payload_preview, print_json, print_raw, schema_id, OutputFormat,
};

#[derive(Serialize)]
struct DecodeOutput {
    schema_id: String,
    bit_len: u64,
    triplet_count: usize,
    size: usize,
    payload: String,
    payload_hex: String,
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let stream = read_stream(&args.source)?;
    let bytes = decode(&stream).map_err(|err| cipher_error("decode failed", err))?;
    debug!(
        triplets = stream.len(),
        size = bytes.len(),
        "decoded stream"
    );

    if let Some(path) = &args.out {
        std::fs::write(path, &bytes)
            .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))?;
        return Ok(SUCCESS);
    }

    match format {
        OutputFormat::Json => print_json(&DecodeOutput {
            schema_id: schema_id("decode-result"),
            bit_len: stream.bit_len,
            triplet_count: stream.len(),
            size: bytes.len(),
            payload: payload_preview(&bytes),
            payload_hex: hex(&bytes),
        }),
        OutputFormat::Table => {
            let mut table = new_table(["TRIPLETS", "BITS", "SIZE", "PAYLOAD"]);
            table.add_row(vec![
                stream.len().to_string(),
                stream.bit_len.to_string(),
                bytes.len().to_string(),
                payload_preview(&bytes),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "triplets={} bits={} size={} payload={}",
                stream.len(),
                stream.bit_len,
                bytes.len(),
                payload_preview(&bytes)
            );
        }
        OutputFormat::Raw => print_raw(&bytes),
    }

    Ok(SUCCESS)
}
