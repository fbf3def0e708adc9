use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use octaglyph_cipher::{CipherConfig, CipherError, GlyphStream, GlyphStreamReader};

use crate::cmd::{StreamSource, WireForm};
use crate::exit::{cipher_error, io_error, CliError, CliResult, USAGE};

/// Longest text a single token may take, separators included.
const TEXT_BYTES_PER_TRIPLET: usize = 32;
const TEXT_HEADER_BYTES: usize = 64;

/// Read a whole file, or stdin when no path is given, refusing more than
/// `limit` bytes. At most `limit + 1` bytes are ever buffered.
pub fn read_bytes(path: Option<&Path>, limit: usize) -> CliResult<Vec<u8>> {
    let cap = (limit as u64).saturating_add(1);
    let mut buf = Vec::new();
    match path {
        Some(path) => {
            let file = File::open(path)
                .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
            file.take(cap)
                .read_to_end(&mut buf)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
        }
        None => {
            io::stdin()
                .lock()
                .take(cap)
                .read_to_end(&mut buf)
                .map_err(|err| io_error("failed reading stdin", err))?;
        }
    }

    if buf.len() > limit {
        return Err(cipher_error(
            "failed reading input",
            CipherError::InputTooLarge {
                size: buf.len(),
                max: limit,
            },
        ));
    }
    Ok(buf)
}

/// Upper bound on the text form of a stream within the triplet limit.
fn text_limit(config: &CipherConfig) -> usize {
    config
        .max_triplets
        .saturating_mul(TEXT_BYTES_PER_TRIPLET)
        .saturating_add(TEXT_HEADER_BYTES)
}

pub fn parse_hex(text: &str) -> CliResult<Vec<u8>> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if digits.len() % 2 != 0 {
        return Err(CliError::new(USAGE, "--hex needs an even number of digits"));
    }

    digits
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| {
                    CliError::new(
                        USAGE,
                        format!("--hex: {:?} is not a hex byte", String::from_utf8_lossy(pair)),
                    )
                })
        })
        .collect()
}

/// Load a glyph stream from the command line source.
pub fn read_stream(source: &StreamSource) -> CliResult<GlyphStream> {
    let config = source.limits.config();

    match (source.wire, &source.stream, &source.file) {
        (WireForm::Binary, Some(_), _) => Err(CliError::new(
            USAGE,
            "--stream takes the text form; use --file or stdin for binary streams",
        )),
        (WireForm::Text, Some(text), _) => parse_text(text, &config),
        (WireForm::Text, None, file) => {
            let bytes = read_bytes(file.as_deref(), text_limit(&config))?;
            let text = String::from_utf8(bytes).map_err(|_| {
                cipher_error(
                    "failed reading stream",
                    CipherError::MalformedHeader("text stream is not UTF-8".into()),
                )
            })?;
            parse_text(&text, &config)
        }
        (WireForm::Binary, None, Some(path)) => {
            let file = File::open(path)
                .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
            read_binary(file, config)
        }
        (WireForm::Binary, None, None) => read_binary(io::stdin().lock(), config),
    }
}

fn parse_text(text: &str, config: &CipherConfig) -> CliResult<GlyphStream> {
    let stream: GlyphStream = text
        .parse()
        .map_err(|err| cipher_error("failed parsing stream", err))?;
    if stream.len() > config.max_triplets {
        return Err(cipher_error(
            "failed parsing stream",
            CipherError::TooManyTriplets {
                count: stream.len(),
                max: config.max_triplets,
            },
        ));
    }
    Ok(stream)
}

fn read_binary<R: Read>(source: R, config: CipherConfig) -> CliResult<GlyphStream> {
    GlyphStreamReader::with_config(source, config)
        .read_stream()
        .map_err(|err| cipher_error("failed reading stream", err))
}
