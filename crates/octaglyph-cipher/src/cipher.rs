use bytes::Bytes;
use tracing::debug;

use octaglyph_frame::{reassemble, split};

use crate::error::Result;
use crate::mapper::{decode_unit, encode_unit};
use crate::stream::GlyphStream;

/// Encode a byte buffer as a glyph stream.
///
/// Total for every input, including the empty buffer.
pub fn encode(bytes: &[u8]) -> GlyphStream {
    let frame = split(bytes);
    let triplets: Vec<_> = frame.packets.iter().map(encode_unit).collect();
    debug!(
        bytes = bytes.len(),
        triplets = triplets.len(),
        "encoded glyph stream"
    );

    GlyphStream {
        bit_len: frame.bit_len,
        triplets,
    }
}

/// Decode a glyph stream back into bytes.
///
/// Stops at the first triplet that is malformed or fails its checksum; no
/// partial output is returned.
pub fn decode(stream: &GlyphStream) -> Result<Bytes> {
    let packets = stream
        .triplets
        .iter()
        .map(decode_unit)
        .collect::<Result<Vec<_>>>()?;

    let bytes = reassemble(&packets, stream.bit_len)?;
    debug!(
        triplets = packets.len(),
        bytes = bytes.len(),
        "decoded glyph stream"
    );
    Ok(bytes)
}
