use bytes::{Buf, BufMut, BytesMut};

use octaglyph_tables::{Glyph, TableId};

use crate::error::{CipherError, Result};
use crate::stream::GlyphStream;
use crate::triplet::{CellGlyph, GlyphTriplet};

/// Stream header: magic (2) + bit length (8) + triplet count (4) = 14 bytes.
pub const HEADER_SIZE: usize = 14;

/// One triplet on the wire: seq (4) + five glyph/table/rank bytes.
pub const TRIPLET_SIZE: usize = 9;

/// Magic bytes: "OG" (0x4F 0x47).
pub const MAGIC: [u8; 2] = [0x4F, 0x47];

/// Encode a glyph stream into the binary wire format.
///
/// Wire format:
/// ```text
/// ┌────────────┬─────────────┬───────────┬──────────────────────┐
/// │ Magic (2B) │ Bit length  │ Count     │ Triplets             │
/// │ 0x4F 0x47  │ (8B LE)     │ (4B LE)   │ (Count × 9B)         │
/// │ "OG"       │             │           │                      │
/// └────────────┴─────────────┴───────────┴──────────────────────┘
///
/// triplet = seq (4B LE) | node | table | glyph | rank | checksum
/// ```
///
/// Glyphs travel as their alphabet index, tables as their octave.
pub fn encode_stream(stream: &GlyphStream, dst: &mut BytesMut) -> Result<()> {
    let count = u32::try_from(stream.len()).map_err(|_| CipherError::TooManyTriplets {
        count: stream.len(),
        max: u32::MAX as usize,
    })?;

    dst.reserve(HEADER_SIZE + stream.len() * TRIPLET_SIZE);
    dst.put_slice(&MAGIC);
    dst.put_u64_le(stream.bit_len);
    dst.put_u32_le(count);
    for triplet in &stream.triplets {
        dst.put_u32_le(triplet.seq);
        dst.put_u8(triplet.node.index() as u8);
        dst.put_u8(triplet.cell.table.octave());
        dst.put_u8(triplet.cell.glyph.index() as u8);
        dst.put_u8(triplet.cell.rank);
        dst.put_u8(triplet.checksum.index() as u8);
    }
    Ok(())
}

/// Decode a glyph stream from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't hold a complete stream yet.
/// On success, consumes the stream bytes from the buffer.
pub fn decode_stream(src: &mut BytesMut, max_triplets: usize) -> Result<Option<GlyphStream>> {
    if src.len() < HEADER_SIZE {
        return Ok(None);
    }

    if src[0..2] != MAGIC {
        return Err(CipherError::InvalidMagic);
    }

    let mut header = &src[2..HEADER_SIZE];
    let bit_len = header.get_u64_le();
    let count = header.get_u32_le() as usize;

    if count > max_triplets {
        return Err(CipherError::TooManyTriplets {
            count,
            max: max_triplets,
        });
    }

    let total = HEADER_SIZE + count * TRIPLET_SIZE;
    if src.len() < total {
        return Ok(None);
    }

    let mut body = &src[HEADER_SIZE..total];
    let mut triplets = Vec::with_capacity(count);
    for position in 0..count {
        triplets.push(read_triplet(&mut body, position)?);
    }

    src.advance(total);
    Ok(Some(GlyphStream { bit_len, triplets }))
}

fn read_triplet(body: &mut &[u8], position: usize) -> Result<GlyphTriplet> {
    let seq = body.get_u32_le();
    let node = body.get_u8();
    let table = body.get_u8();
    let glyph = body.get_u8();
    let rank = body.get_u8();
    let checksum = body.get_u8();

    let token = format!("wire triplet {position}");
    let glyph_at = |byte: u8, what: &str| {
        Glyph::from_index(byte as usize).ok_or_else(|| {
            CipherError::malformed(&token, format!("{what} byte {byte} is not a glyph"))
        })
    };

    Ok(GlyphTriplet {
        seq,
        node: glyph_at(node, "node")?,
        cell: CellGlyph {
            table: TableId::from_octave(table).ok_or_else(|| {
                CipherError::malformed(&token, format!("table byte {table} is not a table"))
            })?,
            glyph: glyph_at(glyph, "cell glyph")?,
            rank,
        },
        checksum: glyph_at(checksum, "checksum")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::encode;
    use crate::config::CipherConfig;

    fn max() -> usize {
        CipherConfig::default().max_triplets
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let stream = encode(b"HELLO");
        let mut buf = BytesMut::new();
        encode_stream(&stream, &mut buf).unwrap();

        assert_eq!(buf.len(), HEADER_SIZE + 4 * TRIPLET_SIZE);

        let decoded = decode_stream(&mut buf, max()).unwrap().unwrap();
        assert_eq!(decoded, stream);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_layout_of_first_triplet() {
        let mut buf = BytesMut::new();
        encode_stream(&encode(b"HELLO"), &mut buf).unwrap();

        assert_eq!(&buf[0..2], b"OG");
        assert_eq!(&buf[2..10], &40u64.to_le_bytes());
        assert_eq!(&buf[10..14], &4u32.to_le_bytes());
        // 0/G:BI0:Q
        assert_eq!(&buf[14..23], &[0, 0, 0, 0, 2, 1, 8, 0, 12]);
    }

    #[test]
    fn test_decode_incomplete_header() {
        let mut buf = BytesMut::from(&[0x4F, 0x47, 0x00][..]);
        assert!(decode_stream(&mut buf, max()).unwrap().is_none());
    }

    #[test]
    fn test_decode_incomplete_body() {
        let mut buf = BytesMut::new();
        encode_stream(&encode(b"HELLO"), &mut buf).unwrap();
        buf.truncate(HEADER_SIZE + TRIPLET_SIZE + 3);

        assert!(decode_stream(&mut buf, max()).unwrap().is_none());
        assert_eq!(buf.len(), HEADER_SIZE + TRIPLET_SIZE + 3);
    }

    #[test]
    fn test_decode_invalid_magic() {
        let mut buf = BytesMut::from(&[0xFF; HEADER_SIZE][..]);
        assert!(matches!(
            decode_stream(&mut buf, max()),
            Err(CipherError::InvalidMagic)
        ));
    }

    #[test]
    fn test_decode_too_many_triplets() {
        let mut buf = BytesMut::new();
        buf.put_slice(&MAGIC);
        buf.put_u64_le(13 * 1000);
        buf.put_u32_le(1000);

        assert!(matches!(
            decode_stream(&mut buf, 10),
            Err(CipherError::TooManyTriplets {
                count: 1000,
                max: 10
            })
        ));
    }

    #[test]
    fn test_decode_rejects_bytes_outside_alphabet() {
        let mut buf = BytesMut::new();
        encode_stream(&encode(b"HI"), &mut buf).unwrap();
        buf[HEADER_SIZE + 6] = 21;

        let err = decode_stream(&mut buf, max()).unwrap_err();
        assert!(matches!(err, CipherError::MalformedGlyphTriplet { .. }));
    }

    #[test]
    fn test_decode_rejects_unknown_table() {
        let mut buf = BytesMut::new();
        encode_stream(&encode(b"HI"), &mut buf).unwrap();
        buf[HEADER_SIZE + 5] = 4;

        let err = decode_stream(&mut buf, max()).unwrap_err();
        assert!(matches!(err, CipherError::MalformedGlyphTriplet { .. }));
    }

    #[test]
    fn test_multiple_streams() {
        let mut buf = BytesMut::new();
        encode_stream(&encode(b"first"), &mut buf).unwrap();
        encode_stream(&encode(b"second"), &mut buf).unwrap();

        let s1 = decode_stream(&mut buf, max()).unwrap().unwrap();
        let s2 = decode_stream(&mut buf, max()).unwrap().unwrap();
        assert_eq!(s1, encode(b"first"));
        assert_eq!(s2, encode(b"second"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_empty_stream() {
        let mut buf = BytesMut::new();
        encode_stream(&encode(b""), &mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_SIZE);

        let decoded = decode_stream(&mut buf, max()).unwrap().unwrap();
        assert!(decoded.is_empty());
        assert_eq!(decoded.bit_len, 0);
    }
}
