//! Roundtrip example: encodes messages to glyph streams, ships them over
//! the binary wire form and decodes them on the other side.
//!
//! Run with:
//!   cargo run --example roundtrip

use std::io::Cursor;

use octaglyph::cipher::{decode, encode, GlyphStreamReader, GlyphStreamWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let messages: [&[u8]; 3] = [b"HELLO", b"", b"the tablets of the watchtowers"];

    for message in messages {
        let stream = encode(message);
        eprintln!("[text] {stream}");

        let parsed = stream.to_string().parse()?;
        let bytes = decode(&parsed)?;
        assert_eq!(bytes.as_ref(), message);
    }

    let mut writer = GlyphStreamWriter::new(Vec::new());
    for message in messages {
        writer.send(message)?;
    }
    let wire = writer.into_inner();
    eprintln!("[wire] {} bytes for {} messages", wire.len(), messages.len());

    let mut reader = GlyphStreamReader::new(Cursor::new(wire));
    for (stream, message) in reader.read_all()?.iter().zip(messages) {
        let bytes = decode(stream)?;
        eprintln!(
            "[wire] {} triplets -> {:?}",
            stream.len(),
            String::from_utf8_lossy(&bytes)
        );
        assert_eq!(bytes.as_ref(), message);
    }

    Ok(())
}
