//! Glyph mapping, rotary checksums and glyph streams for OCTA-13 frames.
//!
//! Encoding turns bytes into a [`GlyphStream`]: one glyph triplet per 13-bit
//! packet, each triplet holding
//! - a NodeType marker glyph
//! - the table/cell glyph (table, glyph, rank within the glyph's cells)
//! - a checksum glyph over the cell address
//!
//! Decoding verifies every checksum before it accepts a packet and stops at
//! the first failure. The checksum detects accidental corruption only; this
//! is not encryption.

pub mod checksum;
pub mod cipher;
pub mod config;
pub mod error;
pub mod mapper;
pub mod reader;
pub mod stream;
pub mod triplet;
pub mod wire;
pub mod writer;

pub use checksum::{compute, verify, Checksum, ROTATION_STEP};
pub use cipher::{decode, encode};
pub use config::{CipherConfig, DEFAULT_MAX_INPUT};
pub use error::{CipherError, Result};
pub use mapper::{cell_glyph, decode_unit, encode_unit, from_address, to_address};
pub use reader::GlyphStreamReader;
pub use stream::{GlyphStream, STREAM_TAG};
pub use triplet::{CellGlyph, GlyphTriplet};
pub use wire::{decode_stream, encode_stream, HEADER_SIZE, TRIPLET_SIZE};
pub use writer::GlyphStreamWriter;
