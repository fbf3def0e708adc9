//! Symbolic OCTA-13 packet codec over Enochian glyph tables.
//!
//! octaglyph turns arbitrary bytes into streams of glyph triplets and back.
//! Each 13-bit packet selects one cell of four fixed 23×23 glyph tables and
//! carries a rotary 4-bit checksum, so accidental corruption is caught on
//! decode. None of this is encryption.
//!
//! # Crate Structure
//!
//! - [`tables`]: the glyph alphabet, the four tables and their registry
//! - [`frame`]: 13-bit packet codec and frame sequencing
//! - [`cipher`]: glyph mapping, checksums and glyph streams
//!
//! ```
//! let stream = octaglyph::cipher::encode(b"HELLO");
//! assert_eq!(
//!     stream.to_string(),
//!     "OCTA13 40 0/G:BI0:Q 1/A:BM2:I 2/C:CU1:G 3/F:AB0:B"
//! );
//! let bytes = octaglyph::cipher::decode(&stream).unwrap();
//! assert_eq!(bytes.as_ref(), b"HELLO");
//! ```

/// Re-export table types.
pub mod tables {
    pub use octaglyph_tables::*;
}

/// Re-export packet and frame types.
pub mod frame {
    pub use octaglyph_frame::*;
}

/// Re-export cipher types.
pub mod cipher {
    pub use octaglyph_cipher::*;
}
