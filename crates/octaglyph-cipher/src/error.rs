use std::fmt::Display;

use octaglyph_frame::FrameError;
use octaglyph_tables::TableError;

/// Errors that can occur while encoding or decoding glyph streams.
#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    /// Table addressing error.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// Packet or frame error (field range, truncation, sequence gaps).
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// A triplet's checksum glyph does not match its cell address.
    #[error("checksum mismatch in triplet {seq} (expected {expected}, found {found})")]
    ChecksumMismatch { seq: u32, expected: u8, found: u8 },

    /// A stream element that cannot be read as a glyph triplet.
    #[error("malformed glyph triplet `{token}`: {reason}")]
    MalformedGlyphTriplet { token: String, reason: String },

    /// The text stream header is missing or unreadable.
    #[error("malformed stream header: {0}")]
    MalformedHeader(String),

    /// The binary stream header contains an invalid magic number.
    #[error("invalid stream magic (expected 0x4F47 \"OG\")")]
    InvalidMagic,

    /// The stream holds more triplets than the configured maximum.
    #[error("too many triplets ({count}, max {max})")]
    TooManyTriplets { count: usize, max: usize },

    /// The input buffer exceeds the configured maximum size.
    #[error("input too large ({size} bytes, max {max})")]
    InputTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing streams.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before a complete glyph stream was received.
    #[error("stream closed (incomplete glyph stream)")]
    StreamClosed,
}

impl CipherError {
    pub(crate) fn malformed(token: impl Display, reason: impl Into<String>) -> Self {
        CipherError::MalformedGlyphTriplet {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CipherError>;
