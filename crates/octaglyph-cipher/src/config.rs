use octaglyph_frame::units_for_bits;

use crate::error::{CipherError, Result};

/// Default maximum input size: 16 MiB.
pub const DEFAULT_MAX_INPUT: usize = 16 * 1024 * 1024;

/// Limits applied where glyph streams cross an I/O boundary.
#[derive(Debug, Clone)]
pub struct CipherConfig {
    /// Maximum bytes accepted for encoding. Default: 16 MiB.
    pub max_input_bytes: usize,
    /// Maximum triplets accepted when reading a stream.
    pub max_triplets: usize,
}

impl CipherConfig {
    /// Config whose triplet limit matches `max_input_bytes`.
    pub fn for_input_limit(max_input_bytes: usize) -> Self {
        Self {
            max_input_bytes,
            max_triplets: units_for_bits((max_input_bytes as u64).saturating_mul(8)),
        }
    }

    pub fn check_input(&self, size: usize) -> Result<()> {
        if size > self.max_input_bytes {
            return Err(CipherError::InputTooLarge {
                size,
                max: self.max_input_bytes,
            });
        }
        Ok(())
    }
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self::for_input_limit(DEFAULT_MAX_INPUT)
    }
}
