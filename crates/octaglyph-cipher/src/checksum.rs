//! Rotary 4-bit checksum over a cell address.
//!
//! The golden walk steps around the 529-cell ring by
//! `ROTATION_STEP = floor(529 · φ) mod 529 = 326`. A cell's checksum is the
//! low nibble of where its index lands on that walk:
//!
//! ```text
//! checksum = (cell_index · 326 mod 529) mod 16
//! ```
//!
//! Flipping any single bit of an in-grid index always changes the checksum.
//! The table is not part of the checksum. The step is public; this catches
//! corruption, not tampering by anyone who knows the protocol.

use serde::{Deserialize, Serialize};

use octaglyph_tables::{CellAddress, Glyph, CELL_COUNT};

/// Golden-ratio rotation step on the 529-cell ring.
pub const ROTATION_STEP: u16 = 326;

/// Position `k` of the golden walk.
pub const fn rotate(k: u32) -> u16 {
    ((k * ROTATION_STEP as u32) % CELL_COUNT as u32) as u16
}

/// A 4-bit checksum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(u8);

impl Checksum {
    pub const MAX: u8 = 15;

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Glyph that carries this checksum: `alphabet[value]`.
    pub fn glyph(self) -> Glyph {
        Glyph::ALL[self.0 as usize]
    }

    /// Read a checksum glyph. Only the first 16 glyphs carry checksums.
    pub fn from_glyph(glyph: Glyph) -> Option<Self> {
        Self::new(glyph.index() as u8)
    }
}

/// Compute the checksum of a cell address.
pub fn compute(address: CellAddress) -> Checksum {
    Checksum((rotate(address.index as u32) % 16) as u8)
}

/// Check a checksum against its address.
///
/// Addresses outside the grid never verify.
pub fn verify(address: CellAddress, checksum: Checksum) -> bool {
    (address.index as usize) < CELL_COUNT && compute(address) == checksum
}
