use crate::glyph::Glyph;

/// Errors that can occur while addressing the glyph tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A cell index outside the 23×23 grid.
    #[error("cell index {index} out of range (max {max})")]
    IndexOutOfRange { index: usize, max: usize },

    /// A glyph rank that selects no cell in the table.
    #[error("glyph {glyph} has no cell at rank {rank} ({available} cells carry it)")]
    RankOutOfRange {
        glyph: Glyph,
        rank: u8,
        available: usize,
    },

    /// Text that names no glyph of the alphabet.
    #[error("unknown glyph {0:?}")]
    UnknownGlyph(String),

    /// Text that names no table.
    #[error("unknown table {0:?} (expected A, B, C or D)")]
    UnknownTable(String),
}

pub type Result<T> = std::result::Result<T, TableError>;
