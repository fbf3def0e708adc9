use std::collections::BTreeSet;

use crate::address::CellAddress;
use crate::error::{Result, TableError};
use crate::glyph::{Glyph, ALPHABET_LEN};
use crate::table::{Cell, SymbolTable, TableId, CELL_COUNT, MAX_CELL_INDEX};

static REGISTRY: SymbolTableRegistry = SymbolTableRegistry {
    tables: [
        SymbolTable::build(TableId::A),
        SymbolTable::build(TableId::B),
        SymbolTable::build(TableId::C),
        SymbolTable::build(TableId::D),
    ],
};

/// The process-wide table registry.
pub fn registry() -> &'static SymbolTableRegistry {
    &REGISTRY
}

/// The four glyph tables, keyed by [`TableId`].
///
/// Glyph assignment is not injective: 21 glyphs cover 529 cells, so a glyph
/// alone never identifies a cell. [`reverse_lookup`](Self::reverse_lookup)
/// therefore returns a set, and [`resolve`](Self::resolve) needs a rank as
/// side information to pick one member of it.
#[derive(Debug)]
pub struct SymbolTableRegistry {
    tables: [SymbolTable; 4],
}

impl SymbolTableRegistry {
    /// Borrow a table.
    pub fn table(&self, id: TableId) -> &SymbolTable {
        &self.tables[id.octave() as usize]
    }

    /// All tables in octave order.
    pub fn tables(&self) -> impl Iterator<Item = &SymbolTable> {
        self.tables.iter()
    }

    /// Glyph at `cell_index` of a table.
    pub fn lookup(&self, table: TableId, cell_index: usize) -> Result<Glyph> {
        self.cell(table, cell_index).map(|cell| cell.glyph)
    }

    /// Glyph of the cell an 8-bit payload addresses.
    ///
    /// Total: every payload value (0-255) lies inside the grid.
    pub fn payload_glyph(&self, table: TableId, payload: u8) -> Glyph {
        self.table(table).cells()[payload as usize].glyph
    }

    /// Full cell record, including metadata.
    pub fn cell(&self, table: TableId, cell_index: usize) -> Result<&Cell> {
        self.table(table)
            .get(cell_index)
            .ok_or(TableError::IndexOutOfRange {
                index: cell_index,
                max: MAX_CELL_INDEX,
            })
    }

    /// Every cell index of `table` that carries `glyph`.
    ///
    /// The set holds 26 indices for the first four glyphs of the alphabet and
    /// 25 for the rest (529 = 21 × 25 + 4).
    pub fn reverse_lookup(&self, table: TableId, glyph: Glyph) -> BTreeSet<u16> {
        self.table(table)
            .cells()
            .iter()
            .skip(glyph.index())
            .step_by(ALPHABET_LEN)
            .map(|cell| cell.index)
            .collect()
    }

    /// Position of a cell inside its glyph's reverse-lookup set.
    pub fn rank_of(cell_index: u16) -> u8 {
        (cell_index as usize / ALPHABET_LEN) as u8
    }

    /// The cell that carries `glyph` at position `rank` of its reverse-lookup set.
    pub fn resolve(&self, table: TableId, glyph: Glyph, rank: u8) -> Result<CellAddress> {
        let index = glyph.index() + rank as usize * ALPHABET_LEN;
        if index >= CELL_COUNT {
            return Err(TableError::RankOutOfRange {
                glyph,
                rank,
                available: self.reverse_lookup(table, glyph).len(),
            });
        }
        CellAddress::new(table, index as u16)
    }
}
