use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::glyph::{Glyph, ALPHABET_LEN};
use crate::solid::{Solid, SOLID_COUNT};

/// Rows (and columns) per table.
pub const GRID_SIDE: usize = 23;

/// Cells per table: 23 × 23 = 529.
pub const CELL_COUNT: usize = GRID_SIDE * GRID_SIDE;

/// Highest valid cell index.
pub const MAX_CELL_INDEX: usize = CELL_COUNT - 1;

/// One of the four tables, selected by the packet's OctaveSelector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TableId {
    A,
    B,
    C,
    D,
}

impl TableId {
    pub const ALL: [TableId; 4] = [TableId::A, TableId::B, TableId::C, TableId::D];

    /// The table for an octave selector (0-3).
    pub const fn from_octave(octave: u8) -> Option<TableId> {
        match octave {
            0 => Some(TableId::A),
            1 => Some(TableId::B),
            2 => Some(TableId::C),
            3 => Some(TableId::D),
            _ => None,
        }
    }

    pub const fn octave(self) -> u8 {
        self as u8
    }

    pub const fn letter(self) -> char {
        match self {
            TableId::A => 'A',
            TableId::B => 'B',
            TableId::C => 'C',
            TableId::D => 'D',
        }
    }

    /// Watchtower the table is named after.
    pub const fn watchtower(self) -> &'static str {
        match self {
            TableId::A => "air",
            TableId::B => "water",
            TableId::C => "earth",
            TableId::D => "fire",
        }
    }

    pub fn from_letter(letter: char) -> Option<TableId> {
        match letter.to_ascii_uppercase() {
            'A' => Some(TableId::A),
            'B' => Some(TableId::B),
            'C' => Some(TableId::C),
            'D' => Some(TableId::D),
            _ => None,
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for TableId {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return TableId::from_letter(c)
                .ok_or_else(|| TableError::UnknownTable(s.to_string()));
        }
        TableId::ALL
            .iter()
            .copied()
            .find(|t| t.watchtower().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TableError::UnknownTable(s.to_string()))
    }
}

/// A single position in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub table: TableId,
    pub index: u16,
    pub glyph: Glyph,
    /// Solid associated with the cell (`index mod 6`).
    pub affinity: Solid,
}

impl Cell {
    pub const fn row(&self) -> usize {
        self.index as usize / GRID_SIDE
    }

    pub const fn col(&self) -> usize {
        self.index as usize % GRID_SIDE
    }

    pub const fn octave(&self) -> u8 {
        self.table.octave()
    }
}

/// A fixed 23×23 grid of cells.
#[derive(Debug)]
pub struct SymbolTable {
    id: TableId,
    cells: [Cell; CELL_COUNT],
}

impl SymbolTable {
    pub(crate) const fn build(id: TableId) -> Self {
        let mut cells = [Cell {
            table: id,
            index: 0,
            glyph: Glyph::ALL[0],
            affinity: Solid::ALL[0],
        }; CELL_COUNT];

        let mut index = 0;
        while index < CELL_COUNT {
            cells[index] = Cell {
                table: id,
                index: index as u16,
                glyph: Glyph::ALL[index % ALPHABET_LEN],
                affinity: Solid::ALL[index % SOLID_COUNT],
            };
            index += 1;
        }

        Self { id, cells }
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    /// The cell at `index`, or `None` beyond the grid.
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Grid rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(GRID_SIDE)
    }
}
