//! Static Enochian glyph tables for the OCTA-13 symbolic codec.
//!
//! Four tables (A–D), each a 23×23 grid of cells. Every cell holds one glyph
//! from a fixed 21-letter alphabet, so glyphs repeat across the grid:
//! - `glyph = alphabet[cell_index mod 21]`
//! - `cell_index = row * 23 + col`, in `0..=528`
//!
//! The tables are built at compile time into a `static` registry. Nothing
//! here is mutable after startup, so every lookup is safe from any thread.

pub mod address;
pub mod error;
pub mod glyph;
pub mod registry;
pub mod solid;
pub mod table;

pub use address::CellAddress;
pub use error::{Result, TableError};
pub use glyph::{Glyph, ALPHABET_LEN};
pub use registry::{registry, SymbolTableRegistry};
pub use solid::{Solid, SOLID_COUNT};
pub use table::{Cell, SymbolTable, TableId, CELL_COUNT, GRID_SIDE, MAX_CELL_INDEX};
