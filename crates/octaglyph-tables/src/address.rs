use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::table::{TableId, CELL_COUNT, MAX_CELL_INDEX};

/// Canonical address of a cell: table plus cell index.
///
/// Fields are public so callers can build addresses that are deliberately
/// out of range (for example to probe checksum verification). Use
/// [`CellAddress::new`] when the index comes from untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub table: TableId,
    pub index: u16,
}

impl CellAddress {
    /// Create an address, rejecting indices outside `0..=528`.
    pub fn new(table: TableId, index: u16) -> Result<Self> {
        if index as usize >= CELL_COUNT {
            return Err(TableError::IndexOutOfRange {
                index: index as usize,
                max: MAX_CELL_INDEX,
            });
        }
        Ok(Self { table, index })
    }

    /// Whether the index lies inside the grid.
    pub fn is_valid(&self) -> bool {
        (self.index as usize) < CELL_COUNT
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.table, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_grid_bounds() {
        assert!(CellAddress::new(TableId::A, 0).is_ok());
        assert!(CellAddress::new(TableId::D, 528).is_ok());
    }

    #[test]
    fn new_rejects_index_past_grid() {
        let err = CellAddress::new(TableId::B, 529).unwrap_err();
        assert_eq!(
            err,
            TableError::IndexOutOfRange {
                index: 529,
                max: 528
            }
        );
    }

    #[test]
    fn unchecked_address_reports_validity() {
        let addr = CellAddress {
            table: TableId::C,
            index: 700,
        };
        assert!(!addr.is_valid());
        assert_eq!(addr.to_string(), "C[700]");
    }
}
