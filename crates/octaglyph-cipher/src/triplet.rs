use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use octaglyph_tables::{Glyph, TableId};

use crate::error::CipherError;

/// The table/cell element of a triplet.
///
/// A glyph alone matches 25 or 26 cells of a table, so the element also
/// carries the rank that picks one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellGlyph {
    pub table: TableId,
    pub glyph: Glyph,
    pub rank: u8,
}

/// One encoded packet.
///
/// Text form: `{seq}/{node}:{table}{glyph}{rank}:{checksum}`, for example
/// `0/G:BI0:Q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlyphTriplet {
    pub seq: u32,
    /// NodeType marker.
    pub node: Glyph,
    pub cell: CellGlyph,
    pub checksum: Glyph,
}

impl fmt::Display for CellGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.table, self.glyph, self.rank)
    }
}

impl fmt::Display for GlyphTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}:{}:{}",
            self.seq, self.node, self.cell, self.checksum
        )
    }
}

impl FromStr for GlyphTriplet {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (seq, rest) = s
            .split_once('/')
            .ok_or_else(|| CipherError::malformed(s, "missing sequence separator '/'"))?;
        let seq = canonical_number::<u32>(seq)
            .ok_or_else(|| CipherError::malformed(s, "sequence index is not a number"))?;

        let parts: Vec<&str> = rest.split(':').collect();
        let [node, cell, checksum] = parts.as_slice() else {
            return Err(CipherError::malformed(s, "expected three ':'-separated glyphs"));
        };

        Ok(Self {
            seq,
            node: single_glyph(s, node, "node marker")?,
            cell: parse_cell(s, cell)?,
            checksum: single_glyph(s, checksum, "checksum")?,
        })
    }
}

fn single_glyph(token: &str, part: &str, what: &str) -> Result<Glyph, CipherError> {
    let mut chars = part.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Glyph::from_letter(c)
            .ok_or_else(|| CipherError::malformed(token, format!("{what} {c:?} is not a glyph"))),
        _ => Err(CipherError::malformed(
            token,
            format!("{what} must be a single glyph"),
        )),
    }
}

fn parse_cell(token: &str, part: &str) -> Result<CellGlyph, CipherError> {
    let mut chars = part.chars();
    let (Some(table), Some(glyph)) = (chars.next(), chars.next()) else {
        return Err(CipherError::malformed(token, "cell element too short"));
    };
    let table = TableId::from_letter(table)
        .ok_or_else(|| CipherError::malformed(token, format!("{table:?} is not a table")))?;
    let glyph = Glyph::from_letter(glyph)
        .ok_or_else(|| CipherError::malformed(token, format!("{glyph:?} is not a glyph")))?;
    let rank = canonical_number::<u8>(chars.as_str())
        .ok_or_else(|| CipherError::malformed(token, "cell rank is not a number"))?;

    Ok(CellGlyph { table, glyph, rank })
}

/// Plain decimal digits without sign or leading zeros, so each value has
/// exactly one spelling.
fn canonical_number<N: FromStr>(digits: &str) -> Option<N> {
    let plain = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
    if !plain || (digits.len() > 1 && digits.starts_with('0')) {
        return None;
    }
    digits.parse().ok()
}
