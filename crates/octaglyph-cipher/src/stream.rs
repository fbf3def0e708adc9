use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CipherError;
use crate::triplet::GlyphTriplet;

/// Leading tag of the text form.
pub const STREAM_TAG: &str = "OCTA13";

/// An encoded message: ordered triplets plus the true bit length of the data.
///
/// Text form is `OCTA13 {bit_len}` followed by whitespace-separated triplet
/// tokens:
///
/// ```text
/// OCTA13 40 0/G:BI0:Q 1/A:BM2:I 2/C:CU1:G 3/F:AB0:B
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphStream {
    pub bit_len: u64,
    pub triplets: Vec<GlyphTriplet>,
}

impl GlyphStream {
    pub fn len(&self) -> usize {
        self.triplets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triplets.is_empty()
    }
}

impl fmt::Display for GlyphStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{STREAM_TAG} {}", self.bit_len)?;
        for triplet in &self.triplets {
            write!(f, " {triplet}")?;
        }
        Ok(())
    }
}

impl FromStr for GlyphStream {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();

        match tokens.next() {
            Some(tag) if tag == STREAM_TAG => {}
            Some(other) => {
                return Err(CipherError::MalformedHeader(format!(
                    "expected {STREAM_TAG:?}, found {other:?}"
                )))
            }
            None => return Err(CipherError::MalformedHeader("empty stream".into())),
        }

        let bit_len = tokens
            .next()
            .ok_or_else(|| CipherError::MalformedHeader("missing bit length".into()))?;
        let bit_len = bit_len.parse::<u64>().map_err(|_| {
            CipherError::MalformedHeader(format!("bit length {bit_len:?} is not a number"))
        })?;

        let triplets = tokens
            .map(str::parse::<GlyphTriplet>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { bit_len, triplets })
    }
}
