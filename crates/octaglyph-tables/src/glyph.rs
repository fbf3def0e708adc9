//! The 21-letter Enochian alphabet.
//!
//! Letters are kept in Dee's traditional order. The order is a protocol
//! constant: a glyph's position in [`Glyph::ALL`] is what the tables, node
//! markers and checksum glyphs are built from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Number of glyphs in the alphabet.
pub const ALPHABET_LEN: usize = 21;

/// One letter of the Enochian alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Glyph {
    Pa,
    Veh,
    Ged,
    Gal,
    Orth,
    Un,
    Graph,
    Tal,
    Gon,
    Na,
    Ur,
    Mals,
    Ger,
    Drux,
    Pal,
    Med,
    Don,
    Ceph,
    Van,
    Fam,
    Gisg,
}

impl Glyph {
    /// The alphabet, in protocol order.
    pub const ALL: [Glyph; ALPHABET_LEN] = [
        Glyph::Pa,
        Glyph::Veh,
        Glyph::Ged,
        Glyph::Gal,
        Glyph::Orth,
        Glyph::Un,
        Glyph::Graph,
        Glyph::Tal,
        Glyph::Gon,
        Glyph::Na,
        Glyph::Ur,
        Glyph::Mals,
        Glyph::Ger,
        Glyph::Drux,
        Glyph::Pal,
        Glyph::Med,
        Glyph::Don,
        Glyph::Ceph,
        Glyph::Van,
        Glyph::Fam,
        Glyph::Gisg,
    ];

    /// Position of this glyph in the alphabet.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The glyph at `index`, if the index is inside the alphabet.
    pub const fn from_index(index: usize) -> Option<Glyph> {
        if index < ALPHABET_LEN {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Traditional letter name.
    pub const fn name(self) -> &'static str {
        match self {
            Glyph::Pa => "Pa",
            Glyph::Veh => "Veh",
            Glyph::Ged => "Ged",
            Glyph::Gal => "Gal",
            Glyph::Orth => "Orth",
            Glyph::Un => "Un",
            Glyph::Graph => "Graph",
            Glyph::Tal => "Tal",
            Glyph::Gon => "Gon",
            Glyph::Na => "Na",
            Glyph::Ur => "Ur",
            Glyph::Mals => "Mals",
            Glyph::Ger => "Ger",
            Glyph::Drux => "Drux",
            Glyph::Pal => "Pal",
            Glyph::Med => "Med",
            Glyph::Don => "Don",
            Glyph::Ceph => "Ceph",
            Glyph::Van => "Van",
            Glyph::Fam => "Fam",
            Glyph::Gisg => "Gisg",
        }
    }

    /// Latin transliteration. Distinct for every glyph.
    pub const fn letter(self) -> char {
        match self {
            Glyph::Pa => 'B',
            Glyph::Veh => 'C',
            Glyph::Ged => 'G',
            Glyph::Gal => 'D',
            Glyph::Orth => 'F',
            Glyph::Un => 'A',
            Glyph::Graph => 'E',
            Glyph::Tal => 'M',
            Glyph::Gon => 'I',
            Glyph::Na => 'H',
            Glyph::Ur => 'L',
            Glyph::Mals => 'P',
            Glyph::Ger => 'Q',
            Glyph::Drux => 'N',
            Glyph::Pal => 'X',
            Glyph::Med => 'O',
            Glyph::Don => 'R',
            Glyph::Ceph => 'Z',
            Glyph::Van => 'U',
            Glyph::Fam => 'S',
            Glyph::Gisg => 'T',
        }
    }

    /// Parse a transliteration letter (case-insensitive).
    pub fn from_letter(letter: char) -> Option<Glyph> {
        let upper = letter.to_ascii_uppercase();
        Self::ALL.iter().copied().find(|g| g.letter() == upper)
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Glyph {
    type Err = TableError;

    /// Accepts either the transliteration letter or the letter name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Glyph::from_letter(c)
                .ok_or_else(|| TableError::UnknownGlyph(s.to_string()));
        }

        Glyph::ALL
            .iter()
            .copied()
            .find(|g| g.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TableError::UnknownGlyph(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn alphabet_order_matches_indices() {
        for (i, glyph) in Glyph::ALL.iter().enumerate() {
            assert_eq!(glyph.index(), i);
            assert_eq!(Glyph::from_index(i), Some(*glyph));
        }
        assert_eq!(Glyph::from_index(ALPHABET_LEN), None);
    }

    #[test]
    fn letters_and_names_are_distinct() {
        let letters: HashSet<char> = Glyph::ALL.iter().map(|g| g.letter()).collect();
        let names: HashSet<&str> = Glyph::ALL.iter().map(|g| g.name()).collect();
        assert_eq!(letters.len(), ALPHABET_LEN);
        assert_eq!(names.len(), ALPHABET_LEN);
    }

    #[test]
    fn parse_letter_and_name() {
        assert_eq!("B".parse::<Glyph>().unwrap(), Glyph::Pa);
        assert_eq!("b".parse::<Glyph>().unwrap(), Glyph::Pa);
        assert_eq!("gisg".parse::<Glyph>().unwrap(), Glyph::Gisg);
        assert_eq!(Glyph::from_letter('t'), Some(Glyph::Gisg));
    }

    #[test]
    fn parse_rejects_letters_outside_alphabet() {
        // J, K, V, W and Y have no glyph of their own.
        for letter in ["J", "K", "V", "W", "Y", "", "Zeta"] {
            assert!(matches!(
                letter.parse::<Glyph>(),
                Err(TableError::UnknownGlyph(_))
            ));
        }
    }

    #[test]
    fn display_is_the_letter() {
        assert_eq!(Glyph::Ceph.to_string(), "Z");
    }
}
