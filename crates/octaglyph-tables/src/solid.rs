//! NodeType values and the solids they stand for.
//!
//! NodeType 0-5 map to the six solids below.
//! NodeType 6 and 7 are reserved.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of valid NodeType values.
pub const SOLID_COUNT: usize = 6;

/// The solid a NodeType selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Solid {
    Tetrahedron,
    Hexahedron,
    Octahedron,
    Dodecahedron,
    Icosahedron,
    Sphere,
}

impl Solid {
    /// All solids in NodeType order.
    pub const ALL: [Solid; SOLID_COUNT] = [
        Solid::Tetrahedron,
        Solid::Hexahedron,
        Solid::Octahedron,
        Solid::Dodecahedron,
        Solid::Icosahedron,
        Solid::Sphere,
    ];

    /// The solid for a NodeType, or `None` for reserved values.
    pub const fn from_node_type(node_type: u8) -> Option<Solid> {
        if (node_type as usize) < SOLID_COUNT {
            Some(Self::ALL[node_type as usize])
        } else {
            None
        }
    }

    pub const fn node_type(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Solid::Tetrahedron => "tetrahedron",
            Solid::Hexahedron => "hexahedron",
            Solid::Octahedron => "octahedron",
            Solid::Dodecahedron => "dodecahedron",
            Solid::Icosahedron => "icosahedron",
            Solid::Sphere => "sphere",
        }
    }

    /// Classical element attributed to the solid.
    pub const fn element(self) -> &'static str {
        match self {
            Solid::Tetrahedron => "fire",
            Solid::Hexahedron => "earth",
            Solid::Octahedron => "air",
            Solid::Dodecahedron => "aether",
            Solid::Icosahedron => "water",
            Solid::Sphere => "spirit",
        }
    }
}

impl fmt::Display for Solid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
