//! Packet ↔ cell address ↔ glyph triplet.
//!
//! `table = OctaveSelector` and `cell_index = Payload`. An 8-bit payload
//! always lands inside the 529-cell grid, so no reduction is applied.
//! The NodeType does not live in the address; it travels as its own marker
//! glyph, `alphabet[node_type]`, or `alphabet[6 + node_type]` for a carried
//! unit.

use tracing::warn;

use octaglyph_frame::{Packet, SequencedPacket, CARRY_OFFSET, MAX_NODE_TYPE};
use octaglyph_tables::{registry, CellAddress, Glyph, SymbolTableRegistry, TableId};

use crate::checksum::{compute, verify, Checksum};
use crate::error::{CipherError, Result};
use crate::triplet::{CellGlyph, GlyphTriplet};

/// Address of the cell a packet selects.
pub fn to_address(packet: Packet) -> CellAddress {
    // Octave is two bits wide, so every value names a table.
    let table = TableId::ALL[packet.octave() as usize];
    CellAddress {
        table,
        index: packet.payload() as u16,
    }
}

/// Rebuild a packet from its address and the out-of-band NodeType.
pub fn from_address(address: CellAddress, node_type: u8) -> Result<Packet> {
    Packet::pack(node_type, address.table.octave(), address.index).map_err(CipherError::from)
}

/// Marker glyph for a NodeType.
///
/// Only NodeType 0 and 1 can be carried; callers get their values from a
/// valid [`Packet`], so the index stays below 8.
pub fn node_marker(node_type: u8, carry: bool) -> Glyph {
    let offset = if carry { CARRY_OFFSET } else { 0 };
    Glyph::ALL[(node_type + offset) as usize]
}

/// Read a marker glyph back into `(node_type, carry)`.
pub fn node_from_marker(marker: Glyph) -> Option<(u8, bool)> {
    let index = marker.index() as u8;
    match index {
        0..=MAX_NODE_TYPE => Some((index, false)),
        6 | 7 => Some((index - CARRY_OFFSET, true)),
        _ => None,
    }
}

/// Table/cell element for any cell of the grid.
pub fn cell_glyph(address: CellAddress) -> Result<CellGlyph> {
    let glyph = registry().lookup(address.table, address.index as usize)?;
    Ok(CellGlyph {
        table: address.table,
        glyph,
        rank: SymbolTableRegistry::rank_of(address.index),
    })
}

/// Table/cell element for an address reachable by a packet payload.
fn payload_cell_glyph(table: TableId, payload: u8) -> CellGlyph {
    CellGlyph {
        table,
        glyph: registry().payload_glyph(table, payload),
        rank: SymbolTableRegistry::rank_of(payload as u16),
    }
}

/// Encode one sequenced packet as a glyph triplet.
pub fn encode_unit(packet: &SequencedPacket) -> GlyphTriplet {
    let address = to_address(packet.packet);
    GlyphTriplet {
        seq: packet.seq,
        node: node_marker(packet.packet.node_type(), packet.carry),
        cell: payload_cell_glyph(address.table, packet.packet.payload()),
        checksum: compute(address).glyph(),
    }
}

/// Decode one triplet, verifying its checksum before accepting the packet.
pub fn decode_unit(triplet: &GlyphTriplet) -> Result<SequencedPacket> {
    let (node_type, carry) = node_from_marker(triplet.node).ok_or_else(|| {
        CipherError::malformed(
            triplet,
            format!("{} is not a NodeType marker", triplet.node.name()),
        )
    })?;

    let address = registry()
        .resolve(triplet.cell.table, triplet.cell.glyph, triplet.cell.rank)
        .map_err(|err| CipherError::malformed(triplet, err.to_string()))?;

    let checksum = Checksum::from_glyph(triplet.checksum).ok_or_else(|| {
        CipherError::malformed(
            triplet,
            format!("{} is not a checksum glyph", triplet.checksum.name()),
        )
    })?;

    if !verify(address, checksum) {
        let expected = compute(address).value();
        warn!(
            seq = triplet.seq,
            %address,
            expected,
            found = checksum.value(),
            "checksum mismatch"
        );
        return Err(CipherError::ChecksumMismatch {
            seq: triplet.seq,
            expected,
            found: checksum.value(),
        });
    }

    let packet = from_address(address, node_type).map_err(|_| {
        CipherError::malformed(triplet, format!("cell {address} is beyond the payload range"))
    })?;

    Ok(SequencedPacket {
        seq: triplet.seq,
        packet,
        carry,
    })
}

#[cfg(test)]
mod tests {
    use octaglyph_frame::FrameError;

    use super::*;

    fn sequenced(
        seq: u32,
        node_type: u8,
        octave: u8,
        payload: u16,
        carry: bool,
    ) -> SequencedPacket {
        SequencedPacket {
            seq,
            packet: Packet::pack(node_type, octave, payload).unwrap(),
            carry,
        }
    }

    #[test]
    fn address_uses_octave_and_payload() {
        let addr = to_address(Packet::pack(3, 2, 200).unwrap());
        assert_eq!(addr.table, TableId::C);
        assert_eq!(addr.index, 200);
    }

    #[test]
    fn from_address_inverts_to_address() {
        for raw in 0..0x1800u16 {
            let packet = Packet::from_raw(raw).unwrap();
            let addr = to_address(packet);
            assert_eq!(from_address(addr, packet.node_type()).unwrap(), packet);
        }
    }

    #[test]
    fn from_address_rejects_cells_beyond_payload() {
        let addr = CellAddress::new(TableId::A, 300).unwrap();
        assert!(matches!(
            from_address(addr, 0),
            Err(CipherError::Frame(FrameError::FieldOutOfRange {
                field: "payload",
                ..
            }))
        ));
    }

    #[test]
    fn markers_cover_node_types_and_carries() {
        for node_type in 0..=MAX_NODE_TYPE {
            let marker = node_marker(node_type, false);
            assert_eq!(node_from_marker(marker), Some((node_type, false)));
        }
        for node_type in 0..2 {
            let marker = node_marker(node_type, true);
            assert_eq!(marker.index(), 6 + node_type as usize);
            assert_eq!(node_from_marker(marker), Some((node_type, true)));
        }
        assert_eq!(node_from_marker(Glyph::Gon), None);
        assert_eq!(node_from_marker(Glyph::Gisg), None);
    }

    #[test]
    fn cell_glyph_matches_encoded_cell() {
        let packet = sequenced(0, 5, 3, 200, false);
        let address = to_address(packet.packet);
        assert_eq!(cell_glyph(address).unwrap(), encode_unit(&packet).cell);

        let far = cell_glyph(CellAddress::new(TableId::C, 528).unwrap()).unwrap();
        assert_eq!(far.rank, 25);
        assert_eq!(far.glyph, Glyph::Gal);
        assert!(cell_glyph(CellAddress {
            table: TableId::C,
            index: 529
        })
        .is_err());
    }

    #[test]
    fn carried_unit_roundtrips() {
        let packet = sequenced(9, 1, 3, 255, true);
        let triplet = encode_unit(&packet);
        assert_eq!(triplet.node, Glyph::Tal);
        assert_eq!(decode_unit(&triplet).unwrap(), packet);
    }

    #[test]
    fn unit_roundtrips_for_every_packet() {
        for raw in 0..0x1800u16 {
            let packet = SequencedPacket {
                seq: raw as u32,
                packet: Packet::from_raw(raw).unwrap(),
                carry: false,
            };
            let triplet = encode_unit(&packet);
            assert_eq!(decode_unit(&triplet).unwrap(), packet);
        }
    }

    #[test]
    fn hello_first_unit_renders_as_expected() {
        let triplet = encode_unit(&sequenced(0, 2, 1, 8, false));
        assert_eq!(triplet.to_string(), "0/G:BI0:Q");
    }

    #[test]
    fn wrong_checksum_is_a_mismatch() {
        let mut triplet = encode_unit(&sequenced(4, 1, 3, 77, false));
        let good = Checksum::from_glyph(triplet.checksum).unwrap().value();
        triplet.checksum = Checksum::new((good + 1) % 16).unwrap().glyph();

        let err = decode_unit(&triplet).unwrap_err();
        assert!(matches!(
            err,
            CipherError::ChecksumMismatch { seq: 4, expected, found }
                if expected == good && found == (good + 1) % 16
        ));
    }

    #[test]
    fn non_checksum_glyph_is_malformed() {
        let mut triplet = encode_unit(&sequenced(0, 0, 0, 0, false));
        triplet.checksum = Glyph::Ceph;
        assert!(matches!(
            decode_unit(&triplet),
            Err(CipherError::MalformedGlyphTriplet { .. })
        ));
    }

    #[test]
    fn unknown_marker_is_malformed() {
        let mut triplet = encode_unit(&sequenced(0, 0, 0, 0, false));
        triplet.node = Glyph::Na;
        assert!(matches!(
            decode_unit(&triplet),
            Err(CipherError::MalformedGlyphTriplet { .. })
        ));
    }

    #[test]
    fn cell_beyond_payload_range_is_malformed() {
        // Rank 20 of Pa is cell 420: a real cell, but no packet addresses it.
        let address = CellAddress::new(TableId::A, 420).unwrap();
        let triplet = GlyphTriplet {
            seq: 0,
            node: Glyph::Pa,
            cell: CellGlyph {
                table: TableId::A,
                glyph: Glyph::Pa,
                rank: 20,
            },
            checksum: compute(address).glyph(),
        };
        assert!(matches!(
            decode_unit(&triplet),
            Err(CipherError::MalformedGlyphTriplet { .. })
        ));
    }

    #[test]
    fn rank_past_glyph_set_is_malformed() {
        let mut triplet = encode_unit(&sequenced(0, 0, 0, 4, false));
        triplet.cell.rank = 25;
        assert!(matches!(
            decode_unit(&triplet),
            Err(CipherError::MalformedGlyphTriplet { .. })
        ));
    }
}
