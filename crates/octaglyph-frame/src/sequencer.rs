use bytes::Bytes;
use tracing::debug;

use crate::bits::{BitReader, BitWriter};
use crate::error::{FrameError, Result};
use crate::packet::{Packet, MAX_NODE_TYPE, OCTAVE_BITS, PACKET_BITS, PAYLOAD_BITS};

/// Amount a reserved NodeType is lowered by when its unit is carried.
pub const CARRY_OFFSET: u8 = 6;

const NODE_SHIFT: u32 = OCTAVE_BITS + PAYLOAD_BITS;
const LOW_FIELDS_MASK: u16 = (1 << NODE_SHIFT) - 1;

/// A packet with its position in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequencedPacket {
    /// Position in the frame, numbered from zero.
    pub seq: u32,
    pub packet: Packet,
    /// Set when the source unit's leading field held a reserved NodeType
    /// (6 or 7). The packet stores that field lowered by [`CARRY_OFFSET`].
    pub carry: bool,
}

impl SequencedPacket {
    /// Build the packet for a 13-bit data unit.
    pub fn from_unit(seq: u32, unit: u16) -> Self {
        let node_type = (unit >> NODE_SHIFT) as u8;
        let carry = node_type > MAX_NODE_TYPE;
        let node_type = if carry {
            node_type - CARRY_OFFSET
        } else {
            node_type
        };
        let raw = (node_type as u16) << NODE_SHIFT | (unit & LOW_FIELDS_MASK);

        Self {
            seq,
            packet: Packet::from_raw_unchecked(raw),
            carry,
        }
    }

    /// Recover the 13-bit data unit.
    pub fn unit(&self) -> Result<u16> {
        if !self.carry {
            return Ok(self.packet.raw());
        }

        let node_type = self.packet.node_type();
        if node_type + CARRY_OFFSET > 7 {
            return Err(FrameError::InvalidCarry {
                seq: self.seq,
                node_type,
            });
        }
        let lifted = (node_type + CARRY_OFFSET) as u16;
        Ok(lifted << NODE_SHIFT | (self.packet.raw() & LOW_FIELDS_MASK))
    }
}

/// One logical message: the ordered packets plus the true bit length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Bits of real data, before padding.
    pub bit_len: u64,
    pub packets: Vec<SequencedPacket>,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Reassemble the original bytes.
    pub fn reassemble(&self) -> Result<Bytes> {
        reassemble(&self.packets, self.bit_len)
    }
}

/// Number of 13-bit units needed to carry `bits`, saturating at `usize::MAX`.
pub fn units_for_bits(bits: u64) -> usize {
    usize::try_from(bits.div_ceil(PACKET_BITS as u64)).unwrap_or(usize::MAX)
}

/// Cut a byte buffer into 13-bit units, one packet per unit.
///
/// The final unit is zero padded on its low-order end. The frame records the
/// unpadded bit length so [`reassemble`] can drop the padding exactly.
pub fn split(bytes: &[u8]) -> Frame {
    let bit_len = bytes.len() as u64 * 8;
    let mut reader = BitReader::new(bytes);
    let mut packets = Vec::with_capacity(units_for_bits(bit_len));

    let mut seq = 0u32;
    while let Some(unit) = reader.read_padded(PACKET_BITS) {
        packets.push(SequencedPacket::from_unit(seq, unit as u16));
        seq += 1;
    }

    let carried = packets.iter().filter(|p| p.carry).count();
    debug!(bit_len, packets = packets.len(), carried, "split frame");

    Frame { bit_len, packets }
}

/// Rebuild the byte buffer from an ordered packet sequence.
///
/// Packets must be numbered `0..N-1` in order, and `N` must be exactly the
/// number of units `declared_bit_length` needs. Out-of-order delivery is
/// rejected, not reordered.
pub fn reassemble(packets: &[SequencedPacket], declared_bit_length: u64) -> Result<Bytes> {
    for (expected, packet) in packets.iter().enumerate() {
        if packet.seq as usize != expected {
            return Err(FrameError::SequenceGap {
                expected: expected as u32,
                found: packet.seq,
            });
        }
    }

    let needed = units_for_bits(declared_bit_length);
    if packets.len() < needed {
        return Err(FrameError::TruncatedFrame {
            declared_bits: declared_bit_length,
            available_bits: packets.len() as u64 * PACKET_BITS as u64,
        });
    }
    if packets.len() > needed {
        return Err(FrameError::ExcessPackets {
            expected: needed,
            actual: packets.len(),
        });
    }
    if declared_bit_length % 8 != 0 {
        return Err(FrameError::MisalignedBitLength(declared_bit_length));
    }

    let byte_len = (declared_bit_length / 8) as usize;
    let mut writer = BitWriter::with_capacity(byte_len + 2);
    for packet in packets {
        writer.write_bits(packet.unit()? as u32, PACKET_BITS);
    }

    if let Some(last) = packets.last() {
        let padding = needed as u64 * PACKET_BITS as u64 - declared_bit_length;
        let mask = (1u16 << padding) - 1;
        if last.unit()? & mask != 0 {
            return Err(FrameError::NonZeroPadding { seq: last.seq });
        }
    }

    let mut buf = writer.finish();
    buf.truncate(byte_len);
    debug!(
        bit_len = declared_bit_length,
        packets = packets.len(),
        "reassembled frame"
    );
    Ok(buf.freeze())
}
