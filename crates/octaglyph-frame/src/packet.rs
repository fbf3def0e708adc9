use std::fmt;

use crate::error::{FrameError, Result};

/// Packet width in bits.
pub const PACKET_BITS: u32 = 13;

pub const NODE_TYPE_BITS: u32 = 3;
pub const OCTAVE_BITS: u32 = 2;
pub const PAYLOAD_BITS: u32 = 8;

/// Highest valid NodeType. 6 and 7 are reserved.
pub const MAX_NODE_TYPE: u8 = 5;
pub const MAX_OCTAVE: u8 = (1 << OCTAVE_BITS) - 1;
pub const MAX_PAYLOAD: u8 = u8::MAX;

const NODE_SHIFT: u32 = OCTAVE_BITS + PAYLOAD_BITS;
const OCTAVE_SHIFT: u32 = PAYLOAD_BITS;
const PACKET_MASK: u16 = (1 << PACKET_BITS) - 1;

/// A validated 13-bit OCTA-13 packet.
///
/// Layout (MSB first):
/// ```text
/// ┌────────────┬────────────┬──────────────┐
/// │ NodeType   │ Octave     │ Payload      │
/// │ 3 bits     │ 2 bits     │ 8 bits       │
/// │ 0-5        │ 0-3        │ 0-255        │
/// └────────────┴────────────┴──────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Packet(u16);

impl Packet {
    /// Build a packet from its fields.
    pub fn pack(node_type: u8, octave: u8, payload: u16) -> Result<Self> {
        if node_type > MAX_NODE_TYPE {
            return Err(FrameError::FieldOutOfRange {
                field: "node_type",
                value: node_type as u32,
                max: MAX_NODE_TYPE as u32,
            });
        }
        if octave > MAX_OCTAVE {
            return Err(FrameError::FieldOutOfRange {
                field: "octave",
                value: octave as u32,
                max: MAX_OCTAVE as u32,
            });
        }
        if payload > MAX_PAYLOAD as u16 {
            return Err(FrameError::FieldOutOfRange {
                field: "payload",
                value: payload as u32,
                max: MAX_PAYLOAD as u32,
            });
        }

        Ok(Self(
            (node_type as u16) << NODE_SHIFT | (octave as u16) << OCTAVE_SHIFT | payload,
        ))
    }

    /// Split a packet into `(node_type, octave, payload)`.
    pub fn unpack(self) -> (u8, u8, u8) {
        (self.node_type(), self.octave(), self.payload())
    }

    /// Validate a raw 13-bit value.
    pub fn from_raw(raw: u16) -> Result<Self> {
        if raw > PACKET_MASK {
            return Err(FrameError::FieldOutOfRange {
                field: "packet",
                value: raw as u32,
                max: PACKET_MASK as u32,
            });
        }
        let node_type = (raw >> NODE_SHIFT) as u8;
        let octave = ((raw >> OCTAVE_SHIFT) & MAX_OCTAVE as u16) as u8;
        Self::pack(node_type, octave, raw & MAX_PAYLOAD as u16)
    }

    /// Wrap a raw value already known to hold a valid NodeType.
    pub(crate) fn from_raw_unchecked(raw: u16) -> Self {
        debug_assert!(raw <= PACKET_MASK && (raw >> NODE_SHIFT) as u8 <= MAX_NODE_TYPE);
        Self(raw)
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    pub fn node_type(self) -> u8 {
        (self.0 >> NODE_SHIFT) as u8
    }

    pub fn octave(self) -> u8 {
        ((self.0 >> OCTAVE_SHIFT) & MAX_OCTAVE as u16) as u8
    }

    pub fn payload(self) -> u8 {
        (self.0 & MAX_PAYLOAD as u16) as u8
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:013b}", self.0)
    }
}
