//! 13-bit OCTA-13 packet codec and frame sequencing.
//!
//! A packet packs three fields into 13 bits:
//! - NodeType (3 bits, 0-5; 6 and 7 reserved)
//! - OctaveSelector (2 bits, 0-3)
//! - Payload (8 bits)
//!
//! A frame is a byte buffer cut into 13-bit units, one packet per unit,
//! numbered in order. Reassembly is strict: gaps, truncation and surplus
//! packets are errors, never repaired.

pub mod bits;
pub mod error;
pub mod packet;
pub mod sequencer;

pub use error::{FrameError, Result};
pub use packet::{
    Packet, MAX_NODE_TYPE, MAX_OCTAVE, MAX_PAYLOAD, NODE_TYPE_BITS, OCTAVE_BITS, PACKET_BITS,
    PAYLOAD_BITS,
};
pub use sequencer::{reassemble, split, units_for_bits, Frame, SequencedPacket, CARRY_OFFSET};
