/// Errors that can occur while packing packets or reassembling frames.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// A packet field does not fit its bit width (or NodeType is reserved).
    #[error("{field} value {value} out of range (max {max})")]
    FieldOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    /// The frame holds fewer packets than its declared bit length needs.
    #[error("truncated frame ({available_bits} bits present, {declared_bits} declared)")]
    TruncatedFrame {
        declared_bits: u64,
        available_bits: u64,
    },

    /// Sequence numbers are not contiguous from zero.
    #[error("sequence gap (expected packet {expected}, found {found})")]
    SequenceGap { expected: u32, found: u32 },

    /// The frame holds more packets than its declared bit length needs.
    #[error("excess packets ({actual} present, {expected} expected)")]
    ExcessPackets { expected: usize, actual: usize },

    /// A carry flag on a packet whose NodeType cannot have been lowered.
    #[error("packet {seq} carries NodeType {node_type}, which cannot be a carried unit")]
    InvalidCarry { seq: u32, node_type: u8 },

    /// The declared bit length is not a whole number of bytes.
    #[error("declared bit length {0} is not a multiple of 8")]
    MisalignedBitLength(u64),

    /// Padding bits of the final unit are not zero.
    #[error("non-zero padding in packet {seq}")]
    NonZeroPadding { seq: u32 },
}

pub type Result<T> = std::result::Result<T, FrameError>;
