//! MSB-first bit reading and writing.
//!
//! The reader pads a short final read with zero bits on the low-order end.
//! The writer pads its final partial byte with zeros. Neither tracks the
//! true length of the data; the frame header does that.

use bytes::{BufMut, BytesMut};

/// Reads bits MSB-first from a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Bits not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.position
    }

    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.position / 8)?;
        let bit = (byte >> (7 - self.position % 8)) & 1 == 1;
        self.position += 1;
        Some(bit)
    }

    /// Read a `count`-bit group (`count <= 32`).
    ///
    /// Returns `None` once the input is exhausted. A group that runs past the
    /// end of the input is completed with zero bits on the low-order end.
    pub fn read_padded(&mut self, count: u32) -> Option<u32> {
        debug_assert!(count <= 32);
        if self.remaining() == 0 {
            return None;
        }

        let mut value = 0u32;
        for _ in 0..count {
            value <<= 1;
            if let Some(true) = self.read_bit() {
                value |= 1;
            }
        }
        Some(value)
    }
}

/// Writes bits MSB-first into a growable buffer.
#[derive(Debug, Default)]
pub struct BitWriter {
    buf: BytesMut,
    acc: u8,
    filled: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Write the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, count: u32) {
        debug_assert!(count <= 32);
        for shift in (0..count).rev() {
            let bit = ((value >> shift) & 1) as u8;
            self.acc |= bit << (7 - self.filled);
            self.filled += 1;
            if self.filled == 8 {
                self.buf.put_u8(self.acc);
                self.acc = 0;
                self.filled = 0;
            }
        }
    }

    /// Total bits written so far.
    pub fn bit_len(&self) -> usize {
        self.buf.len() * 8 + self.filled as usize
    }

    /// Flush the partial byte (zero padded) and return the buffer.
    pub fn finish(mut self) -> BytesMut {
        if self.filled > 0 {
            self.buf.put_u8(self.acc);
        }
        self.buf
    }
}
