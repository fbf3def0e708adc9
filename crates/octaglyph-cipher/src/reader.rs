use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use tracing::debug;

use crate::config::CipherConfig;
use crate::error::{CipherError, Result};
use crate::stream::GlyphStream;
use crate::wire::decode_stream;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete binary glyph streams from any `Read` source.
///
/// Handles partial reads internally; callers always get whole streams.
pub struct GlyphStreamReader<T> {
    inner: T,
    buf: BytesMut,
    config: CipherConfig,
}

impl<T: Read> GlyphStreamReader<T> {
    /// Wrap a stream with the default limits.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, CipherConfig::default())
    }

    /// Wrap a stream with explicit limits.
    pub fn with_config(inner: T, config: CipherConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete stream (blocking).
    ///
    /// Returns `Err(CipherError::StreamClosed)` when EOF is reached first.
    pub fn read_stream(&mut self) -> Result<GlyphStream> {
        loop {
            if let Some(stream) = decode_stream(&mut self.buf, self.config.max_triplets)? {
                debug!(
                    bit_len = stream.bit_len,
                    triplets = stream.len(),
                    "read glyph stream"
                );
                return Ok(stream);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CipherError::Io(err)),
            };

            if read == 0 {
                return Err(CipherError::StreamClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Read every remaining stream until a clean EOF.
    ///
    /// EOF in the middle of a stream is still `StreamClosed`.
    pub fn read_all(&mut self) -> Result<Vec<GlyphStream>> {
        let mut streams = Vec::new();
        loop {
            match self.read_stream() {
                Ok(stream) => streams.push(stream),
                Err(CipherError::StreamClosed) if self.buf.is_empty() => return Ok(streams),
                Err(err) => return Err(err),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Limits this reader enforces.
    pub fn config(&self) -> &CipherConfig {
        &self.config
    }
}
