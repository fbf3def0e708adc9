use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::debug;

use crate::cipher::encode;
use crate::config::CipherConfig;
use crate::error::{CipherError, Result};
use crate::stream::GlyphStream;
use crate::wire::encode_stream;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes binary glyph streams to any `Write` sink.
pub struct GlyphStreamWriter<T> {
    inner: T,
    buf: BytesMut,
    config: CipherConfig,
}

impl<T: Write> GlyphStreamWriter<T> {
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

    /// Write an already encoded stream (blocking).
    pub fn write_stream(&mut self, stream: &GlyphStream) -> Result<()> {
        if stream.len() > self.config.max_triplets {
            return Err(CipherError::TooManyTriplets {
                count: stream.len(),
                max: self.config.max_triplets,
            });
        }

        self.buf.clear();
        encode_stream(stream, &mut self.buf)?;

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(CipherError::StreamClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(CipherError::Io(err)),
            }
        }
        debug!(
            bit_len = stream.bit_len,
            triplets = stream.len(),
            wire_bytes = self.buf.len(),
            "wrote glyph stream"
        );

        self.flush()
    }

    /// Encode a byte buffer and write the resulting stream.
    pub fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.config.check_input(bytes.len())?;
        self.write_stream(&encode(bytes))
    }

    /// Flush the underlying stream, retrying on `Interrupted` and `WouldBlock`.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(CipherError::Io(err)),
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Limits this writer enforces.
    pub fn config(&self) -> &CipherConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::cipher::decode;
    use crate::wire::decode_stream;

    fn written(writer: GlyphStreamWriter<Cursor<Vec<u8>>>) -> BytesMut {
        BytesMut::from(writer.into_inner().into_inner().as_slice())
    }

    #[test]
    fn write_single_stream() {
        let mut writer = GlyphStreamWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.send(b"hello").unwrap();

        let mut wire = written(writer);
        let stream = decode_stream(&mut wire, usize::MAX).unwrap().unwrap();
        assert_eq!(decode(&stream).unwrap().as_ref(), b"hello");
        assert!(wire.is_empty());
    }

    #[test]
    fn write_multiple_streams() {
        let mut writer = GlyphStreamWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.send(b"one").unwrap();
        writer.write_stream(&encode(b"two")).unwrap();

        let mut wire = written(writer);
        let s1 = decode_stream(&mut wire, usize::MAX).unwrap().unwrap();
        let s2 = decode_stream(&mut wire, usize::MAX).unwrap().unwrap();
        assert_eq!(decode(&s1).unwrap().as_ref(), b"one");
        assert_eq!(decode(&s2).unwrap().as_ref(), b"two");
    }

    #[test]
    fn input_too_large_rejected() {
        let cfg = CipherConfig::for_input_limit(4);
        let mut writer = GlyphStreamWriter::with_config(Cursor::new(Vec::<u8>::new()), cfg);

        let err = writer.send(b"oversized").unwrap_err();
        assert!(matches!(
            err,
            CipherError::InputTooLarge { size: 9, max: 4 }
        ));
        assert!(written(writer).is_empty());
    }

    #[test]
    fn stream_over_triplet_limit_rejected() {
        let cfg = CipherConfig::for_input_limit(1);
        let mut writer = GlyphStreamWriter::with_config(Cursor::new(Vec::<u8>::new()), cfg);

        let err = writer.write_stream(&encode(b"abcd")).unwrap_err();
        assert!(matches!(err, CipherError::TooManyTriplets { max: 1, .. }));
    }

    #[test]
    fn flush_propagates() {
        let sink = FlushTrackingWriter::default();
        let flag = Arc::clone(&sink.flushed);
        let mut writer = GlyphStreamWriter::new(sink);

        writer.send(b"x").unwrap();

        assert!(flag.load(Ordering::SeqCst));
        assert!(!writer.get_ref().data.is_empty());
    }

    #[test]
    fn handles_interrupted_write_and_flush() {
        let mut writer = GlyphStreamWriter::new(FlakyWriter::new(ErrorKind::Interrupted));
        writer.send(b"retry").unwrap();
        assert!(!writer.into_inner().data.is_empty());
    }

    #[test]
    fn handles_would_block_write_and_flush() {
        let mut writer = GlyphStreamWriter::new(FlakyWriter::new(ErrorKind::WouldBlock));
        writer.send(b"retry").unwrap();
        assert!(!writer.into_inner().data.is_empty());
    }

    #[test]
    fn stream_closed_when_write_returns_zero() {
        let mut writer = GlyphStreamWriter::new(ZeroWriter);
        let err = writer.send(b"x").unwrap_err();
        assert!(matches!(err, CipherError::StreamClosed));
    }

    #[test]
    fn written_bytes_read_back() {
        let mut writer = GlyphStreamWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.send(b"z").unwrap();

        let wire = writer.into_inner().into_inner();
        let mut reader = crate::reader::GlyphStreamReader::new(Cursor::new(wire));
        let stream = reader.read_stream().unwrap();
        assert_eq!(decode(&stream).unwrap().as_ref(), b"z");
    }

    #[derive(Default)]
    struct FlushTrackingWriter {
        flushed: Arc<AtomicBool>,
        data: Vec<u8>,
    }

    impl Write for FlushTrackingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Fails the first write and the first flush with `kind`, then succeeds.
    struct FlakyWriter {
        kind: ErrorKind,
        wrote_once: bool,
        flushed_once: bool,
        data: Vec<u8>,
    }

    impl FlakyWriter {
        fn new(kind: ErrorKind) -> Self {
            Self {
                kind,
                wrote_once: false,
                flushed_once: false,
                data: Vec::new(),
            }
        }
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.wrote_once {
                self.wrote_once = true;
                return Err(std::io::Error::from(self.kind));
            }
            // Short writes exercise the offset loop.
            let n = buf.len().min(5);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            if !self.flushed_once {
                self.flushed_once = true;
                return Err(std::io::Error::from(self.kind));
            }
            Ok(())
        }
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
