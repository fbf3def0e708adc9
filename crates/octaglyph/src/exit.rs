use std::fmt;
use std::io;

use octaglyph_cipher::CipherError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const SELF_CHECK_FAILED: i32 = 30;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

/// Map a codec error to an exit code. Anything wrong with the input data
/// itself is `DATA_INVALID`; only I/O failures fall through to `io_error`.
pub fn cipher_error(context: &str, err: CipherError) -> CliError {
    match err {
        CipherError::Io(source) => io_error(context, source),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use octaglyph_frame::FrameError;

    use super::*;

    #[test]
    fn data_errors_are_data_invalid() {
        let errors = [
            CipherError::ChecksumMismatch {
                seq: 1,
                expected: 6,
                found: 7,
            },
            CipherError::InvalidMagic,
            CipherError::StreamClosed,
            CipherError::Frame(FrameError::SequenceGap {
                expected: 1,
                found: 2,
            }),
        ];
        for err in errors {
            assert_eq!(cipher_error("decode failed", err).code, DATA_INVALID);
        }
    }

    #[test]
    fn io_errors_keep_their_kind() {
        let err = CipherError::Io(io::Error::from(io::ErrorKind::PermissionDenied));
        let cli = cipher_error("read failed", err);
        assert_eq!(cli.code, PERMISSION_DENIED);
        assert!(cli.message.starts_with("read failed: "));

        let missing = io_error("open", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(missing.code, FAILURE);
    }
}
