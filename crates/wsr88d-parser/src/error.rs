//! Error types for WSR-88D decoding operations.

use thiserror::Error;

/// Result type for decoder operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Error types for WSR-88D decoding.
///
/// A decode either produces a fully populated message or one of these
/// errors; partially populated structures are never returned.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Fewer bytes remain than the field being read requires
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    /// A field that selects the layout of what follows holds an unknown value
    #[error("Invalid {field}: {value}")]
    InvalidDiscriminator { field: &'static str, value: i64 },

    /// A range-checked field holds a value outside its valid range
    #[error("Invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    /// A decoder consumed more bytes than the message declared
    #[error("Size mismatch: declared {declared} bytes, consumed {consumed}")]
    SizeMismatch { declared: usize, consumed: usize },

    /// Compressed or otherwise unsupported payload encoding
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// A segment of a multi-segment message was decoded on its own
    #[error("Incomplete message: segment {received} of {total}")]
    IncompleteMessage { received: u16, total: u16 },

    /// zlib stream could not be inflated
    #[error("Decompression failed: {0}")]
    Decompression(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DecodeError {
    pub fn truncated(needed: usize, remaining: usize) -> Self {
        Self::TruncatedInput { needed, remaining }
    }

    pub fn invalid_discriminator(field: &'static str, value: impl Into<i64>) -> Self {
        Self::InvalidDiscriminator {
            field,
            value: value.into(),
        }
    }

    pub fn invalid_field(field: &'static str, value: impl std::fmt::Display) -> Self {
        Self::InvalidField {
            field,
            value: value.to_string(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedEncoding(msg.into())
    }

    /// Whether the error was caused by running out of input.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}
