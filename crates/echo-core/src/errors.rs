//! Error types for echo-core.

use thiserror::Error;

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Arguments that cannot be represented in the wire format.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Fewer bytes than the frame header requires.
    #[error("truncated frame: need at least {need} bytes, got {got}")]
    Truncated { need: usize, got: usize },

    /// Declared body length disagrees with the bytes that follow the header.
    #[error("length mismatch: header declares {declared} bytes, {available} available")]
    LengthMismatch { declared: u64, available: usize },
}

impl CodecError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
