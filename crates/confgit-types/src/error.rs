use thiserror::Error;

/// Errors from parsing or validating core types.
#[derive(Debug, Error)]
pub enum TypeError {
    /// The input is not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The decoded value has the wrong length.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
