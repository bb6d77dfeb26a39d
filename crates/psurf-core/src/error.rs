use thiserror::Error;

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Buffer too short: expected at least {expected} values, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Unsupported surface: {0}")]
    UnsupportedSurface(String),

    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KernelError>;

/// Fail with [`KernelError::BufferTooShort`] unless `len >= expected`.
pub fn ensure_len(len: usize, expected: usize) -> Result<()> {
    if len < expected {
        Err(KernelError::BufferTooShort {
            expected,
            actual: len,
        })
    } else {
        Ok(())
    }
}
