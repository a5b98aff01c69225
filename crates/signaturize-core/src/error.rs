//! Error types for the Signaturize core.

/// Core error type for Signaturize configuration and setup.
#[derive(Debug, thiserror::Error)]
pub enum SignaturizeError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for Signaturize operations.
pub type SignaturizeResult<T> = Result<T, SignaturizeError>;
