//! Error types for request signing and verification.
//!
//! All failures are represented by [`AuthError`]. Every variant is terminal:
//! nothing in this crate retries or falls back, the caller decides how to
//! respond (typically with an authorization-denied status).

/// Errors that can occur while signing or verifying a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The request timestamp is further from the verifier's clock than the
    /// freshness window allows.
    #[error("Request has expired: timestamp {timestamp} is outside {window}s of {now}")]
    Expired {
        /// Timestamp carried by the request.
        timestamp: i64,
        /// Verifier clock reading.
        now: i64,
        /// Configured freshness window in seconds.
        window: u64,
    },

    /// The public key was not found in the key store.
    #[error("Unknown credential: {0}")]
    UnknownCredential(String),

    /// The presented signature does not match the recomputed one.
    #[error("Signature does not match")]
    InvalidSignature,

    /// A parameter cannot be canonicalized.
    #[error("Malformed parameter {key:?}: {reason}")]
    MalformedParameter {
        /// Offending parameter key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A required out-of-band field (header or body entry) is absent.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// An out-of-band field is present but cannot be parsed or encoded.
    #[error("Invalid field: {0}")]
    InvalidField(String),
}

impl AuthError {
    pub(crate) fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedParameter {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
