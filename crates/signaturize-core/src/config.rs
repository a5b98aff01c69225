//! Configuration for request signing and verification.
//!
//! Provides [`SignaturizeConfig`]. Values can be built in code with the typed
//! builder or loaded from environment variables.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::algorithm::{CanonicalEncoding, SignatureAlgorithm};
use crate::error::SignaturizeResult;

/// Default freshness window: thirty minutes.
pub const DEFAULT_FRESHNESS_WINDOW_SECS: u64 = 1800;

/// Signing and verification configuration.
///
/// # Examples
///
/// ```
/// use signaturize_core::{SignatureAlgorithm, SignaturizeConfig};
///
/// let config = SignaturizeConfig::default();
/// assert_eq!(config.freshness_window_secs, 1800);
/// assert_eq!(config.algorithm, SignatureAlgorithm::HmacSha256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct SignaturizeConfig {
    /// Maximum distance, in seconds, between a request timestamp and the
    /// verifier's clock. The boundary itself is accepted.
    #[builder(default = DEFAULT_FRESHNESS_WINDOW_SECS)]
    pub freshness_window_secs: u64,

    /// Keyed digest used for signatures.
    #[builder(default)]
    pub algorithm: SignatureAlgorithm,

    /// Canonical string encoding.
    #[builder(default)]
    pub canonical_encoding: CanonicalEncoding,
}

impl Default for SignaturizeConfig {
    fn default() -> Self {
        Self {
            freshness_window_secs: DEFAULT_FRESHNESS_WINDOW_SECS,
            algorithm: SignatureAlgorithm::default(),
            canonical_encoding: CanonicalEncoding::default(),
        }
    }
}

impl SignaturizeConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SIGNATURIZE_FRESHNESS_WINDOW` | `1800` |
    /// | `SIGNATURIZE_ALGORITHM` | `hmac-sha256` |
    /// | `SIGNATURIZE_CANONICAL_ENCODING` | `escaped` |
    ///
    /// # Errors
    ///
    /// Returns [`SignaturizeError::Config`](crate::SignaturizeError::Config) for an
    /// unknown algorithm or encoding, and
    /// [`SignaturizeError::Internal`](crate::SignaturizeError::Internal) when the
    /// freshness window is not a non-negative integer.
    pub fn from_env() -> SignaturizeResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration using an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SignaturizeResult<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup("SIGNATURIZE_FRESHNESS_WINDOW") {
            config.freshness_window_secs = v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid SIGNATURIZE_FRESHNESS_WINDOW: {v}"))?;
        }
        if let Some(v) = lookup("SIGNATURIZE_ALGORITHM") {
            config.algorithm = v.trim().parse()?;
        }
        if let Some(v) = lookup("SIGNATURIZE_CANONICAL_ENCODING") {
            config.canonical_encoding = v.trim().parse()?;
        }

        Ok(config)
    }
}
