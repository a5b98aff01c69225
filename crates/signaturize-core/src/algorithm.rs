//! Signing algorithm and canonical encoding selectors.

use std::fmt;
use std::str::FromStr;

use crate::error::SignaturizeError;

/// Keyed digest used to produce request signatures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureAlgorithm {
    /// HMAC over SHA-256. Produces 64 hex characters.
    #[default]
    HmacSha256,
    /// HMAC over SHA-512. Produces 128 hex characters.
    HmacSha512,
    /// HMAC over SHA-1. Only for interoperating with legacy signers.
    HmacSha1,
}

impl SignatureAlgorithm {
    /// Identifier used in configuration and environment variables.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HmacSha256 => "hmac-sha256",
            Self::HmacSha512 => "hmac-sha512",
            Self::HmacSha1 => "hmac-sha1",
        }
    }

    /// Length of the hex-encoded signature this algorithm produces.
    ///
    /// # Examples
    ///
    /// ```
    /// use signaturize_core::SignatureAlgorithm;
    ///
    /// assert_eq!(SignatureAlgorithm::HmacSha256.hex_len(), 64);
    /// assert_eq!(SignatureAlgorithm::HmacSha1.hex_len(), 40);
    /// ```
    #[must_use]
    pub fn hex_len(self) -> usize {
        match self {
            Self::HmacSha256 => 64,
            Self::HmacSha512 => 128,
            Self::HmacSha1 => 40,
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = SignaturizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hmac-sha256" | "sha256" => Ok(Self::HmacSha256),
            "hmac-sha512" | "sha512" => Ok(Self::HmacSha512),
            "hmac-sha1" | "sha1" => Ok(Self::HmacSha1),
            _ => Err(SignaturizeError::Config(format!(
                "unsupported signature algorithm: {s}"
            ))),
        }
    }
}

/// How keys and values are written into the canonical string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanonicalEncoding {
    /// Percent-encode delimiter characters, `%`, controls and non-ASCII bytes
    /// so that no two parameter sets share a canonical string.
    #[default]
    Escaped,
    /// Write keys and values verbatim. Compatible with existing signers but
    /// ambiguous when values contain `:` or `-`.
    Legacy,
}

impl CanonicalEncoding {
    /// Identifier used in configuration and environment variables.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Escaped => "escaped",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for CanonicalEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalEncoding {
    type Err = SignaturizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "escaped" => Ok(Self::Escaped),
            "legacy" => Ok(Self::Legacy),
            _ => Err(SignaturizeError::Config(format!(
                "unsupported canonical encoding: {s}"
            ))),
        }
    }
}
