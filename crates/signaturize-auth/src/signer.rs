//! Keyed digest computation.
//!
//! A [`Signer`] pairs a [`SignatureAlgorithm`] with a [`CanonicalEncoding`].
//! Signing is deterministic: the same credentials, parameters and timestamp
//! always yield the same lowercase hex signature.
//!
//! ```text
//! Signature = hex(HMAC-<hash>(private_key, CanonicalString))
//! ```

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use signaturize_core::{CanonicalEncoding, SignatureAlgorithm, SignaturizeConfig};

use crate::canonical::build_canonical_string;
use crate::credentials::SecretKey;
use crate::error::AuthError;
use crate::params::ParameterSet;

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;
type HmacSha1 = Hmac<Sha1>;

/// Signature computation settings.
///
/// # Examples
///
/// ```
/// use signaturize_auth::{ParameterSet, SecretKey, Signer};
///
/// let params = ParameterSet::builder()
///     .with("age", 21)
///     .with("first_name", "Jesse")
///     .build();
///
/// let signer = Signer::default();
/// let key = SecretKey::from("PRIVATE_KEY");
/// let signature = signer.sign(&key, &params, 1_000_000_000).unwrap();
/// assert_eq!(signature.len(), 64);
/// assert_eq!(signature, signer.sign(&key, &params, 1_000_000_000).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signer {
    algorithm: SignatureAlgorithm,
    encoding: CanonicalEncoding,
}

impl Signer {
    /// Create a signer with explicit settings.
    #[must_use]
    pub fn new(algorithm: SignatureAlgorithm, encoding: CanonicalEncoding) -> Self {
        Self {
            algorithm,
            encoding,
        }
    }

    /// Create a signer from configuration.
    #[must_use]
    pub fn from_config(config: &SignaturizeConfig) -> Self {
        Self::new(config.algorithm, config.canonical_encoding)
    }

    /// The keyed digest in use.
    #[must_use]
    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// The canonical encoding in use.
    #[must_use]
    pub fn encoding(&self) -> CanonicalEncoding {
        self.encoding
    }

    /// Build the canonical string this signer would sign.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedParameter`] if a value cannot be canonicalized.
    pub fn canonical_string(
        &self,
        params: &ParameterSet,
        timestamp: i64,
    ) -> Result<String, AuthError> {
        build_canonical_string(params, timestamp, self.encoding)
    }

    /// Sign `params` at `timestamp` with `private_key`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedParameter`] if a value cannot be canonicalized.
    pub fn sign(
        &self,
        private_key: &SecretKey,
        params: &ParameterSet,
        timestamp: i64,
    ) -> Result<String, AuthError> {
        let canonical = self.canonical_string(params, timestamp)?;
        Ok(compute_signature(
            self.algorithm,
            private_key.expose().as_bytes(),
            canonical.as_bytes(),
        ))
    }
}

/// Compute the keyed digest of `message` and return it as lowercase hex.
///
/// # Examples
///
/// ```
/// use signaturize_auth::signer::compute_signature;
/// use signaturize_core::SignatureAlgorithm;
///
/// // RFC 4231 test case 2.
/// assert_eq!(
///     compute_signature(SignatureAlgorithm::HmacSha256, b"Jefe", b"what do ya want for nothing?"),
///     "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
/// );
/// ```
#[must_use]
pub fn compute_signature(algorithm: SignatureAlgorithm, key: &[u8], message: &[u8]) -> String {
    match algorithm {
        SignatureAlgorithm::HmacSha256 => hmac_hex::<HmacSha256>(key, message),
        SignatureAlgorithm::HmacSha512 => hmac_hex::<HmacSha512>(key, message),
        SignatureAlgorithm::HmacSha1 => hmac_hex::<HmacSha1>(key, message),
    }
}

/// Compute an HMAC and hex-encode the tag.
fn hmac_hex<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> String {
    let mut mac = <M as KeyInit>::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}
