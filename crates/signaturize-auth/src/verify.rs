//! Request signature verification.
//!
//! Verification runs in a fixed order:
//!
//! 1. Reject the request if `|now - timestamp|` exceeds the freshness window.
//! 2. Resolve the private key via the key store.
//! 3. Recompute the expected signature over the received parameters.
//! 4. Compare it to the presented signature in constant time.
//!
//! The main entry point is [`Verifier::verify`].

use std::fmt;
use std::sync::Arc;

use signaturize_core::SignaturizeConfig;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::credentials::{AsyncKeyStore, KeyStore, SecretKey};
use crate::error::AuthError;
use crate::params::ParameterSet;
use crate::signer::Signer;
use crate::transport::SignatureFields;

/// The result of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    /// The public key that signed the request.
    pub public_key: String,
    /// The timestamp the signature covers.
    pub timestamp: i64,
}

/// Verifies signed requests against a clock and freshness window.
///
/// Cheap to clone and safe to share across threads.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use signaturize_auth::clock::FixedClock;
/// use signaturize_auth::{Credentials, ParameterSet, SigningContext, StaticKeyStore, Verifier};
///
/// let store = StaticKeyStore::new(vec![("PUB".to_owned(), "PRIV".to_owned())]);
/// let verifier = Verifier::new().with_clock(Arc::new(FixedClock::new(1_000_000_000)));
///
/// let params = ParameterSet::builder().with("age", 21).build();
/// let signed = SigningContext::at(Credentials::new("PUB", "PRIV"), params.clone(), 1_000_000_000)
///     .sign()
///     .unwrap();
///
/// let auth = verifier
///     .verify(&store, "PUB", signed.timestamp(), &params, signed.signature())
///     .unwrap();
/// assert_eq!(auth.public_key, "PUB");
/// ```
#[derive(Clone)]
pub struct Verifier {
    clock: Arc<dyn Clock>,
    freshness_window: u64,
    signer: Signer,
}

impl fmt::Debug for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier")
            .field("freshness_window", &self.freshness_window)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::from_config(&SignaturizeConfig::default())
    }
}

impl Verifier {
    /// A verifier with the default configuration and the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A verifier using the system clock and the given configuration.
    #[must_use]
    pub fn from_config(config: &SignaturizeConfig) -> Self {
        Self {
            clock: Arc::new(SystemClock),
            freshness_window: config.freshness_window_secs,
            signer: Signer::from_config(config),
        }
    }

    /// Replace the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the freshness window, in seconds.
    #[must_use]
    pub fn with_freshness_window(mut self, secs: u64) -> Self {
        self.freshness_window = secs;
        self
    }

    /// Replace the algorithm and canonical encoding.
    #[must_use]
    pub fn with_signer(mut self, signer: Signer) -> Self {
        self.signer = signer;
        self
    }

    /// The configured freshness window, in seconds.
    #[must_use]
    pub fn freshness_window(&self) -> u64 {
        self.freshness_window
    }

    /// Verify a signed request.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if:
    /// - The timestamp is outside the freshness window ([`AuthError::Expired`])
    /// - The public key is unknown ([`AuthError::UnknownCredential`])
    /// - A parameter cannot be canonicalized ([`AuthError::MalformedParameter`])
    /// - The signature does not match ([`AuthError::InvalidSignature`])
    pub fn verify(
        &self,
        key_store: &dyn KeyStore,
        public_key: &str,
        timestamp: i64,
        params: &ParameterSet,
        signature: &str,
    ) -> Result<Authenticated, AuthError> {
        debug!(public_key, timestamp, "Verifying request signature");

        self.check_freshness(timestamp)?;
        let private_key = key_store.lookup(public_key)?;
        self.compare(&private_key, public_key, timestamp, params, signature)
    }

    /// Verify a signed request whose key store performs async I/O.
    ///
    /// Same contract as [`Verifier::verify`].
    ///
    /// # Errors
    ///
    /// See [`Verifier::verify`].
    pub async fn verify_async(
        &self,
        key_store: &dyn AsyncKeyStore,
        public_key: &str,
        timestamp: i64,
        params: &ParameterSet,
        signature: &str,
    ) -> Result<Authenticated, AuthError> {
        debug!(public_key, timestamp, "Verifying request signature");

        self.check_freshness(timestamp)?;
        let private_key = key_store.lookup(public_key).await?;
        self.compare(&private_key, public_key, timestamp, params, signature)
    }

    /// Verify using out-of-band fields already extracted from a request.
    ///
    /// # Errors
    ///
    /// See [`Verifier::verify`].
    pub fn verify_fields(
        &self,
        key_store: &dyn KeyStore,
        fields: &SignatureFields,
        params: &ParameterSet,
    ) -> Result<Authenticated, AuthError> {
        self.verify(
            key_store,
            &fields.public_key,
            fields.timestamp,
            params,
            &fields.signature,
        )
    }

    /// Verify a request carrying its fields in `X-Service-*` headers.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] or [`AuthError::InvalidField`] for
    /// absent or unparsable headers, otherwise see [`Verifier::verify`].
    pub fn verify_headers(
        &self,
        key_store: &dyn KeyStore,
        headers: &http::HeaderMap,
        params: &ParameterSet,
    ) -> Result<Authenticated, AuthError> {
        let fields = SignatureFields::from_headers(headers)?;
        self.verify_fields(key_store, &fields, params)
    }

    fn check_freshness(&self, timestamp: i64) -> Result<(), AuthError> {
        check_freshness(timestamp, self.clock.now(), self.freshness_window)
    }

    fn compare(
        &self,
        private_key: &SecretKey,
        public_key: &str,
        timestamp: i64,
        params: &ParameterSet,
        signature: &str,
    ) -> Result<Authenticated, AuthError> {
        let expected = self.signer.sign(private_key, params, timestamp)?;

        // Constant-time comparison to prevent timing attacks.
        if signature.as_bytes().ct_eq(expected.as_bytes()).into() {
            debug!(public_key, "Signature verification succeeded");
            Ok(Authenticated {
                public_key: public_key.to_owned(),
                timestamp,
            })
        } else {
            debug!(public_key, "Signature mismatch");
            Err(AuthError::InvalidSignature)
        }
    }
}

/// Check that `timestamp` lies within `window` seconds of `now`, in either
/// direction. A distance of exactly `window` is accepted.
///
/// # Errors
///
/// Returns [`AuthError::Expired`] when the distance exceeds `window`.
///
/// # Examples
///
/// ```
/// use signaturize_auth::verify::check_freshness;
///
/// assert!(check_freshness(1_000, 2_800, 1_800).is_ok());
/// assert!(check_freshness(1_000, 2_801, 1_800).is_err());
/// ```
pub fn check_freshness(timestamp: i64, now: i64, window: u64) -> Result<(), AuthError> {
    if now.abs_diff(timestamp) > window {
        debug!(timestamp, now, window, "Request timestamp outside freshness window");
        return Err(AuthError::Expired {
            timestamp,
            now,
            window,
        });
    }
    Ok(())
}
