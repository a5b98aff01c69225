//! Signing contexts and signed requests.
//!
//! Signing is a two-phase flow. A [`SigningContext`] owns a credential pair,
//! a frozen [`ParameterSet`] and a timestamp captured once at construction.
//! [`SigningContext::sign`] consumes it and returns a [`SignedRequest`], which
//! carries the signature next to the exact inputs it was computed from.

use std::collections::BTreeMap;

use tracing::debug;

use crate::clock::Clock;
use crate::credentials::Credentials;
use crate::error::AuthError;
use crate::params::{PUBLIC_KEY_KEY, ParamValue, ParameterSet, SIGNATURE_KEY, TIMESTAMP_KEY};
use crate::signer::Signer;
use crate::transport::SignatureFields;

/// Credentials, parameters and a captured timestamp, ready to be signed.
///
/// # Examples
///
/// ```
/// use signaturize_auth::{Credentials, ParameterSet, SigningContext};
///
/// let params = ParameterSet::builder()
///     .with("first_name", "Jesse")
///     .with("age", 21)
///     .build();
///
/// let credentials = Credentials::new("PUBLIC_KEY", "PRIVATE_KEY");
/// let signed = SigningContext::at(credentials, params, 1_000_000_000)
///     .sign()
///     .unwrap();
///
/// assert_eq!(signed.timestamp(), 1_000_000_000);
/// assert_eq!(signed.signature().len(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct SigningContext {
    credentials: Credentials,
    params: ParameterSet,
    timestamp: i64,
    signer: Signer,
}

impl SigningContext {
    /// Create a context, capturing the timestamp from `clock`.
    pub fn new(credentials: Credentials, params: ParameterSet, clock: &dyn Clock) -> Self {
        Self::at(credentials, params, clock.now())
    }

    /// Create a context with an explicit timestamp.
    #[must_use]
    pub fn at(credentials: Credentials, params: ParameterSet, timestamp: i64) -> Self {
        Self {
            credentials,
            params,
            timestamp,
            signer: Signer::default(),
        }
    }

    /// Use a non-default algorithm or canonical encoding.
    #[must_use]
    pub fn with_signer(mut self, signer: Signer) -> Self {
        self.signer = signer;
        self
    }

    /// The captured timestamp.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The signable parameters.
    #[must_use]
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// The caller's public key.
    #[must_use]
    pub fn public_key(&self) -> &str {
        self.credentials.public_key()
    }

    /// The canonical string the signature will cover.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedParameter`] if a value cannot be canonicalized.
    pub fn canonical_string(&self) -> Result<String, AuthError> {
        self.signer.canonical_string(&self.params, self.timestamp)
    }

    /// Compute the signature.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedParameter`] if a value cannot be canonicalized.
    pub fn sign(self) -> Result<SignedRequest, AuthError> {
        let signature =
            self.signer
                .sign(self.credentials.private_key(), &self.params, self.timestamp)?;

        debug!(
            public_key = %self.credentials.public_key(),
            timestamp = self.timestamp,
            algorithm = %self.signer.algorithm(),
            "Signed request parameters"
        );

        Ok(SignedRequest {
            public_key: self.credentials.public_key().to_owned(),
            params: self.params,
            timestamp: self.timestamp,
            signature,
        })
    }
}

/// Which out-of-band fields [`SignedRequest::to_values`] includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducedFields {
    /// Include `public_key`.
    pub public_key: bool,
    /// Include `timestamp`.
    pub timestamp: bool,
    /// Include `signature`.
    pub signature: bool,
}

impl ProducedFields {
    /// Every field, for requests that carry everything in the body.
    pub const ALL: Self = Self {
        public_key: true,
        timestamp: true,
        signature: true,
    };

    /// Parameters only, for requests that carry the fields in headers.
    pub const PARAMS_ONLY: Self = Self {
        public_key: false,
        timestamp: false,
        signature: false,
    };
}

impl Default for ProducedFields {
    fn default() -> Self {
        Self::ALL
    }
}

/// An immutable signed request.
///
/// Never holds the private key.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRequest {
    public_key: String,
    params: ParameterSet,
    timestamp: i64,
    signature: String,
}

impl SignedRequest {
    /// The caller's public key.
    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// The signed parameters.
    #[must_use]
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// The timestamp covered by the signature.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The lowercase hex signature.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The out-of-band fields, for writing into headers.
    #[must_use]
    pub fn fields(&self) -> SignatureFields {
        SignatureFields {
            public_key: self.public_key.clone(),
            timestamp: self.timestamp,
            signature: self.signature.clone(),
        }
    }

    /// Produce the value set for a request body or query string.
    ///
    /// # Examples
    ///
    /// ```
    /// use signaturize_auth::{
    ///     Credentials, ParamValue, ParameterSet, ProducedFields, SigningContext,
    /// };
    ///
    /// let params = ParameterSet::builder().with("age", 21).build();
    /// let signed = SigningContext::at(Credentials::new("PUB", "PRIV"), params, 7)
    ///     .sign()
    ///     .unwrap();
    ///
    /// let body = signed.to_values(ProducedFields::PARAMS_ONLY);
    /// assert_eq!(body.len(), 1);
    ///
    /// let full = signed.to_values(ProducedFields::ALL);
    /// assert!(full.contains_key("signature"));
    /// assert!(!full.values().any(|v| v == &ParamValue::from("PRIV")));
    /// ```
    #[must_use]
    pub fn to_values(&self, fields: ProducedFields) -> BTreeMap<String, ParamValue> {
        let mut values: BTreeMap<String, ParamValue> = self.params.clone().into();

        if fields.timestamp {
            values.insert(TIMESTAMP_KEY.to_owned(), ParamValue::Integer(self.timestamp));
        }
        if fields.public_key {
            values.insert(
                PUBLIC_KEY_KEY.to_owned(),
                ParamValue::String(self.public_key.clone()),
            );
        }
        if fields.signature {
            values.insert(
                SIGNATURE_KEY.to_owned(),
                ParamValue::String(self.signature.clone()),
            );
        }

        values
    }

    /// Write the `X-Service-*` headers for this request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidField`] if the public key is not a valid
    /// header value.
    pub fn write_headers(&self, headers: &mut http::HeaderMap) -> Result<(), AuthError> {
        self.fields().write_headers(headers)
    }
}
