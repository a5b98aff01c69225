//! Out-of-band signature fields.
//!
//! The public key, timestamp and signature travel outside the signed
//! parameters, either as headers:
//!
//! ```text
//! X-Service-Public-Key: <public key>
//! X-Service-Timestamp:  <seconds since epoch>
//! X-Service-Signature:  <lowercase hex>
//! ```
//!
//! or as the reserved `public_key`, `timestamp` and `signature` entries of a
//! request body. [`SignatureFields`] reads and writes both forms.

use std::collections::BTreeMap;

use http::{HeaderMap, HeaderValue};

use crate::error::AuthError;
use crate::params::{PUBLIC_KEY_KEY, ParamValue, SIGNATURE_KEY, TIMESTAMP_KEY};

/// Header carrying the public key.
pub const PUBLIC_KEY_HEADER: &str = "x-service-public-key";
/// Header carrying the request timestamp.
pub const TIMESTAMP_HEADER: &str = "x-service-timestamp";
/// Header carrying the signature.
pub const SIGNATURE_HEADER: &str = "x-service-signature";

/// The fields a receiver needs besides the signed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureFields {
    /// The caller's public key.
    pub public_key: String,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    /// The presented signature.
    pub signature: String,
}

impl SignatureFields {
    /// Read the fields from `X-Service-*` headers.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] if a header is absent, or
    /// [`AuthError::InvalidField`] if it is not visible ASCII or the timestamp
    /// is not an integer.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AuthError> {
        let public_key = header_str(headers, PUBLIC_KEY_HEADER)?.to_owned();
        let timestamp = parse_timestamp(header_str(headers, TIMESTAMP_HEADER)?, TIMESTAMP_HEADER)?;
        let signature = header_str(headers, SIGNATURE_HEADER)?.to_owned();

        Ok(Self {
            public_key,
            timestamp,
            signature,
        })
    }

    /// Read the fields from the reserved entries of a request value set.
    ///
    /// The timestamp may be an integer or a decimal string.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] if an entry is absent, or
    /// [`AuthError::InvalidField`] if it has the wrong type.
    pub fn from_values(values: &BTreeMap<String, ParamValue>) -> Result<Self, AuthError> {
        let public_key = value_str(values, PUBLIC_KEY_KEY)?.to_owned();
        let timestamp = match values.get(TIMESTAMP_KEY) {
            Some(ParamValue::Integer(t)) => *t,
            Some(ParamValue::String(s)) => parse_timestamp(s, TIMESTAMP_KEY)?,
            Some(_) => return Err(AuthError::InvalidField(TIMESTAMP_KEY.to_owned())),
            None => return Err(AuthError::MissingField(TIMESTAMP_KEY.to_owned())),
        };
        let signature = value_str(values, SIGNATURE_KEY)?.to_owned();

        Ok(Self {
            public_key,
            timestamp,
            signature,
        })
    }

    /// Write the fields as `X-Service-*` headers, replacing existing values.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidField`] if the public key or signature is
    /// not a valid header value.
    pub fn write_headers(&self, headers: &mut HeaderMap) -> Result<(), AuthError> {
        headers.insert(PUBLIC_KEY_HEADER, header_value(&self.public_key, PUBLIC_KEY_HEADER)?);
        headers.insert(TIMESTAMP_HEADER, HeaderValue::from(self.timestamp));
        headers.insert(SIGNATURE_HEADER, header_value(&self.signature, SIGNATURE_HEADER)?);
        Ok(())
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, AuthError> {
    headers
        .get(name)
        .ok_or_else(|| AuthError::MissingField(name.to_owned()))?
        .to_str()
        .map(str::trim)
        .map_err(|_| AuthError::InvalidField(name.to_owned()))
}

fn header_value(value: &str, name: &str) -> Result<HeaderValue, AuthError> {
    HeaderValue::from_str(value).map_err(|_| AuthError::InvalidField(name.to_owned()))
}

fn value_str<'a>(
    values: &'a BTreeMap<String, ParamValue>,
    key: &str,
) -> Result<&'a str, AuthError> {
    match values.get(key) {
        Some(ParamValue::String(s)) => Ok(s),
        Some(_) => Err(AuthError::InvalidField(key.to_owned())),
        None => Err(AuthError::MissingField(key.to_owned())),
    }
}

fn parse_timestamp(raw: &str, name: &str) -> Result<i64, AuthError> {
    raw.trim()
        .parse()
        .map_err(|_| AuthError::InvalidField(name.to_owned()))
}
