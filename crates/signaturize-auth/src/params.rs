//! Signable request parameters.
//!
//! A [`ParameterSet`] is an immutable, key-sorted map of scalar values. It is
//! assembled with a [`ParameterSetBuilder`], which is the only place edits can
//! happen. Keys in [`RESERVED_KEYS`] travel out of band and are silently
//! dropped from the signable set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

/// Key carrying the request timestamp.
pub const TIMESTAMP_KEY: &str = "timestamp";
/// Key carrying the caller's public key.
pub const PUBLIC_KEY_KEY: &str = "public_key";
/// Key carrying the request signature.
pub const SIGNATURE_KEY: &str = "signature";

/// Keys that never take part in the canonical string.
pub const RESERVED_KEYS: [&str; 3] = [TIMESTAMP_KEY, PUBLIC_KEY_KEY, SIGNATURE_KEY];

/// Whether `key` is carried out of band rather than signed.
#[must_use]
pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// A scalar parameter value.
///
/// Serializes untagged, so a produced value set renders as a flat JSON
/// object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// UTF-8 text.
    String(String),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit float. Must be finite to be signed.
    Float(f64),
    /// Boolean.
    Boolean(bool),
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// An immutable set of signable parameters.
///
/// Entries are kept in byte-wise key order, so iteration order never depends
/// on insertion order.
///
/// # Examples
///
/// ```
/// use signaturize_auth::ParameterSet;
///
/// let params = ParameterSet::builder()
///     .with("first_name", "Jesse")
///     .with("age", 21)
///     .with("signature", "ignored")
///     .build();
///
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.keys().collect::<Vec<_>>(), vec!["age", "first_name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterSet {
    entries: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    /// An empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a parameter set.
    #[must_use]
    pub fn builder() -> ParameterSetBuilder {
        ParameterSetBuilder::default()
    }

    /// Copy this set into a builder for further edits.
    #[must_use]
    pub fn to_builder(&self) -> ParameterSetBuilder {
        ParameterSetBuilder {
            entries: self.entries.clone(),
        }
    }

    /// Build a parameter set from a flat JSON object.
    ///
    /// Strings, integers, finite floats and booleans are accepted. Nested
    /// arrays or objects, `null`, and integers beyond the `i64` range are
    /// rejected. Reserved keys are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedParameter`] if `value` is not an object or
    /// holds an unsupported value.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, AuthError> {
        let object = value
            .as_object()
            .ok_or_else(|| AuthError::malformed("", "expected a JSON object"))?;

        let mut builder = Self::builder();
        for (key, value) in object {
            builder.set(key.as_str(), json_scalar(key, value)?);
        }
        Ok(builder.build())
    }

    /// Look up a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut builder = Self::builder();
        for (key, value) in iter {
            builder.set(key, value);
        }
        builder.build()
    }
}

impl From<ParameterSet> for BTreeMap<String, ParamValue> {
    fn from(params: ParameterSet) -> Self {
        params.entries
    }
}

/// Mutable staging area for a [`ParameterSet`].
#[derive(Debug, Clone, Default)]
pub struct ParameterSetBuilder {
    entries: BTreeMap<String, ParamValue>,
}

impl ParameterSetBuilder {
    /// Add or replace an entry, consuming and returning the builder.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Add or replace an entry. Reserved keys are ignored.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        let key = key.into();
        if is_reserved(&key) {
            debug!(key = %key, "Dropping reserved key from signable parameters");
        } else {
            self.entries.insert(key, value.into());
        }
        self
    }

    /// Look up a staged value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Remove an entry, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.remove(key)
    }

    /// Freeze the staged entries.
    #[must_use]
    pub fn build(self) -> ParameterSet {
        ParameterSet {
            entries: self.entries,
        }
    }
}

/// Convert one JSON member into a scalar parameter value.
fn json_scalar(key: &str, value: &serde_json::Value) -> Result<ParamValue, AuthError> {
    use serde_json::Value;

    match value {
        Value::String(s) => Ok(ParamValue::String(s.clone())),
        Value::Bool(b) => Ok(ParamValue::Boolean(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(ParamValue::Integer(i))
            } else if n.is_u64() {
                Err(AuthError::malformed(key, "integer out of range"))
            } else {
                n.as_f64()
                    .map(ParamValue::Float)
                    .ok_or_else(|| AuthError::malformed(key, "unrepresentable number"))
            }
        }
        Value::Null => Err(AuthError::malformed(key, "null values cannot be signed")),
        Value::Array(_) | Value::Object(_) => {
            Err(AuthError::malformed(key, "nested values cannot be signed"))
        }
    }
}
