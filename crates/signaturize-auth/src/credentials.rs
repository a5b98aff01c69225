//! Credential pairs and key store implementations.
//!
//! This module defines the [`KeyStore`] trait for resolving private keys from
//! public keys, its async counterpart [`AsyncKeyStore`], and a
//! [`StaticKeyStore`] for testing and development use cases.

use std::collections::HashMap;
use std::fmt;

use crate::error::AuthError;

/// A shared private key.
///
/// The `Debug` output is redacted; use [`SecretKey::expose`] to read the key.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    /// Wrap a private key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key material.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(\"[REDACTED]\")")
    }
}

impl From<String> for SecretKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for SecretKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

/// A public identifier and the private key it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    public_key: String,
    private_key: SecretKey,
}

impl Credentials {
    /// Create a credential pair.
    pub fn new(public_key: impl Into<String>, private_key: impl Into<SecretKey>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    /// The public identifier.
    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// The shared private key.
    #[must_use]
    pub fn private_key(&self) -> &SecretKey {
        &self.private_key
    }
}

/// Trait for looking up private keys by public key.
///
/// Implementations may back this with a database, configuration file,
/// or any other credential store. The verifier never mutates or caches it.
pub trait KeyStore: Send + Sync {
    /// Retrieve the private key for the given public key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownCredential`] if the public key is not recognized.
    fn lookup(&self, public_key: &str) -> Result<SecretKey, AuthError>;
}

/// Async variant of [`KeyStore`] for stores that perform I/O.
#[async_trait::async_trait]
pub trait AsyncKeyStore: Send + Sync {
    /// Retrieve the private key for the given public key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownCredential`] if the public key is not recognized.
    async fn lookup(&self, public_key: &str) -> Result<SecretKey, AuthError>;
}

/// A simple in-memory key store backed by a `HashMap`.
///
/// Suitable for testing and development environments.
///
/// # Examples
///
/// ```
/// use signaturize_auth::credentials::{KeyStore, StaticKeyStore};
///
/// let store = StaticKeyStore::new(vec![
///     ("PUBLIKO_KEY".to_owned(), "SIKRETO_KEY".to_owned()),
/// ]);
///
/// let secret = store.lookup("PUBLIKO_KEY").unwrap();
/// assert_eq!(secret.expose(), "SIKRETO_KEY");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticKeyStore {
    keys: HashMap<String, SecretKey>,
}

impl StaticKeyStore {
    /// Create a new `StaticKeyStore` from an iterable of (public_key, private_key) pairs.
    pub fn new(keys: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            keys: keys
                .into_iter()
                .map(|(public, private)| (public, SecretKey::from(private)))
                .collect(),
        }
    }

    /// Create a store holding the given credential pairs.
    pub fn from_credentials(credentials: impl IntoIterator<Item = Credentials>) -> Self {
        Self {
            keys: credentials
                .into_iter()
                .map(|c| (c.public_key, c.private_key))
                .collect(),
        }
    }
}

impl KeyStore for StaticKeyStore {
    fn lookup(&self, public_key: &str) -> Result<SecretKey, AuthError> {
        self.keys
            .get(public_key)
            .cloned()
            .ok_or_else(|| AuthError::UnknownCredential(public_key.to_owned()))
    }
}

#[async_trait::async_trait]
impl AsyncKeyStore for StaticKeyStore {
    async fn lookup(&self, public_key: &str) -> Result<SecretKey, AuthError> {
        KeyStore::lookup(self, public_key)
    }
}
