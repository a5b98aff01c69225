//! Symmetric request signing and verification for Signaturize.
//!
//! A caller holding a shared private key signs a set of request parameters
//! plus a timestamp. A receiver holding the same key recomputes the signature,
//! compares it in constant time, and rejects requests whose timestamp falls
//! outside a freshness window.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use signaturize_auth::clock::FixedClock;
//! use signaturize_auth::{Credentials, ParameterSet, SigningContext, StaticKeyStore, Verifier};
//!
//! let clock = Arc::new(FixedClock::new(1_000_000_000));
//!
//! // Caller side
//! let params = ParameterSet::builder()
//!     .with("first_name", "Jesse")
//!     .with("age", 21)
//!     .build();
//! let signed = SigningContext::new(
//!     Credentials::new("PUBLIC_KEY", "PRIVATE_KEY"),
//!     params.clone(),
//!     clock.as_ref(),
//! )
//! .sign()
//! .unwrap();
//!
//! let mut headers = http::HeaderMap::new();
//! signed.write_headers(&mut headers).unwrap();
//!
//! // Receiver side
//! let store = StaticKeyStore::new(vec![("PUBLIC_KEY".to_owned(), "PRIVATE_KEY".to_owned())]);
//! let verifier = Verifier::new().with_clock(clock);
//! let auth = verifier.verify_headers(&store, &headers, &params).unwrap();
//! assert_eq!(auth.public_key, "PUBLIC_KEY");
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical string construction
//! - [`clock`] - Injectable time sources
//! - [`context`] - Signing contexts and signed requests
//! - [`credentials`] - Credential pairs and key stores
//! - [`error`] - Authentication error types
//! - [`params`] - Signable parameter sets
//! - [`signer`] - Keyed digest computation
//! - [`transport`] - `X-Service-*` header and body field handling
//! - [`verify`] - Signature verification and freshness checks

pub mod canonical;
pub mod clock;
pub mod context;
pub mod credentials;
pub mod error;
pub mod params;
pub mod signer;
pub mod transport;
pub mod verify;

pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{ProducedFields, SignedRequest, SigningContext};
pub use credentials::{AsyncKeyStore, Credentials, KeyStore, SecretKey, StaticKeyStore};
pub use error::AuthError;
pub use params::{ParamValue, ParameterSet, ParameterSetBuilder};
pub use signer::Signer;
pub use transport::SignatureFields;
pub use verify::{Authenticated, Verifier};
