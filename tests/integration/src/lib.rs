//! End-to-end tests for Signaturize.
//!
//! Each test plays both sides of an exchange: a caller signs parameters and
//! builds an `http::Request`, and a receiver extracts the fields and verifies
//! them against its own key store and clock.
//!
//! Run them with:
//! ```text
//! cargo test -p signaturize-integration
//! ```

use std::sync::{Arc, Once};

use anyhow::{Context, Result};
use signaturize_auth::{
    Credentials, FixedClock, ParameterSet, ProducedFields, SignedRequest, SigningContext,
    StaticKeyStore,
};

#[cfg(test)]
mod test_body;
#[cfg(test)]
mod test_concurrency;
#[cfg(test)]
mod test_config;
#[cfg(test)]
mod test_headers;

static INIT: Once = Once::new();

/// Public key shared by the tests.
pub const PUBLIC_KEY: &str = "PUBLIKO_KEY";
/// Private key shared by the tests.
pub const PRIVATE_KEY: &str = "SIKRETO_KEY";
/// Timestamp the tests start from.
pub const START: i64 = 1_700_000_000;

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A key store holding the shared test credential.
#[must_use]
pub fn key_store() -> StaticKeyStore {
    init_tracing();
    StaticKeyStore::from_credentials([credentials()])
}

/// The shared test credential.
#[must_use]
pub fn credentials() -> Credentials {
    Credentials::new(PUBLIC_KEY, PRIVATE_KEY)
}

/// A clock stopped at [`START`].
#[must_use]
pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(START))
}

/// The person record used by most scenarios.
#[must_use]
pub fn person() -> ParameterSet {
    ParameterSet::builder()
        .with("name", "Juan Dela Cruz")
        .with("age", 25)
        .with("location", "Philippines")
        .build()
}

/// Build a request carrying the parameters as a JSON body and the signature
/// fields in `X-Service-*` headers.
///
/// # Errors
///
/// Fails if the headers cannot be written or the body cannot be serialized.
pub fn header_request(signed: &SignedRequest) -> Result<http::Request<Vec<u8>>> {
    let body = serde_json::to_vec(&signed.to_values(ProducedFields::PARAMS_ONLY))
        .context("serialize request body")?;
    let (mut parts, body) = http::Request::builder()
        .method("POST")
        .uri("http://awesomeservice.com/people")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body)
        .context("build request")?
        .into_parts();
    signed
        .write_headers(&mut parts.headers)
        .context("write signature headers")?;
    Ok(http::Request::from_parts(parts, body))
}

/// Build a request carrying everything, signature fields included, in the
/// JSON body.
///
/// # Errors
///
/// Fails if the body cannot be serialized.
pub fn body_request(signed: &SignedRequest) -> Result<http::Request<Vec<u8>>> {
    let body = serde_json::to_vec(&signed.to_values(ProducedFields::ALL))
        .context("serialize request body")?;
    http::Request::builder()
        .method("POST")
        .uri("http://awesomeservice.com/people")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body)
        .context("build request")
}

/// Sign [`person`] with the shared credential at `timestamp`.
///
/// # Errors
///
/// Fails if a parameter cannot be canonicalized.
pub fn sign_person(timestamp: i64) -> Result<SignedRequest> {
    Ok(SigningContext::at(credentials(), person(), timestamp).sign()?)
}
