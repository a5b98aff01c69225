//! Core configuration and shared types for Signaturize.
//!
//! This crate holds what every Signaturize component agrees on: the signing
//! algorithm and canonical encoding selectors, the [`SignaturizeConfig`] loaded
//! from the environment, and the configuration error type.

mod algorithm;
mod config;
mod error;

pub use algorithm::{CanonicalEncoding, SignatureAlgorithm};
pub use config::{DEFAULT_FRESHNESS_WINDOW_SECS, SignaturizeConfig};
pub use error::{SignaturizeError, SignaturizeResult};
