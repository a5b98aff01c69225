//! Canonical string construction.
//!
//! The canonical string is the message fed to the keyed digest:
//!
//! ```text
//! <key1>:<value1>-<key2>:<value2>-...-timestamp:<timestamp>
//! ```
//!
//! Keys appear in byte-wise lexicographic order, and the timestamp always
//! occupies the final position with no trailing delimiter. Under
//! [`CanonicalEncoding::Escaped`] keys and values are percent-encoded so that
//! a value containing `:` or `-` cannot impersonate a second entry.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use signaturize_core::CanonicalEncoding;

use crate::error::AuthError;
use crate::params::{ParamValue, ParameterSet, TIMESTAMP_KEY};

/// Characters escaped in keys and values under [`CanonicalEncoding::Escaped`].
///
/// Non-ASCII bytes are always encoded by `utf8_percent_encode`.
const DELIMITER_ENCODE_SET: &AsciiSet = &CONTROLS.add(b':').add(b'-').add(b'%');

/// Build the canonical string for `params` at `timestamp`.
///
/// # Errors
///
/// Returns [`AuthError::MalformedParameter`] if a float value is NaN or
/// infinite.
///
/// # Examples
///
/// ```
/// use signaturize_auth::ParameterSet;
/// use signaturize_auth::canonical::build_canonical_string;
/// use signaturize_core::CanonicalEncoding;
///
/// let params = ParameterSet::builder()
///     .with("first_name", "Jesse")
///     .with("age", 21)
///     .build();
///
/// let canonical =
///     build_canonical_string(&params, 1_000_000_000, CanonicalEncoding::Escaped).unwrap();
/// assert_eq!(canonical, "age:21-first_name:Jesse-timestamp:1000000000");
/// ```
pub fn build_canonical_string(
    params: &ParameterSet,
    timestamp: i64,
    encoding: CanonicalEncoding,
) -> Result<String, AuthError> {
    let mut canonical = String::new();

    for (key, value) in params.iter() {
        let rendered = canonical_value(key, value, encoding)?;
        canonical.push_str(&encode(key, encoding));
        canonical.push(':');
        canonical.push_str(&encode(&rendered, encoding));
        canonical.push('-');
    }

    canonical.push_str(TIMESTAMP_KEY);
    canonical.push(':');
    canonical.push_str(&timestamp.to_string());

    Ok(canonical)
}

/// Render a value in its single fixed textual form for `encoding`.
///
/// Strings are as-is and integers are plain decimal under both encodings.
/// Under [`CanonicalEncoding::Escaped`] booleans are `true`/`false` and floats
/// use the shortest representation that round-trips (`1.5`, `0.1`, `21`).
/// [`CanonicalEncoding::Legacy`] renders them the way existing signers do:
/// `True`/`False`, and floats always carry a fraction or a signed two-digit
/// exponent (`21.0`, `1e+16`, `1e-05`).
///
/// # Errors
///
/// Returns [`AuthError::MalformedParameter`] for NaN or infinite floats.
pub fn canonical_value(
    key: &str,
    value: &ParamValue,
    encoding: CanonicalEncoding,
) -> Result<String, AuthError> {
    match (value, encoding) {
        (ParamValue::String(s), _) => Ok(s.clone()),
        (ParamValue::Integer(i), _) => Ok(i.to_string()),
        (ParamValue::Boolean(b), CanonicalEncoding::Escaped) => Ok(b.to_string()),
        (ParamValue::Boolean(true), CanonicalEncoding::Legacy) => Ok("True".to_owned()),
        (ParamValue::Boolean(false), CanonicalEncoding::Legacy) => Ok("False".to_owned()),
        (ParamValue::Float(f), _) if !f.is_finite() => Err(AuthError::malformed(
            key,
            format!("non-finite float {f} cannot be signed"),
        )),
        (ParamValue::Float(f), CanonicalEncoding::Escaped) => Ok(f.to_string()),
        (ParamValue::Float(f), CanonicalEncoding::Legacy) => Ok(legacy_float(*f)),
    }
}

/// `Debug` switches to exponent form at the same thresholds legacy signers
/// use; only the exponent needs an explicit sign and two digits.
fn legacy_float(f: f64) -> String {
    let rendered = format!("{f:?}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = exponent
                .strip_prefix('-')
                .map_or(("+", exponent), |digits| ("-", digits));
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => rendered,
    }
}

fn encode(input: &str, encoding: CanonicalEncoding) -> Cow<'_, str> {
    match encoding {
        CanonicalEncoding::Escaped => utf8_percent_encode(input, DELIMITER_ENCODE_SET).into(),
        CanonicalEncoding::Legacy => Cow::Borrowed(input),
    }
}
