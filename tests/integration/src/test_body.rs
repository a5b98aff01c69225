//! Body-carried signature tests.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use signaturize_auth::{AuthError, ParamValue, ParameterSet, SignatureFields, Verifier};

    use crate::{START, body_request, clock, key_store, sign_person};

    #[test]
    fn test_should_authenticate_body_signed_request() {
        let request = body_request(&sign_person(START).unwrap()).unwrap();

        let values: BTreeMap<String, ParamValue> = serde_json::from_slice(request.body()).unwrap();
        let fields = SignatureFields::from_values(&values).unwrap();
        let body: serde_json::Value = serde_json::from_slice(request.body()).unwrap();
        let params = ParameterSet::from_json(&body).unwrap();

        assert_eq!(params.len(), 3);
        let auth = Verifier::new()
            .with_clock(clock())
            .verify_fields(&key_store(), &fields, &params)
            .unwrap();
        assert_eq!(auth.timestamp, START);
    }

    #[test]
    fn test_should_ignore_reserved_keys_in_body_parameters() {
        let request = body_request(&sign_person(START).unwrap()).unwrap();
        let body: serde_json::Value = serde_json::from_slice(request.body()).unwrap();

        let params = ParameterSet::from_json(&body).unwrap();
        assert!(!params.contains_key("signature"));
        assert!(!params.contains_key("public_key"));
        assert!(!params.contains_key("timestamp"));
    }

    #[test]
    fn test_should_reject_nested_body_values() {
        let body = serde_json::json!({ "name": "Juan", "tags": ["a"] });
        let result = ParameterSet::from_json(&body);
        assert!(matches!(result, Err(AuthError::MalformedParameter { .. })));
    }

    #[test]
    fn test_should_reject_request_signed_in_the_future() {
        let request = body_request(&sign_person(START + 1801).unwrap()).unwrap();
        let values: BTreeMap<String, ParamValue> = serde_json::from_slice(request.body()).unwrap();
        let fields = SignatureFields::from_values(&values).unwrap();
        let body: serde_json::Value = serde_json::from_slice(request.body()).unwrap();

        let result = Verifier::new().with_clock(clock()).verify_fields(
            &key_store(),
            &fields,
            &ParameterSet::from_json(&body).unwrap(),
        );
        assert!(matches!(result, Err(AuthError::Expired { .. })));
    }
}
