//! Header-carried signature tests.

#[cfg(test)]
mod tests {
    use signaturize_auth::{AuthError, ParameterSet, Verifier};

    use crate::{PUBLIC_KEY, START, clock, header_request, key_store, sign_person};

    fn receive(request: &http::Request<Vec<u8>>) -> ParameterSet {
        let body: serde_json::Value =
            serde_json::from_slice(request.body()).expect("test body is JSON");
        ParameterSet::from_json(&body).expect("test body is flat")
    }

    #[test]
    fn test_should_authenticate_header_signed_request() {
        let request = header_request(&sign_person(START).unwrap()).unwrap();
        let verifier = Verifier::new().with_clock(clock());

        let auth = verifier
            .verify_headers(&key_store(), request.headers(), &receive(&request))
            .expect("valid request");
        assert_eq!(auth.public_key, PUBLIC_KEY);
        assert_eq!(auth.timestamp, START);
    }

    #[test]
    fn test_should_keep_signature_fields_out_of_body() {
        let request = header_request(&sign_person(START).unwrap()).unwrap();
        let body: serde_json::Value = serde_json::from_slice(request.body()).unwrap();

        assert!(body.get("signature").is_none());
        assert!(body.get("timestamp").is_none());
        assert!(request.headers().contains_key("x-service-signature"));
        assert!(!String::from_utf8_lossy(request.body()).contains(crate::PRIVATE_KEY));
    }

    #[test]
    fn test_should_reject_replayed_request_after_window() {
        let request = header_request(&sign_person(START).unwrap()).unwrap();
        let clock = clock();
        let verifier = Verifier::new().with_clock(clock.clone());
        let params = receive(&request);

        assert!(
            verifier
                .verify_headers(&key_store(), request.headers(), &params)
                .is_ok()
        );

        clock.advance(1801);
        let result = verifier.verify_headers(&key_store(), request.headers(), &params);
        assert!(matches!(result, Err(AuthError::Expired { .. })));
    }

    #[test]
    fn test_should_reject_body_tampered_in_transit() {
        let mut request = header_request(&sign_person(START).unwrap()).unwrap();
        let mut body: serde_json::Value = serde_json::from_slice(request.body()).unwrap();
        body["age"] = serde_json::json!(99);
        *request.body_mut() = serde_json::to_vec(&body).unwrap();

        let result = Verifier::new().with_clock(clock()).verify_headers(
            &key_store(),
            request.headers(),
            &receive(&request),
        );
        assert_eq!(result, Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_should_reject_swapped_public_key_header() {
        let mut request = header_request(&sign_person(START).unwrap()).unwrap();
        request.headers_mut().insert(
            "x-service-public-key",
            http::HeaderValue::from_static("SOMEONE_ELSE"),
        );

        let result = Verifier::new().with_clock(clock()).verify_headers(
            &key_store(),
            request.headers(),
            &receive(&request),
        );
        assert_eq!(
            result,
            Err(AuthError::UnknownCredential("SOMEONE_ELSE".to_owned()))
        );
    }

    #[test]
    fn test_should_reject_request_without_headers() {
        let mut request = header_request(&sign_person(START).unwrap()).unwrap();
        request.headers_mut().clear();

        let result = Verifier::new().with_clock(clock()).verify_headers(
            &key_store(),
            request.headers(),
            &receive(&request),
        );
        assert!(matches!(result, Err(AuthError::MissingField(_))));
    }
}
