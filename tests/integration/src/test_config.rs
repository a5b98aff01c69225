//! Configuration-driven signing tests.

#[cfg(test)]
mod tests {
    use signaturize_auth::{AuthError, Signer, SigningContext, Verifier};
    use signaturize_core::{CanonicalEncoding, SignatureAlgorithm, SignaturizeConfig};

    use crate::{PUBLIC_KEY, START, clock, credentials, key_store, person};

    #[test]
    fn test_should_interoperate_with_legacy_signers() {
        let config = SignaturizeConfig::builder()
            .algorithm(SignatureAlgorithm::HmacSha1)
            .canonical_encoding(CanonicalEncoding::Legacy)
            .build();

        let signed = SigningContext::at(credentials(), person(), START)
            .with_signer(Signer::from_config(&config))
            .sign()
            .unwrap();
        assert_eq!(signed.signature().len(), 40);

        let verifier = Verifier::from_config(&config).with_clock(clock());
        assert!(
            verifier
                .verify(&key_store(), PUBLIC_KEY, START, &person(), signed.signature())
                .is_ok()
        );

        let modern = Verifier::new().with_clock(clock());
        assert_eq!(
            modern.verify(&key_store(), PUBLIC_KEY, START, &person(), signed.signature()),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_should_accept_signature_from_existing_legacy_peer() {
        let config = SignaturizeConfig::builder()
            .algorithm(SignatureAlgorithm::HmacSha1)
            .canonical_encoding(CanonicalEncoding::Legacy)
            .build();
        let params = person()
            .to_builder()
            .with("active", true)
            .with("ratio", 0.5)
            .build();

        // Legacy signers render the boolean as `True` before signing.
        let peer_signature = "69e059074c32346bbd1310958337562d59091cb8";

        let verifier = Verifier::from_config(&config).with_clock(clock());
        let result = verifier.verify(&key_store(), PUBLIC_KEY, START, &params, peer_signature);
        assert!(result.is_ok(), "{result:?}");
    }

    #[test]
    fn test_should_apply_configured_freshness_window() {
        let config = SignaturizeConfig::builder().freshness_window_secs(60).build();
        let signed = SigningContext::at(credentials(), person(), START).sign().unwrap();

        let clock = clock();
        let verifier = Verifier::from_config(&config).with_clock(clock.clone());

        clock.advance(60);
        assert!(
            verifier
                .verify(&key_store(), PUBLIC_KEY, START, &person(), signed.signature())
                .is_ok()
        );

        clock.advance(1);
        assert!(matches!(
            verifier.verify(&key_store(), PUBLIC_KEY, START, &person(), signed.signature()),
            Err(AuthError::Expired { window: 60, .. })
        ));
    }
}
