//! Concurrent verification tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use signaturize_auth::{AsyncKeyStore, AuthError, SecretKey, SigningContext, Verifier};

    use crate::{PUBLIC_KEY, START, clock, credentials, key_store, person};

    /// Key store that simulates a slow database lookup.
    #[derive(Debug)]
    struct SlowKeyStore;

    #[async_trait::async_trait]
    impl AsyncKeyStore for SlowKeyStore {
        async fn lookup(&self, public_key: &str) -> Result<SecretKey, AuthError> {
            tokio::time::sleep(Duration::from_millis(5)).await;
            AsyncKeyStore::lookup(&key_store(), public_key).await
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_verify_from_many_tasks() {
        let verifier = Arc::new(Verifier::new().with_clock(clock()));
        let store = Arc::new(SlowKeyStore);

        let mut handles = Vec::new();
        for i in 0..32 {
            let verifier = Arc::clone(&verifier);
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let params = person().to_builder().with("request_id", i).build();
                let signed = SigningContext::at(credentials(), params.clone(), START)
                    .sign()
                    .unwrap();
                verifier
                    .verify_async(
                        store.as_ref(),
                        PUBLIC_KEY,
                        START,
                        &params,
                        signed.signature(),
                    )
                    .await
            }));
        }

        for handle in handles {
            let result = handle.await.expect("task panicked");
            assert!(result.is_ok(), "{result:?}");
        }
    }

    #[test]
    fn test_should_share_verifier_across_threads() {
        let verifier = Verifier::new().with_clock(clock());
        let store = key_store();
        let signed = SigningContext::at(credentials(), person(), START).sign().unwrap();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let result =
                        verifier.verify(&store, PUBLIC_KEY, START, &person(), signed.signature());
                    assert!(result.is_ok());
                });
            }
        });
    }
}
