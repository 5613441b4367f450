//! Property-based tests for the credential store

use assert_matches::assert_matches;
use proptest::prelude::*;
use tokio::runtime::Runtime;

use cropguard::backend::auth::CredentialStore;
use cropguard::backend::server::open_database;
use cropguard::backend::BackendError;

async fn test_store() -> CredentialStore {
    let pool = open_database("sqlite::memory:").await.unwrap();
    CredentialStore::with_hash_cost(pool, 4)
}

async fn stored_hash(store: &CredentialStore, name: &str) -> String {
    sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE name = ?")
        .bind(name)
        .fetch_one(store.pool())
        .await
        .unwrap()
}

/// bcrypt only reads this many bytes of input
const BCRYPT_MAX_BYTES: usize = 72;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_register_then_verify(
        name in "[a-zA-Z0-9_]{1,24}",
        password in "\\PC{1,100}",
        suffix in "\\PC{1,4}",
    ) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let store = test_store().await;

            if password.len() > BCRYPT_MAX_BYTES {
                assert_matches!(
                    store.register(&name, &password).await,
                    Err(BackendError::Validation(_))
                );
                assert_matches!(
                    store.verify(&name, &password).await,
                    Err(BackendError::InvalidCredentials)
                );
                return;
            }

            let registered = store.register(&name, &password).await.unwrap();
            let verified = store.verify(&name, &password).await.unwrap();
            assert_eq!(verified, registered);

            assert_ne!(stored_hash(&store, &name).await, password);

            let wrong = format!("{}{}", password, suffix);
            assert_matches!(store.verify(&name, &wrong).await, Err(BackendError::InvalidCredentials));

            assert_matches!(
                store.register(&name, &wrong).await,
                Err(BackendError::DuplicateIdentity)
            );
        });
    }
}

#[tokio::test]
async fn test_password_extending_stored_one_past_limit_is_rejected() {
    let store = test_store().await;
    let password = "p".repeat(BCRYPT_MAX_BYTES);
    store.register("alice", &password).await.unwrap();

    let shared_prefix = format!("{}x", password);
    assert_eq!(shared_prefix.len(), 73);
    assert_matches!(
        store.verify("alice", &shared_prefix).await,
        Err(BackendError::InvalidCredentials)
    );

    let multibyte = format!("{}ü", "p".repeat(BCRYPT_MAX_BYTES - 1));
    assert_matches!(
        store.register("bob", &multibyte).await,
        Err(BackendError::Validation(_))
    );
}

#[tokio::test]
async fn test_concurrent_registration_admits_one() {
    let store = test_store().await;

    let (first, second) = tokio::join!(
        store.register("alice", "secret123"),
        store.register("alice", "different456"),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| matches!(r, Err(BackendError::DuplicateIdentity)))
            .count(),
        1
    );
}
