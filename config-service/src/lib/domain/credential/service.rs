use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::credential::errors::CredentialError;
use crate::credential::errors::ValidationError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::Username;
use crate::credential::ports::CredentialManagerPort;
use crate::credential::ports::IdentityStore;

const PASSWORD_MIN_LENGTH: usize = 6;

/// Credential orchestration service.
///
/// Coordinates input validation, password hashing, and the identity store.
/// Token issuance is left to the boundary layer.
pub struct CredentialManager<S>
where
    S: IdentityStore,
{
    store: Arc<S>,
    password_hasher: auth::PasswordHasher,
}

impl<S> CredentialManager<S>
where
    S: IdentityStore,
{
    /// Create a new credential manager with an injected store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<S> CredentialManagerPort for CredentialManager<S>
where
    S: IdentityStore,
{
    async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Credential, CredentialError> {
        // Fail fast: no hashing or store work for invalid input
        let username = Username::new(username.to_string())?;
        if password.len() < PASSWORD_MIN_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
                actual: password.len(),
            }
            .into());
        }

        let password_hash = self
            .password_hasher
            .hash(password)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;

        let credential = Credential {
            id: CredentialId::new(),
            username,
            password_hash,
            created_at: Utc::now(),
        };

        // Duplicates surface here as a unique-constraint violation
        Ok(self.store.save(credential).await?)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Credential>, CredentialError> {
        let Some(credential) = self.store.find_by_username(username).await? else {
            return Ok(None);
        };

        if self
            .password_hasher
            .verify(password, &credential.password_hash)
        {
            Ok(Some(credential))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::credential::errors::StoreError;

    mock! {
        pub TestIdentityStore {}

        #[async_trait]
        impl IdentityStore for TestIdentityStore {
            async fn save(&self, credential: Credential) -> Result<Credential, StoreError>;
            async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, StoreError>;
            async fn find_by_id(&self, id: &CredentialId) -> Result<Option<Credential>, StoreError>;
        }
    }

    fn stored_credential(username: &str, password_hash: String) -> Credential {
        Credential {
            id: CredentialId::new(),
            username: Username::new(username.to_string()).unwrap(),
            password_hash,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut store = MockTestIdentityStore::new();

        store
            .expect_save()
            .withf(|credential| {
                credential.username.as_str() == "alice"
                    && credential.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|credential| Ok(credential));

        let manager = CredentialManager::new(Arc::new(store));

        let credential = manager
            .register("alice", "password123")
            .await
            .expect("Registration failed");

        assert_eq!(credential.username.as_str(), "alice");
        assert!(credential.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_short_username_skips_store() {
        let mut store = MockTestIdentityStore::new();
        store.expect_save().times(0);

        let manager = CredentialManager::new(Arc::new(store));

        let result = manager.register("ab", "password123").await;
        assert!(matches!(
            result,
            Err(CredentialError::Validation(
                ValidationError::UsernameTooShort { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_register_short_password_skips_store() {
        let mut store = MockTestIdentityStore::new();
        store.expect_save().times(0);

        let manager = CredentialManager::new(Arc::new(store));

        let result = manager.register("alice", "12345").await;
        assert!(matches!(
            result,
            Err(CredentialError::Validation(
                ValidationError::PasswordTooShort { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut store = MockTestIdentityStore::new();

        // First registration lands, second hits the uniqueness constraint
        store.expect_save().times(1).returning(|credential| Ok(credential));
        store
            .expect_save()
            .times(1)
            .returning(|credential| {
                Err(StoreError::UniqueViolation(
                    credential.username.as_str().to_string(),
                ))
            });

        let manager = CredentialManager::new(Arc::new(store));

        let first = manager.register("alice", "password123").await;
        assert!(first.is_ok());

        let second = manager.register("alice", "password456").await;
        assert!(matches!(
            second,
            Err(CredentialError::DuplicateUsername(username)) if username == "alice"
        ));
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let mut store = MockTestIdentityStore::new();

        store
            .expect_save()
            .times(1)
            .returning(|credential| Ok(credential));

        let manager = CredentialManager::new(Arc::new(store));
        let credential = manager
            .register("alice", "password123")
            .await
            .expect("Registration failed");

        // Same stored hash presented back on lookup
        let mut store = MockTestIdentityStore::new();
        let stored = credential.clone();
        store
            .expect_find_by_username()
            .withf(|username| username == "alice")
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let manager = CredentialManager::new(Arc::new(store));
        let authenticated = manager
            .authenticate("alice", "password123")
            .await
            .expect("Authentication errored")
            .expect("Authentication should succeed");

        assert_eq!(authenticated.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let hash = auth::PasswordHasher::new().hash("password123").unwrap();

        let mut store = MockTestIdentityStore::new();
        store
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored_credential("alice", hash.clone()))));

        let manager = CredentialManager::new(Arc::new(store));

        let result = manager.authenticate("alice", "wrong_password").await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_username() {
        let mut store = MockTestIdentityStore::new();
        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let manager = CredentialManager::new(Arc::new(store));

        // Indistinguishable from a wrong password
        let result = manager.authenticate("nobody", "password123").await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_authenticate_malformed_stored_hash() {
        let mut store = MockTestIdentityStore::new();
        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_credential("alice", "garbage".to_string()))));

        let manager = CredentialManager::new(Arc::new(store));

        let result = manager.authenticate("alice", "password123").await;
        assert!(matches!(result, Ok(None)));
    }
}
