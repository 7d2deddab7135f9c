use async_trait::async_trait;

use crate::credential::errors::CredentialError;
use crate::credential::errors::StoreError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;

/// Port for credential management operations.
#[async_trait]
pub trait CredentialManagerPort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// Input is validated before any hashing or store work. Duplicate
    /// usernames surface via the store's uniqueness constraint, never a
    /// pre-check, so concurrent registrations of the same name resolve to
    /// one success and one `DuplicateUsername`.
    ///
    /// # Arguments
    /// * `username` - Requested username (at least 3 characters)
    /// * `password` - Plaintext password (at least 6 characters)
    ///
    /// # Returns
    /// Persisted credential
    ///
    /// # Errors
    /// * `Validation` - Username or password too short
    /// * `DuplicateUsername` - Username is already taken
    /// * `Store` - Identity store operation failed
    async fn register(&self, username: &str, password: &str)
        -> Result<Credential, CredentialError>;

    /// Verify a username/password pair.
    ///
    /// Unknown usernames and wrong passwords both yield `Ok(None)`; callers
    /// cannot tell the two apart, preventing username enumeration.
    ///
    /// # Arguments
    /// * `username` - Claimed username
    /// * `password` - Plaintext password to check
    ///
    /// # Returns
    /// The credential on a full match, None otherwise
    ///
    /// # Errors
    /// * `Store` - Identity store operation failed
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Credential>, CredentialError>;
}

/// Persistence operations for credentials (external collaborator).
///
/// The store must enforce a uniqueness constraint on `username` so that
/// concurrent saves of the same name resolve to exactly one success.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Persist a new credential.
    ///
    /// # Arguments
    /// * `credential` - Credential to store
    ///
    /// # Returns
    /// The stored credential
    ///
    /// # Errors
    /// * `UniqueViolation` - Username is already taken
    /// * `Unavailable` - Store operation failed
    async fn save(&self, credential: Credential) -> Result<Credential, StoreError>;

    /// Look up a credential by username.
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, StoreError>;

    /// Look up a credential by identifier.
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    async fn find_by_id(&self, id: &CredentialId) -> Result<Option<Credential>, StoreError>;
}
