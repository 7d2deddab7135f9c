use thiserror::Error;

/// Error for credential input validation failures.
///
/// Raised before any hashing or store interaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username must be at least {min} characters")]
    UsernameTooShort { min: usize, actual: usize },

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize, actual: usize },
}

/// Error for identity store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Username already exists: {0}")]
    UniqueViolation(String),

    #[error("Identity store error: {0}")]
    Unavailable(String),
}

/// Top-level error for credential operations.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Identity store error: {0}")]
    Store(String),
}

impl From<StoreError> for CredentialError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(username) => CredentialError::DuplicateUsername(username),
            StoreError::Unavailable(msg) => CredentialError::Store(msg),
        }
    }
}
