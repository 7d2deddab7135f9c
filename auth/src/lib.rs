//! Authentication utilities library
//!
//! Provides the credential primitives for the configuration store:
//! - Password hashing (Argon2id)
//! - Signed bearer token issuance and verification
//!
//! The service crate defines its own ports and adapts these implementations,
//! keeping cryptographic concerns out of the domain layer.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use std::collections::HashMap;
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let token = tokens.issue("alice", HashMap::new()).unwrap();
//! let claims = tokens.verify(&token).unwrap();
//! assert_eq!(claims.subject(), "alice");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenService;
pub use token::TOKEN_TTL_SECONDS;
