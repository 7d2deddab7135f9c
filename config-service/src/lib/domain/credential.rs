pub mod errors;
pub mod models;
pub mod ports;
pub mod service;

pub use errors::CredentialError;
pub use models::Credential;
pub use service::CredentialManager;
