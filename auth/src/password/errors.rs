use thiserror::Error;

/// Error type for credential hashing and verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored credential could not be checked: {0}")]
    VerificationFailed(String),
}
