use thiserror::Error;

use crate::domain::user::errors::CredentialError;
use crate::domain::user::errors::DirectoryError;

/// Errors from login and credential checks.
///
/// Unknown user, malformed username and wrong password all collapse into
/// `InvalidCredentials`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Token issue failed: {0}")]
    TokenIssue(#[from] auth::JwtError),
}

/// Errors from resolving the current user of a bearer token.
///
/// Every token or subject problem is `Unauthenticated`; the reason is logged
/// only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
}
