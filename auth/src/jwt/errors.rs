use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Invalid token configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Token lifetime must be positive")]
    InvalidLifetime,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}

impl JwtError {
    /// True for every failure produced while decoding an untrusted token.
    pub fn is_invalid_token(&self) -> bool {
        matches!(
            self,
            JwtError::InvalidSignature
                | JwtError::Malformed(_)
                | JwtError::TokenExpired
                | JwtError::MissingClaim(_)
        )
    }
}
