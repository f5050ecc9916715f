use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::Algorithm;

use super::errors::JwtError;

/// Signing parameters for a [`TokenCodec`](super::TokenCodec).
///
/// Built once at startup and never mutated afterwards. Only the HMAC family
/// is accepted since tokens are signed with a shared secret.
#[derive(Clone)]
pub struct TokenConfig {
    secret: Vec<u8>,
    algorithm: Algorithm,
    default_lifetime: Duration,
    max_lifetime: Option<Duration>,
    issuer: Option<String>,
}

impl TokenConfig {
    /// Create a token configuration.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret
    /// * `algorithm` - HS256, HS384 or HS512
    /// * `default_lifetime` - Lifetime applied when encode gets no override
    ///
    /// # Errors
    /// * `InvalidConfiguration` - Empty secret or non-HMAC algorithm
    /// * `InvalidLifetime` - Default lifetime is shorter than one second or
    ///   reaches past the representable date range
    pub fn new(
        secret: &[u8],
        algorithm: Algorithm,
        default_lifetime: Duration,
    ) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidConfiguration(
                "signing secret must not be empty".to_string(),
            ));
        }

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(JwtError::InvalidConfiguration(format!(
                "unsupported signing algorithm {:?}, expected HS256, HS384 or HS512",
                algorithm
            )));
        }

        if !is_valid_lifetime(default_lifetime) {
            return Err(JwtError::InvalidLifetime);
        }

        Ok(Self {
            secret: secret.to_vec(),
            algorithm,
            default_lifetime,
            max_lifetime: None,
            issuer: None,
        })
    }

    /// Parse an algorithm name such as `"HS256"`.
    pub fn parse_algorithm(name: &str) -> Result<Algorithm, JwtError> {
        Algorithm::from_str(&name.trim().to_uppercase()).map_err(|_| {
            JwtError::InvalidConfiguration(format!("unknown signing algorithm: {}", name))
        })
    }

    /// Cap every issued token's lifetime, overrides included.
    ///
    /// # Errors
    /// * `InvalidLifetime` - Maximum is shorter than one second
    /// * `InvalidConfiguration` - Maximum is shorter than the default lifetime
    pub fn with_max_lifetime(mut self, max_lifetime: Duration) -> Result<Self, JwtError> {
        if !is_valid_lifetime(max_lifetime) {
            return Err(JwtError::InvalidLifetime);
        }
        if max_lifetime < self.default_lifetime {
            return Err(JwtError::InvalidConfiguration(
                "maximum lifetime is shorter than the default lifetime".to_string(),
            ));
        }
        self.max_lifetime = Some(max_lifetime);
        Ok(self)
    }

    /// Stamp issued tokens with `iss` and require it on decode.
    pub fn with_issuer(mut self, issuer: impl ToString) -> Self {
        self.issuer = Some(issuer.to_string());
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn default_lifetime(&self) -> Duration {
        self.default_lifetime
    }

    pub fn max_lifetime(&self) -> Option<Duration> {
        self.max_lifetime
    }

    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    pub(crate) fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Resolve the lifetime for one token: the override or the default,
    /// clamped to the configured maximum.
    pub fn effective_lifetime(&self, requested: Option<Duration>) -> Result<Duration, JwtError> {
        let lifetime = requested.unwrap_or(self.default_lifetime);
        if !is_valid_lifetime(lifetime) {
            return Err(JwtError::InvalidLifetime);
        }

        Ok(match self.max_lifetime {
            Some(max) if lifetime > max => max,
            _ => lifetime,
        })
    }
}

// `exp` has one-second resolution, so anything shorter could be expired on issue.
// Anything that overflows the date range from now can never be stamped.
fn is_valid_lifetime(lifetime: Duration) -> bool {
    lifetime.num_seconds() >= 1 && Utc::now().checked_add_signed(lifetime).is_some()
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("default_lifetime", &self.default_lifetime)
            .field("max_lifetime", &self.max_lifetime)
            .field("issuer", &self.issuer)
            .finish()
    }
}
