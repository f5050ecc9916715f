use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::ClaimSet;
use super::config::TokenConfig;
use super::errors::JwtError;

/// Signs claim sets into compact JWTs and verifies them back.
///
/// Owns the token configuration; callers never see the signing secret.
/// Signature checks go through the HMAC verification of `jsonwebtoken`,
/// which compares in constant time.
pub struct TokenCodec {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec from an immutable token configuration.
    pub fn new(config: TokenConfig) -> Self {
        let mut validation = Validation::new(config.algorithm());
        // Expiration is checked in `decode_at` against a single clock reading.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        if let Some(issuer) = config.issuer() {
            validation.set_issuer(&[issuer]);
        }

        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            validation,
            config,
        }
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Encode claims into a signed token expiring after `lifetime`, or after
    /// the configured default lifetime when `None`.
    ///
    /// # Errors
    /// * `InvalidLifetime` - Override shorter than one second, or expiration
    ///   past the representable date range
    /// * `EncodingFailed` - Claims could not be serialized
    pub fn encode(&self, claims: &ClaimSet, lifetime: Option<Duration>) -> Result<String, JwtError> {
        self.encode_at(claims, lifetime, Utc::now())
    }

    /// Same as [`encode`](Self::encode) with an explicit issue time.
    pub fn encode_at(
        &self,
        claims: &ClaimSet,
        lifetime: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let lifetime = self.config.effective_lifetime(lifetime)?;

        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or(JwtError::InvalidLifetime)?;

        let mut to_encode = claims.clone();
        to_encode.exp = Some(expires_at.timestamp());
        if let Some(issuer) = self.config.issuer() {
            to_encode.iss = Some(issuer.to_string());
        }
        // Named claims win over pass-through entries with the same key.
        to_encode.extra.remove("exp");
        if to_encode.sub.is_some() {
            to_encode.extra.remove("sub");
        }
        if to_encode.iss.is_some() {
            to_encode.extra.remove("iss");
        }

        let header = Header::new(self.config.algorithm());
        encode(&header, &to_encode, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify and decode a token from an untrusted source.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match
    /// * `Malformed` - Bad structure, algorithm mismatch or wrong issuer
    /// * `MissingClaim` - No `exp` claim
    /// * `TokenExpired` - `exp` is at or before the current time
    pub fn decode(&self, token: &str) -> Result<ClaimSet, JwtError> {
        self.decode_at(token, Utc::now())
    }

    /// Same as [`decode`](Self::decode) with an explicit current time.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, JwtError> {
        let token_data = decode::<ClaimSet>(token, &self.decoding_key, &self.validation)
            .map_err(map_decode_error)?;
        let claims = token_data.claims;

        if claims.exp.is_none() {
            return Err(JwtError::MissingClaim("exp".to_string()));
        }
        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

fn map_decode_error(error: jsonwebtoken::errors::Error) -> JwtError {
    match error.kind() {
        ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
        _ => JwtError::Malformed(error.to_string()),
    }
}
