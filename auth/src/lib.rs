//! Token and credential primitives.
//!
//! - Signed, time-limited bearer tokens (compact JWT, HMAC family)
//! - Constant-time comparison for plaintext credential references
//! - Argon2id hashing for PHC credential references
//!
//! Services define their own ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Tokens
//! ```
//! use auth::{Algorithm, ClaimSet, TokenCodec, TokenConfig};
//! use chrono::Duration;
//!
//! let config = TokenConfig::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Algorithm::HS256,
//!     Duration::minutes(15),
//! )
//! .unwrap();
//! let codec = TokenCodec::new(config);
//!
//! let token = codec.encode(&ClaimSet::for_subject("johndoe"), None).unwrap();
//! let claims = codec.decode(&token).unwrap();
//! assert_eq!(claims.subject(), Some("johndoe"));
//! ```
//!
//! ## Credentials
//! ```
//! use auth::{constant_time_eq, PasswordHasher};
//!
//! assert!(constant_time_eq(b"123", b"123"));
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("123").unwrap();
//! assert!(hasher.verify("123", &hash).unwrap());
//! ```

pub mod jwt;
pub mod password;

pub use jwt::ClaimSet;
pub use jwt::JwtError;
pub use jwt::TokenCodec;
pub use jwt::TokenConfig;
pub use password::constant_time_eq;
pub use password::PasswordError;
pub use password::PasswordHasher;

pub use jsonwebtoken::Algorithm;
