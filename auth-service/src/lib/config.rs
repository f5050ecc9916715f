use std::env;
use std::fmt;

use auth::JwtError;
use auth::TokenConfig;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::user::errors::UsernameError;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
    #[serde(default)]
    pub max_expiration_minutes: Option<i64>,
    #[serde(default)]
    pub issuer: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub verifier: VerifierKind,
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

/// How stored credential references are compared.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerifierKind {
    /// Reference is the secret itself
    #[default]
    Plaintext,
    /// Reference is an Argon2 PHC string
    Argon2,
}

#[derive(Deserialize, Clone)]
pub struct SeedUser {
    pub username: String,
    pub credential: String,
}

fn default_http_port() -> u16 {
    8000
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expiration_minutes() -> i64 {
    15
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. `SECRET_KEY`, `ALGORITHM`, `ACCESS_TOKEN_EXPIRE_MINUTES`
    /// 2. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__").try_parsing(true))
            .set_override_option("jwt.secret", env::var("SECRET_KEY").ok())?
            .set_override_option("jwt.algorithm", env::var("ALGORITHM").ok())?
            .set_override_option(
                "jwt.expiration_minutes",
                env::var("ACCESS_TOKEN_EXPIRE_MINUTES").ok(),
            )?
            .build()?;

        configuration.try_deserialize()
    }
}

impl JwtConfig {
    /// Build the immutable codec configuration.
    ///
    /// # Errors
    /// * `InvalidConfiguration` - Unknown algorithm, empty secret, bad maximum
    /// * `InvalidLifetime` - Lifetime below one second or out of range
    pub fn token_config(&self) -> Result<TokenConfig, JwtError> {
        let algorithm = TokenConfig::parse_algorithm(&self.algorithm)?;
        let lifetime = minutes(self.expiration_minutes)?;

        let mut token_config = TokenConfig::new(self.secret.as_bytes(), algorithm, lifetime)?;
        if let Some(max_minutes) = self.max_expiration_minutes {
            token_config = token_config.with_max_lifetime(minutes(max_minutes)?)?;
        }
        if let Some(issuer) = &self.issuer {
            token_config = token_config.with_issuer(issuer);
        }

        Ok(token_config)
    }
}

fn minutes(value: i64) -> Result<Duration, JwtError> {
    Duration::try_minutes(value).ok_or(JwtError::InvalidLifetime)
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("expiration_minutes", &self.expiration_minutes)
            .field("max_expiration_minutes", &self.max_expiration_minutes)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl DirectoryConfig {
    /// Validate the seeded users into directory records.
    pub fn users(&self) -> Result<Vec<User>, UsernameError> {
        self.users
            .iter()
            .map(|seed| {
                Username::new(seed.username.as_str())
                    .map(|username| User::new(username, seed.credential.as_str()))
            })
            .collect()
    }
}

impl fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedUser")
            .field("username", &self.username)
            .field("credential", &"<redacted>")
            .finish()
    }
}
