use std::sync::Arc;

use auth::ClaimSet;
use auth::TokenCodec;

use crate::domain::authentication::errors::AuthenticationError;
use crate::domain::authentication::models::IssuedToken;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::CredentialVerifier;
use crate::domain::user::ports::UserDirectory;

/// Checks login credentials and mints access tokens.
///
/// Holds no secret material: signing is delegated to the shared codec.
pub struct AuthenticationService<UD, CV>
where
    UD: UserDirectory,
    CV: CredentialVerifier,
{
    directory: Arc<UD>,
    verifier: Arc<CV>,
    codec: Arc<TokenCodec>,
}

impl<UD, CV> AuthenticationService<UD, CV>
where
    UD: UserDirectory,
    CV: CredentialVerifier,
{
    pub fn new(directory: Arc<UD>, verifier: Arc<CV>, codec: Arc<TokenCodec>) -> Self {
        Self {
            directory,
            verifier,
            codec,
        }
    }

    /// Verify a username/password pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user, malformed username or wrong password
    /// * `Directory` - Directory lookup failed
    /// * `Credential` - Stored credential could not be checked
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, AuthenticationError> {
        let username = match Username::new(username) {
            Ok(username) => username,
            Err(e) => {
                tracing::debug!(reason = %e, "Login rejected: malformed username");
                self.verifier.verify_decoy(password);
                return Err(AuthenticationError::InvalidCredentials);
            }
        };

        let Some(user) = self.directory.find_by_username(&username).await? else {
            tracing::debug!(username = %username, "Login rejected: unknown user");
            self.verifier.verify_decoy(password);
            return Err(AuthenticationError::InvalidCredentials);
        };

        if !self.verifier.verify(password, &user.credential)? {
            tracing::debug!(username = %username, "Login rejected: password mismatch");
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Authenticate and issue a bearer token for the user.
    ///
    /// The token carries `sub = username` and the configured default lifetime.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        let user = self.authenticate(username, password).await?;

        let claims = ClaimSet::for_subject(user.username.as_str());
        let lifetime = self.codec.config().default_lifetime();
        let access_token = self.codec.encode(&claims, Some(lifetime))?;

        tracing::info!(
            username = %user.username,
            lifetime_secs = lifetime.num_seconds(),
            "Access token issued"
        );

        Ok(IssuedToken::bearer(access_token))
    }
}
