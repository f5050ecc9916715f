use async_trait::async_trait;

use crate::domain::user::errors::CredentialError;
use crate::domain::user::errors::DirectoryError;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;

/// Read-only lookup of user records.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user record (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Backing store could not be queried
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DirectoryError>;
}

/// Compares a supplied secret against a stored credential reference.
pub trait CredentialVerifier: Send + Sync + 'static {
    /// # Returns
    /// True if the secret matches the reference
    ///
    /// # Errors
    /// * `VerificationFailed` - Reference could not be checked (e.g. corrupt hash)
    fn verify(&self, supplied: &str, reference: &str) -> Result<bool, CredentialError>;

    /// Spend the cost of one verification when no user record exists, so an
    /// unknown username takes as long to reject as a wrong password.
    fn verify_decoy(&self, supplied: &str);
}
