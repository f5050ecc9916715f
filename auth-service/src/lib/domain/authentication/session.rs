use std::sync::Arc;

use auth::TokenCodec;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::authentication::errors::SessionError;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserDirectory;

/// Resolves a bearer token to the user it authenticates.
pub struct SessionResolver<UD>
where
    UD: UserDirectory,
{
    directory: Arc<UD>,
    codec: Arc<TokenCodec>,
}

impl<UD> SessionResolver<UD>
where
    UD: UserDirectory,
{
    pub fn new(directory: Arc<UD>, codec: Arc<TokenCodec>) -> Self {
        Self { directory, codec }
    }

    /// Decode the token, then look its subject up in the directory.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token invalid or expired, subject missing or unknown
    /// * `Directory` - Directory lookup failed
    pub async fn resolve_current_user(&self, token: &str) -> Result<User, SessionError> {
        self.resolve_current_user_at(token, Utc::now()).await
    }

    /// Same as [`resolve_current_user`](Self::resolve_current_user) with an
    /// explicit current time.
    pub async fn resolve_current_user_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<User, SessionError> {
        let claims = self.codec.decode_at(token, now).map_err(|e| {
            tracing::warn!(reason = %e, "Token rejected");
            SessionError::Unauthenticated
        })?;

        let subject = claims.subject().ok_or_else(|| {
            tracing::warn!("Token rejected: missing 'sub' claim");
            SessionError::Unauthenticated
        })?;

        let username = Username::new(subject).map_err(|e| {
            tracing::warn!(reason = %e, "Token rejected: invalid subject");
            SessionError::Unauthenticated
        })?;

        self.directory
            .find_by_username(&username)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username = %username, "Token rejected: subject not in directory");
                SessionError::Unauthenticated
            })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::Algorithm;
    use auth::ClaimSet;
    use auth::TokenConfig;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::user::errors::DirectoryError;

    mock! {
        pub TestUserDirectory {}

        #[async_trait]
        impl UserDirectory for TestUserDirectory {
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DirectoryError>;
        }
    }

    fn codec() -> Arc<TokenCodec> {
        let config = TokenConfig::new(
            b"test_secret_key_at_least_32_bytes!",
            Algorithm::HS256,
            Duration::minutes(30),
        )
        .unwrap();
        Arc::new(TokenCodec::new(config))
    }

    fn johndoe() -> User {
        User::new(Username::new("johndoe").unwrap(), "123")
    }

    fn directory_with_johndoe() -> MockTestUserDirectory {
        let mut directory = MockTestUserDirectory::new();
        directory
            .expect_find_by_username()
            .returning(|username| Ok((username.as_str() == "johndoe").then(johndoe)));
        directory
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_current_user() {
        let codec = codec();
        let resolver = SessionResolver::new(Arc::new(directory_with_johndoe()), Arc::clone(&codec));

        let token = codec
            .encode_at(&ClaimSet::for_subject("johndoe"), None, now())
            .unwrap();

        let user = resolver.resolve_current_user_at(&token, now()).await.unwrap();
        assert_eq!(user, johndoe());
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let codec = codec();
        let mut directory = MockTestUserDirectory::new();
        directory
            .expect_find_by_username()
            .times(3)
            .returning(|_| Ok(Some(johndoe())));
        let resolver = SessionResolver::new(Arc::new(directory), Arc::clone(&codec));

        let token = codec
            .encode_at(&ClaimSet::for_subject("johndoe"), None, now())
            .unwrap();

        for _ in 0..3 {
            let user = resolver.resolve_current_user_at(&token, now()).await.unwrap();
            assert_eq!(user.username.as_str(), "johndoe");
        }
    }

    #[tokio::test]
    async fn test_resolve_garbage_token() {
        let mut directory = MockTestUserDirectory::new();
        directory.expect_find_by_username().times(0);
        let resolver = SessionResolver::new(Arc::new(directory), codec());

        let result = resolver.resolve_current_user_at("garbage-string", now()).await;
        assert_eq!(result.unwrap_err(), SessionError::Unauthenticated);
    }

    #[tokio::test]
    async fn test_resolve_expired_token() {
        let codec = codec();
        let resolver = SessionResolver::new(Arc::new(directory_with_johndoe()), Arc::clone(&codec));

        let token = codec
            .encode_at(
                &ClaimSet::for_subject("johndoe"),
                Some(Duration::minutes(5)),
                now(),
            )
            .unwrap();

        let later = now() + Duration::minutes(5) + Duration::seconds(1);
        let result = resolver.resolve_current_user_at(&token, later).await;
        assert_eq!(result.unwrap_err(), SessionError::Unauthenticated);
    }

    #[tokio::test]
    async fn test_resolve_token_without_subject() {
        let codec = codec();
        let resolver = SessionResolver::new(Arc::new(directory_with_johndoe()), Arc::clone(&codec));

        let token = codec
            .encode_at(&ClaimSet::new().with_extra("role", "admin"), None, now())
            .unwrap();

        let result = resolver.resolve_current_user_at(&token, now()).await;
        assert_eq!(result.unwrap_err(), SessionError::Unauthenticated);
    }

    #[tokio::test]
    async fn test_resolve_token_with_invalid_subject() {
        let codec = codec();
        let resolver = SessionResolver::new(Arc::new(directory_with_johndoe()), Arc::clone(&codec));

        let token = codec
            .encode_at(&ClaimSet::for_subject("not a username"), None, now())
            .unwrap();

        let result = resolver.resolve_current_user_at(&token, now()).await;
        assert_eq!(result.unwrap_err(), SessionError::Unauthenticated);
    }

    #[tokio::test]
    async fn test_resolve_subject_no_longer_in_directory() {
        let codec = codec();
        let resolver = SessionResolver::new(Arc::new(directory_with_johndoe()), Arc::clone(&codec));

        let token = codec
            .encode_at(&ClaimSet::for_subject("janedoe"), None, now())
            .unwrap();

        let result = resolver.resolve_current_user_at(&token, now()).await;
        assert_eq!(result.unwrap_err(), SessionError::Unauthenticated);
    }

    #[tokio::test]
    async fn test_resolve_directory_failure() {
        let codec = codec();
        let mut directory = MockTestUserDirectory::new();
        directory
            .expect_find_by_username()
            .returning(|_| Err(DirectoryError::Unavailable("timeout".to_string())));
        let resolver = SessionResolver::new(Arc::new(directory), Arc::clone(&codec));

        let token = codec
            .encode_at(&ClaimSet::for_subject("johndoe"), None, now())
            .unwrap();

        let result = resolver.resolve_current_user_at(&token, now()).await;
        assert!(matches!(result, Err(SessionError::Directory(_))));
    }
}
