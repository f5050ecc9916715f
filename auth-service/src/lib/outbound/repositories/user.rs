use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::user::errors::DirectoryError;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserDirectory;

/// Directory backed by a map built before serving and never written after.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: HashMap<Username, User>,
}

impl InMemoryUserDirectory {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.username.clone(), user))
            .collect();
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DirectoryError> {
        Ok(self.users.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, credential: &str) -> User {
        User::new(Username::new(name).unwrap(), credential)
    }

    #[tokio::test]
    async fn test_find_existing_user() {
        let directory = InMemoryUserDirectory::new([user("johndoe", "123")]);

        let found = directory
            .find_by_username(&Username::new("johndoe").unwrap())
            .await
            .unwrap();

        assert_eq!(found, Some(user("johndoe", "123")));
    }

    #[tokio::test]
    async fn test_find_missing_user() {
        let directory = InMemoryUserDirectory::new([user("johndoe", "123")]);

        let found = directory
            .find_by_username(&Username::new("nouser").unwrap())
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[test]
    fn test_later_duplicate_replaces_earlier() {
        let directory =
            InMemoryUserDirectory::new([user("johndoe", "old"), user("johndoe", "new")]);
        assert_eq!(directory.len(), 1);
    }
}
