//! In-memory staff account repository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of [`UserRepository`]
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
    /// email -> user ID lookup
    email_index: RwLock<HashMap<String, UserId>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email_index = self.email_index.read().await;

        if let Some(user_id) = email_index.get(email) {
            let users = self.users.read().await;
            return Ok(users.get(user_id).cloned());
        }

        Ok(None)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        if users.contains_key(user.id()) {
            return Err(DomainError::conflict(format!(
                "Account '{}' already exists",
                user.id()
            )));
        }

        if email_index.contains_key(user.email()) {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                user.email()
            )));
        }

        email_index.insert(user.email().to_string(), *user.id());
        users.insert(*user.id(), user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(user.id()) {
            return Err(DomainError::not_found(format!(
                "Account '{}' not found",
                user.id()
            )));
        }

        users.insert(*user.id(), user.clone());
        Ok(user.clone())
    }

    async fn record_login(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        let user = users
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("Account '{}' not found", id)))?;

        user.record_login();
        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let users = self.users.read().await;
        Ok(users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(email: &str) -> User {
        User::new(UserId::generate(), email, "hash").unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_by_email() {
        let repo = InMemoryUserRepository::new();
        let user = test_user("admin@meninosdeouro.org");

        repo.create(user.clone()).await.unwrap();

        let fetched = repo
            .get_by_email("admin@meninosdeouro.org")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id(), user.id());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let repo = InMemoryUserRepository::new();

        repo.create(test_user("staff@meninosdeouro.org"))
            .await
            .unwrap();
        let result = repo.create(test_user("staff@meninosdeouro.org")).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_record_login_updates_timestamp() {
        let repo = InMemoryUserRepository::new();
        let user = test_user("admin@meninosdeouro.org");
        let id = *user.id();

        repo.create(user).await.unwrap();
        repo.record_login(&id).await.unwrap();

        let fetched = repo.get(&id).await.unwrap().unwrap();
        assert!(fetched.last_login_at().is_some());
    }

    #[tokio::test]
    async fn test_count() {
        let repo = InMemoryUserRepository::new();
        assert_eq!(repo.count().await.unwrap(), 0);

        repo.create(test_user("a@example.com")).await.unwrap();
        repo.create(test_user("b@example.com")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let repo = InMemoryUserRepository::new();
        let user = test_user("ghost@example.com");

        assert!(repo.update(&user).await.is_err());
    }
}
