//! Staff account service

use std::sync::Arc;

use tracing::info;

use crate::domain::user::{validate_email, validate_password, User, UserId, UserRepository};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for creating a new staff account
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

/// Service for staff accounts and credential checks
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Create a new staff account
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.get_by_email(&request.email).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                request.email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(UserId::generate(), &request.email, password_hash)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        info!(email = %request.email, "Creating staff account");

        self.repository.create(user).await
    }

    /// Authenticate with email and password.
    ///
    /// Unknown email, wrong password and suspended account all come back as
    /// `None` so the caller cannot tell them apart.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let user = match self.repository.get_by_email(email).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        if !user.is_active() {
            return Ok(None);
        }

        if !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        self.repository.record_login(user.id()).await?;

        // Re-fetch to pick up the recorded login timestamp
        self.repository.get(user.id()).await
    }

    /// Get an account by ID
    pub async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        let user_id = UserId::parse(id)?;
        self.repository.get(&user_id).await
    }

    /// Count all accounts
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository};

    fn create_service() -> UserService<InMemoryUserRepository, Argon2Hasher> {
        UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2Hasher::new()),
        )
    }

    #[tokio::test]
    async fn test_create_account() {
        let service = create_service();

        let user = service
            .create(CreateUserRequest {
                email: "admin@meninosdeouro.org".to_string(),
                password: "super secret".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.email(), "admin@meninosdeouro.org");
        assert_ne!(user.password_hash(), "super secret");
    }

    #[tokio::test]
    async fn test_create_rejects_short_password() {
        let service = create_service();

        let result = service
            .create(CreateUserRequest {
                email: "admin@meninosdeouro.org".to_string(),
                password: "short".to_string(),
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let service = create_service();
        let request = CreateUserRequest {
            email: "admin@meninosdeouro.org".to_string(),
            password: "super secret".to_string(),
        };

        service.create(request.clone()).await.unwrap();
        assert!(service.create(request).await.is_err());
    }

    #[tokio::test]
    async fn test_authenticate_success_records_login() {
        let service = create_service();

        service
            .create(CreateUserRequest {
                email: "admin@meninosdeouro.org".to_string(),
                password: "super secret".to_string(),
            })
            .await
            .unwrap();

        let user = service
            .authenticate("admin@meninosdeouro.org", "super secret")
            .await
            .unwrap()
            .unwrap();

        assert!(user.last_login_at().is_some());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let service = create_service();

        service
            .create(CreateUserRequest {
                email: "admin@meninosdeouro.org".to_string(),
                password: "super secret".to_string(),
            })
            .await
            .unwrap();

        let result = service
            .authenticate("admin@meninosdeouro.org", "wrong password")
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let service = create_service();

        let result = service
            .authenticate("ghost@meninosdeouro.org", "whatever123")
            .await
            .unwrap();

        assert!(result.is_none());
    }
}
