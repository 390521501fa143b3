//! Staff account repository trait

use async_trait::async_trait;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Repository for staff accounts
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Get an account by ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get an account by login email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new account
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing account
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Record a login timestamp for an account
    async fn record_login(&self, id: &UserId) -> Result<(), DomainError>;

    /// Count all accounts
    async fn count(&self) -> Result<usize, DomainError>;
}
