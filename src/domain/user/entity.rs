//! Staff account entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_email, UserValidationError};
use crate::domain::DomainError;

/// Staff account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| DomainError::invalid_id(format!("'{}' is not a valid user id", raw)))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a staff account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Account is active and can log in
    #[default]
    Active,
    /// Account is temporarily suspended
    Suspended,
}

impl UserStatus {
    /// Check if the account can log in
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Suspended => write!(f, "suspended"),
        }
    }
}

/// Staff account used to operate the roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    /// Login email
    email: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    status: UserStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new account with an already-hashed password
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let email = email.into();
        validate_email(&email)?;
        let now = Utc::now();

        Ok(Self {
            id,
            email,
            password_hash: password_hash.into(),
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        })
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Check if the account is active and can log in
    pub fn is_active(&self) -> bool {
        self.status.can_login()
    }

    // Mutators

    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    /// Record a login
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }

    pub fn suspend(&mut self) {
        self.status = UserStatus::Suspended;
        self.touch();
    }

    pub fn activate(&mut self) {
        if self.status == UserStatus::Suspended {
            self.status = UserStatus::Active;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(email: &str) -> User {
        User::new(UserId::generate(), email, "hashed_password").unwrap()
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user("admin@meninosdeouro.org");

        assert_eq!(user.email(), "admin@meninosdeouro.org");
        assert_eq!(user.password_hash(), "hashed_password");
        assert!(user.is_active());
        assert!(user.last_login_at().is_none());
    }

    #[test]
    fn test_user_creation_rejects_invalid_email() {
        let result = User::new(UserId::generate(), "not-an-email", "hash");
        assert!(result.is_err());
    }

    #[test]
    fn test_user_status_changes() {
        let mut user = create_test_user("admin@meninosdeouro.org");

        user.suspend();
        assert!(!user.is_active());
        assert_eq!(user.status(), UserStatus::Suspended);

        user.activate();
        assert!(user.is_active());
    }

    #[test]
    fn test_user_record_login() {
        let mut user = create_test_user("admin@meninosdeouro.org");

        assert!(user.last_login_at().is_none());
        user.record_login();
        assert!(user.last_login_at().is_some());
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = create_test_user("admin@meninosdeouro.org");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
    }
}
