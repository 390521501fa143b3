//! Student repository trait

use async_trait::async_trait;

use super::entity::{Student, StudentId};
use crate::domain::DomainError;

/// Query parameters for listing students
#[derive(Debug, Clone, Default)]
pub struct StudentQuery {
    /// Case-insensitive name substring filter
    pub search: Option<String>,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Offset for pagination
    pub offset: Option<usize>,
}

impl StudentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Check whether a student matches the search filter
    pub fn matches(&self, student: &Student) -> bool {
        match &self.search {
            Some(needle) => student
                .full_name()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

/// Repository for the student roster
#[async_trait]
pub trait StudentRepository: Send + Sync + std::fmt::Debug {
    /// Get a student by ID
    async fn get(&self, id: &StudentId) -> Result<Option<Student>, DomainError>;

    /// Register a new student
    async fn create(&self, student: Student) -> Result<Student, DomainError>;

    /// Update an existing student
    async fn update(&self, student: Student) -> Result<Student, DomainError>;

    /// Delete a student by ID
    async fn delete(&self, id: &StudentId) -> Result<bool, DomainError>;

    /// List students matching the query, sorted by name
    async fn list(&self, query: &StudentQuery) -> Result<Vec<Student>, DomainError>;

    /// Count students matching the query
    async fn count(&self, query: &StudentQuery) -> Result<usize, DomainError>;
}
