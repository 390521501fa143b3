//! Application state shared by all handlers

use std::sync::Arc;

use bytes::Bytes;

use crate::domain::draw::{DrawResult, Participant};
use crate::domain::student::{Student, StudentQuery, StudentRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::draw::{DrawService, DrawServiceError};
use crate::infrastructure::student::{
    PhotoStore, RegisterStudentRequest, StudentService, UpdateStudentRequest,
};
use crate::infrastructure::user::{CreateUserRequest, PasswordHasher, UserService};

/// Application state containing shared services behind dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub student_service: Arc<dyn StudentServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub draw_service: Arc<dyn DrawServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
}

impl AppState {
    pub fn new(
        student_service: Arc<dyn StudentServiceTrait>,
        user_service: Arc<dyn UserServiceTrait>,
        draw_service: Arc<dyn DrawServiceTrait>,
        jwt_service: Arc<dyn JwtGenerator>,
    ) -> Self {
        Self {
            student_service,
            user_service,
            draw_service,
            jwt_service,
        }
    }
}

/// Trait for roster operations
#[async_trait::async_trait]
pub trait StudentServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterStudentRequest) -> Result<Student, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Student>, DomainError>;
    async fn list(&self, query: StudentQuery) -> Result<Vec<Student>, DomainError>;
    async fn count(&self, query: StudentQuery) -> Result<usize, DomainError>;
    async fn update(&self, id: &str, request: UpdateStudentRequest)
        -> Result<Student, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn attach_photo(
        &self,
        id: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<Student, DomainError>;
}

/// Trait for staff account operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn authenticate(&self, email: &str, password: &str)
        -> Result<Option<User>, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<User>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for draw operations
#[async_trait::async_trait]
pub trait DrawServiceTrait: Send + Sync {
    async fn draw_teams(
        &self,
        student_ids: &[String],
        group_size: Option<usize>,
    ) -> Result<DrawResult, DrawServiceError>;
    async fn draw_student(&self, student_ids: &[String]) -> Result<Participant, DrawServiceError>;
}

// Implement the state traits for the concrete services

#[async_trait::async_trait]
impl<R, P> StudentServiceTrait for StudentService<R, P>
where
    R: StudentRepository + 'static,
    P: PhotoStore + 'static,
{
    async fn register(&self, request: RegisterStudentRequest) -> Result<Student, DomainError> {
        StudentService::register(self, request).await
    }

    async fn get(&self, id: &str) -> Result<Option<Student>, DomainError> {
        StudentService::get(self, id).await
    }

    async fn list(&self, query: StudentQuery) -> Result<Vec<Student>, DomainError> {
        StudentService::list(self, query).await
    }

    async fn count(&self, query: StudentQuery) -> Result<usize, DomainError> {
        StudentService::count(self, query).await
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateStudentRequest,
    ) -> Result<Student, DomainError> {
        StudentService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        StudentService::delete(self, id).await
    }

    async fn attach_photo(
        &self,
        id: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<Student, DomainError> {
        StudentService::attach_photo(self, id, content_type, data).await
    }
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        UserService::authenticate(self, email, password).await
    }

    async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}

#[async_trait::async_trait]
impl<R> DrawServiceTrait for DrawService<R>
where
    R: StudentRepository + 'static,
{
    async fn draw_teams(
        &self,
        student_ids: &[String],
        group_size: Option<usize>,
    ) -> Result<DrawResult, DrawServiceError> {
        DrawService::draw_teams(self, student_ids, group_size).await
    }

    async fn draw_student(&self, student_ids: &[String]) -> Result<Participant, DrawServiceError> {
        DrawService::draw_student(self, student_ids).await
    }
}
