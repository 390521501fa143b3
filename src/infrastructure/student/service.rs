//! Student roster service

use std::sync::Arc;

use bytes::Bytes;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::student::{
    Gender, Student, StudentDetails, StudentId, StudentQuery, StudentRepository,
};
use crate::domain::DomainError;

use super::photo::PhotoStore;

/// Request for registering a new student
#[derive(Debug, Clone)]
pub struct RegisterStudentRequest {
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub city: String,
    pub postal_code: String,
    pub guardian_name: String,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub guardian_contact: Option<String>,
    pub address: Option<String>,
}

/// Request for updating a student; absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateStudentRequest {
    pub full_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub guardian_name: Option<String>,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub guardian_contact: Option<String>,
    pub address: Option<String>,
}

/// Service for roster management
#[derive(Debug)]
pub struct StudentService<R: StudentRepository, P: PhotoStore> {
    repository: Arc<R>,
    photo_store: Arc<P>,
}

impl<R: StudentRepository, P: PhotoStore> StudentService<R, P> {
    pub fn new(repository: Arc<R>, photo_store: Arc<P>) -> Self {
        Self {
            repository,
            photo_store,
        }
    }

    /// Register a new student
    pub async fn register(&self, request: RegisterStudentRequest) -> Result<Student, DomainError> {
        info!(full_name = %request.full_name, "Registering student");

        let mut student = Student::new(
            StudentId::generate(),
            StudentDetails {
                full_name: request.full_name,
                birth_date: request.birth_date,
                gender: request.gender,
                city: request.city,
                postal_code: request.postal_code,
                guardian_name: request.guardian_name,
            },
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(cpf) = request.cpf {
            student
                .set_cpf(&cpf)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        if let Some(rg) = request.rg {
            student.set_rg(rg);
        }
        if let Some(contact) = request.guardian_contact {
            student.set_guardian_contact(contact);
        }
        if let Some(address) = request.address {
            student.set_address(address);
        }

        self.repository.create(student).await
    }

    /// Get a student by ID
    pub async fn get(&self, id: &str) -> Result<Option<Student>, DomainError> {
        let student_id = StudentId::parse(id)?;
        self.repository.get(&student_id).await
    }

    /// List students matching the query
    pub async fn list(&self, query: StudentQuery) -> Result<Vec<Student>, DomainError> {
        self.repository.list(&query).await
    }

    /// Count students matching the query
    pub async fn count(&self, query: StudentQuery) -> Result<usize, DomainError> {
        self.repository.count(&query).await
    }

    /// Update a student
    pub async fn update(
        &self,
        id: &str,
        request: UpdateStudentRequest,
    ) -> Result<Student, DomainError> {
        info!(id = %id, "Updating student");

        let student_id = StudentId::parse(id)?;
        let mut student = self
            .repository
            .get(&student_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Student '{}' not found", id)))?;

        if let Some(name) = request.full_name {
            student
                .set_full_name(name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        if let Some(date) = request.birth_date {
            student
                .set_birth_date(date)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        if let Some(gender) = request.gender {
            student.set_gender(gender);
        }
        if let Some(city) = request.city {
            student
                .set_city(city)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        if let Some(postal_code) = request.postal_code {
            student
                .set_postal_code(&postal_code)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        if let Some(guardian) = request.guardian_name {
            student
                .set_guardian_name(guardian)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        if let Some(cpf) = request.cpf {
            student
                .set_cpf(&cpf)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        if let Some(rg) = request.rg {
            student.set_rg(rg);
        }
        if let Some(contact) = request.guardian_contact {
            student.set_guardian_contact(contact);
        }
        if let Some(address) = request.address {
            student.set_address(address);
        }

        self.repository.update(student).await
    }

    /// Delete a student, cleaning up any stored photo
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        info!(id = %id, "Deleting student");

        let student_id = StudentId::parse(id)?;

        if let Some(student) = self.repository.get(&student_id).await? {
            if let Some(photo) = student.photo() {
                if let Err(e) = self.photo_store.remove(photo).await {
                    warn!(id = %id, error = %e, "Failed to remove photo, leaving it behind");
                }
            }
        }

        self.repository.delete(&student_id).await
    }

    /// Store an uploaded photo and attach it to the student
    pub async fn attach_photo(
        &self,
        id: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<Student, DomainError> {
        info!(id = %id, content_type = %content_type, "Attaching photo");

        let student_id = StudentId::parse(id)?;
        let mut student = self
            .repository
            .get(&student_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Student '{}' not found", id)))?;

        let path = self.photo_store.save(&student_id, content_type, data).await?;
        student.set_photo(Some(path));

        self.repository.update(student).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::student::mock::MockStudentRepository;
    use async_trait::async_trait;

    #[derive(Debug, Default)]
    struct StubPhotoStore;

    #[async_trait]
    impl PhotoStore for StubPhotoStore {
        async fn save(
            &self,
            student_id: &StudentId,
            _content_type: &str,
            _data: Bytes,
        ) -> Result<String, DomainError> {
            Ok(format!("{}.jpg", student_id))
        }

        async fn remove(&self, _path: &str) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn create_service() -> StudentService<MockStudentRepository, StubPhotoStore> {
        StudentService::new(
            Arc::new(MockStudentRepository::new()),
            Arc::new(StubPhotoStore),
        )
    }

    fn register_request(name: &str) -> RegisterStudentRequest {
        RegisterStudentRequest {
            full_name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2011, 8, 2).unwrap(),
            gender: Gender::Female,
            city: "Santa Helena".to_string(),
            postal_code: "58340-000".to_string(),
            guardian_name: "Maria Souza".to_string(),
            cpf: None,
            rg: None,
            guardian_contact: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn test_register_student() {
        let service = create_service();

        let student = service.register(register_request("Ana Lima")).await.unwrap();

        assert_eq!(student.full_name(), "Ana Lima");
        assert_eq!(student.postal_code(), "58340000");
    }

    #[tokio::test]
    async fn test_register_with_optional_fields() {
        let service = create_service();

        let mut request = register_request("Ana Lima");
        request.cpf = Some("123.456.789-09".to_string());
        request.guardian_contact = Some("(83) 99999-0000".to_string());

        let student = service.register(request).await.unwrap();

        assert_eq!(student.cpf(), Some("12345678909"));
        assert_eq!(student.guardian_contact(), Some("(83) 99999-0000"));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_postal_code() {
        let service = create_service();

        let mut request = register_request("Ana Lima");
        request.postal_code = "nope".to_string();

        assert!(service.register(request).await.is_err());
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let service = create_service();
        let student = service.register(register_request("Ana Lima")).await.unwrap();

        let updated = service
            .update(
                &student.id().to_string(),
                UpdateStudentRequest {
                    city: Some("Pilar".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.city(), "Pilar");
        assert_eq!(updated.full_name(), "Ana Lima");
    }

    #[tokio::test]
    async fn test_update_missing_student() {
        let service = create_service();
        let ghost = StudentId::generate().to_string();

        let result = service.update(&ghost, UpdateStudentRequest::default()).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_rejects_malformed_id() {
        let service = create_service();
        assert!(service.get("not-a-uuid").await.is_err());
    }

    #[tokio::test]
    async fn test_attach_photo_records_path() {
        let service = create_service();
        let student = service.register(register_request("Ana Lima")).await.unwrap();

        let updated = service
            .attach_photo(
                &student.id().to_string(),
                "image/jpeg",
                Bytes::from_static(b"fake"),
            )
            .await
            .unwrap();

        assert_eq!(updated.photo(), Some(format!("{}.jpg", student.id()).as_str()));
    }

    #[tokio::test]
    async fn test_delete_student() {
        let service = create_service();
        let student = service.register(register_request("Ana Lima")).await.unwrap();

        assert!(service.delete(&student.id().to_string()).await.unwrap());
        assert!(service
            .get(&student.id().to_string())
            .await
            .unwrap()
            .is_none());
    }
}
