//! Student entity and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{
    normalize_cpf, normalize_postal_code, validate_birth_date, validate_city, validate_full_name,
    validate_guardian_name, StudentValidationError,
};
use crate::domain::DomainError;

/// Student identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(Uuid);

impl StudentId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| DomainError::invalid_id(format!("'{}' is not a valid student id", raw)))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gender as captured by the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Required fields for registering a student
#[derive(Debug, Clone)]
pub struct StudentDetails {
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub city: String,
    pub postal_code: String,
    pub guardian_name: String,
}

/// A registered student (aluno)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier, stable across draws
    id: StudentId,
    full_name: String,
    birth_date: NaiveDate,
    gender: Gender,
    city: String,
    /// Bare 8-digit CEP
    postal_code: String,
    guardian_name: String,
    /// Bare 11-digit CPF
    #[serde(skip_serializing_if = "Option::is_none")]
    cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    guardian_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    /// Media path of the stored photo, when one was uploaded
    #[serde(skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Student {
    /// Create a new student after validating the required fields
    pub fn new(id: StudentId, details: StudentDetails) -> Result<Self, StudentValidationError> {
        validate_full_name(&details.full_name)?;
        validate_birth_date(details.birth_date)?;
        validate_city(&details.city)?;
        validate_guardian_name(&details.guardian_name)?;
        let postal_code = normalize_postal_code(&details.postal_code)?;
        let now = Utc::now();

        Ok(Self {
            id,
            full_name: details.full_name,
            birth_date: details.birth_date,
            gender: details.gender,
            city: details.city,
            postal_code,
            guardian_name: details.guardian_name,
            cpf: None,
            rg: None,
            guardian_contact: None,
            address: None,
            photo: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Set the CPF (builder pattern)
    pub fn with_cpf(mut self, cpf: impl Into<String>) -> Result<Self, StudentValidationError> {
        self.cpf = Some(normalize_cpf(&cpf.into())?);
        Ok(self)
    }

    /// Set the RG (builder pattern)
    pub fn with_rg(mut self, rg: impl Into<String>) -> Self {
        self.rg = Some(rg.into());
        self
    }

    /// Set the guardian contact (builder pattern)
    pub fn with_guardian_contact(mut self, contact: impl Into<String>) -> Self {
        self.guardian_contact = Some(contact.into());
        self
    }

    /// Set the address (builder pattern)
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    // Getters

    pub fn id(&self) -> &StudentId {
        &self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn guardian_name(&self) -> &str {
        &self.guardian_name
    }

    pub fn cpf(&self) -> Option<&str> {
        self.cpf.as_deref()
    }

    pub fn rg(&self) -> Option<&str> {
        self.rg.as_deref()
    }

    pub fn guardian_contact(&self) -> Option<&str> {
        self.guardian_contact.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    pub fn set_full_name(&mut self, name: impl Into<String>) -> Result<(), StudentValidationError> {
        let name = name.into();
        validate_full_name(&name)?;
        self.full_name = name;
        self.touch();
        Ok(())
    }

    pub fn set_birth_date(&mut self, date: NaiveDate) -> Result<(), StudentValidationError> {
        validate_birth_date(date)?;
        self.birth_date = date;
        self.touch();
        Ok(())
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
        self.touch();
    }

    pub fn set_city(&mut self, city: impl Into<String>) -> Result<(), StudentValidationError> {
        let city = city.into();
        validate_city(&city)?;
        self.city = city;
        self.touch();
        Ok(())
    }

    pub fn set_postal_code(&mut self, raw: &str) -> Result<(), StudentValidationError> {
        self.postal_code = normalize_postal_code(raw)?;
        self.touch();
        Ok(())
    }

    pub fn set_guardian_name(
        &mut self,
        name: impl Into<String>,
    ) -> Result<(), StudentValidationError> {
        let name = name.into();
        validate_guardian_name(&name)?;
        self.guardian_name = name;
        self.touch();
        Ok(())
    }

    pub fn set_cpf(&mut self, raw: &str) -> Result<(), StudentValidationError> {
        self.cpf = Some(normalize_cpf(raw)?);
        self.touch();
        Ok(())
    }

    pub fn set_rg(&mut self, rg: impl Into<String>) {
        self.rg = Some(rg.into());
        self.touch();
    }

    pub fn set_guardian_contact(&mut self, contact: impl Into<String>) {
        self.guardian_contact = Some(contact.into());
        self.touch();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = Some(address.into());
        self.touch();
    }

    pub fn set_photo(&mut self, path: Option<String>) {
        self.photo = path;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
pub(crate) fn test_student(name: &str) -> Student {
    Student::new(
        StudentId::generate(),
        StudentDetails {
            full_name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2012, 5, 20).unwrap(),
            gender: Gender::Male,
            city: "Santa Helena".to_string(),
            postal_code: "58340-000".to_string(),
            guardian_name: "Maria Souza".to_string(),
        },
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_id_roundtrip() {
        let id = StudentId::generate();
        let parsed = StudentId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_student_id_invalid() {
        assert!(StudentId::parse("not-a-uuid").is_err());
        assert!(StudentId::parse("").is_err());
    }

    #[test]
    fn test_gender_serialization() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"male\"");
        assert_eq!(
            serde_json::to_string(&Gender::Female).unwrap(),
            "\"female\""
        );
        assert_eq!(serde_json::to_string(&Gender::Other).unwrap(), "\"other\"");
    }

    #[test]
    fn test_student_creation() {
        let student = test_student("João Silva");

        assert_eq!(student.full_name(), "João Silva");
        assert_eq!(student.postal_code(), "58340000");
        assert!(student.cpf().is_none());
        assert!(student.photo().is_none());
    }

    #[test]
    fn test_student_creation_rejects_empty_name() {
        let result = Student::new(
            StudentId::generate(),
            StudentDetails {
                full_name: String::new(),
                birth_date: NaiveDate::from_ymd_opt(2012, 5, 20).unwrap(),
                gender: Gender::Female,
                city: "Santa Helena".to_string(),
                postal_code: "58340-000".to_string(),
                guardian_name: "Maria Souza".to_string(),
            },
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_with_cpf_normalizes() {
        let student = test_student("João Silva")
            .with_cpf("123.456.789-09")
            .unwrap();

        assert_eq!(student.cpf(), Some("12345678909"));
    }

    #[test]
    fn test_with_cpf_rejects_malformed() {
        assert!(test_student("João Silva").with_cpf("123").is_err());
    }

    #[test]
    fn test_mutators_touch_updated_at() {
        let mut student = test_student("João Silva");
        let original = student.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        student.set_city("Pilar").unwrap();
        assert_eq!(student.city(), "Pilar");
        assert!(student.updated_at() > original);
    }

    #[test]
    fn test_set_photo() {
        let mut student = test_student("João Silva");

        student.set_photo(Some("abc.jpg".to_string()));
        assert_eq!(student.photo(), Some("abc.jpg"));

        student.set_photo(None);
        assert!(student.photo().is_none());
    }

    #[test]
    fn test_serialization_skips_absent_optionals() {
        let student = test_student("João Silva");
        let json = serde_json::to_string(&student).unwrap();

        assert!(!json.contains("\"cpf\""));
        assert!(!json.contains("\"photo\""));
        assert!(json.contains("\"full_name\""));
    }
}
