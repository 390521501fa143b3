//! Student field validation

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during student validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    #[error("Full name cannot be empty")]
    EmptyFullName,

    #[error("Full name cannot exceed {0} characters")]
    FullNameTooLong(usize),

    #[error("City cannot be empty")]
    EmptyCity,

    #[error("City cannot exceed {0} characters")]
    CityTooLong(usize),

    #[error("Guardian name cannot be empty")]
    EmptyGuardianName,

    #[error("Guardian name cannot exceed {0} characters")]
    GuardianNameTooLong(usize),

    #[error("Postal code must be a valid CEP (8 digits)")]
    InvalidPostalCode,

    #[error("CPF must have exactly 11 digits")]
    InvalidCpf,

    #[error("Birth date cannot be in the future")]
    BirthDateInFuture,
}

const MAX_NAME_LENGTH: usize = 120;
const MAX_CITY_LENGTH: usize = 80;

/// Matches a Brazilian CEP, with or without the conventional hyphen.
static CEP_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}-?\d{3}$").unwrap());

/// Matches a CPF, punctuated (`123.456.789-09`) or bare.
static CPF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}\.?\d{3}\.?\d{3}-?\d{2}$").unwrap());

/// Validate a student's full name
pub fn validate_full_name(name: &str) -> Result<(), StudentValidationError> {
    if name.trim().is_empty() {
        return Err(StudentValidationError::EmptyFullName);
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(StudentValidationError::FullNameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a city name
pub fn validate_city(city: &str) -> Result<(), StudentValidationError> {
    if city.trim().is_empty() {
        return Err(StudentValidationError::EmptyCity);
    }

    if city.len() > MAX_CITY_LENGTH {
        return Err(StudentValidationError::CityTooLong(MAX_CITY_LENGTH));
    }

    Ok(())
}

/// Validate a guardian's name
pub fn validate_guardian_name(name: &str) -> Result<(), StudentValidationError> {
    if name.trim().is_empty() {
        return Err(StudentValidationError::EmptyGuardianName);
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(StudentValidationError::GuardianNameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a CEP and normalize it to its 8 bare digits
pub fn normalize_postal_code(raw: &str) -> Result<String, StudentValidationError> {
    let trimmed = raw.trim();

    if !CEP_PATTERN.is_match(trimmed) {
        return Err(StudentValidationError::InvalidPostalCode);
    }

    Ok(trimmed.chars().filter(char::is_ascii_digit).collect())
}

/// Validate a CPF and normalize it to its 11 bare digits
pub fn normalize_cpf(raw: &str) -> Result<String, StudentValidationError> {
    let trimmed = raw.trim();

    if !CPF_PATTERN.is_match(trimmed) {
        return Err(StudentValidationError::InvalidCpf);
    }

    Ok(trimmed.chars().filter(char::is_ascii_digit).collect())
}

/// Validate a birth date
pub fn validate_birth_date(date: NaiveDate) -> Result<(), StudentValidationError> {
    if date > Utc::now().date_naive() {
        return Err(StudentValidationError::BirthDateInFuture);
    }

    Ok(())
}
