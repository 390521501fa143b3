//! Roster endpoints

use axum::extract::{Multipart, Path, Query, State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::student::{Gender, Student, StudentQuery};
use crate::infrastructure::student::{RegisterStudentRequest, UpdateStudentRequest};

/// Request to register a student
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterStudentApiRequest {
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub city: String,
    pub postal_code: String,
    pub guardian_name: String,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub rg: Option<String>,
    #[serde(default)]
    pub guardian_contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Request to update a student
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateStudentApiRequest {
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

/// Student response
#[derive(Debug, Clone, Serialize)]
pub struct StudentResponse {
    pub id: String,
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
    pub photo: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Student> for StudentResponse {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id().to_string(),
            full_name: student.full_name().to_string(),
            birth_date: student.birth_date(),
            gender: student.gender(),
            city: student.city().to_string(),
            postal_code: student.postal_code().to_string(),
            guardian_name: student.guardian_name().to_string(),
            cpf: student.cpf().map(String::from),
            rg: student.rg().map(String::from),
            guardian_contact: student.guardian_contact().map(String::from),
            address: student.address().map(String::from),
            photo: student.photo().map(String::from),
            created_at: student.created_at().to_rfc3339(),
            updated_at: student.updated_at().to_rfc3339(),
        }
    }
}

/// Query parameters for listing students
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListStudentsParams {
    /// Case-insensitive name filter
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// List students response
#[derive(Debug, Clone, Serialize)]
pub struct ListStudentsResponse {
    pub students: Vec<StudentResponse>,
    pub total: usize,
}

/// GET /v1/students
pub async fn list_students(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Query(params): Query<ListStudentsParams>,
) -> Result<Json<ListStudentsResponse>, ApiError> {
    debug!(search = ?params.search, "Listing students");

    let mut query = StudentQuery::new();
    if let Some(search) = params.search {
        query = query.with_search(search);
    }
    if let Some(limit) = params.limit {
        query = query.with_limit(limit);
    }
    if let Some(offset) = params.offset {
        query = query.with_offset(offset);
    }

    let total = state
        .student_service
        .count(query.clone())
        .await
        .map_err(ApiError::from)?;
    let students = state
        .student_service
        .list(query)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListStudentsResponse {
        students: students.iter().map(StudentResponse::from).collect(),
        total,
    }))
}

/// POST /v1/students
pub async fn register_student(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Json(request): Json<RegisterStudentApiRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    debug!(full_name = %request.full_name, "Registering student");

    let service_request = RegisterStudentRequest {
        full_name: request.full_name,
        birth_date: request.birth_date,
        gender: request.gender,
        city: request.city,
        postal_code: request.postal_code,
        guardian_name: request.guardian_name,
        cpf: request.cpf,
        rg: request.rg,
        guardian_contact: request.guardian_contact,
        address: request.address,
    };

    let student = state
        .student_service
        .register(service_request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(StudentResponse::from(&student)))
}

/// GET /v1/students/:student_id
pub async fn get_student(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(student_id): Path<String>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = state
        .student_service
        .get(&student_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Student '{}' not found", student_id)))?;

    Ok(Json(StudentResponse::from(&student)))
}

/// PUT /v1/students/:student_id
pub async fn update_student(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(student_id): Path<String>,
    Json(request): Json<UpdateStudentApiRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    debug!(student_id = %student_id, "Updating student");

    let service_request = UpdateStudentRequest {
        full_name: request.full_name,
        birth_date: request.birth_date,
        gender: request.gender,
        city: request.city,
        postal_code: request.postal_code,
        guardian_name: request.guardian_name,
        cpf: request.cpf,
        rg: request.rg,
        guardian_contact: request.guardian_contact,
        address: request.address,
    };

    let student = state
        .student_service
        .update(&student_id, service_request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(StudentResponse::from(&student)))
}

/// DELETE /v1/students/:student_id
pub async fn delete_student(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(student_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(student_id = %student_id, "Deleting student");

    let deleted = state
        .student_service
        .delete(&student_id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!(
            "Student '{}' not found",
            student_id
        )));
    }

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": student_id
    })))
}

/// POST /v1/students/:student_id/photo
///
/// Multipart upload with a single `photo` part.
pub async fn upload_photo(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(student_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<StudentResponse>, ApiError> {
    debug!(student_id = %student_id, "Uploading photo");

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("photo") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| ApiError::bad_request("Photo part is missing a content type"))?
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read photo: {}", e)))?;

        if data.is_empty() {
            return Err(ApiError::bad_request("Photo upload is empty"));
        }

        let student = state
            .student_service
            .attach_photo(&student_id, &content_type, data)
            .await
            .map_err(ApiError::from)?;

        return Ok(Json(StudentResponse::from(&student)));
    }

    Err(ApiError::bad_request("Missing 'photo' part in upload"))
}
