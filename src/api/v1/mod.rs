//! Authenticated v1 API endpoints

pub mod draws;
pub mod students;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::state::AppState;

/// Create the v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        // Roster
        .route("/students", get(students::list_students))
        .route("/students", post(students::register_student))
        .route("/students/{student_id}", get(students::get_student))
        .route("/students/{student_id}", put(students::update_student))
        .route("/students/{student_id}", delete(students::delete_student))
        .route("/students/{student_id}/photo", post(students::upload_photo))
        // Draws
        .route("/draws/teams", post(draws::draw_teams))
        .route("/draws/student", post(draws::draw_student))
}
