//! Team draw endpoints

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::draw::{DrawResult, Participant, Team};

/// Request to draw teams from a selection of students
#[derive(Debug, Clone, Deserialize)]
pub struct DrawTeamsApiRequest {
    /// Snapshot of the selected student ids
    pub student_ids: Vec<String>,
    /// Players per team; defaults to the configured group size
    #[serde(default)]
    pub group_size: Option<usize>,
}

/// Request to raffle a single student
#[derive(Debug, Clone, Deserialize)]
pub struct DrawStudentApiRequest {
    pub student_ids: Vec<String>,
}

/// One drawn participant
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantResponse {
    pub id: String,
    pub name: String,
}

impl From<&Participant> for ParticipantResponse {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.clone(),
            name: participant.name.clone(),
        }
    }
}

/// One drawn team
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub number: u32,
    pub members: Vec<ParticipantResponse>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            number: team.number,
            members: team.members.iter().map(ParticipantResponse::from).collect(),
        }
    }
}

/// Draw teams response
#[derive(Debug, Clone, Serialize)]
pub struct DrawTeamsResponse {
    pub teams: Vec<TeamResponse>,
    pub total_participants: usize,
}

impl From<&DrawResult> for DrawTeamsResponse {
    fn from(result: &DrawResult) -> Self {
        Self {
            teams: result.teams.iter().map(TeamResponse::from).collect(),
            total_participants: result.total_participants(),
        }
    }
}

/// POST /v1/draws/teams
///
/// Shuffles the selected students into fixed-size teams. Calling again with
/// the same selection performs an independent re-draw.
pub async fn draw_teams(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Json(request): Json<DrawTeamsApiRequest>,
) -> Result<Json<DrawTeamsResponse>, ApiError> {
    debug!(
        selected = request.student_ids.len(),
        group_size = ?request.group_size,
        "Drawing teams"
    );

    let result = state
        .draw_service
        .draw_teams(&request.student_ids, request.group_size)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DrawTeamsResponse::from(&result)))
}

/// POST /v1/draws/student
///
/// Raffles one student from the candidate list.
pub async fn draw_student(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Json(request): Json<DrawStudentApiRequest>,
) -> Result<Json<ParticipantResponse>, ApiError> {
    debug!(candidates = request.student_ids.len(), "Raffling a student");

    let drawn = state
        .draw_service
        .draw_student(&request.student_ids)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ParticipantResponse::from(&drawn)))
}
