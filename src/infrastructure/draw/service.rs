//! Draw service
//!
//! Bridges the roster to the pure draw core: resolves the posted id snapshot
//! into participants, then runs the shuffle with a fresh random source per
//! call. Nothing is retained between draws, so "draw again" is simply the
//! same call repeated.

use std::collections::HashSet;
use std::sync::Arc;

use rand::thread_rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::draw::{self, DrawError, DrawResult, Participant};
use crate::domain::student::{StudentId, StudentRepository};
use crate::domain::DomainError;

/// Errors surfaced by the draw service
#[derive(Debug, Error)]
pub enum DrawServiceError {
    /// The draw core rejected the selection
    #[error(transparent)]
    Draw(#[from] DrawError),

    /// The selection could not be resolved against the roster
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Service for drawing teams and raffling single students
#[derive(Debug)]
pub struct DrawService<R: StudentRepository> {
    repository: Arc<R>,
    default_group_size: usize,
}

impl<R: StudentRepository> DrawService<R> {
    pub fn new(repository: Arc<R>, default_group_size: usize) -> Self {
        Self {
            repository,
            default_group_size,
        }
    }

    /// Draw randomized teams from the selected students.
    ///
    /// The id list is an immutable snapshot of the caller's selection;
    /// calling again with the same snapshot produces an independent draw.
    pub async fn draw_teams(
        &self,
        student_ids: &[String],
        group_size: Option<usize>,
    ) -> Result<DrawResult, DrawServiceError> {
        let participants = self.resolve_participants(student_ids).await?;
        let group_size = group_size.unwrap_or(self.default_group_size);

        info!(
            participants = participants.len(),
            group_size, "Drawing teams"
        );

        let result = draw::form_teams(participants, group_size, &mut thread_rng())?;

        debug!(teams = result.teams.len(), "Draw complete");
        Ok(result)
    }

    /// Raffle a single student from the candidate list.
    pub async fn draw_student(
        &self,
        student_ids: &[String],
    ) -> Result<Participant, DrawServiceError> {
        let participants = self.resolve_participants(student_ids).await?;

        info!(candidates = participants.len(), "Raffling one student");

        Ok(draw::draw_student(&participants, &mut thread_rng())?)
    }

    /// Resolve roster ids into draw participants.
    ///
    /// Duplicates indicate a malformed selection and are rejected rather than
    /// silently deduplicated; unknown ids are reported as not found.
    async fn resolve_participants(
        &self,
        student_ids: &[String],
    ) -> Result<Vec<Participant>, DrawServiceError> {
        let mut seen = HashSet::with_capacity(student_ids.len());
        let mut participants = Vec::with_capacity(student_ids.len());

        for raw_id in student_ids {
            let id = StudentId::parse(raw_id).map_err(DrawServiceError::Domain)?;

            if !seen.insert(id) {
                return Err(DrawServiceError::Domain(DomainError::validation(format!(
                    "Student '{}' appears more than once in the selection",
                    raw_id
                ))));
            }

            let student = self
                .repository
                .get(&id)
                .await
                .map_err(DrawServiceError::Domain)?
                .ok_or_else(|| {
                    DrawServiceError::Domain(DomainError::not_found(format!(
                        "Student '{}' not found",
                        raw_id
                    )))
                })?;

            participants.push(Participant::new(
                student.id().to_string(),
                student.full_name(),
            ));
        }

        Ok(participants)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::student::mock::MockStudentRepository;
    use crate::domain::student::test_student;

    async fn seeded_service(count: usize) -> (DrawService<MockStudentRepository>, Vec<String>) {
        let students: Vec<_> = (1..=count)
            .map(|i| test_student(&format!("Aluno {}", i)))
            .collect();
        let ids: Vec<String> = students.iter().map(|s| s.id().to_string()).collect();

        let repo = Arc::new(MockStudentRepository::with_students(students));
        (DrawService::new(repo, 4), ids)
    }

    #[tokio::test]
    async fn test_draw_teams_covers_selection() {
        let (service, ids) = seeded_service(6).await;

        let result = service.draw_teams(&ids, None).await.unwrap();

        assert_eq!(result.teams.len(), 2);
        assert_eq!(result.teams[0].len(), 4);
        assert_eq!(result.teams[1].len(), 2);

        let drawn: BTreeSet<String> = result
            .teams
            .iter()
            .flat_map(|t| t.members.iter().map(|p| p.id.clone()))
            .collect();
        let expected: BTreeSet<String> = ids.into_iter().collect();
        assert_eq!(drawn, expected);
    }

    #[tokio::test]
    async fn test_draw_teams_respects_group_size_override() {
        let (service, ids) = seeded_service(6).await;

        let result = service.draw_teams(&ids, Some(2)).await.unwrap();

        assert_eq!(result.teams.len(), 3);
        assert!(result.teams.iter().all(|t| t.len() == 2));
    }

    #[tokio::test]
    async fn test_draw_teams_with_too_few_students() {
        let (service, ids) = seeded_service(2).await;

        let result = service.draw_teams(&ids, None).await;

        assert!(matches!(
            result,
            Err(DrawServiceError::Draw(DrawError::InsufficientParticipants {
                available: 2,
                required: 4,
            }))
        ));
    }

    #[tokio::test]
    async fn test_draw_teams_with_unknown_student() {
        let (service, mut ids) = seeded_service(4).await;
        ids[0] = StudentId::generate().to_string();

        let result = service.draw_teams(&ids, None).await;

        assert!(matches!(
            result,
            Err(DrawServiceError::Domain(DomainError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_draw_teams_with_duplicate_selection() {
        let (service, mut ids) = seeded_service(4).await;
        ids.push(ids[0].clone());

        let result = service.draw_teams(&ids, None).await;

        assert!(matches!(
            result,
            Err(DrawServiceError::Domain(DomainError::Validation { .. }))
        ));
    }

    #[tokio::test]
    async fn test_draw_teams_with_malformed_id() {
        let (service, mut ids) = seeded_service(4).await;
        ids[0] = "not-a-uuid".to_string();

        let result = service.draw_teams(&ids, None).await;

        assert!(matches!(
            result,
            Err(DrawServiceError::Domain(DomainError::InvalidId { .. }))
        ));
    }

    #[tokio::test]
    async fn test_draw_student_returns_candidate() {
        let (service, ids) = seeded_service(3).await;

        let drawn = service.draw_student(&ids).await.unwrap();

        assert!(ids.contains(&drawn.id));
    }

    #[tokio::test]
    async fn test_draw_student_with_empty_selection() {
        let (service, _) = seeded_service(3).await;

        let result = service.draw_student(&[]).await;

        assert!(matches!(
            result,
            Err(DrawServiceError::Draw(DrawError::InsufficientParticipants {
                available: 0,
                required: 1,
            }))
        ));
    }
}
