//! Track Progress Use Case
//!
//! Marks a lesson completed for the caller. The enrollment gate applies
//! here too: the lesson's course must be enrolled with an access-granting
//! status, otherwise the lesson does not exist as far as the caller can
//! tell.

use std::sync::Arc;

use kernel::id::{LessonId, UserId};

use crate::domain::repository::{CatalogRepository, EnrollmentRepository, ProgressRepository};
use crate::error::{LmsError, LmsResult};

/// Track progress use case
pub struct TrackProgressUseCase<R>
where
    R: CatalogRepository + EnrollmentRepository + ProgressRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> TrackProgressUseCase<R>
where
    R: CatalogRepository + EnrollmentRepository + ProgressRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Mark a lesson completed (idempotent upsert)
    pub async fn complete_lesson(&self, user_id: &UserId, lesson_id: &LessonId) -> LmsResult<()> {
        let Some((_, course_id)) = self.repo.find_lesson(lesson_id).await? else {
            return Err(LmsError::LessonNotFound);
        };

        let enrollment = self.repo.find_enrollment(user_id, &course_id).await?;
        match enrollment {
            Some(e) if e.grants_access() => {}
            _ => return Err(LmsError::LessonNotFound),
        }

        self.repo.upsert_completed(user_id, lesson_id).await?;

        tracing::info!(user_id = %user_id, lesson_id = %lesson_id, "Lesson completed");
        Ok(())
    }
}
