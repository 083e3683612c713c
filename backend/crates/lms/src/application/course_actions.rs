//! Course Admin Actions

use std::sync::Arc;

use kernel::id::CourseId;

use crate::application::config::LmsConfig;
use crate::application::mutation::{ActionOutcome, MutationContext, MutationGuard};
use crate::domain::repository::{AdminRepository, MutationRateLimitRepository};
use crate::error::{LmsError, LmsResult};

/// Course actions use case
pub struct CourseActionsUseCase<R>
where
    R: AdminRepository + MutationRateLimitRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
    guard: MutationGuard<R>,
}

impl<R> CourseActionsUseCase<R>
where
    R: AdminRepository + MutationRateLimitRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<LmsConfig>) -> Self {
        let guard = MutationGuard::new(repo.clone(), config);
        Self { repo, guard }
    }

    /// Delete a course and everything hanging off it
    pub async fn delete(&self, ctx: &MutationContext, course_id: CourseId) -> ActionOutcome {
        match self.try_delete(ctx, course_id).await {
            Ok(outcome) => outcome,
            Err(e) => ActionOutcome::from_error(&e),
        }
    }

    async fn try_delete(
        &self,
        ctx: &MutationContext,
        course_id: CourseId,
    ) -> LmsResult<ActionOutcome> {
        self.guard.check(ctx).await?;

        let deleted = self.repo.delete_course(&course_id).await?;
        if !deleted {
            return Err(LmsError::CourseNotFound);
        }

        tracing::info!(course_id = %course_id, "Course deleted");
        Ok(ActionOutcome::success("Course deleted"))
    }
}
