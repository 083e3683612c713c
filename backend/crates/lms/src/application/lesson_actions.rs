//! Lesson Admin Actions

use std::sync::Arc;

use kernel::id::LessonId;

use crate::application::config::LmsConfig;
use crate::application::mutation::{ActionOutcome, MutationContext, MutationGuard};
use crate::domain::repository::{AdminRepository, MutationRateLimitRepository};
use crate::error::{LmsError, LmsResult};

const MAX_TITLE_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 10_000;

/// Lesson actions use case
pub struct LessonActionsUseCase<R>
where
    R: AdminRepository + MutationRateLimitRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
    guard: MutationGuard<R>,
}

impl<R> LessonActionsUseCase<R>
where
    R: AdminRepository + MutationRateLimitRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<LmsConfig>) -> Self {
        let guard = MutationGuard::new(repo.clone(), config);
        Self { repo, guard }
    }

    pub async fn update(
        &self,
        ctx: &MutationContext,
        lesson_id: LessonId,
        title: String,
        description: Option<String>,
    ) -> ActionOutcome {
        match self.try_update(ctx, lesson_id, title, description).await {
            Ok(outcome) => outcome,
            Err(e) => ActionOutcome::from_error(&e),
        }
    }

    async fn try_update(
        &self,
        ctx: &MutationContext,
        lesson_id: LessonId,
        title: String,
        description: Option<String>,
    ) -> LmsResult<ActionOutcome> {
        self.guard.check(ctx).await?;

        if title.trim().is_empty() || title.len() > MAX_TITLE_LEN {
            return Err(LmsError::InvalidData("title".to_string()));
        }
        if let Some(desc) = &description {
            if desc.len() > MAX_DESCRIPTION_LEN {
                return Err(LmsError::InvalidData("description".to_string()));
            }
        }

        let updated = self
            .repo
            .update_lesson(&lesson_id, &title, description.as_deref())
            .await?;
        if !updated {
            return Err(LmsError::LessonNotFound);
        }

        tracing::info!(lesson_id = %lesson_id, "Lesson updated");
        Ok(ActionOutcome::success("Lesson updated"))
    }
}
