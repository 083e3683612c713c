//! Category Admin Actions
//!
//! Create, update, and delete run behind the shared mutation guard and
//! each performs exactly one write. Errors never escape: every path
//! folds into an `ActionOutcome`.

use std::sync::Arc;

use kernel::id::CategoryId;

use crate::application::config::LmsConfig;
use crate::application::mutation::{ActionOutcome, MutationContext, MutationGuard};
use crate::domain::entities::Category;
use crate::domain::repository::{AdminRepository, MutationRateLimitRepository};
use crate::error::{LmsError, LmsResult};

const MAX_TITLE_LEN: usize = 200;
const MAX_SLUG_LEN: usize = 200;

fn validate_title(title: &str) -> LmsResult<()> {
    if title.trim().is_empty() || title.len() > MAX_TITLE_LEN {
        return Err(LmsError::InvalidData("title".to_string()));
    }
    Ok(())
}

fn validate_slug(slug: &str) -> LmsResult<()> {
    let ok = !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !ok {
        return Err(LmsError::InvalidData("slug".to_string()));
    }
    Ok(())
}

/// Category actions use case
pub struct CategoryActionsUseCase<R>
where
    R: AdminRepository + MutationRateLimitRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
    guard: MutationGuard<R>,
}

impl<R> CategoryActionsUseCase<R>
where
    R: AdminRepository + MutationRateLimitRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<LmsConfig>) -> Self {
        let guard = MutationGuard::new(repo.clone(), config);
        Self { repo, guard }
    }

    pub async fn create(&self, ctx: &MutationContext, title: String, slug: String) -> ActionOutcome {
        match self.try_create(ctx, title, slug).await {
            Ok(outcome) => outcome,
            Err(e) => ActionOutcome::from_error(&e),
        }
    }

    async fn try_create(
        &self,
        ctx: &MutationContext,
        title: String,
        slug: String,
    ) -> LmsResult<ActionOutcome> {
        self.guard.check(ctx).await?;
        validate_title(&title)?;
        validate_slug(&slug)?;

        let category = Category::new(title, slug);
        self.repo.create_category(&category).await?;

        tracing::info!(category_id = %category.category_id, "Category created");
        Ok(ActionOutcome::success("Category created"))
    }

    pub async fn update(
        &self,
        ctx: &MutationContext,
        category_id: CategoryId,
        title: String,
        slug: String,
    ) -> ActionOutcome {
        match self.try_update(ctx, category_id, title, slug).await {
            Ok(outcome) => outcome,
            Err(e) => ActionOutcome::from_error(&e),
        }
    }

    async fn try_update(
        &self,
        ctx: &MutationContext,
        category_id: CategoryId,
        title: String,
        slug: String,
    ) -> LmsResult<ActionOutcome> {
        self.guard.check(ctx).await?;
        validate_title(&title)?;
        validate_slug(&slug)?;

        let updated = self
            .repo
            .update_category(&category_id, &title, &slug)
            .await?;
        if !updated {
            return Err(LmsError::CategoryNotFound);
        }

        tracing::info!(category_id = %category_id, "Category updated");
        Ok(ActionOutcome::success("Category updated"))
    }

    pub async fn delete(&self, ctx: &MutationContext, category_id: CategoryId) -> ActionOutcome {
        match self.try_delete(ctx, category_id).await {
            Ok(outcome) => outcome,
            Err(e) => ActionOutcome::from_error(&e),
        }
    }

    async fn try_delete(
        &self,
        ctx: &MutationContext,
        category_id: CategoryId,
    ) -> LmsResult<ActionOutcome> {
        self.guard.check(ctx).await?;

        let deleted = self.repo.delete_category(&category_id).await?;
        if !deleted {
            return Err(LmsError::CategoryNotFound);
        }

        tracing::info!(category_id = %category_id, "Category deleted");
        Ok(ActionOutcome::success("Category deleted"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_validation() {
        assert!(validate_slug("web-development").is_ok());
        assert!(validate_slug("rust-101").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Has Spaces").is_err());
        assert!(validate_slug("UPPER").is_err());
        assert!(validate_slug("trailing/slash").is_err());
    }

    #[test]
    fn test_title_validation() {
        assert!(validate_title("Web Development").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN + 1)).is_err());
    }
}
