//! Course Outline Use Case
//!
//! Serves the course sidebar: chapters, lessons, per-lesson completion,
//! and the aggregated progress summary. The enrollment gate runs first;
//! a caller without an access-granting enrollment gets CourseNotFound,
//! never a partial outline.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::{ChapterOutline, Course};
use crate::domain::repository::{CatalogRepository, EnrollmentRepository};
use crate::domain::services::{self, ProgressSummary};
use crate::error::{LmsError, LmsResult};

/// The gated outline with derived progress
#[derive(Debug, Clone)]
pub struct CourseOutline {
    pub course: Course,
    pub chapters: Vec<ChapterOutline>,
    pub progress: ProgressSummary,
}

/// Course outline use case
pub struct CourseOutlineUseCase<R>
where
    R: CatalogRepository + EnrollmentRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> CourseOutlineUseCase<R>
where
    R: CatalogRepository + EnrollmentRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId, slug: &str) -> LmsResult<CourseOutline> {
        let course = self
            .repo
            .find_course_by_slug(slug)
            .await?
            .ok_or(LmsError::CourseNotFound)?;

        // Enrollment gate: absence and non-granting status are
        // indistinguishable from a missing course
        let enrollment = self
            .repo
            .find_enrollment(user_id, &course.course_id)
            .await?;

        match enrollment {
            Some(e) if e.grants_access() => {}
            _ => return Err(LmsError::CourseNotFound),
        }

        let chapters = self.repo.course_outline(&course.course_id, user_id).await?;
        let progress = services::aggregate_progress(&chapters);

        Ok(CourseOutline {
            course,
            chapters,
            progress,
        })
    }
}
