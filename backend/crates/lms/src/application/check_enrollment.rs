//! Check Enrollment Use Case
//!
//! Bulk answer for "which of these courses am I enrolled in?", used by
//! the catalog page to badge purchased courses.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{CourseId, UserId};

use crate::domain::repository::EnrollmentRepository;
use crate::error::LmsResult;

/// Check enrollment use case
pub struct CheckEnrollmentUseCase<R>
where
    R: EnrollmentRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> CheckEnrollmentUseCase<R>
where
    R: EnrollmentRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Map each requested course ID to whether the user holds an
    /// access-granting enrollment
    pub async fn execute(
        &self,
        user_id: &UserId,
        course_ids: &[CourseId],
    ) -> LmsResult<HashMap<CourseId, bool>> {
        let enrolled = self.repo.enrolled_course_ids(user_id, course_ids).await?;

        Ok(course_ids
            .iter()
            .map(|id| (*id, enrolled.contains(id)))
            .collect())
    }
}
