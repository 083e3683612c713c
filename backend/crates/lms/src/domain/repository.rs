//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{CategoryId, CertificateId, CourseId, LessonId, UserId};

use crate::domain::entities::{Category, Certificate, ChapterOutline, Course, Enrollment, Lesson};
use crate::error::LmsResult;

/// Catalog read repository
#[trait_variant::make(CatalogRepository: Send)]
pub trait LocalCatalogRepository {
    /// Find a course by its slug
    async fn find_course_by_slug(&self, slug: &str) -> LmsResult<Option<Course>>;

    /// Find a lesson together with the course it belongs to
    async fn find_lesson(&self, lesson_id: &LessonId) -> LmsResult<Option<(Lesson, CourseId)>>;

    /// Position-ordered chapters and lessons with the user's completion flags
    async fn course_outline(
        &self,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> LmsResult<Vec<ChapterOutline>>;
}

/// Enrollment repository
#[trait_variant::make(EnrollmentRepository: Send)]
pub trait LocalEnrollmentRepository {
    /// Find the enrollment for a (user, course) pair
    async fn find_enrollment(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> LmsResult<Option<Enrollment>>;

    /// Of the given courses, the ones the user holds an access-granting
    /// enrollment for
    async fn enrolled_course_ids(
        &self,
        user_id: &UserId,
        course_ids: &[CourseId],
    ) -> LmsResult<Vec<CourseId>>;
}

/// Lesson progress repository
#[trait_variant::make(ProgressRepository: Send)]
pub trait LocalProgressRepository {
    /// Mark a lesson completed for a user (at most one record per pair)
    async fn upsert_completed(&self, user_id: &UserId, lesson_id: &LessonId) -> LmsResult<()>;
}

/// Certificate repository
#[trait_variant::make(CertificateRepository: Send)]
pub trait LocalCertificateRepository {
    /// Find a certificate by ID
    async fn find_certificate(
        &self,
        certificate_id: &CertificateId,
    ) -> LmsResult<Option<Certificate>>;
}

/// Admin mutation repository
#[trait_variant::make(AdminRepository: Send)]
pub trait LocalAdminRepository {
    /// Insert a category
    async fn create_category(&self, category: &Category) -> LmsResult<()>;

    /// Update a category's title and slug; false when it does not exist
    async fn update_category(
        &self,
        category_id: &CategoryId,
        title: &str,
        slug: &str,
    ) -> LmsResult<bool>;

    /// Delete a category; false when it does not exist
    async fn delete_category(&self, category_id: &CategoryId) -> LmsResult<bool>;

    /// Delete a course and its dependent rows; false when it does not exist
    async fn delete_course(&self, course_id: &CourseId) -> LmsResult<bool>;

    /// Update a lesson's title and description; false when it does not exist
    async fn update_lesson(
        &self,
        lesson_id: &LessonId,
        title: &str,
        description: Option<&str>,
    ) -> LmsResult<bool>;
}

/// Fixed-window mutation rate limit repository
#[trait_variant::make(MutationRateLimitRepository: Send)]
pub trait LocalMutationRateLimitRepository {
    /// Increment the counter for (user, window) and return the new count
    async fn increment(&self, user_id: &UserId, window_start_ms: i64) -> LmsResult<u32>;
}
