//! Domain Entities
//!
//! Core business entities for the LMS domain.

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, CertificateId, ChapterId, CourseId, EnrollmentId, LessonId, UserId};

use crate::domain::value_objects::{CourseStatus, EnrollmentStatus};

/// Category entity
#[derive(Debug, Clone)]
pub struct Category {
    pub category_id: CategoryId,
    pub title: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(title: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            category_id: CategoryId::new(),
            title,
            slug,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Course entity
#[derive(Debug, Clone)]
pub struct Course {
    pub course_id: CourseId,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub price_cents: i64,
    pub status: CourseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chapter entity, position-ordered within a course
#[derive(Debug, Clone)]
pub struct Chapter {
    pub chapter_id: ChapterId,
    pub course_id: CourseId,
    pub title: String,
    pub position: i32,
}

/// Lesson entity, position-ordered within a chapter
#[derive(Debug, Clone)]
pub struct Lesson {
    pub lesson_id: LessonId,
    pub chapter_id: ChapterId,
    pub title: String,
    pub description: Option<String>,
    pub video_key: Option<String>,
    pub position: i32,
}

/// Enrollment entity, unique per (user, course)
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub enrollment_id: EnrollmentId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub status: EnrollmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    /// Whether this enrollment lets the user see course content
    pub fn grants_access(&self) -> bool {
        self.status.grants_access()
    }
}

/// LessonProgress entity, unique per (user, lesson)
#[derive(Debug, Clone)]
pub struct LessonProgress {
    pub user_id: UserId,
    pub lesson_id: LessonId,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Certificate entity
///
/// Recipient and course names are snapshots taken at issue time, so a
/// later rename does not rewrite issued certificates.
#[derive(Debug, Clone)]
pub struct Certificate {
    pub certificate_id: CertificateId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub recipient_name: String,
    pub course_title: String,
    pub issued_at: DateTime<Utc>,
}

/// A chapter with its lessons, as served to the course sidebar
#[derive(Debug, Clone)]
pub struct ChapterOutline {
    pub chapter: Chapter,
    pub lessons: Vec<LessonOutline>,
}

/// A lesson plus the caller's completion flag
#[derive(Debug, Clone)]
pub struct LessonOutline {
    pub lesson: Lesson,
    pub completed: bool,
}
