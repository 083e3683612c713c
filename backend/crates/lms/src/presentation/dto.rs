//! API DTOs (Data Transfer Objects)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::course_outline::CourseOutline;
use crate::domain::services::ProgressSummary;

// ============================================================================
// Enrollment Check
// ============================================================================

/// Enrollment check request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentCheckRequest {
    pub course_ids: Vec<Uuid>,
}

/// Enrollment check response: course id -> enrolled
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentCheckResponse {
    pub enrollments: HashMap<Uuid, bool>,
}

// ============================================================================
// Course Outline
// ============================================================================

/// Course outline response (sidebar data)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOutlineResponse {
    pub course_id: Uuid,
    pub slug: String,
    pub title: String,
    pub chapters: Vec<ChapterDto>,
    pub progress: ProgressDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterDto {
    pub chapter_id: Uuid,
    pub title: String,
    pub position: i32,
    pub lessons: Vec<LessonDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDto {
    pub lesson_id: Uuid,
    pub title: String,
    pub position: i32,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDto {
    pub total_lessons: u32,
    pub completed_lessons: u32,
    pub percentage: u32,
}

impl From<ProgressSummary> for ProgressDto {
    fn from(summary: ProgressSummary) -> Self {
        Self {
            total_lessons: summary.total_lessons,
            completed_lessons: summary.completed_lessons,
            percentage: summary.percentage,
        }
    }
}

impl From<CourseOutline> for CourseOutlineResponse {
    fn from(outline: CourseOutline) -> Self {
        Self {
            course_id: outline.course.course_id.into_uuid(),
            slug: outline.course.slug,
            title: outline.course.title,
            chapters: outline
                .chapters
                .into_iter()
                .map(|chapter| ChapterDto {
                    chapter_id: chapter.chapter.chapter_id.into_uuid(),
                    title: chapter.chapter.title,
                    position: chapter.chapter.position,
                    lessons: chapter
                        .lessons
                        .into_iter()
                        .map(|lesson| LessonDto {
                            lesson_id: lesson.lesson.lesson_id.into_uuid(),
                            title: lesson.lesson.title,
                            position: lesson.lesson.position,
                            completed: lesson.completed,
                        })
                        .collect(),
                })
                .collect(),
            progress: outline.progress.into(),
        }
    }
}

// ============================================================================
// Certificate
// ============================================================================

/// Certificate response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateResponse {
    pub certificate_id: Uuid,
    pub recipient_name: String,
    pub course_title: String,
    pub issued_at: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// Contact
// ============================================================================

/// Contact form request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

// ============================================================================
// Admin Mutations
// ============================================================================

/// Category create request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreateRequest {
    pub title: String,
    pub slug: String,
}

/// Category update request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdateRequest {
    pub title: String,
    pub slug: String,
}

/// Lesson update request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonUpdateRequest {
    pub title: String,
    pub description: Option<String>,
}
