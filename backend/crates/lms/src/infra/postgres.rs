//! PostgreSQL Repository Implementations

use chrono::Utc;
use kernel::id::{CategoryId, CertificateId, ChapterId, CourseId, EnrollmentId, LessonId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{
    Category, Certificate, Chapter, ChapterOutline, Course, Enrollment, Lesson, LessonOutline,
};
use crate::domain::repository::{
    AdminRepository, CatalogRepository, CertificateRepository, EnrollmentRepository,
    MutationRateLimitRepository, ProgressRepository,
};
use crate::domain::value_objects::{CourseStatus, EnrollmentStatus};
use crate::error::{LmsError, LmsResult};

// Rate-limit windows older than this are garbage
const OLD_WINDOW_MS: i64 = 3600_000; // 1 hour

/// PostgreSQL-backed LMS repository
#[derive(Clone)]
pub struct PgLmsRepository {
    pool: PgPool,
}

impl PgLmsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete stale rate-limit windows
    pub async fn cleanup_rate_limits(&self) -> LmsResult<u64> {
        let cutoff = Utc::now().timestamp_millis() - OLD_WINDOW_MS;

        let deleted = sqlx::query("DELETE FROM mutation_rate_limits WHERE window_start_ms < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(rate_limits = deleted, "Cleaned up stale rate-limit windows");
        Ok(deleted)
    }
}

impl CatalogRepository for PgLmsRepository {
    async fn find_course_by_slug(&self, slug: &str) -> LmsResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT
                course_id,
                slug,
                title,
                description,
                category_id,
                price_cents,
                status,
                created_at,
                updated_at
            FROM courses
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_course()).transpose()
    }

    async fn find_lesson(&self, lesson_id: &LessonId) -> LmsResult<Option<(Lesson, CourseId)>> {
        let row = sqlx::query_as::<_, LessonWithCourseRow>(
            r#"
            SELECT
                l.lesson_id,
                l.chapter_id,
                l.title,
                l.description,
                l.video_key,
                l.position,
                c.course_id
            FROM lessons l
            JOIN chapters c ON c.chapter_id = l.chapter_id
            WHERE l.lesson_id = $1
            "#,
        )
        .bind(lesson_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| {
            let course_id = CourseId::from_uuid(r.course_id);
            (r.into_lesson(), course_id)
        }))
    }

    async fn course_outline(
        &self,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> LmsResult<Vec<ChapterOutline>> {
        let chapters = sqlx::query_as::<_, ChapterRow>(
            r#"
            SELECT chapter_id, course_id, title, position
            FROM chapters
            WHERE course_id = $1
            ORDER BY position
            "#,
        )
        .bind(course_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        // One query for every lesson of the course, with the caller's
        // completion flag joined in
        let lessons = sqlx::query_as::<_, LessonWithProgressRow>(
            r#"
            SELECT
                l.lesson_id,
                l.chapter_id,
                l.title,
                l.description,
                l.video_key,
                l.position,
                COALESCE(p.completed, FALSE) AS completed
            FROM lessons l
            JOIN chapters c ON c.chapter_id = l.chapter_id
            LEFT JOIN lesson_progress p
                ON p.lesson_id = l.lesson_id AND p.user_id = $2
            WHERE c.course_id = $1
            ORDER BY l.position
            "#,
        )
        .bind(course_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let outline = chapters
            .into_iter()
            .map(|chapter_row| {
                let chapter = chapter_row.into_chapter();
                let lessons = lessons
                    .iter()
                    .filter(|l| l.chapter_id == *chapter.chapter_id.as_uuid())
                    .map(|l| l.to_outline())
                    .collect();
                ChapterOutline { chapter, lessons }
            })
            .collect();

        Ok(outline)
    }
}

impl EnrollmentRepository for PgLmsRepository {
    async fn find_enrollment(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> LmsResult<Option<Enrollment>> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT enrollment_id, user_id, course_id, status, created_at, updated_at
            FROM enrollments
            WHERE user_id = $1 AND course_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(course_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_enrollment()).transpose()
    }

    async fn enrolled_course_ids(
        &self,
        user_id: &UserId,
        course_ids: &[CourseId],
    ) -> LmsResult<Vec<CourseId>> {
        let ids: Vec<Uuid> = course_ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT course_id
            FROM enrollments
            WHERE user_id = $1
              AND course_id = ANY($2)
              AND status IN ('active', 'completed')
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CourseId::from_uuid).collect())
    }
}

impl ProgressRepository for PgLmsRepository {
    async fn upsert_completed(&self, user_id: &UserId, lesson_id: &LessonId) -> LmsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO lesson_progress (user_id, lesson_id, completed, created_at, updated_at)
            VALUES ($1, $2, TRUE, NOW(), NOW())
            ON CONFLICT (user_id, lesson_id)
            DO UPDATE SET completed = TRUE, updated_at = NOW()
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(lesson_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl CertificateRepository for PgLmsRepository {
    async fn find_certificate(
        &self,
        certificate_id: &CertificateId,
    ) -> LmsResult<Option<Certificate>> {
        let row = sqlx::query_as::<_, CertificateRow>(
            r#"
            SELECT
                certificate_id,
                user_id,
                course_id,
                recipient_name,
                course_title,
                issued_at
            FROM certificates
            WHERE certificate_id = $1
            "#,
        )
        .bind(certificate_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_certificate()))
    }
}

impl AdminRepository for PgLmsRepository {
    async fn create_category(&self, category: &Category) -> LmsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (category_id, title, slug, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(category.category_id.as_uuid())
        .bind(&category.title)
        .bind(&category.slug)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_category(
        &self,
        category_id: &CategoryId,
        title: &str,
        slug: &str,
    ) -> LmsResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE categories
            SET title = $2, slug = $3, updated_at = NOW()
            WHERE category_id = $1
            "#,
        )
        .bind(category_id.as_uuid())
        .bind(title)
        .bind(slug)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete_category(&self, category_id: &CategoryId) -> LmsResult<bool> {
        let deleted = sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(category_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_course(&self, course_id: &CourseId) -> LmsResult<bool> {
        // Chapters, lessons, progress, and enrollments cascade via FKs
        let deleted = sqlx::query("DELETE FROM courses WHERE course_id = $1")
            .bind(course_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn update_lesson(
        &self,
        lesson_id: &LessonId,
        title: &str,
        description: Option<&str>,
    ) -> LmsResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE lessons
            SET title = $2, description = $3
            WHERE lesson_id = $1
            "#,
        )
        .bind(lesson_id.as_uuid())
        .bind(title)
        .bind(description)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }
}

impl MutationRateLimitRepository for PgLmsRepository {
    async fn increment(&self, user_id: &UserId, window_start_ms: i64) -> LmsResult<u32> {
        let row = sqlx::query_as::<_, (i32,)>(
            r#"
            INSERT INTO mutation_rate_limits (user_id, window_start_ms, request_count)
            VALUES ($1, $2, 1)
            ON CONFLICT (user_id, window_start_ms)
            DO UPDATE SET request_count = mutation_rate_limits.request_count + 1
            RETURNING request_count
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(window_start_ms)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0 as u32)
    }
}

// Internal row types for sqlx mapping

#[derive(sqlx::FromRow)]
struct CourseRow {
    course_id: Uuid,
    slug: String,
    title: String,
    description: Option<String>,
    category_id: Option<Uuid>,
    price_cents: i64,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl CourseRow {
    fn into_course(self) -> LmsResult<Course> {
        let status = CourseStatus::from_str(&self.status)
            .ok_or_else(|| LmsError::Internal(format!("Invalid course status: {}", self.status)))?;

        Ok(Course {
            course_id: CourseId::from_uuid(self.course_id),
            slug: self.slug,
            title: self.title,
            description: self.description,
            category_id: self.category_id.map(CategoryId::from_uuid),
            price_cents: self.price_cents,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ChapterRow {
    chapter_id: Uuid,
    course_id: Uuid,
    title: String,
    position: i32,
}

impl ChapterRow {
    fn into_chapter(self) -> Chapter {
        Chapter {
            chapter_id: ChapterId::from_uuid(self.chapter_id),
            course_id: CourseId::from_uuid(self.course_id),
            title: self.title,
            position: self.position,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LessonWithCourseRow {
    lesson_id: Uuid,
    chapter_id: Uuid,
    title: String,
    description: Option<String>,
    video_key: Option<String>,
    position: i32,
    course_id: Uuid,
}

impl LessonWithCourseRow {
    fn into_lesson(self) -> Lesson {
        Lesson {
            lesson_id: LessonId::from_uuid(self.lesson_id),
            chapter_id: ChapterId::from_uuid(self.chapter_id),
            title: self.title,
            description: self.description,
            video_key: self.video_key,
            position: self.position,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LessonWithProgressRow {
    lesson_id: Uuid,
    chapter_id: Uuid,
    title: String,
    description: Option<String>,
    video_key: Option<String>,
    position: i32,
    completed: bool,
}

impl LessonWithProgressRow {
    fn to_outline(&self) -> LessonOutline {
        LessonOutline {
            lesson: Lesson {
                lesson_id: LessonId::from_uuid(self.lesson_id),
                chapter_id: ChapterId::from_uuid(self.chapter_id),
                title: self.title.clone(),
                description: self.description.clone(),
                video_key: self.video_key.clone(),
                position: self.position,
            },
            completed: self.completed,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EnrollmentRow {
    enrollment_id: Uuid,
    user_id: Uuid,
    course_id: Uuid,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl EnrollmentRow {
    fn into_enrollment(self) -> LmsResult<Enrollment> {
        let status = EnrollmentStatus::from_str(&self.status).ok_or_else(|| {
            LmsError::Internal(format!("Invalid enrollment status: {}", self.status))
        })?;

        Ok(Enrollment {
            enrollment_id: EnrollmentId::from_uuid(self.enrollment_id),
            user_id: UserId::from_uuid(self.user_id),
            course_id: CourseId::from_uuid(self.course_id),
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CertificateRow {
    certificate_id: Uuid,
    user_id: Uuid,
    course_id: Uuid,
    recipient_name: String,
    course_title: String,
    issued_at: chrono::DateTime<chrono::Utc>,
}

impl CertificateRow {
    fn into_certificate(self) -> Certificate {
        Certificate {
            certificate_id: CertificateId::from_uuid(self.certificate_id),
            user_id: UserId::from_uuid(self.user_id),
            course_id: CourseId::from_uuid(self.course_id),
            recipient_name: self.recipient_name,
            course_title: self.course_title,
            issued_at: self.issued_at,
        }
    }
}
