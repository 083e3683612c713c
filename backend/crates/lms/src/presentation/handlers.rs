//! HTTP Handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::{HeaderMap, StatusCode};
use kernel::id::{CategoryId, CertificateId, CourseId, LessonId};
use uuid::Uuid;

use auth::middleware::{AdminUser, SessionUser};
use platform::client::looks_like_automated;
use platform::mailer::Mailer;

use crate::application::config::LmsConfig;
use crate::application::mutation::{ActionOutcome, MutationContext};
use crate::application::{
    CategoryActionsUseCase, CheckEnrollmentUseCase, ContactInput, ContactUseCase,
    CourseActionsUseCase, CourseOutlineUseCase, FetchCertificateUseCase, LessonActionsUseCase,
    TrackProgressUseCase,
};
use crate::domain::repository::{
    AdminRepository, CatalogRepository, CertificateRepository, EnrollmentRepository,
    MutationRateLimitRepository, ProgressRepository,
};
use crate::error::LmsResult;
use crate::presentation::dto::{
    CategoryCreateRequest, CategoryUpdateRequest, CertificateResponse, ContactRequest,
    CourseOutlineResponse, EnrollmentCheckRequest, EnrollmentCheckResponse, LessonUpdateRequest,
};

/// Bound on every repository the LMS handlers use
pub trait LmsRepository:
    CatalogRepository
    + EnrollmentRepository
    + ProgressRepository
    + CertificateRepository
    + AdminRepository
    + MutationRateLimitRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> LmsRepository for T where
    T: CatalogRepository
        + EnrollmentRepository
        + ProgressRepository
        + CertificateRepository
        + AdminRepository
        + MutationRateLimitRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Shared state for LMS handlers
#[derive(Clone)]
pub struct LmsAppState<R>
where
    R: LmsRepository,
{
    pub repo: Arc<R>,
    pub config: Arc<LmsConfig>,
    pub mailer: Option<Arc<Mailer>>,
}

// ============================================================================
// Enrollment Check
// ============================================================================

/// POST /api/lms/enrollments/check
pub async fn check_enrollments<R>(
    State(state): State<LmsAppState<R>>,
    Extension(user): Extension<SessionUser>,
    Json(req): Json<EnrollmentCheckRequest>,
) -> LmsResult<Json<EnrollmentCheckResponse>>
where
    R: LmsRepository,
{
    let course_ids: Vec<CourseId> = req.course_ids.iter().copied().map(CourseId::from_uuid).collect();

    let use_case = CheckEnrollmentUseCase::new(state.repo.clone());
    let map = use_case.execute(&user.user_id, &course_ids).await?;

    let enrollments: HashMap<Uuid, bool> = map
        .into_iter()
        .map(|(id, enrolled)| (id.into_uuid(), enrolled))
        .collect();

    Ok(Json(EnrollmentCheckResponse { enrollments }))
}

// ============================================================================
// Course Outline
// ============================================================================

/// GET /api/lms/courses/{slug}/outline
pub async fn course_outline<R>(
    State(state): State<LmsAppState<R>>,
    Extension(user): Extension<SessionUser>,
    Path(slug): Path<String>,
) -> LmsResult<Json<CourseOutlineResponse>>
where
    R: LmsRepository,
{
    let use_case = CourseOutlineUseCase::new(state.repo.clone());
    let outline = use_case.execute(&user.user_id, &slug).await?;

    Ok(Json(outline.into()))
}

// ============================================================================
// Lesson Completion
// ============================================================================

/// POST /api/lms/lessons/{id}/complete
pub async fn complete_lesson<R>(
    State(state): State<LmsAppState<R>>,
    Extension(user): Extension<SessionUser>,
    Path(lesson_id): Path<Uuid>,
) -> LmsResult<StatusCode>
where
    R: LmsRepository,
{
    let use_case = TrackProgressUseCase::new(state.repo.clone());
    use_case
        .complete_lesson(&user.user_id, &LessonId::from_uuid(lesson_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Certificate
// ============================================================================

/// GET /api/lms/certificates/{id}
pub async fn get_certificate<R>(
    State(state): State<LmsAppState<R>>,
    Extension(user): Extension<SessionUser>,
    Path(certificate_id): Path<Uuid>,
) -> LmsResult<Json<CertificateResponse>>
where
    R: LmsRepository,
{
    let use_case = FetchCertificateUseCase::new(state.repo.clone());
    let certificate = use_case
        .execute(&user.user_id, &CertificateId::from_uuid(certificate_id))
        .await?;

    Ok(Json(CertificateResponse {
        certificate_id: certificate.certificate_id.into_uuid(),
        recipient_name: certificate.recipient_name,
        course_title: certificate.course_title,
        issued_at: certificate.issued_at,
    }))
}

// ============================================================================
// Contact
// ============================================================================

/// POST /api/lms/contact
pub async fn contact<R>(
    State(state): State<LmsAppState<R>>,
    Json(req): Json<ContactRequest>,
) -> LmsResult<StatusCode>
where
    R: LmsRepository,
{
    let use_case = ContactUseCase::new(state.mailer.clone(), state.config.clone());

    use_case
        .execute(ContactInput {
            name: req.name,
            email: req.email,
            subject: req.subject,
            message: req.message,
        })
        .await?;

    Ok(StatusCode::ACCEPTED)
}

// ============================================================================
// Admin Mutations
// ============================================================================

fn mutation_context(admin: &AdminUser, headers: &HeaderMap) -> MutationContext {
    MutationContext {
        user_id: admin.0.user_id,
        automated: looks_like_automated(headers),
    }
}

/// POST /api/lms/admin/categories
pub async fn create_category<R>(
    State(state): State<LmsAppState<R>>,
    Extension(admin): Extension<AdminUser>,
    headers: HeaderMap,
    Json(req): Json<CategoryCreateRequest>,
) -> Json<ActionOutcome>
where
    R: LmsRepository,
{
    let ctx = mutation_context(&admin, &headers);
    let use_case = CategoryActionsUseCase::new(state.repo.clone(), state.config.clone());
    Json(use_case.create(&ctx, req.title, req.slug).await)
}

/// PUT /api/lms/admin/categories/{id}
pub async fn update_category<R>(
    State(state): State<LmsAppState<R>>,
    Extension(admin): Extension<AdminUser>,
    headers: HeaderMap,
    Path(category_id): Path<Uuid>,
    Json(req): Json<CategoryUpdateRequest>,
) -> Json<ActionOutcome>
where
    R: LmsRepository,
{
    let ctx = mutation_context(&admin, &headers);
    let use_case = CategoryActionsUseCase::new(state.repo.clone(), state.config.clone());
    Json(
        use_case
            .update(&ctx, CategoryId::from_uuid(category_id), req.title, req.slug)
            .await,
    )
}

/// DELETE /api/lms/admin/categories/{id}
pub async fn delete_category<R>(
    State(state): State<LmsAppState<R>>,
    Extension(admin): Extension<AdminUser>,
    headers: HeaderMap,
    Path(category_id): Path<Uuid>,
) -> Json<ActionOutcome>
where
    R: LmsRepository,
{
    let ctx = mutation_context(&admin, &headers);
    let use_case = CategoryActionsUseCase::new(state.repo.clone(), state.config.clone());
    Json(use_case.delete(&ctx, CategoryId::from_uuid(category_id)).await)
}

/// DELETE /api/lms/admin/courses/{id}
pub async fn delete_course<R>(
    State(state): State<LmsAppState<R>>,
    Extension(admin): Extension<AdminUser>,
    headers: HeaderMap,
    Path(course_id): Path<Uuid>,
) -> Json<ActionOutcome>
where
    R: LmsRepository,
{
    let ctx = mutation_context(&admin, &headers);
    let use_case = CourseActionsUseCase::new(state.repo.clone(), state.config.clone());
    Json(use_case.delete(&ctx, CourseId::from_uuid(course_id)).await)
}

/// PUT /api/lms/admin/lessons/{id}
pub async fn update_lesson<R>(
    State(state): State<LmsAppState<R>>,
    Extension(admin): Extension<AdminUser>,
    headers: HeaderMap,
    Path(lesson_id): Path<Uuid>,
    Json(req): Json<LessonUpdateRequest>,
) -> Json<ActionOutcome>
where
    R: LmsRepository,
{
    let ctx = mutation_context(&admin, &headers);
    let use_case = LessonActionsUseCase::new(state.repo.clone(), state.config.clone());
    Json(
        use_case
            .update(&ctx, LessonId::from_uuid(lesson_id), req.title, req.description)
            .await,
    )
}
