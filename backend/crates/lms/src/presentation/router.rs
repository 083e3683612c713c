//! LMS Routers
//!
//! Three routers with different gating needs:
//! - `lms_router` - enrollment-scoped data routes; the caller mounts it
//!   behind the auth crate's `require_session` middleware
//! - `lms_contact_router` - the anonymous contact endpoint
//! - `lms_admin_router` - mutation actions; the caller mounts it behind
//!   `require_admin`

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use platform::mailer::Mailer;

use crate::application::config::LmsConfig;
use crate::infra::postgres::PgLmsRepository;
use crate::presentation::handlers::{self, LmsAppState, LmsRepository};

/// Session-gated data routes with PostgreSQL repository
pub fn lms_router(repo: PgLmsRepository, config: LmsConfig) -> Router {
    lms_router_generic(repo, config)
}

/// Session-gated data routes for any repository implementation
pub fn lms_router_generic<R>(repo: R, config: LmsConfig) -> Router
where
    R: LmsRepository,
{
    let state = LmsAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        mailer: None,
    };

    Router::new()
        .route("/enrollments/check", post(handlers::check_enrollments::<R>))
        .route("/courses/{slug}/outline", get(handlers::course_outline::<R>))
        .route("/lessons/{id}/complete", post(handlers::complete_lesson::<R>))
        .route("/certificates/{id}", get(handlers::get_certificate::<R>))
        .with_state(state)
}

/// Anonymous contact endpoint
pub fn lms_contact_router(
    repo: PgLmsRepository,
    config: LmsConfig,
    mailer: Option<Arc<Mailer>>,
) -> Router {
    let state = LmsAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        mailer,
    };

    Router::new()
        .route("/contact", post(handlers::contact::<PgLmsRepository>))
        .with_state(state)
}

/// Admin mutation routes with PostgreSQL repository
pub fn lms_admin_router(repo: PgLmsRepository, config: LmsConfig) -> Router {
    lms_admin_router_generic(repo, config)
}

/// Admin mutation routes for any repository implementation
pub fn lms_admin_router_generic<R>(repo: R, config: LmsConfig) -> Router
where
    R: LmsRepository,
{
    let state = LmsAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        mailer: None,
    };

    Router::new()
        .route("/categories", post(handlers::create_category::<R>))
        .route(
            "/categories/{id}",
            put(handlers::update_category::<R>).delete(handlers::delete_category::<R>),
        )
        .route("/courses/{id}", delete(handlers::delete_course::<R>))
        .route("/lessons/{id}", put(handlers::update_lesson::<R>))
        .with_state(state)
}
