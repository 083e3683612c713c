//! LMS (Learning Management) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Access Model
//! - Course outlines and lesson data are only served to users holding an
//!   Active or Completed enrollment; everyone else gets Not Found, so
//!   non-enrolled users cannot probe which courses exist
//! - Admin mutations sit behind the auth crate's three-policy gate and a
//!   per-user fixed-window rate limit; automated clients are rejected
//!   before the counter is touched
//! - Mutation actions always answer with a uniform success/error result,
//!   never a propagated exception

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::LmsConfig;
pub use error::{LmsError, LmsResult};
pub use infra::postgres::PgLmsRepository;
pub use presentation::router::{lms_admin_router, lms_contact_router, lms_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::cart::*;
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgLmsRepository as LmsStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
