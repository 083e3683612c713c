//! Application layer - Use cases

pub mod category_actions;
pub mod check_enrollment;
pub mod config;
pub mod contact;
pub mod course_actions;
pub mod course_outline;
pub mod fetch_certificate;
pub mod lesson_actions;
pub mod mutation;
pub mod track_progress;

pub use category_actions::CategoryActionsUseCase;
pub use check_enrollment::CheckEnrollmentUseCase;
pub use contact::{ContactInput, ContactUseCase};
pub use course_actions::CourseActionsUseCase;
pub use course_outline::{CourseOutline, CourseOutlineUseCase};
pub use fetch_certificate::FetchCertificateUseCase;
pub use lesson_actions::LessonActionsUseCase;
pub use mutation::{ActionOutcome, ActionStatus, MutationContext, MutationGuard};
pub use track_progress::TrackProgressUseCase;
