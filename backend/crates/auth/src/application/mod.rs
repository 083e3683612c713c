//! Application layer - Use cases

pub mod admin_gate;
pub mod ban_status;
pub mod check_session;
pub mod config;
pub mod sign_in;
pub mod sign_out;

pub use admin_gate::{AdminGateUseCase, GateDecision};
pub use ban_status::BanStatusUseCase;
pub use check_session::CheckSessionUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
