//! Domain layer

pub mod entity {
    pub mod auth_session;
    pub mod user;

    pub use auth_session::AuthSession;
    pub use user::User;
}
pub mod repository;
pub mod value_object {
    pub mod ban;
    pub mod user_role;

    pub use ban::BanState;
    pub use user_role::UserRole;
}
