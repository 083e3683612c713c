//! User Entity
//!
//! Core user profile entity. Credential material (password hash) is kept
//! out of this struct and only handled by the repository.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{ban::BanState, user_role::UserRole};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Email (unique, used for sign-in)
    pub email: String,
    /// Role (Student, Admin)
    pub role: UserRole,
    /// Suspension state
    pub ban: BanState,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new student account
    pub fn new(name: String, email: String) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            role: UserRole::default(),
            ban: BanState::none(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the user holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Update user role
    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Record a ban
    pub fn set_ban(&mut self, ban: BanState) {
        self.ban = ban;
        self.updated_at = Utc::now();
    }

    /// Clear the recorded ban
    pub fn clear_ban(&mut self) {
        self.ban.clear();
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_student() {
        let user = User::new("Ada".into(), "ada@example.com".into());
        assert_eq!(user.role, UserRole::Student);
        assert!(!user.is_admin());
        assert!(!user.ban.banned);
    }

    #[test]
    fn test_clear_ban() {
        let mut user = User::new("Ada".into(), "ada@example.com".into());
        user.set_ban(BanState::until("spam", None));
        assert!(user.ban.banned);

        user.clear_ban();
        assert_eq!(user.ban, BanState::none());
    }
}
