use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Student = 0,
    Admin = 1,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(UserRole::Student),
            1 => Some(UserRole::Admin),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "student" => Some(UserRole::Student),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_id() {
        assert_eq!(UserRole::from_id(0), Some(UserRole::Student));
        assert_eq!(UserRole::from_id(1), Some(UserRole::Admin));
        assert_eq!(UserRole::from_id(9), None);
    }

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("student"), Some(UserRole::Student));
        assert_eq!(UserRole::from_code("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("moderator"), None);
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::Student.to_string(), "student");
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_is_admin() {
        assert!(!UserRole::Student.is_admin());
        assert!(UserRole::Admin.is_admin());
    }

    #[test]
    fn test_default_is_student() {
        assert_eq!(UserRole::default(), UserRole::Student);
    }
}
