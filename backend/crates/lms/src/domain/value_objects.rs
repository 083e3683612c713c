//! Domain Value Objects

use serde::{Deserialize, Serialize};

/// Publication status of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Draft,
    Published,
    Archived,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Draft => "draft",
            CourseStatus::Published => "published",
            CourseStatus::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(CourseStatus::Draft),
            "published" => Some(CourseStatus::Published),
            "archived" => Some(CourseStatus::Archived),
            _ => None,
        }
    }
}

/// Status of an enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Pending,
    Cancelled,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Completed => "completed",
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(EnrollmentStatus::Active),
            "completed" => Some(EnrollmentStatus::Completed),
            "pending" => Some(EnrollmentStatus::Pending),
            "cancelled" => Some(EnrollmentStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether this status grants access to course content
    ///
    /// Only Active and Completed enrollments may see lessons; Pending
    /// and Cancelled are treated the same as no enrollment at all.
    pub fn grants_access(&self) -> bool {
        matches!(self, EnrollmentStatus::Active | EnrollmentStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_access() {
        assert!(EnrollmentStatus::Active.grants_access());
        assert!(EnrollmentStatus::Completed.grants_access());
        assert!(!EnrollmentStatus::Pending.grants_access());
        assert!(!EnrollmentStatus::Cancelled.grants_access());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            EnrollmentStatus::Active,
            EnrollmentStatus::Completed,
            EnrollmentStatus::Pending,
            EnrollmentStatus::Cancelled,
        ] {
            assert_eq!(EnrollmentStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(EnrollmentStatus::from_str("unknown"), None);
    }
}
