//! Auth Session Entity
//!
//! Represents an authenticated user session.
//! Stored in database with cookie-based token reference.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use uuid::Uuid;

use crate::domain::value_object::user_role::UserRole;

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Reference to User
    pub user_id: UserId,
    /// User role at session creation
    pub user_role: UserRole,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Client fingerprint hash (User-Agent based)
    pub client_fingerprint_hash: Vec<u8>,
    /// Client IP (optional, for logging)
    pub client_ip: Option<String>,
    /// User agent string
    pub user_agent: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(
        user_id: UserId,
        user_role: UserRole,
        fingerprint_hash: Vec<u8>,
        client_ip: Option<String>,
        user_agent: Option<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            user_role,
            expires_at_ms: (now + ttl).timestamp_millis(),
            client_fingerprint_hash: fingerprint_hash,
            client_ip,
            user_agent,
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_ttl(ttl: Duration) -> AuthSession {
        AuthSession::new(
            UserId::new(),
            UserRole::Student,
            vec![0u8; 32],
            None,
            Some("test agent".into()),
            ttl,
        )
    }

    #[test]
    fn test_fresh_session_not_expired() {
        let session = session_with_ttl(Duration::hours(12));
        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 0);
    }

    #[test]
    fn test_past_ttl_is_expired() {
        let session = session_with_ttl(Duration::seconds(-1));
        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }
}
