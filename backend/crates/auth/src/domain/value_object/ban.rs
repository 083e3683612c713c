//! Ban State Value Object
//!
//! Suspension status for an account. A ban may carry an expiry; once the
//! expiry has passed the account is unbanned in effect, and the next
//! authorization check clears the stored fields (one idempotent write).
//! The predicates here are pure so the suspension policy can be tested
//! without a database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Suspension state of an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanState {
    /// Whether a ban is recorded
    pub banned: bool,
    /// Human-readable reason, set by the admin who issued the ban
    pub reason: Option<String>,
    /// Expiry; `None` means permanent
    pub expires_at: Option<DateTime<Utc>>,
}

impl BanState {
    /// No ban recorded
    pub fn none() -> Self {
        Self::default()
    }

    /// A ban in force until `expires_at` (or forever when `None`)
    pub fn until(reason: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            banned: true,
            reason: Some(reason.into()),
            expires_at,
        }
    }

    /// Whether the ban is in force at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        if !self.banned {
            return false;
        }
        match self.expires_at {
            Some(expires) => expires > now,
            None => true,
        }
    }

    /// Whether a recorded ban has lapsed at `now`
    ///
    /// Distinct from `!is_active`: only true when ban fields are still
    /// stored but the expiry has passed, i.e. when a cleanup write is due.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.banned && matches!(self.expires_at, Some(expires) if expires <= now)
    }

    /// Clear the recorded ban
    pub fn clear(&mut self) {
        *self = Self::none();
    }
}
