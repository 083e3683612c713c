//! Application Configuration
//!
//! Configuration for the LMS application layer.

use platform::rate_limit::RateLimitConfig;

/// LMS application configuration
#[derive(Debug, Clone)]
pub struct LmsConfig {
    /// Fixed-window limit applied to every admin mutation action
    pub mutation_rate_limit: RateLimitConfig,
    /// Recipient of contact-form notifications
    pub contact_team_email: String,
}

impl Default for LmsConfig {
    fn default() -> Self {
        Self {
            // 5 requests per 60 seconds per user
            mutation_rate_limit: RateLimitConfig::default(),
            contact_team_email: "team@example.com".to_string(),
        }
    }
}

impl LmsConfig {
    /// Create config for development
    pub fn development() -> Self {
        Self::default()
    }
}
