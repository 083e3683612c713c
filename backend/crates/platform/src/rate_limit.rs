//! Rate Limiting Infrastructure
//!
//! Fixed-window rate limit vocabulary shared by the mutation actions.
//! Storage lives in the feature crates (the counter is a database row);
//! this module only defines configuration and the decision type.

use std::time::Duration;

/// Fixed-window rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }

    /// Start of the fixed window containing `now_ms`
    pub fn window_start_ms(&self, now_ms: i64) -> i64 {
        (now_ms / self.window_ms()) * self.window_ms()
    }

    /// Decide from the post-increment counter value
    pub fn decide(&self, count: u32, now_ms: i64) -> RateLimitDecision {
        if count <= self.max_requests {
            RateLimitDecision::Allowed {
                remaining: self.max_requests - count,
            }
        } else {
            let window_end = self.window_start_ms(now_ms) + self.window_ms();
            RateLimitDecision::Limited {
                retry_after_ms: (window_end - now_ms).max(0),
            }
        }
    }
}

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request is within the window budget
    Allowed { remaining: u32 },
    /// Budget exhausted; retry once the window rolls over
    Limited { retry_after_ms: i64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 5);
        assert_eq!(config.window_ms(), 60_000);
    }

    #[test]
    fn test_window_start_alignment() {
        let config = RateLimitConfig::new(5, 60);
        assert_eq!(config.window_start_ms(0), 0);
        assert_eq!(config.window_start_ms(59_999), 0);
        assert_eq!(config.window_start_ms(60_000), 60_000);
        assert_eq!(config.window_start_ms(125_000), 120_000);
    }

    #[test]
    fn test_decision_boundary() {
        let config = RateLimitConfig::new(5, 60);

        // Counts 1..=5 are allowed, the 6th is denied
        for count in 1..=5 {
            assert!(config.decide(count, 0).is_allowed());
        }
        let denied = config.decide(6, 10_000);
        assert!(!denied.is_allowed());
        assert_eq!(
            denied,
            RateLimitDecision::Limited {
                retry_after_ms: 50_000
            }
        );
    }

    #[test]
    fn test_remaining_counts_down() {
        let config = RateLimitConfig::new(3, 60);
        assert_eq!(
            config.decide(1, 0),
            RateLimitDecision::Allowed { remaining: 2 }
        );
        assert_eq!(
            config.decide(3, 0),
            RateLimitDecision::Allowed { remaining: 0 }
        );
    }
}
