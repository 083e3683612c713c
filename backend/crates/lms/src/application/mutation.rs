//! Mutation Guard and Action Results
//!
//! Every admin mutation runs the same preamble: reject automated
//! clients, then charge the caller's fixed-window budget. The bot check
//! comes first so a bot denial never consumes rate-limit budget and the
//! two denials stay distinguishable.
//!
//! Actions answer with `ActionOutcome`, never an Err: the HTTP layer
//! serializes the outcome as-is, so a failed mutation is still a 200
//! with `status: "error"`.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use serde::Serialize;

use crate::application::config::LmsConfig;
use crate::domain::repository::MutationRateLimitRepository;
use crate::error::{LmsError, LmsResult};

/// Resolved caller of a mutation action
#[derive(Debug, Clone, Copy)]
pub struct MutationContext {
    pub user_id: UserId,
    /// Set by the HTTP layer from the User-Agent heuristic
    pub automated: bool,
}

/// Tagged status of an action result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Success,
    Error,
}

/// Uniform result of every mutation action
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub status: ActionStatus,
    pub message: String,
}

impl ActionOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Success
    }

    /// Convert an error into the uniform shape
    ///
    /// Denials keep their distinguishable messages; everything else
    /// falls back to the error's own message or a generic line.
    pub fn from_error(error: &LmsError) -> Self {
        let message = match error {
            LmsError::BlockedAsBot => "Request blocked.".to_string(),
            LmsError::RateLimited { .. } => {
                "Too many requests. Please try again later.".to_string()
            }
            LmsError::InvalidData(_) => "Invalid data".to_string(),
            LmsError::Database(_) | LmsError::Internal(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            other => other.to_string(),
        };
        Self::error(message)
    }
}

/// Shared preamble for mutation actions
pub struct MutationGuard<R>
where
    R: MutationRateLimitRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<LmsConfig>,
}

impl<R> MutationGuard<R>
where
    R: MutationRateLimitRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<LmsConfig>) -> Self {
        Self { repo, config }
    }

    /// Bot check, then the fixed-window counter
    pub async fn check(&self, ctx: &MutationContext) -> LmsResult<()> {
        if ctx.automated {
            return Err(LmsError::BlockedAsBot);
        }

        let limit = &self.config.mutation_rate_limit;
        let now_ms = Utc::now().timestamp_millis();
        let window_start = limit.window_start_ms(now_ms);

        let count = self.repo.increment(&ctx.user_id, window_start).await?;

        match limit.decide(count, now_ms) {
            platform::rate_limit::RateLimitDecision::Allowed { .. } => Ok(()),
            platform::rate_limit::RateLimitDecision::Limited { retry_after_ms } => {
                Err(LmsError::RateLimited { retry_after_ms })
            }
        }
    }
}
