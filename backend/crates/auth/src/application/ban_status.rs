//! Ban Status Use Case
//!
//! Answers "is the caller currently banned?" and clears a lapsed ban as
//! a side effect, so a ban that expired while the user was away
//! disappears on their first request back.

use std::sync::Arc;

use chrono::Utc;

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::AuthResult;

/// Ban status use case
pub struct BanStatusUseCase<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> BanStatusUseCase<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Whether the caller is banned right now
    ///
    /// Anonymous callers and dangling sessions report `false`: there is
    /// no account to be banned.
    pub async fn is_banned(
        &self,
        session_token: Option<&str>,
        fingerprint_hash: &[u8],
    ) -> AuthResult<bool> {
        let Some(token) = session_token else {
            return Ok(false);
        };

        let check = CheckSessionUseCase::new(self.repo.clone(), self.config.clone());
        let Ok(session) = check.get_session(token, fingerprint_hash).await else {
            return Ok(false);
        };

        let Some(user) = self.repo.find_by_id(&session.user_id).await? else {
            return Ok(false);
        };

        let now = Utc::now();
        if user.ban.is_expired(now) {
            self.repo.clear_ban(&user.user_id).await?;
            tracing::info!(user_id = %user.user_id, "Cleared expired ban");
            return Ok(false);
        }

        Ok(user.ban.is_active(now))
    }
}
