//! Sign Out Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Delete the session referenced by the token, if any
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        let Some(session_id) =
            platform::crypto::verify_session_token(session_token, &self.config.session_secret)
        else {
            // Unverifiable token: nothing to delete
            return Ok(());
        };

        self.session_repo.delete(session_id).await?;
        tracing::info!(session_id = %session_id, "Session signed out");

        Ok(())
    }
}
