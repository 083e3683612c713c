//! Admin Gate Use Case
//!
//! The guard in front of every admin surface. Three policies are applied
//! in order, each an independent predicate:
//!
//! 1. **Authentication** - a valid, unexpired session must exist
//! 2. **Suspension** - an in-force ban denies access; a lapsed ban is
//!    treated as no ban and its stored fields are cleared as a side
//!    effect (single idempotent write, so re-running the check is safe)
//! 3. **Authorization** - the admin role is required
//!
//! Each step is a pure read except the lapsed-ban cleanup, so no
//! rollback coordination is needed.

use std::sync::Arc;

use chrono::Utc;

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::AuthResult;

/// Outcome of the admin gate
#[derive(Debug)]
pub enum GateDecision {
    /// All three policies passed
    Granted(User),
    /// No valid session
    LoginRequired,
    /// Session is valid but the account is suspended
    Banned,
    /// Session is valid but the account is not an admin
    NotAdmin,
}

/// Admin gate use case
pub struct AdminGateUseCase<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> AdminGateUseCase<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Run the three policies in order
    pub async fn check(
        &self,
        session_token: Option<&str>,
        fingerprint_hash: &[u8],
    ) -> AuthResult<GateDecision> {
        // Policy 1: authentication
        let Some(token) = session_token else {
            return Ok(GateDecision::LoginRequired);
        };

        let check = CheckSessionUseCase::new(self.repo.clone(), self.config.clone());
        let Ok(session) = check.get_session(token, fingerprint_hash).await else {
            return Ok(GateDecision::LoginRequired);
        };

        let Some(user) = self.repo.find_by_id(&session.user_id).await? else {
            // Session outlived the account
            return Ok(GateDecision::LoginRequired);
        };

        // Policy 2: suspension
        let now = Utc::now();
        let user = if user.ban.is_expired(now) {
            // Lapsed ban: clear it and proceed as unbanned
            self.repo.clear_ban(&user.user_id).await?;
            tracing::info!(user_id = %user.user_id, "Cleared expired ban");
            let mut user = user;
            user.clear_ban();
            user
        } else if user.ban.is_active(now) {
            return Ok(GateDecision::Banned);
        } else {
            user
        };

        // Policy 3: authorization
        if !user.is_admin() {
            return Ok(GateDecision::NotAdmin);
        }

        Ok(GateDecision::Granted(user))
    }
}
