//! Sign In Use Case
//!
//! Email + password sign-in issuing a server-side session with an
//! HMAC-signed cookie token.

use std::sync::Arc;

use chrono::Duration;
use platform::client::ClientFingerprint;
use platform::password::verify_password;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Input DTO for sign in
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Output DTO for sign in
pub struct SignInOutput {
    pub user_id: uuid::Uuid,
    pub user_role: String,
    pub session_token: String,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<SignInOutput> {
        // The same error for unknown email and wrong password, so sign-in
        // does not disclose which accounts exist
        let Some((user, password_hash)) = self.repo.find_by_email(&input.email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(&input.password, &password_hash, self.config.pepper())? {
            return Err(AuthError::InvalidCredentials);
        }

        let ttl = Duration::milliseconds(self.config.session_ttl_ms());
        let session = AuthSession::new(
            user.user_id,
            user.role,
            fingerprint.hash_vec(),
            fingerprint.ip_string(),
            fingerprint.user_agent.clone(),
            ttl,
        );

        self.repo.create(&session).await?;

        let token =
            platform::crypto::sign_session_token(session.session_id, &self.config.session_secret);

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            user_id: user.user_id.into_uuid(),
            user_role: user.role.code().to_string(),
            session_token: token,
        })
    }
}
