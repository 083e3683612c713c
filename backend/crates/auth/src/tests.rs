//! Unit tests for auth crate

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use kernel::id::UserId;
use uuid::Uuid;

use crate::application::admin_gate::{AdminGateUseCase, GateDecision};
use crate::application::ban_status::BanStatusUseCase;
use crate::application::config::AuthConfig;
use crate::application::sign_in::{SignInInput, SignInUseCase};
use crate::application::sign_out::SignOutUseCase;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::entity::user::User;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{ban::BanState, user_role::UserRole};
use crate::error::{AuthError, AuthResult};
use platform::client::ClientFingerprint;

/// In-memory repository backing the use-case tests
#[derive(Clone, Default)]
struct MemRepo {
    inner: Arc<Mutex<MemState>>,
}

#[derive(Default)]
struct MemState {
    users: HashMap<Uuid, (User, String)>,
    sessions: HashMap<Uuid, AuthSession>,
}

impl MemRepo {
    fn add_user(&self, email: &str, password: &str, role: UserRole) -> UserId {
        let mut user = User::new("Test User".into(), email.into());
        user.set_role(role);
        let user_id = user.user_id;

        let hash = platform::password::hash_password(password, None).unwrap();
        self.inner
            .lock()
            .unwrap()
            .users
            .insert(*user_id.as_uuid(), (user, hash));

        user_id
    }

    fn set_ban(&self, user_id: UserId, ban: BanState) {
        let mut state = self.inner.lock().unwrap();
        if let Some((user, _)) = state.users.get_mut(user_id.as_uuid()) {
            user.set_ban(ban);
        }
    }

    fn stored_ban(&self, user_id: UserId) -> BanState {
        let state = self.inner.lock().unwrap();
        state.users[user_id.as_uuid()].0.ban.clone()
    }

    fn session_count(&self) -> usize {
        self.inner.lock().unwrap().sessions.len()
    }
}

impl UserRepository for MemRepo {
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let state = self.inner.lock().unwrap();
        Ok(state.users.get(user_id.as_uuid()).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<(User, String)>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .users
            .values()
            .find(|(u, _)| u.email == email)
            .cloned())
    }

    async fn clear_ban(&self, user_id: &UserId) -> AuthResult<()> {
        let mut state = self.inner.lock().unwrap();
        if let Some((user, _)) = state.users.get_mut(user_id.as_uuid()) {
            user.clear_ban();
        }
        Ok(())
    }
}

impl AuthSessionRepository for MemRepo {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.inner
            .lock()
            .unwrap()
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_session(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>> {
        let state = self.inner.lock().unwrap();
        match state.sessions.get(&session_id) {
            Some(s) if s.client_fingerprint_hash != fingerprint_hash => {
                Err(AuthError::SessionFingerprintMismatch)
            }
            Some(s) => Ok(Some(s.clone())),
            None => Ok(None),
        }
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        self.inner
            .lock()
            .unwrap()
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        self.inner.lock().unwrap().sessions.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut state = self.inner.lock().unwrap();
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.expires_at_ms >= now_ms);
        Ok((before - state.sessions.len()) as u64)
    }
}

fn test_config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig {
        session_secret: [9u8; 32],
        cookie_secure: false,
        ..Default::default()
    })
}

const FP: [u8; 32] = [5u8; 32];

/// Insert a live session for `user_id` and return its signed cookie token
async fn issue_session(
    repo: &MemRepo,
    config: &AuthConfig,
    user_id: UserId,
    role: UserRole,
) -> String {
    let session = AuthSession::new(
        user_id,
        role,
        FP.to_vec(),
        None,
        Some("test agent".into()),
        Duration::hours(1),
    );
    repo.create(&session).await.unwrap();
    platform::crypto::sign_session_token(session.session_id, &config.session_secret)
}

mod sign_in_tests {
    use super::*;

    fn fingerprint() -> ClientFingerprint {
        ClientFingerprint::new(FP, None, Some("test agent".into()))
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials() {
        let repo = Arc::new(MemRepo::default());
        let use_case = SignInUseCase::new(repo, test_config());

        let result = use_case
            .execute(
                SignInInput {
                    email: "nobody@example.com".into(),
                    password: "whatever".into(),
                },
                fingerprint(),
            )
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let repo = Arc::new(MemRepo::default());
        repo.add_user("ada@example.com", "right password", UserRole::Student);
        let use_case = SignInUseCase::new(repo, test_config());

        let result = use_case
            .execute(
                SignInInput {
                    email: "ada@example.com".into(),
                    password: "wrong password".into(),
                },
                fingerprint(),
            )
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn sign_in_issues_verifiable_session_token() {
        let repo = Arc::new(MemRepo::default());
        let user_id = repo.add_user("ada@example.com", "correct horse", UserRole::Student);
        let config = test_config();
        let use_case = SignInUseCase::new(repo.clone(), config.clone());

        let output = use_case
            .execute(
                SignInInput {
                    email: "ada@example.com".into(),
                    password: "correct horse".into(),
                },
                fingerprint(),
            )
            .await
            .unwrap();

        assert_eq!(output.user_id, *user_id.as_uuid());
        assert_eq!(output.user_role, "student");

        // The token must verify and reference a stored session
        let session_id =
            platform::crypto::verify_session_token(&output.session_token, &config.session_secret)
                .unwrap();
        let session = repo.find_session(session_id, &FP).await.unwrap().unwrap();
        assert_eq!(session.user_id, user_id);
    }

    #[tokio::test]
    async fn sign_out_deletes_the_session() {
        let repo = Arc::new(MemRepo::default());
        let user_id = repo.add_user("ada@example.com", "pw", UserRole::Student);
        let config = test_config();

        let token = issue_session(&repo, &config, user_id, UserRole::Student).await;
        assert_eq!(repo.session_count(), 1);

        let use_case = SignOutUseCase::new(repo.clone(), config);
        use_case.execute(&token).await.unwrap();
        assert_eq!(repo.session_count(), 0);
    }

    #[tokio::test]
    async fn sign_out_ignores_unverifiable_tokens() {
        let repo = Arc::new(MemRepo::default());
        let use_case = SignOutUseCase::new(repo, test_config());
        assert!(use_case.execute("garbage.token").await.is_ok());
    }
}

mod admin_gate_tests {
    use super::*;

    #[tokio::test]
    async fn missing_token_requires_login() {
        let repo = Arc::new(MemRepo::default());
        let gate = AdminGateUseCase::new(repo, test_config());

        let decision = gate.check(None, &FP).await.unwrap();
        assert!(matches!(decision, GateDecision::LoginRequired));
    }

    #[tokio::test]
    async fn garbage_token_requires_login() {
        let repo = Arc::new(MemRepo::default());
        let gate = AdminGateUseCase::new(repo, test_config());

        let decision = gate.check(Some("not-a-real-token"), &FP).await.unwrap();
        assert!(matches!(decision, GateDecision::LoginRequired));
    }

    #[tokio::test]
    async fn fingerprint_mismatch_requires_login() {
        let repo = Arc::new(MemRepo::default());
        let user_id = repo.add_user("root@example.com", "pw", UserRole::Admin);
        let config = test_config();
        let token = issue_session(&repo, &config, user_id, UserRole::Admin).await;

        let gate = AdminGateUseCase::new(repo, config);
        let other_fp = [6u8; 32];
        let decision = gate.check(Some(&token), &other_fp).await.unwrap();
        assert!(matches!(decision, GateDecision::LoginRequired));
    }

    #[tokio::test]
    async fn student_role_is_not_admin() {
        let repo = Arc::new(MemRepo::default());
        let user_id = repo.add_user("ada@example.com", "pw", UserRole::Student);
        let config = test_config();
        let token = issue_session(&repo, &config, user_id, UserRole::Student).await;

        let gate = AdminGateUseCase::new(repo, config);
        let decision = gate.check(Some(&token), &FP).await.unwrap();
        assert!(matches!(decision, GateDecision::NotAdmin));
    }

    #[tokio::test]
    async fn admin_is_granted() {
        let repo = Arc::new(MemRepo::default());
        let user_id = repo.add_user("root@example.com", "pw", UserRole::Admin);
        let config = test_config();
        let token = issue_session(&repo, &config, user_id, UserRole::Admin).await;

        let gate = AdminGateUseCase::new(repo, config);
        let decision = gate.check(Some(&token), &FP).await.unwrap();
        match decision {
            GateDecision::Granted(user) => assert_eq!(user.user_id, user_id),
            other => panic!("expected Granted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn active_ban_is_banned() {
        let repo = Arc::new(MemRepo::default());
        let user_id = repo.add_user("root@example.com", "pw", UserRole::Admin);
        repo.set_ban(
            user_id,
            BanState::until("spam", Some(Utc::now() + Duration::hours(1))),
        );
        let config = test_config();
        let token = issue_session(&repo, &config, user_id, UserRole::Admin).await;

        let gate = AdminGateUseCase::new(repo, config);
        let decision = gate.check(Some(&token), &FP).await.unwrap();
        assert!(matches!(decision, GateDecision::Banned));
    }

    #[tokio::test]
    async fn permanent_ban_is_banned() {
        let repo = Arc::new(MemRepo::default());
        let user_id = repo.add_user("root@example.com", "pw", UserRole::Admin);
        repo.set_ban(user_id, BanState::until("spam", None));
        let config = test_config();
        let token = issue_session(&repo, &config, user_id, UserRole::Admin).await;

        let gate = AdminGateUseCase::new(repo, config);
        let decision = gate.check(Some(&token), &FP).await.unwrap();
        assert!(matches!(decision, GateDecision::Banned));
    }

    #[tokio::test]
    async fn expired_ban_is_cleared_and_access_granted() {
        let repo = Arc::new(MemRepo::default());
        let user_id = repo.add_user("root@example.com", "pw", UserRole::Admin);
        repo.set_ban(
            user_id,
            BanState::until("spam", Some(Utc::now() - Duration::seconds(1))),
        );
        let config = test_config();
        let token = issue_session(&repo, &config, user_id, UserRole::Admin).await;

        let gate = AdminGateUseCase::new(repo.clone(), config);
        let decision = gate.check(Some(&token), &FP).await.unwrap();
        assert!(matches!(decision, GateDecision::Granted(_)));

        // The lapsed ban fields are cleared as a side effect
        assert_eq!(repo.stored_ban(user_id), BanState::none());
    }
}

mod ban_status_tests {
    use super::*;

    #[tokio::test]
    async fn anonymous_is_not_banned() {
        let repo = Arc::new(MemRepo::default());
        let use_case = BanStatusUseCase::new(repo, test_config());
        assert!(!use_case.is_banned(None, &FP).await.unwrap());
    }

    #[tokio::test]
    async fn active_ban_reports_banned() {
        let repo = Arc::new(MemRepo::default());
        let user_id = repo.add_user("ada@example.com", "pw", UserRole::Student);
        repo.set_ban(
            user_id,
            BanState::until("spam", Some(Utc::now() + Duration::hours(1))),
        );
        let config = test_config();
        let token = issue_session(&repo, &config, user_id, UserRole::Student).await;

        let use_case = BanStatusUseCase::new(repo, config);
        assert!(use_case.is_banned(Some(&token), &FP).await.unwrap());
    }

    #[tokio::test]
    async fn expired_ban_reports_unbanned_and_clears() {
        let repo = Arc::new(MemRepo::default());
        let user_id = repo.add_user("ada@example.com", "pw", UserRole::Student);
        repo.set_ban(
            user_id,
            BanState::until("spam", Some(Utc::now() - Duration::seconds(1))),
        );
        let config = test_config();
        let token = issue_session(&repo, &config, user_id, UserRole::Student).await;

        let use_case = BanStatusUseCase::new(repo.clone(), config);
        assert!(!use_case.is_banned(Some(&token), &FP).await.unwrap());
        assert_eq!(repo.stored_ban(user_id), BanState::none());
    }
}
