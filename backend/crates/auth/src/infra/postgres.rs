//! PostgreSQL Repository Implementations

use chrono::Utc;
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{ban::BanState, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgAuthRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                name,
                email,
                role,
                banned,
                ban_reason,
                ban_expires_at,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<(User, String)>> {
        let row = sqlx::query_as::<_, UserWithHashRow>(
            r#"
            SELECT
                user_id,
                name,
                email,
                role,
                banned,
                ban_reason,
                ban_expires_at,
                created_at,
                updated_at,
                password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                let hash = r.password_hash.clone();
                Ok(Some((r.into_user()?, hash)))
            }
            None => Ok(None),
        }
    }

    async fn clear_ban(&self, user_id: &UserId) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET banned = FALSE,
                ban_reason = NULL,
                ban_expires_at = NULL,
                updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await?;

        tracing::info!(user_id = %user_id, "Ban fields cleared");
        Ok(())
    }
}

impl AuthSessionRepository for PgAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                user_id,
                user_role,
                expires_at_ms,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id.as_uuid())
        .bind(session.user_role.id())
        .bind(session.expires_at_ms)
        .bind(&session.client_fingerprint_hash)
        .bind(&session.client_ip)
        .bind(&session.user_agent)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(session_id = %session.session_id, "Session created");
        Ok(())
    }

    async fn find_session(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                user_role,
                expires_at_ms,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            FROM auth_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                if r.client_fingerprint_hash != fingerprint_hash {
                    tracing::warn!(session_id = %session_id, "Session fingerprint mismatch");
                    return Err(AuthError::SessionFingerprintMismatch);
                }
                Ok(Some(r.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_sessions
            SET expires_at_ms = $2, last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        tracing::info!(session_id = %session_id, "Session deleted");
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// Internal row types for sqlx mapping

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    role: i16,
    banned: bool,
    ban_reason: Option<String>,
    ban_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_id(self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role id: {}", self.role)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            name: self.name,
            email: self.email,
            role,
            ban: BanState {
                banned: self.banned,
                reason: self.ban_reason,
                expires_at: self.ban_expires_at,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserWithHashRow {
    user_id: Uuid,
    name: String,
    email: String,
    role: i16,
    banned: bool,
    ban_reason: Option<String>,
    ban_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    password_hash: String,
}

impl UserWithHashRow {
    fn into_user(self) -> AuthResult<User> {
        UserRow {
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            role: self.role,
            banned: self.banned,
            ban_reason: self.ban_reason,
            ban_expires_at: self.ban_expires_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_user()
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Uuid,
    user_role: i16,
    expires_at_ms: i64,
    client_fingerprint_hash: Vec<u8>,
    client_ip: Option<String>,
    user_agent: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    last_activity_at: chrono::DateTime<chrono::Utc>,
}

impl SessionRow {
    fn into_session(self) -> AuthResult<AuthSession> {
        let user_role = UserRole::from_id(self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role id: {}", self.user_role)))?;

        Ok(AuthSession {
            session_id: self.session_id,
            user_id: UserId::from_uuid(self.user_id),
            user_role,
            expires_at_ms: self.expires_at_ms,
            client_fingerprint_hash: self.client_fingerprint_hash,
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        })
    }
}
