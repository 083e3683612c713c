//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::client::{extract_client_ip, extract_fingerprint};

use crate::application::config::AuthConfig;
use crate::application::{
    BanStatusUseCase, CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase,
};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    BanStatusResponse, SessionStatusResponse, SignInRequest, SignInResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input, fingerprint).await?;

    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            user_id: output.user_id,
            user_role: output.user_role,
        }),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // Ignore errors - just clear the cookie
        let _ = use_case.execute(&token).await;
    }

    let cookie = state.config.session_cookie().build_delete_cookie();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let session = if let Some(token) = token {
        use_case.get_session(&token, &fingerprint.hash).await.ok()
    } else {
        None
    };

    match session {
        Some(session) => Ok(Json(SessionStatusResponse {
            authenticated: true,
            user_id: Some(session.user_id.into_uuid()),
            user_role: Some(session.user_role.code().to_string()),
            expires_at_ms: Some(session.expires_at_ms),
        })),
        None => Ok(Json(SessionStatusResponse {
            authenticated: false,
            user_id: None,
            user_role: None,
            expires_at_ms: None,
        })),
    }
}

// ============================================================================
// Ban Status
// ============================================================================

/// GET /api/auth/ban-status
///
/// Anonymous callers get `banned: false`. A lapsed ban is cleared here
/// as a side effect, so the answer reflects the current moment.
pub async fn ban_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
) -> AuthResult<Json<BanStatusResponse>>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = BanStatusUseCase::new(state.repo.clone(), state.config.clone());
    let banned = use_case
        .is_banned(token.as_deref(), &fingerprint.hash)
        .await?;

    Ok(Json(BanStatusResponse { banned }))
}
