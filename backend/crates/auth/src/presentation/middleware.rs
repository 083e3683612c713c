//! Admin Gate Middleware
//!
//! Guards admin routes with the three-policy gate. Each denial is a
//! redirect rather than a bare status code, so browser navigation lands
//! on a page that explains itself.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use platform::client::{extract_client_ip, extract_fingerprint};
use std::sync::Arc;

use crate::application::admin_gate::{AdminGateUseCase, GateDecision};
use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;

/// Middleware state for the admin gate
#[derive(Clone)]
pub struct AdminGateState<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Admin user stored in request extensions after the gate passes
#[derive(Clone)]
pub struct AdminUser(pub User);

/// Authenticated user stored in request extensions by `require_session`
#[derive(Clone, Copy)]
pub struct SessionUser {
    pub user_id: kernel::id::UserId,
    pub role: UserRole,
}

/// Middleware that requires a valid session (no role or ban check)
///
/// Data routes respond 401 rather than redirecting; the frontend decides
/// where to send the user.
pub async fn require_session<R>(
    state: AdminGateState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let headers = req.headers();

    let client_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());

    let client_ip = extract_client_ip(headers, client_ip);

    let fingerprint = match extract_fingerprint(headers, client_ip) {
        Ok(fp) => fp,
        Err(e) => return Err(AuthError::from(e).into_response()),
    };

    let token = platform::cookie::extract_cookie(headers, &state.config.session_cookie_name);

    let check = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let session = match token {
        Some(token) => check.get_session(&token, &fingerprint.hash).await.ok(),
        None => None,
    };

    let Some(session) = session else {
        return Err((
            StatusCode::UNAUTHORIZED,
            [("X-Auth-Required", "true")],
        )
            .into_response());
    };

    req.extensions_mut().insert(SessionUser {
        user_id: session.user_id,
        role: session.user_role,
    });

    Ok(next.run(req).await)
}

/// Middleware that requires an authenticated, unbanned admin
pub async fn require_admin<R>(
    state: AdminGateState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let headers = req.headers();

    let client_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());

    let client_ip = extract_client_ip(headers, client_ip);

    // A client that cannot be fingerprinted cannot hold a session
    let fingerprint = match extract_fingerprint(headers, client_ip) {
        Ok(fp) => fp,
        Err(_) => {
            return Err(Redirect::to(&state.config.login_path).into_response());
        }
    };

    let token = platform::cookie::extract_cookie(headers, &state.config.session_cookie_name);

    let gate = AdminGateUseCase::new(state.repo.clone(), state.config.clone());

    let decision = match gate.check(token.as_deref(), &fingerprint.hash).await {
        Ok(decision) => decision,
        Err(e) => return Err(e.into_response()),
    };

    match decision {
        GateDecision::Granted(user) => {
            req.extensions_mut().insert(AdminUser(user));
            Ok(next.run(req).await)
        }
        GateDecision::LoginRequired => {
            Err(Redirect::to(&state.config.login_path).into_response())
        }
        GateDecision::Banned => Err(Redirect::to(&state.config.banned_path).into_response()),
        GateDecision::NotAdmin => Err(Redirect::to(&state.config.denied_path).into_response()),
    }
}
