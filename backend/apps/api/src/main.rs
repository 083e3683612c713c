//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use auth::domain::repository::AuthSessionRepository;
use auth::middleware::AdminGateState;
use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use lms::{LmsConfig, lms_admin_router, lms_router, store::LmsStore};
use platform::mailer::{Mailer, MailerConfig};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,lms=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired sessions and stale rate-limit windows
    // Errors here should not prevent server startup
    let auth_store_for_cleanup = PgAuthRepository::new(pool.clone());
    match auth_store_for_cleanup.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Auth session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Auth session cleanup failed, continuing anyway");
        }
    }

    let lms_store_for_cleanup = LmsStore::new(pool.clone());
    match lms_store_for_cleanup.cleanup_rate_limits().await {
        Ok(windows) => {
            tracing::info!(windows_deleted = windows, "Rate limit cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rate limit cleanup failed, continuing anyway");
        }
    }

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "SESSION_SECRET must decode to 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);

        let password_pepper = match env::var("PASSWORD_PEPPER") {
            Ok(pepper_b64) => Some(Engine::decode(&general_purpose::STANDARD, &pepper_b64)?),
            Err(_) => None,
        };

        AuthConfig {
            session_secret: secret,
            password_pepper,
            ..AuthConfig::default()
        }
    };

    // LMS configuration
    let mut lms_config = LmsConfig::default();
    if let Ok(team_email) = env::var("CONTACT_TEAM_EMAIL") {
        lms_config.contact_team_email = team_email;
    }

    // Mailer is optional; without it contact submissions are only logged
    let mailer = match (
        env::var("MAIL_API_URL"),
        env::var("MAIL_API_KEY"),
        env::var("MAIL_FROM"),
    ) {
        (Ok(api_url), Ok(api_key), Ok(from)) => Some(Arc::new(Mailer::new(MailerConfig {
            api_url,
            api_key,
            from,
        }))),
        _ => {
            tracing::warn!("Mailer not configured (MAIL_API_URL/MAIL_API_KEY/MAIL_FROM)");
            None
        }
    };

    let auth_store = PgAuthRepository::new(pool.clone());
    let lms_store = LmsStore::new(pool.clone());

    // Gate state shared by the session and admin middleware
    let gate_state = AdminGateState {
        repo: Arc::new(auth_store.clone()),
        config: Arc::new(auth_config.clone()),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // LMS data routes require a session; admin routes run the full gate
    let session_state = gate_state.clone();
    let session_gated = lms_router(lms_store.clone(), lms_config.clone()).route_layer(
        axum::middleware::from_fn(move |req: Request<Body>, next: Next| {
            let state = session_state.clone();
            async move { auth::middleware::require_session(state, req, next).await }
        }),
    );

    let admin_state = gate_state.clone();
    let admin_gated = lms_admin_router(lms_store.clone(), lms_config.clone()).route_layer(
        axum::middleware::from_fn(move |req: Request<Body>, next: Next| {
            let state = admin_state.clone();
            async move { auth::middleware::require_admin(state, req, next).await }
        }),
    );

    let lms_routes = lms::lms_contact_router(lms_store, lms_config, mailer)
        .merge(session_gated)
        .nest("/admin", admin_gated);

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(auth_store, auth_config))
        .nest("/api/lms", lms_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
