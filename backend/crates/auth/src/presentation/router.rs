use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use sqlx::PgPool;

use crate::application::config::AuthConfig;
use crate::domain::notifier::Notifier;
use crate::domain::repository::{
    AuditLogRepository, OtpRepository, RefreshTokenRepository, UserRepository,
};
use crate::domain::token::TokenCodec;
use crate::infra::notify::DevNotifier;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthState};

/// Auth routes over any repository and notifier implementation.
pub fn auth_router_generic<R, N>(repo: Arc<R>, notifier: Arc<N>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository
        + OtpRepository
        + RefreshTokenRepository
        + AuditLogRepository
        + Send
        + Sync
        + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let codec = Arc::new(TokenCodec::new(&config.token_secret));
    let state = Arc::new(AuthState {
        repo,
        notifier,
        codec,
        config,
    });

    Router::new()
        .route("/register", post(handlers::register::<R, N>))
        .route("/login", post(handlers::login::<R, N>))
        .route("/otp/request", post(handlers::request_otp::<R, N>))
        .route("/otp/verify", post(handlers::verify_otp::<R, N>))
        .route("/refresh", post(handlers::refresh::<R, N>))
        .route("/logout", post(handlers::logout::<R, N>))
        .route("/logout-all", post(handlers::logout_all::<R, N>))
        .route("/me", get(handlers::me::<R, N>))
        .route("/password/change", post(handlers::change_password::<R, N>))
        .route("/deactivate", post(handlers::deactivate_account::<R, N>))
        .with_state(state)
}

/// Production wiring: Postgres persistence, log-backed notifier.
pub fn auth_router(pool: PgPool, config: AuthConfig) -> Router {
    auth_router_generic(
        Arc::new(PgAuthRepository::new(pool)),
        Arc::new(DevNotifier),
        Arc::new(config),
    )
}
