//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{auth, health, profile};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
    /// Development convenience only; issuance responses carry the one-time
    /// code when set. Never enable in production.
    pub echo_codes_enabled: bool,
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, deps: Arc<ServerDeps>, echo_codes_enabled: bool) -> Router {
    let state = AppState {
        db_pool: pool,
        deps,
        echo_codes_enabled,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/verify", post(auth::verify_registration))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/verify-login", post(auth::verify_login))
        .route("/api/auth/check-phone", get(auth::check_phone))
        .route(
            "/api/auth/initiate-phone-change",
            post(auth::initiate_phone_change),
        )
        .route(
            "/api/auth/confirm-phone-change",
            post(auth::confirm_phone_change),
        )
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
