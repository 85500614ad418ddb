// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;
use server_core::{server::build_app, Config};
use server_core::domains::auth::JwtService;
use server_core::kernel::{PgUserStore, ServerDeps, TwilioSmsAdapter};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twilio::{TwilioOptions, TwilioService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Coaching Marketplace API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Production safety check - one-time codes must never be echoed outside development
    if config.echo_codes_enabled && !cfg!(debug_assertions) {
        tracing::error!("SECURITY WARNING: ECHO_CODES_ENABLED is true in production build!");
    }

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Wire dependencies
    let twilio = Arc::new(TwilioService::new(TwilioOptions {
        account_sid: config.twilio_account_sid.clone(),
        auth_token: config.twilio_auth_token.clone(),
        from_number: config.twilio_from_number.clone(),
    }));
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
        Duration::hours(config.jwt_validity_hours),
    ));
    let deps = Arc::new(ServerDeps::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(TwilioSmsAdapter::new(twilio)),
        jwt_service,
        Duration::minutes(config.code_ttl_minutes),
    ));

    // Build application
    let app = build_app(pool, deps, config.echo_codes_enabled);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
