use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Token lifetime in hours.
    pub jwt_validity_hours: i64,
    /// How long an issued one-time code stays consumable, in minutes.
    pub code_ttl_minutes: i64,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_from_number: String,
    /// Development convenience: echo one-time codes back in HTTP responses.
    /// Must stay off in production; codes are delivered over SMS only.
    pub echo_codes_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "coaching-marketplace".to_string()),
            jwt_validity_hours: env::var("JWT_VALIDITY_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .context("JWT_VALIDITY_HOURS must be a valid number")?,
            code_ttl_minutes: env::var("CODE_TTL_MINUTES")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("CODE_TTL_MINUTES must be a valid number")?,
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID")
                .context("TWILIO_ACCOUNT_SID must be set")?,
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN")
                .context("TWILIO_AUTH_TOKEN must be set")?,
            twilio_from_number: env::var("TWILIO_FROM_NUMBER")
                .context("TWILIO_FROM_NUMBER must be set")?,
            echo_codes_enabled: env::var("ECHO_CODES_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}
