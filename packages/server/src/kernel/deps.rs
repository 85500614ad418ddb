//! Server dependencies for domain actions (using traits for testability)
//!
//! This module provides the central dependency container handed to every
//! domain action. All external services sit behind trait abstractions.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;
use twilio::TwilioService;

use crate::domains::auth::JwtService;
use crate::kernel::{BaseSmsSender, BaseUserStore};

// =============================================================================
// TwilioService Adapter (implements BaseSmsSender trait)
// =============================================================================

/// Wrapper around TwilioService that implements the BaseSmsSender trait
pub struct TwilioSmsAdapter(pub Arc<TwilioService>);

impl TwilioSmsAdapter {
    pub fn new(service: Arc<TwilioService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseSmsSender for TwilioSmsAdapter {
    async fn send_sms(&self, to: &str, body: &str) -> Result<()> {
        self.0
            .send_sms(to, body)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies accessible to domain actions
#[derive(Clone)]
pub struct ServerDeps {
    pub users: Arc<dyn BaseUserStore>,
    pub sms: Arc<dyn BaseSmsSender>,
    /// JWT service for token creation
    pub jwt_service: Arc<JwtService>,
    /// How long an issued one-time code stays consumable.
    pub code_ttl: Duration,
}

impl ServerDeps {
    pub fn new(
        users: Arc<dyn BaseUserStore>,
        sms: Arc<dyn BaseSmsSender>,
        jwt_service: Arc<JwtService>,
        code_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sms,
            jwt_service,
            code_ttl,
        }
    }
}
