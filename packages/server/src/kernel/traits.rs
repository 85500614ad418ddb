// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The verification
// engine talks to storage and SMS delivery exclusively through them, so tests
// run against the in-memory/mock implementations in `test_dependencies`.
//
// Naming convention: Base* for trait names (e.g., BaseSmsSender)

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::domains::user::models::User;

// =============================================================================
// Store errors
// =============================================================================

#[derive(Error, Debug)]
pub enum StoreError {
    /// The record was updated by another writer since it was loaded;
    /// the caller should re-read and retry.
    #[error("record was modified concurrently")]
    StaleRecord,

    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

// =============================================================================
// SMS Sender Trait (Infrastructure - out-of-band code delivery)
// =============================================================================

/// At-least-once, best-effort SMS delivery. No delivery confirmation is
/// consumed by the verification engine, and the engine never retries.
#[async_trait]
pub trait BaseSmsSender: Send + Sync {
    async fn send_sms(&self, to: &str, body: &str) -> Result<()>;
}

// =============================================================================
// User Store Trait (Infrastructure - identity record persistence)
// =============================================================================

#[async_trait]
pub trait BaseUserStore: Send + Sync {
    async fn find_by_phone_number(&self, phone_number: &str)
        -> Result<Option<User>, StoreError>;

    async fn exists_by_phone_number(&self, phone_number: &str) -> Result<bool, StoreError>;

    async fn insert(&self, user: User) -> Result<User, StoreError>;

    /// Compare-and-swap on the record's `version` counter: the write only
    /// lands if the stored version still matches `user.version`, and the
    /// returned record carries the bumped version. Fails with
    /// [`StoreError::StaleRecord`] otherwise.
    async fn update(&self, user: User) -> Result<User, StoreError>;
}
