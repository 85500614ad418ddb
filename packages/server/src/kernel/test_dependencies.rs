// TestDependencies - mock implementations for testing
//
// Provides an in-memory identity store and a capturing SMS sender that can
// be wired into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domains::auth::JwtService;
use crate::domains::user::models::User;
use crate::kernel::{BaseSmsSender, BaseUserStore, ServerDeps, StoreError};

// =============================================================================
// Mock SMS Sender
// =============================================================================

/// One captured outbound message
#[derive(Debug, Clone)]
pub struct SentSms {
    pub to: String,
    pub body: String,
}

pub struct MockSmsSender {
    sent: Arc<Mutex<Vec<SentSms>>>,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All messages captured so far
    pub fn sent_messages(&self) -> Vec<SentSms> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recently captured message
    pub fn last_message(&self) -> Option<SentSms> {
        self.sent.lock().unwrap().last().cloned()
    }

    /// Check if any message went to the given number
    pub fn was_sent_to(&self, to: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|m| m.to == to)
    }

    pub fn message_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Default for MockSmsSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSmsSender for MockSmsSender {
    async fn send_sms(&self, to: &str, body: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentSms {
            to: to.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// In-memory User Store
// =============================================================================

/// HashMap-backed store with the same CAS semantics as the Postgres store.
pub struct InMemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Direct record access for test assertions
    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseUserStore for InMemoryUserStore {
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.phone_number == phone_number)
            .cloned())
    }

    async fn exists_by_phone_number(&self, phone_number: &str) -> Result<bool, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.phone_number == phone_number))
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        let stored = users.get_mut(&user.id).ok_or(StoreError::StaleRecord)?;
        if stored.version != user.version {
            return Err(StoreError::StaleRecord);
        }
        let mut updated = user;
        updated.version += 1;
        *stored = updated.clone();
        Ok(updated)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Fully-wired ServerDeps over mocks, with handles kept for assertions.
pub struct TestDependencies {
    pub deps: ServerDeps,
    pub users: Arc<InMemoryUserStore>,
    pub sms: Arc<MockSmsSender>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::with_code_ttl(Duration::minutes(10))
    }

    pub fn with_code_ttl(code_ttl: Duration) -> Self {
        let users = Arc::new(InMemoryUserStore::new());
        let sms = Arc::new(MockSmsSender::new());
        let jwt_service = Arc::new(JwtService::new(
            "test_secret_key",
            "test_issuer".to_string(),
            Duration::hours(24),
        ));
        let deps = ServerDeps::new(users.clone(), sms.clone(), jwt_service, code_ttl);
        Self { deps, users, sms }
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
