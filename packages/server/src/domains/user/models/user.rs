use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::auth::models::VerificationCode;

/// Closed set of account roles.
///
/// Parsed from client input at the boundary; unknown values are rejected
/// before any state mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Gymzer,
    Coach,
    Gym,
    Admin,
}

impl Role {
    /// Case-insensitive: clients send "coach" and "COACH" interchangeably.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "GYMZER" => Some(Role::Gymzer),
            "COACH" => Some(Role::Coach),
            "GYM" => Some(Role::Gym),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Gymzer => "GYMZER",
            Role::Coach => "COACH",
            Role::Gym => "GYM",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity record - one row per phone number.
///
/// Holds the verification state machine: `verified` is monotonic (false to
/// true, never back), `verification_code` holds at most one outstanding
/// one-time code, and `pending_phone_number` is set only while a number
/// change awaits confirmation.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    /// Canonical phone number (normalized, unique).
    pub phone_number: String,
    pub role: Role,
    pub verified: bool,
    pub verification_code: Option<VerificationCode>,
    pub pending_phone_number: Option<String>,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    /// Optimistic-lock counter; the store bumps it on every successful
    /// update and rejects writes carrying a stale value.
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Fresh, unverified record for a previously-unseen phone number.
    pub fn new(phone_number: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone_number,
            role,
            verified: false,
            verification_code: None,
            pending_phone_number: None,
            first_name: None,
            email: None,
            bio: None,
            photo_url: None,
            version: 0,
            created_at: Utc::now(),
        }
    }
}

/// Public view of an identity record, safe to return to clients.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub phone_number: String,
    pub role: Role,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            phone_number: user.phone_number.clone(),
            role: user.role,
            first_name: user.first_name.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            photo_url: user.photo_url.clone(),
        }
    }
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
}
