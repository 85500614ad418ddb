//! Postgres-backed identity store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domains::auth::models::{CodePurpose, VerificationCode};
use crate::domains::user::models::{Role, User};
use crate::kernel::{BaseUserStore, StoreError};

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Flat row shape; role and code columns are re-assembled into their domain
/// types in `TryFrom`.
#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    phone_number: String,
    role: String,
    verified: bool,
    verification_code: Option<String>,
    code_issued_at: Option<DateTime<Utc>>,
    code_purpose: Option<String>,
    pending_phone_number: Option<String>,
    first_name: Option<String>,
    email: Option<String>,
    bio: Option<String>,
    photo_url: Option<String>,
    version: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role).ok_or_else(|| {
            StoreError::Corrupt(format!("invalid role {:?} for user {}", row.role, row.id))
        })?;

        // A code is only present when all three columns are set together.
        let verification_code = match (row.verification_code, row.code_issued_at, row.code_purpose)
        {
            (Some(code), Some(issued_at), Some(purpose)) => {
                let purpose = CodePurpose::parse(&purpose).ok_or_else(|| {
                    StoreError::Corrupt(format!(
                        "invalid code purpose {:?} for user {}",
                        purpose, row.id
                    ))
                })?;
                Some(VerificationCode {
                    code,
                    issued_at,
                    purpose,
                })
            }
            (None, None, None) => None,
            _ => {
                return Err(StoreError::Corrupt(format!(
                    "partial verification code columns for user {}",
                    row.id
                )))
            }
        };

        Ok(User {
            id: row.id,
            phone_number: row.phone_number,
            role,
            verified: row.verified,
            verification_code,
            pending_phone_number: row.pending_phone_number,
            first_name: row.first_name,
            email: row.email,
            bio: row.bio,
            photo_url: row.photo_url,
            version: row.version,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl BaseUserStore for PgUserStore {
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE phone_number = $1")
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn exists_by_phone_number(&self, phone_number: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE phone_number = $1)",
        )
        .bind(phone_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let (code, code_issued_at, code_purpose) = code_columns(&user);
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (
                id, phone_number, role, verified,
                verification_code, code_issued_at, code_purpose,
                pending_phone_number, first_name, email, bio, photo_url,
                version, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.phone_number)
        .bind(user.role.as_str())
        .bind(user.verified)
        .bind(code)
        .bind(code_issued_at)
        .bind(code_purpose)
        .bind(&user.pending_phone_number)
        .bind(&user.first_name)
        .bind(&user.email)
        .bind(&user.bio)
        .bind(&user.photo_url)
        .bind(user.version)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await?;
        User::try_from(row)
    }

    async fn update(&self, user: User) -> Result<User, StoreError> {
        let (code, code_issued_at, code_purpose) = code_columns(&user);
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users SET
                phone_number = $2,
                role = $3,
                verified = $4,
                verification_code = $5,
                code_issued_at = $6,
                code_purpose = $7,
                pending_phone_number = $8,
                first_name = $9,
                email = $10,
                bio = $11,
                photo_url = $12,
                version = version + 1
            WHERE id = $1 AND version = $13
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.phone_number)
        .bind(user.role.as_str())
        .bind(user.verified)
        .bind(code)
        .bind(code_issued_at)
        .bind(code_purpose)
        .bind(&user.pending_phone_number)
        .bind(&user.first_name)
        .bind(&user.email)
        .bind(&user.bio)
        .bind(&user.photo_url)
        .bind(user.version)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => User::try_from(row),
            None => Err(StoreError::StaleRecord),
        }
    }
}

fn code_columns(user: &User) -> (Option<&str>, Option<DateTime<Utc>>, Option<&str>) {
    match &user.verification_code {
        Some(code) => (
            Some(code.code.as_str()),
            Some(code.issued_at),
            Some(code.purpose.as_str()),
        ),
        None => (None, None, None),
    }
}
