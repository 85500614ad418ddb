use thiserror::Error;

use crate::kernel::StoreError;

/// Errors surfaced by the verification engine and token issuer.
///
/// Wrong-code submissions on the registration/login path are deliberately
/// NOT here: they come back as a soft `None` so callers present a generic
/// "incorrect code" message. The phone-change confirm path keeps the hard
/// `InvalidCode` error the source behavior had.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid role")]
    InvalidRole,

    #[error("Invalid phone number")]
    InvalidPhoneNumber,

    #[error("Phone number is already verified")]
    AlreadyVerified,

    #[error("Account not found")]
    NotFound,

    #[error("Account not verified")]
    NotVerified,

    #[error("Phone number is already in use")]
    PhoneNumberInUse,

    #[error("No phone number change in progress")]
    NoChangeInProgress,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Record was modified concurrently")]
    ConcurrentUpdate,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::StaleRecord => AuthError::ConcurrentUpdate,
            StoreError::Database(e) => AuthError::DatabaseError(e),
            StoreError::Corrupt(msg) => AuthError::InternalError(anyhow::anyhow!(msg)),
        }
    }
}
