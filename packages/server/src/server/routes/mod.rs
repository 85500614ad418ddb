pub mod auth;
pub mod health;
pub mod profile;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;

use crate::domains::auth::AuthError;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::InvalidRole | AuthError::InvalidPhoneNumber | AuthError::InvalidCode => {
                StatusCode::BAD_REQUEST
            }
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::AlreadyVerified
            | AuthError::NotVerified
            | AuthError::PhoneNumberInUse
            | AuthError::NoChangeInProgress
            | AuthError::ConcurrentUpdate => StatusCode::CONFLICT,
            AuthError::DatabaseError(_) | AuthError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Internal failures get logged and masked; everything else is a
        // client-correctable condition and keeps its message.
        let message = match &self {
            AuthError::DatabaseError(err) => {
                tracing::error!("Database error: {}", err);
                "Internal server error".to_string()
            }
            AuthError::InternalError(err) => {
                tracing::error!("Internal error: {}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
