//! Profile endpoints.
//!
//! Identity is always re-derived from the bearer token's phone-number claim,
//! never taken from the request body.

use axum::{
    extract::Extension,
    http::{header::AUTHORIZATION, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};

use crate::domains::auth::AuthError;
use crate::domains::user::{self, models::ProfileUpdate};
use crate::server::app::AppState;

/// Extract the bearer token from the Authorization header (handles both
/// "Bearer <token>" and a raw token).
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    Some(value.strip_prefix("Bearer ").unwrap_or(value))
}

fn authenticated_phone(state: &AppState, headers: &HeaderMap) -> Result<String, AuthError> {
    let token = bearer_token(headers).ok_or(AuthError::InvalidToken)?;
    state.deps.jwt_service.extract_phone_number(token)
}

/// GET /api/profile
pub async fn get_profile(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Response, AuthError> {
    let phone = authenticated_phone(&state, &headers)?;
    let profile = user::actions::get_profile(&state.deps, &phone).await?;
    Ok(Json(profile).into_response())
}

/// PUT /api/profile
pub async fn update_profile(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Json(changes): Json<ProfileUpdate>,
) -> Result<Response, AuthError> {
    let phone = authenticated_phone(&state, &headers)?;
    let profile = user::actions::update_profile(&state.deps, &phone, changes).await?;
    Ok(Json(profile).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_with_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_without_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
    }
}
