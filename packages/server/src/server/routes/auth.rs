//! Authentication endpoints.
//!
//! Every handler normalizes nothing and decides nothing: validation and
//! state transitions live in `domains::auth::actions`.

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domains::auth::{actions, AuthError};
use crate::domains::user::{self, models::UserProfile};
use crate::server::app::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub phone_number: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub phone_number: String,
}

#[derive(Deserialize)]
pub struct VerificationRequest {
    pub phone_number: String,
    pub verification_code: String,
}

#[derive(Deserialize)]
pub struct PhoneChangeRequest {
    pub current_phone_number: String,
    pub new_phone_number: String,
}

#[derive(Deserialize)]
pub struct PhoneChangeConfirmRequest {
    pub current_phone_number: String,
    pub verification_code: String,
}

#[derive(Deserialize)]
pub struct CheckPhoneParams {
    pub phone_number: String,
}

#[derive(Serialize)]
pub struct CodeIssuedResponse {
    pub status: &'static str,
    /// Present only with `echo_codes_enabled` (development).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// A code was issued and dispatched over SMS; echo it only in development.
fn code_issued(state: &AppState, code: String) -> Response {
    let code = state.echo_codes_enabled.then_some(code);
    Json(CodeIssuedResponse {
        status: "sent",
        code,
    })
    .into_response()
}

/// Generic 400 for a wrong/expired code on the soft consumption path.
fn incorrect_code() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Incorrect code" })),
    )
        .into_response()
}

/// POST /api/auth/register
pub async fn register(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Response, AuthError> {
    let code =
        actions::send_registration_code(&state.deps, &payload.phone_number, &payload.role).await?;
    Ok(code_issued(&state, code))
}

/// POST /api/auth/verify
pub async fn verify_registration(
    Extension(state): Extension<AppState>,
    Json(payload): Json<VerificationRequest>,
) -> Result<Response, AuthError> {
    match actions::consume_code(&state.deps, &payload.phone_number, &payload.verification_code)
        .await?
    {
        Some(token) => Ok(Json(json!({ "token": token })).into_response()),
        None => Ok(incorrect_code()),
    }
}

/// POST /api/auth/login
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AuthError> {
    let code = actions::send_login_code(&state.deps, &payload.phone_number).await?;
    Ok(code_issued(&state, code))
}

/// POST /api/auth/verify-login
///
/// Same consumption mechanism as `verify_registration`; the response also
/// carries the public profile so clients skip a follow-up fetch.
pub async fn verify_login(
    Extension(state): Extension<AppState>,
    Json(payload): Json<VerificationRequest>,
) -> Result<Response, AuthError> {
    match actions::consume_code(&state.deps, &payload.phone_number, &payload.verification_code)
        .await?
    {
        Some(token) => {
            let profile =
                user::actions::get_profile(&state.deps, &payload.phone_number).await?;
            Ok(Json(json!({ "token": token, "profile": profile })).into_response())
        }
        None => Ok(incorrect_code()),
    }
}

/// GET /api/auth/check-phone?phone_number=...
pub async fn check_phone(
    Extension(state): Extension<AppState>,
    Query(params): Query<CheckPhoneParams>,
) -> Result<Response, AuthError> {
    let exists = actions::phone_number_exists(&state.deps, &params.phone_number).await?;
    Ok(Json(json!({ "exists": exists })).into_response())
}

/// POST /api/auth/initiate-phone-change
pub async fn initiate_phone_change(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PhoneChangeRequest>,
) -> Result<Response, AuthError> {
    let code = actions::initiate_phone_change(
        &state.deps,
        &payload.current_phone_number,
        &payload.new_phone_number,
    )
    .await?;
    Ok(code_issued(&state, code))
}

/// POST /api/auth/confirm-phone-change
///
/// A fresh token is minted against the new canonical number; the old one
/// keeps working only until its own expiry.
pub async fn confirm_phone_change(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PhoneChangeConfirmRequest>,
) -> Result<Response, AuthError> {
    let updated = actions::confirm_phone_change(
        &state.deps,
        &payload.current_phone_number,
        &payload.verification_code,
    )
    .await?;

    let token = state.deps.jwt_service.create_token(&updated)?;
    let profile = UserProfile::from(&updated);
    Ok(Json(json!({ "token": token, "profile": profile })).into_response())
}
