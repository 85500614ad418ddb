//! Code consumption - shared by the registration and login verify endpoints.

use tracing::{info, warn};

use crate::domains::auth::models::normalize_phone_number;
use crate::domains::auth::AuthError;
use crate::kernel::ServerDeps;

/// Consume the outstanding one-time code for a phone number.
///
/// Returns `Ok(Some(token))` on success: the record is marked verified
/// (idempotent if it already was), the code is cleared, and a fresh JWT is
/// minted.
///
/// A wrong, missing or expired code returns `Ok(None)` - a soft result, not
/// an error, so callers surface a generic "incorrect code" message without
/// revealing which part of the input was wrong. A code issued for a phone
/// change behaves the same way: only registration and login codes grant a
/// session. Only an unknown phone number is a hard `NotFound`.
pub async fn consume_code(
    deps: &ServerDeps,
    phone_number: &str,
    submitted_code: &str,
) -> Result<Option<String>, AuthError> {
    let phone = normalize_phone_number(phone_number)?;
    let mut user = deps
        .users
        .find_by_phone_number(&phone)
        .await?
        .ok_or_else(|| {
            warn!("Code consumption for unknown number {}", phone);
            AuthError::NotFound
        })?;

    let accepted = user
        .verification_code
        .as_ref()
        .map(|code| code.grants_session() && code.accepts(submitted_code, deps.code_ttl))
        .unwrap_or(false);

    if !accepted {
        warn!("Incorrect or expired code for {}", phone);
        return Ok(None);
    }

    user.verified = true;
    user.verification_code = None;
    let user = deps.users.update(user).await?;

    let token = deps.jwt_service.create_token(&user)?;
    info!("Number {} verified", phone);
    Ok(Some(token))
}
