//! Profile read/update actions.
//!
//! Callers pass the phone number extracted from the bearer token, never a
//! client-supplied identifier.

use tracing::{info, warn};

use crate::domains::auth::models::normalize_phone_number;
use crate::domains::auth::AuthError;
use crate::domains::user::models::{ProfileUpdate, UserProfile};
use crate::kernel::ServerDeps;

/// Fetch the public profile for a phone number.
pub async fn get_profile(deps: &ServerDeps, phone_number: &str) -> Result<UserProfile, AuthError> {
    let phone = normalize_phone_number(phone_number)?;
    let user = deps
        .users
        .find_by_phone_number(&phone)
        .await?
        .ok_or(AuthError::NotFound)?;
    Ok(UserProfile::from(&user))
}

/// Apply a partial profile update. Only verified accounts may mutate their
/// profile.
pub async fn update_profile(
    deps: &ServerDeps,
    phone_number: &str,
    changes: ProfileUpdate,
) -> Result<UserProfile, AuthError> {
    let phone = normalize_phone_number(phone_number)?;
    let mut user = deps
        .users
        .find_by_phone_number(&phone)
        .await?
        .ok_or(AuthError::NotFound)?;

    if !user.verified {
        warn!("Rejected profile update for unverified account {}", phone);
        return Err(AuthError::NotVerified);
    }

    if let Some(first_name) = changes.first_name {
        user.first_name = Some(first_name);
    }
    if let Some(email) = changes.email {
        user.email = Some(email);
    }
    if let Some(bio) = changes.bio {
        user.bio = Some(bio);
    }
    if let Some(photo_url) = changes.photo_url {
        user.photo_url = Some(photo_url);
    }

    let user = deps.users.update(user).await?;
    info!("Profile updated for {}", user.phone_number);
    Ok(UserProfile::from(&user))
}
