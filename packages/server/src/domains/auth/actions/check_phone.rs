//! Phone number existence probe

use crate::domains::auth::models::normalize_phone_number;
use crate::domains::auth::AuthError;
use crate::kernel::ServerDeps;

/// Whether an identity record exists for the given number. Normalizes first,
/// so lookups match the canonical stored form.
pub async fn phone_number_exists(
    deps: &ServerDeps,
    phone_number: &str,
) -> Result<bool, AuthError> {
    let phone = normalize_phone_number(phone_number)?;
    Ok(deps.users.exists_by_phone_number(&phone).await?)
}
