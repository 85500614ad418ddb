//! Registration code issuance

use tracing::{info, warn};

use crate::domains::auth::models::{normalize_phone_number, CodePurpose, VerificationCode};
use crate::domains::auth::AuthError;
use crate::domains::user::models::{Role, User};
use crate::kernel::ServerDeps;

/// Issue a registration code for a phone number.
///
/// Registration is a one-time action per number: an already-verified record
/// fails with `AlreadyVerified`. An unverified record is reused; the fresh
/// code overwrites any outstanding one and the requested role replaces the
/// stored one.
///
/// The code is returned so the caller layer can decide whether to echo it
/// (tests, dev). Production responses must not include it; delivery happens
/// over SMS.
pub async fn send_registration_code(
    deps: &ServerDeps,
    phone_number: &str,
    role: &str,
) -> Result<String, AuthError> {
    let phone = normalize_phone_number(phone_number)?;
    let role = Role::parse(role).ok_or_else(|| {
        warn!("Rejected registration with unknown role {:?}", role);
        AuthError::InvalidRole
    })?;

    let code = VerificationCode::generate(CodePurpose::Registration);

    match deps.users.find_by_phone_number(&phone).await? {
        Some(user) if user.verified => {
            warn!("Registration attempt for already-verified number {}", phone);
            return Err(AuthError::AlreadyVerified);
        }
        Some(mut user) => {
            user.role = role;
            user.verification_code = Some(code.clone());
            deps.users.update(user).await?;
        }
        None => {
            let mut user = User::new(phone.clone(), role);
            user.verification_code = Some(code.clone());
            deps.users.insert(user).await?;
        }
    }

    deps.sms
        .send_sms(&phone, &format!("Your verification code: {}", code.code))
        .await?;

    info!("Registration code sent to {} with role {}", phone, role);
    Ok(code.code)
}
