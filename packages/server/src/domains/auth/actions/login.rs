//! Login code issuance

use tracing::{info, warn};

use crate::domains::auth::models::{normalize_phone_number, CodePurpose, VerificationCode};
use crate::domains::auth::AuthError;
use crate::kernel::ServerDeps;

/// Issue a login code for an existing, verified account.
///
/// Overwrites any outstanding code. The code is returned to the caller layer
/// (see [`super::register::send_registration_code`] on echoing); delivery
/// happens over SMS.
pub async fn send_login_code(deps: &ServerDeps, phone_number: &str) -> Result<String, AuthError> {
    let phone = normalize_phone_number(phone_number)?;
    let mut user = deps
        .users
        .find_by_phone_number(&phone)
        .await?
        .ok_or_else(|| {
            warn!("Login code requested for unknown number {}", phone);
            AuthError::NotFound
        })?;

    if !user.verified {
        warn!("Login code requested for unverified number {}", phone);
        return Err(AuthError::NotVerified);
    }

    let code = VerificationCode::generate(CodePurpose::Login);
    user.verification_code = Some(code.clone());
    deps.users.update(user).await?;

    deps.sms
        .send_sms(&phone, &format!("Your login code: {}", code.code))
        .await?;

    info!("Login code sent to {}", phone);
    Ok(code.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::actions::{consume_code, send_registration_code};
    use crate::kernel::test_dependencies::TestDependencies;

    async fn register_and_verify(test: &TestDependencies, phone: &str) {
        let code = send_registration_code(&test.deps, phone, "GYMZER")
            .await
            .unwrap();
        consume_code(&test.deps, phone, &code).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let test = TestDependencies::new();
        register_and_verify(&test, "+15550001234").await;

        let code = send_login_code(&test.deps, "+15550001234").await.unwrap();
        let token = consume_code(&test.deps, "+15550001234", &code)
            .await
            .unwrap();
        assert!(token.is_some());
    }

    #[tokio::test]
    async fn test_unknown_number_never_gets_a_code() {
        let test = TestDependencies::new();

        let result = send_login_code(&test.deps, "+15550001234").await;
        assert!(matches!(result, Err(AuthError::NotFound)));
        assert_eq!(test.sms.message_count(), 0);
    }

    #[tokio::test]
    async fn test_unverified_number_never_gets_a_code() {
        let test = TestDependencies::new();
        send_registration_code(&test.deps, "+15550001234", "GYMZER")
            .await
            .unwrap();

        let result = send_login_code(&test.deps, "+15550001234").await;
        assert!(matches!(result, Err(AuthError::NotVerified)));
        // Only the registration SMS went out
        assert_eq!(test.sms.message_count(), 1);
    }
}
