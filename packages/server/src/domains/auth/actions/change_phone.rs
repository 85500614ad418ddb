//! Phone number change - a two-step flow proving ownership of the NEW line.

use tracing::{info, warn};

use crate::domains::auth::models::{normalize_phone_number, CodePurpose, VerificationCode};
use crate::domains::auth::AuthError;
use crate::domains::user::models::User;
use crate::kernel::ServerDeps;

/// Open a phone-number change: store the normalized new number as pending
/// and dispatch a fresh code to it.
///
/// The code goes to the NEW number - the point is to prove the caller owns
/// the new line, not the old one.
pub async fn initiate_phone_change(
    deps: &ServerDeps,
    current_phone_number: &str,
    new_phone_number: &str,
) -> Result<String, AuthError> {
    let current = normalize_phone_number(current_phone_number)?;
    let new = normalize_phone_number(new_phone_number)?;

    let mut user = deps
        .users
        .find_by_phone_number(&current)
        .await?
        .ok_or(AuthError::NotFound)?;

    if new != user.phone_number && deps.users.exists_by_phone_number(&new).await? {
        warn!("Phone change to {} rejected: number in use", new);
        return Err(AuthError::PhoneNumberInUse);
    }

    let code = VerificationCode::generate(CodePurpose::PhoneChange);
    user.pending_phone_number = Some(new.clone());
    user.verification_code = Some(code.clone());
    deps.users.update(user).await?;

    deps.sms
        .send_sms(&new, &format!("Your phone change code: {}", code.code))
        .await?;

    info!("Phone change initiated: {} -> {}", current, new);
    Ok(code.code)
}

/// Close a phone-number change: on a correct code the pending number becomes
/// canonical and both the pending field and the code are cleared.
///
/// Unlike login/registration consumption, a wrong code here is a hard
/// `InvalidCode` error (kept from the source behavior). A code issued for
/// registration or login is treated exactly like a wrong code.
pub async fn confirm_phone_change(
    deps: &ServerDeps,
    current_phone_number: &str,
    submitted_code: &str,
) -> Result<User, AuthError> {
    let current = normalize_phone_number(current_phone_number)?;

    let mut user = deps
        .users
        .find_by_phone_number(&current)
        .await?
        .ok_or(AuthError::NotFound)?;

    let Some(new_phone) = user.pending_phone_number.clone() else {
        warn!("Phone change confirmation for {} with none in progress", current);
        return Err(AuthError::NoChangeInProgress);
    };

    let accepted = user
        .verification_code
        .as_ref()
        .map(|code| {
            code.purpose == CodePurpose::PhoneChange && code.accepts(submitted_code, deps.code_ttl)
        })
        .unwrap_or(false);
    if !accepted {
        warn!("Incorrect or expired phone-change code for {}", current);
        return Err(AuthError::InvalidCode);
    }

    // The new number may have been registered between initiate and confirm;
    // re-check so the collision surfaces as a conflict, not a constraint
    // violation out of the store.
    if new_phone != user.phone_number && deps.users.exists_by_phone_number(&new_phone).await? {
        warn!("Phone change to {} rejected at confirmation: number in use", new_phone);
        return Err(AuthError::PhoneNumberInUse);
    }

    user.phone_number = new_phone;
    user.pending_phone_number = None;
    user.verification_code = None;
    let user = deps.users.update(user).await?;

    info!("Phone number changed: {} -> {}", current, user.phone_number);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::actions::{consume_code, send_login_code, send_registration_code};
    use crate::kernel::test_dependencies::TestDependencies;
    use crate::kernel::BaseUserStore;

    async fn register_and_verify(test: &TestDependencies, phone: &str) {
        let code = send_registration_code(&test.deps, phone, "COACH")
            .await
            .unwrap();
        consume_code(&test.deps, phone, &code).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_full_change_flow_swaps_canonical_number() {
        let test = TestDependencies::new();
        register_and_verify(&test, "+15550001234").await;

        let code = initiate_phone_change(&test.deps, "+15550001234", "+15550005678")
            .await
            .unwrap();

        // Code goes to the new number, not the old one
        let last = test.sms.last_message().unwrap();
        assert_eq!(last.to, "+15550005678");

        let user = confirm_phone_change(&test.deps, "+15550001234", &code)
            .await
            .unwrap();
        assert_eq!(user.phone_number, "+15550005678");
        assert!(user.pending_phone_number.is_none());
        assert!(user.verification_code.is_none());

        // Old number is gone, new number resolves
        assert!(test
            .users
            .find_by_phone_number("+15550001234")
            .await
            .unwrap()
            .is_none());
        assert!(test
            .users
            .exists_by_phone_number("+15550005678")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_initiate_rejects_number_in_use() {
        let test = TestDependencies::new();
        register_and_verify(&test, "+15550001234").await;
        register_and_verify(&test, "+15550005678").await;

        let result = initiate_phone_change(&test.deps, "+15550001234", "+15550005678").await;
        assert!(matches!(result, Err(AuthError::PhoneNumberInUse)));
    }

    #[tokio::test]
    async fn test_initiate_unknown_current_number() {
        let test = TestDependencies::new();
        let result = initiate_phone_change(&test.deps, "+15550001234", "+15550005678").await;
        assert!(matches!(result, Err(AuthError::NotFound)));
    }

    #[tokio::test]
    async fn test_confirm_without_pending_change() {
        let test = TestDependencies::new();
        register_and_verify(&test, "+15550001234").await;

        let result = confirm_phone_change(&test.deps, "+15550001234", "123456").await;
        assert!(matches!(result, Err(AuthError::NoChangeInProgress)));
    }

    #[tokio::test]
    async fn test_login_code_does_not_confirm_change() {
        let test = TestDependencies::new();
        register_and_verify(&test, "+15550001234").await;

        initiate_phone_change(&test.deps, "+15550001234", "+15550005678")
            .await
            .unwrap();
        // A later login request overwrites the outstanding code
        let login_code = send_login_code(&test.deps, "+15550001234").await.unwrap();

        let result = confirm_phone_change(&test.deps, "+15550001234", &login_code).await;
        assert!(matches!(result, Err(AuthError::InvalidCode)));

        // The old number stays canonical
        let user = test
            .users
            .find_by_phone_number("+15550001234")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.phone_number, "+15550001234");
    }

    #[tokio::test]
    async fn test_confirm_rejects_number_claimed_after_initiate() {
        let test = TestDependencies::new();
        register_and_verify(&test, "+15550001234").await;

        let code = initiate_phone_change(&test.deps, "+15550001234", "+15550005678")
            .await
            .unwrap();
        // Someone else registers the target number in the meantime
        register_and_verify(&test, "+15550005678").await;

        let result = confirm_phone_change(&test.deps, "+15550001234", &code).await;
        assert!(matches!(result, Err(AuthError::PhoneNumberInUse)));
    }

    #[tokio::test]
    async fn test_confirm_wrong_code_is_hard_error() {
        let test = TestDependencies::new();
        register_and_verify(&test, "+15550001234").await;

        let code = initiate_phone_change(&test.deps, "+15550001234", "+15550005678")
            .await
            .unwrap();
        let wrong = if code == "999999" { "999998" } else { "999999" };

        let result = confirm_phone_change(&test.deps, "+15550001234", wrong).await;
        assert!(matches!(result, Err(AuthError::InvalidCode)));

        // Pending state survives a failed confirmation
        let user = test
            .users
            .find_by_phone_number("+15550001234")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            user.pending_phone_number.as_deref(),
            Some("+15550005678")
        );
    }
}
