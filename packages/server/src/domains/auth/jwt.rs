use anyhow::Result;
use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::auth::AuthError;
use crate::domains::user::models::{Role, User};

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,          // Subject (user id as string)
    pub user_id: Uuid,        // Internal identity id
    pub phone_number: String, // Canonical phone number
    pub role: Role,           // Account role
    pub exp: i64,             // Expiration timestamp
    pub iat: i64,             // Issued at timestamp
    pub iss: String,          // Issuer
}

/// JWT Service - creates and verifies JWT tokens
///
/// Tokens are stateless: validity is established by signature and expiry
/// alone, nothing is persisted.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    validity: Duration,
}

impl JwtService {
    /// Create new JWT service with symmetric secret, issuer and token lifetime
    pub fn new(secret: &str, issuer: String, validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            validity,
        }
    }

    /// Mint a token bound to a verified identity (HS256).
    pub fn create_token(&self, user: &User) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + self.validity;

        let claims = Claims {
            sub: user.id.to_string(),
            user_id: user.id,
            phone_number: user.phone_number.clone(),
            role: user.role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a JWT token
    ///
    /// Returns claims if token is valid and not expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }

    /// Soft validity check: any structural, signature or expiry failure is
    /// just `false`.
    pub fn validate_token(&self, token: &str) -> bool {
        self.verify_token(token).is_ok()
    }

    /// Extract the phone-number claim, failing hard on any invalid token.
    pub fn extract_phone_number(&self, token: &str) -> Result<String, AuthError> {
        self.verify_token(token)
            .map(|claims| claims.phone_number)
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::new("test_secret_key", "test_issuer".to_string(), Duration::hours(24))
    }

    fn test_user() -> User {
        User::new("+15550001234".to_string(), Role::Coach)
    }

    #[test]
    fn test_create_and_verify_token() {
        let service = test_service();
        let user = test_user();

        let token = service.create_token(&user).unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.phone_number, "+15550001234");
        assert_eq!(claims.role, Role::Coach);
        assert_eq!(claims.iss, "test_issuer");
    }

    #[test]
    fn test_invalid_token() {
        let service = test_service();
        assert!(service.verify_token("invalid_token").is_err());
        assert!(!service.validate_token("invalid_token"));
    }

    #[test]
    fn test_wrong_secret() {
        let service1 =
            JwtService::new("secret1", "test_issuer".to_string(), Duration::hours(24));
        let service2 =
            JwtService::new("secret2", "test_issuer".to_string(), Duration::hours(24));

        let token = service1.create_token(&test_user()).unwrap();

        // Token created with secret1 should not verify with secret2
        assert!(service2.verify_token(&token).is_err());
        assert!(!service2.validate_token(&token));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let minter =
            JwtService::new("test_secret_key", "other_issuer".to_string(), Duration::hours(24));
        let verifier = test_service();

        let token = minter.create_token(&test_user()).unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_extract_phone_number() {
        let service = test_service();
        let token = service.create_token(&test_user()).unwrap();

        assert_eq!(
            service.extract_phone_number(&token).unwrap(),
            "+15550001234"
        );
    }

    #[test]
    fn test_extract_phone_number_expired_token() {
        // Negative validity mints an already-expired token; the decode leeway
        // is 60 seconds so go well past it.
        let service =
            JwtService::new("test_secret_key", "test_issuer".to_string(), Duration::minutes(-5));
        let token = service.create_token(&test_user()).unwrap();

        assert!(!service.validate_token(&token));
        assert!(matches!(
            service.extract_phone_number(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expiry_window_matches_validity() {
        let service = test_service();
        let token = service.create_token(&test_user()).unwrap();

        let claims = service.verify_token(&token).unwrap();

        let now = chrono::Utc::now().timestamp();
        let expires_in = claims.exp - now;
        assert!(expires_in > 23 * 3600);
        assert!(expires_in <= 24 * 3600);
    }
}
