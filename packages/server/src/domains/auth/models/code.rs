use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// What an outstanding code was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePurpose {
    Registration,
    Login,
    PhoneChange,
}

impl CodePurpose {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "registration" => Some(CodePurpose::Registration),
            "login" => Some(CodePurpose::Login),
            "phone_change" => Some(CodePurpose::PhoneChange),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Registration => "registration",
            CodePurpose::Login => "login",
            CodePurpose::PhoneChange => "phone_change",
        }
    }
}

/// One-time code with issuance metadata.
///
/// An identity record holds at most one of these; issuing a new code
/// overwrites any prior unconsumed one. Codes expire after a configured
/// TTL, checked at consumption time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode {
    pub code: String,
    pub issued_at: DateTime<Utc>,
    pub purpose: CodePurpose,
}

impl VerificationCode {
    /// Generate a fresh six-digit numeric code.
    pub fn generate(purpose: CodePurpose) -> Self {
        let code = rand::thread_rng().gen_range(100_000..=999_999);
        Self {
            code: code.to_string(),
            issued_at: Utc::now(),
            purpose,
        }
    }

    pub fn matches(&self, submitted: &str) -> bool {
        self.code == submitted
    }

    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.issued_at > ttl
    }

    /// Exact match AND still within its TTL. Purpose is checked separately
    /// by each flow: a code is only consumable for what it was issued for.
    pub fn accepts(&self, submitted: &str, ttl: Duration) -> bool {
        self.matches(submitted) && !self.is_expired(ttl, Utc::now())
    }

    /// Whether this code can establish a verified session. Registration and
    /// login codes share one consumption path; a phone-change code must
    /// never mint a token through it.
    pub fn grants_session(&self) -> bool {
        matches!(
            self.purpose,
            CodePurpose::Registration | CodePurpose::Login
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_is_six_digits() {
        for _ in 0..50 {
            let code = VerificationCode::generate(CodePurpose::Registration);
            assert_eq!(code.code.len(), 6);
            assert!(code.code.chars().all(|c| c.is_ascii_digit()));
            // Never starts with zero, so string comparisons are unambiguous
            assert_ne!(code.code.as_bytes()[0], b'0');
        }
    }

    #[test]
    fn test_matches_is_exact() {
        let code = VerificationCode {
            code: "123456".to_string(),
            issued_at: Utc::now(),
            purpose: CodePurpose::Login,
        };
        assert!(code.matches("123456"));
        assert!(!code.matches("123457"));
        assert!(!code.matches("12345"));
        assert!(!code.matches(""));
    }

    #[test]
    fn test_expiry_checked_against_ttl() {
        let now = Utc::now();
        let code = VerificationCode {
            code: "123456".to_string(),
            issued_at: now - Duration::minutes(11),
            purpose: CodePurpose::Registration,
        };
        assert!(code.is_expired(Duration::minutes(10), now));
        assert!(!code.is_expired(Duration::minutes(15), now));
    }

    #[test]
    fn test_accepts_rejects_expired_code_even_on_match() {
        let code = VerificationCode {
            code: "123456".to_string(),
            issued_at: Utc::now() - Duration::minutes(30),
            purpose: CodePurpose::Login,
        };
        assert!(!code.accepts("123456", Duration::minutes(10)));
        assert!(code.accepts("123456", Duration::hours(1)));
    }

    #[test]
    fn test_only_registration_and_login_codes_grant_sessions() {
        assert!(VerificationCode::generate(CodePurpose::Registration).grants_session());
        assert!(VerificationCode::generate(CodePurpose::Login).grants_session());
        assert!(!VerificationCode::generate(CodePurpose::PhoneChange).grants_session());
    }

    #[test]
    fn test_purpose_round_trips_through_str() {
        for purpose in [
            CodePurpose::Registration,
            CodePurpose::Login,
            CodePurpose::PhoneChange,
        ] {
            assert_eq!(CodePurpose::parse(purpose.as_str()), Some(purpose));
        }
        assert_eq!(CodePurpose::parse("unknown"), None);
    }
}
