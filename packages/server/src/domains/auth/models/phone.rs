use lazy_static::lazy_static;
use regex::Regex;

use crate::domains::auth::AuthError;

lazy_static! {
    // Country code (1-3 digits) followed by a 4-14 digit subscriber number,
    // optionally prefixed with '+'.
    static ref PHONE_SHAPE: Regex =
        Regex::new(r"^\+?\d{1,3}\d{4,14}$").expect("phone regex must compile");
}

/// Normalize a raw phone number to its canonical form.
///
/// Strips everything except digits and '+', then checks the result against
/// a minimal length/shape rule. All engine operations key off the canonical
/// form; raw client input never reaches storage.
pub fn normalize_phone_number(raw: &str) -> Result<String, AuthError> {
    if raw.trim().is_empty() {
        return Err(AuthError::InvalidPhoneNumber);
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    if !PHONE_SHAPE.is_match(&cleaned) {
        return Err(AuthError::InvalidPhoneNumber);
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_formatting_characters() {
        assert_eq!(
            normalize_phone_number("+1 (555) 000-1234").unwrap(),
            "+15550001234"
        );
        assert_eq!(normalize_phone_number("06 12 34 56 78").unwrap(), "0612345678");
    }

    #[test]
    fn test_plain_number_passes_through() {
        assert_eq!(
            normalize_phone_number("+15550001234").unwrap(),
            "+15550001234"
        );
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        assert!(matches!(
            normalize_phone_number(""),
            Err(AuthError::InvalidPhoneNumber)
        ));
        assert!(matches!(
            normalize_phone_number("   "),
            Err(AuthError::InvalidPhoneNumber)
        ));
    }

    #[test]
    fn test_rejects_letters_only() {
        assert!(matches!(
            normalize_phone_number("not-a-number"),
            Err(AuthError::InvalidPhoneNumber)
        ));
    }

    #[test]
    fn test_rejects_too_short_and_too_long() {
        assert!(normalize_phone_number("+123").is_err());
        assert!(normalize_phone_number("+123456789012345678901").is_err());
    }

    #[test]
    fn test_rejects_misplaced_plus() {
        assert!(normalize_phone_number("15550+001234").is_err());
    }
}
