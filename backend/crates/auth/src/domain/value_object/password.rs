use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },
    #[error("Password must contain at least one digit")]
    MissingDigit,
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,
}

/// A plaintext password that has passed the registration policy.
///
/// Exists only between request parsing and hashing. Debug output is
/// redacted so the cleartext never reaches a log line.
#[derive(Clone)]
pub struct RawPassword(String);

impl RawPassword {
    pub fn new(raw: String, min_length: usize) -> Result<Self, PasswordPolicyError> {
        if raw.chars().count() < min_length {
            return Err(PasswordPolicyError::TooShort { min: min_length });
        }
        if !raw.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }
        if !raw.chars().any(char::is_uppercase) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !raw.chars().any(char::is_lowercase) {
            return Err(PasswordPolicyError::MissingLowercase);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: usize = 8;

    #[test]
    fn accepts_a_compliant_password() {
        assert!(RawPassword::new("ValidPass1".into(), MIN).is_ok());
    }

    #[test]
    fn rejects_too_short() {
        assert_eq!(
            RawPassword::new("short1A".into(), MIN).unwrap_err(),
            PasswordPolicyError::TooShort { min: MIN }
        );
    }

    #[test]
    fn rejects_missing_character_classes() {
        assert_eq!(
            RawPassword::new("alllowercase1".into(), MIN).unwrap_err(),
            PasswordPolicyError::MissingUppercase
        );
        assert_eq!(
            RawPassword::new("ALLUPPERCASE1".into(), MIN).unwrap_err(),
            PasswordPolicyError::MissingLowercase
        );
        assert_eq!(
            RawPassword::new("NoDigitsHere".into(), MIN).unwrap_err(),
            PasswordPolicyError::MissingDigit
        );
    }

    #[test]
    fn debug_output_is_redacted() {
        let password = RawPassword::new("ValidPass1".into(), MIN).unwrap();
        let rendered = format!("{password:?}");
        assert!(!rendered.contains("ValidPass1"));
    }
}
