use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_EMAIL_LENGTH: usize = 255;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email must not be empty")]
    Empty,
    #[error("Email must be at most {MAX_EMAIL_LENGTH} characters")]
    TooLong,
    #[error("Email format is invalid")]
    Malformed,
}

/// A syntactically valid email address.
///
/// Stored and compared exactly as the user typed it, apart from
/// surrounding whitespace. `User@Example.com` and `user@example.com`
/// are distinct addresses here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self, EmailError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.chars().count() > MAX_EMAIL_LENGTH {
            return Err(EmailError::TooLong);
        }

        let (local, domain) = trimmed.split_once('@').ok_or(EmailError::Malformed)?;
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(EmailError::Malformed);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(Email::new("alice@example.com").is_ok());
        assert!(Email::new("a.b+tag@sub.example.org").is_ok());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let email = Email::new("  alice@example.com  ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn preserves_case() {
        let email = Email::new("Alice@Example.com").unwrap();
        assert_eq!(email.as_str(), "Alice@Example.com");
        assert_ne!(email, Email::new("alice@example.com").unwrap());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert_eq!(Email::new(""), Err(EmailError::Empty));
        assert_eq!(Email::new("no-at-sign"), Err(EmailError::Malformed));
        assert_eq!(Email::new("@example.com"), Err(EmailError::Malformed));
        assert_eq!(Email::new("alice@"), Err(EmailError::Malformed));
        assert_eq!(Email::new("alice@nodot"), Err(EmailError::Malformed));
        assert_eq!(Email::new("alice@.com"), Err(EmailError::Malformed));
        assert_eq!(Email::new("a b@example.com"), Err(EmailError::Malformed));
    }

    #[test]
    fn rejects_overlong_addresses() {
        let raw = format!("{}@example.com", "a".repeat(MAX_EMAIL_LENGTH));
        assert_eq!(Email::new(&raw), Err(EmailError::TooLong));
    }
}
