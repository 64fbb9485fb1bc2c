use std::fmt;

use serde::{Deserialize, Serialize};

/// What a one-time code is allowed to prove.
///
/// Serialized as snake_case strings on the wire; persisted as small
/// integer codes (the historical column values) in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    EmailVerification,
    PasswordReset,
    Login,
}

impl OtpPurpose {
    pub const fn code(self) -> i16 {
        match self {
            Self::EmailVerification => 1,
            Self::PasswordReset => 3,
            Self::Login => 4,
        }
    }

    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::EmailVerification),
            3 => Some(Self::PasswordReset),
            4 => Some(Self::Login),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmailVerification => "email_verification",
            Self::PasswordReset => "password_reset",
            Self::Login => "login",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
