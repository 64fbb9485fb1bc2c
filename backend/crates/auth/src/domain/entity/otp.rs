use chrono::{DateTime, Utc};

use crate::domain::value_object::{Email, OtpPurpose};

/// A single-use verification code bound to an email and a purpose.
#[derive(Debug, Clone)]
pub struct OtpChallenge {
    pub id: i64,
    pub email: Email,
    pub code: String,
    pub purpose: OtpPurpose,
    pub reference: String,
    pub is_used: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

impl OtpChallenge {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone)]
pub struct NewOtpChallenge {
    pub email: Email,
    pub code: String,
    pub purpose: OtpPurpose,
    pub reference: String,
    pub expires_at: DateTime<Utc>,
}
