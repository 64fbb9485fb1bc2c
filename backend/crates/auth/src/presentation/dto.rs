//! Wire shapes for the auth HTTP surface. camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::User;
use crate::domain::value_object::OtpPurpose;

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub national_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtpRequest {
    pub email: String,
    pub purpose: OtpPurpose,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
    pub reference: String,
    pub purpose: OtpPurpose,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateAccountRequest {
    pub reason: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

/// Public view of a user. The password hash never crosses this line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub national_id: String,
    pub email_verified: bool,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_string(),
            full_name: user.full_name.clone(),
            national_id: user.national_id.clone(),
            email_verified: user.email_verified,
            is_active: user.is_active,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user: UserProfile,
    pub verification_required: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserProfile,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtpResponse {
    pub otp_reference: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutAllResponse {
    pub sessions_revoked: u64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::Email;

    #[test]
    fn user_profile_omits_the_password_hash() {
        let now = Utc::now();
        let user = User {
            id: 9,
            email: Email::new("carol@example.com").unwrap(),
            password_hash: "$2b$12$secret-material".into(),
            full_name: "Carol Example".into(),
            national_id: "555".into(),
            is_active: true,
            email_verified: true,
            login_attempts: 0,
            locked_until: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&UserProfile::from(&user)).unwrap();
        assert!(!json.contains("secret-material"));
        assert!(json.contains("\"fullName\":\"Carol Example\""));
        assert!(json.contains("\"emailVerified\":true"));
    }

    #[test]
    fn login_response_flattens_the_token_pair() {
        let now = Utc::now();
        let user = User {
            id: 1,
            email: Email::new("a@b.co").unwrap(),
            password_hash: "hash".into(),
            full_name: "A".into(),
            national_id: "1".into(),
            is_active: true,
            email_verified: false,
            login_attempts: 0,
            locked_until: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        let body = LoginResponse {
            user: UserProfile::from(&user),
            tokens: TokenPair {
                access_token: "acc".into(),
                refresh_token: "ref".into(),
                token_type: "bearer",
                expires_in: 3600,
            },
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"accessToken\":\"acc\""));
        assert!(json.contains("\"tokenType\":\"bearer\""));
    }
}
