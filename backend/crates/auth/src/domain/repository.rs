//! Persistence contracts for the auth module.
//!
//! One Postgres type implements all of these in infra; tests swap in
//! an in-memory store.

use crate::domain::entity::{
    NewOtpChallenge, NewRefreshToken, NewUser, OtpChallenge, RefreshTokenRecord, User,
};
use crate::domain::value_object::{Email, OtpPurpose};
use crate::error::AuthResult;

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn create_user(&self, user: &NewUser) -> AuthResult<User>;

    /// Active users only. Deactivated accounts are invisible here.
    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Active users only.
    async fn find_user_by_id(&self, user_id: i64) -> AuthResult<Option<User>>;

    async fn mark_email_verified(&self, email: &Email) -> AuthResult<()>;

    /// Bumps the failed-attempt counter in one statement and opens a
    /// lockout window of `lockout_minutes` when the new count reaches
    /// `max_attempts`. Returns the new count.
    async fn increment_login_attempts(
        &self,
        user_id: i64,
        max_attempts: u32,
        lockout_minutes: i64,
    ) -> AuthResult<i32>;

    /// Clears the counter and any lockout window.
    async fn reset_login_attempts(&self, user_id: i64) -> AuthResult<()>;

    async fn record_login(&self, user_id: i64) -> AuthResult<()>;

    async fn update_password_hash(&self, user_id: i64, password_hash: &str) -> AuthResult<()>;

    async fn deactivate_user(&self, user_id: i64) -> AuthResult<()>;
}

#[trait_variant::make(OtpRepository: Send)]
pub trait LocalOtpRepository {
    async fn create_otp(&self, otp: &NewOtpChallenge) -> AuthResult<OtpChallenge>;

    /// Most recent unconsumed, unexpired challenge for the pair, if any.
    async fn find_active_otp(
        &self,
        email: &Email,
        purpose: OtpPurpose,
    ) -> AuthResult<Option<OtpChallenge>>;

    /// Consumes the challenge. Returns false when it was already
    /// consumed, so exactly one concurrent verifier wins.
    async fn mark_otp_used(&self, otp_id: i64) -> AuthResult<bool>;
}

#[trait_variant::make(RefreshTokenRepository: Send)]
pub trait LocalRefreshTokenRepository {
    async fn create_refresh_token(
        &self,
        token: &NewRefreshToken,
    ) -> AuthResult<RefreshTokenRecord>;

    async fn find_refresh_token(&self, token: &str) -> AuthResult<Option<RefreshTokenRecord>>;

    /// Stamps `last_used_at`.
    async fn touch_refresh_token(&self, token_id: i64) -> AuthResult<()>;

    /// Idempotent single-token revocation.
    async fn deactivate_refresh_token(&self, token: &str) -> AuthResult<()>;

    /// Revokes every active token of the user in one statement.
    /// Returns how many were revoked.
    async fn deactivate_all_refresh_tokens(&self, user_id: i64) -> AuthResult<u64>;
}

#[trait_variant::make(AuditLogRepository: Send)]
pub trait LocalAuditLogRepository {
    async fn append_audit_entry(
        &self,
        user_id: i64,
        action: &str,
        details: serde_json::Value,
    ) -> AuthResult<()>;
}
