//! Postgres persistence for users, one-time codes, refresh tokens and
//! the audit trail.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::prelude::FromRow;

use crate::domain::entity::{
    NewOtpChallenge, NewRefreshToken, NewUser, OtpChallenge, RefreshTokenRecord, User,
};
use crate::domain::repository::{
    AuditLogRepository, OtpRepository, RefreshTokenRepository, UserRepository,
};
use crate::domain::value_object::{Email, OtpPurpose};
use crate::error::{AuthError, AuthResult};

#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// =============================================================================
// Row types
// =============================================================================

#[derive(FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    full_name: String,
    national_id: String,
    is_active: bool,
    email_verified: bool,
    login_attempts: i32,
    locked_until: Option<DateTime<Utc>>,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            id: self.id,
            email: Email::new(&self.email)
                .map_err(|e| AuthError::Internal(format!("stored email rejected: {e}")))?,
            password_hash: self.password_hash,
            full_name: self.full_name,
            national_id: self.national_id,
            is_active: self.is_active,
            email_verified: self.email_verified,
            login_attempts: self.login_attempts,
            locked_until: self.locked_until,
            last_login: self.last_login,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(FromRow)]
struct OtpRow {
    id: i64,
    email: String,
    otp_code: String,
    otp_type: i16,
    otp_reference: String,
    is_used: bool,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    used_at: Option<DateTime<Utc>>,
}

impl OtpRow {
    fn into_challenge(self) -> AuthResult<OtpChallenge> {
        Ok(OtpChallenge {
            id: self.id,
            email: Email::new(&self.email)
                .map_err(|e| AuthError::Internal(format!("stored email rejected: {e}")))?,
            code: self.otp_code,
            purpose: OtpPurpose::from_code(self.otp_type)
                .ok_or_else(|| AuthError::Internal(format!("unknown otp_type {}", self.otp_type)))?,
            reference: self.otp_reference,
            is_used: self.is_used,
            expires_at: self.expires_at,
            created_at: self.created_at,
            used_at: self.used_at,
        })
    }
}

#[derive(FromRow)]
struct RefreshTokenRow {
    id: i64,
    user_id: i64,
    token: String,
    is_active: bool,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
    user_agent: Option<String>,
    ip_address: Option<String>,
}

impl RefreshTokenRow {
    fn into_record(self) -> RefreshTokenRecord {
        RefreshTokenRecord {
            id: self.id,
            user_id: self.user_id,
            token: self.token,
            is_active: self.is_active,
            expires_at: self.expires_at,
            created_at: self.created_at,
            last_used_at: self.last_used_at,
            user_agent: self.user_agent,
            ip_address: self.ip_address,
        }
    }
}

// =============================================================================
// Users
// =============================================================================

const USER_COLUMNS: &str = "id, email, password_hash, full_name, national_id, is_active, \
     email_verified, login_attempts, locked_until, last_login, created_at, updated_at";

impl UserRepository for PgAuthRepository {
    async fn create_user(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, password_hash, full_name, national_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(&user.national_id)
        .fetch_one(&self.pool)
        .await?;
        row.into_user()
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND is_active = TRUE"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(UserRow::into_user).transpose()
    }

    async fn find_user_by_id(&self, user_id: i64) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND is_active = TRUE"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(UserRow::into_user).transpose()
    }

    async fn mark_email_verified(&self, email: &Email) -> AuthResult<()> {
        sqlx::query(
            "UPDATE users SET email_verified = TRUE, updated_at = NOW()
             WHERE email = $1 AND is_active = TRUE",
        )
        .bind(email.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn increment_login_attempts(
        &self,
        user_id: i64,
        max_attempts: u32,
        lockout_minutes: i64,
    ) -> AuthResult<i32> {
        // Single statement so concurrent failures cannot lose an
        // increment or skip the lock threshold.
        let (attempts,): (i32,) = sqlx::query_as(
            "UPDATE users
             SET login_attempts = login_attempts + 1,
                 locked_until = CASE
                     WHEN login_attempts + 1 >= $2
                     THEN NOW() + make_interval(mins => $3)
                     ELSE locked_until
                 END,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING login_attempts",
        )
        .bind(user_id)
        .bind(max_attempts as i32)
        .bind(lockout_minutes as i32)
        .fetch_one(&self.pool)
        .await?;
        Ok(attempts)
    }

    async fn reset_login_attempts(&self, user_id: i64) -> AuthResult<()> {
        sqlx::query(
            "UPDATE users SET login_attempts = 0, locked_until = NULL, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn record_login(&self, user_id: i64) -> AuthResult<()> {
        sqlx::query("UPDATE users SET last_login = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_password_hash(&self, user_id: i64, password_hash: &str) -> AuthResult<()> {
        sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn deactivate_user(&self, user_id: i64) -> AuthResult<()> {
        sqlx::query("UPDATE users SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// =============================================================================
// One-time codes
// =============================================================================

const OTP_COLUMNS: &str =
    "id, email, otp_code, otp_type, otp_reference, is_used, expires_at, created_at, used_at";

impl OtpRepository for PgAuthRepository {
    async fn create_otp(&self, otp: &NewOtpChallenge) -> AuthResult<OtpChallenge> {
        let row = sqlx::query_as::<_, OtpRow>(&format!(
            "INSERT INTO otp_verifications (email, otp_code, otp_type, otp_reference, expires_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {OTP_COLUMNS}"
        ))
        .bind(otp.email.as_str())
        .bind(&otp.code)
        .bind(otp.purpose.code())
        .bind(&otp.reference)
        .bind(otp.expires_at)
        .fetch_one(&self.pool)
        .await?;
        row.into_challenge()
    }

    async fn find_active_otp(
        &self,
        email: &Email,
        purpose: OtpPurpose,
    ) -> AuthResult<Option<OtpChallenge>> {
        let row = sqlx::query_as::<_, OtpRow>(&format!(
            "SELECT {OTP_COLUMNS} FROM otp_verifications
             WHERE email = $1 AND otp_type = $2 AND is_used = FALSE AND expires_at > NOW()
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        ))
        .bind(email.as_str())
        .bind(purpose.code())
        .fetch_optional(&self.pool)
        .await?;
        row.map(OtpRow::into_challenge).transpose()
    }

    async fn mark_otp_used(&self, otp_id: i64) -> AuthResult<bool> {
        // The is_used guard makes consumption first-wins under
        // concurrent verification.
        let result = sqlx::query(
            "UPDATE otp_verifications SET is_used = TRUE, used_at = NOW()
             WHERE id = $1 AND is_used = FALSE",
        )
        .bind(otp_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

// =============================================================================
// Refresh tokens
// =============================================================================

const REFRESH_COLUMNS: &str = "id, user_id, token, is_active, expires_at, created_at, \
     last_used_at, user_agent, ip_address";

impl RefreshTokenRepository for PgAuthRepository {
    async fn create_refresh_token(
        &self,
        token: &NewRefreshToken,
    ) -> AuthResult<RefreshTokenRecord> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(&format!(
            "INSERT INTO refresh_tokens (user_id, token, expires_at, user_agent, ip_address)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {REFRESH_COLUMNS}"
        ))
        .bind(token.user_id)
        .bind(&token.token)
        .bind(token.expires_at)
        .bind(&token.user_agent)
        .bind(&token.ip_address)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into_record())
    }

    async fn find_refresh_token(&self, token: &str) -> AuthResult<Option<RefreshTokenRecord>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(&format!(
            "SELECT {REFRESH_COLUMNS} FROM refresh_tokens WHERE token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(RefreshTokenRow::into_record))
    }

    async fn touch_refresh_token(&self, token_id: i64) -> AuthResult<()> {
        sqlx::query("UPDATE refresh_tokens SET last_used_at = NOW() WHERE id = $1")
            .bind(token_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn deactivate_refresh_token(&self, token: &str) -> AuthResult<()> {
        sqlx::query("UPDATE refresh_tokens SET is_active = FALSE WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn deactivate_all_refresh_tokens(&self, user_id: i64) -> AuthResult<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET is_active = FALSE
             WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Audit trail
// =============================================================================

impl AuditLogRepository for PgAuthRepository {
    async fn append_audit_entry(
        &self,
        user_id: i64,
        action: &str,
        details: serde_json::Value,
    ) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO audit_logs (user_id, action_name, details)
             VALUES ($1, $2, $3::jsonb)",
        )
        .bind(user_id)
        .bind(action)
        .bind(details.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
