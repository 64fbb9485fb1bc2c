use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::application::audit::record_action;
use crate::domain::repository::{AuditLogRepository, OtpRepository, UserRepository};
use crate::domain::value_object::{Email, OtpPurpose};
use crate::error::{AuthError, AuthResult};

pub struct VerifyOtpInput {
    pub email: String,
    pub code: String,
    /// Correlation handle from the request step. Logged, not matched:
    /// the newest active challenge for (email, purpose) is the one
    /// that counts.
    pub reference: String,
    pub purpose: OtpPurpose,
}

pub struct VerifyOtpUseCase<R>
where
    R: UserRepository + OtpRepository + AuditLogRepository,
{
    repo: Arc<R>,
}

impl<R> VerifyOtpUseCase<R>
where
    R: UserRepository + OtpRepository + AuditLogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> AuthResult<()> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidOrExpiredOtp)?;

        let Some(challenge) = self.repo.find_active_otp(&email, input.purpose).await? else {
            return Err(AuthError::InvalidOrExpiredOtp);
        };
        if challenge.code != input.code || challenge.is_expired_at(Utc::now()) {
            return Err(AuthError::InvalidOrExpiredOtp);
        }

        // Conditional consumption: a concurrent verify that lost the
        // race sees `false` here and fails like any stale code.
        if !self.repo.mark_otp_used(challenge.id).await? {
            return Err(AuthError::InvalidOrExpiredOtp);
        }

        if input.purpose == OtpPurpose::EmailVerification {
            self.repo.mark_email_verified(&email).await?;
        }

        if let Some(user) = self.repo.find_user_by_email(&email).await? {
            record_action(
                self.repo.as_ref(),
                user.id,
                "otp_verified",
                json!({
                    "purpose": input.purpose.as_str(),
                    "reference": input.reference,
                }),
            )
            .await;
        }

        tracing::info!(email = %email, purpose = %input.purpose, "verification code accepted");
        Ok(())
    }
}
