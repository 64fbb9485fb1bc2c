use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::application::audit::record_action;
use crate::application::config::AuthConfig;
use crate::domain::entity::NewOtpChallenge;
use crate::domain::notifier::Notifier;
use crate::domain::repository::{AuditLogRepository, OtpRepository, UserRepository};
use crate::domain::value_object::{Email, OtpPurpose};
use crate::error::{AuthError, AuthResult};

pub struct RequestOtpInput {
    pub email: String,
    pub purpose: OtpPurpose,
}

#[derive(Debug)]
pub struct RequestOtpOutput {
    /// Opaque handle the client echoes back at verification time.
    pub reference: String,
}

pub struct RequestOtpUseCase<R, N>
where
    R: UserRepository + OtpRepository + AuditLogRepository,
    N: Notifier,
{
    repo: Arc<R>,
    notifier: Arc<N>,
    config: Arc<AuthConfig>,
}

impl<R, N> RequestOtpUseCase<R, N>
where
    R: UserRepository + OtpRepository + AuditLogRepository,
    N: Notifier,
{
    pub fn new(repo: Arc<R>, notifier: Arc<N>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            notifier,
            config,
        }
    }

    pub async fn execute(&self, input: RequestOtpInput) -> AuthResult<RequestOtpOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::NotFound)?;
        let Some(user) = self.repo.find_user_by_email(&email).await? else {
            return Err(AuthError::NotFound);
        };

        // Resend cooldown: an unexpired challenge younger than the
        // cooldown window blocks a new one.
        if let Some(existing) = self.repo.find_active_otp(&email, input.purpose).await? {
            let age = Utc::now() - existing.created_at;
            if age.num_seconds() < self.config.otp_resend_cooldown_secs {
                return Err(AuthError::RateLimited);
            }
        }

        let code = platform::otp::generate_code(platform::otp::DEFAULT_CODE_LENGTH);
        let reference =
            platform::otp::generate_reference(platform::otp::DEFAULT_REFERENCE_LENGTH);
        let challenge = self
            .repo
            .create_otp(&NewOtpChallenge {
                email: email.clone(),
                code: code.clone(),
                purpose: input.purpose,
                reference,
                expires_at: Utc::now() + self.config.otp_ttl(),
            })
            .await?;

        if !self
            .notifier
            .deliver_otp(email.as_str(), &code, input.purpose)
            .await
        {
            tracing::warn!(user_id = user.id, purpose = %input.purpose, "code delivery failed");
            return Err(AuthError::DeliveryFailed);
        }

        record_action(
            self.repo.as_ref(),
            user.id,
            "otp_requested",
            json!({ "purpose": input.purpose.as_str() }),
        )
        .await;

        tracing::info!(user_id = user.id, purpose = %input.purpose, "verification code issued");
        Ok(RequestOtpOutput {
            reference: challenge.reference,
        })
    }
}
