use std::sync::Arc;

use serde_json::json;

use crate::application::audit::record_action;
use crate::application::config::AuthConfig;
use crate::domain::entity::{NewOtpChallenge, NewUser, User};
use crate::domain::notifier::Notifier;
use crate::domain::repository::{AuditLogRepository, OtpRepository, UserRepository};
use crate::domain::value_object::{Email, OtpPurpose, RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub national_id: String,
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub user: User,
    /// Always true: a fresh account must verify its email before the
    /// verified flag flips.
    pub verification_required: bool,
}

pub struct RegisterUseCase<R, N>
where
    R: UserRepository + OtpRepository + AuditLogRepository,
    N: Notifier,
{
    repo: Arc<R>,
    notifier: Arc<N>,
    config: Arc<AuthConfig>,
}

impl<R, N> RegisterUseCase<R, N>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let email =
            Email::new(&input.email).map_err(|e| AuthError::InvalidInput(e.to_string()))?;

        if self.repo.find_user_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password = RawPassword::new(input.password, self.config.password_min_length)
            .map_err(|e| AuthError::InvalidInput(e.to_string()))?;
        if input.confirm_password != password.as_str() {
            return Err(AuthError::InvalidInput(
                "Password confirmation does not match".to_string(),
            ));
        }

        let full_name = input.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(AuthError::InvalidInput(
                "Full name must not be empty".to_string(),
            ));
        }

        let password_hash = platform::password::hash_password(
            password.as_str(),
            self.config.bcrypt_cost,
        )
        .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = self
            .repo
            .create_user(&NewUser {
                email: email.clone(),
                password_hash,
                full_name,
                national_id: input.national_id.trim().to_string(),
            })
            .await?;

        let code = platform::otp::generate_code(platform::otp::DEFAULT_CODE_LENGTH);
        let reference =
            platform::otp::generate_reference(platform::otp::DEFAULT_REFERENCE_LENGTH);
        self.repo
            .create_otp(&NewOtpChallenge {
                email: email.clone(),
                code: code.clone(),
                purpose: OtpPurpose::EmailVerification,
                reference,
                expires_at: chrono::Utc::now() + self.config.otp_ttl(),
            })
            .await?;

        // The account and its challenge are already persisted; a
        // delivery failure is surfaced but nothing is rolled back, the
        // user can request a fresh code.
        if !self
            .notifier
            .deliver_otp(email.as_str(), &code, OtpPurpose::EmailVerification)
            .await
        {
            tracing::warn!(user_id = user.id, "verification code delivery failed");
            return Err(AuthError::DeliveryFailed);
        }

        record_action(
            self.repo.as_ref(),
            user.id,
            "user_registered",
            json!({ "email": email.as_str() }),
        )
        .await;

        tracing::info!(user_id = user.id, "user registered");
        Ok(RegisterOutput {
            user,
            verification_required: true,
        })
    }
}
