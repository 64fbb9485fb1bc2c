use std::sync::Arc;

use serde_json::json;

use crate::application::audit::record_action;
use crate::application::config::AuthConfig;
use crate::domain::notifier::Notifier;
use crate::domain::repository::{AuditLogRepository, UserRepository};
use crate::domain::value_object::RawPassword;
use crate::error::{AuthError, AuthResult};

pub struct ChangePasswordInput {
    pub user_id: i64,
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<R, N>
where
    R: UserRepository + AuditLogRepository,
    N: Notifier,
{
    repo: Arc<R>,
    notifier: Arc<N>,
    config: Arc<AuthConfig>,
}

impl<R, N> ChangePasswordUseCase<R, N>
where
    R: UserRepository + AuditLogRepository,
    N: Notifier,
{
    pub fn new(repo: Arc<R>, notifier: Arc<N>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            notifier,
            config,
        }
    }

    pub async fn execute(&self, input: ChangePasswordInput) -> AuthResult<()> {
        let Some(user) = self.repo.find_user_by_id(input.user_id).await? else {
            return Err(AuthError::NotFound);
        };

        if !platform::password::verify_password(&input.current_password, &user.password_hash) {
            return Err(AuthError::InvalidInput(
                "Current password is incorrect".to_string(),
            ));
        }

        let new_password = RawPassword::new(input.new_password, self.config.password_min_length)
            .map_err(|e| AuthError::InvalidInput(e.to_string()))?;
        let password_hash =
            platform::password::hash_password(new_password.as_str(), self.config.bcrypt_cost)
                .map_err(|e| AuthError::Internal(e.to_string()))?;

        self.repo
            .update_password_hash(user.id, &password_hash)
            .await?;

        record_action(self.repo.as_ref(), user.id, "password_changed", json!({})).await;

        // Best effort; the password is already changed either way.
        if !self
            .notifier
            .deliver_security_alert(user.email.as_str(), "password_changed")
            .await
        {
            tracing::warn!(user_id = user.id, "password-changed alert delivery failed");
        }

        tracing::info!(user_id = user.id, "password changed");
        Ok(())
    }
}
