use std::sync::Arc;

use serde_json::json;

use crate::application::audit::record_action;
use crate::domain::notifier::Notifier;
use crate::domain::repository::{AuditLogRepository, RefreshTokenRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

pub struct DeactivateAccountUseCase<R, N>
where
    R: UserRepository + RefreshTokenRepository + AuditLogRepository,
    N: Notifier,
{
    repo: Arc<R>,
    notifier: Arc<N>,
}

impl<R, N> DeactivateAccountUseCase<R, N>
where
    R: UserRepository + RefreshTokenRepository + AuditLogRepository,
    N: Notifier,
{
    pub fn new(repo: Arc<R>, notifier: Arc<N>) -> Self {
        Self { repo, notifier }
    }

    /// Soft-deletes the account and revokes every open session.
    pub async fn execute(&self, user_id: i64, reason: Option<String>) -> AuthResult<()> {
        let Some(user) = self.repo.find_user_by_id(user_id).await? else {
            return Err(AuthError::NotFound);
        };

        self.repo.deactivate_user(user.id).await?;
        let revoked = self.repo.deactivate_all_refresh_tokens(user.id).await?;

        record_action(
            self.repo.as_ref(),
            user.id,
            "account_deactivated",
            json!({ "reason": reason, "sessions_revoked": revoked }),
        )
        .await;

        if !self
            .notifier
            .deliver_security_alert(user.email.as_str(), "account_deactivated")
            .await
        {
            tracing::warn!(user_id = user.id, "deactivation alert delivery failed");
        }

        tracing::info!(user_id = user.id, revoked, "account deactivated");
        Ok(())
    }
}
