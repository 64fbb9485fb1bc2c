use std::sync::Arc;

use serde_json::json;

use crate::application::audit::record_action;
use crate::domain::repository::{AuditLogRepository, RefreshTokenRepository};
use crate::error::AuthResult;

pub struct LogoutUseCase<R>
where
    R: RefreshTokenRepository + AuditLogRepository,
{
    repo: Arc<R>,
}

impl<R> LogoutUseCase<R>
where
    R: RefreshTokenRepository + AuditLogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Revokes one refresh token. Unknown or already-revoked tokens
    /// succeed silently; logout is idempotent.
    pub async fn execute(&self, refresh_token: &str) -> AuthResult<()> {
        if let Some(record) = self.repo.find_refresh_token(refresh_token).await? {
            self.repo.deactivate_refresh_token(refresh_token).await?;
            record_action(self.repo.as_ref(), record.user_id, "user_logout", json!({})).await;
            tracing::info!(user_id = record.user_id, "session revoked");
        }
        Ok(())
    }

    /// Revokes every active session of the user. Returns the count.
    pub async fn execute_all(&self, user_id: i64) -> AuthResult<u64> {
        let revoked = self.repo.deactivate_all_refresh_tokens(user_id).await?;
        record_action(
            self.repo.as_ref(),
            user_id,
            "logout_all_devices",
            json!({ "sessions_revoked": revoked }),
        )
        .await;
        tracing::info!(user_id, revoked, "all sessions revoked");
        Ok(revoked)
    }
}
