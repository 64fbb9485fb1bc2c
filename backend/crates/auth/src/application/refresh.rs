use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::application::audit::record_action;
use crate::application::config::AuthConfig;
use crate::domain::repository::{AuditLogRepository, RefreshTokenRepository, UserRepository};
use crate::domain::token::{TokenCodec, TokenError, TokenKind};
use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
pub struct RefreshOutput {
    pub access_token: String,
    /// The same refresh token the caller presented. Refresh tokens
    /// are not rotated; one token serves the whole session window.
    pub refresh_token: String,
    pub expires_in_secs: i64,
}

pub struct RefreshUseCase<R>
where
    R: UserRepository + RefreshTokenRepository + AuditLogRepository,
{
    repo: Arc<R>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<R> RefreshUseCase<R>
where
    R: UserRepository + RefreshTokenRepository + AuditLogRepository,
{
    pub fn new(repo: Arc<R>, codec: Arc<TokenCodec>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            codec,
            config,
        }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<RefreshOutput> {
        let claims = self.codec.decode(refresh_token).map_err(|err| match err {
            TokenError::Expired | TokenError::Invalid => AuthError::Unauthorized,
        })?;
        if claims.kind != TokenKind::Refresh {
            return Err(AuthError::Unauthorized);
        }
        let user_id = claims.user_id().ok_or(AuthError::Unauthorized)?;

        // Signature alone is not enough: the server-side record must
        // still be active and unexpired.
        let Some(record) = self.repo.find_refresh_token(refresh_token).await? else {
            return Err(AuthError::Unauthorized);
        };
        if !record.is_usable_at(Utc::now()) {
            return Err(AuthError::Unauthorized);
        }

        let Some(user) = self.repo.find_user_by_id(user_id).await? else {
            return Err(AuthError::Unauthorized);
        };

        self.repo.touch_refresh_token(record.id).await?;

        let access_token = self
            .codec
            .issue(
                user.id,
                user.email.as_str(),
                TokenKind::Access,
                self.config.access_ttl(),
            )
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        record_action(self.repo.as_ref(), user.id, "token_refreshed", json!({})).await;

        Ok(RefreshOutput {
            access_token,
            refresh_token: refresh_token.to_string(),
            expires_in_secs: self.config.access_ttl_minutes * 60,
        })
    }
}
