use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::application::audit::record_action;
use crate::application::config::AuthConfig;
use crate::domain::entity::{NewRefreshToken, User};
use crate::domain::repository::{AuditLogRepository, RefreshTokenRepository, UserRepository};
use crate::domain::token::{TokenCodec, TokenKind};
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};
use platform::client::ClientInfo;

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in_secs: i64,
}

pub struct LoginUseCase<R>
where
    R: UserRepository + RefreshTokenRepository + AuditLogRepository,
{
    repo: Arc<R>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
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

    pub async fn execute(&self, input: LoginInput, client: ClientInfo) -> AuthResult<LoginOutput> {
        // A malformed email cannot belong to an account; answer the
        // same way as a wrong password.
        let email = Email::new(&input.email).map_err(|_| AuthError::Unauthorized)?;

        let Some(mut user) = self.repo.find_user_by_email(&email).await? else {
            return Err(AuthError::Unauthorized);
        };

        // Lockout is checked first so a locked account answers 423
        // whether or not the password happens to be right.
        if user.is_locked_at(Utc::now()) {
            return Err(AuthError::Locked);
        }

        if !platform::password::verify_password(&input.password, &user.password_hash) {
            let attempts = self
                .repo
                .increment_login_attempts(
                    user.id,
                    self.config.max_login_attempts,
                    self.config.lockout_minutes,
                )
                .await?;
            tracing::warn!(user_id = user.id, attempts, "failed login attempt");
            return Err(AuthError::Unauthorized);
        }

        self.repo.reset_login_attempts(user.id).await?;
        self.repo.record_login(user.id).await?;
        let now = Utc::now();
        user.login_attempts = 0;
        user.locked_until = None;
        user.last_login = Some(now);

        let access_token = self
            .codec
            .issue(user.id, email.as_str(), TokenKind::Access, self.config.access_ttl())
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let refresh_ttl = self.config.refresh_ttl();
        let refresh_token = self
            .codec
            .issue(user.id, email.as_str(), TokenKind::Refresh, refresh_ttl)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        self.repo
            .create_refresh_token(&NewRefreshToken {
                user_id: user.id,
                token: refresh_token.clone(),
                expires_at: now + refresh_ttl,
                user_agent: client.user_agent.clone(),
                ip_address: client.ip_string(),
            })
            .await?;

        record_action(
            self.repo.as_ref(),
            user.id,
            "user_login",
            json!({
                "ip_address": client.ip_string(),
                "user_agent": client.user_agent,
            }),
        )
        .await;

        tracing::info!(user_id = user.id, "user logged in");
        Ok(LoginOutput {
            user,
            access_token,
            refresh_token,
            expires_in_secs: self.config.access_ttl_minutes * 60,
        })
    }
}
