use std::sync::Arc;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::token::{TokenCodec, TokenKind};
use crate::error::{AuthError, AuthResult};

/// Resolves a bearer access token to its active user.
pub struct CurrentUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    codec: Arc<TokenCodec>,
}

impl<R> CurrentUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, codec: Arc<TokenCodec>) -> Self {
        Self { repo, codec }
    }

    pub async fn execute(&self, access_token: &str) -> AuthResult<User> {
        let claims = self
            .codec
            .decode(access_token)
            .map_err(|_| AuthError::Unauthorized)?;
        // A refresh token must not open authenticated endpoints.
        if claims.kind != TokenKind::Access {
            return Err(AuthError::Unauthorized);
        }
        let user_id = claims.user_id().ok_or(AuthError::Unauthorized)?;

        self.repo
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthorized)
    }
}
