use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{ConnectInfo, State};
use http::{HeaderMap, StatusCode, header};

use crate::application::change_password::{ChangePasswordInput, ChangePasswordUseCase};
use crate::application::config::AuthConfig;
use crate::application::current_user::CurrentUserUseCase;
use crate::application::deactivate_account::DeactivateAccountUseCase;
use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::logout::LogoutUseCase;
use crate::application::refresh::RefreshUseCase;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::application::request_otp::{RequestOtpInput, RequestOtpUseCase};
use crate::application::verify_otp::{VerifyOtpInput, VerifyOtpUseCase};
use crate::domain::entity::User;
use crate::domain::notifier::Notifier;
use crate::domain::repository::{
    AuditLogRepository, OtpRepository, RefreshTokenRepository, UserRepository,
};
use crate::domain::token::TokenCodec;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangePasswordRequest, DeactivateAccountRequest, LoginRequest, LoginResponse,
    LogoutAllResponse, LogoutRequest, MessageResponse, RefreshRequest, RegisterRequest,
    RegisterResponse, RequestOtpRequest, RequestOtpResponse, TokenPair, UserProfile,
    VerifyOtpRequest,
};
use platform::client::extract_client_info;

/// Everything the handlers need, shared behind one Arc.
pub struct AuthState<R, N> {
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
    pub codec: Arc<TokenCodec>,
    pub config: Arc<AuthConfig>,
}

/// Pulls the token out of `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::Unauthorized)
}

async fn authenticated_user<R, N>(state: &AuthState<R, N>, headers: &HeaderMap) -> AuthResult<User>
where
    R: UserRepository + OtpRepository + RefreshTokenRepository + AuditLogRepository,
    N: Notifier,
{
    let token = bearer_token(headers)?;
    CurrentUserUseCase::new(state.repo.clone(), state.codec.clone())
        .execute(token)
        .await
}

pub async fn register<R, N>(
    State(state): State<Arc<AuthState<R, N>>>,
    Json(body): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: UserRepository + OtpRepository + RefreshTokenRepository + AuditLogRepository,
    N: Notifier,
{
    let output = RegisterUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.config.clone(),
    )
    .execute(RegisterInput {
        email: body.email,
        password: body.password,
        confirm_password: body.confirm_password,
        full_name: body.full_name,
        national_id: body.national_id,
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: UserProfile::from(&output.user),
            verification_required: output.verification_required,
        }),
    ))
}

pub async fn login<R, N>(
    State(state): State<Arc<AuthState<R, N>>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + OtpRepository + RefreshTokenRepository + AuditLogRepository,
    N: Notifier,
{
    let client = extract_client_info(&headers, Some(addr.ip()));
    let output = LoginUseCase::new(state.repo.clone(), state.codec.clone(), state.config.clone())
        .execute(
            LoginInput {
                email: body.email,
                password: body.password,
            },
            client,
        )
        .await?;

    Ok(Json(LoginResponse {
        user: UserProfile::from(&output.user),
        tokens: TokenPair {
            access_token: output.access_token,
            refresh_token: output.refresh_token,
            token_type: "bearer",
            expires_in: output.expires_in_secs,
        },
    }))
}

pub async fn request_otp<R, N>(
    State(state): State<Arc<AuthState<R, N>>>,
    Json(body): Json<RequestOtpRequest>,
) -> AuthResult<Json<RequestOtpResponse>>
where
    R: UserRepository + OtpRepository + RefreshTokenRepository + AuditLogRepository,
    N: Notifier,
{
    let output = RequestOtpUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.config.clone(),
    )
    .execute(RequestOtpInput {
        email: body.email,
        purpose: body.purpose,
    })
    .await?;

    Ok(Json(RequestOtpResponse {
        otp_reference: output.reference,
    }))
}

pub async fn verify_otp<R, N>(
    State(state): State<Arc<AuthState<R, N>>>,
    Json(body): Json<VerifyOtpRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + OtpRepository + RefreshTokenRepository + AuditLogRepository,
    N: Notifier,
{
    VerifyOtpUseCase::new(state.repo.clone())
        .execute(VerifyOtpInput {
            email: body.email,
            code: body.code,
            reference: body.reference,
            purpose: body.purpose,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Verification successful",
    }))
}

pub async fn refresh<R, N>(
    State(state): State<Arc<AuthState<R, N>>>,
    Json(body): Json<RefreshRequest>,
) -> AuthResult<Json<TokenPair>>
where
    R: UserRepository + OtpRepository + RefreshTokenRepository + AuditLogRepository,
    N: Notifier,
{
    let output =
        RefreshUseCase::new(state.repo.clone(), state.codec.clone(), state.config.clone())
            .execute(&body.refresh_token)
            .await?;

    Ok(Json(TokenPair {
        access_token: output.access_token,
        refresh_token: output.refresh_token,
        token_type: "bearer",
        expires_in: output.expires_in_secs,
    }))
}

pub async fn logout<R, N>(
    State(state): State<Arc<AuthState<R, N>>>,
    Json(body): Json<LogoutRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + OtpRepository + RefreshTokenRepository + AuditLogRepository,
    N: Notifier,
{
    LogoutUseCase::new(state.repo.clone())
        .execute(&body.refresh_token)
        .await?;

    Ok(Json(MessageResponse {
        message: "Logged out",
    }))
}

pub async fn logout_all<R, N>(
    State(state): State<Arc<AuthState<R, N>>>,
    headers: HeaderMap,
) -> AuthResult<Json<LogoutAllResponse>>
where
    R: UserRepository + OtpRepository + RefreshTokenRepository + AuditLogRepository,
    N: Notifier,
{
    let user = authenticated_user(&state, &headers).await?;
    let revoked = LogoutUseCase::new(state.repo.clone())
        .execute_all(user.id)
        .await?;

    Ok(Json(LogoutAllResponse {
        sessions_revoked: revoked,
    }))
}

pub async fn me<R, N>(
    State(state): State<Arc<AuthState<R, N>>>,
    headers: HeaderMap,
) -> AuthResult<Json<UserProfile>>
where
    R: UserRepository + OtpRepository + RefreshTokenRepository + AuditLogRepository,
    N: Notifier,
{
    let user = authenticated_user(&state, &headers).await?;
    Ok(Json(UserProfile::from(&user)))
}

pub async fn change_password<R, N>(
    State(state): State<Arc<AuthState<R, N>>>,
    headers: HeaderMap,
    Json(body): Json<ChangePasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + OtpRepository + RefreshTokenRepository + AuditLogRepository,
    N: Notifier,
{
    let user = authenticated_user(&state, &headers).await?;
    ChangePasswordUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.config.clone(),
    )
    .execute(ChangePasswordInput {
        user_id: user.id,
        current_password: body.current_password,
        new_password: body.new_password,
    })
    .await?;

    Ok(Json(MessageResponse {
        message: "Password changed",
    }))
}

pub async fn deactivate_account<R, N>(
    State(state): State<Arc<AuthState<R, N>>>,
    headers: HeaderMap,
    Json(body): Json<DeactivateAccountRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + OtpRepository + RefreshTokenRepository + AuditLogRepository,
    N: Notifier,
{
    let user = authenticated_user(&state, &headers).await?;
    DeactivateAccountUseCase::new(state.repo.clone(), state.notifier.clone())
        .execute(user.id, body.reason)
        .await?;

    Ok(Json(MessageResponse {
        message: "Account deactivated",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_or_malformed_authorization_is_rejected() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::Unauthorized)
        ));

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::Unauthorized)
        ));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::Unauthorized)
        ));
    }
}
