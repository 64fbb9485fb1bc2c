use axum::response::{IntoResponse, Response};
use http::StatusCode;
use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use thiserror::Error;

pub type MasterDataResult<T> = Result<T, MasterDataError>;

#[derive(Debug, Error)]
pub enum MasterDataError {
    #[error("Unknown master data category: {0}")]
    UnknownCategory(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl MasterDataError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownCategory(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownCategory(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::InternalServerError,
        }
    }
}

impl From<MasterDataError> for AppError {
    fn from(err: MasterDataError) -> Self {
        let message = if err.kind().is_server_error() {
            "Something went wrong, please try again later".to_string()
        } else {
            err.to_string()
        };
        AppError::new(err.kind(), message).with_source(err)
    }
}

impl IntoResponse for MasterDataError {
    fn into_response(self) -> Response {
        if self.kind().is_server_error() {
            tracing::error!(error = %self, "master data error");
        }
        AppError::from(self).into_response()
    }
}
