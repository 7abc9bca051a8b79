use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use tracing::error;

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch article: {0}")]
    FetchError(String),

    #[error("Unexpected Wikipedia response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::FetchError(_) | AppError::ParseError(_) => StatusCode::BAD_GATEWAY,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        error!("{}", self);
        response::error::<()>(status, self.to_string()).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
