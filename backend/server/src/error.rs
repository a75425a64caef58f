use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::api::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Too many requests, limit of {limit} reached. Retry in {retry_after_secs}s")]
    RateLimited { limit: u64, retry_after_secs: u64 },

    #[error("Search backend unavailable: {0}")]
    SearchUnavailable(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::SearchUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::SearchFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::MalformedPayload(_) => "COMMON_002",
            AppError::NotFound(_) => "COMMON_006",
            AppError::RateLimited { .. } => "COMMON_009",
            AppError::SearchUnavailable(_) => "EXT_003",
            AppError::SearchFailed(_) => "EXT_001",
            AppError::Config(_) | AppError::InternalError(_) => "COMMON_004",
        }
    }

    /// Only transport failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::SearchUnavailable(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() || e.is_connect() || e.is_request() {
            AppError::SearchUnavailable(e.to_string())
        } else {
            AppError::SearchFailed(e.to_string())
        }
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::InternalError(Box::new(e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(code = self.code(), "{self}");
        }

        let retry_after = match &self {
            AppError::RateLimited {
                retry_after_secs, ..
            } => HeaderValue::from_str(&retry_after_secs.to_string()).ok(),
            _ => None,
        };

        let body = ApiResponse::<()>::error(self.code(), &self.to_string());
        let mut response = (status, Json(body)).into_response();

        if let Some(value) = retry_after {
            response.headers_mut().insert(RETRY_AFTER, value);
        }

        response
    }
}
