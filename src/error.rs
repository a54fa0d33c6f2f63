use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Short code '{0}' already exists")]
    CodeTaken(String),
    #[error("No free short code found after {0} attempts")]
    CodeSpaceExhausted(u32),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid JSON or Content-Type must be application/json")]
    InvalidJson,
    #[error("URL is required in request body")]
    MissingUrl,
    #[error("URL cannot be empty")]
    EmptyUrl,
    #[error("Invalid URL format")]
    InvalidUrl,
    #[error("Short code not found")]
    ShortCodeNotFound,
    #[error("Endpoint not found")]
    EndpointNotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Failed to generate unique short code")]
    CodeGenerationFailed,
    #[error("Request timed out")]
    RequestTimeout,
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidJson
            | AppError::MissingUrl
            | AppError::EmptyUrl
            | AppError::InvalidUrl => StatusCode::BAD_REQUEST,
            AppError::ShortCodeNotFound | AppError::EndpointNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            AppError::CodeGenerationFailed | AppError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::warn!("{}", err);
        match err {
            StoreError::CodeTaken(_) => AppError::Internal,
            StoreError::CodeSpaceExhausted(_) => AppError::CodeGenerationFailed,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
