//! Error types for ballast-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ballast_core::{CoreError, ErrorCode};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(e) => match e.code() {
                ErrorCode::PostNotFound => StatusCode::NOT_FOUND,
                ErrorCode::InvalidFilter => StatusCode::BAD_REQUEST,
                ErrorCode::FileNotFound | ErrorCode::InvalidData | ErrorCode::IoError => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// JSON error body; core errors carry their suggestions
    pub fn body(&self) -> Value {
        match self {
            ApiError::Core(e) => json!({ "error": e.to_details() }),
            _ => json!({
                "error": {
                    "code": self.code(),
                    "message": self.to_string(),
                }
            }),
        }
    }

    pub fn code(&self) -> String {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND".to_string(),
            ApiError::BadRequest { .. } => "BAD_REQUEST".to_string(),
            ApiError::Core(e) => e.code().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("{} ({})", self, status);
        }
        (status, Json(self.body())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
