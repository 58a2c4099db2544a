//! Error types for ballast-core
//!
//! `FilterError` covers rejected filter input and is returned to callers
//! as a value. `CoreError` covers data loading and lookups, with error
//! codes and severities for API responses and logs.

use crate::filters::FilterKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A filter value or key that was rejected at the update boundary
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterError {
    #[error("Invalid value for filter '{key}': {value:?}")]
    InvalidValue { key: FilterKey, value: String },

    #[error("Unknown filter key: {key}")]
    UnknownKey { key: String },
}

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Data file missing
    FileNotFound,
    /// Data file could not be decoded
    InvalidData,
    /// IO error
    IoError,
    /// Post slug not found
    PostNotFound,
    /// Rejected filter input
    InvalidFilter,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            ErrorCode::InvalidData => write!(f, "INVALID_DATA"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::PostNotFound => write!(f, "POST_NOT_FOUND"),
            ErrorCode::InvalidFilter => write!(f, "INVALID_FILTER"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

/// Main error type for ballast-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Data file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Post not found: {slug}")]
    PostNotFound { slug: String },

    #[error(transparent)]
    InvalidFilter(#[from] FilterError),
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::FileNotFound { .. } => ErrorCode::FileNotFound,
            CoreError::InvalidData { .. } => ErrorCode::InvalidData,
            CoreError::Io(_) => ErrorCode::IoError,
            CoreError::PostNotFound { .. } => ErrorCode::PostNotFound,
            CoreError::InvalidFilter(_) => ErrorCode::InvalidFilter,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::FileNotFound { .. } => ErrorSeverity::Error,
            CoreError::InvalidData { .. } => ErrorSeverity::Error,
            CoreError::Io(_) => ErrorSeverity::Error,
            CoreError::PostNotFound { .. } => ErrorSeverity::Info,
            CoreError::InvalidFilter(_) => ErrorSeverity::Warning,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());
        match self {
            CoreError::FileNotFound { .. } => details
                .with_suggestion("Check data.file in the configuration.".to_string()),
            CoreError::InvalidData { .. } => details.with_suggestion(
                "The data file must be JSON with accounts, categories, transactions and posts."
                    .to_string(),
            ),
            CoreError::InvalidFilter(FilterError::InvalidValue { key, .. }) => details
                .with_suggestion(format!("Check the allowed values for '{}'.", key)),
            _ => details,
        }
    }

    /// Log the error at a level matching its severity
    pub fn log(&self, operation: &str) {
        match self.severity() {
            ErrorSeverity::Error => log::error!("[{}] {} - Operation: {}", self.code(), self, operation),
            ErrorSeverity::Warning => log::warn!("[{}] {} - Operation: {}", self.code(), self, operation),
            ErrorSeverity::Info => log::info!("[{}] {} - Operation: {}", self.code(), self, operation),
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
