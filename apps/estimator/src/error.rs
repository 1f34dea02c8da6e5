//! # API Error Type
//!
//! Unified error type for estimator commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in FieldFix                               │
//! │                                                                         │
//! │  Caller                      Rust Backend                               │
//! │  ──────                      ────────────                               │
//! │                                                                         │
//! │  build_estimate(request)                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  Command Function                                                │   │
//! │  │  Result<T, ApiError>                                             │   │
//! │  │         │                                                        │   │
//! │  │         ▼                                                        │   │
//! │  │  Unknown catalog id? ── ApiError::not_found ──────────┐          │   │
//! │  │         │                                             │          │   │
//! │  │         ▼                                             ▼          │   │
//! │  │  Rule violated? ─── ValidationError::Estimate ──── ApiError ────►│   │
//! │  │         │                                                        │   │
//! │  │         ▼                                                        │   │
//! │  │  Success ───────────────────────────────────────────────────────►│   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  { "code": "VALIDATION_ERROR",                                          │
//! │    "message": "select at least one part.",                              │
//! │    "details": ["select at least one part."] }                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use fieldfix_core::{CoreError, ValidationError};

use crate::config::ConfigError;

/// API error returned from estimator commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Part not found: gv-999",
///   "details": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// One entry per failed rule, in rule order
    pub details: Vec<String>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Share link past its expiry (410)
    Expired,

    /// Business logic error (422)
    BusinessLogic,

    /// Configuration could not be loaded (500)
    ConfigError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status an outer web layer should answer with.
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::NotFound => 404,
            ErrorCode::ValidationError => 400,
            ErrorCode::Expired => 410,
            ErrorCode::BusinessLogic => 422,
            ErrorCode::ConfigError | ErrorCode::Internal => 500,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn status(&self) -> u16 {
        self.code.status()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: err.to_string(),
            details: err.messages(),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidEstimateStatus { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::UnknownEstimateStatus(status) => {
                ApiError::validation(format!("Unknown estimate status: {}", status))
            }
            CoreError::ShareLinkExpired { .. } => ApiError::new(ErrorCode::Expired, err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        // file paths and parser output stay in the log
        tracing::error!("Configuration error: {}", err);
        ApiError::new(ErrorCode::ConfigError, "Configuration could not be loaded")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for estimator commands.
pub type ApiResult<T> = Result<T, ApiError>;
