//! # Error Types
//!
//! Domain-specific error types for fieldfix-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fieldfix-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                           │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  estimator errors (apps/estimator)                                      │
//! │  └── ApiError         - What callers see (serialized)                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The estimate calculator itself never returns an error. A failed estimate
//! check is a normal business outcome and is reported through
//! [`crate::validation::EstimateValidation`], which converts into
//! [`ValidationError::Estimate`] only when a caller wants to propagate it.

use chrono::{DateTime, Utc};
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The estimate is not in a status that allows the operation.
    ///
    /// ## When This Occurs
    /// - Sending an estimate the customer already accepted or rejected
    #[error("Estimate is {current_status}, cannot {operation}")]
    InvalidEstimateStatus {
        current_status: String,
        operation: String,
    },

    /// A status string did not name any known estimate status.
    #[error("Unknown estimate status: {0}")]
    UnknownEstimateStatus(String),

    /// A share link was opened after its expiry time.
    ///
    /// ## User Workflow
    /// ```text
    /// Customer opens /share/{token}
    ///      │
    ///      ▼
    /// now > expires_at ?
    ///      │ yes
    ///      ▼
    /// ShareLinkExpired ──► "공유 링크가 만료되었습니다." (HTTP 410 upstream)
    /// ```
    #[error("Share link {token} expired at {expired_at}")]
    ShareLinkExpired {
        token: String,
        expired_at: DateTime<Utc>,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements and are raised
/// by the field validators before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must be non-negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., malformed email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is longer than allowed.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A collection needs at least one selected entry.
    #[error("at least one {field} must be {requirement}")]
    NothingSelected { field: String, requirement: String },

    /// The estimate check failed; messages are in rule order.
    #[error("{}", errors.join(" "))]
    Estimate { errors: Vec<String> },
}

impl ValidationError {
    /// User-facing messages carried by this error.
    ///
    /// Estimate failures carry one message per violated rule; every other
    /// variant yields its own display string.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ValidationError::Estimate { errors } => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
