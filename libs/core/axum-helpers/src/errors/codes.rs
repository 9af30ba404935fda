//! Type-safe error codes for API responses.
//!
//! Each error code carries:
//! - a string identifier for clients (e.g., "VALIDATION_ERROR")
//! - an integer code for logs and dashboards (e.g., 1001)
//! - a default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::Conflict;
//! assert_eq!(code.as_str(), "CONFLICT");
//! assert_eq!(code.code(), 1008);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body is structurally malformed
    BadRequest,

    /// Request violates a business rule
    ValidationError,

    /// Path id is not a positive integer
    InvalidId,

    /// Requested resource was not found
    NotFound,

    /// Request conflicts with current resource state (e.g., duplicate resource)
    Conflict,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// HTTP method not supported on this route
    MethodNotAllowed,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Serialization errors (5000s)
    /// JSON serialization/deserialization error
    SerdeJsonError,
}

impl ErrorCode {
    /// String representation for client consumption.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Integer code for logging and monitoring.
    ///
    /// Ranges:
    /// - 1000-1999: Client errors
    /// - 5000-5999: Serialization errors
    pub fn code(&self) -> i32 {
        match self {
            Self::BadRequest => 1000,
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Conflict => 1008,
            Self::ServiceUnavailable => 1011,
            Self::MethodNotAllowed => 1012,
            Self::SerdeJsonError => 5001,
        }
    }

    /// Default user-facing error message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Malformed request",
            Self::ValidationError => "Request validation failed",
            Self::InvalidId => "Invalid resource id",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::JsonExtraction => "Failed to parse request body",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::SerdeJsonError => "JSON serialization error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
