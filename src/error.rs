// src/error.rs
//! Application error types with structured error handling.
//!
//! Error variants name what went wrong and where. Stage-local problems
//! (unresolved links, unsupported media) are logged and never become an
//! `AppError`; the variants here either abort the run or are retried.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded, back off and retry
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError | Self::Conflict => {
                true
            }
            Self::HttpStatus(status) => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not fetch asset {url} (HTTP {status})")]
    AssetFetch { url: String, status: u16 },

    #[error("Could not determine an image file extension for {url}")]
    ImageExtension { url: String },

    #[error("Invalid image configuration: {0}")]
    ImageConfiguration(String),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether a retry of the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::NetworkFailure(err) => {
                err.is_timeout()
                    || err.is_connect()
                    || err.is_request()
                    || err
                        .status()
                        .map(|s| s.as_u16() == 429 || s.is_server_error())
                        .unwrap_or(false)
            }
            AppError::NotionService { code, status, .. } => {
                code.is_retryable() || status.as_u16() == 429 || status.is_server_error()
            }
            AppError::AssetFetch { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(err: std::fmt::Error) -> Self {
        AppError::InternalError {
            message: "Formatting error".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::InternalError {
            message: "Invalid rewrite pattern".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<walkdir::Error> for AppError {
    fn from(err: walkdir::Error) -> Self {
        AppError::PathError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limits_and_server_errors_are_retryable() {
        assert!(NotionErrorCode::RateLimited.is_retryable());
        assert!(NotionErrorCode::HttpStatus(503).is_retryable());
        assert!(!NotionErrorCode::ObjectNotFound.is_retryable());
        assert!(!NotionErrorCode::HttpStatus(404).is_retryable());
    }

    #[test]
    fn unknown_codes_round_trip_through_display() {
        let code = NotionErrorCode::from_api_response("something_new");
        assert_eq!(code, NotionErrorCode::Unknown("something_new".to_string()));
        assert_eq!(code.to_string(), "something_new");
    }

    #[test]
    fn planner_errors_are_not_retryable() {
        let err = AppError::ImageExtension {
            url: "https://example.com/file".to_string(),
        };
        assert!(!err.is_retryable());
        let err = AppError::AssetFetch {
            url: "https://example.com/a.png".to_string(),
            status: 502,
        };
        assert!(err.is_retryable());
    }
}
