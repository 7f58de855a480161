//! Error types for repo-scout
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Errors raised by a request are also classified into a [`FailureKind`],
//! which is what a fetch reports as its terminal status.

use serde::Serialize;
use thiserror::Error;

/// Caller-visible classification of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    /// 401: the credential was missing or rejected
    AuthFailure,
    /// 403: the API rate limit is exhausted
    RateLimited,
    /// 404: the resource does not exist or is not visible
    NotFound,
    /// Any other non-success status
    HttpError,
    /// Connection error, timeout, or unreadable response body
    TransportError,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::AuthFailure => "auth-failure",
            Self::RateLimited => "rate-limited",
            Self::NotFound => "not-found",
            Self::HttpError => "http-error",
            Self::TransportError => "transport-error",
        };
        f.write_str(name)
    }
}

/// The main error type for repo-scout
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Authentication failed (HTTP 401): {body}")]
    Unauthorized { body: String },

    #[error("Rate limited (HTTP {status}){}: {body}", retry_hint(.retry_after_seconds))]
    RateLimited {
        status: u16,
        retry_after_seconds: Option<u64>,
        body: String,
    },

    #[error("Not found: {url}{}", body_hint(.body))]
    NotFound { url: String, body: String },

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

fn body_hint(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

fn retry_hint(retry_after_seconds: &Option<u64>) -> String {
    match retry_after_seconds {
        Some(secs) => format!(", retry after {secs}s"),
        None => String::new(),
    }
}

impl Error {
    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Build the error for a non-success status.
    ///
    /// 401, 403 and 404 get their own variants; everything else is a
    /// plain [`Error::HttpStatus`].
    pub fn from_status(
        status: u16,
        body: impl Into<String>,
        url: impl Into<String>,
        retry_after_seconds: Option<u64>,
    ) -> Self {
        match status {
            401 => Self::Unauthorized { body: body.into() },
            403 => Self::RateLimited {
                status,
                retry_after_seconds,
                body: body.into(),
            },
            404 => Self::NotFound {
                url: url.into(),
                body: body.into(),
            },
            _ => Self::http_status(status, body),
        }
    }

    /// Classify this error for the fetch outcome
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Unauthorized { .. } => FailureKind::AuthFailure,
            Error::RateLimited { .. } => FailureKind::RateLimited,
            Error::NotFound { .. } => FailureKind::NotFound,
            Error::HttpStatus { .. } => FailureKind::HttpError,
            _ => FailureKind::TransportError,
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Unauthorized { .. } => Some(401),
            Error::RateLimited { status, .. } | Error::HttpStatus { status, .. } => Some(*status),
            Error::NotFound { .. } => Some(404),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is retryable
    ///
    /// Auth failures, rate limiting and not-found are terminal.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 500 | 502 | 503 | 504)
}

/// Result type alias for repo-scout
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
