//! Error types for GitLab API operations.

use thiserror::Error;

use crate::response::ApiResponse;

/// Errors that can occur during GitLab API operations.
#[derive(Debug, Error)]
pub enum GitlabError {
    /// Configuration is missing or incomplete.
    #[error("GitLab configuration required: {0}")]
    ConfigMissing(String),

    /// The parent identifier could not be turned into a path segment.
    #[error("Invalid identifier '{0}': expected a numeric ID or a namespace path")]
    InvalidIdentifier(String),

    /// The transport could not build a request.
    #[error("Failed to build request: {0}")]
    RequestConstruction(String),

    /// API request failed with a non-success status.
    ///
    /// `response` keeps the envelope of the failed call so the request ID
    /// and pagination headers stay available.
    #[error("GitLab API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
        response: Option<Box<ApiResponse>>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// The MCP transport failed.
    #[error("MCP server error: {0}")]
    Mcp(String),
}

/// Coarse classification of a [`GitlabError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client configuration is missing or invalid.
    Configuration,
    /// The parent identifier could not be resolved.
    InvalidIdentifier,
    /// The request could not be constructed.
    RequestConstructionFailed,
    /// Network failure, non-success status, or undecodable body.
    TransportFailure,
}

impl GitlabError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigMissing(_) | Self::UrlError(_) => ErrorKind::Configuration,
            Self::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            Self::RequestConstruction(_) => ErrorKind::RequestConstructionFailed,
            Self::ApiError { .. }
            | Self::HttpError(_)
            | Self::ParseError(_)
            | Self::RateLimited { .. }
            | Self::Mcp(_) => ErrorKind::TransportFailure,
        }
    }

    /// HTTP status attached to the error, if the server answered.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } => *status_code,
            Self::RateLimited { .. } => Some(429),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Envelope of the failed call, if the server answered.
    #[must_use]
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::ApiError { response, .. } => response.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias for GitLab operations.
pub type Result<T> = core::result::Result<T, GitlabError>;
