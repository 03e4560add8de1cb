//! Structured error types for the mapping client.
//!
//! Two layers: [`TransportError`] describes why a single batch exchange failed and
//! ends up in that batch's outcome; [`FigiError`] covers configuration and
//! validation failures returned to the caller.

use std::fmt;
use thiserror::Error;

/// Human-readable classification of a non-2xx status returned by the mapping service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCause {
    /// 400
    BadRequestBody,
    /// 401
    InvalidApiKey,
    /// 404
    BadPath,
    /// 405
    BadMethod,
    /// 406
    UnsupportedAcceptType,
    /// 413
    TooManyIdentifiers,
    /// 429
    RateLimited,
    /// 500
    ServerError,
    /// Any status the service does not document.
    Unclassified,
}

impl StatusCause {
    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequestBody,
            401 => Self::InvalidApiKey,
            404 => Self::BadPath,
            405 => Self::BadMethod,
            406 => Self::UnsupportedAcceptType,
            413 => Self::TooManyIdentifiers,
            429 => Self::RateLimited,
            500 => Self::ServerError,
            _ => Self::Unclassified,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::BadRequestBody => "the request body is not an array",
            Self::InvalidApiKey => "the API key is invalid",
            Self::BadPath => "the requested path is invalid",
            Self::BadMethod => "the HTTP verb is not POST",
            Self::UnsupportedAcceptType => "the server does not support the requested Accept type",
            Self::TooManyIdentifiers => {
                "the request exceeds the max number of identifiers supported in one request"
            }
            Self::RateLimited => "too many requests",
            Self::ServerError => "internal server error",
            Self::Unclassified => "unexpected response status",
        }
    }
}

impl fmt::Display for StatusCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Why one batch exchange produced no records.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP {status}: {cause}")]
    Status { status: u16, cause: StatusCause },

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to encode request body: {0}")]
    Encode(String),

    #[error("response body is not an array of objects: {0}")]
    Decode(String),
}

impl TransportError {
    /// The status classification, when the failure came from an HTTP status.
    pub fn status_cause(&self) -> Option<StatusCause> {
        match self {
            Self::Status { cause, .. } => Some(*cause),
            _ => None,
        }
    }
}

/// Errors surfaced by the client API.
#[derive(Debug, Error)]
pub enum FigiError {
    #[error("unsupported API version '{0}' (expected v1 or v2)")]
    UnsupportedApiVersion(String),

    #[error("unknown identifier type '{0}'")]
    UnknownIdType(String),

    #[error("batch size {0} out of range (1..=100)")]
    BatchSizeOutOfRange(usize),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
