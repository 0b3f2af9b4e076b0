//! Error taxonomy shared by every layer of the status pipeline.

use serde_json::{json, Value};

use crate::types::Entity;

/// All errors that can occur while fetching, caching, or querying status data.
#[derive(thiserror::Error, Debug)]
pub enum StatusError {
    #[error("API request error: {url}: {message}")]
    Request { url: String, message: String },

    #[error("API request timeout after {timeout_ms}ms: {url}")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("API network error ({code}): {url}")]
    Network {
        url: String,
        code: String,
        message: String,
    },

    #[error("API HTTP error: {status} {url}")]
    Http {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Scraper error: {message}")]
    Scraper {
        message: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Raised by the data-access layer once every source for `entity` failed.
    ///
    /// `source` is the last failure. When the fallback ran and also failed,
    /// `primary` keeps the API failure that triggered it.
    #[error("Unable to fetch {entity} from API or scraper")]
    DataUnavailable {
        entity: Entity,
        #[source]
        source: Box<StatusError>,
        primary: Option<Box<StatusError>>,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cache error for key {key}: {message}")]
    Cache { key: String, message: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Configuration validation failed: {}", .0.join("; "))]
    Configuration(Vec<String>),
}

impl StatusError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            StatusError::Request { .. } => "REQUEST_ERROR",
            StatusError::Timeout { .. } => "TIMEOUT_ERROR",
            StatusError::Network { .. } => "NETWORK_ERROR",
            StatusError::Http { .. } => "HTTP_ERROR",
            StatusError::Scraper { .. } => "SCRAPER_ERROR",
            StatusError::DataUnavailable { .. } => "DATA_UNAVAILABLE",
            StatusError::Validation(_) => "VALIDATION_ERROR",
            StatusError::Cache { .. } => "CACHE_ERROR",
            StatusError::NotFound { .. } => "NOT_FOUND",
            StatusError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// HTTP-style status code for the failure class.
    pub fn status_code(&self) -> u16 {
        match self {
            StatusError::Request { .. }
            | StatusError::Network { .. }
            | StatusError::Http { .. }
            | StatusError::Scraper { .. } => 502,
            StatusError::Timeout { .. } => 504,
            StatusError::DataUnavailable { .. } => 503,
            StatusError::Validation(_) => 400,
            StatusError::NotFound { .. } => 404,
            StatusError::Cache { .. } | StatusError::Configuration(_) => 500,
        }
    }

    /// Structured context for the error, suitable for returning to clients.
    pub fn details(&self) -> Value {
        match self {
            StatusError::Request { url, message } => json!({ "url": url, "message": message }),
            StatusError::Timeout { url, timeout_ms } => {
                json!({ "url": url, "timeout_ms": timeout_ms })
            }
            StatusError::Network { url, code, message } => {
                json!({ "url": url, "code": code, "message": message })
            }
            StatusError::Http { url, status, body } => {
                json!({ "url": url, "status": status, "body": body })
            }
            StatusError::Scraper { cause, .. } => json!({ "cause": cause.to_string() }),
            StatusError::DataUnavailable {
                entity,
                source,
                primary,
            } => {
                let mut details = json!({
                    "entity": entity.to_string(),
                    "cause": source.summary(),
                });
                if let Some(primary) = primary {
                    details["primary"] = primary.summary();
                }
                details
            }
            StatusError::Validation(message) => json!({ "message": message }),
            StatusError::Cache { key, message } => json!({ "key": key, "message": message }),
            StatusError::NotFound { kind, id } => json!({ "kind": kind, "id": id }),
            StatusError::Configuration(errors) => json!({ "errors": errors }),
        }
    }

    /// Code, message, and details in one JSON object.
    pub fn summary(&self) -> Value {
        json!({
            "code": self.code(),
            "message": self.to_string(),
            "details": self.details(),
        })
    }

    pub(crate) fn scraper(
        message: impl Into<String>,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        StatusError::Scraper {
            message: message.into(),
            cause: cause.into(),
        }
    }
}

/// Convenience result type.
pub type StatusResult<T> = Result<T, StatusError>;
