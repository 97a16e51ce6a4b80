//! Error types for the query cycle and configuration loading
//!
//! Every failure of a submission is folded into a single [`QueryError`] whose
//! `Display` output is the message shown to the user. The variant records
//! which stage of the cycle failed so callers can still branch on it.

use std::path::PathBuf;

use thiserror::Error;

/// Which stage of a submission failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The service answered with an explicit `error` field
    Service,
    /// The request never produced a response body
    Transport,
    /// A body arrived but was not JSON
    InvalidBody,
    /// JSON arrived but matched neither the error nor the success shape
    MalformedResponse,
}

impl ErrorKind {
    /// Short label used in logs and the session history
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Service => "service",
            ErrorKind::Transport => "transport",
            ErrorKind::InvalidBody => "invalid-body",
            ErrorKind::MalformedResponse => "malformed-response",
        }
    }
}

/// Failure of a single submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Message reported by the service, surfaced verbatim
    #[error("{message}")]
    Service {
        /// Text of the `error` field
        message: String,
    },

    /// Connection, DNS, timeout or I/O failure
    #[error("{message}")]
    Transport {
        /// Description produced by the transport
        message: String,
    },

    /// Response body could not be parsed as JSON
    #[error("{message}")]
    InvalidBody {
        /// Parser description, prefixed with the HTTP status when it was not 2xx
        message: String,
    },

    /// Response lacked `error` and one of the required success fields
    #[error("Malformed response: missing or invalid `{field}`")]
    MalformedResponse {
        /// Name of the first offending field
        field: &'static str,
    },
}

impl QueryError {
    /// Create a service error
    pub fn service(message: impl Into<String>) -> Self {
        QueryError::Service {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        QueryError::Transport {
            message: message.into(),
        }
    }

    /// Stage that failed
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::Service { .. } => ErrorKind::Service,
            QueryError::Transport { .. } => ErrorKind::Transport,
            QueryError::InvalidBody { .. } => ErrorKind::InvalidBody,
            QueryError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
        }
    }
}

/// Failure to load or validate a [`crate::ClientConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Extension is neither `.toml` nor `.json`
    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(PathBuf),

    /// File contents did not deserialize
    #[error("Failed to parse {format} config: {message}")]
    Parse {
        /// Format that was attempted
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// Endpoint is not an absolute http(s) URL
    #[error("Invalid endpoint '{0}': expected an http:// or https:// URL")]
    InvalidEndpoint(String),
}

/// Result alias for query operations
pub type Result<T, E = QueryError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_is_verbatim() {
        let err = QueryError::service("Invalid SQL query");
        assert_eq!(err.to_string(), "Invalid SQL query");
        assert_eq!(err.kind(), ErrorKind::Service);
    }

    #[test]
    fn test_malformed_names_field() {
        let err = QueryError::MalformedResponse {
            field: "generated_sql",
        };
        assert_eq!(
            err.to_string(),
            "Malformed response: missing or invalid `generated_sql`"
        );
        assert_eq!(err.kind().label(), "malformed-response");
    }
}
