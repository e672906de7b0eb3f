use serde::{Deserialize, Serialize};

/// Unified error type for all remote backend operations.
///
/// Variants carry the table involved where the failure is table specific,
/// plus the raw message returned by the backend when one was available.
/// All variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API rate limit exceeded
///
/// Retries are disabled unless [`RemoteConfig::with_max_retries`](crate::RemoteConfig::with_max_retries)
/// is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum RemoteError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The access key was rejected (HTTP 401).
    InvalidCredentials {
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The key is valid but may not touch this table (HTTP 403 or row-level security).
    PermissionDenied {
        /// Table the request targeted.
        table: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The table does not exist on the backend (HTTP 404).
    TableNotFound {
        /// Table the request targeted.
        table: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// A constraint rejected the write (HTTP 409).
    Conflict {
        /// Table the request targeted.
        table: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The backend failed to process a well-formed request (HTTP 5xx other than 502-504).
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The client configuration is unusable (bad endpoint URL, empty key, ...).
    InvalidConfig {
        /// Configuration field at fault.
        field: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Failed to parse the backend's response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error status from the backend.
    Unknown {
        /// HTTP status code.
        status: u16,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl RemoteError {
    /// Whether the failure comes from configuration or data the user controls
    /// (rejected key, missing table, constraint violation) rather than from the
    /// backend misbehaving. Callers log `warn` for `true` and `error` otherwise.
    ///
    /// **Keep in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::TableNotFound { .. }
                | Self::Conflict { .. }
                | Self::InvalidConfig { .. }
        )
    }

    /// Whether the failure is transient and the request may be retried as-is.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::InvalidCredentials { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Invalid credentials: {msg}")
                } else {
                    write!(f, "Invalid credentials")
                }
            }
            Self::PermissionDenied { table, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Permission denied on '{table}': {msg}")
                } else {
                    write!(f, "Permission denied on '{table}'")
                }
            }
            Self::TableNotFound { table, .. } => write!(f, "Table '{table}' not found"),
            Self::Conflict { table, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Conflict on '{table}': {msg}")
                } else {
                    write!(f, "Conflict on '{table}'")
                }
            }
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "Rate limited")
                }
            }
            Self::ServerError {
                status,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "Server error (HTTP {status}): {msg}")
                } else {
                    write!(f, "Server error (HTTP {status})")
                }
            }
            Self::InvalidConfig { field, detail } => {
                write!(f, "Invalid configuration '{field}': {detail}")
            }
            Self::ParseError { detail } => write!(f, "Parse error: {detail}"),
            Self::SerializationError { detail } => write!(f, "Serialization error: {detail}"),
            Self::Unknown {
                status,
                raw_message,
                ..
            } => write!(f, "HTTP {status}: {raw_message}"),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Convenience type alias for `Result<T, RemoteError>`.
pub type Result<T> = std::result::Result<T, RemoteError>;
