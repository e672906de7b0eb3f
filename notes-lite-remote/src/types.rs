//! Remote client configuration and query filters

use std::time::Duration;

use crate::utils::log_sanitizer::mask_secret;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the remote tabular backend.
#[derive(Clone)]
pub struct RemoteConfig {
    /// Project endpoint, e.g. `https://xyz.supabase.co`.
    pub endpoint_url: String,
    /// Access key sent as both `apikey` and bearer token.
    pub access_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Retries for transient failures. `0` disables retrying.
    pub max_retries: u32,
}

impl RemoteConfig {
    #[must_use]
    pub fn new(endpoint_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            access_key: access_key.into(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_retries: 0,
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("access_key", &mask_secret(&self.access_key))
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Equality filter on a column (`column=eq.value`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Query pair in the backend's filter syntax.
    pub(crate) fn to_query_pair(&self) -> (String, String) {
        (self.column.clone(), format!("eq.{}", self.value))
    }
}
