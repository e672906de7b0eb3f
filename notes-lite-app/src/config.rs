//! Local configuration document.
//!
//! A small JSON file next to the application data. Every field is optional;
//! a file with both remote credentials switches the session to the remote
//! backend.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use notes_lite_core::error::{CoreError, CoreResult};
use notes_lite_core::types::DEFAULT_USER_ID;
use notes_lite_remote::log_sanitizer::mask_secret;
use notes_lite_remote::RemoteConfig;

use crate::adapters::FallbackPolicy;

/// Parsed configuration file
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Remote project endpoint
    #[serde(default, alias = "SUPABASE_URL")]
    pub endpoint_url: Option<String>,
    /// Remote access key
    #[serde(default, alias = "SUPABASE_ANON_KEY")]
    pub access_key: Option<String>,
    /// Owner of the remote rows, defaults to [`DEFAULT_USER_ID`]
    #[serde(default)]
    pub user_id: Option<String>,
    /// Local database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub fallback_policy: FallbackPolicy,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_retries: Option<u32>,
}

impl AppConfig {
    /// Reads and parses a configuration file.
    ///
    /// # Errors
    /// `ConfigError` if the file cannot be read, `SerializationError` if it is
    /// not valid JSON for this shape.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> CoreResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| CoreError::SerializationError(format!("Invalid config JSON: {e}")))
    }

    /// Configured user id, or the shared default.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_USER_ID)
    }

    /// Remote settings, when both credentials are present and non-blank.
    #[must_use]
    pub fn remote_config(&self) -> Option<RemoteConfig> {
        let endpoint = non_blank(self.endpoint_url.as_deref())?;
        let key = non_blank(self.access_key.as_deref())?;

        let mut config = RemoteConfig::new(endpoint, key);
        if let Some(secs) = self.request_timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = self.max_retries {
            config = config.with_max_retries(retries);
        }
        Some(config)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("access_key", &self.access_key.as_deref().map(mask_secret))
            .field("user_id", &self.user_id)
            .field("database_path", &self.database_path)
            .field("fallback_policy", &self.fallback_policy)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
