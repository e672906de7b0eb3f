//! Backend selection.
//!
//! Decided once at startup from the configuration file. Selection never
//! fails: every problem with the configuration yields the local backend
//! together with the reason.

use std::path::Path;

use serde::Serialize;

use notes_lite_core::error::CoreError;
use notes_lite_core::types::BackendKind;
use notes_lite_remote::RemoteClient;

use crate::config::AppConfig;

/// Why the local backend was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LocalReason {
    /// No configuration file
    ConfigMissing,
    /// The file exists but could not be read
    ConfigUnreadable,
    /// The file is not valid configuration JSON
    ConfigMalformed,
    /// Endpoint or access key missing or blank
    CredentialsIncomplete,
    /// The remote client rejected the settings
    ClientInit,
}

impl std::fmt::Display for LocalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::ConfigMissing => "no configuration file",
            Self::ConfigUnreadable => "configuration file unreadable",
            Self::ConfigMalformed => "configuration file malformed",
            Self::CredentialsIncomplete => "remote credentials incomplete",
            Self::ClientInit => "remote client initialization failed",
        };
        f.write_str(text)
    }
}

/// The backend serving this session
#[derive(Debug, Clone)]
pub enum BackendSelection {
    Remote { client: RemoteClient },
    Local { reason: LocalReason },
}

impl BackendSelection {
    #[must_use]
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Remote { .. } => BackendKind::Remote,
            Self::Local { .. } => BackendKind::Local,
        }
    }
}

/// Chooses the backend from the configuration file at `config_path`.
pub fn select_backend(config_path: &Path) -> BackendSelection {
    resolve(config_path).1
}

/// Loads the configuration (default when unusable) and selects the backend.
pub fn resolve(config_path: &Path) -> (AppConfig, BackendSelection) {
    if !config_path.exists() {
        log::info!(
            "No configuration at {}, using local backend",
            config_path.display()
        );
        return (
            AppConfig::default(),
            BackendSelection::Local {
                reason: LocalReason::ConfigMissing,
            },
        );
    }

    match AppConfig::load(config_path) {
        Ok(config) => {
            let selection = select_from_config(&config);
            (config, selection)
        }
        Err(e) => {
            let reason = match e {
                CoreError::SerializationError(_) => LocalReason::ConfigMalformed,
                _ => LocalReason::ConfigUnreadable,
            };
            log::warn!("Ignoring configuration ({reason}): {e}");
            (AppConfig::default(), BackendSelection::Local { reason })
        }
    }
}

/// Chooses the backend from already parsed configuration.
pub fn select_from_config(config: &AppConfig) -> BackendSelection {
    let Some(remote) = config.remote_config() else {
        log::info!("Remote credentials not configured, using local backend");
        return BackendSelection::Local {
            reason: LocalReason::CredentialsIncomplete,
        };
    };

    match RemoteClient::new(&remote) {
        Ok(client) => {
            log::info!("Using remote backend at {}", client.endpoint());
            BackendSelection::Remote { client }
        }
        Err(e) => {
            log::warn!("Remote client initialization failed, using local backend: {e}");
            BackendSelection::Local {
                reason: LocalReason::ClientInit,
            }
        }
    }
}
