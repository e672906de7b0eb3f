//! Type definition module

mod folder;
mod note;
mod notebook;

pub use folder::Folder;
pub use note::Note;
pub use notebook::Notebook;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of the implicit root folder
pub const ROOT_FOLDER_ID: &str = "root";

/// Display name of the root folder
pub const ROOT_FOLDER_NAME: &str = "My Notes";

/// User id used when the configuration names none
pub const DEFAULT_USER_ID: &str = "public-user";

/// Which persistence target serves the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackendKind {
    Local,
    Remote,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Result of a delete that needs user confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; nothing was touched
    Cancelled,
}

/// Listing row for a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub updated_at: DateTime<Utc>,
}
