//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export remote client error type
pub use notes_lite_remote::RemoteError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Folder not found
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    /// An operation on the active note was requested with no note selected
    #[error("No note is selected")]
    NoActiveNote,

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be used
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Remote backend error
    #[error("{0}")]
    Remote(#[from] RemoteError),
}

impl CoreError {
    /// Whether the error is caused by user input or missing records rather
    /// than a failing backend. Used for log levels: `warn` when `true`,
    /// `error` otherwise.
    ///
    /// **Keep in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NoteNotFound(_)
            | Self::FolderNotFound(_)
            | Self::NoActiveNote
            | Self::ValidationError(_)
            | Self::ConfigError(_) => true,
            Self::Remote(e) => e.is_expected(),
            _ => false,
        }
    }

    /// Whether the error originated in the remote backend.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
