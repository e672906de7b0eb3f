//! notes-lite Core Library
//!
//! Platform-independent note logic:
//! - Note and folder records, the in-memory [`Notebook`] session state
//! - Title / tag / snippet derivation from rich-text content
//! - Manual ordering and the folder tree
//! - Services operating on a [`SessionContext`]
//!
//! Storage is abstracted through the [`NoteRepository`] and
//! [`FolderRepository`] traits; the app layer injects a local or remote
//! implementation.

pub mod content;
pub mod error;
pub mod folder_tree;
pub mod ordering;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::SessionContext;
pub use traits::{Confirm, FolderRepository, NoteRepository, NoteStore};
pub use types::{BackendKind, DeleteOutcome, Folder, Note, Notebook};
