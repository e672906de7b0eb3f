//! Business logic service layer

mod folder_service;
mod note_service;
mod notebook_service;
mod search_service;

pub use folder_service::FolderService;
pub use note_service::NoteService;
pub use notebook_service::NotebookService;
pub use search_service::SearchService;

use std::sync::Arc;

use crate::traits::{FolderRepository, NoteRepository, NoteStore};
use crate::types::BackendKind;

/// Session context - holds everything a service depends on
///
/// Built once at startup by the platform layer, which decides the backend and
/// injects the matching repositories.
pub struct SessionContext {
    user_id: String,
    backend: BackendKind,
    note_repository: Arc<dyn NoteRepository>,
    folder_repository: Arc<dyn FolderRepository>,
}

impl SessionContext {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        backend: BackendKind,
        note_repository: Arc<dyn NoteRepository>,
        folder_repository: Arc<dyn FolderRepository>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            backend,
            note_repository,
            folder_repository,
        }
    }

    /// Uses one store for both notes and folders.
    #[must_use]
    pub fn with_store<S>(user_id: impl Into<String>, backend: BackendKind, store: Arc<S>) -> Self
    where
        S: NoteStore + 'static,
    {
        Self::new(user_id, backend, store.clone(), store)
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    #[must_use]
    pub fn note_repository(&self) -> &Arc<dyn NoteRepository> {
        &self.note_repository
    }

    #[must_use]
    pub fn folder_repository(&self) -> &Arc<dyn FolderRepository> {
        &self.folder_repository
    }
}
