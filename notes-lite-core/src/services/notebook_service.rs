//! Notebook loading service

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::SessionContext;
use crate::types::Notebook;

/// Loads the session state from the backend
pub struct NotebookService {
    ctx: Arc<SessionContext>,
}

impl NotebookService {
    #[must_use]
    pub fn new(ctx: Arc<SessionContext>) -> Self {
        Self { ctx }
    }

    /// Lists folders and notes and builds a sorted [`Notebook`] with the
    /// root folder active.
    pub async fn load(&self) -> CoreResult<Notebook> {
        let user_id = self.ctx.user_id();
        let folders = self.ctx.folder_repository().list_folders(user_id).await?;
        let notes = self.ctx.note_repository().list_notes(user_id).await?;

        log::debug!(
            "Loaded {} folders and {} notes from {} backend",
            folders.len(),
            notes.len(),
            self.ctx.backend()
        );

        Ok(Notebook::new(user_id, folders, notes))
    }
}
