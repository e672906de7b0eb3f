//! Remote-first store that can fall back to the local store.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use notes_lite_core::error::{CoreError, CoreResult};
use notes_lite_core::traits::{FolderRepository, NoteRepository, NoteStore};
use notes_lite_core::types::{Folder, Note};

/// What to do when the primary store fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackPolicy {
    /// Repeat a failed listing or write against the secondary store
    #[default]
    LocalOnFailure,
    /// Return the primary error
    Propagate,
}

/// A primary failure that was served by the secondary store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackEvent {
    /// Repository operation, e.g. `upsert_folder`
    pub operation: &'static str,
    /// Primary error message
    pub error: String,
}

/// Applies one [`FallbackPolicy`] to listings and writes of notes and
/// folders alike.
///
/// Deletes never fall back: the secondary store does not hold the primary's
/// rows, so a delete there would report success while the record survives
/// remotely. A failed delete always returns the primary error.
pub struct FallbackStore {
    primary: Arc<dyn NoteStore>,
    secondary: Arc<dyn NoteStore>,
    policy: FallbackPolicy,
    events: RwLock<Vec<FallbackEvent>>,
}

impl FallbackStore {
    #[must_use]
    pub fn new(
        primary: Arc<dyn NoteStore>,
        secondary: Arc<dyn NoteStore>,
        policy: FallbackPolicy,
    ) -> Self {
        Self {
            primary,
            secondary,
            policy,
            events: RwLock::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Fallbacks so far, oldest first.
    pub async fn events(&self) -> Vec<FallbackEvent> {
        self.events.read().await.clone()
    }

    /// Decides whether a failed primary call continues on the secondary.
    async fn on_primary_error(&self, operation: &'static str, error: CoreError) -> CoreResult<()> {
        match self.policy {
            FallbackPolicy::Propagate => Err(error),
            FallbackPolicy::LocalOnFailure => {
                log::warn!("{operation} failed on remote store, using local store: {error}");
                self.events.write().await.push(FallbackEvent {
                    operation,
                    error: error.to_string(),
                });
                Ok(())
            }
        }
    }

    /// Outcome of removing a record the secondary may hold from an earlier
    /// fallback. The primary already deleted it, so a failure is only logged.
    fn log_secondary_delete(operation: &'static str, result: CoreResult<()>) {
        if let Err(e) = result {
            log::warn!("{operation} succeeded remotely but not in the local store: {e}");
        }
    }
}

#[async_trait]
impl NoteRepository for FallbackStore {
    async fn list_notes(&self, user_id: &str) -> CoreResult<Vec<Note>> {
        match self.primary.list_notes(user_id).await {
            Ok(notes) => Ok(notes),
            Err(e) => {
                self.on_primary_error("list_notes", e).await?;
                self.secondary.list_notes(user_id).await
            }
        }
    }

    async fn upsert_note(&self, note: &Note) -> CoreResult<()> {
        match self.primary.upsert_note(note).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.on_primary_error("upsert_note", e).await?;
                self.secondary.upsert_note(note).await
            }
        }
    }

    async fn delete_note(&self, user_id: &str, id: &str) -> CoreResult<()> {
        self.primary.delete_note(user_id, id).await?;
        Self::log_secondary_delete("delete_note", self.secondary.delete_note(user_id, id).await);
        Ok(())
    }
}

#[async_trait]
impl FolderRepository for FallbackStore {
    async fn list_folders(&self, user_id: &str) -> CoreResult<Vec<Folder>> {
        match self.primary.list_folders(user_id).await {
            Ok(folders) => Ok(folders),
            Err(e) => {
                self.on_primary_error("list_folders", e).await?;
                self.secondary.list_folders(user_id).await
            }
        }
    }

    async fn upsert_folder(&self, folder: &Folder) -> CoreResult<()> {
        match self.primary.upsert_folder(folder).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.on_primary_error("upsert_folder", e).await?;
                self.secondary.upsert_folder(folder).await
            }
        }
    }

    async fn delete_folder(&self, user_id: &str, id: &str) -> CoreResult<()> {
        self.primary.delete_folder(user_id, id).await?;
        Self::log_secondary_delete(
            "delete_folder",
            self.secondary.delete_folder(user_id, id).await,
        );
        Ok(())
    }
}
