//! Folder persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Folder;

/// Folder storage Trait
///
/// Same contract as [`NoteRepository`](super::NoteRepository). The root
/// folder is never passed to a repository.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// List all folders of a user, in no particular order
    async fn list_folders(&self, user_id: &str) -> CoreResult<Vec<Folder>>;

    /// Insert or replace the whole record
    async fn upsert_folder(&self, folder: &Folder) -> CoreResult<()>;

    /// Delete a folder by id
    async fn delete_folder(&self, user_id: &str, id: &str) -> CoreResult<()>;
}
