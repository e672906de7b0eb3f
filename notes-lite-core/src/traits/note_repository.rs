//! Note persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Note;

/// Note storage Trait
///
/// Platform implementation:
/// - Local: `SqliteStore` (`SeaORM`)
/// - Remote: `RemoteStore` (tabular REST backend)
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List all notes of a user, in no particular order
    ///
    /// The local store holds a single user and ignores `user_id`.
    async fn list_notes(&self, user_id: &str) -> CoreResult<Vec<Note>>;

    /// Insert or replace the whole record
    async fn upsert_note(&self, note: &Note) -> CoreResult<()>;

    /// Delete a note by id
    ///
    /// # Arguments
    /// * `user_id` - owner, used by stores that share a table across users
    /// * `id` - Note ID
    async fn delete_note(&self, user_id: &str, id: &str) -> CoreResult<()>;
}
