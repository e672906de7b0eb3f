//! `NoteRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, EntityTrait};

use notes_lite_core::error::{CoreError, CoreResult};
use notes_lite_core::traits::NoteRepository;
use notes_lite_core::types::Note;

use super::entity::note;
use super::{parse_timestamp, SqliteStore};

impl note::Model {
    /// Convert a `SeaORM` row model into a domain `Note`.
    fn into_note(self) -> CoreResult<Note> {
        let tags: Vec<String> = serde_json::from_str(&self.tags)
            .map_err(|e| CoreError::SerializationError(format!("Invalid tags JSON: {e}")))?;

        Ok(Note {
            created_at: parse_timestamp(&self.created_at, "created_at")?,
            updated_at: parse_timestamp(&self.updated_at, "updated_at")?,
            id: self.id,
            user_id: self.user_id,
            folder_id: self.folder_id,
            title: self.title,
            content: self.content,
            tags,
            order_index: self.order_index,
        })
    }
}

/// Convert a domain `Note` into a `SeaORM` active model for upsert.
fn note_to_active_model(note: &Note) -> CoreResult<note::ActiveModel> {
    let tags_json = serde_json::to_string(&note.tags)
        .map_err(|e| CoreError::SerializationError(e.to_string()))?;

    Ok(note::ActiveModel {
        id: Set(note.id.clone()),
        user_id: Set(note.user_id.clone()),
        folder_id: Set(note.folder_id.clone()),
        title: Set(note.title.clone()),
        content: Set(note.content.clone()),
        tags: Set(tags_json),
        order_index: Set(note.order_index),
        created_at: Set(note.created_at.to_rfc3339()),
        updated_at: Set(note.updated_at.to_rfc3339()),
    })
}

#[async_trait]
impl NoteRepository for SqliteStore {
    async fn list_notes(&self, _user_id: &str) -> CoreResult<Vec<Note>> {
        let rows = note::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query notes: {e}")))?;

        rows.into_iter().map(note::Model::into_note).collect()
    }

    async fn upsert_note(&self, note: &Note) -> CoreResult<()> {
        let active_model = note_to_active_model(note)?;

        note::Entity::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(note::Column::Id)
                    .update_columns([
                        note::Column::UserId,
                        note::Column::FolderId,
                        note::Column::Title,
                        note::Column::Content,
                        note::Column::Tags,
                        note::Column::OrderIndex,
                        note::Column::CreatedAt,
                        note::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save note: {e}")))?;

        Ok(())
    }

    async fn delete_note(&self, _user_id: &str, id: &str) -> CoreResult<()> {
        note::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete note: {e}")))?;

        Ok(())
    }
}
