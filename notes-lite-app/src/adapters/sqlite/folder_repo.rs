//! `FolderRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, EntityTrait};

use notes_lite_core::error::{CoreError, CoreResult};
use notes_lite_core::traits::FolderRepository;
use notes_lite_core::types::Folder;

use super::entity::folder;
use super::SqliteStore;

impl From<folder::Model> for Folder {
    fn from(row: folder::Model) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            parent_id: row.parent_id,
            order_index: row.order_index,
        }
    }
}

fn folder_to_active_model(folder: &Folder) -> folder::ActiveModel {
    folder::ActiveModel {
        id: Set(folder.id.clone()),
        user_id: Set(folder.user_id.clone()),
        name: Set(folder.name.clone()),
        parent_id: Set(folder.parent_id.clone()),
        order_index: Set(folder.order_index),
    }
}

#[async_trait]
impl FolderRepository for SqliteStore {
    async fn list_folders(&self, _user_id: &str) -> CoreResult<Vec<Folder>> {
        let rows = folder::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query folders: {e}")))?;

        Ok(rows.into_iter().map(Folder::from).collect())
    }

    async fn upsert_folder(&self, folder: &Folder) -> CoreResult<()> {
        folder::Entity::insert(folder_to_active_model(folder))
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(folder::Column::Id)
                    .update_columns([
                        folder::Column::UserId,
                        folder::Column::Name,
                        folder::Column::ParentId,
                        folder::Column::OrderIndex,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save folder: {e}")))?;

        Ok(())
    }

    async fn delete_folder(&self, _user_id: &str, id: &str) -> CoreResult<()> {
        folder::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete folder: {e}")))?;

        Ok(())
    }
}
