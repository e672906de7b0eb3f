//! Folder management service

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::folder_tree::{FolderTree, TreeEntry};
use crate::ordering;
use crate::services::SessionContext;
use crate::traits::Confirm;
use crate::types::{DeleteOutcome, Folder, Notebook, ROOT_FOLDER_ID};

/// Maximum folder name length in characters
pub const FOLDER_NAME_MAX_CHARS: usize = 120;

/// Folder management service
pub struct FolderService {
    ctx: Arc<SessionContext>,
}

impl FolderService {
    #[must_use]
    pub fn new(ctx: Arc<SessionContext>) -> Self {
        Self { ctx }
    }

    /// Creates a folder at the bottom of the active folder's children.
    ///
    /// When the root folder is active the new folder is top level.
    pub async fn create_folder(&self, nb: &mut Notebook, name: &str) -> CoreResult<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError(
                "Folder name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > FOLDER_NAME_MAX_CHARS {
            return Err(CoreError::ValidationError(format!(
                "Folder name cannot exceed {FOLDER_NAME_MAX_CHARS} characters"
            )));
        }

        let parent_id = (nb.active_folder_id != ROOT_FOLDER_ID).then(|| nb.active_folder_id.clone());
        let parent_key = parent_id.as_deref().unwrap_or("");
        let key = ordering::bottom_key(
            nb.sibling_positions(parent_key)
                .into_iter()
                .map(|p| nb.folders[p].order_index),
        );
        let folder = Folder::new(self.ctx.user_id(), name, parent_id, key);

        self.ctx.folder_repository().upsert_folder(&folder).await?;

        log::debug!("Created folder {} ({})", folder.id, folder.name);
        nb.folders.push(folder.clone());
        nb.sort();
        Ok(folder)
    }

    /// Makes a folder active along with its first note.
    pub fn select_folder(&self, nb: &mut Notebook, id: &str) -> CoreResult<()> {
        if nb.folder(id).is_none() {
            return Err(CoreError::FolderNotFound(id.to_string()));
        }
        nb.active_folder_id = id.to_string();
        nb.activate_first_note();
        Ok(())
    }

    /// Moves a folder `delta` places among its siblings.
    ///
    /// Returns `false` when it is already at that end.
    pub async fn move_folder(&self, nb: &mut Notebook, id: &str, delta: isize) -> CoreResult<bool> {
        let folder = Self::existing_non_root(nb, id, "moved")?;
        let positions = nb.sibling_positions(folder.parent_key());

        let keys: Vec<i64> = positions.iter().map(|&p| nb.folders[p].order_index).collect();
        let index = positions
            .iter()
            .position(|&p| nb.folders[p].id == id)
            .ok_or_else(|| CoreError::FolderNotFound(id.to_string()))?;

        let Some(plan) = ordering::plan_swap(&keys, index, delta) else {
            return Ok(false);
        };

        let result = self.persist_keys(nb, &positions, plan).await;
        nb.sort();
        result.map(|()| true)
    }

    /// Deletes an empty folder after confirmation.
    ///
    /// Folders still holding notes or subfolders are refused. When the
    /// deleted folder was active its parent becomes active.
    pub async fn delete_folder(
        &self,
        nb: &mut Notebook,
        id: &str,
        confirm: &dyn Confirm,
    ) -> CoreResult<DeleteOutcome> {
        let folder = Self::existing_non_root(nb, id, "deleted")?;
        if nb.notes_in(id).next().is_some() {
            return Err(CoreError::ValidationError(format!(
                "Folder '{}' still contains notes",
                folder.name
            )));
        }
        if nb.folders.iter().any(|f| f.parent_key() == id) {
            return Err(CoreError::ValidationError(format!(
                "Folder '{}' still contains folders",
                folder.name
            )));
        }
        if !confirm.confirm(&format!("Delete folder \"{}\"?", folder.name)) {
            return Ok(DeleteOutcome::Cancelled);
        }
        let parent = folder
            .parent_id
            .clone()
            .unwrap_or_else(|| ROOT_FOLDER_ID.to_string());

        self.ctx
            .folder_repository()
            .delete_folder(self.ctx.user_id(), id)
            .await?;

        log::info!("Deleted folder {id}");
        nb.folders.retain(|f| f.id != id);
        if nb.active_folder_id == id {
            nb.active_folder_id = if nb.folder(&parent).is_some() {
                parent
            } else {
                ROOT_FOLDER_ID.to_string()
            };
            nb.activate_first_note();
        }
        Ok(DeleteOutcome::Deleted)
    }

    /// Folders in display order with their depth.
    #[must_use]
    pub fn tree<'a>(&self, nb: &'a Notebook) -> Vec<TreeEntry<'a>> {
        FolderTree::new(&nb.folders).flatten()
    }

    /// Number of notes per folder id. Every folder has an entry.
    #[must_use]
    pub fn note_counts(&self, nb: &Notebook) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> =
            nb.folders.iter().map(|f| (f.id.clone(), 0)).collect();
        for note in &nb.notes {
            *counts.entry(note.folder_key().to_string()).or_default() += 1;
        }
        counts
    }

    fn existing_non_root<'a>(nb: &'a Notebook, id: &str, action: &str) -> CoreResult<&'a Folder> {
        if id == ROOT_FOLDER_ID {
            return Err(CoreError::ValidationError(format!(
                "The root folder cannot be {action}"
            )));
        }
        nb.folder(id)
            .ok_or_else(|| CoreError::FolderNotFound(id.to_string()))
    }

    /// Same contract as the note variant: on failure the folders already
    /// written get their previous keys back.
    async fn persist_keys(
        &self,
        nb: &mut Notebook,
        positions: &[usize],
        plan: Vec<(usize, i64)>,
    ) -> CoreResult<()> {
        let mut written: Vec<(usize, Folder)> = Vec::new();
        for (i, key) in plan {
            let pos = positions[i];
            let mut updated = nb.folders[pos].clone();
            updated.order_index = key;
            if let Err(e) = self.ctx.folder_repository().upsert_folder(&updated).await {
                self.restore(nb, written).await;
                return Err(e);
            }
            written.push((pos, std::mem::replace(&mut nb.folders[pos], updated)));
        }
        Ok(())
    }

    async fn restore(&self, nb: &mut Notebook, written: Vec<(usize, Folder)>) {
        for (pos, previous) in written.into_iter().rev() {
            match self.ctx.folder_repository().upsert_folder(&previous).await {
                Ok(()) => nb.folders[pos] = previous,
                Err(e) => log::warn!(
                    "Failed to restore ordering key of folder {}: {e}",
                    previous.id
                ),
            }
        }
    }
}
