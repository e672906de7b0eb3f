//! Note editing service

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::ordering;
use crate::services::SessionContext;
use crate::traits::Confirm;
use crate::types::{DeleteOutcome, Note, Notebook};

/// Note creation, editing, deletion and ordering
pub struct NoteService {
    ctx: Arc<SessionContext>,
}

impl NoteService {
    #[must_use]
    pub fn new(ctx: Arc<SessionContext>) -> Self {
        Self { ctx }
    }

    /// Creates an empty note at the top of the active folder and makes it
    /// active.
    pub async fn create_note(&self, nb: &mut Notebook) -> CoreResult<Note> {
        let folder_id = nb.active_folder_id.clone();
        let key = ordering::top_key(nb.notes_in(&folder_id).map(|n| n.order_index));
        let note = Note::new(self.ctx.user_id(), &folder_id, key);

        self.ctx.note_repository().upsert_note(&note).await?;

        log::debug!("Created note {} in folder {folder_id}", note.id);
        nb.notes.push(note.clone());
        nb.active_id = Some(note.id.clone());
        nb.sort();
        Ok(note)
    }

    /// Replaces the active note's content.
    ///
    /// Title, tags and `updated_at` are refreshed. The notebook only changes
    /// once the store accepted the write.
    pub async fn update_content(&self, nb: &mut Notebook, content: &str) -> CoreResult<Note> {
        let mut updated = nb.active_note().ok_or(CoreError::NoActiveNote)?.clone();
        updated.set_content(content);

        self.ctx.note_repository().upsert_note(&updated).await?;

        if let Some(slot) = nb.notes.iter_mut().find(|n| n.id == updated.id) {
            slot.clone_from(&updated);
        }
        nb.sort();
        Ok(updated)
    }

    /// Makes a note active, switching to its folder.
    pub fn select_note(&self, nb: &mut Notebook, id: &str) -> CoreResult<()> {
        let note = nb
            .note(id)
            .ok_or_else(|| CoreError::NoteNotFound(id.to_string()))?;
        nb.active_folder_id = note.folder_key().to_string();
        nb.active_id = Some(id.to_string());
        Ok(())
    }

    /// Deletes the active note after confirmation.
    ///
    /// Afterwards the first note of the active folder is active, if any.
    pub async fn delete_active_note(
        &self,
        nb: &mut Notebook,
        confirm: &dyn Confirm,
    ) -> CoreResult<DeleteOutcome> {
        let note = nb.active_note().ok_or(CoreError::NoActiveNote)?;
        if !confirm.confirm(&format!("Delete note \"{}\"?", note.title)) {
            return Ok(DeleteOutcome::Cancelled);
        }
        let id = note.id.clone();

        self.ctx
            .note_repository()
            .delete_note(self.ctx.user_id(), &id)
            .await?;

        log::info!("Deleted note {id}");
        nb.notes.retain(|n| n.id != id);
        nb.activate_first_note();
        Ok(DeleteOutcome::Deleted)
    }

    /// Moves the active note `delta` places within its folder.
    ///
    /// Returns `false` when the note is already at that end.
    pub async fn move_active_note(&self, nb: &mut Notebook, delta: isize) -> CoreResult<bool> {
        let active = nb.active_note().ok_or(CoreError::NoActiveNote)?;
        let active_id = active.id.clone();
        let positions = nb.note_positions(active.folder_key());

        let keys: Vec<i64> = positions.iter().map(|&p| nb.notes[p].order_index).collect();
        let index = positions
            .iter()
            .position(|&p| nb.notes[p].id == active_id)
            .ok_or(CoreError::NoActiveNote)?;

        let Some(plan) = ordering::plan_swap(&keys, index, delta) else {
            return Ok(false);
        };

        let result = self.persist_keys(nb, &positions, plan).await;
        nb.sort();
        result.map(|()| true)
    }

    /// Moves the active note to the top of another folder.
    pub async fn move_active_to_folder(
        &self,
        nb: &mut Notebook,
        folder_id: &str,
    ) -> CoreResult<Note> {
        if nb.folder(folder_id).is_none() {
            return Err(CoreError::FolderNotFound(folder_id.to_string()));
        }
        let active = nb.active_note().ok_or(CoreError::NoActiveNote)?;
        if active.folder_key() == folder_id {
            return Ok(active.clone());
        }

        let mut updated = active.clone();
        updated.folder_id = Some(folder_id.to_string());
        updated.order_index = ordering::top_key(nb.notes_in(folder_id).map(|n| n.order_index));

        self.ctx.note_repository().upsert_note(&updated).await?;

        if let Some(slot) = nb.notes.iter_mut().find(|n| n.id == updated.id) {
            slot.clone_from(&updated);
        }
        nb.sort();
        Ok(updated)
    }

    /// Writes new ordering keys one record at a time, updating memory after
    /// each accepted write.
    ///
    /// A failed write restores the records already written, so a swap never
    /// leaves two notes sharing a key.
    async fn persist_keys(
        &self,
        nb: &mut Notebook,
        positions: &[usize],
        plan: Vec<(usize, i64)>,
    ) -> CoreResult<()> {
        let mut written: Vec<(usize, Note)> = Vec::new();
        for (i, key) in plan {
            let pos = positions[i];
            let mut updated = nb.notes[pos].clone();
            updated.order_index = key;
            if let Err(e) = self.ctx.note_repository().upsert_note(&updated).await {
                self.restore(nb, written).await;
                return Err(e);
            }
            written.push((pos, std::mem::replace(&mut nb.notes[pos], updated)));
        }
        Ok(())
    }

    async fn restore(&self, nb: &mut Notebook, written: Vec<(usize, Note)>) {
        for (pos, previous) in written.into_iter().rev() {
            match self.ctx.note_repository().upsert_note(&previous).await {
                Ok(()) => nb.notes[pos] = previous,
                Err(e) => log::warn!(
                    "Failed to restore ordering key of note {}: {e}",
                    previous.id
                ),
            }
        }
    }
}
