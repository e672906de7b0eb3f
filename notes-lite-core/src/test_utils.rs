//! Test helper module
//!
//! In-memory store with failure toggles plus factory helpers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::SessionContext;
use crate::traits::{FolderRepository, NoteRepository};
use crate::types::{BackendKind, Folder, Note};

pub const TEST_USER: &str = "test-user";

// ===== MockStore =====

#[derive(Default)]
pub struct MockStore {
    notes: RwLock<HashMap<String, Note>>,
    folders: RwLock<HashMap<String, Folder>>,
    /// ids passed to upsert/delete, in call order
    writes: RwLock<Vec<String>>,
    fail_reads: RwLock<bool>,
    fail_writes: RwLock<bool>,
    /// index of the single write to fail, counted from when it was set
    fail_write_at: RwLock<Option<usize>>,
    write_count: RwLock<usize>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.write().await = fail;
    }

    pub async fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write().await = fail;
    }

    /// Fails only the `index`-th write from now on (0-based).
    pub async fn set_fail_write_at(&self, index: Option<usize>) {
        *self.fail_write_at.write().await = index;
        *self.write_count.write().await = 0;
    }

    pub async fn stored_note(&self, id: &str) -> Option<Note> {
        self.notes.read().await.get(id).cloned()
    }

    pub async fn stored_folder(&self, id: &str) -> Option<Folder> {
        self.folders.read().await.get(id).cloned()
    }

    /// Drains the recorded write log.
    pub async fn take_writes(&self) -> Vec<String> {
        std::mem::take(&mut *self.writes.write().await)
    }

    async fn check_read(&self) -> CoreResult<()> {
        if *self.fail_reads.read().await {
            return Err(CoreError::StorageError("read failed".to_string()));
        }
        Ok(())
    }

    async fn check_write(&self, id: &str) -> CoreResult<()> {
        if *self.fail_writes.read().await {
            return Err(CoreError::StorageError("write failed".to_string()));
        }
        let index = {
            let mut count = self.write_count.write().await;
            *count += 1;
            *count - 1
        };
        if *self.fail_write_at.read().await == Some(index) {
            return Err(CoreError::StorageError("write failed".to_string()));
        }
        self.writes.write().await.push(id.to_string());
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for MockStore {
    async fn list_notes(&self, _user_id: &str) -> CoreResult<Vec<Note>> {
        self.check_read().await?;
        Ok(self.notes.read().await.values().cloned().collect())
    }

    async fn upsert_note(&self, note: &Note) -> CoreResult<()> {
        self.check_write(&note.id).await?;
        self.notes
            .write()
            .await
            .insert(note.id.clone(), note.clone());
        Ok(())
    }

    async fn delete_note(&self, _user_id: &str, id: &str) -> CoreResult<()> {
        self.check_write(id).await?;
        self.notes.write().await.remove(id);
        Ok(())
    }
}

#[async_trait]
impl FolderRepository for MockStore {
    async fn list_folders(&self, _user_id: &str) -> CoreResult<Vec<Folder>> {
        self.check_read().await?;
        Ok(self.folders.read().await.values().cloned().collect())
    }

    async fn upsert_folder(&self, folder: &Folder) -> CoreResult<()> {
        self.check_write(&folder.id).await?;
        self.folders
            .write()
            .await
            .insert(folder.id.clone(), folder.clone());
        Ok(())
    }

    async fn delete_folder(&self, _user_id: &str, id: &str) -> CoreResult<()> {
        self.check_write(id).await?;
        self.folders.write().await.remove(id);
        Ok(())
    }
}

// ===== Factory functions =====

pub fn create_test_context() -> (Arc<SessionContext>, Arc<MockStore>) {
    let store = Arc::new(MockStore::new());
    let ctx = SessionContext::with_store(TEST_USER, BackendKind::Local, store.clone());
    (Arc::new(ctx), store)
}

pub async fn seed_folder(
    store: &MockStore,
    name: &str,
    parent_id: Option<&str>,
    order_index: i64,
) -> Folder {
    let folder = Folder::new(TEST_USER, name, parent_id.map(Into::into), order_index);
    store.folders.write().await.insert(folder.id.clone(), folder.clone());
    folder
}

pub async fn seed_note(store: &MockStore, content: &str, folder_id: &str, order_index: i64) -> Note {
    let mut note = Note::new(TEST_USER, folder_id, order_index);
    note.set_content(content);
    store.notes.write().await.insert(note.id.clone(), note.clone());
    note
}
