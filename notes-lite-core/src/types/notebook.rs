//! In-memory session state

use crate::ordering;
use crate::types::{Folder, Note, ROOT_FOLDER_ID};

/// Everything a session has loaded plus the user's current selection.
///
/// Owned by the caller and passed `&mut` to the services, which keep it
/// sorted and consistent with the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notebook {
    /// All folders, root included, in folder sort order
    pub folders: Vec<Folder>,
    /// All notes in note sort order
    pub notes: Vec<Note>,
    pub active_folder_id: String,
    pub active_id: Option<String>,
    /// Trimmed, lowercased search text
    pub query: String,
}

impl Notebook {
    /// Builds a notebook from freshly listed records.
    ///
    /// Inserts the root folder, sorts both lists and activates the first
    /// note of the root folder.
    #[must_use]
    pub fn new(user_id: &str, mut folders: Vec<Folder>, notes: Vec<Note>) -> Self {
        folders.retain(|f| !f.is_root());
        folders.push(Folder::root(user_id));

        let mut notebook = Self {
            folders,
            notes,
            active_folder_id: ROOT_FOLDER_ID.to_string(),
            active_id: None,
            query: String::new(),
        };
        notebook.sort();
        notebook.activate_first_note();
        notebook
    }

    /// Re-establishes folder and note sort order.
    pub fn sort(&mut self) {
        ordering::sort_folders(&mut self.folders);
        ordering::sort_notes(&mut self.notes);
    }

    #[must_use]
    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn active_note(&self) -> Option<&Note> {
        self.active_id.as_deref().and_then(|id| self.note(id))
    }

    /// Notes of one folder, in sort order.
    pub fn notes_in<'a>(&'a self, folder_id: &'a str) -> impl Iterator<Item = &'a Note> + 'a {
        self.notes.iter().filter(move |n| n.folder_key() == folder_id)
    }

    /// Positions in `notes` of one folder's notes, in sort order.
    #[must_use]
    pub fn note_positions(&self, folder_id: &str) -> Vec<usize> {
        self.notes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.folder_key() == folder_id)
            .map(|(i, _)| i)
            .collect()
    }

    /// Positions in `folders` of the folders sharing `parent_key`, root
    /// excluded, in sort order.
    #[must_use]
    pub fn sibling_positions(&self, parent_key: &str) -> Vec<usize> {
        self.folders
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.is_root() && f.parent_key() == parent_key)
            .map(|(i, _)| i)
            .collect()
    }

    /// Makes the first note of the active folder active, or clears the
    /// selection when the folder is empty.
    pub fn activate_first_note(&mut self) {
        let first = self
            .notes_in(&self.active_folder_id)
            .next()
            .map(|n| n.id.clone());
        self.active_id = first;
    }
}
