//! Storage layer abstraction trait definition

mod confirm;
mod folder_repository;
mod note_repository;

pub use confirm::Confirm;
pub use folder_repository::FolderRepository;
pub use note_repository::NoteRepository;

/// A store serving both notes and folders.
pub trait NoteStore: NoteRepository + FolderRepository {}

impl<T: NoteRepository + FolderRepository> NoteStore for T {}
