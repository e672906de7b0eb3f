//! SQLite-based local store using `SeaORM`.
//!
//! A single `SqliteStore` implements `NoteRepository` and
//! `FolderRepository` over a local `SQLite` database file. The file holds
//! one user's data, so `user_id` arguments are not used for filtering.

mod entity;
mod folder_repo;
mod migration;
mod note_repo;

use std::path::Path;

use notes_lite_core::error::{CoreError, CoreResult};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use migration::Migrator;

/// SQLite-based note and folder store.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and bring its schema up to
    /// date.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        Migrator::up(&db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;

        log::debug!("Opened local store at {}", db_path.display());
        Ok(Self { db })
    }
}

/// Parses a stored RFC3339 timestamp.
fn parse_timestamp(value: &str, field: &str) -> CoreResult<chrono::DateTime<chrono::Utc>> {
    notes_lite_core::utils::datetime::parse_rfc3339(value)
        .ok_or_else(|| CoreError::SerializationError(format!("Invalid {field}: {value}")))
}
