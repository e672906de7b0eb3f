//! `SeaORM` migrations for `SqliteStore`.
//!
//! Applied in order on every open; each one keeps existing rows.

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_notes_table;
mod m20250301_000002_create_folders_table;
mod m20250301_000003_add_note_placement;

/// Migration entrypoint used by `sea_orm_migration::MigratorTrait`.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_notes_table::Migration),
            Box::new(m20250301_000002_create_folders_table::Migration),
            Box::new(m20250301_000003_add_note_placement::Migration),
        ]
    }
}
