//! `SeaORM` entities for the local tables.

pub mod folder;
pub mod note;
