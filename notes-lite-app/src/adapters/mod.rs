//! Storage adapters: local `SQLite`, remote tabular API and the fallback
//! composition of both.

mod fallback;
mod remote_store;

pub use fallback::{FallbackEvent, FallbackPolicy, FallbackStore};
pub use remote_store::RemoteStore;

#[cfg(feature = "sqlite-store")]
mod sqlite;

#[cfg(feature = "sqlite-store")]
pub use sqlite::SqliteStore;
