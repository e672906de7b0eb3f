//! # notes-lite-remote
//!
//! Client for the remote tabular backend used by notes-lite: a
//! PostgREST-compatible REST interface (as exposed by Supabase) holding the
//! `notes` and `folders` tables.
//!
//! Only three verbs are needed, all addressed by table and narrowed by
//! equality filters on a column such as `user_id`:
//!
//! | Verb | HTTP |
//! |------|------|
//! | [`RemoteClient::select`] | `GET /rest/v1/{table}?select=*&col=eq.value` |
//! | [`RemoteClient::upsert`] | `POST /rest/v1/{table}` with `Prefer: resolution=merge-duplicates` |
//! | [`RemoteClient::delete`] | `DELETE /rest/v1/{table}?col=eq.value` |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use notes_lite_remote::{Filter, RemoteClient, RemoteConfig};
//!
//! # async fn example() -> notes_lite_remote::Result<()> {
//! let client = RemoteClient::new(&RemoteConfig::new("https://xyz.supabase.co", "anon-key"))?;
//! let rows: Vec<serde_json::Value> = client
//!     .select("notes", &[Filter::eq("user_id", "public-user")])
//!     .await?;
//! println!("{} notes", rows.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`Result<T, RemoteError>`](RemoteError). Transport
//! failures, timeouts and HTTP error statuses are mapped onto structured
//! variants; see [`RemoteError`] for the full list.

mod client;
mod error;
mod http_client;
mod types;
mod utils;

pub use client::RemoteClient;
pub use error::{RemoteError, Result};
pub use types::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, Filter, RemoteConfig};
pub use utils::log_sanitizer;
