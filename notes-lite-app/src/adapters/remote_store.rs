//! Note and folder repositories over the remote tabular API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use notes_lite_core::content;
use notes_lite_core::error::{CoreError, CoreResult};
use notes_lite_core::traits::{FolderRepository, NoteRepository};
use notes_lite_core::types::{Folder, Note};
use notes_lite_core::utils::datetime;
use notes_lite_remote::{Filter, RemoteClient};

const NOTES_TABLE: &str = "notes";
const FOLDERS_TABLE: &str = "folders";

/// Remote store scoped by `user_id`.
///
/// Every read and delete is filtered by the owner column, so rows of other
/// users sharing the tables are never touched.
pub struct RemoteStore {
    client: RemoteClient,
}

impl RemoteStore {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    fn scope(user_id: &str) -> Filter {
        Filter::eq("user_id", user_id)
    }
}

/// Remote note row. Columns added after the first schema may be missing.
#[derive(Deserialize)]
struct NoteRow {
    id: String,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    folder_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    order_index: Option<i64>,
    #[serde(default)]
    created_at: Option<RawTimestamp>,
    #[serde(default)]
    updated_at: Option<RawTimestamp>,
}

/// Timestamp column as sent by the backend: text (with or without offset)
/// or a Unix number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Unix(i64),
}

impl RawTimestamp {
    fn parse(&self, field: &str) -> CoreResult<DateTime<Utc>> {
        let parsed = match self {
            Self::Text(raw) => datetime::parse_text(raw),
            Self::Unix(ts) => datetime::parse_unix_timestamp(*ts),
        };
        parsed.ok_or_else(|| {
            let raw = match self {
                Self::Text(raw) => raw.clone(),
                Self::Unix(ts) => ts.to_string(),
            };
            CoreError::SerializationError(format!("Invalid {field}: {raw}"))
        })
    }
}

impl NoteRow {
    /// `position` is the row's place in the listing; rows without an
    /// ordering key get `-position`, newest listed first.
    fn into_note(self, position: usize, user_id: &str) -> CoreResult<Note> {
        let content = self.content.unwrap_or_default();
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| content::display_title(&content));
        let tags = self
            .tags
            .unwrap_or_else(|| content::derive_tags(&title, &content::plain_text(&content)));
        let updated_at = self
            .updated_at
            .as_ref()
            .map(|raw| raw.parse("updated_at"))
            .transpose()?
            .unwrap_or_else(Utc::now);
        let created_at = self
            .created_at
            .as_ref()
            .map(|raw| raw.parse("created_at"))
            .transpose()?
            .unwrap_or(updated_at);

        Ok(Note {
            id: self.id,
            user_id: self.user_id.unwrap_or_else(|| user_id.to_string()),
            folder_id: self.folder_id,
            title,
            content,
            tags,
            order_index: self.order_index.unwrap_or(-positional_key(position)),
            created_at,
            updated_at,
        })
    }
}

/// Remote folder row.
#[derive(Deserialize)]
struct FolderRow {
    id: String,
    #[serde(default)]
    user_id: Option<String>,
    name: String,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    order_index: Option<i64>,
}

impl FolderRow {
    fn into_folder(self, position: usize, user_id: &str) -> Folder {
        Folder {
            id: self.id,
            user_id: self.user_id.unwrap_or_else(|| user_id.to_string()),
            name: self.name,
            parent_id: self.parent_id,
            order_index: self.order_index.unwrap_or(positional_key(position)),
        }
    }
}

fn positional_key(position: usize) -> i64 {
    i64::try_from(position).unwrap_or(i64::MAX)
}

#[async_trait]
impl NoteRepository for RemoteStore {
    async fn list_notes(&self, user_id: &str) -> CoreResult<Vec<Note>> {
        let rows: Vec<NoteRow> = self
            .client
            .select(NOTES_TABLE, &[Self::scope(user_id)])
            .await?;

        rows.into_iter()
            .enumerate()
            .map(|(i, row)| row.into_note(i, user_id))
            .collect()
    }

    async fn upsert_note(&self, note: &Note) -> CoreResult<()> {
        self.client
            .upsert(NOTES_TABLE, note)
            .await
            .map_err(CoreError::from)
    }

    async fn delete_note(&self, user_id: &str, id: &str) -> CoreResult<()> {
        self.client
            .delete(NOTES_TABLE, &[Filter::eq("id", id), Self::scope(user_id)])
            .await
            .map_err(CoreError::from)
    }
}

#[async_trait]
impl FolderRepository for RemoteStore {
    async fn list_folders(&self, user_id: &str) -> CoreResult<Vec<Folder>> {
        let rows: Vec<FolderRow> = self
            .client
            .select(FOLDERS_TABLE, &[Self::scope(user_id)])
            .await?;

        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| row.into_folder(i, user_id))
            .collect())
    }

    async fn upsert_folder(&self, folder: &Folder) -> CoreResult<()> {
        self.client
            .upsert(FOLDERS_TABLE, folder)
            .await
            .map_err(CoreError::from)
    }

    async fn delete_folder(&self, user_id: &str, id: &str) -> CoreResult<()> {
        self.client
            .delete(FOLDERS_TABLE, &[Filter::eq("id", id), Self::scope(user_id)])
            .await
            .map_err(CoreError::from)
    }
}
