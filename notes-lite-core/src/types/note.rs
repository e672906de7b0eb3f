//! Note record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content;
use crate::types::ROOT_FOLDER_ID;

/// A single note.
///
/// `title` and `tags` are derived from `content`; use [`Note::set_content`]
/// instead of assigning them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub user_id: String,
    /// Owning folder, `None` for the root folder
    #[serde(default)]
    pub folder_id: Option<String>,
    pub title: String,
    /// Rich text (HTML fragment)
    #[serde(default)]
    pub content: String,
    /// Lowercase hashtags in first-seen order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Manual ordering key among notes of the same folder
    #[serde(default)]
    pub order_index: i64,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates an empty note with a fresh id and the placeholder title.
    #[must_use]
    pub fn new(user_id: impl Into<String>, folder_id: &str, order_index: i64) -> Self {
        let now = Utc::now();
        let mut note = Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            folder_id: Some(folder_id.to_string()),
            title: String::new(),
            content: String::new(),
            tags: Vec::new(),
            order_index,
            created_at: now,
            updated_at: now,
        };
        note.derive_fields();
        note
    }

    /// Folder the note lives in, with `None` resolved to the root folder.
    #[must_use]
    pub fn folder_key(&self) -> &str {
        self.folder_id.as_deref().unwrap_or(ROOT_FOLDER_ID)
    }

    /// Replaces the content and re-derives title and tags.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.derive_fields();
        self.touch();
    }

    /// Bumps `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Plain text rendering of the content.
    #[must_use]
    pub fn plain_text(&self) -> String {
        content::plain_text(&self.content)
    }

    fn derive_fields(&mut self) {
        self.title = content::display_title(&self.content);
        self.tags = content::derive_tags(&self.title, &self.plain_text());
    }
}
