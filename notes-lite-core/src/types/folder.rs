//! Folder record

use serde::{Deserialize, Serialize};

use crate::types::{ROOT_FOLDER_ID, ROOT_FOLDER_NAME};

/// A folder in the note hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// Parent folder, `None` for top level
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Manual ordering key among siblings
    #[serde(default)]
    pub order_index: i64,
}

impl Folder {
    /// Creates a folder with a fresh id.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        parent_id: Option<String>,
        order_index: i64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            name: name.into(),
            parent_id,
            order_index,
        }
    }

    /// The implicit root folder. It is never persisted.
    #[must_use]
    pub fn root(user_id: impl Into<String>) -> Self {
        Self {
            id: ROOT_FOLDER_ID.to_string(),
            user_id: user_id.into(),
            name: ROOT_FOLDER_NAME.to_string(),
            parent_id: None,
            order_index: 0,
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.id == ROOT_FOLDER_ID
    }

    /// Grouping key of the parent: empty for top level.
    ///
    /// A parent of `root` counts as top level.
    #[must_use]
    pub fn parent_key(&self) -> &str {
        match self.parent_id.as_deref() {
            None | Some(ROOT_FOLDER_ID) => "",
            Some(parent) => parent,
        }
    }
}
