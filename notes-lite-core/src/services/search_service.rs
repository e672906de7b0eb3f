//! Search, tag and backlink queries (stateless service)

use std::collections::BTreeSet;

use crate::content;
use crate::error::{CoreError, CoreResult};
use crate::types::{Note, NoteSummary, Notebook};

/// Query service over a loaded [`Notebook`]. Never touches the backend.
pub struct SearchService;

impl SearchService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Stores the search text, trimmed and lowercased.
    pub fn set_query(&self, nb: &mut Notebook, query: &str) {
        nb.query = query.trim().to_lowercase();
    }

    /// Notes of the active folder matching the query, in display order.
    ///
    /// A note matches when its title and text contain the query or when one
    /// of its tags does. An empty query matches everything.
    pub fn list_filtered<'a>(&self, nb: &'a Notebook) -> Vec<&'a Note> {
        nb.notes_in(&nb.active_folder_id)
            .filter(|note| matches_query(note, &nb.query))
            .collect()
    }

    /// Listing rows for [`list_filtered`](Self::list_filtered).
    pub fn summaries(&self, nb: &Notebook) -> Vec<NoteSummary> {
        self.list_filtered(nb)
            .into_iter()
            .map(|note| NoteSummary {
                id: note.id.clone(),
                title: note.title.clone(),
                snippet: content::snippet(&note.content),
                updated_at: note.updated_at,
            })
            .collect()
    }

    /// Notes whose text links to the given note with `[[title]]`.
    pub fn backlinks<'a>(&self, nb: &'a Notebook, note_id: &str) -> CoreResult<Vec<&'a Note>> {
        let target = nb
            .note(note_id)
            .ok_or_else(|| CoreError::NoteNotFound(note_id.to_string()))?;
        let link = format!("[[{}]]", target.title);

        Ok(nb
            .notes
            .iter()
            .filter(|note| note.id != target.id && note.plain_text().contains(&link))
            .collect())
    }

    /// Every tag in the notebook, sorted and distinct.
    pub fn all_tags(&self, nb: &Notebook) -> Vec<String> {
        nb.notes
            .iter()
            .flat_map(|note| note.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Default for SearchService {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_query(note: &Note, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let haystack = format!("{} {}", note.title, note.plain_text()).to_lowercase();
    haystack.contains(query) || note.tags.iter().any(|tag| tag.contains(query))
}
