//! Folder hierarchy flattening.

use std::collections::{HashMap, HashSet};

use crate::ordering::compare_names;
use crate::types::Folder;

/// Spaces of indentation per level in [`TreeEntry::label`]
const INDENT: &str = "  ";

/// A folder with its depth in the flattened tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEntry<'a> {
    pub folder: &'a Folder,
    pub depth: usize,
}

impl TreeEntry<'_> {
    /// Name indented by depth.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}{}", INDENT.repeat(self.depth), self.folder.name)
    }
}

/// Adjacency list over a folder slice.
///
/// Built once per render; flattening never recurses, so deep or cyclic
/// parent chains cannot overflow the stack.
pub struct FolderTree<'a> {
    folders: &'a [Folder],
    children: HashMap<&'a str, Vec<usize>>,
}

impl<'a> FolderTree<'a> {
    #[must_use]
    pub fn new(folders: &'a [Folder]) -> Self {
        let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, folder) in folders.iter().enumerate() {
            if !folder.is_root() {
                children.entry(folder.parent_key()).or_default().push(i);
            }
        }
        for group in children.values_mut() {
            group.sort_by(|&a, &b| {
                folders[a]
                    .order_index
                    .cmp(&folders[b].order_index)
                    .then_with(|| compare_names(&folders[a].name, &folders[b].name))
            });
        }
        Self { folders, children }
    }

    /// Depth-first listing: root first, then top-level folders and their
    /// descendants.
    ///
    /// Folders unreachable from the top level (dangling parent or part of a
    /// cycle) are listed afterwards starting at depth 0. Every folder appears
    /// exactly once.
    #[must_use]
    pub fn flatten(&self) -> Vec<TreeEntry<'a>> {
        let mut out = Vec::with_capacity(self.folders.len());
        let mut visited = HashSet::new();

        for (i, folder) in self.folders.iter().enumerate() {
            if folder.is_root() && visited.insert(i) {
                out.push(TreeEntry { folder, depth: 0 });
            }
        }

        let mut starts: Vec<usize> = self.children_of("").to_vec();
        let mut unreachable: Vec<usize> = (0..self.folders.len())
            .filter(|i| !self.folders[*i].is_root())
            .collect();
        unreachable.sort_by(|&a, &b| {
            compare_names(&self.folders[a].name, &self.folders[b].name)
        });
        starts.extend(unreachable);

        let mut stack: Vec<(usize, usize)> = Vec::new();
        for start in starts {
            if visited.contains(&start) {
                continue;
            }
            stack.push((start, 0));
            while let Some((i, depth)) = stack.pop() {
                if !visited.insert(i) {
                    continue;
                }
                let folder = &self.folders[i];
                out.push(TreeEntry { folder, depth });
                for &child in self.children_of(&folder.id).iter().rev() {
                    if !visited.contains(&child) {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }

        out
    }

    fn children_of(&self, parent_key: &str) -> &[usize] {
        self.children
            .get(parent_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: &str, name: &str, parent: Option<&str>, order: i64) -> Folder {
        Folder {
            id: id.into(),
            user_id: "u".into(),
            name: name.into(),
            parent_id: parent.map(Into::into),
            order_index: order,
        }
    }

    fn labels(folders: &[Folder]) -> Vec<String> {
        FolderTree::new(folders)
            .flatten()
            .iter()
            .map(TreeEntry::label)
            .collect()
    }

    #[test]
    fn nests_children_under_parents() {
        let folders = vec![
            folder("b", "B", None, 2),
            folder("a1", "A1", Some("a"), 1),
            Folder::root("u"),
            folder("a", "A", None, 1),
            folder("a2", "A2", Some("a"), 2),
            folder("a1x", "deep", Some("a1"), 1),
        ];
        assert_eq!(
            labels(&folders),
            vec!["My Notes", "A", "  A1", "    deep", "  A2", "B"]
        );
    }

    #[test]
    fn dangling_parents_surface_at_top_level() {
        let folders = vec![Folder::root("u"), folder("x", "Lost", Some("gone"), 1)];
        let tree = FolderTree::new(&folders);
        let entries = tree.flatten();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].folder.id, "x");
        assert_eq!(entries[1].depth, 0);
    }

    #[test]
    fn cycles_terminate_and_list_each_folder_once() {
        let folders = vec![
            folder("a", "A", Some("b"), 1),
            folder("b", "B", Some("a"), 1),
            folder("self", "Self", Some("self"), 1),
        ];
        let entries = FolderTree::new(&folders).flatten();
        let mut ids: Vec<_> = entries.iter().map(|e| e.folder.id.as_str()).collect();
        assert_eq!(entries[0].depth, 0);
        assert_eq!(entries[1].depth, 1);
        ids.sort_unstable();
        assert_eq!(ids, vec!["a", "b", "self"]);
    }

    #[test]
    fn deep_chains_do_not_recurse() {
        let mut folders = vec![folder("f0", "f0", None, 0)];
        for i in 1..10_000 {
            folders.push(folder(&format!("f{i}"), "n", Some(&format!("f{}", i - 1)), 0));
        }
        let entries = FolderTree::new(&folders).flatten();
        assert_eq!(entries.len(), 10_000);
        assert_eq!(entries[9_999].depth, 9_999);
    }
}
