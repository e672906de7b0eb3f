//! Manual ordering of notes and folders.

use std::cmp::Ordering;

use crate::types::{Folder, Note};

/// Case-insensitive name comparison with an exact comparison as tiebreak.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sorts by parent, then ordering key, then name.
pub fn sort_folders(folders: &mut [Folder]) {
    folders.sort_by(|a, b| {
        a.parent_key()
            .cmp(b.parent_key())
            .then(a.order_index.cmp(&b.order_index))
            .then_with(|| compare_names(&a.name, &b.name))
    });
}

/// Sorts by folder, then ordering key, then most recently updated first.
pub fn sort_notes(notes: &mut [Note]) {
    notes.sort_by(|a, b| {
        a.folder_key()
            .cmp(b.folder_key())
            .then(a.order_index.cmp(&b.order_index))
            .then(b.updated_at.cmp(&a.updated_at))
    });
}

/// Key placing a new note above every note of its folder.
pub fn top_key(keys: impl IntoIterator<Item = i64>) -> i64 {
    keys.into_iter().min().map_or(-1, |min| min.saturating_sub(1))
}

/// Key placing a new folder below every sibling.
pub fn bottom_key(keys: impl IntoIterator<Item = i64>) -> i64 {
    keys.into_iter().max().map_or(1, |max| max.saturating_add(1))
}

/// Plans moving the item at `index` by `delta` places within a group
/// whose `keys` are in display order.
///
/// Returns the `(position, new_key)` pairs that change, or `None` when the
/// move would leave the group. Equal keys are first renumbered
/// sequentially from the smallest key so the swap is visible.
pub fn plan_swap(keys: &[i64], index: usize, delta: isize) -> Option<Vec<(usize, i64)>> {
    let target = index.checked_add_signed(delta)?;
    if delta == 0 || index >= keys.len() || target >= keys.len() {
        return None;
    }

    if keys[index] != keys[target] {
        return Some(vec![(index, keys[target]), (target, keys[index])]);
    }

    // keep the renumbered run inside i64
    let span = i64::try_from(keys.len() - 1).ok()?;
    let base = keys.iter().copied().min()?.min(i64::MAX - span);
    let mut renumbered = Vec::with_capacity(keys.len());
    for offset in 0..keys.len() {
        renumbered.push(base + i64::try_from(offset).ok()?);
    }
    renumbered.swap(index, target);

    Some(
        renumbered
            .into_iter()
            .enumerate()
            .filter(|&(i, key)| keys[i] != key)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ROOT_FOLDER_ID;
    use chrono::Duration;

    fn apply(keys: &mut [i64], plan: &[(usize, i64)]) {
        for &(i, key) in plan {
            keys[i] = key;
        }
    }

    #[test]
    fn names_compare_case_insensitively_first() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("B", "b"), Ordering::Less);
        assert_eq!(compare_names("x", "x"), Ordering::Equal);
    }

    #[test]
    fn folders_sort_by_parent_key_then_name() {
        let mut folders = vec![
            Folder::new("u", "zeta", None, 1),
            Folder::new("u", "Alpha", None, 1),
            Folder::new("u", "first", None, 0),
            Folder::new("u", "child", Some("p".into()), 0),
        ];
        sort_folders(&mut folders);
        let names: Vec<_> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first", "Alpha", "zeta", "child"]);
    }

    #[test]
    fn notes_break_ties_by_recency() {
        let mut old = Note::new("u", ROOT_FOLDER_ID, 0);
        old.updated_at -= Duration::minutes(5);
        let fresh = Note::new("u", ROOT_FOLDER_ID, 0);
        let top = Note::new("u", ROOT_FOLDER_ID, -3);
        let mut notes = vec![old.clone(), fresh.clone(), top.clone()];
        sort_notes(&mut notes);
        let ids: Vec<_> = notes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, vec![top.id, fresh.id, old.id]);
    }

    #[test]
    fn new_keys_are_asymmetric() {
        assert_eq!(top_key([]), -1);
        assert_eq!(top_key([3, -2, 0]), -3);
        assert_eq!(bottom_key([]), 1);
        assert_eq!(bottom_key([3, -2, 0]), 4);
    }

    #[test]
    fn new_keys_saturate_at_the_extremes() {
        assert_eq!(top_key([i64::MIN, 3]), i64::MIN);
        assert_eq!(bottom_key([i64::MAX]), i64::MAX);
    }

    #[test]
    fn swap_renumbers_tied_keys_near_the_maximum() {
        let mut keys = vec![i64::MAX; 3];
        let plan = plan_swap(&keys, 2, -1).unwrap();
        apply(&mut keys, &plan);
        assert_eq!(keys, vec![i64::MAX - 2, i64::MAX, i64::MAX - 1]);
    }

    #[test]
    fn swap_exchanges_distinct_keys() {
        assert_eq!(plan_swap(&[-3, -1, 4], 1, -1), Some(vec![(1, -3), (0, -1)]));
        assert_eq!(plan_swap(&[-3, -1, 4], 1, 1), Some(vec![(1, 4), (2, -1)]));
    }

    #[test]
    fn swap_past_either_end_is_noop() {
        assert_eq!(plan_swap(&[1, 2], 0, -1), None);
        assert_eq!(plan_swap(&[1, 2], 1, 1), None);
        assert_eq!(plan_swap(&[], 0, 1), None);
        assert_eq!(plan_swap(&[1, 2], 0, 0), None);
    }

    #[test]
    fn swap_renumbers_tied_keys() {
        let mut keys = vec![0, 0, 0];
        let plan = plan_swap(&keys, 2, -1).unwrap();
        apply(&mut keys, &plan);
        assert_eq!(keys, vec![0, 2, 1]);
        // the first item kept its key and is not rewritten
        assert!(plan.iter().all(|&(i, _)| i != 0));
    }

    /// Moves within a list of `(id, key)` kept in display order.
    fn move_item(items: &mut [(usize, i64)], index: usize, delta: isize) {
        let keys: Vec<i64> = items.iter().map(|&(_, key)| key).collect();
        for (i, key) in plan_swap(&keys, index, delta).unwrap() {
            items[i].1 = key;
        }
        items.sort_by_key(|&(_, key)| key);
    }

    #[test]
    fn up_then_down_restores_order() {
        for original in [vec![-5, -2, 0, 7], vec![1, 1, 1, 1], vec![-1, 3, 3, 9]] {
            for index in 1..original.len() {
                let mut items: Vec<(usize, i64)> = original.iter().copied().enumerate().collect();
                move_item(&mut items, index, -1);
                assert_eq!(items[index - 1].0, index);
                move_item(&mut items, index - 1, 1);

                let ids: Vec<usize> = items.iter().map(|&(id, _)| id).collect();
                assert_eq!(ids, (0..original.len()).collect::<Vec<_>>(), "{original:?} @ {index}");
            }
        }
    }
}
