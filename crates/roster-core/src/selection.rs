//! Selection tracking for bulk actions.
//!
//! Selection is keyed by record id, not by table position, so it survives
//! page navigation, sorting, and filter changes. The derived tri-state
//! helpers (`is_all_selected` / `is_partially_selected`) drive the
//! checked / unchecked / indeterminate header checkbox.

use crate::types::RecordId;
use std::collections::HashSet;

/// The set of record ids marked for bulk action.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    selected: HashSet<RecordId>,
}

impl SelectionTracker {
    /// Create an empty selection.
    pub fn new() -> Self {
        SelectionTracker::default()
    }

    /// Flip membership of `id` in the selection set.
    pub fn toggle(&mut self, id: RecordId) {
        if !self.selected.insert(id) {
            self.selected.remove(&id);
        }
    }

    /// Select every id in `ids`. Already-selected ids stay selected.
    ///
    /// Callers pass the currently visible page's ids; "select all" is
    /// scoped to the visible page, not the whole collection.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = RecordId>) {
        self.selected.extend(ids);
    }

    /// Clear the entire selection, across all pages.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop `id` from the selection if present. Idempotent; called on
    /// every delete so stale ids never linger.
    pub fn remove(&mut self, id: RecordId) {
        self.selected.remove(&id);
    }

    /// Check if `id` is selected.
    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    /// True iff `ids` is non-empty and every id in it is selected.
    pub fn is_all_selected(&self, ids: &[RecordId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id))
    }

    /// True iff some but not all of `ids` are selected (the indeterminate
    /// header-checkbox state).
    pub fn is_partially_selected(&self, ids: &[RecordId]) -> bool {
        let count = ids.iter().filter(|id| self.selected.contains(id)).count();
        count > 0 && count < ids.len()
    }

    /// Number of selected ids, across all pages.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The selected ids, in no particular order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.selected.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;
    use crate::types::Employee;

    fn make_ids(n: usize) -> Vec<RecordId> {
        let mut store = RecordStore::new();
        (0..n)
            .map(|i| {
                store
                    .create(Employee::new(format!("E{}", i), format!("Person {}", i)), "admin")
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let ids = make_ids(1);
        let mut selection = SelectionTracker::new();

        selection.toggle(ids[0]);
        assert!(selection.is_selected(ids[0]));

        selection.toggle(ids[0]);
        assert!(!selection.is_selected(ids[0]));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_and_tri_state() {
        let ids = make_ids(3);
        let mut selection = SelectionTracker::new();

        assert!(!selection.is_all_selected(&ids));
        assert!(!selection.is_partially_selected(&ids));

        selection.toggle(ids[0]);
        assert!(selection.is_partially_selected(&ids));
        assert!(!selection.is_all_selected(&ids));

        selection.select_all(ids.iter().copied());
        assert!(selection.is_all_selected(&ids));
        assert!(!selection.is_partially_selected(&ids));

        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_all_selected_requires_nonempty_set() {
        let selection = SelectionTracker::new();
        assert!(!selection.is_all_selected(&[]));
    }

    #[test]
    fn test_selection_is_scoped_to_passed_ids() {
        // Selecting one page's ids leaves the tracker partial for a
        // superset, matching the visible-page select-all contract.
        let ids = make_ids(4);
        let (page_one, rest) = ids.split_at(2);

        let mut selection = SelectionTracker::new();
        selection.select_all(page_one.iter().copied());

        assert!(selection.is_all_selected(page_one));
        assert!(selection.is_partially_selected(&ids));
        assert!(!selection.is_all_selected(rest));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let ids = make_ids(1);
        let mut selection = SelectionTracker::new();

        selection.toggle(ids[0]);
        selection.remove(ids[0]);
        selection.remove(ids[0]);
        assert!(selection.is_empty());
    }
}
