//! Session controller: one owned object wiring store, selection, and
//! query state together.
//!
//! The session is the only writer of its store and selection; table views
//! stay presentation-only and report user actions as [`Intent`] values,
//! which the session interprets. There are no ambient singletons, so any
//! number of sessions (tests, multiple tabs) coexist independently.

use crate::error::{Result, RosterError};
use crate::query::{self, Page, Query, Sort, SortDirection};
use crate::selection::SelectionTracker;
use crate::store::RecordStore;
use crate::types::{Record, RecordId, Stored};
use tracing::debug;

/// A user action reported by a table view.
///
/// Views describe *what happened*; the session decides *what changes*.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// A column header was clicked. Sorting the active field flips its
    /// direction; a new field starts ascending.
    SortBy(String),
    /// A row's checkbox was toggled
    ToggleRow(RecordId),
    /// The header checkbox was toggled: `true` selects every row on the
    /// currently visible page, `false` clears the whole selection
    ToggleAll(bool),
    /// A row's edit action was invoked; the session confirms the record
    /// still exists before the caller opens its form
    EditRow(RecordId),
    /// A row's delete action was invoked
    DeleteRow(RecordId),
    /// The bulk "delete selected" action was invoked
    DeleteSelected,
    /// Advance one page, if there is one
    NextPage,
    /// Go back one page, if there is one
    PrevPage,
    /// Jump to a 1-based page number (clamped at evaluation)
    GoToPage(usize),
    /// Change the page size; the page number resets to 1
    SetPageSize(usize),
    /// Add a filter predicate and return to page 1
    AddFilter { field: String, value: String },
    /// Remove every filter on the given field
    RemoveFilter(String),
    /// Clear filters and sort, restore default paging
    Reset,
}

/// One dataset's store, selection, and view state under a single owner.
pub struct Session<R: Record> {
    store: RecordStore<R>,
    selection: SelectionTracker,
    query: Query,
    current_user: String,
}

impl<R: Record + Clone> Session<R> {
    /// Create an empty session. `current_user` stamps the audit fields of
    /// every mutation made through this session.
    pub fn new(current_user: impl Into<String>) -> Self {
        Session {
            store: RecordStore::new(),
            selection: SelectionTracker::new(),
            query: Query::new(),
            current_user: current_user.into(),
        }
    }

    /// Set the page size used until the user changes it.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.query = self.query.with_page_size(page_size);
        self
    }

    /// Seed the store with candidate records, e.g. the static mock data.
    pub fn load(&mut self, records: impl IntoIterator<Item = R>) -> Result<()> {
        for record in records {
            self.store.create(record, &self.current_user)?;
        }
        Ok(())
    }

    /// The underlying store (read-only; mutate through the session).
    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// The current query state.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The user whose name stamps this session's mutations.
    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    /// Derive the current page. Pull-based: recomputed from the live
    /// collection on every call, so it is never stale.
    pub fn page(&self) -> Page<R> {
        query::run(self.store.list(), &self.query)
    }

    /// Every record passing the current filters, across all pages.
    pub fn matching(&self) -> Vec<Stored<R>> {
        query::select(self.store.list(), &self.query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Create a record (form collaborators validate before calling).
    pub fn create(&mut self, record: R) -> Result<RecordId> {
        self.store.create(record, &self.current_user)
    }

    /// Replace a record wholesale (form collaborators validate first).
    pub fn update(&mut self, id: RecordId, record: R) -> Result<()> {
        self.store.update(id, record, &self.current_user)
    }

    /// Delete a record and drop it from the selection.
    pub fn delete(&mut self, id: RecordId) -> Result<()> {
        // Selection removal is idempotent and happens even for stale ids.
        self.selection.remove(id);
        self.store.delete(id)
    }

    /// Delete every selected record. Returns the number removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.ids();
        let removed = self.store.delete_many(&ids);
        self.selection.clear();
        removed
    }

    /// Interpret a view intent.
    pub fn apply(&mut self, intent: Intent) -> Result<()> {
        debug!(kind = R::KIND, ?intent, "intent");
        match intent {
            Intent::SortBy(field) => {
                self.query.sort = Some(match self.query.sort.take() {
                    Some(sort) if sort.field == field => Sort {
                        field,
                        direction: sort.direction.flipped(),
                    },
                    _ => Sort {
                        field,
                        direction: SortDirection::Ascending,
                    },
                });
            }
            Intent::ToggleRow(id) => self.selection.toggle(id),
            Intent::ToggleAll(true) => {
                let visible: Vec<RecordId> =
                    self.page().records.iter().map(|s| s.id()).collect();
                self.selection.select_all(visible);
            }
            Intent::ToggleAll(false) => self.selection.clear(),
            Intent::EditRow(id) => {
                self.store
                    .get(id)
                    .ok_or(RosterError::NotFound { id })?;
            }
            Intent::DeleteRow(id) => self.delete(id)?,
            Intent::DeleteSelected => {
                self.delete_selected();
            }
            Intent::NextPage => {
                let current = self.page();
                if current.page < current.total_pages {
                    self.query.page = current.page + 1;
                }
            }
            Intent::PrevPage => {
                self.query.page = self.page().page.saturating_sub(1).max(1);
            }
            Intent::GoToPage(page) => {
                self.query.page = page.max(1);
            }
            Intent::SetPageSize(page_size) => {
                self.query.page_size = page_size.max(1);
                self.query.page = 1;
            }
            Intent::AddFilter { field, value } => {
                let filter = crate::query::Filter::new(field, value);
                if !self.query.filters.contains(&filter) {
                    self.query.filters.push(filter);
                }
                self.query.page = 1;
            }
            Intent::RemoveFilter(field) => {
                self.query.filters.retain(|f| f.field != field);
                self.query.page = 1;
            }
            Intent::Reset => {
                self.query = Query::new();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Employee;

    fn make_session() -> Session<Employee> {
        let mut session = Session::new("admin").with_page_size(2);
        session
            .load([
                Employee::new("E1001", "John Doe").with_team("Platform"),
                Employee::new("E1002", "Jane Smith").with_team("Data"),
                Employee::new("E1003", "Wei Chen").with_team("Platform"),
                Employee::new("E1004", "Ana Silva").with_team("Infra"),
                Employee::new("E1005", "Dev Patel").with_team("Platform"),
            ])
            .unwrap();
        session
    }

    #[test]
    fn test_sort_intent_toggles_direction() {
        let mut session = make_session();

        session.apply(Intent::SortBy("name".into())).unwrap();
        assert_eq!(
            session.query().sort,
            Some(Sort::ascending("name")),
        );

        session.apply(Intent::SortBy("name".into())).unwrap();
        assert_eq!(
            session.query().sort.as_ref().unwrap().direction,
            SortDirection::Descending
        );

        // A different column starts ascending again
        session.apply(Intent::SortBy("core_team".into())).unwrap();
        let sort = session.query().sort.as_ref().unwrap();
        assert_eq!(sort.field, "core_team");
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_toggle_all_scopes_to_visible_page() {
        let mut session = make_session();

        session.apply(Intent::ToggleAll(true)).unwrap();
        // Page size is 2, so only the first page's rows are selected
        assert_eq!(session.selection().len(), 2);
        let visible: Vec<RecordId> = session.page().records.iter().map(|s| s.id()).collect();
        assert!(session.selection().is_all_selected(&visible));

        session.apply(Intent::ToggleAll(false)).unwrap();
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_selection_survives_page_and_filter_changes() {
        let mut session = make_session();

        // Select the second record, then hide it behind a filter
        let hidden = session.page().records[1].id();
        session.apply(Intent::ToggleRow(hidden)).unwrap();
        session
            .apply(Intent::AddFilter {
                field: "core_team".into(),
                value: "Platform".into(),
            })
            .unwrap();

        assert!(session
            .page()
            .records
            .iter()
            .all(|s| s.id() != hidden));
        assert!(session.selection().is_selected(hidden));

        // Navigating pages does not disturb it either
        session.apply(Intent::NextPage).unwrap();
        assert!(session.selection().is_selected(hidden));

        session.apply(Intent::RemoveFilter("core_team".into())).unwrap();
        assert!(session.selection().is_selected(hidden));
    }

    #[test]
    fn test_delete_drops_selection_membership() {
        let mut session = make_session();
        let id = session.page().records[0].id();

        session.apply(Intent::ToggleRow(id)).unwrap();
        session.apply(Intent::DeleteRow(id)).unwrap();

        assert!(!session.selection().is_selected(id));
        assert!(session.store().get(id).is_none());

        // Deleting again reports the stale id
        let err = session.apply(Intent::DeleteRow(id)).unwrap_err();
        assert!(matches!(err, RosterError::NotFound { .. }));
    }

    #[test]
    fn test_delete_selected_removes_and_clears() {
        let mut session = make_session();

        session.apply(Intent::ToggleAll(true)).unwrap();
        let before = session.store().len();
        session.apply(Intent::DeleteSelected).unwrap();

        assert_eq!(session.store().len(), before - 2);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_page_navigation_clamps_at_edges() {
        let mut session = make_session();

        session.apply(Intent::PrevPage).unwrap();
        assert_eq!(session.page().page, 1);

        session.apply(Intent::GoToPage(99)).unwrap();
        assert_eq!(session.page().page, 3);

        session.apply(Intent::NextPage).unwrap();
        assert_eq!(session.page().page, 3);
    }

    #[test]
    fn test_set_page_size_resets_to_first_page() {
        let mut session = make_session();

        session.apply(Intent::GoToPage(3)).unwrap();
        session.apply(Intent::SetPageSize(4)).unwrap();

        assert_eq!(session.query().page, 1);
        assert_eq!(session.page().total_pages, 2);
    }

    #[test]
    fn test_edit_intent_checks_existence() {
        let mut session = make_session();
        let id = session.page().records[0].id();

        session.apply(Intent::EditRow(id)).unwrap();

        session.apply(Intent::DeleteRow(id)).unwrap();
        let err = session.apply(Intent::EditRow(id)).unwrap_err();
        assert!(matches!(err, RosterError::NotFound { .. }));
    }

    #[test]
    fn test_reset_restores_default_query() {
        let mut session = make_session();
        session
            .apply(Intent::AddFilter {
                field: "core_team".into(),
                value: "Platform".into(),
            })
            .unwrap();
        session.apply(Intent::SortBy("name".into())).unwrap();

        session.apply(Intent::Reset).unwrap();
        assert_eq!(session.query(), &Query::new());
    }

    #[test]
    fn test_end_to_end_filter_and_selection_flow() {
        // Create A and B, filter to A only, select hidden B, drop the
        // filter, B is still selected.
        let mut session: Session<Employee> = Session::new("admin");
        let a = session.create(Employee::new("E1", "Alpha").with_team("Core")).unwrap();
        let b = session.create(Employee::new("E2", "Beta").with_team("Edge")).unwrap();

        session
            .apply(Intent::AddFilter {
                field: "name".into(),
                value: "alpha".into(),
            })
            .unwrap();

        let page = session.page();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.records[0].id(), a);

        session.apply(Intent::ToggleRow(b)).unwrap();
        session.apply(Intent::RemoveFilter("name".into())).unwrap();

        assert_eq!(session.page().total_count, 2);
        assert!(session.selection().is_selected(b));
    }
}
