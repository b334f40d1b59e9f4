//! Query evaluation for Roster tables.
//!
//! This module derives the filtered, sorted, paginated view of a record
//! collection, including:
//! - Predicate filters combined by logical AND
//! - Stable single-key sorting in either direction
//! - 1-based pagination with clamping
//!
//! Evaluation is pull-based: every call recomputes the view in full from
//! the live collection. At the expected volumes (hundreds to low thousands
//! of records) this is cheaper than maintaining incremental state.

use crate::types::{FieldValue, Record, Stored};
use std::cmp::Ordering;

/// Default page size, matching the dashboard's initial "entries per page".
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// One filter predicate: a field key and the value to match.
///
/// The match rule follows the field's projection: free text matches by
/// case-insensitive substring containment (mirroring the form
/// autosuggestion contract), closed-enumeration fields match exactly on
/// the canonical spelling, and date fields match their ISO rendering.
/// A field the record type does not have never matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

impl Filter {
    /// Create a filter predicate.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Check if a record matches this predicate.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match record.field(&self.field) {
            None => false,
            Some(FieldValue::Text(t)) => t
                .to_lowercase()
                .contains(&self.value.to_lowercase()),
            Some(FieldValue::Keyword(k)) => k == self.value,
            Some(FieldValue::Date(d)) => d.format("%Y-%m-%d").to_string() == self.value,
        }
    }
}

/// Sort direction for a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// A sort key and direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    /// Create an ascending sort on `field`.
    pub fn ascending(field: impl Into<String>) -> Self {
        Sort {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }
}

/// The ephemeral filter/sort/page specification driving a table view.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Predicates, combined by logical AND
    pub filters: Vec<Filter>,

    /// Optional sort key and direction
    pub sort: Option<Sort>,

    /// 1-based page number; out-of-range values are clamped at evaluation
    pub page: usize,

    /// Records per page
    pub page_size: usize,
}

impl Default for Query {
    fn default() -> Self {
        Query {
            filters: Vec::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Query {
    /// Create a query with no filters, no sort, page 1.
    pub fn new() -> Self {
        Query::default()
    }

    /// Add a filter predicate.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter::new(field, value));
        self
    }

    /// Set the sort key and direction.
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    /// Set the page number.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size. Resets the page number to 1, since the old
    /// window may no longer reference a valid page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.page = 1;
        self
    }

    /// Check if a record passes every filter.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}

/// One derived page of a collection.
#[derive(Debug, Clone)]
pub struct Page<R> {
    /// The records in the page window, filtered and sorted
    pub records: Vec<Stored<R>>,

    /// Number of records passing the filters, across all pages
    pub total_count: usize,

    /// Number of pages at the query's page size (0 when nothing matches)
    pub total_pages: usize,

    /// The clamped 1-based page number this window represents
    pub page: usize,
}

/// Evaluate the filter and sort stages only, returning every matching
/// record in order. This is what `run` paginates, and what export uses
/// when the caller wants the full filtered collection.
pub fn select<'a, R: Record>(records: &'a [Stored<R>], query: &Query) -> Vec<&'a Stored<R>> {
    let mut hits: Vec<&Stored<R>> = records
        .iter()
        .filter(|stored| query.matches(&stored.record))
        .collect();

    if let Some(sort) = &query.sort {
        // Stable sort: ties keep their original relative order.
        hits.sort_by(|a, b| {
            let ord = compare_fields(a.record.field(&sort.field), b.record.field(&sort.field));
            match sort.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }

    hits
}

/// Evaluate a query against a collection, producing one page.
///
/// An out-of-range page number is clamped into `[1, total_pages]`; an
/// empty result set yields page 1 of 0 with no records.
pub fn run<R: Record + Clone>(records: &[Stored<R>], query: &Query) -> Page<R> {
    let hits = select(records, query);

    let total_count = hits.len();
    let page_size = query.page_size.max(1);
    let total_pages = total_count.div_ceil(page_size);
    let page = query.page.clamp(1, total_pages.max(1));

    let start = (page - 1) * page_size;
    let records = hits
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    Page {
        records,
        total_count,
        total_pages,
        page,
    }
}

/// Ordering of two projected field values.
///
/// Missing values order before present ones; text compares case-sensitive
/// lexicographic (the documented collation rule), dates chronologically.
fn compare_fields(a: Option<FieldValue<'_>>, b: Option<FieldValue<'_>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(FieldValue::Date(x)), Some(FieldValue::Date(y))) => x.cmp(&y),
        (Some(x), Some(y)) => x.as_text().cmp(&y.as_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;
    use crate::types::{Employee, EmployeeStatus, RecordId, RoleType};

    fn make_store() -> RecordStore<Employee> {
        let mut store = RecordStore::new();
        let rows = [
            ("E1001", "John Doe", "Platform", EmployeeStatus::Active),
            ("E1002", "Jane Smith", "Data", EmployeeStatus::Active),
            ("E1003", "Wei Chen", "Platform", EmployeeStatus::Inactive),
            ("E1004", "Ana Silva", "Infra", EmployeeStatus::Open),
            ("E1005", "Dev Patel", "Platform", EmployeeStatus::Term),
        ];
        for (eid, name, team, status) in rows {
            store
                .create(
                    Employee::new(eid, name).with_team(team).with_status(status),
                    "admin",
                )
                .unwrap();
        }
        store
    }

    fn names(page: &Page<Employee>) -> Vec<&str> {
        page.records.iter().map(|s| s.record.name.as_str()).collect()
    }

    #[test]
    fn test_text_filter_is_substring_case_insensitive() {
        let store = make_store();
        let query = Query::new().with_filter("name", "jane");
        let page = run(store.list(), &query);

        assert_eq!(page.total_count, 1);
        assert_eq!(names(&page), ["Jane Smith"]);
    }

    #[test]
    fn test_keyword_filter_is_exact() {
        let store = make_store();

        let page = run(store.list(), &Query::new().with_filter("status", "Active"));
        assert_eq!(page.total_count, 2);

        // Containment would match "Inactive" too; exact match must not
        let page = run(store.list(), &Query::new().with_filter("status", "active"));
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let store = make_store();
        let query = Query::new()
            .with_filter("core_team", "Platform")
            .with_filter("status", "Active");
        let page = run(store.list(), &query);

        assert_eq!(names(&page), ["John Doe"]);
    }

    #[test]
    fn test_unknown_field_excludes_all() {
        let store = make_store();
        let query = Query::new().with_filter("hiring_manager", "Keshav");
        let page = run(store.list(), &query);
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn test_sort_ascending_then_descending() {
        let store = make_store();

        let asc = run(
            store.list(),
            &Query::new().with_sort("name", SortDirection::Ascending),
        );
        assert_eq!(
            names(&asc),
            ["Ana Silva", "Dev Patel", "Jane Smith", "John Doe", "Wei Chen"]
        );

        let desc = run(
            store.list(),
            &Query::new().with_sort("name", SortDirection::Descending),
        );
        let mut reversed = names(&asc);
        reversed.reverse();
        assert_eq!(names(&desc), reversed);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let store = make_store();
        let page = run(
            store.list(),
            &Query::new().with_sort("core_team", SortDirection::Ascending),
        );

        // The three Platform rows keep their insertion order
        let platform: Vec<&str> = page
            .records
            .iter()
            .filter(|s| s.record.core_team.as_deref() == Some("Platform"))
            .map(|s| s.record.name.as_str())
            .collect();
        assert_eq!(platform, ["John Doe", "Wei Chen", "Dev Patel"]);
    }

    #[test]
    fn test_sort_is_case_sensitive_lexicographic() {
        let mut store = RecordStore::new();
        store
            .create(Employee::new("E1", "apple").with_role_type(RoleType::Both), "admin")
            .unwrap();
        store.create(Employee::new("E2", "Banana"), "admin").unwrap();

        let page = run(
            store.list(),
            &Query::new().with_sort("name", SortDirection::Ascending),
        );
        // Uppercase orders before lowercase in the documented collation
        assert_eq!(names(&page), ["Banana", "apple"]);
    }

    #[test]
    fn test_missing_sort_values_order_first() {
        let mut store = RecordStore::new();
        store
            .create(Employee::new("E1", "Has Team").with_team("Data"), "admin")
            .unwrap();
        store.create(Employee::new("E2", "No Team"), "admin").unwrap();

        let page = run(
            store.list(),
            &Query::new().with_sort("core_team", SortDirection::Ascending),
        );
        assert_eq!(names(&page), ["No Team", "Has Team"]);
    }

    #[test]
    fn test_pagination_windows() {
        let store = make_store();
        let query = Query::new().with_page_size(2);

        let p1 = run(store.list(), &query);
        assert_eq!(p1.total_count, 5);
        assert_eq!(p1.total_pages, 3);
        assert_eq!(names(&p1), ["John Doe", "Jane Smith"]);

        let p3 = run(store.list(), &query.clone().with_page(3));
        assert_eq!(names(&p3), ["Dev Patel"]);
    }

    #[test]
    fn test_page_concatenation_reproduces_full_list() {
        let store = make_store();
        let query = Query::new()
            .with_sort("name", SortDirection::Ascending)
            .with_page_size(2);

        let full: Vec<RecordId> = select(store.list(), &query)
            .into_iter()
            .map(|s| s.id())
            .collect();

        let mut concatenated = Vec::new();
        let total_pages = run(store.list(), &query).total_pages;
        for page in 1..=total_pages {
            let window = run(store.list(), &query.clone().with_page(page));
            concatenated.extend(window.records.iter().map(|s| s.id()));
        }

        assert_eq!(concatenated, full);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let store = make_store();
        let query = Query::new().with_page_size(2).with_page(99);

        let page = run(store.list(), &query);
        assert_eq!(page.page, 3);
        assert_eq!(names(&page), ["Dev Patel"]);
    }

    #[test]
    fn test_empty_collection_yields_page_one_of_zero() {
        let store = RecordStore::<Employee>::new();
        let page = run(store.list(), &Query::new().with_page(5));

        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_count, 0);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let query = Query::new().with_page(4).with_page_size(25);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 25);
    }
}
