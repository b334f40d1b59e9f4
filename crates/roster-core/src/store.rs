//! In-memory record store.
//!
//! The `RecordStore` is the authoritative holder of one record collection
//! (employees or hiring requisitions). It supports:
//!
//! - Creating records with fresh identities and audit stamps
//! - Wholesale replace-by-id updates (no partial patch semantics)
//! - Single and bulk deletion
//! - Insertion-ordered listing and O(1) lookup by id
//!
//! ## Architecture
//!
//! The store uses a simple but effective design:
//! - A `Vec<Stored<R>>` keeps records in insertion order for stable listing
//! - A `HashMap<RecordId, usize>` maps ids to indices for O(1) lookups
//! - A generation counter lets derived views detect that a cached page is
//!   stale after any mutation
//!
//! The store enforces identity uniqueness and the business-key rule; all
//! other field-level rules belong to the form layer (see `validate`) and
//! must run before a candidate reaches the store.

use crate::error::{Result, RosterError};
use crate::types::{Audit, Record, RecordId, Stored};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// The authoritative in-memory collection for one record type.
pub struct RecordStore<R> {
    /// All records, in insertion order
    records: Vec<Stored<R>>,

    /// Map from record id to index in `records`
    by_id: HashMap<RecordId, usize>,

    /// Mutation counter for cache invalidation
    generation: u64,
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordStore<R> {
    /// Create a new empty store.
    pub fn new() -> Self {
        RecordStore {
            records: Vec::new(),
            by_id: HashMap::new(),
            generation: 0,
        }
    }

    /// Get the number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the current generation (mutation counter).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Accept a candidate record: assign a fresh id and audit stamps.
    ///
    /// Fails with a validation error when the record's business key (e.g.
    /// the employee id) collides with a live record. The synthetic record
    /// id is guaranteed unique regardless.
    pub fn create(&mut self, record: R, actor: &str) -> Result<RecordId> {
        self.check_business_key(&record, None)?;

        let mut id = RecordId::generate();
        // v4 collisions are not a practical concern, but uniqueness is a
        // hard invariant, so regenerate rather than assume.
        while self.by_id.contains_key(&id) {
            id = RecordId::generate();
        }

        self.by_id.insert(id, self.records.len());
        self.records.push(Stored::new(id, Audit::stamp(actor), record));
        self.generation += 1;

        debug!(kind = R::KIND, id = %id, "record created");
        Ok(id)
    }

    /// Replace the record at `id` wholesale.
    ///
    /// Identity and creation stamps are preserved; `updated_by`/`updated_at`
    /// are refreshed. Fails with `NotFound` if `id` is absent, or with a
    /// validation error if the replacement's business key collides with a
    /// different live record.
    pub fn update(&mut self, id: RecordId, record: R, actor: &str) -> Result<()> {
        let idx = *self
            .by_id
            .get(&id)
            .ok_or(RosterError::NotFound { id })?;

        self.check_business_key(&record, Some(id))?;

        let stored = &mut self.records[idx];
        stored.record = record;
        stored.audit.touch(actor);
        self.generation += 1;

        debug!(kind = R::KIND, id = %id, "record updated");
        Ok(())
    }

    /// Remove the record at `id`.
    ///
    /// Strict by contract: deleting an id that is not present fails with
    /// `NotFound`. Use [`delete_many`](Self::delete_many) where stale ids
    /// should be tolerated.
    pub fn delete(&mut self, id: RecordId) -> Result<()> {
        let idx = self
            .by_id
            .remove(&id)
            .ok_or(RosterError::NotFound { id })?;

        self.records.remove(idx);
        // Later records shifted down by one
        for (i, stored) in self.records.iter().enumerate().skip(idx) {
            self.by_id.insert(stored.id(), i);
        }
        self.generation += 1;

        debug!(kind = R::KIND, id = %id, "record deleted");
        Ok(())
    }

    /// Remove every record whose id appears in `ids`.
    ///
    /// Ids not found are silently skipped (bulk delete tolerates partial
    /// staleness). Returns the number of records removed.
    pub fn delete_many(&mut self, ids: &[RecordId]) -> usize {
        let doomed: HashSet<RecordId> = ids.iter().copied().collect();
        let before = self.records.len();

        self.records.retain(|stored| !doomed.contains(&stored.id()));
        let removed = before - self.records.len();

        if removed > 0 {
            self.by_id.clear();
            for (i, stored) in self.records.iter().enumerate() {
                self.by_id.insert(stored.id(), i);
            }
            self.generation += 1;
            debug!(kind = R::KIND, removed, "bulk delete");
        }

        removed
    }

    /// The full collection, in insertion order.
    ///
    /// The borrow rules guarantee callers cannot observe in-place mutation
    /// while holding this slice; mutation happens only through the
    /// documented operations above.
    pub fn list(&self) -> &[Stored<R>] {
        &self.records
    }

    /// Get a record by its id.
    pub fn get(&self, id: RecordId) -> Option<&Stored<R>> {
        self.by_id.get(&id).map(|&idx| &self.records[idx])
    }

    /// Check if `id` refers to a live record.
    pub fn contains(&self, id: RecordId) -> bool {
        self.by_id.contains_key(&id)
    }

    fn check_business_key(&self, record: &R, exempt: Option<RecordId>) -> Result<()> {
        let Some(key) = record.business_key() else {
            return Ok(());
        };
        let collision = self.records.iter().any(|stored| {
            Some(stored.id()) != exempt && stored.record.business_key() == Some(key)
        });
        if collision {
            let field = R::BUSINESS_KEY_FIELD.unwrap_or("id");
            return Err(RosterError::validation(
                field,
                format!("'{}' already exists", key),
            ));
        }
        Ok(())
    }
}

impl<R: Record> fmt::Debug for RecordStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("kind", &R::KIND)
            .field("record_count", &self.len())
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Employee, EmployeeStatus};

    fn make_store() -> RecordStore<Employee> {
        let mut store = RecordStore::new();
        store
            .create(Employee::new("E1001", "John Doe").with_team("Platform"), "admin")
            .unwrap();
        store
            .create(Employee::new("E1002", "Jane Smith").with_team("Data"), "admin")
            .unwrap();
        store
            .create(Employee::new("E1003", "Wei Chen").with_team("Platform"), "admin")
            .unwrap();
        store
    }

    #[test]
    fn test_create_assigns_unique_ids_and_stamps() {
        let store = make_store();
        assert_eq!(store.len(), 3);

        let ids: HashSet<RecordId> = store.list().iter().map(|s| s.id()).collect();
        assert_eq!(ids.len(), 3);

        let first = &store.list()[0];
        assert_eq!(first.audit.created_by, "admin");
        assert_eq!(first.audit.created_at, first.audit.updated_at);
    }

    #[test]
    fn test_create_rejects_duplicate_business_key() {
        let mut store = make_store();
        let err = store
            .create(Employee::new("E1001", "Impostor"), "admin")
            .unwrap_err();
        assert!(matches!(err, RosterError::Validation { field, .. } if field == "employee_id"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = make_store();
        let names: Vec<&str> = store
            .list()
            .iter()
            .map(|s| s.record.name.as_str())
            .collect();
        assert_eq!(names, ["John Doe", "Jane Smith", "Wei Chen"]);
    }

    #[test]
    fn test_update_replaces_wholesale_and_touches_audit() {
        let mut store = make_store();
        let id = store.list()[1].id();
        let created_at = store.get(id).unwrap().audit.created_at;

        let replacement = Employee::new("E1002", "Jane Smith")
            .with_team("Infra")
            .with_status(EmployeeStatus::Inactive);
        store.update(id, replacement, "editor").unwrap();

        let stored = store.get(id).unwrap();
        assert_eq!(stored.record.core_team.as_deref(), Some("Infra"));
        assert_eq!(stored.record.status, EmployeeStatus::Inactive);
        assert_eq!(stored.audit.updated_by, "editor");
        assert_eq!(stored.audit.created_by, "admin");
        assert_eq!(stored.audit.created_at, created_at);
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let mut store = make_store();
        let mut ghost = RecordStore::<Employee>::new();
        let id = ghost.create(Employee::new("E9", "Ghost"), "admin").unwrap();

        let err = store.update(id, Employee::new("E9", "Ghost"), "admin").unwrap_err();
        assert!(matches!(err, RosterError::NotFound { .. }));
    }

    #[test]
    fn test_update_rejects_stealing_business_key() {
        let mut store = make_store();
        let id = store.list()[1].id();

        // Renaming E1002 to E1001 would collide with a different record
        let err = store
            .update(id, Employee::new("E1001", "Jane Smith"), "admin")
            .unwrap_err();
        assert!(matches!(err, RosterError::Validation { .. }));

        // Keeping its own key is fine
        store
            .update(id, Employee::new("E1002", "Jane Q. Smith"), "admin")
            .unwrap();
    }

    #[test]
    fn test_delete_removes_id_from_list() {
        let mut store = make_store();
        let id = store.list()[0].id();

        store.delete(id).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get(id).is_none());
        assert!(store.list().iter().all(|s| s.id() != id));
        // Remaining records still resolve through the index
        let survivor = store.list()[1].id();
        assert_eq!(store.get(survivor).unwrap().id(), survivor);
    }

    #[test]
    fn test_delete_is_strict_about_missing_ids() {
        // Strict mode: deleting an absent id is an error, not a no-op.
        let mut store = make_store();
        let id = store.list()[0].id();
        store.delete(id).unwrap();

        let err = store.delete(id).unwrap_err();
        assert!(matches!(err, RosterError::NotFound { .. }));
    }

    #[test]
    fn test_delete_many_skips_missing_ids() {
        let mut store = make_store();
        let keep = store.list()[0].id();
        let a = store.list()[1].id();
        let b = store.list()[2].id();

        let removed = store.delete_many(&[a, b]);
        assert_eq!(removed, 2);

        // Stale ids in a later bulk delete are silently skipped
        let removed = store.delete_many(&[a, b, keep]);
        assert_eq!(removed, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_generation_increments_on_mutation() {
        let mut store = RecordStore::<Employee>::new();
        let g0 = store.generation();

        let id = store.create(Employee::new("E1", "A"), "admin").unwrap();
        let g1 = store.generation();
        assert!(g1 > g0);

        store.update(id, Employee::new("E1", "A2"), "admin").unwrap();
        let g2 = store.generation();
        assert!(g2 > g1);

        store.delete(id).unwrap();
        assert!(store.generation() > g2);

        // A no-op bulk delete does not invalidate views
        let g3 = store.generation();
        store.delete_many(&[id]);
        assert_eq!(store.generation(), g3);
    }
}
