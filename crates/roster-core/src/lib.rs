//! # Roster Core Library
//!
//! This crate provides the record model, in-memory store, query engine,
//! and session controller for the Roster workforce dashboard. It holds no
//! UI and no persistence: all state lives in memory for the life of a
//! session, seeded from static mock data, exactly one owner per session.
//!
//! ## Architecture
//!
//! - **Types** (`types`): record variants, identity, audit stamps, field
//!   projection
//! - **Store** (`store`): the authoritative in-memory collection
//! - **Query** (`query`): filtered, sorted, paginated view derivation
//! - **Selection** (`selection`): id-keyed selection for bulk actions
//! - **Session** (`session`): the controller wiring the pieces together,
//!   driven by table-view intents
//! - **Validate** (`validate`): form-layer field rules
//! - **Export / Import** (`export`, `import`): delimited-text round trip
//! - **Seed** (`seed`): static mock data
//! - **Config** (`config`): configuration management
//!
//! ## Example
//!
//! ```rust
//! use roster_core::{seed, Intent, Session};
//!
//! let mut session = Session::new("admin");
//! session.load(seed::employees()).unwrap();
//!
//! session
//!     .apply(Intent::AddFilter {
//!         field: "core_team".into(),
//!         value: "Platform".into(),
//!     })
//!     .unwrap();
//!
//! let page = session.page();
//! println!("{} of {} records", page.records.len(), page.total_count);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod query;
pub mod seed;
pub mod selection;
pub mod session;
pub mod store;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, RosterError};
pub use query::{Filter, Page, Query, Sort, SortDirection};
pub use selection::SelectionTracker;
pub use session::{Intent, Session};
pub use store::RecordStore;
pub use types::{
    Audit, Employee, EmployeeStatus, FieldValue, HiringRequisition, HiringStatus, Record, RecordId,
    RoleType, Stored,
};
