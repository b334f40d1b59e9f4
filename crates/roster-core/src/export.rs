//! Delimited-text export.
//!
//! Converts a record sequence into a delimited document: one header row of
//! column display names, one row per record. Quoting follows the common
//! CSV rule — a cell is quoted only when it contains the delimiter, a
//! double quote, or a line break, and embedded quotes are doubled — so the
//! output round-trips through the import parser. Multi-valued fields
//! (skills) flatten to a `", "`-joined sub-list inside one cell.

use crate::types::{Employee, HiringRequisition, Stored};
use chrono::NaiveDate;
use std::borrow::Cow;

/// One exported column: a display name and a projection.
pub struct Column<R> {
    /// Header display name
    pub header: &'static str,

    extract: fn(&Stored<R>) -> String,
}

impl<R> Column<R> {
    /// Define a column.
    pub fn new(header: &'static str, extract: fn(&Stored<R>) -> String) -> Self {
        Column { header, extract }
    }

    /// Project the cell value for one record.
    pub fn value(&self, stored: &Stored<R>) -> String {
        (self.extract)(stored)
    }
}

/// Serialize records into a delimited document.
///
/// The caller chooses the slice: pass the full collection or a filtered
/// one, the serializer does not care.
pub fn serialize<R>(records: &[Stored<R>], columns: &[Column<R>], delimiter: char) -> String {
    let sep = delimiter.to_string();
    let mut out = String::new();

    let header: Vec<String> = columns
        .iter()
        .map(|c| escape_cell(c.header, delimiter).into_owned())
        .collect();
    out.push_str(&header.join(sep.as_str()));
    out.push('\n');

    for stored in records {
        let row: Vec<String> = columns
            .iter()
            .map(|c| escape_cell(&c.value(stored), delimiter).into_owned())
            .collect();
        out.push_str(&row.join(sep.as_str()));
        out.push('\n');
    }

    out
}

/// The employee export columns, in the dashboard's order.
pub fn employee_columns() -> Vec<Column<Employee>> {
    vec![
        Column::new("Employee ID", |s| s.record.employee_id.clone()),
        Column::new("Name", |s| s.record.name.clone()),
        Column::new("Core Alignment", |s| opt(&s.record.core_alignment)),
        Column::new("Core Team", |s| opt(&s.record.core_team)),
        Column::new("Secondary Team", |s| opt(&s.record.secondary_team)),
        Column::new("Email", |s| opt(&s.record.email)),
        Column::new("Contact Number", |s| opt(&s.record.contact_number)),
        Column::new("Hire Date", |s| date(s.record.date_of_joining)),
        Column::new("Termination Date", |s| date(s.record.date_of_termination)),
        Column::new("Job Title", |s| opt(&s.record.job_title)),
        Column::new("Role Type", |s| s.record.role_type.to_string()),
        Column::new("Location", |s| opt(&s.record.base_location)),
        Column::new("Manager", |s| opt(&s.record.manager)),
        Column::new("Vendor", |s| opt(&s.record.vendor)),
        Column::new("Skills", |s| s.record.skills.join(", ")),
        Column::new("Status", |s| s.record.status.to_string()),
    ]
}

/// The hiring export columns, in the dashboard's order.
pub fn hiring_columns() -> Vec<Column<HiringRequisition>> {
    vec![
        Column::new("Team", |s| s.record.team.clone()),
        Column::new("Requisition Type", |s| opt(&s.record.requisition_type)),
        Column::new("Sharepoint ID", |s| opt(&s.record.sharepoint_id)),
        Column::new("Incremental Type", |s| opt(&s.record.incremental_type)),
        Column::new("Skills", |s| s.record.skills.join(", ")),
        Column::new("Experience Level", |s| opt(&s.record.experience_level)),
        Column::new("Candidate Name", |s| s.record.candidate_name.clone()),
        Column::new("Remarks", |s| opt(&s.record.remarks)),
        Column::new("Status", |s| s.record.status.to_string()),
        Column::new("Vendor", |s| opt(&s.record.vendor)),
        Column::new("Hiring Manager", |s| s.record.hiring_manager.clone()),
    ]
}

/// Quote a cell when its content would break the row structure.
fn escape_cell(value: &str, delimiter: char) -> Cow<'_, str> {
    if value.contains(delimiter) || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
