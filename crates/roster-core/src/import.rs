//! Bulk import from delimited text.
//!
//! The importer is the inverse of the export serializer: it parses a
//! delimited document (header row first), maps columns to fields by
//! header name, validates each row, and creates one record per row
//! through the session. Import is partial-failure tolerant: a bad row is
//! recorded and skipped, the remaining rows continue, and the failures
//! are reported together at the end.

use crate::error::{Result, RosterError};
use crate::session::Session;
use crate::types::{Employee, HiringRequisition};
use crate::validate;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{info, warn};

/// Required employee columns; a file missing any of these is rejected
/// before any row is created.
pub const EMPLOYEE_REQUIRED: &[&str] = &[
    "Employee ID",
    "Name",
    "Email",
    "Contact Number",
    "Hire Date",
    "Core Team",
    "Manager",
    "Job Title",
    "Core Alignment",
    "Base Location",
];

/// Optional employee columns.
pub const EMPLOYEE_OPTIONAL: &[&str] = &[
    "Secondary Team",
    "Vendor",
    "Skills",
    "Role Type",
    "Status",
    "Termination Date",
];

/// Required hiring columns.
pub const HIRING_REQUIRED: &[&str] = &[
    "Candidate Name",
    "Team",
    "Experience Level",
    "Hiring Manager",
    "Status",
];

/// Optional hiring columns.
pub const HIRING_OPTIONAL: &[&str] = &[
    "Requisition Type",
    "Sharepoint ID",
    "Incremental Type",
    "Skills",
    "Vendor",
    "Remarks",
];

/// Outcome of a bulk import run.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Rows successfully created
    pub imported: usize,

    /// Per-row failures, in input order
    pub errors: Vec<RowError>,
}

/// One failed row.
#[derive(Debug)]
pub struct RowError {
    /// 1-based line in the input file
    pub line: usize,
    pub reason: String,
}

/// Parse delimited text into rows of cells.
///
/// Handles quoted cells containing the delimiter, doubled quotes, and
/// embedded line breaks; both `\n` and `\r\n` end a row. Fails on a quote
/// that never closes.
pub fn parse(text: &str, delimiter: char) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut line = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        cell.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    cell.push(c);
                    line += 1;
                }
                _ => cell.push(c),
            }
        } else {
            match c {
                '"' if cell.is_empty() => in_quotes = true,
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' => {
                    row.push(std::mem::take(&mut cell));
                    rows.push(std::mem::take(&mut row));
                    line += 1;
                }
                c if c == delimiter => row.push(std::mem::take(&mut cell)),
                _ => cell.push(c),
            }
        }
    }

    if in_quotes {
        return Err(RosterError::malformed_row(line, "unterminated quoted cell"));
    }
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    // A trailing blank line parses as an empty row; drop it
    rows.retain(|r| !(r.len() == 1 && r[0].is_empty()));

    Ok(rows)
}

/// Column positions resolved from a header row, case-insensitively.
struct HeaderMap {
    indices: HashMap<String, usize>,
}

impl HeaderMap {
    fn new(header: &[String]) -> Self {
        let indices = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_lowercase(), i))
            .collect();
        HeaderMap { indices }
    }

    fn require_columns(&self, required: &[&str]) -> Result<()> {
        for name in required {
            if !self.indices.contains_key(&name.to_lowercase()) {
                return Err(RosterError::malformed_row(
                    1,
                    format!("missing required column '{}'", name),
                ));
            }
        }
        Ok(())
    }

    /// The trimmed cell under `column`, or `None` when the column is
    /// absent or the cell is blank.
    fn cell<'a>(&self, row: &'a [String], column: &str) -> Option<&'a str> {
        let idx = *self.indices.get(&column.to_lowercase())?;
        let value = row.get(idx)?.trim();
        (!value.is_empty()).then_some(value)
    }

    fn required_cell<'a>(&self, row: &'a [String], column: &str, line: usize) -> Result<&'a str> {
        self.cell(row, column)
            .ok_or_else(|| RosterError::malformed_row(line, format!("missing value for {}", column)))
    }
}

/// Import employees from delimited text into `session`.
pub fn import_employees(
    session: &mut Session<Employee>,
    text: &str,
    delimiter: char,
) -> Result<ImportReport> {
    let rows = parse(text, delimiter)?;
    let Some((header, body)) = rows.split_first() else {
        return Err(RosterError::malformed_row(1, "input has no header row"));
    };
    let map = HeaderMap::new(header);
    map.require_columns(EMPLOYEE_REQUIRED)?;

    let mut report = ImportReport::default();
    for (i, row) in body.iter().enumerate() {
        let line = i + 2;
        let outcome = employee_from_row(&map, row, line)
            .and_then(|emp| session.create(emp).map(|_| ()));
        match outcome {
            Ok(()) => report.imported += 1,
            Err(err) => {
                warn!(line, %err, "import row failed");
                report.errors.push(RowError {
                    line,
                    reason: err.to_string(),
                });
            }
        }
    }

    info!(
        imported = report.imported,
        failed = report.errors.len(),
        "employee import finished"
    );
    Ok(report)
}

/// Import hiring requisitions from delimited text into `session`.
pub fn import_hiring(
    session: &mut Session<HiringRequisition>,
    text: &str,
    delimiter: char,
) -> Result<ImportReport> {
    let rows = parse(text, delimiter)?;
    let Some((header, body)) = rows.split_first() else {
        return Err(RosterError::malformed_row(1, "input has no header row"));
    };
    let map = HeaderMap::new(header);
    map.require_columns(HIRING_REQUIRED)?;

    let mut report = ImportReport::default();
    for (i, row) in body.iter().enumerate() {
        let line = i + 2;
        let outcome = hiring_from_row(&map, row, line)
            .and_then(|req| session.create(req).map(|_| ()));
        match outcome {
            Ok(()) => report.imported += 1,
            Err(err) => {
                warn!(line, %err, "import row failed");
                report.errors.push(RowError {
                    line,
                    reason: err.to_string(),
                });
            }
        }
    }

    info!(
        imported = report.imported,
        failed = report.errors.len(),
        "hiring import finished"
    );
    Ok(report)
}

fn employee_from_row(map: &HeaderMap, row: &[String], line: usize) -> Result<Employee> {
    let mut emp = Employee::new(
        map.required_cell(row, "Employee ID", line)?,
        map.required_cell(row, "Name", line)?,
    );

    emp.email = Some(map.required_cell(row, "Email", line)?.to_string());
    let phone = map.required_cell(row, "Contact Number", line)?;
    emp.contact_number = Some(validate::normalize_phone(phone)?);
    emp.date_of_joining = Some(parse_date(map.required_cell(row, "Hire Date", line)?, line)?);
    emp.core_team = Some(map.required_cell(row, "Core Team", line)?.to_string());
    emp.manager = Some(map.required_cell(row, "Manager", line)?.to_string());
    emp.job_title = Some(map.required_cell(row, "Job Title", line)?.to_string());
    emp.core_alignment = Some(map.required_cell(row, "Core Alignment", line)?.to_string());
    emp.base_location = Some(map.required_cell(row, "Base Location", line)?.to_string());

    emp.secondary_team = map.cell(row, "Secondary Team").map(str::to_string);
    emp.vendor = map.cell(row, "Vendor").map(str::to_string);
    if let Some(skills) = map.cell(row, "Skills") {
        emp.skills = split_skills(skills);
    }
    if let Some(role_type) = map.cell(row, "Role Type") {
        emp.role_type = role_type.parse()?;
    }
    if let Some(status) = map.cell(row, "Status") {
        emp.status = status.parse()?;
    }
    if let Some(termination) = map.cell(row, "Termination Date") {
        emp.date_of_termination = Some(parse_date(termination, line)?);
    }

    validate::validate_employee(&emp)?;
    Ok(emp)
}

fn hiring_from_row(map: &HeaderMap, row: &[String], line: usize) -> Result<HiringRequisition> {
    let mut req = HiringRequisition::new(
        map.required_cell(row, "Team", line)?,
        map.required_cell(row, "Candidate Name", line)?,
        map.required_cell(row, "Hiring Manager", line)?,
    );

    req.experience_level = Some(map.required_cell(row, "Experience Level", line)?.to_string());
    req.status = map.required_cell(row, "Status", line)?.parse()?;

    req.requisition_type = map.cell(row, "Requisition Type").map(str::to_string);
    req.sharepoint_id = map.cell(row, "Sharepoint ID").map(str::to_string);
    req.incremental_type = map.cell(row, "Incremental Type").map(str::to_string);
    req.vendor = map.cell(row, "Vendor").map(str::to_string);
    req.remarks = map.cell(row, "Remarks").map(str::to_string);
    if let Some(skills) = map.cell(row, "Skills") {
        req.skills = split_skills(skills);
    }

    validate::validate_hiring(&req)?;
    Ok(req)
}

/// Split a flattened skills cell, dropping blanks and repeats.
fn split_skills(cell: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in cell.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !skills.iter().any(|s| s == skill) {
            skills.push(skill.to_string());
        }
    }
    skills
}

/// Accept ISO dates and the US form the original templates used.
fn parse_date(cell: &str, line: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(cell, "%m/%d/%Y"))
        .map_err(|_| RosterError::malformed_row(line, format!("unparseable date '{}'", cell)))
}
