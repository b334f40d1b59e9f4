//! Core record types for Roster.
//!
//! This module defines the two record variants managed by the dashboard —
//! employees and hiring requisitions — together with the identity, audit,
//! and field-projection machinery the store and query engine are built on.
//! These types are designed to be:
//!
//! - **Serializable**: For JSON output and config round-trips
//! - **Closed where the domain is closed**: status and role-type values are
//!   enums, not strings, so an out-of-vocabulary value cannot enter the store
//! - **Uniformly queryable**: both variants project named fields through the
//!   [`Record`] trait so one query engine serves both tables

use crate::error::RosterError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identity of a stored record.
///
/// Assigned by the store at creation time, globally unique, immutable for
/// the life of the record, and never reused after deletion. Selection and
/// delete operations are keyed by this id, never by table position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Mint a fresh id. Only the store creates ids for live records.
    pub(crate) fn generate() -> Self {
        RecordId(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Audit stamps carried by every stored record.
///
/// `created_*` is set once when the store accepts the record; `updated_*`
/// is refreshed on every mutation that goes through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

impl Audit {
    /// Stamp a newly created record.
    pub(crate) fn stamp(actor: &str) -> Self {
        let now = Utc::now();
        Audit {
            created_by: actor.to_string(),
            created_at: now,
            updated_by: actor.to_string(),
            updated_at: now,
        }
    }

    /// Refresh the update stamps after a mutation.
    pub(crate) fn touch(&mut self, actor: &str) {
        self.updated_by = actor.to_string();
        self.updated_at = Utc::now();
    }
}

/// A record plus the identity and audit data the store attached to it.
///
/// Candidates enter the store as a bare `R` (no identity yet); the store
/// wraps them. Equality and hashing are identity-based, like ids in a
/// database, so two stored records with equal payloads are still distinct.
#[derive(Debug, Clone, Serialize)]
pub struct Stored<R> {
    id: RecordId,
    pub audit: Audit,
    pub record: R,
}

impl<R> Stored<R> {
    pub(crate) fn new(id: RecordId, audit: Audit, record: R) -> Self {
        Stored { id, audit, record }
    }

    /// The immutable identity assigned at creation.
    pub fn id(&self) -> RecordId {
        self.id
    }
}

impl<R> PartialEq for Stored<R> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<R> Eq for Stored<R> {}

impl<R> Hash for Stored<R> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A field projected for filtering and sorting.
///
/// The variant decides the match rule: free text filters by case-insensitive
/// containment, keywords (closed enumerations) by exact match on the
/// canonical spelling, dates by exact match on the ISO rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Free text
    Text(Cow<'a, str>),
    /// Canonical spelling of a closed-enumeration value
    Keyword(&'static str),
    /// Calendar date
    Date(NaiveDate),
}

impl FieldValue<'_> {
    /// Render the value as text, for sorting and display.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(t) => Cow::Borrowed(t.as_ref()),
            FieldValue::Keyword(k) => Cow::Borrowed(k),
            FieldValue::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Behavior shared by the record variants the store can hold.
///
/// The query engine, export columns, and session controller are generic
/// over this trait; adding a third record variant means implementing it and
/// nothing else.
pub trait Record {
    /// Dataset name used in logs and messages ("employee", "hiring")
    const KIND: &'static str;

    /// Field keys this record type can project, in display order
    const FIELDS: &'static [&'static str];

    /// Name of the unique business-key field, if the type has one
    const BUSINESS_KEY_FIELD: Option<&'static str> = None;

    /// The unique business key value, if the type has one.
    ///
    /// The store rejects a `create` whose key collides with a live record.
    fn business_key(&self) -> Option<&str> {
        None
    }

    /// Project a named field for filtering and sorting.
    ///
    /// Returns `None` for keys this record type does not have; the query
    /// engine treats that as a non-match, not an error.
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;
}

// === Employee ===

/// Employment status of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Open,
    Active,
    Term,
    Inactive,
}

impl EmployeeStatus {
    /// All declared statuses, in form-dropdown order
    pub const ALL: [EmployeeStatus; 4] = [
        EmployeeStatus::Open,
        EmployeeStatus::Active,
        EmployeeStatus::Term,
        EmployeeStatus::Inactive,
    ];

    /// Canonical spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Open => "Open",
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Term => "Term",
            EmployeeStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RosterError::validation("status", format!("unknown status '{}'", s)))
    }
}

/// Engineering classification of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleType {
    Engineering,
    NonEngineering,
    Both,
}

impl RoleType {
    /// All declared role types
    pub const ALL: [RoleType; 3] = [RoleType::Engineering, RoleType::NonEngineering, RoleType::Both];

    /// Canonical spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::Engineering => "Engineering",
            RoleType::NonEngineering => "NonEngineering",
            RoleType::Both => "Both",
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleType {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                RosterError::validation("role_type", format!("unknown role type '{}'", s))
            })
    }
}

/// An employee record.
///
/// Optional fields are genuinely optional in the domain; the form layer
/// decides which of them are required before a candidate reaches the store
/// (see `validate`). `skills` must not contain case-sensitive duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Business key, unique across the collection (e.g. "E1001")
    pub employee_id: String,
    pub name: String,
    pub core_alignment: Option<String>,
    pub core_team: Option<String>,
    pub secondary_team: Option<String>,
    pub email: Option<String>,
    /// Normalized to exactly 10 digits by validation
    pub contact_number: Option<String>,
    pub date_of_joining: Option<NaiveDate>,
    pub date_of_termination: Option<NaiveDate>,
    pub role: Option<String>,
    pub status: EmployeeStatus,
    pub job_title: Option<String>,
    pub role_type: RoleType,
    pub base_location: Option<String>,
    pub manager: Option<String>,
    pub vendor: Option<String>,
    pub skills: Vec<String>,
}

impl Employee {
    /// Create an employee with the required identity fields.
    ///
    /// Defaults: status `Active`, role type `Engineering`, everything else
    /// unset. Use the `with_*` builders for the rest.
    pub fn new(employee_id: impl Into<String>, name: impl Into<String>) -> Self {
        Employee {
            employee_id: employee_id.into(),
            name: name.into(),
            core_alignment: None,
            core_team: None,
            secondary_team: None,
            email: None,
            contact_number: None,
            date_of_joining: None,
            date_of_termination: None,
            role: None,
            status: EmployeeStatus::Active,
            job_title: None,
            role_type: RoleType::Engineering,
            base_location: None,
            manager: None,
            vendor: None,
            skills: Vec::new(),
        }
    }

    /// Set the employment status
    pub fn with_status(mut self, status: EmployeeStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the role type
    pub fn with_role_type(mut self, role_type: RoleType) -> Self {
        self.role_type = role_type;
        self
    }

    /// Set the core team
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.core_team = Some(team.into());
        self
    }

    /// Set the core alignment
    pub fn with_alignment(mut self, alignment: impl Into<String>) -> Self {
        self.core_alignment = Some(alignment.into());
        self
    }

    /// Set the manager
    pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
        self.manager = Some(manager.into());
        self
    }

    /// Set the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the contact number
    pub fn with_contact_number(mut self, number: impl Into<String>) -> Self {
        self.contact_number = Some(number.into());
        self
    }

    /// Set the hire date
    pub fn with_joining(mut self, date: NaiveDate) -> Self {
        self.date_of_joining = Some(date);
        self
    }

    /// Set the job title
    pub fn with_job_title(mut self, title: impl Into<String>) -> Self {
        self.job_title = Some(title.into());
        self
    }

    /// Set the base location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.base_location = Some(location.into());
        self
    }

    /// Set the skill tags
    pub fn with_skills(mut self, skills: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }
}

impl Record for Employee {
    const KIND: &'static str = "employee";

    const FIELDS: &'static [&'static str] = &[
        "employee_id",
        "name",
        "core_alignment",
        "core_team",
        "secondary_team",
        "email",
        "contact_number",
        "date_of_joining",
        "date_of_termination",
        "role",
        "status",
        "job_title",
        "role_type",
        "base_location",
        "manager",
        "vendor",
        "skills",
    ];

    const BUSINESS_KEY_FIELD: Option<&'static str> = Some("employee_id");

    fn business_key(&self) -> Option<&str> {
        Some(&self.employee_id)
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "employee_id" => Some(text(&self.employee_id)),
            "name" => Some(text(&self.name)),
            "core_alignment" => opt_text(&self.core_alignment),
            "core_team" => opt_text(&self.core_team),
            "secondary_team" => opt_text(&self.secondary_team),
            "email" => opt_text(&self.email),
            "contact_number" => opt_text(&self.contact_number),
            "date_of_joining" => self.date_of_joining.map(FieldValue::Date),
            "date_of_termination" => self.date_of_termination.map(FieldValue::Date),
            "role" => opt_text(&self.role),
            "status" => Some(FieldValue::Keyword(self.status.as_str())),
            "job_title" => opt_text(&self.job_title),
            "role_type" => Some(FieldValue::Keyword(self.role_type.as_str())),
            "base_location" => opt_text(&self.base_location),
            "manager" => opt_text(&self.manager),
            "vendor" => opt_text(&self.vendor),
            "skills" => Some(FieldValue::Text(Cow::Owned(self.skills.join(", ")))),
            _ => None,
        }
    }
}

// === Hiring requisition ===

/// Pipeline status of a hiring requisition.
///
/// Canonical spellings match the original intake form options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HiringStatus {
    Hired,
    #[serde(rename = "Active hiring")]
    ActiveHiring,
    #[serde(rename = "To be approved")]
    ToBeApproved,
    Approved,
    #[serde(rename = "Need to ask profiles")]
    NeedToAskProfiles,
    #[serde(rename = "On Hold")]
    OnHold,
    Cancelled,
}

impl HiringStatus {
    /// All declared statuses, in form-dropdown order
    pub const ALL: [HiringStatus; 7] = [
        HiringStatus::Hired,
        HiringStatus::ActiveHiring,
        HiringStatus::ToBeApproved,
        HiringStatus::Approved,
        HiringStatus::NeedToAskProfiles,
        HiringStatus::OnHold,
        HiringStatus::Cancelled,
    ];

    /// Canonical spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            HiringStatus::Hired => "Hired",
            HiringStatus::ActiveHiring => "Active hiring",
            HiringStatus::ToBeApproved => "To be approved",
            HiringStatus::Approved => "Approved",
            HiringStatus::NeedToAskProfiles => "Need to ask profiles",
            HiringStatus::OnHold => "On Hold",
            HiringStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for HiringStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HiringStatus {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                RosterError::validation("status", format!("unknown hiring status '{}'", s))
            })
    }
}

/// A hiring requisition record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiringRequisition {
    pub team: String,
    pub requisition_type: Option<String>,
    pub sharepoint_id: Option<String>,
    pub incremental_type: Option<String>,
    pub skills: Vec<String>,
    pub experience_level: Option<String>,
    pub candidate_name: String,
    pub remarks: Option<String>,
    pub status: HiringStatus,
    pub vendor: Option<String>,
    pub hiring_manager: String,
}

impl HiringRequisition {
    /// Create a requisition with the required fields.
    ///
    /// Defaults to `Active hiring`, the intake form's initial status.
    pub fn new(
        team: impl Into<String>,
        candidate_name: impl Into<String>,
        hiring_manager: impl Into<String>,
    ) -> Self {
        HiringRequisition {
            team: team.into(),
            requisition_type: None,
            sharepoint_id: None,
            incremental_type: None,
            skills: Vec::new(),
            experience_level: None,
            candidate_name: candidate_name.into(),
            remarks: None,
            status: HiringStatus::ActiveHiring,
            vendor: None,
            hiring_manager: hiring_manager.into(),
        }
    }

    /// Set the pipeline status
    pub fn with_status(mut self, status: HiringStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the experience level
    pub fn with_experience(mut self, level: impl Into<String>) -> Self {
        self.experience_level = Some(level.into());
        self
    }

    /// Set the vendor
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Set the skill tags
    pub fn with_skills(mut self, skills: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }
}

impl Record for HiringRequisition {
    const KIND: &'static str = "hiring";

    const FIELDS: &'static [&'static str] = &[
        "team",
        "requisition_type",
        "sharepoint_id",
        "incremental_type",
        "skills",
        "experience_level",
        "candidate_name",
        "remarks",
        "status",
        "vendor",
        "hiring_manager",
    ];

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "team" => Some(text(&self.team)),
            "requisition_type" => opt_text(&self.requisition_type),
            "sharepoint_id" => opt_text(&self.sharepoint_id),
            "incremental_type" => opt_text(&self.incremental_type),
            "skills" => Some(FieldValue::Text(Cow::Owned(self.skills.join(", ")))),
            "experience_level" => opt_text(&self.experience_level),
            "candidate_name" => Some(text(&self.candidate_name)),
            "remarks" => opt_text(&self.remarks),
            "status" => Some(FieldValue::Keyword(self.status.as_str())),
            "vendor" => opt_text(&self.vendor),
            "hiring_manager" => Some(text(&self.hiring_manager)),
            _ => None,
        }
    }
}

fn text(value: &str) -> FieldValue<'_> {
    FieldValue::Text(Cow::Borrowed(value))
}

fn opt_text(value: &Option<String>) -> Option<FieldValue<'_>> {
    value.as_deref().map(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in EmployeeStatus::ALL {
            assert_eq!(status.as_str().parse::<EmployeeStatus>().unwrap(), status);
        }
        for status in HiringStatus::ALL {
            assert_eq!(status.as_str().parse::<HiringStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(
            "active".parse::<EmployeeStatus>().unwrap(),
            EmployeeStatus::Active
        );
        assert_eq!(
            "on hold".parse::<HiringStatus>().unwrap(),
            HiringStatus::OnHold
        );
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let err = "Retired".parse::<EmployeeStatus>().unwrap_err();
        assert!(matches!(err, RosterError::Validation { field, .. } if field == "status"));

        assert!("Contractor".parse::<RoleType>().is_err());
    }

    #[test]
    fn test_employee_field_projection() {
        let emp = Employee::new("E1001", "John Doe")
            .with_team("Platform")
            .with_skills(["React", "SQL"]);

        assert_eq!(
            emp.field("name"),
            Some(FieldValue::Text(Cow::Borrowed("John Doe")))
        );
        assert_eq!(emp.field("status"), Some(FieldValue::Keyword("Active")));
        assert_eq!(
            emp.field("skills").unwrap().as_text().as_ref(),
            "React, SQL"
        );
        // Unset optional field projects to nothing
        assert_eq!(emp.field("vendor"), None);
        // Unknown field projects to nothing rather than erroring
        assert_eq!(emp.field("sharepoint_id"), None);
    }

    #[test]
    fn test_hiring_field_projection() {
        let req = HiringRequisition::new("Data", "Jane Smith", "Keshav")
            .with_status(HiringStatus::OnHold);

        assert_eq!(req.field("status"), Some(FieldValue::Keyword("On Hold")));
        assert_eq!(
            req.field("hiring_manager"),
            Some(FieldValue::Text(Cow::Borrowed("Keshav")))
        );
        assert_eq!(req.field("employee_id"), None);
    }

    #[test]
    fn test_date_field_renders_iso() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 15).unwrap();
        let emp = Employee::new("E1", "A").with_joining(date);
        assert_eq!(
            emp.field("date_of_joining").unwrap().as_text().as_ref(),
            "2021-03-15"
        );
    }

    #[test]
    fn test_business_key() {
        let emp = Employee::new("E1001", "John Doe");
        assert_eq!(emp.business_key(), Some("E1001"));
        assert_eq!(Employee::BUSINESS_KEY_FIELD, Some("employee_id"));

        let req = HiringRequisition::new("Data", "Jane", "Keshav");
        assert_eq!(req.business_key(), None);
    }
}
