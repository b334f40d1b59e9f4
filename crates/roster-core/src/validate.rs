//! Field-level validation for candidate records.
//!
//! These checks belong to the form and import collaborators: they run
//! *before* a candidate reaches the store, which itself re-checks only
//! identity and business-key uniqueness. Every failure is a
//! [`Validation`](crate::error::RosterError::Validation) error naming the
//! offending field so it can be surfaced inline.

use crate::error::{Result, RosterError};
use crate::types::{Employee, HiringRequisition};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Loose email shape check, matching the intake form's rule.
fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("static pattern compiles"))
}

/// Validate an employee candidate against the intake form's rules.
///
/// Required: employee id, name, email, contact number, hire date, core
/// team, manager, job title, core alignment, base location. The contact
/// number must contain exactly 10 digits; the termination date, when
/// present, must not precede the hire date; skills must not repeat.
pub fn validate_employee(employee: &Employee) -> Result<()> {
    require("employee_id", &employee.employee_id)?;
    require("name", &employee.name)?;

    let email = require_opt("email", &employee.email)?;
    if !email_pattern().is_match(email.trim()) {
        return Err(RosterError::validation("email", "email is invalid"));
    }

    let number = require_opt("contact_number", &employee.contact_number)?;
    normalize_phone(number)?;

    if employee.date_of_joining.is_none() {
        return Err(RosterError::validation("date_of_joining", "hire date is required"));
    }
    require_opt("core_team", &employee.core_team)?;
    require_opt("manager", &employee.manager)?;
    require_opt("job_title", &employee.job_title)?;
    require_opt("core_alignment", &employee.core_alignment)?;
    require_opt("base_location", &employee.base_location)?;

    if let (Some(joined), Some(terminated)) =
        (employee.date_of_joining, employee.date_of_termination)
    {
        if terminated < joined {
            return Err(RosterError::validation(
                "date_of_termination",
                "termination date must be on or after hire date",
            ));
        }
    }

    check_skills(&employee.skills)
}

/// Validate a hiring requisition candidate against the intake form's rules.
pub fn validate_hiring(requisition: &HiringRequisition) -> Result<()> {
    require("team", &requisition.team)?;
    require("candidate_name", &requisition.candidate_name)?;
    require("hiring_manager", &requisition.hiring_manager)?;
    require_opt("experience_level", &requisition.experience_level)?;

    check_skills(&requisition.skills)
}

/// Strip formatting from a contact number, keeping digits only.
///
/// Accepts inputs like `(415) 555-0134` or `415.555.0134`; anything that
/// does not reduce to exactly 10 digits is rejected.
pub fn normalize_phone(raw: &str) -> Result<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        Ok(digits)
    } else {
        Err(RosterError::validation(
            "contact_number",
            "contact number must be 10 digits",
        ))
    }
}

/// Reject case-sensitive duplicate skill tags.
pub fn check_skills(skills: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for skill in skills {
        if !seen.insert(skill.as_str()) {
            return Err(RosterError::validation(
                "skills",
                format!("duplicate skill '{}'", skill),
            ));
        }
    }
    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RosterError::validation(field, format!("{} is required", field)));
    }
    Ok(())
}

fn require_opt<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RosterError::validation(field, format!("{} is required", field))),
    }
}
