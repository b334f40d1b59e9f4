//! Static mock data used to seed a fresh session.
//!
//! There is no persistence layer; every session starts from this data the
//! way the original dashboard starts from its bundled mock arrays.

use crate::types::{Employee, EmployeeStatus, HiringRequisition, HiringStatus, RoleType};
use chrono::NaiveDate;

/// The seed employee collection.
pub fn employees() -> Vec<Employee> {
    vec![
        Employee::new("E1001", "John Doe")
            .with_team("Platform")
            .with_alignment("Product")
            .with_manager("Sarah Mitchell")
            .with_email("john.doe@example.com")
            .with_contact_number("4155550134")
            .with_joining(date(2021, 3, 15))
            .with_job_title("Software Engineer")
            .with_location("Austin")
            .with_skills(["React", "SQL"]),
        Employee::new("E1002", "Jane Smith")
            .with_team("Data")
            .with_alignment("Analytics")
            .with_manager("David Thompson")
            .with_email("jane.smith@example.com")
            .with_contact_number("4155550178")
            .with_joining(date(2019, 11, 4))
            .with_job_title("Data Engineer")
            .with_location("Seattle")
            .with_skills(["Python", "Spark", "Airflow"]),
        Employee::new("E1003", "Wei Chen")
            .with_team("Platform")
            .with_alignment("Reliability")
            .with_manager("Sarah Mitchell")
            .with_email("wei.chen@example.com")
            .with_contact_number("2065550112")
            .with_joining(date(2022, 6, 1))
            .with_job_title("Site Reliability Engineer")
            .with_location("Seattle")
            .with_skills(["Go", "Kubernetes"]),
        Employee::new("E1004", "Ana Silva")
            .with_team("Design")
            .with_alignment("Product")
            .with_manager("Emily Rodriguez")
            .with_role_type(RoleType::NonEngineering)
            .with_email("ana.silva@example.com")
            .with_contact_number("5125550190")
            .with_joining(date(2020, 1, 20))
            .with_job_title("Product Designer")
            .with_location("Austin")
            .with_skills(["Figma"]),
        Employee::new("E1005", "Dev Patel")
            .with_team("Infra")
            .with_alignment("Operations")
            .with_manager("Michael Chen")
            .with_status(EmployeeStatus::Term)
            .with_email("dev.patel@example.com")
            .with_contact_number("5125550147")
            .with_joining(date(2018, 8, 13))
            .with_job_title("Systems Engineer")
            .with_location("Remote")
            .with_skills(["Terraform", "AWS"]),
        Employee::new("E1006", "Maria Gonzalez")
            .with_team("Data")
            .with_alignment("Analytics")
            .with_manager("David Thompson")
            .with_role_type(RoleType::Both)
            .with_status(EmployeeStatus::Open)
            .with_email("maria.gonzalez@example.com")
            .with_contact_number("2065550163")
            .with_joining(date(2023, 2, 27))
            .with_job_title("Analytics Lead")
            .with_location("Denver")
            .with_skills(["SQL", "Tableau", "Python"]),
    ]
}

/// The seed hiring requisition collection.
pub fn hiring() -> Vec<HiringRequisition> {
    vec![
        HiringRequisition::new("Platform", "Tom Baker", "Sarah Mitchell")
            .with_experience("Senior")
            .with_skills(["Rust", "Kubernetes"]),
        HiringRequisition::new("Data", "Priya Nair", "Keshav")
            .with_status(HiringStatus::ToBeApproved)
            .with_experience("Mid")
            .with_vendor("CTS")
            .with_skills(["Python", "Spark"]),
        HiringRequisition::new("Design", "Lucas Meyer", "Emily Rodriguez")
            .with_status(HiringStatus::OnHold)
            .with_experience("Senior")
            .with_skills(["Figma", "Prototyping"]),
        HiringRequisition::new("Infra", "Sofia Rossi", "Kunjal")
            .with_status(HiringStatus::Approved)
            .with_experience("Junior")
            .with_vendor("TCS")
            .with_skills(["Linux", "Ansible"]),
        HiringRequisition::new("Platform", "Ahmed Hassan", "Michael Chen")
            .with_status(HiringStatus::Hired)
            .with_experience("Staff")
            .with_skills(["Go", "gRPC"]),
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Seed constants are known-valid
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate;

    #[test]
    fn test_seed_employees_pass_validation() {
        let employees = employees();
        assert!(!employees.is_empty());
        for emp in &employees {
            validate::validate_employee(emp).unwrap();
        }
    }

    #[test]
    fn test_seed_business_keys_are_unique() {
        let employees = employees();
        let mut ids: Vec<&str> = employees.iter().map(|e| e.employee_id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), employees.len());
    }

    #[test]
    fn test_seed_hiring_pass_validation() {
        for req in hiring() {
            validate::validate_hiring(&req).unwrap();
        }
    }
}
