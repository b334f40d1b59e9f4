//! Status command - show dataset counts and status breakdown.

use crate::app::App;
use roster_core::{Config, EmployeeStatus, HiringStatus};

/// Run the status command.
pub fn run(config: Config) -> anyhow::Result<()> {
    let app = App::new(config)?;

    println!("Roster Status");
    println!("=============");
    println!();

    println!("Employees: {}", app.employees.store().len());
    for status in EmployeeStatus::ALL {
        let count = app
            .employees
            .store()
            .list()
            .iter()
            .filter(|s| s.record.status == status)
            .count();
        println!("  {:<22} {}", status.to_string(), count);
    }

    println!();
    println!("Hiring requisitions: {}", app.hiring.store().len());
    for status in HiringStatus::ALL {
        let count = app
            .hiring
            .store()
            .list()
            .iter()
            .filter(|s| s.record.status == status)
            .count();
        println!("  {:<22} {}", status.to_string(), count);
    }

    Ok(())
}
