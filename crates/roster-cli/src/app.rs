//! Application state management.

use roster_core::{seed, Config, Employee, HiringRequisition, Session};
use tracing::info;

/// Shared application state: one session per dataset, seeded at startup.
pub struct App {
    /// Configuration
    pub config: Config,

    /// Employee session
    pub employees: Session<Employee>,

    /// Hiring requisition session
    pub hiring: Session<HiringRequisition>,
}

impl App {
    /// Create a new application instance seeded with the mock data.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let user = config.general.current_user.clone();
        let page_size = config.ui.page_size;

        let mut employees = Session::new(&user).with_page_size(page_size);
        employees.load(seed::employees())?;

        let mut hiring = Session::new(&user).with_page_size(page_size);
        hiring.load(seed::hiring())?;

        info!(
            user = %user,
            employees = employees.store().len(),
            hiring = hiring.store().len(),
            "Application initialized"
        );

        Ok(App {
            config,
            employees,
            hiring,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_seeds_both_sessions() {
        let app = App::new(Config::default()).unwrap();
        assert!(!app.employees.store().is_empty());
        assert!(!app.hiring.store().is_empty());
        assert_eq!(app.employees.query().page_size, 50);
    }
}
