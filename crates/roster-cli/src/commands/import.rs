//! Import command - bulk-create records from a delimited file.

use crate::app::App;
use crate::Dataset;
use roster_core::{import, Config};
use std::fs;
use std::path::Path;

/// Run the import command.
///
/// Row failures do not abort the run; they are collected and reported
/// together after the remaining rows have been processed.
pub fn run(config: Config, dataset: Dataset, file: &Path) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    let delimiter = app.config.export.delimiter;
    let text = fs::read_to_string(file)?;

    let report = match dataset {
        Dataset::Employee => import::import_employees(&mut app.employees, &text, delimiter)?,
        Dataset::Hiring => import::import_hiring(&mut app.hiring, &text, delimiter)?,
    };

    println!("Imported {} records from {}", report.imported, file.display());

    if !report.errors.is_empty() {
        eprintln!();
        eprintln!("{} rows failed:", report.errors.len());
        for error in &report.errors {
            eprintln!("  line {}: {}", error.line, error.reason);
        }
    }

    Ok(())
}
