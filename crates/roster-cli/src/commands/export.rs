//! Export command - write records to a delimited file.

use crate::app::App;
use crate::commands::parse_filter;
use crate::Dataset;
use roster_core::export::{self, Column};
use roster_core::{Config, Intent, Record, Session};
use std::fs;
use std::path::{Path, PathBuf};

/// Run the export command.
///
/// With no filters the full collection is written; with filters, only the
/// matching records (the serializer takes whichever slice it is given).
pub fn run(
    config: Config,
    dataset: Dataset,
    out: Option<PathBuf>,
    filters: Vec<String>,
) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    let delimiter = app.config.export.delimiter;

    match dataset {
        Dataset::Employee => {
            let path =
                out.unwrap_or_else(|| PathBuf::from(&app.config.export.employee_file));
            export_dataset(
                &mut app.employees,
                &export::employee_columns(),
                &filters,
                &path,
                delimiter,
            )
        }
        Dataset::Hiring => {
            let path = out.unwrap_or_else(|| PathBuf::from(&app.config.export.hiring_file));
            export_dataset(
                &mut app.hiring,
                &export::hiring_columns(),
                &filters,
                &path,
                delimiter,
            )
        }
    }
}

fn export_dataset<R: Record + Clone>(
    session: &mut Session<R>,
    columns: &[Column<R>],
    filters: &[String],
    path: &Path,
    delimiter: char,
) -> anyhow::Result<()> {
    for spec in filters {
        let (field, value) = parse_filter::<R>(spec)?;
        session.apply(Intent::AddFilter { field, value })?;
    }

    let records = session.matching();
    let text = export::serialize(&records, columns, delimiter);
    fs::write(path, text)?;

    println!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}
