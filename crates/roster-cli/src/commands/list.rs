//! List command - print records matching filters.

use crate::app::App;
use crate::commands::parse_filter;
use crate::{Dataset, OutputFormat};
use roster_core::export::Column;
use roster_core::{Config, Employee, HiringRequisition, Intent, Page, Record, Session};
use serde::Serialize;

/// Run the list command.
#[allow(clippy::too_many_arguments)]
pub fn run(
    config: Config,
    dataset: Dataset,
    filters: Vec<String>,
    sort: Option<String>,
    desc: bool,
    page: usize,
    page_size: Option<usize>,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let mut app = App::new(config)?;

    match dataset {
        Dataset::Employee => list_dataset(
            &mut app.employees,
            &summary_columns_employee(),
            &filters,
            sort,
            desc,
            page,
            page_size,
            output,
        ),
        Dataset::Hiring => list_dataset(
            &mut app.hiring,
            &summary_columns_hiring(),
            &filters,
            sort,
            desc,
            page,
            page_size,
            output,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn list_dataset<R: Record + Clone + Serialize>(
    session: &mut Session<R>,
    columns: &[Column<R>],
    filters: &[String],
    sort: Option<String>,
    desc: bool,
    page: usize,
    page_size: Option<usize>,
    output: OutputFormat,
) -> anyhow::Result<()> {
    for spec in filters {
        let (field, value) = parse_filter::<R>(spec)?;
        session.apply(Intent::AddFilter { field, value })?;
    }

    if let Some(field) = sort {
        session.apply(Intent::SortBy(field.clone()))?;
        if desc {
            // Sorting the active field again flips it to descending
            session.apply(Intent::SortBy(field))?;
        }
    }

    if let Some(size) = page_size {
        session.apply(Intent::SetPageSize(size))?;
    }
    session.apply(Intent::GoToPage(page))?;

    let page = session.page();
    match output {
        OutputFormat::Text => render_text(&page, columns),
        OutputFormat::Json => render_json(&page)?,
    }

    Ok(())
}

/// Compact column set for terminal listings; `export` writes the full one.
fn summary_columns_employee() -> Vec<Column<Employee>> {
    vec![
        Column::new("Employee ID", |s| s.record.employee_id.clone()),
        Column::new("Name", |s| s.record.name.clone()),
        Column::new("Core Team", |s| {
            s.record.core_team.clone().unwrap_or_default()
        }),
        Column::new("Manager", |s| s.record.manager.clone().unwrap_or_default()),
        Column::new("Status", |s| s.record.status.to_string()),
        Column::new("Role Type", |s| s.record.role_type.to_string()),
    ]
}

fn summary_columns_hiring() -> Vec<Column<HiringRequisition>> {
    vec![
        Column::new("Candidate", |s| s.record.candidate_name.clone()),
        Column::new("Team", |s| s.record.team.clone()),
        Column::new("Experience", |s| {
            s.record.experience_level.clone().unwrap_or_default()
        }),
        Column::new("Status", |s| s.record.status.to_string()),
        Column::new("Hiring Manager", |s| s.record.hiring_manager.clone()),
    ]
}

fn render_text<R>(page: &Page<R>, columns: &[Column<R>]) {
    let rows: Vec<Vec<String>> = page
        .records
        .iter()
        .map(|stored| columns.iter().map(|c| c.value(stored)).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.header.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<width$}", c.header, width = w))
        .collect();
    println!("{}", header.join("  "));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", line.join("  "));
    }

    eprintln!();
    eprintln!(
        "Page {} of {} ({} records)",
        page.page, page.total_pages, page.total_count
    );
}

fn render_json<R: Serialize>(page: &Page<R>) -> anyhow::Result<()> {
    let records = page
        .records
        .iter()
        .map(|stored| {
            let mut value = serde_json::to_value(&stored.record)?;
            if let serde_json::Value::Object(map) = &mut value {
                map.insert(
                    "id".to_string(),
                    serde_json::Value::String(stored.id().to_string()),
                );
                map.insert("audit".to_string(), serde_json::to_value(&stored.audit)?);
            }
            Ok(value)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let payload = serde_json::json!({
        "records": records,
        "page": page.page,
        "total_pages": page.total_pages,
        "total_count": page.total_count,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}
