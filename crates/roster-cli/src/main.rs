//! # Roster CLI
//!
//! Command-line interface for the Roster workforce dashboard.
//!
//! ## Commands
//!
//! - `roster browse` - Interactive table browser (sort, filter, select,
//!   delete, paginate)
//! - `roster list` - Print records matching filters
//! - `roster export` - Write records to a delimited file
//! - `roster import <file>` - Bulk-create records from a delimited file
//! - `roster status` - Show dataset counts and status breakdown
//!
//! All state is in-memory for the life of one invocation, seeded from the
//! bundled mock data; there is no persistence layer.
//!
//! ## Example Usage
//!
//! ```bash
//! # Browse employees interactively
//! roster browse
//!
//! # Active platform engineers, sorted by name
//! roster list -f core_team=Platform -f status=Active -s name
//!
//! # Export the hiring pipeline
//! roster export -d hiring -o pipeline.csv
//! ```

mod app;
mod commands;
mod tui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Roster - workforce record management
#[derive(Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse records in the interactive table view
    #[command(alias = "b")]
    Browse,

    /// Print records matching filters
    List {
        /// Dataset to query (employee, hiring)
        #[arg(short, long, default_value = "employee")]
        dataset: Dataset,

        /// Filter as field=value (repeatable, AND-combined)
        #[arg(short, long)]
        filter: Vec<String>,

        /// Sort by this field
        #[arg(short, long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Records per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Write records to a delimited file
    Export {
        /// Dataset to export (employee, hiring)
        #[arg(short, long, default_value = "employee")]
        dataset: Dataset,

        /// Output file (defaults to the configured name)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Filter as field=value applied before export (repeatable)
        #[arg(short, long)]
        filter: Vec<String>,
    },

    /// Bulk-create records from a delimited file with a header row
    Import {
        /// Dataset to import into (employee, hiring)
        #[arg(short, long, default_value = "employee")]
        dataset: Dataset,

        /// Input file
        file: PathBuf,
    },

    /// Show dataset counts and status breakdown
    Status,
}

/// Which record collection a command operates on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dataset {
    #[default]
    Employee,
    Hiring,
}

impl std::str::FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "employee" | "employees" | "emp" => Ok(Dataset::Employee),
            "hiring" | "hire" => Ok(Dataset::Hiring),
            _ => Err(format!("Unknown dataset: {}", s)),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => roster_core::Config::load_from(path)?,
        None => roster_core::Config::load()?,
    };

    // Execute command
    match cli.command {
        Commands::Browse => tui::run(config),
        Commands::List {
            dataset,
            filter,
            sort,
            desc,
            page,
            page_size,
            output,
        } => commands::list::run(config, dataset, filter, sort, desc, page, page_size, output),
        Commands::Export {
            dataset,
            out,
            filter,
        } => commands::export::run(config, dataset, out, filter),
        Commands::Import { dataset, file } => commands::import::run(config, dataset, &file),
        Commands::Status => commands::status::run(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_parsing() {
        assert_eq!("employee".parse::<Dataset>().unwrap(), Dataset::Employee);
        assert_eq!("Hiring".parse::<Dataset>().unwrap(), Dataset::Hiring);
        assert!("payroll".parse::<Dataset>().is_err());
    }
}
