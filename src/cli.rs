use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default filenames, resolved relative to the executable's directory so a
/// bare `inspection-report generate` works the way the tool is deployed:
/// dropped into a folder next to its input and template.
pub const DEFAULT_INPUT: &str = "inspection_data.xlsx";
pub const DEFAULT_TEMPLATE: &str = "inspection_template.xlsx";
pub const DEFAULT_OUTPUT: &str = "inspection_reports.xlsx";

#[derive(Parser)]
#[command(name = "inspection-report")]
#[command(about = "Bridge inspection Excel report generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print per-page details
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the report workbook from an input table and a template
    Generate {
        /// Input workbook (default: inspection_data.xlsx next to the binary)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Template workbook (default: inspection_template.xlsx next to the binary)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output workbook (default: inspection_reports.xlsx next to the binary)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a fresh template workbook
    Template {
        /// Output path (default: inspection_template.xlsx next to the binary)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Resolve a default filename against the executable's directory, falling
/// back to the current directory when the executable path is unavailable.
pub fn default_path(name: &str) -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(name)))
        .unwrap_or_else(|| PathBuf::from(name))
}
