use crate::core::query::LogKey;
use crate::core::report::ReportKey;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for machlog
/// CLI application to log machine usage time into an xlsx workbook
#[derive(Parser)]
#[command(
    name = "machlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Machine usage time log: record sessions in an xlsx workbook, summarize them and view machining reports",
    long_about = None
)]
pub struct Cli {
    /// Override the storage workbook (useful for tests or a shared file)
    #[arg(global = true, long = "file", value_name = "XLSX")]
    pub file: Option<String>,

    /// Override the worksheet holding the log
    #[arg(global = true, long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the storage workbook
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Log a machine usage session
    Add {
        /// Date of the session (YYYY-MM-DD or "today")
        date: String,

        #[arg(long = "start", help = "Start time (HH:MM)")]
        start: String,

        #[arg(long = "end", help = "End time (HH:MM); earlier than start means overnight")]
        end: String,

        #[arg(long = "machine", short = 'm')]
        machine: String,

        #[arg(long = "project", short = 'p')]
        project: Option<String>,

        #[arg(long = "material")]
        material: Option<String>,

        #[arg(long = "operator", short = 'o')]
        operator: String,

        #[arg(long = "desc", short = 'd', help = "Free-text description of the job")]
        description: Option<String>,
    },

    /// List logged sessions
    List {
        #[arg(long, help = "Filter by year/month/day or a custom range (A:B)")]
        period: Option<String>,

        #[arg(long = "machine", short = 'm', help = "Keep only this machine (repeatable)")]
        machines: Vec<String>,

        #[arg(long = "project", short = 'p', help = "Keep only this project (repeatable)")]
        projects: Vec<String>,

        #[arg(long = "operator", short = 'o', help = "Keep only this operator (repeatable)")]
        operators: Vec<String>,
    },

    /// Total hours per machine, project, operator, ...
    Summary {
        #[arg(long, value_enum, default_value = "machine")]
        by: LogKey,

        #[arg(long, help = "Filter by year/month/day or a custom range (A:B)")]
        period: Option<String>,

        #[arg(long = "machine", short = 'm')]
        machines: Vec<String>,

        #[arg(long = "project", short = 'p')]
        projects: Vec<String>,

        #[arg(long = "operator", short = 'o')]
        operators: Vec<String>,

        #[arg(long, help = "Draw a bar chart of the totals")]
        chart: bool,
    },

    /// View a multi-sheet machining report
    Report {
        /// Report workbook (one sheet per machine type)
        #[arg(value_name = "XLSX")]
        workbook: String,

        #[arg(long = "project", short = 'p', help = "Project to show (default: the first one)")]
        project: Option<String>,

        #[arg(long = "machine", short = 'm', help = "Machine to include (repeatable, default: all)")]
        machines: Vec<String>,

        #[arg(long, value_enum, default_value = "machine")]
        by: ReportKey,
    },

    /// Rewrite a legacy 6-column log table in the current layout
    Migrate,

    /// Export logged sessions
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        out: String,

        #[arg(
            long,
            value_name = "PERIOD",
            help = "Filter export by year/month/day or a custom range"
        )]
        period: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the storage workbook
    Backup {
        #[arg(long, value_name = "FILE")]
        out: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal audit log")]
        print: bool,
    },
}
