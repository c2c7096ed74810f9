use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "diary-lens")]
#[command(about = "Diary sentiment ingest and trend dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read the diary folder, classify every entry and rebuild the store
    Ingest(IngestArgs),
    /// Render monthly, weekday and summary analytics from the CSV snapshot
    Dashboard(DashboardArgs),
    /// Print configuration values
    PrintConfig,
    /// Drop all stored diary records
    ClearStore,
}

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Diary folder, overriding `source_dir` from configuration
    #[arg(long)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tab {
    Monthly,
    Weekday,
    Summary,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[arg(long, value_enum, default_value_t = Tab::All)]
    pub tab: Tab,
    /// Restrict the record browser to these months (YYYY-MM); repeatable
    #[arg(long = "month")]
    pub months: Vec<String>,
    /// Restrict the record browser to these sentiment labels; repeatable
    #[arg(long = "sentiment")]
    pub sentiments: Vec<String>,
    /// Print full entry text in the record browser
    #[arg(long)]
    pub show_content: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// CSV snapshot to read, overriding `store.csv_path`
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
