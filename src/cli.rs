use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::dashboard::OutputFormat;

#[derive(Debug, Parser)]
#[command(author, version, about = "Explore sales by category, sub-category and month", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Preview the first few rows of the sales file in a formatted table
    Preview(PreviewArgs),
    /// List category options, or the sub-category options of one category
    Categories(CategoriesArgs),
    /// Render the dashboard for one category / sub-category selection
    Dashboard(DashboardArgs),
    /// Choose categories interactively and re-render the dashboard after each choice
    Explore(ExploreArgs),
}

/// Options shared by every command that reads the sales file.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Input sales file (`-` reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// YAML file with column names, date formats and chart settings
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// chrono format for Order_Date; repeat to try several in order
    #[arg(long = "date-format", action = clap::ArgAction::Append)]
    pub date_formats: Vec<String>,
    /// Maximum bar length for bar charts
    #[arg(long = "chart-width")]
    pub chart_width: Option<usize>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Number of rows to display (defaults to the configured preview size)
    #[arg(long)]
    pub rows: Option<usize>,
}

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// List the sub-categories offered for this category instead
    #[arg(short = 'c', long = "category")]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Selected category (omit for no selection)
    #[arg(short = 'c', long = "category")]
    pub category: Option<String>,
    /// Selected sub-categories, comma-separated or repeated
    #[arg(short = 's', long = "sub-category", action = clap::ArgAction::Append)]
    pub sub_categories: Vec<String>,
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
