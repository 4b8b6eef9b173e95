pub mod aggregate;
pub mod categories;
pub mod chart;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod dataset;
pub mod error;
pub mod explore;
pub mod io_utils;
pub mod metrics;
pub mod preview;
pub mod selection;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug};

use crate::{
    cli::{Cli, Commands, SourceArgs},
    config::DashboardConfig,
    dataset::{Dataset, LoadOptions},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sales_lens", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview(args) => preview::execute(&args),
        Commands::Categories(args) => categories::execute(&args),
        Commands::Dashboard(args) => dashboard::execute(&args),
        Commands::Explore(args) => explore::execute(&args),
    }
}

/// Resolves configuration for `args` and loads the sales file it names.
pub(crate) fn open_source(args: &SourceArgs) -> Result<(DashboardConfig, Dataset)> {
    let config = DashboardConfig::resolve(args)?;
    debug!("Effective configuration: {config:?}");
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let options = LoadOptions {
        delimiter: io_utils::resolve_input_delimiter(&args.input, args.delimiter),
        encoding,
        columns: &config.columns,
        date_formats: &config.date_formats,
    };
    let dataset = Dataset::load(&args.input, &options)
        .with_context(|| format!("Opening sales data {:?}", args.input))?;
    Ok((config, dataset))
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
