//! Dashboard configuration.
//!
//! Settings come from an optional YAML file and are then overridden by
//! command-line flags. Every field has a default, so an empty file (or no
//! file at all) describes the standard Superstore layout.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::{cli::SourceArgs, data};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnNames {
    pub category: String,
    pub sub_category: String,
    pub order_date: String,
    pub sales: String,
    pub profit: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            category: "Category".to_string(),
            sub_category: "Sub_Category".to_string(),
            order_date: "Order_Date".to_string(),
            sales: "Sales".to_string(),
            profit: "Profit".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartSettings {
    /// Maximum bar length in characters
    pub width: usize,
    /// Number of text rows used by line charts
    pub height: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 48,
            height: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub columns: ColumnNames,
    pub date_formats: Vec<String>,
    pub preview_rows: usize,
    pub chart: ChartSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            date_formats: data::default_date_formats(),
            preview_rows: 10,
            chart: ChartSettings::default(),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening config file {path:?}"))?;
        let config: DashboardConfig = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing config file {path:?}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the optional config file named by `args` and applies flag
    /// overrides on top of it.
    pub fn resolve(args: &SourceArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if !args.date_formats.is_empty() {
            config.date_formats = args.date_formats.clone();
        }
        if let Some(width) = args.chart_width {
            config.chart.width = width;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.date_formats.is_empty(),
            "At least one date format must be configured"
        );
        ensure!(self.chart.width > 0, "Chart width must be positive");
        ensure!(self.chart.height > 1, "Chart height must be at least 2 rows");
        let names = [
            &self.columns.category,
            &self.columns.sub_category,
            &self.columns.order_date,
            &self.columns.sales,
            &self.columns.profit,
        ];
        for name in names {
            ensure!(!name.trim().is_empty(), "Column names cannot be empty");
        }
        Ok(())
    }
}
