//! One dashboard render per selection state.
//!
//! [`Dashboard::compute`] is a pure function of the loaded dataset and the
//! current [`Selection`]; every interaction recomputes it from scratch. The
//! selection-dependent parts (trend and metrics) are `None` whenever the
//! selection matches no rows.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::{info, warn};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::{
    aggregate::{self, CategoryTotals, MonthlyPoint},
    chart::{self, Bar, Point},
    cli::DashboardArgs,
    config::DashboardConfig,
    data,
    dataset::Dataset,
    metrics::{self, MetricsReport},
    selection::{self, Selection},
    table::{self, Align},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub row_count: usize,
    pub category_options: Vec<String>,
    pub selection: Selection,
    pub sub_category_options: Vec<String>,
    pub selected_rows: usize,
    pub trend: Option<Vec<MonthlyPoint>>,
    pub metrics: Option<MetricsReport>,
    pub category_totals: CategoryTotals,
    pub monthly_sales: Vec<MonthlyPoint>,
}

impl Dashboard {
    pub fn compute(dataset: &Dataset, selection: &Selection) -> Result<Self> {
        let everything = dataset.all();
        let category_options = selection::category_options(&everything);
        if let Some(category) = &selection.category
            && !category_options.contains(category)
        {
            warn!("Category '{category}' does not occur in the dataset");
        }

        let views = selection::apply(&everything, selection);
        for chosen in &selection.sub_categories {
            if !views.sub_category_options.contains(chosen) {
                warn!("Sub-category '{chosen}' is not offered for the selected category");
            }
        }

        let trend = if views.selected_view.is_empty() {
            None
        } else {
            Some(aggregate::monthly_sales(&views.selected_view).context("Building sales trend")?)
        };
        let metrics = MetricsReport::compute(&views.selected_view, &everything)
            .context("Computing selection metrics")?;
        let category_totals =
            aggregate::category_totals(&everything).context("Aggregating sales by category")?;
        let monthly_sales =
            aggregate::monthly_sales(&everything).context("Aggregating sales by month")?;

        info!(
            "Selection {:?} / {:?} matched {} of {} row(s)",
            selection.category,
            selection.sub_categories,
            views.selected_view.len(),
            dataset.len()
        );
        Ok(Self {
            row_count: dataset.len(),
            category_options,
            selection: selection.clone(),
            sub_category_options: views.sub_category_options,
            selected_rows: views.selected_view.len(),
            trend,
            metrics,
            category_totals,
            monthly_sales,
        })
    }

    pub fn render_text(&self, dataset: &Dataset, config: &DashboardConfig) -> String {
        let mut output = String::new();

        section(&mut output, "Input Data");
        let preview = dataset.all().cells(Some(config.preview_rows));
        let aligns = table::infer_alignment(dataset.headers(), &preview);
        output.push_str(&table::render_table(dataset.headers(), &preview, &aligns));
        let _ = writeln!(
            output,
            "({} of {} row(s) shown)",
            preview.len(),
            self.row_count
        );

        section(&mut output, "Category Selection");
        let _ = writeln!(output, "Options: {}", join_options(&self.category_options));
        let _ = writeln!(
            output,
            "You selected: {}",
            self.selection.category.as_deref().unwrap_or("(none)")
        );

        section(&mut output, "Sub-Category Selection");
        let _ = writeln!(
            output,
            "Options: {}",
            join_options(&self.sub_category_options)
        );
        let _ = writeln!(
            output,
            "You selected: {}",
            join_options(&self.selection.sub_categories)
        );

        section(&mut output, "Sales Trend Visualization");
        match &self.trend {
            Some(points) => output.push_str(&chart::render_line_chart(
                &line_points(points),
                config.chart.height,
            )),
            None => output.push_str(NO_SELECTION),
        }

        section(&mut output, "Metrics Calculation");
        match &self.metrics {
            Some(report) => output.push_str(&metrics::render_readouts(report)),
            None => output.push_str(NO_SELECTION),
        }

        section(&mut output, "Overall Sales Visualization");
        let totals_rows = self.category_totals.display_rows();
        let mut aligns = vec![Align::Right; self.category_totals.headers.len()];
        if let Some(first) = aligns.first_mut() {
            *first = Align::Left;
        }
        output.push_str(&table::render_table(
            &self.category_totals.headers,
            &totals_rows,
            &aligns,
        ));
        output.push('\n');
        let bars = self
            .category_totals
            .sales()
            .into_iter()
            .map(|(label, sales)| Bar {
                label,
                value: sales.to_f64().unwrap_or_default(),
                caption: data::format_currency(sales),
            })
            .collect::<Vec<_>>();
        output.push_str(&chart::render_bar_chart(&bars, config.chart.width));

        section(&mut output, "Sales by Month");
        let headers = vec!["Order_Date".to_string(), "Sales".to_string()];
        let rows = self
            .monthly_sales
            .iter()
            .map(|point| vec![data::format_date(point.month), data::format_amount(point.sales)])
            .collect::<Vec<_>>();
        output.push_str(&table::render_table(
            &headers,
            &rows,
            &[Align::Left, Align::Right],
        ));
        output.push('\n');
        output.push_str(&chart::render_line_chart(
            &line_points(&self.monthly_sales),
            config.chart.height,
        ));
        output
    }
}

const NO_SELECTION: &str = "No rows match the current selection.\n";

fn section(output: &mut String, title: &str) {
    if !output.is_empty() {
        output.push('\n');
    }
    let _ = writeln!(output, "### {title}");
}

fn join_options(options: &[String]) -> String {
    if options.is_empty() {
        "(none)".to_string()
    } else {
        options.join(", ")
    }
}

fn line_points(points: &[MonthlyPoint]) -> Vec<Point> {
    points
        .iter()
        .map(|point| Point {
            label: data::format_date(point.month),
            value: point.sales.to_f64().unwrap_or_default(),
        })
        .collect()
}

/// Splits repeatable, comma-separated selector values.
pub fn split_choices(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
        .collect()
}

pub fn execute(args: &DashboardArgs) -> Result<()> {
    let (config, dataset) = crate::open_source(&args.source)?;
    let selection = Selection {
        category: args
            .category
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string),
        sub_categories: split_choices(&args.sub_categories),
    };
    let dashboard = Dashboard::compute(&dataset, &selection)?;
    match args.format {
        OutputFormat::Text => print!("{}", dashboard.render_text(&dataset, &config)),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&dashboard).context("Serializing dashboard")?;
            println!("{json}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ColumnNames, dataset::LoadOptions};
    use encoding_rs::UTF_8;

    fn scenario() -> Dataset {
        let names = ColumnNames::default();
        let formats = data::default_date_formats();
        let options = LoadOptions {
            delimiter: b',',
            encoding: UTF_8,
            columns: &names,
            date_formats: &formats,
        };
        let csv = "Category,Sub_Category,Order_Date,Sales,Profit\n\
                   Furniture,Chairs,2023-01-05,100,10\n\
                   Furniture,Chairs,2023-02-10,50,-5\n\
                   Technology,Phones,2023-01-15,200,40\n";
        Dataset::from_reader(csv.as_bytes(), &options).unwrap()
    }

    #[test]
    fn split_choices_accepts_repeats_and_commas() {
        let raw = vec!["Chairs, Tables".to_string(), "Phones".to_string(), " ".to_string()];
        assert_eq!(split_choices(&raw), vec!["Chairs", "Tables", "Phones"]);
    }

    #[test]
    fn text_render_contains_every_section() {
        let dataset = scenario();
        let selection = Selection::new(Some("Furniture"), ["Chairs"]);
        let dashboard = Dashboard::compute(&dataset, &selection).unwrap();
        let text = dashboard.render_text(&dataset, &DashboardConfig::default());
        for heading in [
            "### Input Data",
            "### Category Selection",
            "### Sub-Category Selection",
            "### Sales Trend Visualization",
            "### Metrics Calculation",
            "### Overall Sales Visualization",
            "### Sales by Month",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("You selected: Furniture"));
        assert!(text.contains("Overall Profit Margin (%)  3.33%  (-9.52%)"));
        assert!(!text.contains(NO_SELECTION));
    }

    #[test]
    fn text_render_without_selection_omits_metrics() {
        let dataset = scenario();
        let dashboard = Dashboard::compute(&dataset, &Selection::default()).unwrap();
        let text = dashboard.render_text(&dataset, &DashboardConfig::default());
        assert!(text.contains("You selected: (none)"));
        assert_eq!(text.matches(NO_SELECTION).count(), 2);
        assert!(!text.contains("Total Sales"));
    }
}
