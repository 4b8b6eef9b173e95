//! Sales, profit and profit-margin readouts.
//!
//! The margin of a set is `100 * profit / sales` when sales are strictly
//! positive and zero otherwise. The delta compares the selected rows against
//! the margin of the whole dataset.

use anyhow::{Context, Result};
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{data, dataset::View, error::DataError};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub sales: Decimal,
    pub profit: Decimal,
}

impl Totals {
    pub fn of(view: &View<'_>) -> Result<Self> {
        let columns = view.dataset().columns();
        let mut totals = Totals::default();
        for record in view.records() {
            totals.sales = record.accumulate(totals.sales, columns.sales, record.sales()?)?;
            totals.profit = record.accumulate(totals.profit, columns.profit, record.profit()?)?;
        }
        Ok(totals)
    }

    pub fn margin(&self) -> Result<Decimal, DataError> {
        profit_margin(self.sales, self.profit)
    }
}

/// Fails when a tiny positive `sales` pushes the ratio past the decimal range.
pub fn profit_margin(sales: Decimal, profit: Decimal) -> Result<Decimal, DataError> {
    if sales <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    profit
        .checked_mul(HUNDRED)
        .and_then(|scaled| scaled.checked_div(sales))
        .ok_or(DataError::MarginOverflow { sales, profit })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsReport {
    pub total_sales: Decimal,
    pub total_profit: Decimal,
    pub profit_margin: Decimal,
    pub baseline_margin: Decimal,
    pub delta: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readout {
    pub label: &'static str,
    pub value: String,
    pub delta: Option<String>,
}

impl MetricsReport {
    /// Computes the readouts for `selected`, or `None` when it has no rows.
    pub fn compute(selected: &View<'_>, baseline: &View<'_>) -> Result<Option<Self>> {
        if selected.is_empty() {
            return Ok(None);
        }
        let totals = Totals::of(selected)?;
        let baseline_margin = Totals::of(baseline)?.margin()?;
        let profit_margin = totals.margin()?;
        debug!(
            "Margin {profit_margin} over {} row(s), baseline {baseline_margin}",
            selected.len()
        );
        Ok(Some(Self {
            total_sales: totals.sales,
            total_profit: totals.profit,
            profit_margin,
            baseline_margin,
            delta: profit_margin
                .checked_sub(baseline_margin)
                .context("Margin delta exceeds the decimal range")?,
        }))
    }

    pub fn readouts(&self) -> [Readout; 3] {
        [
            Readout {
                label: "Total Sales",
                value: data::format_currency(self.total_sales),
                delta: None,
            },
            Readout {
                label: "Total Profit",
                value: data::format_currency(self.total_profit),
                delta: None,
            },
            Readout {
                label: "Overall Profit Margin (%)",
                value: data::format_percent(self.profit_margin),
                delta: Some(data::format_signed_percent(self.delta)),
            },
        ]
    }
}

pub fn render_readouts(report: &MetricsReport) -> String {
    let readouts = report.readouts();
    let width = readouts
        .iter()
        .map(|readout| readout.label.chars().count())
        .max()
        .unwrap_or(0);
    let mut output = String::new();
    for readout in &readouts {
        let line = match &readout.delta {
            Some(delta) => format!("{:<width$}  {}  ({delta})", readout.label, readout.value),
            None => format!("{:<width$}  {}", readout.label, readout.value),
        };
        output.push_str(&line);
        output.push('\n');
    }
    output
}
