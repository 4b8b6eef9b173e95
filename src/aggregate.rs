//! Group-by-sum aggregations over a view.
//!
//! Monthly buckets are labelled with the last calendar day of the month and
//! returned in chronological order; months without rows are omitted.
//! Category totals keep Category as a named label, sum every numeric column
//! of the dataset and are ordered by category name.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{data, dataset::View};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub month: NaiveDate,
    pub sales: Decimal,
}

pub fn monthly_sales(view: &View<'_>) -> Result<Vec<MonthlyPoint>> {
    let sales_column = view.dataset().columns().sales;
    let mut buckets: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for record in view.records() {
        let date = record.order_date()?;
        let sales = record.sales()?;
        let bucket = buckets
            .entry((date.year(), date.month()))
            .or_insert(Decimal::ZERO);
        *bucket = record.accumulate(*bucket, sales_column, sales)?;
    }
    debug!(
        "Bucketed {} row(s) into {} month(s)",
        view.len(),
        buckets.len()
    );
    buckets
        .into_iter()
        .map(|((year, month), sales)| {
            let first = NaiveDate::from_ymd_opt(year, month, 1)
                .with_context(|| format!("Invalid month bucket {year}-{month:02}"))?;
            Ok(MonthlyPoint {
                month: data::month_end(first),
                sales,
            })
        })
        .collect()
}

/// Sums of every numeric column per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    /// Label column first, then the summed column names.
    pub headers: Vec<String>,
    pub rows: Vec<CategoryRow>,
    #[serde(skip)]
    sales_position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub sums: Vec<Decimal>,
}

impl CategoryTotals {
    /// `(category, total sales)` pairs in row order.
    pub fn sales(&self) -> Vec<(String, Decimal)> {
        self.rows
            .iter()
            .map(|row| {
                let sales = row
                    .sums
                    .get(self.sales_position)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                (row.category.clone(), sales)
            })
            .collect()
    }

    /// Rows formatted for tabular display.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                std::iter::once(row.category.clone())
                    .chain(row.sums.iter().map(|sum| data::format_amount(*sum)))
                    .collect()
            })
            .collect()
    }
}

pub fn category_totals(view: &View<'_>) -> Result<CategoryTotals> {
    let dataset = view.dataset();
    let layout = dataset.columns();
    let numeric = dataset.numeric_columns();
    let sales_position = numeric
        .iter()
        .position(|&column| column == layout.sales)
        .unwrap_or(0);

    let mut sums: BTreeMap<&str, Vec<Decimal>> = BTreeMap::new();
    for record in view.records() {
        let entry = sums
            .entry(record.category())
            .or_insert_with(|| vec![Decimal::ZERO; numeric.len()]);
        for (slot, &column) in numeric.iter().enumerate() {
            let value = if column == layout.sales {
                Some(record.sales()?)
            } else if column == layout.profit {
                Some(record.profit()?)
            } else {
                record.optional_amount(column)?
            };
            if let Some(value) = value {
                entry[slot] = record.accumulate(entry[slot], column, value)?;
            }
        }
    }

    let mut headers = Vec::with_capacity(numeric.len() + 1);
    headers.push(dataset.headers()[layout.category].clone());
    headers.extend(numeric.iter().map(|&column| dataset.headers()[column].clone()));

    let rows = sums
        .into_iter()
        .map(|(category, sums)| CategoryRow {
            category: category.to_string(),
            sums,
        })
        .collect();
    Ok(CategoryTotals {
        headers,
        rows,
        sales_position,
    })
}
