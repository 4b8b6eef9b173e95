//! In-memory sales dataset and borrowed row views.
//!
//! A [`Dataset`] owns the decoded cells of every row exactly as they appeared
//! in the file. Filtering never copies or mutates it: a [`View`] is a list of
//! row indices borrowing the dataset, and typed values (amounts, dates) are
//! parsed from the raw cells when a row is aggregated. A malformed Sales cell
//! therefore surfaces as a [`DataError`] naming its file line at the point the
//! value is summed.

use std::{io::Read, path::Path};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use encoding_rs::Encoding;
use log::{debug, info};
use rust_decimal::Decimal;

use crate::{config::ColumnNames, data, error::DataError, io_utils};

/// Positions of the columns the dashboard relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub category: usize,
    pub sub_category: usize,
    pub order_date: usize,
    pub sales: usize,
    pub profit: usize,
}

impl ColumnMap {
    pub fn resolve(headers: &[String], names: &ColumnNames) -> Result<Self, DataError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| DataError::MissingColumn {
                    column: name.to_string(),
                })
        };
        Ok(Self {
            category: find(&names.category)?,
            sub_category: find(&names.sub_category)?,
            order_date: find(&names.order_date)?,
            sales: find(&names.sales)?,
            profit: find(&names.profit)?,
        })
    }

    fn is_dimension(&self, column: usize) -> bool {
        column == self.category || column == self.sub_category || column == self.order_date
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions<'a> {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
    pub columns: &'a ColumnNames,
    pub date_formats: &'a [String],
}

#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    columns: ColumnMap,
    rows: Vec<Vec<String>>,
    /// File line each row starts on; quoted fields may span several lines.
    lines: Vec<usize>,
    date_formats: Vec<String>,
}

impl Dataset {
    pub fn load(path: &Path, options: &LoadOptions<'_>) -> Result<Self> {
        info!(
            "Loading '{}' with delimiter '{}'",
            path.display(),
            crate::printable_delimiter(options.delimiter)
        );
        let reader = io_utils::open_csv_reader_from_path(path, options.delimiter)?;
        let dataset = Self::from_csv_reader(reader, options)
            .with_context(|| format!("Loading sales data from {path:?}"))?;
        info!(
            "Loaded {} row(s) across {} column(s) from {:?}",
            dataset.len(),
            dataset.headers.len(),
            path
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions<'_>) -> Result<Self> {
        Self::from_csv_reader(io_utils::open_csv_reader(reader, options.delimiter), options)
    }

    fn from_csv_reader<R: Read>(
        mut reader: csv::Reader<R>,
        options: &LoadOptions<'_>,
    ) -> Result<Self> {
        let headers = io_utils::reader_headers(&mut reader, options.encoding)?;
        let columns = ColumnMap::resolve(&headers, options.columns)?;
        debug!("Resolved dashboard columns: {columns:?}");
        let mut rows = Vec::new();
        let mut lines = Vec::new();
        for (row_idx, record) in reader.byte_records().enumerate() {
            let record = record.with_context(|| format!("Reading record {}", row_idx + 1))?;
            let line = record
                .position()
                .map(|position| position.line() as usize)
                .unwrap_or(row_idx + 2);
            let decoded = io_utils::decode_record(&record, options.encoding)
                .with_context(|| format!("Decoding line {line}"))?;
            rows.push(decoded);
            lines.push(line);
        }
        let mut dataset = Self::from_parts(headers, columns, rows, options.date_formats.to_vec());
        dataset.lines = lines;
        Ok(dataset)
    }

    pub fn from_parts(
        headers: Vec<String>,
        columns: ColumnMap,
        rows: Vec<Vec<String>>,
        date_formats: Vec<String>,
    ) -> Self {
        let lines = (0..rows.len()).map(|index| index + 2).collect();
        Self {
            headers,
            columns,
            rows,
            lines,
            date_formats,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn columns(&self) -> ColumnMap {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// View over every row, in file order.
    pub fn all(&self) -> View<'_> {
        View {
            dataset: self,
            rows: (0..self.rows.len()).collect(),
        }
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        (index < self.rows.len()).then_some(Record {
            dataset: self,
            index,
        })
    }

    /// Columns other than the category, sub-category and date dimensions
    /// whose non-empty cells all parse as numbers. Sales and Profit are always
    /// included, in header order.
    pub fn numeric_columns(&self) -> Vec<usize> {
        (0..self.headers.len())
            .filter(|&column| !self.columns.is_dimension(column))
            .filter(|&column| {
                if column == self.columns.sales || column == self.columns.profit {
                    return true;
                }
                let mut cells = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(column))
                    .map(|cell| cell.trim())
                    .filter(|cell| !cell.is_empty())
                    .peekable();
                cells.peek().is_some() && cells.all(|cell| data::parse_amount(cell).is_some())
            })
            .collect()
    }
}

/// A borrowed subset of dataset rows, in file order.
#[derive(Debug, Clone)]
pub struct View<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> View<'a> {
    pub fn empty(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            rows: Vec::new(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'a>> + '_ {
        let dataset = self.dataset;
        self.rows.iter().map(move |&index| Record { dataset, index })
    }

    /// Narrows the view to the rows matching `predicate`.
    pub fn filter<F>(&self, mut predicate: F) -> View<'a>
    where
        F: FnMut(&Record<'a>) -> bool,
    {
        let rows = self
            .records()
            .filter(|record| predicate(record))
            .map(|record| record.index)
            .collect();
        View {
            dataset: self.dataset,
            rows,
        }
    }

    /// Rows as decoded cells, for tabular display.
    pub fn cells(&self, limit: Option<usize>) -> Vec<Vec<String>> {
        let take = limit.unwrap_or(self.rows.len());
        self.records()
            .take(take)
            .map(|record| record.cells().to_vec())
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    dataset: &'a Dataset,
    index: usize,
}

impl<'a> Record<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based file line the row starts on, counting the header as line 1.
    pub fn line(&self) -> usize {
        self.dataset
            .lines
            .get(self.index)
            .copied()
            .unwrap_or(self.index + 2)
    }

    pub fn cells(&self) -> &'a [String] {
        &self.dataset.rows[self.index]
    }

    pub fn cell(&self, column: usize) -> &'a str {
        self.cells().get(column).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn category(&self) -> &'a str {
        self.cell(self.dataset.columns.category)
    }

    pub fn sub_category(&self) -> &'a str {
        self.cell(self.dataset.columns.sub_category)
    }

    pub fn sales(&self) -> Result<Decimal, DataError> {
        self.required_amount(self.dataset.columns.sales)
    }

    pub fn profit(&self) -> Result<Decimal, DataError> {
        self.required_amount(self.dataset.columns.profit)
    }

    /// Amount in an arbitrary column; empty cells yield `None`.
    pub fn optional_amount(&self, column: usize) -> Result<Option<Decimal>, DataError> {
        let raw = self.cell(column);
        if raw.trim().is_empty() {
            return Ok(None);
        }
        data::parse_amount(raw)
            .map(Some)
            .ok_or_else(|| DataError::InvalidNumber {
                line: self.line(),
                column: self.column_name(column),
                value: raw.to_string(),
            })
    }

    /// Adds this row's `value` from `column` to a running total.
    pub fn accumulate(
        &self,
        total: Decimal,
        column: usize,
        value: Decimal,
    ) -> Result<Decimal, DataError> {
        total
            .checked_add(value)
            .ok_or_else(|| DataError::Overflow {
                line: self.line(),
                column: self.column_name(column),
            })
    }

    pub fn order_date(&self) -> Result<NaiveDate, DataError> {
        let column = self.dataset.columns.order_date;
        let raw = self.cell(column);
        if raw.trim().is_empty() {
            return Err(DataError::MissingValue {
                line: self.line(),
                column: self.column_name(column),
            });
        }
        data::parse_calendar_date(raw, &self.dataset.date_formats).ok_or_else(|| {
            DataError::InvalidDate {
                line: self.line(),
                column: self.column_name(column),
                value: raw.to_string(),
            }
        })
    }

    fn required_amount(&self, column: usize) -> Result<Decimal, DataError> {
        self.optional_amount(column)?
            .ok_or_else(|| DataError::MissingValue {
                line: self.line(),
                column: self.column_name(column),
            })
    }

    fn column_name(&self, column: usize) -> String {
        self.dataset
            .headers
            .get(column)
            .cloned()
            .unwrap_or_else(|| format!("column {}", column + 1))
    }
}
