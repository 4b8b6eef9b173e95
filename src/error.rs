use rust_decimal::Decimal;
use thiserror::Error;

/// Data-quality failures raised while loading or aggregating a sales file.
///
/// Line numbers are 1-based file lines, so the first data row is line 2.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("Required column '{column}' not found in header")]
    MissingColumn { column: String },
    #[error("Line {line}: column '{column}' is empty")]
    MissingValue { line: usize, column: String },
    #[error("Line {line}: column '{column}' value '{value}' is not a number")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },
    #[error("Line {line}: column '{column}' value '{value}' is not a recognised date")]
    InvalidDate {
        line: usize,
        column: String,
        value: String,
    },
    #[error("Line {line}: running total of column '{column}' exceeds the decimal range")]
    Overflow { line: usize, column: String },
    #[error("Profit margin of profit {profit} over sales {sales} exceeds the decimal range")]
    MarginOverflow { sales: Decimal, profit: Decimal },
}
