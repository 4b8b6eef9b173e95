//! Cell-level parsing and display formatting.
//!
//! Amounts are parsed into exact [`Decimal`] values and dates into calendar
//! [`NaiveDate`]s. Display helpers render currency, percentages and signed
//! deltas with two decimal places using banker's rounding.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d.%m.%Y",
];

const TIME_SUFFIXES: &[&str] = &[" %H:%M:%S", "T%H:%M:%S", " %H:%M", "T%H:%M"];

pub fn default_date_formats() -> Vec<String> {
    DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect()
}

/// Parses a date or date-time cell and truncates it to the calendar day.
///
/// Formats are tried in order, first as a plain date and then followed by a
/// time-of-day component.
pub fn parse_calendar_date(value: &str, formats: &[String]) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in formats {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(parsed);
        }
        for suffix in TIME_SUFFIXES {
            let pattern = format!("{fmt}{suffix}");
            if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, &pattern) {
                return Some(parsed.date());
            }
        }
    }
    None
}

/// Parses a numeric cell as an exact decimal. Plain and scientific notation
/// are accepted; currency symbols and thousands separators are not.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Last calendar day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Rounds to two decimal places and pins the scale so `3` renders as `3.00`.
pub fn round_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

pub fn format_amount(value: Decimal) -> String {
    round_cents(value).to_string()
}

/// `$1,234.50`; negative values keep the sign after the symbol (`$-12.00`).
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_cents(value);
    let text = rounded.abs().to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("${sign}{}.{cents}", group_thousands(whole))
}

pub fn format_percent(value: Decimal) -> String {
    format!("{}%", round_cents(value))
}

pub fn format_signed_percent(value: Decimal) -> String {
    let rounded = round_cents(value);
    if rounded.is_sign_negative() {
        format!("{rounded}%")
    } else {
        format!("+{rounded}%")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
