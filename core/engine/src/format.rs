//! FILENAME: core/engine/src/format.rs
//! PURPOSE: Data-type formatting of resolved cell values.
//! CONTEXT: Converts raw leaf values into display text according to a column's
//! `DataType` and fraction digits, using the separators and date patterns of
//! the active `FormatSettings`. Booleans and strings pass through untouched.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::cell::CellValue;
use crate::column::{ColumnConfig, DataType};
use crate::settings::FormatSettings;

/// Fraction digits used when a numeric column configures none.
pub const DEFAULT_FRACTION_DIGITS: u8 = 2;

/// Applies the column's data-type formatting to a raw value.
pub fn format_value(value: &CellValue, column: &ColumnConfig, settings: &FormatSettings) -> CellValue {
    match column.data_type {
        DataType::String | DataType::Boolean => value.clone(),
        DataType::Numeric
        | DataType::NumericInteger
        | DataType::NumericShowZero
        | DataType::NumericRaw => format_numeric(value, column, settings),
        DataType::DateString | DataType::DateNumeric => {
            format_date(value, &settings.date_format, settings)
        }
        DataType::DateTimeNumeric => format_date(value, &settings.date_time_format, settings),
        DataType::DateTimeSecondString => {
            format_date(value, &settings.date_time_second_format, settings)
        }
    }
}

// ============================================================================
// NUMBERS
// ============================================================================

/// `Null` stays `Null`; text that is not a finite number passes through.
fn format_numeric(value: &CellValue, column: &ColumnConfig, settings: &FormatSettings) -> CellValue {
    let number = match value {
        CellValue::Null => return CellValue::Null,
        CellValue::Number(n) => *n,
        CellValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => return value.clone(),
        },
        CellValue::Boolean(_) => return value.clone(),
    };

    CellValue::Text(format_number_text(number, column, settings))
}

fn format_number_text(number: f64, column: &ColumnConfig, settings: &FormatSettings) -> String {
    match column.data_type {
        DataType::NumericRaw => CellValue::Number(number).display(),
        DataType::NumericInteger => format_fraction(number, 0, 0, settings),
        DataType::Numeric if number == 0.0 => String::new(),
        _ => {
            let min = column.min_fraction_digits.unwrap_or(DEFAULT_FRACTION_DIGITS);
            let max = column.max_fraction_digits.unwrap_or(DEFAULT_FRACTION_DIGITS);
            format_fraction(number, min, max, settings)
        }
    }
}

/// Formats with between `min_digits` and `max_digits` fraction digits,
/// trimming trailing zeros down to the minimum.
pub fn format_fraction(value: f64, min_digits: u8, max_digits: u8, settings: &FormatSettings) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let max_digits = max_digits.max(min_digits) as usize;
    let rounded = format!("{:.prec$}", value, prec = max_digits);

    let (integer_part, fraction_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let keep = fraction_part
        .trim_end_matches('0')
        .len()
        .max(min_digits as usize)
        .min(fraction_part.len());

    let mut result = add_group_separator(integer_part, &settings.group_separator);
    if keep > 0 {
        result.push_str(&settings.decimal_separator);
        result.push_str(&fraction_part[..keep]);
    }
    result
}

/// Inserts `separator` between digit groups of an integer string.
fn add_group_separator(integer_part: &str, separator: &str) -> String {
    let negative = integer_part.starts_with('-');
    let digits: Vec<char> = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    let mut result = String::with_capacity(len + len / 3 * separator.len() + 1);
    if negative {
        result.push('-');
    }
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(*c);
    }
    result
}

// ============================================================================
// DATES
// ============================================================================

/// Formats a date-like value with a strftime pattern. Values that cannot be
/// read as a date pass through unchanged.
fn format_date(value: &CellValue, pattern: &str, settings: &FormatSettings) -> CellValue {
    match to_local_datetime(value, settings) {
        Some(dt) => CellValue::Text(dt.format(pattern).to_string()),
        None => value.clone(),
    }
}

/// Reads a value as local wall time. Numbers are epoch milliseconds shifted by
/// the configured offset, RFC 3339 strings are converted to that offset, and
/// naive ISO strings are taken as already local.
pub fn to_local_datetime(value: &CellValue, settings: &FormatSettings) -> Option<NaiveDateTime> {
    match value {
        CellValue::Number(ms) => DateTime::from_timestamp_millis(*ms as i64)
            .map(|dt| dt.with_timezone(&settings.offset()).naive_local()),
        CellValue::Text(text) => parse_date_text(text.trim(), settings),
        CellValue::Null | CellValue::Boolean(_) => None,
    }
}

/// The calendar day of a date-like value, ignoring time of day.
pub fn day_of(value: &CellValue, settings: &FormatSettings) -> Option<NaiveDate> {
    to_local_datetime(value, settings).map(|dt| dt.date())
}

fn parse_date_text(text: &str, settings: &FormatSettings) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&settings.offset()).naive_local());
    }

    const PATTERNS: [&str; 5] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for pattern in PATTERNS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
