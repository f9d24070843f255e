//! Loose coercions used by filter comparisons
//!
//! These follow grid-toolkit conventions rather than strict typing: every
//! value has a text form, a numeric form (possibly NaN) and an optional
//! timestamp. Naive date/time strings are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::Value;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

impl Value {
    /// Text form of the value, as shown in a cell.
    ///
    /// Arrays join their elements with `,` and NULL renders as empty text.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(v) => v.to_string(),
            Value::Int64(v) => v.to_string(),
            Value::Float64(v) => format_number(*v),
            Value::String(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            Value::DateTimeUtc(dt) => dt.to_rfc3339(),
            Value::Array(items) => items
                .iter()
                .map(Value::to_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Numeric form of the value; `NaN` when it has none
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(v) => f64::from(u8::from(*v)),
            Value::Int64(v) => *v as f64,
            Value::Float64(v) => *v,
            Value::String(s) => parse_number(s),
            Value::Date(_) | Value::DateTime(_) | Value::DateTimeUtc(_) => self
                .to_timestamp_millis()
                .map(|ms| ms as f64)
                .unwrap_or(f64::NAN),
            Value::Array(items) => match items.as_slice() {
                [] => 0.0,
                [only] => only.to_number(),
                _ => f64::NAN,
            },
        }
    }

    /// Milliseconds since the Unix epoch, or `None` for an invalid date
    pub fn to_timestamp_millis(&self) -> Option<i64> {
        match self {
            Value::Null => Some(0),
            Value::Bool(v) => Some(i64::from(*v)),
            Value::Int64(v) => Some(*v),
            Value::Float64(v) => v.is_finite().then(|| v.trunc() as i64),
            Value::String(s) => parse_date_millis(s),
            Value::Date(d) => d
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis()),
            Value::DateTime(dt) => Some(dt.and_utc().timestamp_millis()),
            Value::DateTimeUtc(dt) => Some(dt.timestamp_millis()),
            Value::Array(items) => match items.as_slice() {
                [only] => only.to_timestamp_millis(),
                _ => None,
            },
        }
    }
}

/// Parse a number the way a grid input box would: surrounding whitespace is
/// ignored and empty text is zero.
///
/// Only plain decimal and exponent notation is read. Hex, octal and binary
/// literals (`0x10`) and the `Infinity`/`NaN` spellings give NaN.
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    // any letter other than an exponent marker
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse a date string into epoch milliseconds
pub fn parse_date_millis(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.timestamp_millis());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Format a float without a trailing `.0` for whole numbers
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    format!("{}", value)
}
