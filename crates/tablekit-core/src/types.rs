//! Core types for tablekit

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A materialized cell value, as extracted from a row for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit floating point
    Float64(f64),
    /// UTF-8 string
    String(String),
    /// Date (year, month, day)
    Date(NaiveDate),
    /// DateTime without timezone
    DateTime(NaiveDateTime),
    /// DateTime with timezone (UTC)
    DateTimeUtc(DateTime<Utc>),
    /// Array of values (multi-select and tag columns)
    Array(Vec<Value>),
}

impl Value {
    /// Check if the value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_date_like(&self) -> bool {
        matches!(
            self,
            Value::Date(_) | Value::DateTime(_) | Value::DateTimeUtc(_)
        )
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Array(v) => write!(f, "[{} items]", v.len()),
            other => write!(f, "{}", other.to_text()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int64(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTimeUtc(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Read access to a data row as seen by the filter engine.
///
/// A column the row does not carry returns `None`, which the engine treats
/// the same as [`Value::Null`].
pub trait FilterRow {
    /// The materialized value for `column`
    fn value(&self, column: &str) -> Option<&Value>;

    /// Whether the row is currently marked selected in the grid
    fn is_selected(&self) -> bool {
        false
    }

    /// All cell values of the row, used by global search
    fn values(&self) -> impl Iterator<Item = &Value>;
}

/// A data row keyed by column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// Column values, in column order
    cells: IndexMap<String, Value>,
    /// Row selection state
    pub selected: bool,
}

impl Row {
    /// Builder-style cell insertion
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl FilterRow for Row {
    fn value(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn values(&self) -> impl Iterator<Item = &Value> {
        self.cells.values()
    }
}
