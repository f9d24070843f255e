//! Advanced filter predicate evaluation
//!
//! Evaluates the clause list of one column against one row's value for that
//! column. Clauses of a column combine with AND. Evaluation never fails:
//! unknown operators and malformed operands resolve to a boolean.

use std::cmp::Ordering;

use tablekit_core::{FilterRow, Value, parse_date_millis, parse_number};

use crate::filter_types::{ClauseValue, FilterClause, FilterOperator, Scalar};

/// Evaluate `clauses` for the column `column_id` of `row`.
pub fn advanced_filter<R: FilterRow>(row: &R, column_id: &str, clauses: &[FilterClause]) -> bool {
    evaluate(row.value(column_id), row.is_selected(), clauses)
}

/// Evaluate a clause list against a materialized cell value.
///
/// `value` of `None` (column absent from the row) is treated as NULL.
/// `row_selected` feeds the `row-select` operator, which is only consulted
/// for non-NULL values.
pub fn evaluate(value: Option<&Value>, row_selected: bool, clauses: &[FilterClause]) -> bool {
    if clauses.is_empty() {
        return true;
    }

    match value {
        None | Some(Value::Null) => evaluate_null(clauses),
        Some(value) => clauses
            .iter()
            .all(|clause| evaluate_clause(clause, value, row_selected)),
    }
}

/// Whether a column's clause list should be dropped from the active filters
pub fn auto_remove(clauses: &[FilterClause]) -> bool {
    clauses.is_empty()
}

/// NULL short-circuit: the row passes iff some clause asks for an empty value
/// and none asks for a non-empty one. No other clause is consulted.
fn evaluate_null(clauses: &[FilterClause]) -> bool {
    let any_empty = clauses.iter().any(|c| c.operator == FilterOperator::IsEmpty);
    let any_not_empty = clauses
        .iter()
        .any(|c| c.operator == FilterOperator::IsNotEmpty);
    any_empty && !any_not_empty
}

fn evaluate_clause(clause: &FilterClause, value: &Value, row_selected: bool) -> bool {
    if clause.is_vacuous() {
        return true;
    }

    let operand = &clause.value;
    match &clause.operator {
        FilterOperator::RowSelect => row_selected,

        FilterOperator::ILike => contains_ignore_case(value, operand),
        FilterOperator::NotILike => !contains_ignore_case(value, operand),

        FilterOperator::Eq => equals(value, operand),
        FilterOperator::Ne => !equals(value, operand),

        FilterOperator::Gt => value.to_number() > operand.to_value().to_number(),
        FilterOperator::Gte => value.to_number() >= operand.to_value().to_number(),
        FilterOperator::Lt => value.to_number() < operand.to_value().to_number(),
        FilterOperator::Lte => value.to_number() <= operand.to_value().to_number(),

        FilterOperator::Has => match operand.as_items() {
            Some(items) => list_contains(&items, value),
            None => false,
        },
        FilterOperator::HasNot => match operand.as_items() {
            Some(items) => !list_contains(&items, value),
            None => false,
        },

        FilterOperator::IsEmpty => is_empty(value),
        FilterOperator::IsNotEmpty => !is_empty(value),

        FilterOperator::IsBetween => is_between(value, operand),

        FilterOperator::DateEq => date_cmp(value, operand) == Some(Ordering::Equal),
        FilterOperator::DateNe => date_cmp(value, operand) != Some(Ordering::Equal),
        FilterOperator::DateLt => date_cmp(value, operand) == Some(Ordering::Less),
        FilterOperator::DateGt => date_cmp(value, operand) == Some(Ordering::Greater),
        FilterOperator::DateLte => matches!(
            date_cmp(value, operand),
            Some(Ordering::Less | Ordering::Equal)
        ),
        FilterOperator::DateGte => matches!(
            date_cmp(value, operand),
            Some(Ordering::Greater | Ordering::Equal)
        ),

        FilterOperator::Unknown(name) => {
            tracing::debug!("Unknown filter operator '{}' treated as pass", name);
            true
        }
    }
}

fn contains_ignore_case(value: &Value, operand: &ClauseValue) -> bool {
    value
        .to_text()
        .to_lowercase()
        .contains(&operand.to_text().to_lowercase())
}

/// `eq` semantics. Booleans compare against the operand `"true"`; arrays test
/// strict membership; everything else uses loose equality.
fn equals(value: &Value, operand: &ClauseValue) -> bool {
    match value {
        Value::Bool(b) => *b == operand_is_true(operand),
        Value::Array(items) => match operand {
            ClauseValue::Scalar(scalar) => items.iter().any(|item| strict_eq(item, scalar)),
            _ => false,
        },
        _ => loose_eq(value, operand),
    }
}

fn operand_is_true(operand: &ClauseValue) -> bool {
    match operand {
        ClauseValue::Scalar(Scalar::Text(s)) => s == "true",
        ClauseValue::Scalar(Scalar::Bool(b)) => *b,
        _ => false,
    }
}

/// Equality with coercion: a numeric side makes the comparison numeric, dates
/// compare by timestamp, text compares exactly.
fn loose_eq(value: &Value, operand: &ClauseValue) -> bool {
    let ClauseValue::Scalar(scalar) = operand else {
        return value.to_text() == operand.to_text();
    };

    match (value, scalar) {
        (Value::Null, _) => false,
        (Value::String(s), Scalar::Text(t)) => s == t,
        (v, Scalar::Text(t)) if v.is_date_like() => {
            v.to_timestamp_millis().is_some()
                && v.to_timestamp_millis() == parse_date_millis(t)
        }
        (v, Scalar::Number(n)) if v.is_date_like() => {
            v.to_timestamp_millis().map(|ms| ms as f64) == Some(*n)
        }
        (v, Scalar::Text(t)) => v.to_number() == parse_number(t),
        (v, Scalar::Number(n)) => v.to_number() == *n,
        (Value::Bool(b), Scalar::Bool(c)) => b == c,
        (v, Scalar::Bool(c)) => v.to_number() == f64::from(u8::from(*c)),
    }
}

/// Identity comparison used for set membership: no coercion across kinds
fn strict_eq(value: &Value, scalar: &Scalar) -> bool {
    match (value, scalar) {
        (Value::String(s), Scalar::Text(t)) => s == t,
        (Value::Int64(v), Scalar::Number(n)) => (*v as f64) == *n,
        (Value::Float64(v), Scalar::Number(n)) => v == n,
        (Value::Bool(b), Scalar::Bool(c)) => b == c,
        _ => false,
    }
}

/// Whether the row value is among `items`. An array value matches when any
/// of its elements does.
fn list_contains(items: &[&Scalar], value: &Value) -> bool {
    match value {
        Value::Array(elements) => elements
            .iter()
            .any(|element| items.iter().any(|item| strict_eq(element, item))),
        _ => items.iter().any(|item| strict_eq(value, item)),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        other => other.is_null(),
    }
}

fn is_between(value: &Value, operand: &ClauseValue) -> bool {
    let Some((start, end)) = operand.as_pair() else {
        return false;
    };

    match (
        value.to_timestamp_millis(),
        start.to_value().to_timestamp_millis(),
        end.to_value().to_timestamp_millis(),
    ) {
        (Some(v), Some(start), Some(end)) => start <= v && v <= end,
        _ => false,
    }
}

/// Timestamp ordering of value against operand; `None` if either side is not
/// a valid date
fn date_cmp(value: &Value, operand: &ClauseValue) -> Option<Ordering> {
    let lhs = value.to_timestamp_millis()?;
    let rhs = operand.to_value().to_timestamp_millis()?;
    Some(lhs.cmp(&rhs))
}

#[cfg(test)]
mod tests;
