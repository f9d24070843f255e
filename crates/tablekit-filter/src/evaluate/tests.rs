//! Tests for advanced filter evaluation

use super::*;
use chrono::NaiveDate;
use tablekit_core::Row;

fn clause(operator: &str, value: impl Into<ClauseValue>) -> FilterClause {
    FilterClause::new("r1", FilterOperator::from(operator), value)
}

fn eval(value: impl Into<Value>, clauses: &[FilterClause]) -> bool {
    evaluate(Some(&value.into()), false, clauses)
}

fn date(y: i32, m: u32, d: u32) -> Value {
    Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

#[test]
fn test_empty_clause_list_always_passes() {
    assert!(evaluate(None, false, &[]));
    assert!(evaluate(Some(&Value::Null), false, &[]));
    assert!(eval("anything", &[]));
    assert!(eval(vec!["a"], &[]));
    assert!(auto_remove(&[]));
    assert!(!auto_remove(&[clause("eq", "x")]));
}

#[test]
fn test_null_passes_only_for_is_empty() {
    let is_empty = clause("isEmpty", "");
    let is_not_empty = clause("isNotEmpty", "");

    assert!(evaluate(None, false, std::slice::from_ref(&is_empty)));
    assert!(evaluate(Some(&Value::Null), false, std::slice::from_ref(&is_empty)));
    assert!(!evaluate(None, false, std::slice::from_ref(&is_not_empty)));
    assert!(!evaluate(None, false, &[is_empty.clone(), is_not_empty]));
    assert!(!evaluate(None, false, &[clause("iLike", "jo")]));
    assert!(!evaluate(None, false, &[clause("gt", "5")]));
    assert!(evaluate(None, false, &[is_empty, clause("iLike", "jo")]));
}

#[test]
fn test_null_ignores_row_selection() {
    let select = clause("row-select", "true");
    let is_empty = clause("isEmpty", "");

    assert!(!evaluate(None, true, std::slice::from_ref(&select)));
    assert!(!evaluate(Some(&Value::Null), true, std::slice::from_ref(&select)));
    assert!(evaluate(None, true, &[select.clone(), is_empty.clone()]));
    // selection is not consulted once the null check decides
    assert!(evaluate(None, false, &[is_empty, select]));
}

#[test]
fn test_vacuous_clauses_are_skipped() {
    assert!(eval("abc", &[clause("iLike", "")]));
    assert!(eval("abc", &[clause("eq", "")]));
    assert!(eval("abc", &[clause("has", ClauseValue::List(vec![]))]));
    assert!(eval(5, &[clause("gt", ""), clause("lt", "10")]));
    // empty-check operators still apply with no operand
    assert!(!eval("abc", &[clause("isEmpty", "")]));
    assert!(eval("abc", &[clause("isNotEmpty", "")]));
}

#[test]
fn test_i_like() {
    assert!(eval("John Doe", &[clause("iLike", "jo")]));
    assert!(eval("John Doe", &[clause("iLike", "DOE")]));
    assert!(!eval("Jane", &[clause("iLike", "jo")]));
    assert!(eval("Jane", &[clause("notILike", "jo")]));
    assert!(!eval("JOHN", &[clause("notILike", "jo")]));
    assert!(eval(1234, &[clause("iLike", "23")]));
    assert!(eval(vec!["red", "blue"], &[clause("iLike", "BLU")]));
}

#[test]
fn test_all_clauses_must_pass() {
    let clauses = [clause("iLike", "jo"), clause("notILike", "doe")];
    assert!(eval("John Smith", &clauses));
    assert!(!eval("John Doe", &clauses));
}

#[test]
fn test_eq_ne_are_mutually_exclusive() {
    let cases: Vec<(Value, ClauseValue)> = vec![
        (Value::from("active"), ClauseValue::text("active")),
        (Value::from("active"), ClauseValue::text("Active")),
        (Value::from(25), ClauseValue::text("25")),
        (Value::from(25), ClauseValue::text("26")),
        (Value::from(2.5), ClauseValue::Scalar(Scalar::Number(2.5))),
        (Value::from("25"), ClauseValue::Scalar(Scalar::Number(25.0))),
        (Value::from(vec!["a", "b"]), ClauseValue::text("b")),
        (Value::from(vec!["a", "b"]), ClauseValue::text("c")),
        (date(2024, 1, 15), ClauseValue::text("2024-01-15")),
    ];

    for (value, operand) in cases {
        let eq = eval(value.clone(), &[clause("eq", operand.clone())]);
        let ne = eval(value.clone(), &[clause("ne", operand.clone())]);
        assert_ne!(eq, ne, "{value:?} vs {operand:?}");
    }
}

#[test]
fn test_eq_coercion() {
    assert!(eval("active", &[clause("eq", "active")]));
    assert!(!eval("active", &[clause("eq", "Active")]));
    assert!(eval(25, &[clause("eq", "25")]));
    assert!(!eval("25", &[clause("eq", "25.0")]));
    assert!(eval(25.0, &[clause("eq", "25.0")]));
    assert!(eval(vec!["a", "b"], &[clause("eq", "b")]));
    assert!(eval(date(2024, 1, 15), &[clause("eq", "2024-01-15")]));
}

#[test]
fn test_eq_on_arrays_is_strict_membership() {
    assert!(!eval(vec![1, 2], &[clause("eq", "2")]));
    assert!(eval(vec![1, 2], &[clause("ne", "2")]));
    assert!(eval(vec![1, 2], &[clause("eq", ClauseValue::Scalar(Scalar::Number(2.0)))]));
    assert!(!eval(vec!["a", "b"], &[clause("eq", "B")]));
    assert!(eval(vec!["a", "b"], &[clause("ne", "c")]));
}

#[test]
fn test_eq_boolean_compares_against_true_text() {
    assert!(eval(true, &[clause("eq", "true")]));
    assert!(!eval(true, &[clause("eq", "false")]));
    assert!(eval(false, &[clause("eq", "false")]));
    assert!(!eval(false, &[clause("eq", "true")]));
    assert!(eval(true, &[clause("ne", "false")]));
    assert!(!eval(true, &[clause("ne", "true")]));
    // only the exact text "true" counts as true
    assert!(!eval(true, &[clause("eq", "TRUE")]));
    assert!(eval(false, &[clause("eq", "yes")]));
    assert!(eval(true, &[clause("eq", ClauseValue::Scalar(Scalar::Bool(true)))]));
}

#[test]
fn test_numeric_comparisons() {
    assert!(eval(25, &[clause("gt", "18")]));
    assert!(!eval(10, &[clause("gt", "18")]));
    assert!(eval(18, &[clause("gte", "18")]));
    assert!(eval(18, &[clause("lte", "18")]));
    assert!(!eval(18, &[clause("lt", "18")]));
    assert!(eval("9", &[clause("lt", "10")]));
    assert!(eval(2.5, &[clause("gt", ClauseValue::Scalar(Scalar::Number(2.0)))]));
}

#[test]
fn test_numeric_comparisons_with_nan_fail() {
    for op in ["gt", "gte", "lt", "lte"] {
        assert!(!eval("abc", &[clause(op, "1")]), "{op}");
        assert!(!eval(1, &[clause(op, "abc")]), "{op}");
    }
}

#[test]
fn test_has_and_has_not() {
    let options = ClauseValue::list(["todo", "done"]);
    assert!(eval("todo", &[clause("has", options.clone())]));
    assert!(!eval("doing", &[clause("has", options.clone())]));
    assert!(eval("doing", &[clause("hasNot", options.clone())]));
    assert!(!eval("done", &[clause("hasNot", options.clone())]));

    // array cells match on any element
    assert!(eval(vec!["bug", "done"], &[clause("has", options.clone())]));
    assert!(!eval(vec!["bug", "ui"], &[clause("has", options.clone())]));
    assert!(eval(vec!["bug", "ui"], &[clause("hasNot", options)]));

    // membership is strict: no text/number coercion
    assert!(!eval(1, &[clause("has", ClauseValue::list(["1"]))]));
    assert!(eval(1, &[clause("has", ClauseValue::list([1i64]))]));
}

#[test]
fn test_has_requires_a_list_operand() {
    assert!(!eval("todo", &[clause("has", "todo")]));
    assert!(!eval("todo", &[clause("hasNot", "done")]));
}

#[test]
fn test_is_empty_and_is_not_empty() {
    assert!(eval("   ", &[clause("isEmpty", "")]));
    assert!(!eval(" x ", &[clause("isEmpty", "")]));
    assert!(eval(Value::Array(vec![]), &[clause("isEmpty", "")]));
    assert!(eval(vec!["a"], &[clause("isNotEmpty", "")]));
    assert!(!eval(0, &[clause("isEmpty", "")]));
    assert!(eval(0, &[clause("isNotEmpty", "")]));
}

#[test]
fn test_is_between_is_inclusive() {
    let range = clause("isBetween", ClauseValue::pair("2024-01-01", "2024-01-31"));
    assert!(eval(date(2024, 1, 1), std::slice::from_ref(&range)));
    assert!(eval(date(2024, 1, 15), std::slice::from_ref(&range)));
    assert!(eval(date(2024, 1, 31), std::slice::from_ref(&range)));
    assert!(!eval(date(2023, 12, 31), std::slice::from_ref(&range)));
    assert!(!eval(date(2024, 2, 1), std::slice::from_ref(&range)));
    assert!(eval("2024-01-20", std::slice::from_ref(&range)));
    assert!(!eval("not a date", std::slice::from_ref(&range)));
}

#[test]
fn test_is_between_malformed_operands_fail() {
    assert!(!eval(date(2024, 1, 1), &[clause("isBetween", "2024-01-01")]));
    assert!(!eval(
        date(2024, 1, 1),
        &[clause("isBetween", ClauseValue::pair("2023-12-01", "garbage"))]
    ));
}

#[test]
fn test_date_comparisons() {
    let d = date(2024, 3, 10);
    assert!(eval(d.clone(), &[clause("date-eq", "2024-03-10")]));
    assert!(eval(d.clone(), &[clause("date-ne", "2024-03-11")]));
    assert!(eval(d.clone(), &[clause("date-lt", "2024-03-11")]));
    assert!(eval(d.clone(), &[clause("date-gt", "2024-03-09")]));
    assert!(eval(d.clone(), &[clause("date-lte", "2024-03-10")]));
    assert!(eval(d.clone(), &[clause("date-gte", "2024-03-10")]));
    assert!(!eval(d.clone(), &[clause("date-lt", "2024-03-10")]));
    assert!(eval("2024-03-10T00:00:00Z", &[clause("date-eq", "2024-03-10")]));
}

#[test]
fn test_invalid_dates_fail_ordering_but_pass_ne() {
    for op in ["date-eq", "date-lt", "date-gt", "date-lte", "date-gte"] {
        assert!(!eval("someday", &[clause(op, "2024-03-10")]), "{op}");
    }
    assert!(eval("someday", &[clause("date-ne", "2024-03-10")]));
}

#[test]
fn test_unknown_operators_pass() {
    assert!(eval("x", &[clause("isRelativeToToday", "7")]));
    assert!(eval("x", &[clause("startsWith", "y")]));
}

#[test]
fn test_row_select_reads_selection_state() {
    let select = [clause("row-select", "true")];
    assert!(evaluate(Some(&Value::from("x")), true, &select));
    assert!(!evaluate(Some(&Value::from("x")), false, &select));
}

#[test]
fn test_advanced_filter_on_row() {
    let row = Row::default()
        .with("name", "John Doe")
        .with("age", 25)
        .with("select", true)
        .with_selected(true);

    assert!(advanced_filter(&row, "name", &[clause("iLike", "john")]));
    assert!(advanced_filter(&row, "age", &[clause("gt", "18")]));
    assert!(advanced_filter(&row, "select", &[clause("row-select", "true")]));
    // missing column behaves like NULL
    assert!(advanced_filter(&row, "email", &[clause("isEmpty", "")]));
    assert!(!advanced_filter(&row, "email", &[clause("iLike", "@")]));
}
