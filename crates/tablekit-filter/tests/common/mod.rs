//! Shared fixtures for tablekit-filter integration tests

#![allow(dead_code)]

use std::collections::VecDeque;

use tablekit_filter::{
    ClauseDraft, ColumnFilters, ColumnType, FacetOption, FilterField, FilterOperator, Row,
    RowIdSource, SequentialRowIds, Value,
};

/// Deterministic clause identities: `r1`, `r2`, ...
pub fn row_ids() -> SequentialRowIds {
    SequentialRowIds::new("r")
}

pub fn fields() -> Vec<FilterField> {
    vec![
        FilterField::new("name", "Name", ColumnType::Text),
        FilterField::new("age", "Age", ColumnType::Number),
        FilterField::new("status", "Status", ColumnType::Select).with_options(vec![
            FacetOption::new("To do", "todo"),
            FacetOption::new("Done", "done"),
        ]),
        FilterField::new("tags", "Tags", ColumnType::MultiSelect),
        FilterField::new("created", "Created", ColumnType::Date),
    ]
}

pub fn people() -> Vec<Row> {
    vec![
        Row::default()
            .with("name", "John Doe")
            .with("age", 25)
            .with("status", "todo")
            .with("tags", vec!["bug", "ui"])
            .with("created", "2024-01-10")
            .with("select", false),
        Row::default()
            .with("name", "Jane Roe")
            .with("age", 10)
            .with("status", "done")
            .with("tags", vec!["docs"])
            .with("created", "2024-02-03")
            .with("select", false),
        Row::default()
            .with("name", "Joan Poe")
            .with("age", 40)
            .with("status", Value::Null)
            .with("tags", Value::Array(vec![]))
            .with("created", Value::Null)
            .with("select", true)
            .with_selected(true),
    ]
}

/// Hands out a fixed list of identities, then falls back to `x1`, `x2`, ...
pub struct ScriptedRowIds {
    script: VecDeque<String>,
    fallback: SequentialRowIds,
}

impl ScriptedRowIds {
    pub fn new(ids: &[&str]) -> Self {
        Self {
            script: ids.iter().map(|id| id.to_string()).collect(),
            fallback: SequentialRowIds::new("x"),
        }
    }
}

impl RowIdSource for ScriptedRowIds {
    fn next_row_id(&mut self) -> String {
        self.script
            .pop_front()
            .unwrap_or_else(|| self.fallback.next_row_id())
    }
}

/// name: [A1 iLike "jo"], status: [B2 eq "done"], built through the reducer
pub fn name_and_status() -> ColumnFilters {
    let mut ids = ScriptedRowIds::new(&["A1", "B2"]);
    ColumnFilters::new()
        .add("name", ClauseDraft::new(FilterOperator::ILike, "jo"), &mut ids)
        .add("status", ClauseDraft::new(FilterOperator::Eq, "done"), &mut ids)
}
