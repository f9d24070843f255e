//! Facet selection for select/multi-select columns
//!
//! A column's selected options live in its first `has` clause. Toggling
//! an option goes through the reducer like any other edit.

use indexmap::IndexMap;
use tablekit_core::{FilterRow, Value};

use crate::filter_types::{
    ClauseDraft, ClausePatch, ClauseValue, ColumnFilters, FilterClause, FilterField,
    FilterOperator, Scalar,
};
use crate::reducer::FilterEdit;
use crate::row_id::RowIdSource;

impl ColumnFilters {
    /// The clause holding `column`'s facet selection
    pub fn facet_clause(&self, column: &str) -> Option<&FilterClause> {
        self.clauses_for(column)
            .iter()
            .find(|c| c.operator == FilterOperator::Has)
    }

    /// Options currently selected for `column`
    pub fn selected_facets(&self, column: &str) -> Vec<&Scalar> {
        self.facet_clause(column)
            .and_then(|c| c.value.as_items())
            .unwrap_or_default()
    }

    pub fn is_facet_selected(&self, column: &str, option: &Scalar) -> bool {
        self.selected_facets(column).contains(&option)
    }

    /// Select `option` if it is not selected, otherwise deselect it. The
    /// selection clause is removed once nothing is selected.
    pub fn toggle_facet(&self, column: &str, option: Scalar, ids: &mut dyn RowIdSource) -> Self {
        let Some(clause) = self.facet_clause(column) else {
            let draft = ClauseDraft::new(FilterOperator::Has, ClauseValue::List(vec![option]));
            return self.update_filter_with(&FilterEdit::new().add(column, draft), ids);
        };

        let mut selected: Vec<Scalar> = self
            .selected_facets(column)
            .into_iter()
            .cloned()
            .collect();
        match selected.iter().position(|s| *s == option) {
            Some(index) => {
                selected.remove(index);
            }
            None => selected.push(option),
        }

        let edit = if selected.is_empty() {
            FilterEdit::new().remove(column, &clause.row_id)
        } else {
            FilterEdit::new().update(
                column,
                &clause.row_id,
                ClausePatch::value(ClauseValue::List(selected)),
            )
        };
        self.update_filter_with(&edit, ids)
    }

    /// Drop `column`'s facet selection
    pub fn clear_facet(&self, column: &str) -> Self {
        match self.facet_clause(column) {
            Some(clause) => self.remove(column, &clause.row_id),
            None => {
                tracing::debug!("No facet selection on '{}' to clear", column);
                self.clone()
            }
        }
    }
}

/// Row count per distinct value of `column`, in first-seen order. Array cells
/// count once per element; NULL cells are not counted.
pub fn facet_counts<R: FilterRow>(rows: &[R], column: &str) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for row in rows {
        match row.value(column) {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    *counts.entry(item.to_text()).or_insert(0) += 1;
                }
            }
            Some(value) => *counts.entry(value.to_text()).or_insert(0) += 1,
        }
    }
    counts
}

impl FilterField {
    /// Fill each option's count from `rows`; options with no rows get zero
    pub fn with_counts<R: FilterRow>(mut self, rows: &[R]) -> Self {
        let counts = facet_counts(rows, &self.id);
        for option in &mut self.options {
            option.count = Some(counts.get(&option.value).copied().unwrap_or(0));
        }
        self
    }
}
