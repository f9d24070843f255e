//! Applying filter state and global search to a row set

use tablekit_core::FilterRow;

use crate::evaluate::{advanced_filter, auto_remove};
use crate::filter_types::ColumnFilters;

/// Rows surviving the active filters, as indices into the source rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredRows {
    pub indices: Vec<usize>,
    /// False when neither filters nor search text were active, in which case
    /// every row is visible and `indices` is empty
    pub is_filtering: bool,
    total: usize,
}

impl FilteredRows {
    /// Apply `filters` and an optional global search text to `rows`
    pub fn apply<R: FilterRow>(rows: &[R], filters: &ColumnFilters, search_text: &str) -> Self {
        let has_filters = filters.iter().any(|e| !auto_remove(&e.clauses));
        let has_search = !search_text.is_empty();

        if !has_filters && !has_search {
            return Self {
                indices: Vec::new(),
                is_filtering: false,
                total: rows.len(),
            };
        }

        Self {
            indices: filtered_row_indices(rows, filters, search_text),
            is_filtering: true,
            total: rows.len(),
        }
    }

    pub fn match_count(&self) -> usize {
        if self.is_filtering {
            self.indices.len()
        } else {
            self.total
        }
    }

    pub fn get_actual_row_index(&self, display_row: usize) -> usize {
        if self.is_filtering {
            self.indices.get(display_row).copied().unwrap_or(display_row)
        } else {
            display_row
        }
    }
}

/// Indices of the rows passing every column filter and, when `search_text` is
/// non-empty, containing it (case-insensitively) in some cell
pub fn filtered_row_indices<R: FilterRow>(
    rows: &[R],
    filters: &ColumnFilters,
    search_text: &str,
) -> Vec<usize> {
    let search_lower = search_text.to_lowercase();

    let indices: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            if !row_matches(*row, filters) {
                return false;
            }
            if !search_lower.is_empty() && !row_matches_search(*row, &search_lower) {
                return false;
            }
            true
        })
        .map(|(idx, _)| idx)
        .collect();

    tracing::debug!(
        "{} of {} rows pass {} column filters",
        indices.len(),
        rows.len(),
        filters.len()
    );
    indices
}

/// Whether `row` passes every column filter. Columns combine with AND.
pub fn row_matches<R: FilterRow>(row: &R, filters: &ColumnFilters) -> bool {
    filters
        .iter()
        .filter(|entry| !auto_remove(&entry.clauses))
        .all(|entry| advanced_filter(row, &entry.id, &entry.clauses))
}

fn row_matches_search<R: FilterRow>(row: &R, search_lower: &str) -> bool {
    row.values()
        .any(|cell| cell.to_text().to_lowercase().contains(search_lower))
}
