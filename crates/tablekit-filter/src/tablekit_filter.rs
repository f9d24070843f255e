//! tablekit filter - advanced filtering for client-side data grids
//!
//! This crate evaluates per-column filter clauses against rows and maintains
//! the filter-state collection an editing UI manipulates.
//!
//! ## Features
//!
//! - **Evaluation**: `advanced_filter` checks one column's clauses against a row
//! - **Reducer**: copy-on-write edits on `ColumnFilters` (remove, update, add,
//!   move, change column, facet toggles)
//! - **Row filtering**: `filtered_row_indices` applies a whole collection plus
//!   an optional search text to a row set
//! - **Store**: `FilterStore` serializes edits and hands out `Arc` snapshots
//!
//! ## Example
//!
//! ```rust,ignore
//! use tablekit_filter::{ClauseDraft, ColumnFilters, FilterEdit, FilterOperator, Row, filtered_row_indices};
//!
//! let filters = ColumnFilters::new()
//!     .update_filter(&FilterEdit::new().add("age", ClauseDraft::new(FilterOperator::Gt, "18")));
//!
//! let rows = vec![Row::default().with("age", 25), Row::default().with("age", 10)];
//! assert_eq!(filtered_row_indices(&rows, &filters, ""), vec![0]);
//! ```

mod evaluate;
mod facets;
mod filter_types;
mod filtering;
mod flatten;
mod reducer;
mod row_id;
mod store;

pub use evaluate::{advanced_filter, auto_remove, evaluate};
pub use facets::facet_counts;
pub use filter_types::*;
pub use filtering::{FilteredRows, filtered_row_indices, row_matches};
pub use flatten::{FlatFilter, connector_label};
pub use reducer::{ClauseRef, FilterEdit};
pub use row_id::{NanoidRowIds, RowIdSource, SequentialRowIds};
pub use store::{FilterAction, FilterStore};

pub use tablekit_core::{FilterConfig, FilterRow, JoinOperator, Result, Row, TableKitError, Value};
