//! Serialized dispatch point for filter-state edits
//!
//! The store owns the current collection as an `Arc` snapshot. Each action
//! builds a new collection from the previous one and swaps it in, so readers
//! holding an older snapshot keep a consistent view.

use std::sync::Arc;

use tablekit_core::{FilterConfig, JoinOperator, Result};

use crate::filter_types::{ClauseDraft, ColumnFilters, FilterField, Scalar};
use crate::flatten::FlatFilter;
use crate::reducer::FilterEdit;
use crate::row_id::{NanoidRowIds, RowIdSource};

/// An edit the store can apply
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    Update(FilterEdit),
    Move {
        active_index: usize,
        over_index: usize,
    },
    Reset,
    SetJoinOperator(JoinOperator),
    AddDefault,
    Add {
        column: String,
        draft: ClauseDraft,
    },
    ChangeColumn {
        from_column: String,
        row_id: String,
        to_column: String,
    },
    ToggleFacet {
        column: String,
        option: Scalar,
    },
    ClearFacet {
        column: String,
    },
}

pub struct FilterStore {
    filters: Arc<ColumnFilters>,
    join_operator: JoinOperator,
    fields: Vec<FilterField>,
    config: FilterConfig,
    row_ids: Box<dyn RowIdSource>,
}

impl std::fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterStore")
            .field("filters", &self.filters)
            .field("join_operator", &self.join_operator)
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}

impl FilterStore {
    /// Create a store with random clause identities drawn per `config`
    pub fn new(fields: Vec<FilterField>, config: FilterConfig) -> Result<Self> {
        let row_ids = NanoidRowIds::from_config(&config)?;
        Ok(Self::with_row_ids(fields, config, Box::new(row_ids)))
    }

    /// Create a store drawing clause identities from `row_ids`
    pub fn with_row_ids(
        fields: Vec<FilterField>,
        config: FilterConfig,
        row_ids: Box<dyn RowIdSource>,
    ) -> Self {
        Self {
            filters: Arc::new(ColumnFilters::new()),
            join_operator: config.default_join_operator,
            fields,
            config,
            row_ids,
        }
    }

    /// Start from an existing collection, e.g. one restored by the caller
    pub fn with_filters(mut self, filters: ColumnFilters) -> Self {
        self.filters = Arc::new(filters);
        self
    }

    /// Apply `action` and return the new snapshot
    pub fn dispatch(&mut self, action: FilterAction) -> Arc<ColumnFilters> {
        let ids = &mut *self.row_ids;
        let next = match action {
            FilterAction::Update(edit) => self.filters.update_filter_with(&edit, ids),
            FilterAction::Move {
                active_index,
                over_index,
            } => self.filters.move_entry(active_index, over_index),
            FilterAction::Reset => {
                tracing::info!("Resetting {} column filters", self.filters.len());
                self.join_operator = self.config.default_join_operator;
                ColumnFilters::new()
            }
            FilterAction::SetJoinOperator(join) => {
                self.join_operator = join;
                return self.snapshot();
            }
            FilterAction::AddDefault => self.filters.add_default_filter(&self.fields, ids),
            FilterAction::Add { column, draft } => self.filters.add(&column, draft, ids),
            FilterAction::ChangeColumn {
                from_column,
                row_id,
                to_column,
            } => self
                .filters
                .change_column(&from_column, &row_id, &to_column, &self.fields, ids),
            FilterAction::ToggleFacet { column, option } => {
                self.filters.toggle_facet(&column, option, ids)
            }
            FilterAction::ClearFacet { column } => self.filters.clear_facet(&column),
        };

        self.filters = Arc::new(next);
        self.snapshot()
    }

    /// The current collection; unaffected by later dispatches
    pub fn snapshot(&self) -> Arc<ColumnFilters> {
        Arc::clone(&self.filters)
    }

    pub fn join_operator(&self) -> JoinOperator {
        self.join_operator
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    pub fn set_fields(&mut self, fields: Vec<FilterField>) {
        self.fields = fields;
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Current clauses laid out for display
    pub fn flatten(&self) -> Vec<FlatFilter<'_>> {
        self.filters.flatten(&self.fields)
    }
}
