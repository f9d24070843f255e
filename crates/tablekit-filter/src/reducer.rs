//! Filter-state reducer
//!
//! Every edit copies the previous collection and returns a new one, so a
//! snapshot held by a reader never changes underneath it. Edits that target
//! a missing column or clause are silent no-ops.

use crate::filter_types::{
    ClauseDraft, ClausePatch, ClauseValue, ColumnFilter, ColumnFilters, FilterField, column_type_of,
};
use crate::row_id::{NanoidRowIds, RowIdSource, fresh_row_id};

/// A clause addressed by column and clause identity
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseRef {
    pub column: String,
    pub row_id: String,
}

/// Up to three independent edits applied in one step, always in the order
/// remove, update, add
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterEdit {
    pub remove: Option<ClauseRef>,
    pub update: Option<(ClauseRef, ClausePatch)>,
    pub add: Option<(String, ClauseDraft)>,
}

impl FilterEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an edit from the seven-slot form used by editing UIs, where an
    /// empty column id skips that sub-edit
    #[allow(clippy::too_many_arguments)]
    pub fn from_slots(
        remove_col_id: &str,
        remove_row_id: &str,
        add_col_id: &str,
        add_value: Option<ClauseDraft>,
        update_col_id: &str,
        update_row_id: &str,
        update_value: Option<ClausePatch>,
    ) -> Self {
        let mut edit = Self::new();
        if !remove_col_id.is_empty() {
            edit = edit.remove(remove_col_id, remove_row_id);
        }
        if !update_col_id.is_empty() {
            match update_value {
                Some(patch) => edit = edit.update(update_col_id, update_row_id, patch),
                None => tracing::debug!("Update on '{}' has no patch, skipping", update_col_id),
            }
        }
        if !add_col_id.is_empty() {
            match add_value {
                Some(draft) => edit = edit.add(add_col_id, draft),
                None => tracing::debug!("Add on '{}' has no clause, skipping", add_col_id),
            }
        }
        edit
    }

    pub fn remove(mut self, column: impl Into<String>, row_id: impl Into<String>) -> Self {
        self.remove = Some(ClauseRef {
            column: column.into(),
            row_id: row_id.into(),
        });
        self
    }

    pub fn update(
        mut self,
        column: impl Into<String>,
        row_id: impl Into<String>,
        patch: ClausePatch,
    ) -> Self {
        self.update = Some((
            ClauseRef {
                column: column.into(),
                row_id: row_id.into(),
            },
            patch,
        ));
        self
    }

    pub fn add(mut self, column: impl Into<String>, draft: ClauseDraft) -> Self {
        self.add = Some((column.into(), draft));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.remove.is_none() && self.update.is_none() && self.add.is_none()
    }
}

impl ColumnFilters {
    /// Apply `edit` with randomly generated clause identities
    pub fn update_filter(&self, edit: &FilterEdit) -> Self {
        self.update_filter_with(edit, &mut NanoidRowIds::default())
    }

    /// Apply `edit`, drawing new clause identities from `ids`
    pub fn update_filter_with(&self, edit: &FilterEdit, ids: &mut dyn RowIdSource) -> Self {
        let mut next = self.clone();

        if let Some(target) = &edit.remove {
            next.remove_clause(&target.column, &target.row_id);
        }
        if let Some((target, patch)) = &edit.update {
            next.update_clause(&target.column, &target.row_id, patch);
        }
        if let Some((column, draft)) = &edit.add {
            let row_id = fresh_row_id(&next, ids);
            next.push_clause(column, draft.clone(), row_id);
        }

        next
    }

    /// Shorthand for a remove-only edit
    pub fn remove(&self, column: &str, row_id: &str) -> Self {
        self.update_filter(&FilterEdit::new().remove(column, row_id))
    }

    /// Shorthand for an update-only edit
    pub fn update(&self, column: &str, row_id: &str, patch: ClausePatch) -> Self {
        self.update_filter(&FilterEdit::new().update(column, row_id, patch))
    }

    /// Shorthand for an add-only edit
    pub fn add(&self, column: &str, draft: ClauseDraft, ids: &mut dyn RowIdSource) -> Self {
        self.update_filter_with(&FilterEdit::new().add(column, draft), ids)
    }

    /// Move the entry at `active_index` to `over_index`.
    ///
    /// An out-of-range `active_index` leaves the order unchanged; an
    /// `over_index` past the end moves the entry to the end.
    pub fn move_entry(&self, active_index: usize, over_index: usize) -> Self {
        let mut next = self.clone();
        if active_index >= next.entries.len() {
            tracing::debug!(
                "Ignoring move of filter {} in a list of {}",
                active_index,
                next.entries.len()
            );
            return next;
        }

        let entry = next.entries.remove(active_index);
        let over_index = over_index.min(next.entries.len());
        next.entries.insert(over_index, entry);
        next
    }

    /// Add a clause for the first field, with that field's default operator
    /// and an empty value
    pub fn add_default_filter(&self, fields: &[FilterField], ids: &mut dyn RowIdSource) -> Self {
        let Some(field) = fields.first() else {
            tracing::debug!("No filter fields, nothing to add");
            return self.clone();
        };

        let draft = ClauseDraft::new(field.column_type.default_operator(), ClauseValue::empty());
        self.add(&field.id, draft, ids)
    }

    /// Move a clause to another column. The operator and value survive when
    /// both columns share a declared type; otherwise the new column's default
    /// operator and an empty value are used. The clause gets a new identity.
    pub fn change_column(
        &self,
        from_column: &str,
        row_id: &str,
        to_column: &str,
        fields: &[FilterField],
        ids: &mut dyn RowIdSource,
    ) -> Self {
        let Some(clause) = self.get(from_column).and_then(|e| e.clause(row_id)) else {
            tracing::debug!("No clause '{}' on '{}' to move", row_id, from_column);
            return self.clone();
        };
        let Some(to_type) = column_type_of(fields, to_column) else {
            tracing::debug!("Unknown filter field '{}'", to_column);
            return self.clone();
        };

        let draft = if column_type_of(fields, from_column) == Some(to_type) {
            ClauseDraft::new(clause.operator.clone(), clause.value.clone())
        } else {
            ClauseDraft::new(to_type.default_operator(), ClauseValue::empty())
        };

        let edit = FilterEdit::new()
            .remove(from_column, row_id)
            .add(to_column, draft);
        self.update_filter_with(&edit, ids)
    }

    /// Drop one clause; drop its entry as well when it was the last one
    fn remove_clause(&mut self, column: &str, row_id: &str) {
        let Some(index) = self.entries.iter().position(|e| e.id == column) else {
            tracing::debug!("Remove: no filter on column '{}'", column);
            return;
        };

        let entry = &mut self.entries[index];
        entry.clauses.retain(|c| c.row_id != row_id);
        if entry.clauses.is_empty() {
            self.entries.remove(index);
        }
    }

    fn update_clause(&mut self, column: &str, row_id: &str, patch: &ClausePatch) {
        let clause = self
            .entries
            .iter_mut()
            .filter(|e| e.id == column)
            .flat_map(|e| e.clauses.iter_mut())
            .find(|c| c.row_id == row_id);

        match clause {
            Some(clause) => patch.apply_to(clause),
            None => tracing::debug!("Update: no clause '{}' on column '{}'", row_id, column),
        }
    }

    fn push_clause(&mut self, column: &str, draft: ClauseDraft, row_id: String) {
        let clause = draft.into_clause(row_id);
        match self.entries.iter_mut().find(|e| e.id == column) {
            Some(entry) => entry.clauses.push(clause),
            None => self.entries.push(ColumnFilter::new(column, vec![clause])),
        }
    }
}
