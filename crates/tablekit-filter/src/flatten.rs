//! Flattening filter state into ordered editor rows

use tablekit_core::JoinOperator;

use crate::filter_types::{ColumnFilters, ColumnType, FilterClause, FilterField, column_type_of};

/// One clause laid out for the filter editor
#[derive(Debug, Clone, PartialEq)]
pub struct FlatFilter<'a> {
    pub column: &'a str,
    /// `None` when the column has no field metadata
    pub column_type: Option<ColumnType>,
    pub clause: &'a FilterClause,
}

impl ColumnFilters {
    /// Every clause in collection order, one row each
    pub fn flatten<'a>(&'a self, fields: &[FilterField]) -> Vec<FlatFilter<'a>> {
        self.iter()
            .flat_map(|entry| {
                let column_type = column_type_of(fields, &entry.id);
                entry.clauses.iter().map(move |clause| FlatFilter {
                    column: &entry.id,
                    column_type,
                    clause,
                })
            })
            .collect()
    }
}

/// Text shown before the flattened row at `index`
pub fn connector_label(index: usize, join: JoinOperator) -> &'static str {
    if index == 0 { "Where" } else { join.label() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_types::{ColumnFilter, FilterOperator};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flatten_in_collection_order() {
        let filters = ColumnFilters {
            entries: vec![
                ColumnFilter::new(
                    "name",
                    vec![
                        FilterClause::new("A1", FilterOperator::ILike, "jo"),
                        FilterClause::new("A2", FilterOperator::NotILike, "doe"),
                    ],
                ),
                ColumnFilter::new("age", vec![FilterClause::new("B1", FilterOperator::Gt, "18")]),
            ],
        };
        let fields = vec![FilterField::new("name", "Name", ColumnType::Text)];

        let flat = filters.flatten(&fields);
        let rows: Vec<(&str, Option<ColumnType>, &str)> = flat
            .iter()
            .map(|f| (f.column, f.column_type, f.clause.row_id.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("name", Some(ColumnType::Text), "A1"),
                ("name", Some(ColumnType::Text), "A2"),
                ("age", None, "B1"),
            ]
        );
    }

    #[test]
    fn test_connector_label() {
        assert_eq!(connector_label(0, JoinOperator::Or), "Where");
        assert_eq!(connector_label(1, JoinOperator::And), "and");
        assert_eq!(connector_label(2, JoinOperator::Or), "or");
    }
}
