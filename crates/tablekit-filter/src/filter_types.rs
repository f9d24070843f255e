//! Filter types for the advanced filter engine
//!
//! Shared data structures for clauses, per-column entries, operators, and the
//! field metadata the editing UI supplies.

use serde::{Deserialize, Serialize};
use tablekit_core::{Result, TableKitError, Value, format_number};

/// Filter operators understood by the evaluator.
///
/// Operators arrive as strings from the editing UI. Anything not listed here
/// is kept as [`FilterOperator::Unknown`] and always passes evaluation, so a
/// newer UI can introduce operators without breaking older engines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOperator {
    // String operators
    ILike,
    NotILike,

    // Equality operators
    Eq,
    Ne,

    // Numeric comparison operators
    Gt,
    Gte,
    Lt,
    Lte,

    // Set membership operators
    Has,
    HasNot,

    // Empty operators
    IsEmpty,
    IsNotEmpty,

    // Date operators
    IsBetween,
    DateEq,
    DateNe,
    DateLt,
    DateGt,
    DateLte,
    DateGte,

    // Row selection
    RowSelect,

    /// An operator this engine does not model
    Unknown(String),
}

impl FilterOperator {
    /// Wire name of the operator
    pub fn as_str(&self) -> &str {
        match self {
            Self::ILike => "iLike",
            Self::NotILike => "notILike",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Has => "has",
            Self::HasNot => "hasNot",
            Self::IsEmpty => "isEmpty",
            Self::IsNotEmpty => "isNotEmpty",
            Self::IsBetween => "isBetween",
            Self::DateEq => "date-eq",
            Self::DateNe => "date-ne",
            Self::DateLt => "date-lt",
            Self::DateGt => "date-gt",
            Self::DateLte => "date-lte",
            Self::DateGte => "date-gte",
            Self::RowSelect => "row-select",
            Self::Unknown(name) => name,
        }
    }

    /// Get the display label for the operator
    pub fn label(&self) -> &str {
        match self {
            Self::ILike => "Contains",
            Self::NotILike => "Does not contain",
            Self::Eq => "Is",
            Self::Ne => "Is not",
            Self::Gt => "Is greater than",
            Self::Gte => "Is greater than or equal to",
            Self::Lt => "Is less than",
            Self::Lte => "Is less than or equal to",
            Self::Has => "Has any of",
            Self::HasNot => "Has none of",
            Self::IsEmpty => "Is empty",
            Self::IsNotEmpty => "Is not empty",
            Self::IsBetween => "Is between",
            Self::DateEq => "Is",
            Self::DateNe => "Is not",
            Self::DateLt => "Is before",
            Self::DateGt => "Is after",
            Self::DateLte => "Is on or before",
            Self::DateGte => "Is on or after",
            Self::RowSelect => "Is selected",
            Self::Unknown(name) => name,
        }
    }

    /// Returns true if this operator is meaningful without an operand
    pub fn is_empty_check(&self) -> bool {
        matches!(self, Self::IsEmpty | Self::IsNotEmpty)
    }

    /// Shape the clause value is expected to have for this operator
    pub fn expected_shape(&self) -> ValueShape {
        match self {
            Self::IsEmpty | Self::IsNotEmpty => ValueShape::None,
            Self::IsBetween => ValueShape::Pair,
            Self::Has | Self::HasNot => ValueShape::List,
            Self::RowSelect | Self::Unknown(_) => ValueShape::Any,
            _ => ValueShape::Scalar,
        }
    }
}

impl From<&str> for FilterOperator {
    fn from(name: &str) -> Self {
        match name {
            "iLike" => Self::ILike,
            "notILike" => Self::NotILike,
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            "has" => Self::Has,
            "hasNot" => Self::HasNot,
            "isEmpty" => Self::IsEmpty,
            "isNotEmpty" => Self::IsNotEmpty,
            "isBetween" => Self::IsBetween,
            "date-eq" => Self::DateEq,
            "date-ne" => Self::DateNe,
            "date-lt" => Self::DateLt,
            "date-gt" => Self::DateGt,
            "date-lte" => Self::DateLte,
            "date-gte" => Self::DateGte,
            "row-select" => Self::RowSelect,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for FilterOperator {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<FilterOperator> for String {
    fn from(operator: FilterOperator) -> Self {
        operator.as_str().to_string()
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected shape of a clause value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// No operand; the value should be empty
    None,
    Scalar,
    /// A `[start, end]` pair
    Pair,
    List,
    /// Anything goes
    Any,
}

impl ValueShape {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "no value",
            Self::Scalar => "a single value",
            Self::Pair => "a [start, end] pair",
            Self::List => "a list of values",
            Self::Any => "any value",
        }
    }
}

/// A single operand as typed into the filter UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Text form, matching how a grid would stringify the operand
    pub fn to_text(&self) -> String {
        match self {
            Self::Bool(v) => v.to_string(),
            Self::Number(v) => format_number(*v),
            Self::Text(s) => s.clone(),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Bool(v) => Value::Bool(*v),
            Self::Number(v) => Value::Float64(*v),
            Self::Text(s) => Value::String(s.clone()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// The operand of a clause; its shape depends on the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClauseValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
    /// Serialized as a two-element array; only produced when the operator
    /// expects a pair
    Pair(Scalar, Scalar),
}

impl Default for ClauseValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl ClauseValue {
    /// The empty operand a freshly added clause starts with
    pub fn empty() -> Self {
        Self::Scalar(Scalar::Text(String::new()))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(value.into()))
    }

    pub fn pair(start: impl Into<Scalar>, end: impl Into<Scalar>) -> Self {
        Self::Pair(start.into(), end.into())
    }

    pub fn list<T: Into<Scalar>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Empty text or an empty list
    pub fn is_vacuous(&self) -> bool {
        match self {
            Self::Scalar(Scalar::Text(s)) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Items of a list or pair
    pub fn as_items(&self) -> Option<Vec<&Scalar>> {
        match self {
            Self::List(items) => Some(items.iter().collect()),
            Self::Pair(a, b) => Some(vec![a, b]),
            Self::Scalar(_) => None,
        }
    }

    /// `[start, end]` bounds of a pair, or of a two-element list
    pub fn as_pair(&self) -> Option<(&Scalar, &Scalar)> {
        match self {
            Self::Pair(a, b) => Some((a, b)),
            Self::List(items) => match items.as_slice() {
                [a, b] => Some((a, b)),
                _ => None,
            },
            Self::Scalar(_) => None,
        }
    }

    /// Text form; lists join with `,`
    pub fn to_text(&self) -> String {
        match self {
            Self::Scalar(s) => s.to_text(),
            Self::List(items) => items
                .iter()
                .map(Scalar::to_text)
                .collect::<Vec<_>>()
                .join(","),
            Self::Pair(a, b) => format!("{},{}", a.to_text(), b.to_text()),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Scalar(s) => s.to_value(),
            Self::List(items) => Value::Array(items.iter().map(Scalar::to_value).collect()),
            Self::Pair(a, b) => Value::Array(vec![a.to_value(), b.to_value()]),
        }
    }

    fn shape_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) if self.is_vacuous() => "no value",
            Self::Scalar(_) => "a single value",
            Self::List(_) => "a list of values",
            Self::Pair(_, _) => "a [start, end] pair",
        }
    }

    /// Re-shape a two-element list into a pair when the operator expects one.
    /// Untagged deserialization cannot tell the two apart.
    fn normalized_for(self, operator: &FilterOperator) -> Self {
        match (operator.expected_shape(), self) {
            (ValueShape::Pair, Self::List(mut items)) if items.len() == 2 => {
                match (items.pop(), items.pop()) {
                    (Some(end), Some(start)) => Self::Pair(start, end),
                    _ => Self::List(items),
                }
            }
            (_, value) => value,
        }
    }
}

impl From<&str> for ClauseValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<Scalar> for ClauseValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

/// Check that `value` has the shape `operator` expects
pub fn validate_shape(operator: &FilterOperator, value: &ClauseValue) -> Result<()> {
    let expected = operator.expected_shape();
    let ok = match expected {
        ValueShape::Any => true,
        ValueShape::None => value.is_vacuous(),
        ValueShape::Scalar => matches!(value, ClauseValue::Scalar(_)),
        ValueShape::Pair => value.as_pair().is_some(),
        ValueShape::List => matches!(value, ClauseValue::List(_)),
    };

    if ok {
        Ok(())
    } else {
        Err(TableKitError::InvalidClauseShape {
            operator: operator.to_string(),
            expected: expected.label(),
            actual: value.shape_name(),
        })
    }
}

/// One typed filter condition attached to a column.
///
/// `row_id` identifies this clause instance (not a data row) and is unique
/// across the whole filter-state collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawClause")]
pub struct FilterClause {
    #[serde(rename = "rowId")]
    pub row_id: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: ClauseValue,
}

#[derive(Deserialize)]
struct RawClause {
    #[serde(rename = "rowId")]
    row_id: String,
    operator: FilterOperator,
    #[serde(default)]
    value: ClauseValue,
}

impl From<RawClause> for FilterClause {
    fn from(raw: RawClause) -> Self {
        let value = raw.value.normalized_for(&raw.operator);
        Self {
            row_id: raw.row_id,
            operator: raw.operator,
            value,
        }
    }
}

impl FilterClause {
    pub fn new(
        row_id: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<ClauseValue>,
    ) -> Self {
        let value = value.into().normalized_for(&operator);
        Self {
            row_id: row_id.into(),
            operator,
            value,
        }
    }

    /// Check the clause value against the operator's expected shape
    pub fn validate(&self) -> Result<()> {
        validate_shape(&self.operator, &self.value)
    }

    /// A clause whose operand is empty is ignored by evaluation,
    /// unless the operator needs no operand
    pub fn is_vacuous(&self) -> bool {
        self.value.is_vacuous() && !self.operator.is_empty_check()
    }
}

/// Operator and value of a clause about to be added; the reducer assigns
/// the identity
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseDraft {
    pub operator: FilterOperator,
    pub value: ClauseValue,
}

impl ClauseDraft {
    pub fn new(operator: FilterOperator, value: impl Into<ClauseValue>) -> Self {
        let value = value.into().normalized_for(&operator);
        Self { operator, value }
    }

    /// Validate before handing the draft to the reducer
    pub fn validate(&self) -> Result<()> {
        validate_shape(&self.operator, &self.value)
    }

    pub(crate) fn into_clause(self, row_id: String) -> FilterClause {
        FilterClause {
            row_id,
            operator: self.operator,
            value: self.value,
        }
    }
}

/// Partial update merged onto an existing clause; `None` fields are kept
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClausePatch {
    pub operator: Option<FilterOperator>,
    pub value: Option<ClauseValue>,
}

impl ClausePatch {
    pub fn operator(operator: FilterOperator) -> Self {
        Self {
            operator: Some(operator),
            value: None,
        }
    }

    pub fn value(value: impl Into<ClauseValue>) -> Self {
        Self {
            operator: None,
            value: Some(value.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.operator.is_none() && self.value.is_none()
    }

    pub(crate) fn apply_to(&self, clause: &mut FilterClause) {
        if let Some(operator) = &self.operator {
            clause.operator = operator.clone();
        }
        if let Some(value) = &self.value {
            clause.value = value.clone();
        }
        clause.value = std::mem::take(&mut clause.value).normalized_for(&clause.operator);
    }
}

/// All clauses for one column. Never empty once stored in a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub id: String,
    #[serde(rename = "value")]
    pub clauses: Vec<FilterClause>,
}

impl ColumnFilter {
    pub fn new(id: impl Into<String>, clauses: Vec<FilterClause>) -> Self {
        Self {
            id: id.into(),
            clauses,
        }
    }

    pub fn clause(&self, row_id: &str) -> Option<&FilterClause> {
        self.clauses.iter().find(|c| c.row_id == row_id)
    }
}

/// The ordered filter-state collection.
///
/// Values of this type are never mutated in place by the engine: every edit
/// returns a new collection built from a copy of the previous one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnFilters {
    pub(crate) entries: Vec<ColumnFilter>,
}

impl ColumnFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ColumnFilter] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnFilter> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a column
    pub fn get(&self, column: &str) -> Option<&ColumnFilter> {
        self.entries.iter().find(|e| e.id == column)
    }

    /// Clause list for a column; empty when the column is unfiltered
    pub fn clauses_for(&self, column: &str) -> &[FilterClause] {
        self.get(column).map(|e| e.clauses.as_slice()).unwrap_or(&[])
    }

    /// Locate a clause anywhere in the collection
    pub fn find_clause(&self, row_id: &str) -> Option<(&ColumnFilter, &FilterClause)> {
        self.entries
            .iter()
            .find_map(|e| e.clause(row_id).map(|c| (e, c)))
    }

    pub fn contains_row_id(&self, row_id: &str) -> bool {
        self.find_clause(row_id).is_some()
    }

    /// Total number of clauses across all columns
    pub fn clause_count(&self) -> usize {
        self.entries.iter().map(|e| e.clauses.len()).sum()
    }
}

impl<'a> IntoIterator for &'a ColumnFilters {
    type Item = &'a ColumnFilter;
    type IntoIter = std::slice::Iter<'a, ColumnFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

const TEXT_OPERATORS: &[FilterOperator] = &[
    FilterOperator::ILike,
    FilterOperator::NotILike,
    FilterOperator::Eq,
    FilterOperator::Ne,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
];

const NUMBER_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Eq,
    FilterOperator::Ne,
    FilterOperator::Lt,
    FilterOperator::Lte,
    FilterOperator::Gt,
    FilterOperator::Gte,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
];

const DATE_OPERATORS: &[FilterOperator] = &[
    FilterOperator::DateEq,
    FilterOperator::DateNe,
    FilterOperator::DateLt,
    FilterOperator::DateGt,
    FilterOperator::DateLte,
    FilterOperator::DateGte,
    FilterOperator::IsBetween,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
];

const BOOLEAN_OPERATORS: &[FilterOperator] = &[FilterOperator::Eq, FilterOperator::Ne];

const SELECT_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Eq,
    FilterOperator::Ne,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
];

const MULTI_SELECT_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Has,
    FilterOperator::HasNot,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
];

/// Declared type of a filterable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnType {
    Text,
    Number,
    Date,
    Boolean,
    Select,
    MultiSelect,
}

impl ColumnType {
    /// Operators offered for this column type, default first
    pub fn operators(&self) -> &'static [FilterOperator] {
        match self {
            Self::Text => TEXT_OPERATORS,
            Self::Number => NUMBER_OPERATORS,
            Self::Date => DATE_OPERATORS,
            Self::Boolean => BOOLEAN_OPERATORS,
            Self::Select => SELECT_OPERATORS,
            Self::MultiSelect => MULTI_SELECT_OPERATORS,
        }
    }

    pub fn default_operator(&self) -> FilterOperator {
        self.operators()[0].clone()
    }

    pub fn supports(&self, operator: &FilterOperator) -> bool {
        self.operators().contains(operator)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::MultiSelect => "multi-select",
        }
    }
}

impl std::str::FromStr for ColumnType {
    type Err = TableKitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "date" => Ok(Self::Date),
            "boolean" => Ok(Self::Boolean),
            "select" => Ok(Self::Select),
            "multi-select" => Ok(Self::MultiSelect),
            other => Err(TableKitError::UnknownColumnType(other.to_string())),
        }
    }
}

/// A discrete option for select/multi-select filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetOption {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl FacetOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            count: None,
        }
    }
}

/// Filter-field metadata for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FacetOption>,
}

impl FilterField {
    pub fn new(id: impl Into<String>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            column_type,
            placeholder: None,
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<FacetOption>) -> Self {
        self.options = options;
        self
    }
}

/// Declared type of `column` among `fields`
pub fn column_type_of(fields: &[FilterField], column: &str) -> Option<ColumnType> {
    fields
        .iter()
        .find(|f| f.id == column)
        .map(|f| f.column_type)
}
