//! Clause identity generation
//!
//! Every clause gets a short random identity when it is created. Identities
//! are drawn from an alphanumeric alphabet with nanoid; the reducer re-draws
//! on the rare collision with an identity already in the collection.

use tablekit_core::{DEFAULT_ROW_ID_ALPHABET, DEFAULT_ROW_ID_LENGTH, FilterConfig, Result};

use crate::filter_types::ColumnFilters;

/// Draws after which a colliding identity is extended instead of re-drawn
const MAX_REDRAWS: usize = 16;

/// Source of fresh clause identities
pub trait RowIdSource {
    fn next_row_id(&mut self) -> String;
}

/// Random identities from a fixed alphabet
#[derive(Debug, Clone)]
pub struct NanoidRowIds {
    alphabet: Vec<char>,
    length: usize,
}

impl Default for NanoidRowIds {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ROW_ID_ALPHABET.chars().collect(),
            length: DEFAULT_ROW_ID_LENGTH,
        }
    }
}

impl NanoidRowIds {
    /// Use the alphabet and length of `config`, which must validate
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            alphabet: config.row_id_chars(),
            length: config.row_id_length,
        })
    }
}

impl RowIdSource for NanoidRowIds {
    fn next_row_id(&mut self) -> String {
        nanoid::format(nanoid::rngs::default, &self.alphabet, self.length)
    }
}

/// Deterministic identities (`prefix1`, `prefix2`, ...), for replaying edits
/// and for tests
#[derive(Debug, Clone)]
pub struct SequentialRowIds {
    prefix: String,
    next: u64,
}

impl SequentialRowIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl RowIdSource for SequentialRowIds {
    fn next_row_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Draw an identity not used anywhere in `filters`
pub(crate) fn fresh_row_id(filters: &ColumnFilters, ids: &mut dyn RowIdSource) -> String {
    let mut candidate = ids.next_row_id();
    let mut draws = 1;

    while filters.contains_row_id(&candidate) {
        tracing::debug!("Clause identity '{}' already in use, drawing again", candidate);
        if draws < MAX_REDRAWS {
            candidate = ids.next_row_id();
        } else {
            // a source that keeps repeating itself still terminates:
            // identities in use are finite and the candidate keeps growing
            candidate.push_str(&ids.next_row_id());
        }
        draws += 1;
    }

    candidate
}
