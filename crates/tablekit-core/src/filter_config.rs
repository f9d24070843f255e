//! Filter engine configuration
//!
//! Loaded from TOML or JSON; every field has a default so an empty document
//! is a valid configuration.
//!
//! ```toml
//! debounce_ms = 300
//! row_id_length = 8
//! default_join_operator = "or"
//! ```

use serde::{Deserialize, Serialize};

use crate::{Result, TableKitError};

/// Alphabet used for clause identities: digits, upper case, then lower case
pub const DEFAULT_ROW_ID_ALPHABET: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of a generated clause identity
pub const DEFAULT_ROW_ID_LENGTH: usize = 6;

/// How clauses on different columns are presented as combining.
///
/// This is a display hint; row filtering always requires every column to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinOperator {
    #[default]
    And,
    Or,
}

impl JoinOperator {
    pub fn label(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
        }
    }
}

/// Configuration for the filter engine and the UI layer driving it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Delay the caller should use to coalesce text-input edits.
    /// The engine itself never rate-limits.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Number of characters in a generated clause identity
    #[serde(default = "default_row_id_length")]
    pub row_id_length: usize,
    /// Characters a clause identity is drawn from
    #[serde(default = "default_row_id_alphabet")]
    pub row_id_alphabet: String,
    /// Join operator used initially and after a reset
    #[serde(default)]
    pub default_join_operator: JoinOperator,
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_row_id_length() -> usize {
    DEFAULT_ROW_ID_LENGTH
}

fn default_row_id_alphabet() -> String {
    DEFAULT_ROW_ID_ALPHABET.to_string()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            row_id_length: default_row_id_length(),
            row_id_alphabet: default_row_id_alphabet(),
            default_join_operator: JoinOperator::default(),
        }
    }
}

impl FilterConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that clause identities can actually be generated
    pub fn validate(&self) -> Result<()> {
        if self.row_id_length == 0 {
            tracing::warn!("Rejected filter config: row_id_length is 0");
            return Err(TableKitError::Configuration(
                "row_id_length must be at least 1".to_string(),
            ));
        }

        if let Some(c) = self.row_id_alphabet.chars().find(|c| !c.is_ascii()) {
            tracing::warn!("Rejected filter config: alphabet contains non-ASCII {:?}", c);
            return Err(TableKitError::Configuration(format!(
                "row_id_alphabet must be ASCII, found {:?}",
                c
            )));
        }

        if self.row_id_chars().len() < 2 {
            tracing::warn!(
                "Rejected filter config: alphabet {:?} has fewer than 2 unique characters",
                self.row_id_alphabet
            );
            return Err(TableKitError::Configuration(
                "row_id_alphabet must contain at least 2 unique characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Unique alphabet characters, in declaration order
    pub fn row_id_chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = Vec::new();
        for c in self.row_id_alphabet.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        chars
    }
}
