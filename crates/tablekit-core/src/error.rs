//! Error types for tablekit

use thiserror::Error;

/// Core error type for tablekit operations
///
/// Filter evaluation and filter-state edits never produce these; they are
/// reserved for explicit validation and configuration loading.
#[derive(Error, Debug)]
pub enum TableKitError {
    #[error("Invalid filter value for operator '{operator}': expected {expected}, got {actual}")]
    InvalidClauseShape {
        operator: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Unknown column type: {0}")]
    UnknownColumnType(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for tablekit operations
pub type Result<T> = std::result::Result<T, TableKitError>;
