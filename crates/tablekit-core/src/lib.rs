//! tablekit core - shared types for the client-side data grid toolkit
//!
//! This crate provides the pieces every other tablekit crate depends on:
//!
//! - `Value` - a materialized cell value, with loose text/number/date coercions
//! - `FilterRow` - read access to a row (cell values and selection state)
//! - `FilterConfig` / `JoinOperator` - filter engine configuration
//! - `TableKitError` - the error type for validation and configuration

mod coerce;
mod error;
mod filter_config;
mod types;

pub use coerce::{format_number, parse_date_millis, parse_number};
pub use error::*;
pub use filter_config::*;
pub use types::*;
